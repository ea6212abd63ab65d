//! MACD (Moving Average Convergence Divergence)
//!
//! MACD = EMA(12) - EMA(26)
//! Signal = EMA(9) of MACD
//! Histogram = MACD - Signal

use crate::indicators::error::{IndicatorResult, InsufficientHistory};
use crate::indicators::math;
use crate::models::indicators::{MacdPoint, MacdSeries};
use crate::models::market::PriceBar;

pub const MACD_FAST: usize = 12;
pub const MACD_SLOW: usize = 26;
pub const MACD_SIGNAL: usize = 9;

/// Bars needed before the first signal value exists
pub const fn macd_warmup(slow: usize, signal: usize) -> usize {
    slow + signal - 1
}

pub fn macd_series(closes: &[f64], fast: usize, slow: usize, signal: usize) -> MacdSeries {
    let mut points = vec![None; closes.len()];
    if fast == 0 || slow <= fast || signal == 0 || closes.len() < slow {
        return MacdSeries { points };
    }

    let fast_ema = math::ema_series(closes, fast);
    let slow_ema = math::ema_series(closes, slow);

    // MACD line exists from the first slow EMA value onwards
    let start = slow - 1;
    let macd_line: Vec<f64> = (start..closes.len())
        .filter_map(|i| Some(fast_ema[i]? - slow_ema[i]?))
        .collect();
    let signal_line = math::ema_series(&macd_line, signal);

    for (offset, (macd, sig)) in macd_line.iter().zip(signal_line.iter()).enumerate() {
        if let Some(sig) = sig {
            points[start + offset] = Some(MacdPoint {
                macd: *macd,
                signal: *sig,
                histogram: macd - sig,
            });
        }
    }

    MacdSeries { points }
}

/// Latest MACD(12, 26, 9) reading
pub fn calculate_macd(bars: &[PriceBar]) -> IndicatorResult<MacdPoint> {
    let required = macd_warmup(MACD_SLOW, MACD_SIGNAL);
    InsufficientHistory::check("macd", required, bars.len())?;
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    macd_series(&closes, MACD_FAST, MACD_SLOW, MACD_SIGNAL)
        .latest()
        .ok_or(InsufficientHistory {
            indicator: "macd",
            required,
            available: bars.len(),
        })
}
