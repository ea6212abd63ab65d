//! RSI (Relative Strength Index) with Wilder smoothing

use crate::indicators::error::{IndicatorResult, InsufficientHistory};
use crate::models::market::PriceBar;

pub const RSI_PERIOD: usize = 14;

/// RSI for every bar, `None` until `period` price changes have been seen.
///
/// RSI = 100 - (100 / (1 + RS)), RS = smoothed gain / smoothed loss.
pub fn rsi_series(closes: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; closes.len()];
    if period == 0 || closes.len() <= period {
        return out;
    }

    let mut avg_gain = 0.0;
    let mut avg_loss = 0.0;
    for i in 1..=period {
        let change = closes[i] - closes[i - 1];
        if change > 0.0 {
            avg_gain += change;
        } else {
            avg_loss -= change;
        }
    }
    avg_gain /= period as f64;
    avg_loss /= period as f64;
    out[period] = Some(rsi_value(avg_gain, avg_loss));

    let p = period as f64;
    for i in period + 1..closes.len() {
        let change = closes[i] - closes[i - 1];
        let (gain, loss) = if change > 0.0 { (change, 0.0) } else { (0.0, -change) };
        avg_gain = (avg_gain * (p - 1.0) + gain) / p;
        avg_loss = (avg_loss * (p - 1.0) + loss) / p;
        out[i] = Some(rsi_value(avg_gain, avg_loss));
    }
    out
}

fn rsi_value(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        if avg_gain == 0.0 {
            50.0
        } else {
            100.0
        }
    } else {
        let rs = avg_gain / avg_loss;
        100.0 - (100.0 / (1.0 + rs))
    }
}

/// Latest RSI value
pub fn calculate_rsi(bars: &[PriceBar], period: usize) -> IndicatorResult<f64> {
    InsufficientHistory::check("rsi", period + 1, bars.len())?;
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    rsi_series(&closes, period)
        .last()
        .copied()
        .flatten()
        .ok_or(InsufficientHistory {
            indicator: "rsi",
            required: period + 1,
            available: bars.len(),
        })
}
