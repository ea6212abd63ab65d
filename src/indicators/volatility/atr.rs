//! ATR (Average True Range)

use crate::indicators::error::{IndicatorResult, InsufficientHistory};
use crate::indicators::math;
use crate::models::market::PriceBar;

pub const ATR_PERIOD: usize = 14;

/// Mean true range over the trailing `period` bars.
///
/// The first bar has no previous close, so `period + 1` bars are needed.
pub fn calculate_atr(bars: &[PriceBar], period: usize) -> IndicatorResult<f64> {
    InsufficientHistory::check("atr", period + 1, bars.len())?;

    let tr_values: Vec<f64> = bars
        .windows(2)
        .map(|w| math::true_range(w[1].high, w[1].low, w[0].close))
        .collect();

    math::sma(&tr_values, period).ok_or(InsufficientHistory {
        indicator: "atr",
        required: period + 1,
        available: bars.len(),
    })
}

/// ATR(14)
pub fn calculate_atr_default(bars: &[PriceBar]) -> IndicatorResult<f64> {
    calculate_atr(bars, ATR_PERIOD)
}
