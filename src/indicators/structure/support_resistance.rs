//! Nearby support and the 52-week high

use crate::indicators::error::{IndicatorResult, InsufficientHistory};
use crate::models::market::PriceBar;

pub const SUPPORT_LOOKBACK: usize = 20;
pub const TRADING_DAYS_PER_YEAR: usize = 252;

/// Lowest low over the trailing `lookback` bars (or all bars when fewer)
pub fn recent_support(bars: &[PriceBar], lookback: usize) -> Option<f64> {
    let start = bars.len().saturating_sub(lookback);
    bars[start..].iter().map(|b| b.low).reduce(f64::min)
}

/// Highest high over the trailing year of trading days
pub fn calculate_52_week_high(bars: &[PriceBar]) -> IndicatorResult<f64> {
    InsufficientHistory::check("high_52w", TRADING_DAYS_PER_YEAR, bars.len())?;
    bars[bars.len() - TRADING_DAYS_PER_YEAR..]
        .iter()
        .map(|b| b.high)
        .reduce(f64::max)
        .ok_or(InsufficientHistory {
            indicator: "high_52w",
            required: TRADING_DAYS_PER_YEAR,
            available: bars.len(),
        })
}
