//! SMA (Simple Moving Average) of closes and of volume

use crate::indicators::error::{IndicatorResult, InsufficientHistory};
use crate::indicators::math;
use crate::models::market::PriceBar;

pub const SMA_SHORT: usize = 50;
pub const SMA_LONG: usize = 200;
pub const VOLUME_SMA_PERIOD: usize = 20;

/// Latest SMA of closes
pub fn calculate_sma(bars: &[PriceBar], period: usize) -> IndicatorResult<f64> {
    let indicator = match period {
        SMA_SHORT => "sma50",
        SMA_LONG => "sma200",
        _ => "sma",
    };
    InsufficientHistory::check(indicator, period.max(1), bars.len())?;
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    math::sma(&closes, period).ok_or(InsufficientHistory {
        indicator,
        required: period,
        available: bars.len(),
    })
}

/// Latest 20-day average volume
pub fn calculate_volume_sma(bars: &[PriceBar], period: usize) -> IndicatorResult<f64> {
    InsufficientHistory::check("volume_sma", period.max(1), bars.len())?;
    let volumes: Vec<f64> = bars.iter().map(|b| b.volume).collect();
    math::sma(&volumes, period).ok_or(InsufficientHistory {
        indicator: "volume_sma",
        required: period,
        available: bars.len(),
    })
}

/// Classic trend alignment: price above the short average above the long one
pub fn trend_aligned(close: f64, short: f64, long: f64) -> i32 {
    if close > short && short > long {
        1
    } else if close < short && short < long {
        -1
    } else {
        0
    }
}
