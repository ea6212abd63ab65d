//! One-pass indicator computation for a price history

use crate::indicators::error::{IndicatorResult, InsufficientHistory};
use crate::indicators::math::{self, round_to};
use crate::indicators::momentum::{
    macd_series, rsi_series, MACD_FAST, MACD_SIGNAL, MACD_SLOW, RSI_PERIOD,
};
use crate::indicators::structure::{
    calculate_52_week_high, detect_macd_cross, detect_rsi_divergence, recent_support,
    CROSS_LOOKBACK, DIVERGENCE_LOOKBACK, SUPPORT_LOOKBACK, SWING_ORDER,
};
use crate::indicators::trend::{calculate_sma, calculate_volume_sma, SMA_LONG, SMA_SHORT, VOLUME_SMA_PERIOD};
use crate::indicators::volatility::calculate_atr_default;
use crate::models::indicators::{IndicatorSnapshot, MacdPoint};
use crate::models::market::PriceBar;
use crate::models::report::PricePoint;

/// Latest values of every indicator the scorers consume.
///
/// Fails only when there are no bars at all; short histories surface as
/// `InsufficientHistory` on the individual fields.
pub fn compute_snapshot(bars: &[PriceBar]) -> IndicatorResult<IndicatorSnapshot> {
    let last = bars.last().ok_or(InsufficientHistory {
        indicator: "price_history",
        required: 1,
        available: 0,
    })?;

    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    let rsi = rsi_series(&closes, RSI_PERIOD);
    let macd = macd_series(&closes, MACD_FAST, MACD_SLOW, MACD_SIGNAL);

    let rsi14 = rsi.last().copied().flatten().ok_or(InsufficientHistory {
        indicator: "rsi",
        required: RSI_PERIOD + 1,
        available: bars.len(),
    });
    let macd_latest: IndicatorResult<MacdPoint> = macd.latest().ok_or(InsufficientHistory {
        indicator: "macd",
        required: MACD_SLOW + MACD_SIGNAL - 1,
        available: bars.len(),
    });

    Ok(IndicatorSnapshot {
        close: last.close,
        open: last.open,
        volume: last.volume,
        sma50: calculate_sma(bars, SMA_SHORT),
        sma200: calculate_sma(bars, SMA_LONG),
        volume_sma20: calculate_volume_sma(bars, VOLUME_SMA_PERIOD),
        high_52w: calculate_52_week_high(bars),
        rsi14,
        macd: macd_latest,
        atr14: calculate_atr_default(bars),
        divergence: detect_rsi_divergence(&closes, &rsi, DIVERGENCE_LOOKBACK, SWING_ORDER),
        macd_cross: detect_macd_cross(&macd, CROSS_LOOKBACK),
        support_20: recent_support(bars, SUPPORT_LOOKBACK).unwrap_or(last.low),
    })
}

/// Per-bar chart rows with indicator overlays, rounded for display
pub fn chart_series(bars: &[PriceBar]) -> Vec<PricePoint> {
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    let volumes: Vec<f64> = bars.iter().map(|b| b.volume).collect();

    let rsi = rsi_series(&closes, RSI_PERIOD);
    let macd = macd_series(&closes, MACD_FAST, MACD_SLOW, MACD_SIGNAL);
    let volume_sma = math::sma_series(&volumes, VOLUME_SMA_PERIOD);
    let sma50 = math::sma_series(&closes, SMA_SHORT);
    let sma200 = math::sma_series(&closes, SMA_LONG);

    bars.iter()
        .enumerate()
        .map(|(i, bar)| {
            let point = macd.points[i];
            PricePoint {
                date: bar.date,
                price: round_to(bar.close, 2),
                open: round_to(bar.open, 2),
                high: round_to(bar.high, 2),
                low: round_to(bar.low, 2),
                volume: bar.volume.round(),
                rsi: rsi[i].map(|v| round_to(v, 2)),
                macd: point.map(|p| round_to(p.macd, 4)),
                macd_signal: point.map(|p| round_to(p.signal, 4)),
                histogram: point.map(|p| round_to(p.histogram, 4)),
                volume_sma: volume_sma[i].map(|v| v.round()),
                sma50: sma50[i].map(|v| round_to(v, 2)),
                sma200: sma200[i].map(|v| round_to(v, 2)),
            }
        })
        .collect()
}
