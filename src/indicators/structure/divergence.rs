//! RSI divergence over a trailing swing window

use serde::Serialize;

use crate::indicators::error::{IndicatorResult, InsufficientHistory};

pub const DIVERGENCE_LOOKBACK: usize = 30;
/// Bars on each side a swing point must dominate
pub const SWING_ORDER: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RsiDivergence {
    /// Price lower low, RSI higher low
    Bullish,
    /// Price higher high, RSI lower high
    Bearish,
    None,
}

/// Indices that are `<=` (lows) or `>=` (highs) every neighbour within `order` bars.
/// Neighbourhoods are clipped at the window edges.
pub fn swing_points(values: &[f64], order: usize, lows: bool) -> Vec<usize> {
    let n = values.len();
    (0..n)
        .filter(|&i| {
            let from = i.saturating_sub(order);
            let to = (i + order).min(n - 1);
            (from..=to).filter(|&j| j != i).all(|j| {
                if lows {
                    values[i] <= values[j]
                } else {
                    values[i] >= values[j]
                }
            })
        })
        .collect()
}

/// Compare the two most recent price swing points with RSI at the same bars.
///
/// `closes` and `rsi` are aligned per bar; only the trailing `lookback` bars
/// are inspected and every RSI value in that window must be defined.
pub fn detect_rsi_divergence(
    closes: &[f64],
    rsi: &[Option<f64>],
    lookback: usize,
    order: usize,
) -> IndicatorResult<RsiDivergence> {
    let available = closes.len().min(rsi.len());
    let defined_rsi = rsi.iter().filter(|v| v.is_some()).count();
    InsufficientHistory::check("rsi_divergence", lookback, defined_rsi.min(available))?;

    let prices = &closes[closes.len() - lookback..];
    let rsi_window: Vec<f64> = rsi[rsi.len() - lookback..]
        .iter()
        .map(|v| v.unwrap_or(50.0))
        .collect();

    let lows = swing_points(prices, order, true);
    if let [.., prev, last] = lows[..] {
        if prices[last] < prices[prev] && rsi_window[last] > rsi_window[prev] {
            return Ok(RsiDivergence::Bullish);
        }
    }

    let highs = swing_points(prices, order, false);
    if let [.., prev, last] = highs[..] {
        if prices[last] > prices[prev] && rsi_window[last] < rsi_window[prev] {
            return Ok(RsiDivergence::Bearish);
        }
    }

    Ok(RsiDivergence::None)
}
