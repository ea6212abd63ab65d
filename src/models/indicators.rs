use serde::{Deserialize, Serialize};

use crate::indicators::{IndicatorResult, MacdCross, RsiDivergence};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacdPoint {
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
}

/// Per-bar MACD values aligned with the input bars; `None` during warm-up
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MacdSeries {
    pub points: Vec<Option<MacdPoint>>,
}

impl MacdSeries {
    pub fn latest(&self) -> Option<MacdPoint> {
        self.points.last().copied().flatten()
    }
}

/// Latest indicator values for one price history.
///
/// Every field that needs warm-up is an `IndicatorResult` so that short
/// histories are visible to the scorers instead of reading as zero.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSnapshot {
    pub close: f64,
    pub open: f64,
    pub volume: f64,
    pub sma50: IndicatorResult<f64>,
    pub sma200: IndicatorResult<f64>,
    pub volume_sma20: IndicatorResult<f64>,
    pub high_52w: IndicatorResult<f64>,
    pub rsi14: IndicatorResult<f64>,
    pub macd: IndicatorResult<MacdPoint>,
    pub atr14: IndicatorResult<f64>,
    pub divergence: IndicatorResult<RsiDivergence>,
    pub macd_cross: IndicatorResult<Option<MacdCross>>,
    /// Lowest low of the trailing 20 bars
    pub support_20: f64,
}

impl IndicatorSnapshot {
    /// Today's volume above its 20-day average on a green candle
    pub fn volume_confirmed(&self) -> Option<bool> {
        let avg = self.volume_sma20.as_ref().ok()?;
        Some(self.volume > *avg && self.close > self.open)
    }
}
