//! MACD signal-line crossings

use serde::Serialize;

use crate::indicators::error::{IndicatorResult, InsufficientHistory};
use crate::models::indicators::MacdSeries;

pub const CROSS_LOOKBACK: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CrossKind {
    /// MACD crossed above its signal line
    Golden,
    /// MACD crossed below its signal line
    Death,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MacdCross {
    pub kind: CrossKind,
    /// 0 means the cross completed on the latest bar
    pub bars_ago: usize,
}

/// Most recent crossing within the trailing `lookback` bars, if any.
///
/// Earlier crossings in the window are ignored.
pub fn detect_macd_cross(series: &MacdSeries, lookback: usize) -> IndicatorResult<Option<MacdCross>> {
    let points = &series.points;
    let defined = points.iter().filter(|p| p.is_some()).count();
    InsufficientHistory::check("macd_cross", 2, defined)?;

    let last = points.len() - 1;
    let earliest = points.len().saturating_sub(lookback).max(1);

    for i in (earliest..=last).rev() {
        let (Some(today), Some(yesterday)) = (points[i], points[i - 1]) else {
            break;
        };
        let diff_today = today.macd - today.signal;
        let diff_yesterday = yesterday.macd - yesterday.signal;

        let kind = if diff_today > 0.0 && diff_yesterday <= 0.0 {
            Some(CrossKind::Golden)
        } else if diff_today < 0.0 && diff_yesterday >= 0.0 {
            Some(CrossKind::Death)
        } else {
            None
        };

        if let Some(kind) = kind {
            return Ok(Some(MacdCross {
                kind,
                bars_ago: last - i,
            }));
        }
    }

    Ok(None)
}
