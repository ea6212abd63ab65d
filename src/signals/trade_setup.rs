//! Entry, stop and target levels sized by ATR

use crate::error::{EngineError, EngineResult};
use crate::indicators::math::round_to;
use crate::models::market::PriceTarget;
use crate::models::report::{TargetBasis, TradeSetup};
use crate::signals::categories::ThresholdTable;

pub const STOP_ATR_MULTIPLE: f64 = 2.0;
pub const TARGET_ATR_MULTIPLE: f64 = 3.0;

/// Inputs the calculator needs from one evaluation
#[derive(Debug, Clone, Copy)]
pub struct SetupInputs<'a> {
    pub current_price: f64,
    pub atr: Option<f64>,
    pub final_score: f64,
    pub blackout: bool,
    pub price_target: Option<&'a PriceTarget>,
}

/// `Ok(None)` when the setup is suppressed: below the buy threshold, under
/// blackout, without an ATR, or when the ATR stop would not be a positive
/// price. Non-finite levels are an internal error.
pub fn calculate_trade_setup(
    inputs: &SetupInputs<'_>,
    thresholds: &ThresholdTable,
) -> EngineResult<Option<TradeSetup>> {
    if inputs.blackout || !thresholds.allows_trade_setup(inputs.final_score) {
        return Ok(None);
    }
    let Some(atr) = inputs.atr else {
        return Ok(None);
    };

    let entry = inputs.current_price;
    let stop = entry - STOP_ATR_MULTIPLE * atr;
    let (target, target_basis) = match inputs.price_target.map(|t| t.mean) {
        Some(mean) if mean.is_finite() && mean > entry => (mean, TargetBasis::AnalystTarget),
        _ => (entry + TARGET_ATR_MULTIPLE * atr, TargetBasis::Atr),
    };

    if !(entry.is_finite() && stop.is_finite() && target.is_finite()) {
        return Err(EngineError::internal(format!(
            "non-finite trade levels: entry={entry}, stop={stop}, target={target}"
        )));
    }

    if stop <= 0.0 {
        return Ok(None);
    }

    let risk_reward = if entry > stop {
        let ratio = (target - entry) / (entry - stop);
        if !ratio.is_finite() {
            return Err(EngineError::internal("risk/reward is not finite"));
        }
        Some(round_to(ratio, 2))
    } else {
        None
    };

    Ok(Some(TradeSetup {
        entry: round_to(entry, 2),
        stop: round_to(stop, 2),
        target: round_to(target, 2),
        risk_reward,
        atr: round_to(atr, 2),
        target_basis,
    }))
}
