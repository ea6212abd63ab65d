//! Pillar scoring, aggregation and trade setup.
//!
//! Every function here is pure: the same inputs and as-of date always
//! produce the same pillar results.

pub mod aggregation;
pub mod catalysts;
pub mod categories;
pub mod engine;
pub mod event_risk;
pub mod macro_liquidity;
pub mod sentiment;
pub mod technical;
pub mod trade_setup;
pub mod value;

pub use aggregation::*;
pub use catalysts::score_catalysts;
pub use categories::*;
pub use engine::*;
pub use event_risk::score_event_risk;
pub use macro_liquidity::{
    net_liquidity_report, net_liquidity_series, score_macro, NetLiquidityPoint, NetLiquidityReport,
    NetLiquidityRow,
};
pub use technical::score_technicals;
pub use trade_setup::calculate_trade_setup;
pub use value::score_value;

use crate::indicators::math::round_to;
use crate::models::report::{PillarDetails, PillarKind, PillarResult};

/// Base score every pillar starts from and falls back to when degraded
pub const NEUTRAL_SCORE: f64 = 5.0;

pub const MIN_SCORE: f64 = 0.0;
pub const MAX_SCORE: f64 = 10.0;

/// Clamp to [0, 10], round to one decimal and attach the fixed weight
pub fn build_pillar(kind: PillarKind, score: f64, details: PillarDetails) -> PillarResult {
    let score = if score.is_finite() {
        round_to(score.clamp(MIN_SCORE, MAX_SCORE), 1)
    } else {
        NEUTRAL_SCORE
    };
    PillarResult {
        score,
        weight: PillarWeights::get(kind),
        name: kind.display_name().to_string(),
        details,
    }
}
