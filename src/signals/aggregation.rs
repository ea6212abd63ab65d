//! Weighted aggregation of pillar scores and the blackout override

use crate::indicators::math::round_to;
use crate::models::report::{EventRiskState, Pillars, Verdict, VerdictType};
use crate::signals::categories::ThresholdTable;
use crate::signals::{MAX_SCORE, MIN_SCORE};

pub struct Aggregator;

impl Aggregator {
    /// `round(Σ score × weight / 100, 1)`, always within [0, 10]
    pub fn final_score(pillars: &Pillars) -> f64 {
        let weighted: f64 = pillars
            .iter()
            .map(|(_, p)| p.score * p.weight / 100.0)
            .sum();
        round_to(weighted.clamp(MIN_SCORE, MAX_SCORE), 1)
    }

    /// Threshold verdict, unconditionally replaced by the earnings wait under blackout
    pub fn verdict(
        final_score: f64,
        event_risk: &EventRiskState,
        thresholds: &ThresholdTable,
    ) -> (Verdict, VerdictType) {
        if event_risk.blackout {
            return (Verdict::WaitEarnings, VerdictType::Warning);
        }
        thresholds.verdict(final_score)
    }
}
