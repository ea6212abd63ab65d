//! Pillar weights and the versioned verdict threshold table

use crate::models::report::{PillarKind, Verdict, VerdictType};
use crate::models::staging::Direction;

/// Fixed pillar weights, in percent
pub struct PillarWeights;

impl PillarWeights {
    pub const CATALYSTS: f64 = 20.0;
    pub const TECHNICALS: f64 = 35.0;
    pub const VALUE: f64 = 15.0;
    pub const MACRO: f64 = 20.0;
    pub const EVENT_RISK: f64 = 10.0;

    pub fn get(kind: PillarKind) -> f64 {
        match kind {
            PillarKind::Catalysts => Self::CATALYSTS,
            PillarKind::Technicals => Self::TECHNICALS,
            PillarKind::Value => Self::VALUE,
            PillarKind::Macro => Self::MACRO,
            PillarKind::EventRisk => Self::EVENT_RISK,
        }
    }

    /// Weights sum to exactly 100
    pub fn verify() -> bool {
        let total: f64 = PillarKind::ALL.iter().map(|k| Self::get(*k)).sum();
        (total - 100.0).abs() < f64::EPSILON
    }
}

/// Score cutoffs for verdicts, scanner direction and trade-setup suppression
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdTable {
    pub version: &'static str,
    pub strong_buy: f64,
    pub buy: f64,
    pub hold: f64,
}

/// The one canonical table; bump `version` whenever a cutoff moves
pub const THRESHOLDS: ThresholdTable = ThresholdTable {
    version: "v2-5pillar",
    strong_buy: 8.5,
    buy: 6.5,
    hold: 5.0,
};

impl ThresholdTable {
    pub fn verdict(&self, final_score: f64) -> (Verdict, VerdictType) {
        if final_score >= self.strong_buy {
            (Verdict::StrongBuy, VerdictType::Success)
        } else if final_score >= self.buy {
            (Verdict::Buy, VerdictType::Info)
        } else if final_score >= self.hold {
            (Verdict::Hold, VerdictType::Warning)
        } else {
            (Verdict::Avoid, VerdictType::Danger)
        }
    }

    pub fn direction(&self, final_score: f64) -> Direction {
        if final_score >= self.strong_buy {
            Direction::StrongBullish
        } else if final_score >= self.buy {
            Direction::Bullish
        } else if final_score >= self.hold {
            Direction::Neutral
        } else {
            Direction::Bearish
        }
    }

    /// Trade setups are only offered at or above the buy cutoff
    pub fn allows_trade_setup(&self, final_score: f64) -> bool {
        final_score >= self.buy
    }
}
