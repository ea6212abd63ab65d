//! Durable scanner outputs: staged candidates and published trade ideas

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Directional bucket derived from a final score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    #[serde(rename = "Strong Bullish")]
    StrongBullish,
    Bullish,
    Neutral,
    Bearish,
}

impl Direction {
    pub fn is_bullish(&self) -> bool {
        matches!(self, Direction::StrongBullish | Direction::Bullish)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Direction::StrongBullish => "Strong Bullish",
            Direction::Bullish => "Bullish",
            Direction::Neutral => "Neutral",
            Direction::Bearish => "Bearish",
        }
    }
}

/// Unreviewed scanner output, one per ticker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StagingCandidate {
    pub id: u64,
    pub ticker: String,
    pub score: f64,
    pub direction: Direction,
    pub scanned_at: DateTime<Utc>,
}

/// A curated idea published from a staging candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeIdea {
    pub id: u64,
    pub ticker: String,
    pub direction: Direction,
    pub thesis: String,
    pub admin_comment: String,
    pub timestamp: DateTime<Utc>,
    pub active: bool,
}
