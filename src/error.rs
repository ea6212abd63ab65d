//! Engine-level error taxonomy.

use std::time::Duration;

use crate::indicators::InsufficientHistory;
use crate::store::StoreError;

pub type EngineResult<T> = Result<T, EngineError>;

/// Failures that surface to the caller of a single-ticker evaluation.
///
/// Non-critical provider failures never appear here: they are absorbed into
/// the affected pillar and flagged as `degraded`.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("invalid ticker {ticker:?}: {reason}")]
    InvalidInput { ticker: String, reason: String },

    #[error("ticker {ticker} not found")]
    TickerNotFound { ticker: String },

    #[error("price data unavailable for {ticker}: {reason}")]
    DataUnavailable { ticker: String, reason: String },

    #[error("analysis of {ticker} exceeded the {}s deadline", .after.as_secs())]
    DeadlineExceeded { ticker: String, after: Duration },

    #[error(transparent)]
    InsufficientHistory(#[from] InsufficientHistory),

    #[error("internal computation error: {reason}")]
    InternalComputation { reason: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl EngineError {
    pub fn internal(reason: impl Into<String>) -> Self {
        Self::InternalComputation {
            reason: reason.into(),
        }
    }
}
