use serde::Serialize;

/// An indicator was asked for more bars than the history holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("insufficient history for {indicator}: need {required} bars, have {available}")]
pub struct InsufficientHistory {
    pub indicator: &'static str,
    pub required: usize,
    pub available: usize,
}

impl InsufficientHistory {
    pub fn check(indicator: &'static str, required: usize, available: usize) -> Result<(), Self> {
        if available < required {
            Err(Self {
                indicator,
                required,
                available,
            })
        } else {
            Ok(())
        }
    }
}

pub type IndicatorResult<T> = Result<T, InsufficientHistory>;
