use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

const MAX_TICKER_LEN: usize = 10;

/// A validated, upper-cased ticker symbol.
///
/// Accepts letters, digits, `.` and `-`, must start with a letter and be at
/// most ten characters long (`BRK.B`, `RDS-A`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Ticker(String);

impl Ticker {
    pub fn parse(raw: &str) -> Result<Self, EngineError> {
        let symbol = raw.trim().to_uppercase();
        let invalid = |reason: &str| EngineError::InvalidInput {
            ticker: raw.to_string(),
            reason: reason.to_string(),
        };

        if symbol.is_empty() {
            return Err(invalid("ticker is empty"));
        }
        if symbol.len() > MAX_TICKER_LEN {
            return Err(invalid("ticker is longer than 10 characters"));
        }
        if !symbol.starts_with(|c: char| c.is_ascii_alphabetic()) {
            return Err(invalid("ticker must start with a letter"));
        }
        if !symbol
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
        {
            return Err(invalid("ticker may only contain letters, digits, '.' and '-'"));
        }

        Ok(Self(symbol))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Ticker {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Ticker {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Ticker> for String {
    fn from(ticker: Ticker) -> Self {
        ticker.0
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
