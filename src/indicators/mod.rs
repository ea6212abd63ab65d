//! Technical indicators computed from daily price history.
//!
//! Everything here is a pure function of the bars passed in.

pub mod error;
pub mod math;
pub mod snapshot;

pub mod momentum;
pub mod structure;
pub mod trend;
pub mod volatility;

pub use error::{IndicatorResult, InsufficientHistory};
pub use momentum::*;
pub use snapshot::*;
pub use structure::*;
pub use trend::*;
pub use volatility::*;
