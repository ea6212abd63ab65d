//! Trend indicators: simple moving averages of price and volume

pub mod sma;

pub use sma::*;
