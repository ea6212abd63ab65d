//! TickerGrade decision engine.
//!
//! Turns price, fundamental, macro and options data for a single ticker into
//! a bounded 0-10 confidence score, a verdict and a conditional trade setup.

pub mod config;
pub mod core;
pub mod error;
pub mod indicators;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
pub mod signals;
pub mod store;

pub use error::{EngineError, EngineResult};
