//! Market structure: swing divergences, signal-line crosses, support and 52-week high

pub mod crossover;
pub mod divergence;
pub mod support_resistance;

pub use crossover::*;
pub use divergence::*;
pub use support_resistance::*;
