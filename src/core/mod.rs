//! Request orchestration, batch scans, scheduling and the HTTP surface

pub mod analyzer;
pub mod http;
pub mod scanner;
pub mod scheduler;

pub use analyzer::*;
pub use http::*;
pub use scanner::*;
pub use scheduler::*;
