//! discjob Common Utilities
//!
//! Shared infrastructure for all discjob crates:
//! - Error types and result aliases
//! - Wall-clock stamps and elapsed-time formatting for job runs
//! - Tracing/logging initialization
//! - Configuration loading

pub mod config;
pub mod error;
pub mod logging;
pub mod timing;

pub use config::*;
pub use error::*;
pub use timing::*;
