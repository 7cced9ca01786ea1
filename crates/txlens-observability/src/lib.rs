//! # txlens-observability
//!
//! Structured logging for txlens.
//!
//! Logs go to stderr so that stdout stays free for command output.
//! Levels are configurable per component, and JSON output is available for
//! log shippers (ELK, Loki, CloudWatch).

pub mod tracing_setup;

pub use tracing_setup::{init_tracing, LogConfig};
