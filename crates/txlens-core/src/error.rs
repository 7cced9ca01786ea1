//! Error types for the txlens pipeline.
//!
//! Only two things can go wrong in a way the caller sees: a log that cannot
//! be decoded at all, and a transaction the explorer does not know about.
//! Everything else degrades to a default value.

use thiserror::Error;

/// Errors that can occur while decoding a single log entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("log {log_index} has no topics")]
    NoTopics { log_index: u64 },
}

/// Fatal pipeline outcomes.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("transaction {hash} not found via {source_name}")]
    TransactionNotFound { hash: String, source_name: String },
}

impl PipelineError {
    /// Returns `true` if the primary transaction record was missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::TransactionNotFound { .. })
    }
}
