//! Explorer transport errors. These never cross the `ExplorerSource` boundary.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExplorerError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Rate limited by {url}")]
    RateLimited { url: String },

    #[error("HTTP {code} from {url}")]
    Status { code: u16, url: String },

    #[error("Explorer API error: {message}")]
    Api { message: String },

    /// The explorer answered but had nothing for this query.
    #[error("No results: {message}")]
    NoResults { message: String },

    #[error("Unexpected response shape: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid ABI JSON: {reason}")]
    InvalidAbi { reason: String },
}

impl ExplorerError {
    /// `true` for answers that simply mean "nothing here" rather than a fault.
    pub fn is_empty_result(&self) -> bool {
        matches!(self, Self::NoResults { .. })
    }
}
