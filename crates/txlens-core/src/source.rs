//! The `ExplorerSource` trait — the four external fetches the pipeline needs.

use async_trait::async_trait;

use crate::raw::{RawInternalTx, RawTransaction, TokenMetadata};

/// A block-explorer backend.
///
/// Implementations swallow their own transport errors: a failed fetch is an
/// absent or empty result, never an `Err`. Only a missing transaction is
/// fatal, and that is decided by the pipeline.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` so a pipeline can be shared across
/// Tokio tasks.
#[async_trait]
pub trait ExplorerSource: Send + Sync {
    /// The primary transaction record, logs included.
    async fn fetch_transaction(&self, hash: &str) -> Option<RawTransaction>;

    /// Internal transactions; empty on any failure.
    async fn fetch_internal_transactions(&self, hash: &str) -> Vec<RawInternalTx>;

    /// Verified contract ABI as JSON.
    async fn fetch_contract_abi(&self, address: &str) -> Option<serde_json::Value>;

    /// ERC20 name / symbol / decimals.
    async fn fetch_token_metadata(&self, address: &str) -> Option<TokenMetadata>;

    /// Identifier used in logs and errors.
    fn name(&self) -> &str {
        "explorer"
    }
}
