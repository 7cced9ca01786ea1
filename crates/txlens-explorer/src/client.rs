//! `BlockscoutClient` — an [`ExplorerSource`] backed by an Etherscan-compatible API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use txlens_core::{ExplorerSource, RawInternalTx, RawTransaction, TokenMetadata};

use crate::envelope::{parse_abi, parse_envelope};
use crate::error::ExplorerError;

pub const DEFAULT_BASE_URL: &str = "https://grenchain-ethglobal.cloud.blockscout.com/api";

fn default_base_url() -> String {
    DEFAULT_BASE_URL.into()
}

fn default_timeout_secs() -> u64 {
    30
}

/// Explorer endpoint settings. Deserializable from the `explorer:` config block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplorerConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ExplorerConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// HTTP client for one explorer instance.
///
/// # Thread Safety
/// `reqwest::Client` is internally reference counted, so a `BlockscoutClient`
/// can be shared across tasks.
pub struct BlockscoutClient {
    client: Client,
    config: ExplorerConfig,
}

impl BlockscoutClient {
    pub fn new(config: ExplorerConfig) -> Result<Self, ExplorerError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("txlens/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }

    /// `?module=transaction&action=gettxinfo&txhash=...`
    pub async fn get_transaction(&self, hash: &str) -> Result<RawTransaction, ExplorerError> {
        self.call("transaction", "gettxinfo", &[("txhash", hash)]).await
    }

    /// `?module=account&action=txlistinternal&txhash=...`
    pub async fn get_internal_transactions(
        &self,
        hash: &str,
    ) -> Result<Vec<RawInternalTx>, ExplorerError> {
        self.call("account", "txlistinternal", &[("txhash", hash)]).await
    }

    /// `?module=contract&action=getabi&address=...`, validated as a JSON ABI.
    pub async fn get_contract_abi(&self, address: &str) -> Result<Value, ExplorerError> {
        let result: Value = self.call("contract", "getabi", &[("address", address)]).await?;
        parse_abi(result)
    }

    /// `?module=token&action=getToken&contractaddress=...`
    pub async fn get_token(&self, address: &str) -> Result<TokenMetadata, ExplorerError> {
        self.call("token", "getToken", &[("contractaddress", address)]).await
    }

    async fn call<T: DeserializeOwned>(
        &self,
        module: &str,
        action: &str,
        params: &[(&str, &str)],
    ) -> Result<T, ExplorerError> {
        let mut query: Vec<(&str, &str)> = vec![("module", module), ("action", action)];
        query.extend_from_slice(params);
        if let Some(key) = self.config.api_key.as_deref() {
            query.push(("apikey", key));
        }

        tracing::debug!(module, action, base_url = %self.config.base_url, "explorer request");
        let resp = self
            .client
            .get(&self.config.base_url)
            .query(&query)
            .send()
            .await?;

        let status = resp.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(ExplorerError::RateLimited {
                url: self.config.base_url.clone(),
            });
        }
        if !status.is_success() {
            return Err(ExplorerError::Status {
                code: status.as_u16(),
                url: self.config.base_url.clone(),
            });
        }

        let body: Value = resp.json().await?;
        parse_envelope(body)
    }
}

/// Turn a fetch result into an optional value, logging the failure.
fn degrade<T>(what: &str, target: &str, result: Result<T, ExplorerError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) if e.is_empty_result() => {
            tracing::debug!(target_id = target, "no {what}: {e}");
            None
        }
        Err(e) => {
            tracing::warn!(target_id = target, "failed to fetch {what}: {e}");
            None
        }
    }
}

#[async_trait]
impl ExplorerSource for BlockscoutClient {
    async fn fetch_transaction(&self, hash: &str) -> Option<RawTransaction> {
        degrade("transaction", hash, self.get_transaction(hash).await)
    }

    async fn fetch_internal_transactions(&self, hash: &str) -> Vec<RawInternalTx> {
        degrade(
            "internal transactions",
            hash,
            self.get_internal_transactions(hash).await,
        )
        .unwrap_or_default()
    }

    async fn fetch_contract_abi(&self, address: &str) -> Option<Value> {
        degrade("contract ABI", address, self.get_contract_abi(address).await)
    }

    async fn fetch_token_metadata(&self, address: &str) -> Option<TokenMetadata> {
        degrade("token metadata", address, self.get_token(address).await)
    }

    fn name(&self) -> &str {
        &self.config.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let cfg: ExplorerConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, ExplorerConfig::default());
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.timeout(), Duration::from_secs(30));
        assert!(cfg.api_key.is_none());
    }

    #[test]
    fn config_builder() {
        let cfg = ExplorerConfig::new("https://eth.blockscout.com/api").with_api_key("k");
        assert_eq!(cfg.api_key.as_deref(), Some("k"));
        assert_eq!(cfg.timeout_secs, 30);
    }

    #[test]
    fn client_named_after_base_url() {
        let client = BlockscoutClient::new(ExplorerConfig::new("http://localhost:4000/api")).unwrap();
        assert_eq!(client.name(), "http://localhost:4000/api");
    }

    #[test]
    fn degrade_maps_errors_to_none() {
        assert_eq!(degrade("x", "t", Ok::<_, ExplorerError>(3)), Some(3));
        let empty = ExplorerError::NoResults { message: "No token found".into() };
        assert_eq!(degrade::<u8>("x", "t", Err(empty)), None);
        let api = ExplorerError::Api { message: "boom".into() };
        assert_eq!(degrade::<u8>("x", "t", Err(api)), None);
    }

    #[tokio::test]
    async fn unreachable_explorer_degrades() {
        let client = BlockscoutClient::new(ExplorerConfig {
            base_url: "http://127.0.0.1:9/api".into(),
            api_key: None,
            timeout_secs: 2,
        })
        .unwrap();
        assert!(client.fetch_transaction("0xabc").await.is_none());
        assert!(client.fetch_internal_transactions("0xabc").await.is_empty());
    }
}
