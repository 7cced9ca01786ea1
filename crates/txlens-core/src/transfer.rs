//! ERC20 token transfers derived from decoded `Transfer` logs.

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

use crate::chain::ChainMap;
use crate::decoder::{DecodedEvent, DecodedLog};
use crate::scalar::{scale_down, u256_decimal};

/// Decimals assumed until token metadata says otherwise.
pub const PROVISIONAL_DECIMALS: u8 = 18;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenStandard {
    #[serde(rename = "ERC20")]
    Erc20,
}

/// One token movement, with both endpoints resolved to chain ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenTransfer {
    #[serde(rename = "type")]
    pub standard: TokenStandard,
    pub token_contract: String,
    pub from: String,
    pub from_chain_id: String,
    pub to: String,
    pub to_chain_id: String,
    /// Smallest unit.
    #[serde(with = "u256_decimal")]
    pub amount: U256,
    /// `amount / 10^decimals()`.
    pub amount_formatted: f64,
    pub log_index: u64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub token_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub token_symbol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub token_decimals: Option<u8>,
}

impl TokenTransfer {
    /// Build a provisional transfer from a decoded `Transfer` log.
    /// Returns `None` for any other log, including malformed transfers.
    pub fn from_log(log: &DecodedLog, chains: &ChainMap) -> Option<Self> {
        let Some(DecodedEvent::Transfer { from, to, value }) = &log.decoded_event else {
            return None;
        };
        Some(Self {
            standard: TokenStandard::Erc20,
            token_contract: log.address.to_lowercase(),
            from: from.clone(),
            from_chain_id: chains.resolve(Some(from)),
            to: to.clone(),
            to_chain_id: chains.resolve(Some(to)),
            amount: *value,
            amount_formatted: scale_down(*value, PROVISIONAL_DECIMALS),
            log_index: log.log_index,
            token_name: None,
            token_symbol: None,
            token_decimals: None,
        })
    }

    /// Collect transfers from a decoded log list, preserving log order.
    pub fn collect(logs: &[DecodedLog], chains: &ChainMap) -> Vec<Self> {
        logs.iter()
            .filter_map(|log| Self::from_log(log, chains))
            .collect()
    }

    /// Effective decimals: metadata if enriched, otherwise 18.
    pub fn decimals(&self) -> u8 {
        self.token_decimals.unwrap_or(PROVISIONAL_DECIMALS)
    }

    /// Set decimals and recompute `amount_formatted`.
    pub fn rescale(&mut self, decimals: u8) {
        self.token_decimals = Some(decimals);
        self.amount_formatted = scale_down(self.amount, decimals);
    }

    /// `true` once metadata has been applied.
    pub fn is_enriched(&self) -> bool {
        self.token_name.is_some() || self.token_symbol.is_some() || self.token_decimals.is_some()
    }
}
