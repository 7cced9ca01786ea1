//! Transaction classification as an ordered rule list.
//!
//! Rules are evaluated top to bottom and the first match wins, so a
//! transaction that moves both ETH and tokens is a "Token Transfer": the ETH
//! rule only applies when there are no token transfers.

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::report::EnhancedTransaction;

/// Calldata of a plain value transfer.
pub const EMPTY_CALLDATA: &str = "0x";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TxType {
    #[serde(rename = "Contract Deployment")]
    ContractDeployment,
    #[serde(rename = "ETH Transfer")]
    EthTransfer,
    #[serde(rename = "Token Transfer")]
    TokenTransfer,
    #[serde(rename = "Contract Interaction")]
    ContractInteraction,
    Unknown,
}

impl TxType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxType::ContractDeployment => "Contract Deployment",
            TxType::EthTransfer => "ETH Transfer",
            TxType::TokenTransfer => "Token Transfer",
            TxType::ContractInteraction => "Contract Interaction",
            TxType::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for TxType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The fields classification looks at.
#[derive(Debug, Clone, Copy)]
pub struct TxShape<'a> {
    pub to: Option<&'a str>,
    pub value: U256,
    pub input: &'a str,
    pub token_transfers: usize,
}

impl<'a> From<&'a EnhancedTransaction> for TxShape<'a> {
    fn from(tx: &'a EnhancedTransaction) -> Self {
        Self {
            to: tx.to.as_deref(),
            value: tx.value,
            input: &tx.input,
            token_transfers: tx.token_transfers.len(),
        }
    }
}

type Rule = (fn(&TxShape<'_>) -> bool, TxType);

/// Priority order. Do not reorder.
pub const RULES: &[Rule] = &[
    (is_deployment, TxType::ContractDeployment),
    (is_eth_transfer, TxType::EthTransfer),
    (has_token_transfers, TxType::TokenTransfer),
    (has_calldata, TxType::ContractInteraction),
];

fn is_deployment(tx: &TxShape<'_>) -> bool {
    tx.to.map_or(true, str::is_empty)
}

fn is_eth_transfer(tx: &TxShape<'_>) -> bool {
    tx.value > U256::ZERO && tx.token_transfers == 0
}

fn has_token_transfers(tx: &TxShape<'_>) -> bool {
    tx.token_transfers > 0
}

fn has_calldata(tx: &TxShape<'_>) -> bool {
    tx.input != EMPTY_CALLDATA
}

/// First matching rule, or `Unknown`.
pub fn classify_shape(shape: &TxShape<'_>) -> TxType {
    RULES
        .iter()
        .find(|(applies, _)| applies(shape))
        .map_or(TxType::Unknown, |(_, outcome)| *outcome)
}

pub fn classify(tx: &EnhancedTransaction) -> TxType {
    classify_shape(&TxShape::from(tx))
}
