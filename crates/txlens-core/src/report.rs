//! The enhanced transaction report and its assembler.

use alloy_primitives::U256;
use chrono::DateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::chain::ChainMap;
use crate::classify::{classify, TxType, EMPTY_CALLDATA};
use crate::decoder::DecodedLog;
use crate::raw::{RawInternalTx, RawTransaction};
use crate::scalar::{self, u256_decimal, wei_to_ether, wei_to_gwei, Scalar};
use crate::transfer::TokenTransfer;

/// Execution status as reported by the explorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxStatus {
    Success,
    Failed,
    Unknown,
}

impl TxStatus {
    /// Blockscout `success` first, then Etherscan `isError`, then `txreceipt_status`.
    pub fn from_raw(raw: &RawTransaction) -> Self {
        if let Some(ok) = raw.success {
            return if ok { Self::Success } else { Self::Failed };
        }
        match raw.is_error.as_deref().map(str::trim) {
            Some("0") => return Self::Success,
            Some("1") => return Self::Failed,
            _ => {}
        }
        match raw.txreceipt_status.as_deref().map(str::trim) {
            Some("1") => Self::Success,
            Some("0") => Self::Failed,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for TxStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TxStatus::Success => write!(f, "success"),
            TxStatus::Failed => write!(f, "failed"),
            TxStatus::Unknown => write!(f, "unknown"),
        }
    }
}

/// A normalized internal (trace-level) transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalTransaction {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub from: Option<String>,
    pub from_chain_id: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub to: Option<String>,
    pub to_chain_id: String,
    #[serde(with = "u256_decimal")]
    pub value: U256,
    pub value_eth: f64,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none", default)]
    pub call_type: Option<String>,
    #[serde(with = "u256_decimal")]
    pub gas: U256,
    #[serde(with = "u256_decimal")]
    pub gas_used: U256,
    pub is_error: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub contract_address: Option<String>,
}

impl InternalTransaction {
    pub fn from_raw(raw: &RawInternalTx, chains: &ChainMap) -> Self {
        let from = non_empty(raw.from.as_deref());
        let to = non_empty(raw.to.as_deref());
        let value = scalar::to_integer(raw.value.as_deref()).value();
        Self {
            from_chain_id: chains.resolve(from.as_deref()),
            to_chain_id: chains.resolve(to.as_deref()),
            from,
            to,
            value,
            value_eth: wei_to_ether(value),
            call_type: non_empty(raw.call_type.as_deref()),
            gas: scalar::to_integer(raw.gas.as_deref()).value(),
            gas_used: scalar::to_integer(raw.gas_used.as_deref()).value(),
            is_error: raw.is_error.as_deref().map(str::trim) == Some("1"),
            contract_address: non_empty(raw.contract_address.as_deref()),
        }
    }
}

/// Headline statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// The transaction's own value in ether.
    pub total_eth_moved: f64,
    pub transfer_count: usize,
    pub internal_tx_count: usize,
    pub log_count: usize,
    /// `gasUsed × gasPrice` in ether.
    pub total_gas_cost_eth: f64,
    /// Distinct chain ids across token transfer endpoints.
    pub chain_ids: BTreeSet<String>,
    pub is_multi_chain: bool,
}

/// Distinct chain ids over every transfer's `from_chain_id` and `to_chain_id`.
pub fn transfer_chain_ids(transfers: &[TokenTransfer]) -> BTreeSet<String> {
    transfers
        .iter()
        .flat_map(|t| [t.from_chain_id.clone(), t.to_chain_id.clone()])
        .collect()
}

/// More than one distinct chain id, `"unknown"` included.
pub fn is_multi_chain(transfers: &[TokenTransfer]) -> bool {
    transfer_chain_ids(transfers).len() > 1
}

/// The full report for one transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhancedTransaction {
    pub hash: String,
    pub block_number: u64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub time_stamp: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub readable_time: Option<String>,
    pub from: Option<String>,
    pub from_chain_id: String,
    /// `None` for contract deployments.
    pub to: Option<String>,
    pub to_chain_id: String,
    pub nonce: u64,
    #[serde(with = "u256_decimal")]
    pub value: U256,
    pub value_eth: f64,
    #[serde(with = "u256_decimal")]
    pub gas_limit: U256,
    #[serde(with = "u256_decimal")]
    pub gas_used: U256,
    #[serde(with = "u256_decimal")]
    pub gas_price: U256,
    pub gas_price_gwei: f64,
    /// `gasUsed × gasPrice` in wei.
    #[serde(with = "u256_decimal")]
    pub transaction_fee: U256,
    pub transaction_fee_eth: f64,
    pub input: String,
    pub status: TxStatus,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub revert_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub confirmations: Option<u64>,
    pub logs: Vec<DecodedLog>,
    pub token_transfers: Vec<TokenTransfer>,
    pub internal_transactions: Vec<InternalTransaction>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub contract_abi: Option<serde_json::Value>,
    pub tx_type: TxType,
    pub summary: Summary,
}

impl EnhancedTransaction {
    pub fn is_multi_chain(&self) -> bool {
        self.summary.is_multi_chain
    }
}

/// Merges normalized fields, decoded logs, enriched transfers and fetched
/// extras into an [`EnhancedTransaction`].
#[derive(Debug, Clone, Copy)]
pub struct ReportAssembler<'a> {
    chains: &'a ChainMap,
}

impl<'a> ReportAssembler<'a> {
    pub fn new(chains: &'a ChainMap) -> Self {
        Self { chains }
    }

    pub fn assemble(
        &self,
        raw: &RawTransaction,
        logs: Vec<DecodedLog>,
        token_transfers: Vec<TokenTransfer>,
        internal: &[RawInternalTx],
        contract_abi: Option<serde_json::Value>,
    ) -> EnhancedTransaction {
        let value = integer_field("value", raw.value.as_deref());
        let gas_used = integer_field("gasUsed", raw.gas_used.as_deref());
        let gas_price = integer_field("gasPrice", raw.gas_price.as_deref());
        let transaction_fee = gas_used.saturating_mul(gas_price);

        let time_stamp = raw
            .time_stamp
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty() && t.chars().all(|c| c.is_ascii_digit()))
            .and_then(|t| t.parse::<u64>().ok());

        let from = non_empty(raw.from.as_deref());
        let to = non_empty(raw.to.as_deref());
        let input = non_empty(raw.input.as_deref()).unwrap_or_else(|| EMPTY_CALLDATA.to_string());

        let internal_transactions: Vec<InternalTransaction> = internal
            .iter()
            .map(|i| InternalTransaction::from_raw(i, self.chains))
            .collect();

        let mut tx = EnhancedTransaction {
            hash: raw.hash.clone().unwrap_or_default(),
            block_number: u64_field("blockNumber", raw.block_number.as_deref()),
            time_stamp,
            readable_time: time_stamp.and_then(readable_time),
            from_chain_id: self.chains.resolve(from.as_deref()),
            from,
            to_chain_id: self.chains.resolve(to.as_deref()),
            to,
            nonce: u64_field("nonce", raw.nonce.as_deref()),
            value,
            value_eth: wei_to_ether(value),
            gas_limit: integer_field("gasLimit", raw.gas_limit.as_deref()),
            gas_used,
            gas_price,
            gas_price_gwei: wei_to_gwei(gas_price),
            transaction_fee,
            transaction_fee_eth: wei_to_ether(transaction_fee),
            input,
            status: TxStatus::from_raw(raw),
            revert_reason: non_empty(raw.revert_reason.as_deref()),
            confirmations: scalar::to_u64(raw.confirmations.as_deref()).parsed(),
            logs,
            token_transfers,
            internal_transactions,
            contract_abi,
            tx_type: TxType::Unknown,
            summary: Summary::default(),
        };

        tx.tx_type = classify(&tx);
        tx.summary = Summary {
            total_eth_moved: tx.value_eth,
            transfer_count: tx.token_transfers.len(),
            internal_tx_count: tx.internal_transactions.len(),
            log_count: tx.logs.len(),
            total_gas_cost_eth: tx.transaction_fee_eth,
            chain_ids: transfer_chain_ids(&tx.token_transfers),
            is_multi_chain: is_multi_chain(&tx.token_transfers),
        };
        tx
    }
}

/// UTC rendering used in reports, e.g. `2023-11-14 22:13:20 UTC`.
pub fn readable_time(secs: u64) -> Option<String> {
    let secs = i64::try_from(secs).ok()?;
    DateTime::from_timestamp(secs, 0).map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
}

fn integer_field(field: &'static str, raw: Option<&str>) -> U256 {
    let parsed = scalar::to_integer(raw);
    log_default(field, &parsed);
    parsed.value()
}

fn u64_field(field: &'static str, raw: Option<&str>) -> u64 {
    let parsed = scalar::to_u64(raw);
    log_default(field, &parsed);
    parsed.value()
}

fn log_default<T: Copy>(field: &'static str, scalar: &Scalar<T>) {
    if let Some(reason) = scalar.default_reason() {
        tracing::debug!(field, %reason, "defaulted scalar field");
    }
}

fn non_empty(s: Option<&str>) -> Option<String> {
    s.map(str::trim).filter(|s| !s.is_empty()).map(str::to_string)
}
