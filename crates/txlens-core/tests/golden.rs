//! Golden fixture integration tests.
//!
//! Each test replays recorded Blockscout API responses from
//! `fixtures/blockscout/` through the full pipeline and checks the report.

use alloy_primitives::U256;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use txlens_core::{
    ChainMap, DecodedEvent, ExplorerSource, Pipeline, RawInternalTx, RawTransaction,
    TokenMetadata, TxStatus, TxType,
};

// ─── Helpers ──────────────────────────────────────────────────────────────────

/// The fixtures live two levels above the crate root.
fn fixture_path(name: &str) -> std::path::PathBuf {
    let mut p = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    p.push("../../fixtures/blockscout");
    p.push(name);
    p
}

/// Load a fixture envelope and return its `result`, if the call succeeded.
fn fixture_result<T: DeserializeOwned>(name: &str) -> Option<T> {
    let text = std::fs::read_to_string(fixture_path(name))
        .unwrap_or_else(|e| panic!("fixture {name} not found: {e}"));
    let envelope: serde_json::Value = serde_json::from_str(&text).unwrap();
    if envelope["status"] != "1" {
        return None;
    }
    serde_json::from_value(envelope["result"].clone()).ok()
}

/// Replays one fixture file per endpoint.
struct FixtureSource {
    tx: &'static str,
    internal: &'static str,
    abi: &'static str,
    token: &'static str,
}

#[async_trait]
impl ExplorerSource for FixtureSource {
    async fn fetch_transaction(&self, _hash: &str) -> Option<RawTransaction> {
        fixture_result(self.tx)
    }

    async fn fetch_internal_transactions(&self, _hash: &str) -> Vec<RawInternalTx> {
        fixture_result(self.internal).unwrap_or_default()
    }

    async fn fetch_contract_abi(&self, _address: &str) -> Option<serde_json::Value> {
        let abi: String = fixture_result(self.abi)?;
        serde_json::from_str(&abi).ok()
    }

    async fn fetch_token_metadata(&self, _address: &str) -> Option<TokenMetadata> {
        fixture_result(self.token)
    }

    fn name(&self) -> &str {
        "fixtures"
    }
}

const HASH: &str = "0xd97e6cdbbc7bef4fc3193ad849b103dd23313b3bcf8b55d241c06748e262d50a";

fn erc20_source() -> FixtureSource {
    FixtureSource {
        tx: "gettxinfo-erc20-transfer.json",
        internal: "txlistinternal-empty.json",
        abi: "getabi-osusd.json",
        token: "gettoken-osusd.json",
    }
}

// ─── ERC-20 transfer across chains ────────────────────────────────────────────

#[tokio::test]
async fn erc20_transfer_golden() {
    let pipeline = Pipeline::new(erc20_source(), ChainMap::builtin());
    let tx = pipeline.run(HASH).await.expect("pipeline failed");

    assert_eq!(tx.hash, HASH);
    assert_eq!(tx.block_number, 9_501_234);
    assert_eq!(tx.readable_time.as_deref(), Some("2023-11-14 22:13:20 UTC"));
    assert_eq!(tx.status, TxStatus::Success);
    assert_eq!(tx.from_chain_id, "11155111");
    assert_eq!(tx.to_chain_id, "11155111");
    assert_eq!(tx.confirmations, Some(1200));
    assert_eq!(tx.revert_reason, None);

    // The topic-less log is dropped; the unknown one is kept.
    assert_eq!(tx.logs.len(), 3);
    assert_eq!(tx.logs[0].event_name, "Approval(address,address,uint256)");
    assert!(matches!(
        &tx.logs[0].decoded_event,
        Some(DecodedEvent::Approval { owner, spender, value })
            if owner == "0x1e31bebd0970b143279cb873c6005791f0802bdf"
            && spender == "0x8009fef9ba8bd6f87a09c4dccc85001e7875b0d7"
            && *value == U256::from(1_000_000_000_000u64)
    ));
    assert_eq!(tx.logs[2].event_name, "Unknown");
    assert!(tx.logs[2].decoded_event.is_none());

    // One transfer, rescaled with the token's 6 decimals.
    assert_eq!(tx.token_transfers.len(), 1);
    let t = &tx.token_transfers[0];
    assert_eq!(t.token_contract, "0xcac524bca292aaade2df8a05cc58f0a65b1b3bb9");
    assert_eq!(t.from_chain_id, "11155111");
    assert_eq!(t.to, "0xfad8f1035ed8d097d354bb29c9e4714b5fc4566d");
    assert_eq!(t.to_chain_id, "1101");
    assert_eq!(t.amount, U256::from(250_000_000u64));
    assert_eq!(t.amount_formatted, 250.0);
    assert_eq!(t.token_symbol.as_deref(), Some("OSUSD"));
    assert_eq!(t.token_decimals, Some(6));
    assert_eq!(t.log_index, 1);

    assert_eq!(tx.transaction_fee, U256::from(76_851_000_000_000u64));
    assert_eq!(tx.gas_price_gwei, 1.5);
    assert_eq!(tx.tx_type, TxType::TokenTransfer);
    assert!(tx.summary.is_multi_chain);
    assert_eq!(tx.summary.transfer_count, 1);
    assert_eq!(tx.summary.internal_tx_count, 0);
    assert_eq!(tx.summary.log_count, 3);

    let abi = tx.contract_abi.as_ref().expect("abi missing");
    assert_eq!(abi.as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn unverified_contract_and_internal_calls() {
    let source = FixtureSource {
        internal: "txlistinternal-one.json",
        abi: "getabi-unverified.json",
        ..erc20_source()
    };
    let tx = Pipeline::new(source, ChainMap::builtin()).run(HASH).await.unwrap();

    assert!(tx.contract_abi.is_none());
    assert_eq!(tx.internal_transactions.len(), 1);
    let itx = &tx.internal_transactions[0];
    assert_eq!(itx.call_type.as_deref(), Some("call"));
    assert_eq!(itx.value_eth, 0.01);
    assert_eq!(itx.to_chain_id, "1101");
    assert_eq!(itx.contract_address, None);
}

#[tokio::test]
async fn missing_transaction_golden() {
    let source = FixtureSource { tx: "gettxinfo-not-found.json", ..erc20_source() };
    let err = Pipeline::new(source, ChainMap::builtin()).run(HASH).await.unwrap_err();
    assert!(err.is_not_found());
    assert!(err.to_string().contains("fixtures"));
}

#[tokio::test]
async fn report_serializes_to_json() {
    let tx = Pipeline::new(erc20_source(), ChainMap::builtin()).run(HASH).await.unwrap();
    let json = serde_json::to_value(&tx).unwrap();
    assert_eq!(json["txType"], "Token Transfer");
    assert_eq!(json["fromChainId"], "11155111");
    assert_eq!(json["tokenTransfers"][0]["tokenName"], "Org Settlement USD");
    assert_eq!(json["tokenTransfers"][0]["amountFormatted"], 250.0);
    assert_eq!(json["logs"][1]["decodedEvent"]["event"], "Transfer");
    assert_eq!(json["summary"]["chainIds"], serde_json::json!(["1101", "11155111"]));
}
