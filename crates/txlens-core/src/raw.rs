//! Wire types: what a Blockscout/Etherscan-style explorer hands back.
//!
//! Every numeric field is kept as the string the explorer sent (numbers and
//! booleans are stringified on the way in) so the scalar normalizer decides
//! how to read it.

use serde::{Deserialize, Deserializer, Serialize};

/// `module=transaction&action=gettxinfo` result.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTransaction {
    #[serde(default, deserialize_with = "lenient_string")]
    pub hash: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub block_number: Option<String>,
    #[serde(default, rename = "timeStamp", deserialize_with = "lenient_string")]
    pub time_stamp: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub from: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub to: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub value: Option<String>,
    #[serde(default, alias = "gas", deserialize_with = "lenient_string")]
    pub gas_limit: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub gas_used: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub gas_price: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub nonce: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub input: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub confirmations: Option<String>,
    /// Blockscout reports execution status as a boolean.
    #[serde(default)]
    pub success: Option<bool>,
    /// Etherscan-style status: `"0"` ok, `"1"` reverted.
    #[serde(default, deserialize_with = "lenient_string")]
    pub is_error: Option<String>,
    /// Etherscan-style receipt status: `"1"` ok, `"0"` reverted.
    #[serde(default, rename = "txreceipt_status", deserialize_with = "lenient_string")]
    pub txreceipt_status: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub revert_reason: Option<String>,
    #[serde(default)]
    pub logs: Vec<RawLog>,
}

/// One event log as returned inside `gettxinfo`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLog {
    #[serde(default)]
    pub address: String,
    /// Blockscout pads unused topic slots with `null`; those are dropped here.
    #[serde(default, deserialize_with = "present_topics")]
    pub topics: Vec<String>,
    #[serde(default = "empty_data")]
    pub data: String,
    #[serde(default, alias = "index", deserialize_with = "lenient_string")]
    pub log_index: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub block_number: Option<String>,
}

/// `module=account&action=txlistinternal` entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawInternalTx {
    #[serde(default, deserialize_with = "lenient_string")]
    pub from: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub to: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub value: Option<String>,
    #[serde(default, rename = "type", deserialize_with = "lenient_string")]
    pub call_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub gas: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub gas_used: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub is_error: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub contract_address: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub err_code: Option<String>,
}

/// `module=token&action=getToken` result, reduced to what enrichment needs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenMetadata {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub symbol: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub decimals: Option<String>,
}

impl TokenMetadata {
    pub fn new(name: impl Into<String>, symbol: impl Into<String>, decimals: u8) -> Self {
        Self {
            name: Some(name.into()),
            symbol: Some(symbol.into()),
            decimals: Some(decimals.to_string()),
        }
    }

    /// Token decimals, if the explorer reported a usable value (0..=255).
    pub fn decimals(&self) -> Option<u8> {
        crate::scalar::to_u64(self.decimals.as_deref())
            .parsed()
            .and_then(|d| u8::try_from(d).ok())
    }
}

fn empty_data() -> String {
    "0x".into()
}

/// Accept a string, number or bool; `null`/missing become `None`.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde_json::Value;
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        Some(other) => Some(other.to_string()),
    })
}

fn present_topics<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let topics = Option::<Vec<Option<String>>>::deserialize(deserializer)?;
    Ok(topics.unwrap_or_default().into_iter().flatten().collect())
}
