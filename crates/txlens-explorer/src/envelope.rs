//! Etherscan-style response envelopes: `{"status", "message", "result"}`.

use alloy_json_abi::JsonAbi;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ExplorerError;

/// Unwrap `result` from an envelope and deserialize it.
///
/// `status: "0"` is an error, except that "No ... found" messages are
/// reported as [`ExplorerError::NoResults`]. A `null`, `{}` or `[]` result
/// is also treated as no results.
pub fn parse_envelope<T: DeserializeOwned>(body: Value) -> Result<T, ExplorerError> {
    let message = body
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    if let Some(error) = body.get("error").filter(|e| !e.is_null()) {
        return Err(ExplorerError::Api {
            message: error.as_str().map_or_else(|| error.to_string(), str::to_string),
        });
    }

    let status = match body.get("status") {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    };
    if status.as_deref() == Some("0") {
        return Err(if message.starts_with("No ") {
            ExplorerError::NoResults { message }
        } else {
            ExplorerError::Api { message }
        });
    }

    match body.get("result") {
        None | Some(Value::Null) => Err(ExplorerError::NoResults { message }),
        Some(Value::Object(map)) if map.is_empty() => Err(ExplorerError::NoResults { message }),
        Some(Value::Array(items)) if items.is_empty() => Err(ExplorerError::NoResults { message }),
        Some(result) => Ok(serde_json::from_value(result.clone())?),
    }
}

/// Validate an ABI `result` (a JSON string, or an already-decoded array)
/// and return it as JSON.
pub fn parse_abi(result: Value) -> Result<Value, ExplorerError> {
    let text = match result {
        Value::String(s) => s,
        other @ Value::Array(_) => other.to_string(),
        other => {
            return Err(ExplorerError::InvalidAbi {
                reason: format!("expected string or array, got {other}"),
            })
        }
    };
    serde_json::from_str::<JsonAbi>(&text).map_err(|e| ExplorerError::InvalidAbi {
        reason: e.to_string(),
    })?;
    Ok(serde_json::from_str(&text)?)
}
