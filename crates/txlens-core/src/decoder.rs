//! `LogDecoder` — classifies raw logs by topic-0 and extracts ERC20 fields.
//!
//! # Layout of the events we decode
//! - `topics[0]` → event signature fingerprint
//! - `topics[1]`, `topics[2]` → indexed addresses, left-padded to 32 bytes
//! - `data` → the non-indexed `uint256` amount
//!
//! A log whose topics are too short for its event keeps its name but gets no
//! structured payload.

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

use crate::error::DecodeError;
use crate::raw::RawLog;
use crate::scalar::{self, u256_decimal};
use crate::signature::{EventKind, EventSignatureTable};

/// Event name used when topic-0 is not in the signature table.
pub const UNKNOWN_EVENT: &str = "Unknown";

/// Structured payload of a recognized, well-formed event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum DecodedEvent {
    Transfer {
        from: String,
        to: String,
        #[serde(with = "u256_decimal")]
        value: U256,
    },
    Approval {
        owner: String,
        spender: String,
        #[serde(with = "u256_decimal")]
        value: U256,
    },
}

/// A raw log plus what we could learn from its signature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecodedLog {
    pub address: String,
    pub topics: Vec<String>,
    pub data: String,
    pub log_index: u64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub block_number: Option<u64>,
    pub event_signature: String,
    pub event_name: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub decoded_event: Option<DecodedEvent>,
    #[serde(skip)]
    pub kind: Option<EventKind>,
}

impl DecodedLog {
    /// `true` if topic-0 matched a known signature.
    pub fn is_recognized(&self) -> bool {
        self.kind.is_some()
    }
}

/// Stateless apart from its signature table.
#[derive(Debug, Clone, Default)]
pub struct LogDecoder {
    signatures: EventSignatureTable,
}

impl LogDecoder {
    pub fn new(signatures: EventSignatureTable) -> Self {
        Self { signatures }
    }

    pub fn signatures(&self) -> &EventSignatureTable {
        &self.signatures
    }

    /// Decode one log. Fails only when the log has no topics at all.
    pub fn decode(&self, raw: &RawLog) -> Result<DecodedLog, DecodeError> {
        let log_index = scalar::to_u64(raw.log_index.as_deref()).value();
        let signature = raw
            .topics
            .first()
            .ok_or(DecodeError::NoTopics { log_index })?;

        let kind = self.signatures.lookup(signature);
        let decoded_event = kind.and_then(|k| decode_payload(k, raw));

        Ok(DecodedLog {
            address: raw.address.to_lowercase(),
            topics: raw.topics.clone(),
            data: raw.data.clone(),
            log_index,
            block_number: scalar::to_u64(raw.block_number.as_deref()).parsed(),
            event_signature: signature.clone(),
            event_name: kind.map_or(UNKNOWN_EVENT, |k| k.signature()).to_string(),
            decoded_event,
            kind,
        })
    }

    /// Decode every log that has topics, in order.
    ///
    /// Logs without topics are dropped. A log whose index is missing or
    /// unreadable takes its position in the list.
    pub fn decode_all(&self, logs: &[RawLog]) -> Vec<DecodedLog> {
        logs.iter()
            .enumerate()
            .filter_map(|(position, raw)| match self.decode(raw) {
                Ok(mut log) => {
                    if scalar::to_u64(raw.log_index.as_deref()).parsed().is_none() {
                        log.log_index = position as u64;
                    }
                    Some(log)
                }
                Err(e) => {
                    tracing::debug!(position, error = %e, "skipping log");
                    None
                }
            })
            .collect()
    }
}

fn decode_payload(kind: EventKind, raw: &RawLog) -> Option<DecodedEvent> {
    match kind {
        EventKind::Transfer | EventKind::Approval => {
            if raw.topics.len() < 3 {
                return None;
            }
            let first = topic_address(&raw.topics[1])?;
            let second = topic_address(&raw.topics[2])?;
            let value = scalar::first_word(&raw.data).value();
            Some(match kind {
                EventKind::Transfer => DecodedEvent::Transfer { from: first, to: second, value },
                _ => DecodedEvent::Approval { owner: first, spender: second, value },
            })
        }
        // Named only; ERC1155 values are not extracted.
        EventKind::TransferSingle | EventKind::TransferBatch => None,
    }
}

/// The low 20 bytes of an indexed address topic: last 40 hex chars,
/// lowercased, `0x`-prefixed.
pub fn topic_address(topic: &str) -> Option<String> {
    let hex = topic.trim();
    let hex = hex.strip_prefix("0x").unwrap_or(hex);
    if hex.len() < 40 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    Some(format!("0x{}", hex[hex.len() - 40..].to_lowercase()))
}
