//! Known event signatures, keyed by their topic-0 fingerprint.
//!
//! The fingerprint of an EVM event is the keccak256 hash of its canonical
//! signature string, e.g.:
//!   keccak256("Transfer(address,address,uint256)")
//!   → 0xddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tiny_keccak::{Hasher, Keccak};

/// The event types txlens recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    Transfer,
    Approval,
    TransferSingle,
    TransferBatch,
}

impl EventKind {
    pub const ALL: [EventKind; 4] = [
        EventKind::Transfer,
        EventKind::Approval,
        EventKind::TransferSingle,
        EventKind::TransferBatch,
    ];

    /// Canonical ABI signature; also used as the human-readable event name.
    pub fn signature(&self) -> &'static str {
        match self {
            EventKind::Transfer => "Transfer(address,address,uint256)",
            EventKind::Approval => "Approval(address,address,uint256)",
            EventKind::TransferSingle => "TransferSingle(address,address,address,uint256,uint256)",
            EventKind::TransferBatch => "TransferBatch(address,address,address,uint256[],uint256[])",
        }
    }
}

/// Compute the keccak256 fingerprint (`0x`-prefixed, lowercase) of a signature.
pub fn keccak256_signature(signature: &str) -> String {
    let mut hasher = Keccak::v256();
    let mut output = [0u8; 32];
    hasher.update(signature.as_bytes());
    hasher.finalize(&mut output);
    format!("0x{}", hex::encode(output))
}

/// Immutable fingerprint → [`EventKind`] table, built once at startup.
#[derive(Debug, Clone)]
pub struct EventSignatureTable {
    by_fingerprint: HashMap<String, EventKind>,
}

impl EventSignatureTable {
    /// The four ERC20 / ERC1155 events.
    pub fn standard() -> Self {
        Self::from_kinds(EventKind::ALL)
    }

    pub fn from_kinds(kinds: impl IntoIterator<Item = EventKind>) -> Self {
        Self {
            by_fingerprint: kinds
                .into_iter()
                .map(|k| (keccak256_signature(k.signature()), k))
                .collect(),
        }
    }

    /// Look up a topic-0 value; comparison ignores hex case.
    pub fn lookup(&self, topic0: &str) -> Option<EventKind> {
        self.by_fingerprint.get(&topic0.trim().to_lowercase()).copied()
    }

    /// Fingerprint for a kind, if the table contains it.
    pub fn fingerprint(&self, kind: EventKind) -> Option<&str> {
        self.by_fingerprint
            .iter()
            .find(|(_, k)| **k == kind)
            .map(|(fp, _)| fp.as_str())
    }

    pub fn len(&self) -> usize {
        self.by_fingerprint.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_fingerprint.is_empty()
    }
}

impl Default for EventSignatureTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_known_fingerprints() {
        assert_eq!(
            keccak256_signature(EventKind::Transfer.signature()),
            "0xddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef"
        );
        assert_eq!(
            keccak256_signature(EventKind::Approval.signature()),
            "0x8c5be1e5ebec7d5bd14f71427d1e84f3dd0314c0f7b2291e5b200ac8c7c3b925"
        );
        assert_eq!(
            keccak256_signature(EventKind::TransferSingle.signature()),
            "0xc3d58168c5ae7397731d063d5bbf3d657854427343f4c083240f7aacaa2d0f62"
        );
        assert_eq!(
            keccak256_signature(EventKind::TransferBatch.signature()),
            "0x4a39dc06d4c0dbc64b70af90fd698a233a518aa5d07e595d983b8c0526c8f7fb"
        );
    }

    #[test]
    fn lookup_ignores_case() {
        let table = EventSignatureTable::standard();
        assert_eq!(table.len(), 4);
        assert_eq!(
            table.lookup("0xDDF252AD1BE2C89B69C2B068FC378DAA952BA7F163C4A11628F55A4DF523B3EF"),
            Some(EventKind::Transfer)
        );
        assert_eq!(table.lookup("0x1234"), None);
    }

    #[test]
    fn partial_table() {
        let table = EventSignatureTable::from_kinds([EventKind::Approval]);
        assert!(table.fingerprint(EventKind::Transfer).is_none());
        assert!(table.fingerprint(EventKind::Approval).unwrap().starts_with("0x8c5be1e5"));
    }
}
