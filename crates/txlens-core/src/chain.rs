//! Address → chain identifier resolution.
//!
//! The chain map is static input: it is built once at startup from
//! configuration and only read afterwards.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Sentinel chain id for addresses that are not in the map.
/// This is a valid value, not a missing-field marker.
pub const UNKNOWN_CHAIN: &str = "unknown";

/// Read-only mapping of lowercase address → chain id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "HashMap<String, String>", into = "HashMap<String, String>")]
pub struct ChainMap {
    entries: HashMap<String, String>,
}

impl ChainMap {
    /// Build a map from `(address, chain_id)` pairs. Addresses are lowercased.
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(addr, chain)| (normalize_address(addr.as_ref()), chain.into()))
                .collect(),
        }
    }

    /// The address book shipped with txlens: a Sepolia sender, contract and
    /// org wallet, plus one Polygon zkEVM counterparty.
    pub fn builtin() -> Self {
        Self::new([
            ("0x1e31bebd0970b143279cb873c6005791f0802bdf", "11155111"),
            ("0xcac524bca292aaade2df8a05cc58f0a65b1b3bb9", "11155111"),
            ("0x8009fef9ba8bd6f87a09c4dccc85001e7875b0d7", "11155111"),
            ("0xfad8f1035ed8d097d354bb29c9e4714b5fc4566d", "1101"),
        ])
    }

    /// Resolve an address to its chain id, or [`UNKNOWN_CHAIN`].
    ///
    /// Lookup is case-insensitive; `None` resolves to `"unknown"` without a lookup.
    pub fn resolve(&self, address: Option<&str>) -> String {
        address
            .and_then(|a| self.get(a))
            .unwrap_or(UNKNOWN_CHAIN)
            .to_string()
    }

    /// Borrowing lookup; `None` when the address is not mapped.
    pub fn get(&self, address: &str) -> Option<&str> {
        self.entries
            .get(&normalize_address(address))
            .map(String::as_str)
    }

    /// Merge `other` into this map; entries in `other` win.
    pub fn extend(&mut self, other: ChainMap) {
        self.entries.extend(other.entries);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl From<HashMap<String, String>> for ChainMap {
    fn from(map: HashMap<String, String>) -> Self {
        Self::new(map)
    }
}

impl From<ChainMap> for HashMap<String, String> {
    fn from(map: ChainMap) -> Self {
        map.entries
    }
}

fn normalize_address(address: &str) -> String {
    address.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_address_any_case() {
        let map = ChainMap::builtin();
        assert_eq!(
            map.resolve(Some("0x1E31BEBD0970B143279CB873C6005791F0802BDF")),
            "11155111"
        );
        assert_eq!(
            map.resolve(Some("0xfad8f1035ed8d097d354bb29c9e4714b5fc4566d")),
            "1101"
        );
    }

    #[test]
    fn unknown_and_absent_yield_sentinel() {
        let map = ChainMap::builtin();
        assert_eq!(
            map.resolve(Some("0x000000000000000000000000000000000000dead")),
            UNKNOWN_CHAIN
        );
        assert_eq!(map.resolve(None), UNKNOWN_CHAIN);
    }

    #[test]
    fn keys_are_lowercased_on_construction() {
        let map = ChainMap::new([("0xABCDEF0000000000000000000000000000000001", "137")]);
        assert_eq!(map.get("0xabcdef0000000000000000000000000000000001"), Some("137"));
    }

    #[test]
    fn extend_overrides_existing_entries() {
        let mut map = ChainMap::builtin();
        map.extend(ChainMap::new([(
            "0xfad8f1035ed8d097d354bb29c9e4714b5fc4566d",
            "137",
        )]));
        assert_eq!(map.len(), 4);
        assert_eq!(map.get("0xfad8f1035ed8d097d354bb29c9e4714b5fc4566d"), Some("137"));
    }

    #[test]
    fn deserializes_from_plain_map() {
        let map: ChainMap =
            serde_json::from_str(r#"{"0xAAAA000000000000000000000000000000000000":"10"}"#).unwrap();
        assert_eq!(map.resolve(Some("0xaaaa000000000000000000000000000000000000")), "10");
    }
}
