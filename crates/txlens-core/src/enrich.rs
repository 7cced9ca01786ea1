//! Token metadata enrichment.
//!
//! Metadata is looked up once per distinct token contract. A contract with no
//! metadata keeps its provisional 18-decimal formatting.

use std::collections::BTreeSet;

use crate::raw::TokenMetadata;
use crate::transfer::TokenTransfer;

/// Distinct token contracts referenced by `transfers`, in a stable order.
pub fn token_contracts(transfers: &[TokenTransfer]) -> BTreeSet<String> {
    transfers
        .iter()
        .map(|t| t.token_contract.to_lowercase())
        .collect()
}

/// Apply `metadata` to every transfer of `contract`. Returns how many changed.
///
/// Name and symbol are copied whenever present; decimals (and with them
/// `amount_formatted`) only when the explorer reported a usable value.
pub fn apply_metadata(
    transfers: &mut [TokenTransfer],
    contract: &str,
    metadata: &TokenMetadata,
) -> usize {
    let decimals = metadata.decimals();
    let mut updated = 0;
    for t in transfers
        .iter_mut()
        .filter(|t| t.token_contract.eq_ignore_ascii_case(contract))
    {
        if metadata.name.is_some() {
            t.token_name = metadata.name.clone();
        }
        if metadata.symbol.is_some() {
            t.token_symbol = metadata.symbol.clone();
        }
        if let Some(d) = decimals {
            t.rescale(d);
        }
        updated += 1;
    }
    updated
}

/// Enrich `transfers` using one `fetch` call per contract in `contracts`.
pub fn enrich<F>(transfers: &mut [TokenTransfer], contracts: &BTreeSet<String>, mut fetch: F)
where
    F: FnMut(&str) -> Option<TokenMetadata>,
{
    for contract in contracts {
        match fetch(contract) {
            Some(metadata) => {
                let updated = apply_metadata(transfers, contract, &metadata);
                tracing::debug!(
                    contract = %contract,
                    symbol = metadata.symbol.as_deref().unwrap_or("?"),
                    updated,
                    "applied token metadata"
                );
            }
            None => {
                tracing::debug!(contract = %contract, "no token metadata; keeping 18 decimals");
            }
        }
    }
}
