//! `Pipeline` — fetch, decode, enrich, classify and assemble one transaction.
//!
//! Fetches run strictly one after another; nothing is retried.

use std::collections::HashMap;

use crate::chain::ChainMap;
use crate::decoder::LogDecoder;
use crate::enrich::{enrich, token_contracts};
use crate::error::PipelineError;
use crate::report::{EnhancedTransaction, ReportAssembler};
use crate::source::ExplorerSource;
use crate::transfer::TokenTransfer;

/// Which optional fetches to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineOptions {
    pub fetch_internal: bool,
    pub fetch_abi: bool,
    pub fetch_token_metadata: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            fetch_internal: true,
            fetch_abi: true,
            fetch_token_metadata: true,
        }
    }
}

pub struct Pipeline<S> {
    source: S,
    decoder: LogDecoder,
    chains: ChainMap,
    options: PipelineOptions,
}

impl<S: ExplorerSource> Pipeline<S> {
    pub fn new(source: S, chains: ChainMap) -> Self {
        Self {
            source,
            decoder: LogDecoder::default(),
            chains,
            options: PipelineOptions::default(),
        }
    }

    pub fn with_decoder(mut self, decoder: LogDecoder) -> Self {
        self.decoder = decoder;
        self
    }

    pub fn with_options(mut self, options: PipelineOptions) -> Self {
        self.options = options;
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn chains(&self) -> &ChainMap {
        &self.chains
    }

    /// Build the report for `hash`.
    ///
    /// # Errors
    /// [`PipelineError::TransactionNotFound`] when the explorer has no record
    /// of the transaction, or returns one without a hash. Every other fetch
    /// degrades silently.
    pub async fn run(&self, hash: &str) -> Result<EnhancedTransaction, PipelineError> {
        // A record without a hash is an empty answer, not a transaction.
        let raw = self
            .source
            .fetch_transaction(hash)
            .await
            .filter(|raw| raw.hash.as_deref().is_some_and(|h| !h.trim().is_empty()))
            .ok_or_else(|| PipelineError::TransactionNotFound {
                hash: hash.to_string(),
                source_name: self.source.name().to_string(),
            })?;

        let logs = self.decoder.decode_all(&raw.logs);
        let mut transfers = TokenTransfer::collect(&logs, &self.chains);
        tracing::info!(
            hash,
            raw_logs = raw.logs.len(),
            logs = logs.len(),
            transfers = transfers.len(),
            "decoded logs"
        );

        if self.options.fetch_token_metadata && !transfers.is_empty() {
            self.enrich_transfers(&mut transfers).await;
        }

        let internal = if self.options.fetch_internal {
            self.source.fetch_internal_transactions(hash).await
        } else {
            Vec::new()
        };

        let to = raw.to.as_deref().map(str::trim).filter(|t| !t.is_empty());
        let contract_abi = match to {
            Some(address) if self.options.fetch_abi => {
                self.source.fetch_contract_abi(address).await
            }
            _ => None,
        };

        let tx = ReportAssembler::new(&self.chains).assemble(
            &raw,
            logs,
            transfers,
            &internal,
            contract_abi,
        );
        tracing::info!(
            hash,
            tx_type = %tx.tx_type,
            internal = tx.summary.internal_tx_count,
            multi_chain = tx.summary.is_multi_chain,
            "assembled report"
        );
        Ok(tx)
    }

    /// One metadata fetch per distinct token contract.
    async fn enrich_transfers(&self, transfers: &mut [TokenTransfer]) {
        let contracts = token_contracts(transfers);
        let mut fetched = HashMap::with_capacity(contracts.len());
        for contract in &contracts {
            if let Some(metadata) = self.source.fetch_token_metadata(contract).await {
                fetched.insert(contract.clone(), metadata);
            }
        }
        enrich(transfers, &contracts, |contract| fetched.remove(contract));
    }
}
