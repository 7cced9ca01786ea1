//! # txlens-core
//!
//! Turns one block-explorer transaction record into a normalized,
//! multi-chain-aware report.
//!
//! The pipeline runs in one direction:
//! raw explorer result → scalar normalizer / chain resolver (per field)
//! → log decoder (per log) → transfer enricher (per distinct token contract)
//! → classifier → report assembler.
//!
//! Everything here is pure except [`pipeline::Pipeline`], which drives an
//! [`source::ExplorerSource`] for the four external fetches.

pub mod chain;
pub mod classify;
pub mod decoder;
pub mod enrich;
pub mod error;
pub mod pipeline;
pub mod raw;
pub mod report;
pub mod scalar;
pub mod signature;
pub mod source;
pub mod transfer;

pub use chain::{ChainMap, UNKNOWN_CHAIN};
pub use classify::{classify, TxShape, TxType};
pub use decoder::{DecodedEvent, DecodedLog, LogDecoder};
pub use enrich::{enrich, token_contracts};
pub use error::{DecodeError, PipelineError};
pub use pipeline::{Pipeline, PipelineOptions};
pub use raw::{RawInternalTx, RawLog, RawTransaction, TokenMetadata};
pub use report::{EnhancedTransaction, InternalTransaction, ReportAssembler, Summary, TxStatus};
pub use scalar::{to_integer, wei_to_ether, wei_to_gwei, DefaultReason, Scalar};
pub use signature::{EventKind, EventSignatureTable};
pub use source::ExplorerSource;
pub use transfer::{TokenStandard, TokenTransfer};
