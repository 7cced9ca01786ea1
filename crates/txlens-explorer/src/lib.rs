//! # txlens-explorer
//!
//! HTTP client for Blockscout and other Etherscan-compatible explorer APIs.
//!
//! [`BlockscoutClient`] implements [`txlens_core::ExplorerSource`]. Every
//! call hits one `?module=...&action=...` endpoint and unwraps the usual
//! `{status, message, result}` envelope:
//!
//! | fetch                  | endpoint                                  |
//! |------------------------|-------------------------------------------|
//! | transaction            | `transaction` / `gettxinfo`               |
//! | internal transactions  | `account` / `txlistinternal`              |
//! | contract ABI           | `contract` / `getabi`                     |
//! | token metadata         | `token` / `getToken`                      |
//!
//! Failures are logged and turned into absent results at the trait boundary.

pub mod client;
pub mod envelope;
pub mod error;

pub use client::{BlockscoutClient, ExplorerConfig};
pub use envelope::{parse_abi, parse_envelope};
pub use error::ExplorerError;
