//! Typed failures for preconditions and fatal setup problems.
//!
//! Per-domain I/O failures do not use this type: they are carried as
//! `anyhow::Error` and flattened into the result's `error` field.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckError {
    /// Domain name without the registered TLD suffix.
    #[error("invalid domain: {0}")]
    InvalidDomain(String),

    #[error("lite mode doesn't support check all mode")]
    LiteCheckAll,

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// Renewal was requested but no wallet is available.
    #[error("wallet is not configured (running in lite mode?)")]
    MissingWallet,

    #[error("configuration error: {0}")]
    Config(String),
}
