//! Crate-wide "truly exceptional" error taxonomy.
//!
//! `CoreError` is deliberately narrow: it covers bugs and environment
//! failures the pipeline was never meant to recover from (a violated
//! internal invariant, an arithmetic overflow the decimal representation
//! was supposed to rule out, a persistence-layer failure). Data-shape
//! rejections that are a normal, expected outcome of classifying a
//! transaction go through `scc::error::EraseResult` instead, which keeps
//! "this transaction isn't a swap" from ever looking like a crash.

use thiserror::Error;

/// Top-level fatal error type for the crate's ambient stack (config
/// loading, persistence, CLI host). The core pipeline itself only ever
/// returns this for truly exceptional conditions, never for an ordinary
/// "not a swap" rejection.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    #[error("internal invariant violated: {0}")]
    InvariantViolated(String),

    #[error("arithmetic overflow while {operation}")]
    ArithmeticOverflow { operation: String },
}

/// Configuration loading/validation failures.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("failed to read configuration file {path}: {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse configuration: {0}")]
    ParseFailed(String),

    #[error("configuration field {field} is invalid: {reason}")]
    InvalidField { field: String, reason: String },
}

/// Persistence-collaborator failures (see `scc::persistence`).
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("split pair insert was not atomic: {reason}")]
    NonAtomicSplitInsert { reason: String },
}
