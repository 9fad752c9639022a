//! # Error Types
//!
//! The failure taxonomy shared by every Stocktake crate. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Taxonomy
//!
//! - **Validation** — malformed input. The operation is a no-op.
//! - **Not found** — not an error at all. Lookups return `Option` and
//!   removals return a count, so callers never match on a "missing" variant.
//! - **License** — an invalid, expired or revoked key. Blocks only the gated
//!   operation.
//! - **Environment** — connectivity or registry failure during export.
//! - **Storage** — the persistence layer could not write.

use thiserror::Error;

/// Top-level error type for Stocktake.
#[derive(Error, Debug)]
pub enum StkError {
    /// Input rejected before any state changed.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// License missing, invalid, expired or revoked.
    #[error("license error: {0}")]
    License(String),

    /// An outbound check failed (connectivity, registry confirmation).
    #[error("environment error: {0}")]
    Environment(String),

    /// Persisted state could not be written.
    #[error("storage error: {0}")]
    Storage(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Malformed input rejected locally.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Quantities entered by an operator must be at least one.
    #[error("quantity must be at least 1, got {0}")]
    NonPositiveQuantity(u64),

    /// A summary total must be positive to be redistributed.
    #[error("total must be greater than zero")]
    ZeroTotal,

    /// Barcode is empty after trimming.
    #[error("barcode must not be empty")]
    EmptyCode,

    /// Field delimiter is the empty string.
    #[error("delimiter must not be empty")]
    EmptyDelimiter,

    /// The import file produced no product rows.
    #[error("no products found in the import file")]
    EmptyImport,

    /// License duration must be at least one day.
    #[error("license duration must be at least 1 day, got {0}")]
    ZeroDuration(u32),

    /// Licenses must name the client they are issued to.
    #[error("client name must not be empty")]
    EmptyClientName,

    /// Admin password did not match.
    #[error("admin password rejected")]
    AdminPassword,
}
