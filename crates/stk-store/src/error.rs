//! # Store and Session Errors

use std::path::PathBuf;

use thiserror::Error;

use stk_core::ValidationError;
use stk_license::{CheckReason, LicenseError};

use crate::keys::StoreKey;

/// Failure reading or writing a blob.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Filesystem operation failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Value could not be encoded as JSON.
    #[error("failed to encode {key}: {source}")]
    Encode {
        key: StoreKey,
        source: serde_json::Error,
    },
}

/// Failure of an [`crate::Inventory`] operation.
#[derive(Error, Debug)]
pub enum InventoryError {
    /// Input rejected; nothing changed.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Persisting the change failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Key generation failed.
    #[error(transparent)]
    License(#[from] LicenseError),

    /// The key did not validate; it was not stored.
    #[error("license rejected: {0}")]
    Rejected(CheckReason),

    /// Check-mode scan of a code missing from the reference list.
    #[error("code {0} is not in the reference list")]
    UnknownCode(String),
}
