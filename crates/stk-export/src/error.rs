//! # Export Errors
//!
//! Every failure of the gated export path maps to one [`ExportError`]
//! variant. A failed export writes nothing and changes no stored state.

use thiserror::Error;

use stk_core::ValidationError;
use stk_license::CheckReason;

/// Connectivity probe failure.
#[derive(Error, Debug)]
pub enum ProbeError {
    /// The probe target could not be reached.
    #[error("probe target unreachable: {0}")]
    Unreachable(String),

    /// No response within the configured timeout.
    #[error("probe timed out after {0}s")]
    Timeout(u64),
}

/// Export failure.
#[derive(Error, Debug)]
pub enum ExportError {
    /// Options rejected before any check ran.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No license key is stored.
    #[error("no license activated; activate a valid license to export")]
    NoLicense,

    /// The stored key did not validate.
    #[error("license not valid for export: {0}")]
    License(CheckReason),

    /// No internet connection.
    #[error("no internet connection: {0}")]
    Offline(#[from] ProbeError),

    /// The registry has no current record of the key.
    #[error("license could not be confirmed by the issuer registry")]
    NotConfirmed,

    /// The registry could not be consulted.
    #[error("issuer registry unavailable: {0}")]
    Registry(String),

    /// A row of an export file could not be read back.
    #[error("malformed export row {line}: {reason}")]
    MalformedRow { line: usize, reason: String },
}
