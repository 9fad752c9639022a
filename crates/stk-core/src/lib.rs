//! # stk-core — Reconciliation Core for Stocktake
//!
//! Defines the data model and the pure algorithms behind an inventory count:
//! scan entries, barcode normalization, per-code summaries, redistribution of
//! edited totals, divergence against an imported reference list, and parsing
//! of that reference list.
//!
//! ## Two Equality Keys
//!
//! Codes are compared two different ways, and the split is intentional:
//!
//! - **Raw** — the on-screen summary ([`aggregate`]) groups by the exact
//!   string the operator scanned, so `0012` and `12` stay visually distinct.
//! - **Normalized** — reconciliation ([`divergence`]) and export merge
//!   zero-padding variants through [`normalize()`].
//!
//! ## Crate Policy
//!
//! - No dependencies on other `stk-*` crates (this is the leaf of the DAG).
//! - No I/O. Persistence lives in `stk-store`, file encoding in `stk-export`.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - Derived values (summaries, divergences) are recomputed from the entry
//!   list on every read and never stored.

pub mod aggregate;
pub mod code;
pub mod divergence;
pub mod entry;
pub mod error;
pub mod identity;
pub mod import;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use aggregate::{
    find_summary, grand_total, redistribute, remove_code, summarize, CodeSummary, GrandTotal,
};
pub use code::{normalize, pad_code, CODE_WIDTH};
pub use divergence::{compute_divergences, totals, DivergenceItem, DivergenceStatus, DivergenceTotals};
pub use entry::{find_product, validate_quantity, ProductReference, ScanEntry};
pub use error::{StkError, ValidationError};
pub use identity::{EntryId, LicenseId};
pub use import::{parse_reference_list, ImportOptions, MISSING_NAME};
pub use temporal::Timestamp;
