//! # stk-export — Export Files and the Export Gate
//!
//! - [`codec`] — the inventory file: counts merged by normalized code,
//!   codes re-padded to 14 digits, optional quantity padding, UTF-8 BOM.
//! - [`report`] — the divergence report with its header row.
//! - [`gate`] — [`ExportGate`]: license check, connectivity probe and
//!   registry confirmation, awaited in that order before anything is
//!   encoded.
//! - [`probe`] — [`HttpProbe`], the reqwest-backed connectivity check.
//! - [`config`] — [`ExportConfig`] from `STK_*` environment variables.
//!
//! Nothing here writes files. Encoders return an [`ExportFile`] and the
//! caller decides where the bytes go.

pub mod codec;
pub mod config;
pub mod error;
pub mod gate;
pub mod probe;
pub mod report;

pub use codec::{
    aggregate_normalized, decode, encode, export_filename, ExportFile, ExportFormat,
    ExportOptions, ExportRow, BOM,
};
pub use config::{ConfigError, ExportConfig};
pub use error::{ExportError, ProbeError};
pub use gate::{ConnectivityProbe, ExportGate, LocalRegistryCheck, RegistryCheck};
pub use probe::HttpProbe;
pub use report::{encode_divergences, REPORT_COLUMNS};
