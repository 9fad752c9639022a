//! # stk-cli — Command-Line Front End for Stocktake
//!
//! Provides the `stk` command. Every subcommand opens the [`Inventory`] in
//! the data directory, performs one operation and exits; state lives only in
//! the store.
//!
//! ## Subcommands
//!
//! - `stk scan | list | update | delete | reset` — scan entries.
//! - `stk summary [find | set-total | remove]` — per-code totals.
//! - `stk import | products` — the reference product list.
//! - `stk check` — scan against the reference list.
//! - `stk divergence` — expected vs counted, optionally to a report file.
//! - `stk export` — license-gated inventory export.
//! - `stk license | admin | clear-cache` — licensing and housekeeping.
//!
//! ```bash
//! stk scan 7891000100103 --qty 12
//! stk summary set-total 7891000100103 10
//! stk import reference.csv --delimiter ';' --with-quantity
//! stk export --format csv --padding 6 --out ./exports
//! ```

pub mod admin;
pub mod check;
pub mod divergence;
pub mod entries;
pub mod export;
pub mod license;
pub mod products;
pub mod summary;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::ValueEnum;

use stk_export::ExportFormat;
use stk_license::{EnvSecrets, LicenseService};
use stk_store::{FileStore, Inventory};

/// Default data directory, relative to the working directory.
pub const DEFAULT_DATA_DIR: &str = ".stk";

/// Open the session stored in `data_dir`.
pub fn open_inventory(data_dir: &Path) -> Result<Inventory<FileStore>> {
    let store = FileStore::open(data_dir)
        .with_context(|| format!("failed to open data directory: {}", data_dir.display()))?;
    Inventory::open(store)
        .with_context(|| format!("failed to load inventory from {}", data_dir.display()))
}

/// License service over secrets from the environment.
pub fn license_service() -> Result<LicenseService> {
    LicenseService::new(Arc::new(EnvSecrets::from_env()))
        .context("failed to initialise license service")
}

/// Refuse a destructive action unless `--yes` was given.
pub fn require_confirmation(yes: bool, action: &str) -> Result<()> {
    if !yes {
        bail!("{action} cannot be undone; pass --yes to confirm");
    }
    Ok(())
}

/// Write `bytes` to `dir/filename`, creating `dir` if needed.
pub fn write_output(dir: &Path, filename: &str, bytes: &[u8]) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory: {}", dir.display()))?;
    let path = dir.join(filename);
    std::fs::write(&path, bytes)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}

/// Output file flavour on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum FormatArg {
    #[default]
    Txt,
    Csv,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Txt => ExportFormat::Txt,
            FormatArg::Csv => ExportFormat::Csv,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirmation_required() {
        assert!(require_confirmation(true, "reset").is_ok());
        let err = require_confirmation(false, "reset").unwrap_err();
        assert!(err.to_string().contains("--yes"));
    }

    #[test]
    fn write_output_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("exports");
        let path = write_output(&out, "a.txt", b"x").unwrap();
        assert_eq!(std::fs::read(path).unwrap(), b"x");
    }

    #[test]
    fn open_inventory_in_fresh_dir() {
        let dir = tempfile::tempdir().unwrap();
        let inv = open_inventory(&dir.path().join("data")).unwrap();
        assert!(inv.entries().is_empty());
    }

    #[test]
    fn format_arg_maps() {
        assert_eq!(ExportFormat::from(FormatArg::Csv), ExportFormat::Csv);
        assert_eq!(ExportFormat::from(FormatArg::default()), ExportFormat::Txt);
    }
}
