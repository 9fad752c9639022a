//! # Check Subcommand
//!
//! `stk check <code> [--qty N] [--force]` scans against the imported
//! reference list and reports how many listed products are still unseen.
//! Codes missing from the list are refused unless `--force` is given.

use std::path::Path;

use anyhow::{bail, Result};
use clap::Args;

use stk_store::{CheckOutcome, InventoryError};

use crate::open_inventory;

/// Arguments for `stk check`.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Barcode as scanned or typed.
    pub code: String,

    /// Units counted.
    #[arg(long, short, default_value_t = 1)]
    pub qty: u64,

    /// Record the scan even if the code is not on the reference list.
    #[arg(long)]
    pub force: bool,
}

pub fn run_check(args: &CheckArgs, data_dir: &Path) -> Result<u8> {
    let mut inv = open_inventory(data_dir)?;
    if inv.products().is_empty() {
        bail!("no reference list imported; run `stk import` first");
    }

    match inv.check_scan(&args.code, args.qty, args.force) {
        Ok(CheckOutcome::Matched {
            product, remaining, ..
        }) => {
            let expected = product
                .quantity
                .map(|q| format!(", expected {q}"))
                .unwrap_or_default();
            println!("{}  {}{expected}", product.code, product.name);
            println!("{remaining} products left to check.");
            Ok(0)
        }
        Ok(CheckOutcome::Unlisted { entry, remaining }) => {
            println!("{}  recorded (not on the reference list)", entry.code);
            println!("{remaining} products left to check.");
            Ok(0)
        }
        Err(InventoryError::UnknownCode(code)) => {
            println!("{code} is not on the reference list; pass --force to record it anyway.");
            Ok(2)
        }
        Err(e) => Err(e.into()),
    }
}
