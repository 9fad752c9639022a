//! # Divergence Subcommand
//!
//! `stk divergence [--json] [--out DIR --format F --delimiter D]` compares
//! counted quantities with the reference list. With `--out`, the report is
//! written as `divergences_<YYYYMMDD>_<HHMM>.<ext>`.

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use chrono::Local;
use clap::Args;

use stk_core::{totals, DivergenceStatus};
use stk_export::config::DIVERGENCE_PREFIX;
use stk_export::{encode_divergences, export_filename};

use crate::{open_inventory, write_output, FormatArg};

/// Arguments for `stk divergence`.
#[derive(Args, Debug)]
pub struct DivergenceArgs {
    /// Print JSON instead of a table.
    #[arg(long)]
    pub json: bool,

    /// Write the report file into this directory.
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Report file format.
    #[arg(long, value_enum, default_value_t = FormatArg::Txt)]
    pub format: FormatArg,

    /// Report field delimiter.
    #[arg(long, short, default_value = ";")]
    pub delimiter: String,
}

pub fn run_divergence(args: &DivergenceArgs, data_dir: &Path) -> Result<u8> {
    let inv = open_inventory(data_dir)?;
    if inv.products().is_empty() {
        bail!("no reference list imported; run `stk import` first");
    }
    let items = inv.divergences();

    if let Some(dir) = &args.out {
        let file = encode_divergences(&items, &args.delimiter, args.format.into())?;
        let name = export_filename(DIVERGENCE_PREFIX, Local::now().naive_local(), file.format);
        let path = write_output(dir, &name, &file.bytes)?;
        println!("Wrote {} ({} rows).", path.display(), items.len());
        return Ok(0);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(0);
    }

    for item in &items {
        let mark = match item.status() {
            DivergenceStatus::Match => "=",
            DivergenceStatus::Surplus => "+",
            DivergenceStatus::Shortage => "-",
        };
        println!(
            "{mark} {:<20}  {:<30}  expected {:>6}  counted {:>6}  diff {:>+6}",
            item.code, item.name, item.expected_quantity, item.actual_quantity, item.difference
        );
    }
    let t = totals(&items);
    println!(
        "Totals: expected {}, counted {}, diff {:+}",
        t.total_expected, t.total_actual, t.total_difference
    );
    Ok(0)
}
