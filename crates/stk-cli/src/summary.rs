//! # Summary Subcommand
//!
//! Totals per raw code. Editing a total spreads it back over that code's
//! entries; removing a summary row deletes every entry with that code.

use std::path::Path;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::{open_inventory, require_confirmation};

/// Arguments for `stk summary`.
#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// Print JSON instead of a table.
    #[arg(long)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<SummaryCommand>,
}

/// Summary subcommands. Without one, every summary is shown.
#[derive(Subcommand, Debug)]
pub enum SummaryCommand {
    /// Show the summary for one exact code.
    Find {
        code: String,
    },

    /// Set a code's total, redistributed over its entries.
    SetTotal {
        code: String,
        total: u64,
    },

    /// Delete every entry with this exact code.
    Remove {
        code: String,

        /// Confirm the removal.
        #[arg(long)]
        yes: bool,
    },
}

pub fn run_summary(args: &SummaryArgs, data_dir: &Path) -> Result<u8> {
    match &args.command {
        None => cmd_show(args.json, data_dir),
        Some(SummaryCommand::Find { code }) => cmd_find(code, args.json, data_dir),
        Some(SummaryCommand::SetTotal { code, total }) => cmd_set_total(code, *total, data_dir),
        Some(SummaryCommand::Remove { code, yes }) => cmd_remove(code, *yes, data_dir),
    }
}

fn cmd_show(json: bool, data_dir: &Path) -> Result<u8> {
    let inv = open_inventory(data_dir)?;
    let summaries = inv.summaries();
    if json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(0);
    }
    for s in &summaries {
        println!(
            "{:<20}  {:>8}  ({} entries)",
            s.original_code, s.total_quantity, s.occurrences
        );
    }
    let total = inv.grand_total();
    println!(
        "{} codes, {} units",
        total.distinct_codes, total.total_quantity
    );
    Ok(0)
}

fn cmd_find(code: &str, json: bool, data_dir: &Path) -> Result<u8> {
    let inv = open_inventory(data_dir)?;
    match inv.find_summary(code) {
        Some(s) if json => {
            println!("{}", serde_json::to_string_pretty(&s)?);
            Ok(0)
        }
        Some(s) => {
            println!(
                "{}  {} units in {} entries",
                s.original_code, s.total_quantity, s.occurrences
            );
            Ok(0)
        }
        None => {
            println!("No entries for {code}.");
            Ok(1)
        }
    }
}

fn cmd_set_total(code: &str, total: u64, data_dir: &Path) -> Result<u8> {
    let mut inv = open_inventory(data_dir)?;
    let touched = inv.set_summary_total(code, total)?;
    if touched == 0 {
        println!("No entries for {code}.");
        return Ok(1);
    }
    println!("{code}: total {total} spread over {touched} entries.");
    Ok(0)
}

fn cmd_remove(code: &str, yes: bool, data_dir: &Path) -> Result<u8> {
    require_confirmation(yes, "removing a summary row")?;
    let mut inv = open_inventory(data_dir)?;
    let removed = inv.delete_summary(code)?;
    println!("Removed {removed} entries for {code}.");
    Ok(if removed == 0 { 1 } else { 0 })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed(dir: &Path) {
        let mut inv = open_inventory(dir).unwrap();
        for _ in 0..3 {
            inv.add_entry("789", 1).unwrap();
        }
    }

    #[test]
    fn set_total_redistributes() {
        let dir = tempfile::tempdir().unwrap();
        seed(dir.path());
        let args = SummaryArgs {
            json: false,
            command: Some(SummaryCommand::SetTotal {
                code: "789".into(),
                total: 10,
            }),
        };
        assert_eq!(run_summary(&args, dir.path()).unwrap(), 0);
        let q: Vec<u64> = open_inventory(dir.path())
            .unwrap()
            .entries()
            .iter()
            .map(|e| e.quantity)
            .collect();
        assert_eq!(q, vec![4, 3, 3]);
    }

    #[test]
    fn set_total_zero_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        seed(dir.path());
        let args = SummaryArgs {
            json: false,
            command: Some(SummaryCommand::SetTotal {
                code: "789".into(),
                total: 0,
            }),
        };
        assert!(run_summary(&args, dir.path()).is_err());
    }

    #[test]
    fn find_missing_code_exits_one() {
        let dir = tempfile::tempdir().unwrap();
        let args = SummaryArgs {
            json: false,
            command: Some(SummaryCommand::Find { code: "1".into() }),
        };
        assert_eq!(run_summary(&args, dir.path()).unwrap(), 1);
    }

    #[test]
    fn remove_requires_yes() {
        let dir = tempfile::tempdir().unwrap();
        seed(dir.path());
        let args = SummaryArgs {
            json: false,
            command: Some(SummaryCommand::Remove {
                code: "789".into(),
                yes: false,
            }),
        };
        assert!(run_summary(&args, dir.path()).is_err());
    }
}
