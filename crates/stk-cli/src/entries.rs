//! # Entry Subcommands
//!
//! - `stk scan <code> [--qty N]` — append an entry.
//! - `stk list [--json]` — entries in submission order.
//! - `stk update <id> <qty>` — change one entry's quantity.
//! - `stk delete <id>` — remove one entry.
//! - `stk reset --yes` — remove every entry and the check-mode progress.

use std::path::Path;

use anyhow::{bail, Result};
use clap::Args;

use stk_core::EntryId;

use crate::{open_inventory, require_confirmation};

/// Arguments for `stk scan`.
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Barcode as scanned or typed.
    pub code: String,

    /// Units counted.
    #[arg(long, short, default_value_t = 1)]
    pub qty: u64,
}

/// Arguments for `stk list`.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Print JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `stk update`.
#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Entry id as shown by `stk list`.
    pub id: String,

    /// New quantity (at least 1).
    pub qty: u64,
}

/// Arguments for `stk delete`.
#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Entry id as shown by `stk list`.
    pub id: String,
}

/// Arguments for `stk reset`.
#[derive(Args, Debug)]
pub struct ResetArgs {
    /// Confirm the reset.
    #[arg(long)]
    pub yes: bool,
}

pub fn run_scan(args: &ScanArgs, data_dir: &Path) -> Result<u8> {
    let mut inv = open_inventory(data_dir)?;
    let entry = inv.add_entry(&args.code, args.qty)?;
    println!("{}  {}  x{}", entry.id, entry.code, entry.quantity);
    Ok(0)
}

pub fn run_list(args: &ListArgs, data_dir: &Path) -> Result<u8> {
    let inv = open_inventory(data_dir)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(inv.entries())?);
        return Ok(0);
    }
    if inv.entries().is_empty() {
        println!("No entries.");
        return Ok(0);
    }
    for entry in inv.entries() {
        println!("{}  {:<20}  {:>8}", entry.id, entry.code, entry.quantity);
    }
    Ok(0)
}

pub fn run_update(args: &UpdateArgs, data_dir: &Path) -> Result<u8> {
    let id = parse_id(&args.id)?;
    let mut inv = open_inventory(data_dir)?;
    if inv.update_entry(id, args.qty)? {
        println!("Updated {id} to {}.", args.qty);
        Ok(0)
    } else {
        println!("No entry with id {id}.");
        Ok(1)
    }
}

pub fn run_delete(args: &DeleteArgs, data_dir: &Path) -> Result<u8> {
    let id = parse_id(&args.id)?;
    let mut inv = open_inventory(data_dir)?;
    if inv.delete_entry(id)? {
        println!("Deleted {id}.");
        Ok(0)
    } else {
        println!("No entry with id {id}.");
        Ok(1)
    }
}

pub fn run_reset(args: &ResetArgs, data_dir: &Path) -> Result<u8> {
    require_confirmation(args.yes, "resetting all entries")?;
    let mut inv = open_inventory(data_dir)?;
    let removed = inv.reset_entries()?;
    println!("Removed {removed} entries.");
    Ok(0)
}

fn parse_id(raw: &str) -> Result<EntryId> {
    match EntryId::parse(raw) {
        Some(id) => Ok(id),
        None => bail!("not an entry id: {raw:?}"),
    }
}
