//! # License Subcommands
//!
//! - `stk license activate <key>` — validate and store the active key.
//! - `stk license status` — re-validate the stored key.
//! - `stk license clear --yes` — forget the stored key.
//! - `stk clear-cache --yes` — wipe every stored blob.

use std::path::Path;

use anyhow::Result;
use clap::{Args, Subcommand};

use stk_core::Timestamp;
use stk_license::LicenseCheck;

use crate::{license_service, open_inventory, require_confirmation};

/// Arguments for `stk license`.
#[derive(Args, Debug)]
pub struct LicenseArgs {
    #[command(subcommand)]
    pub command: LicenseCommand,
}

#[derive(Subcommand, Debug)]
pub enum LicenseCommand {
    /// Validate a key and store it as the active license.
    Activate { key: String },

    /// Show whether the stored license is valid and for how long.
    Status,

    /// Forget the stored license.
    Clear {
        #[arg(long)]
        yes: bool,
    },
}

/// Arguments for `stk clear-cache`.
#[derive(Args, Debug)]
pub struct ClearCacheArgs {
    /// Confirm wiping all stored data.
    #[arg(long)]
    pub yes: bool,
}

pub fn run_license(args: &LicenseArgs, data_dir: &Path) -> Result<u8> {
    let service = license_service()?;
    let mut inv = open_inventory(data_dir)?;
    let now = Timestamp::now();

    match &args.command {
        LicenseCommand::Activate { key } => {
            let check = inv.activate_license(&service, key, now)?;
            println!("License activated.");
            print_check(&check, now);
            Ok(0)
        }
        LicenseCommand::Status => {
            let check = inv.license_status(&service, now);
            print_check(&check, now);
            Ok(if check.is_valid { 0 } else { 1 })
        }
        LicenseCommand::Clear { yes } => {
            require_confirmation(*yes, "clearing the active license")?;
            inv.clear_license()?;
            println!("Active license cleared.");
            Ok(0)
        }
    }
}

pub fn run_clear_cache(args: &ClearCacheArgs, data_dir: &Path) -> Result<u8> {
    require_confirmation(args.yes, "clearing all stored data")?;
    open_inventory(data_dir)?.clear_all()?;
    println!("All stored data cleared.");
    Ok(0)
}

fn print_check(check: &LicenseCheck, now: Timestamp) {
    println!("Status:    {}", check.reason);
    if let Some(exp) = check.expiration_date {
        println!("Expires:   {exp}");
    }
    if check.is_valid {
        println!("Remaining: {} days", check.days_remaining(now));
    }
    if check.is_admin {
        println!("Type:      admin");
    }
}
