//! # Reference List Subcommands
//!
//! - `stk import <file> [--delimiter D] [--with-quantity]` — replace the
//!   reference product list.
//! - `stk products [list | clear --yes]` — inspect or drop it.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use stk_core::ImportOptions;

use crate::{open_inventory, require_confirmation};

/// Arguments for `stk import`.
#[derive(Args, Debug)]
pub struct ImportArgs {
    /// Reference file, one `code<delim>name[<delim>quantity]` per line.
    pub file: PathBuf,

    /// Field delimiter.
    #[arg(long, short, default_value = ";")]
    pub delimiter: String,

    /// Read the third column as the expected quantity.
    #[arg(long)]
    pub with_quantity: bool,
}

/// Arguments for `stk products`.
#[derive(Args, Debug)]
pub struct ProductsArgs {
    #[command(subcommand)]
    pub command: Option<ProductsCommand>,
}

#[derive(Subcommand, Debug)]
pub enum ProductsCommand {
    /// Show the reference list (default).
    List,

    /// Drop the reference list and check-mode progress.
    Clear {
        #[arg(long)]
        yes: bool,
    },
}

pub fn run_import(args: &ImportArgs, data_dir: &Path) -> Result<u8> {
    let text = std::fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    let options = ImportOptions {
        delimiter: args.delimiter.clone(),
        include_quantity: args.with_quantity,
    };
    let mut inv = open_inventory(data_dir)?;
    let count = inv
        .import_products(&text, &options)
        .with_context(|| format!("failed to import {}", args.file.display()))?;
    println!("Imported {count} products.");
    Ok(0)
}

pub fn run_products(args: &ProductsArgs, data_dir: &Path) -> Result<u8> {
    match &args.command {
        None | Some(ProductsCommand::List) => {
            let inv = open_inventory(data_dir)?;
            if inv.products().is_empty() {
                println!("No reference list imported.");
                return Ok(0);
            }
            for p in inv.products() {
                match p.quantity {
                    Some(q) => println!("{:<20}  {:<30}  {q:>6}", p.code, p.name),
                    None => println!("{:<20}  {}", p.code, p.name),
                }
            }
            println!(
                "{} products, {} still to check",
                inv.products().len(),
                inv.remaining()
            );
            Ok(0)
        }
        Some(ProductsCommand::Clear { yes }) => {
            require_confirmation(*yes, "clearing the reference list")?;
            open_inventory(data_dir)?.clear_products()?;
            println!("Reference list cleared.");
            Ok(0)
        }
    }
}
