//! # stk CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use stk_cli::admin::{run_admin, AdminArgs};
use stk_cli::check::{run_check, CheckArgs};
use stk_cli::divergence::{run_divergence, DivergenceArgs};
use stk_cli::entries::{
    run_delete, run_list, run_reset, run_scan, run_update, DeleteArgs, ListArgs, ResetArgs,
    ScanArgs, UpdateArgs,
};
use stk_cli::export::{run_export, ExportArgs};
use stk_cli::license::{run_clear_cache, run_license, ClearCacheArgs, LicenseArgs};
use stk_cli::products::{run_import, run_products, ImportArgs, ProductsArgs};
use stk_cli::summary::{run_summary, SummaryArgs};
use stk_cli::DEFAULT_DATA_DIR;

/// Stocktake: inventory barcode counting.
///
/// Count barcodes, reconcile them against an imported reference list and
/// export the totals under a time-limited license.
#[derive(Parser, Debug)]
#[command(name = "stk", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Directory holding the stored session.
    #[arg(long, global = true, env = "STK_DATA_DIR", default_value = DEFAULT_DATA_DIR)]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Record a scanned barcode.
    Scan(ScanArgs),

    /// List scan entries.
    List(ListArgs),

    /// Change an entry's quantity.
    Update(UpdateArgs),

    /// Delete an entry.
    Delete(DeleteArgs),

    /// Delete every entry.
    Reset(ResetArgs),

    /// Per-code totals; find, set or remove a code's total.
    Summary(SummaryArgs),

    /// Import a reference product list.
    Import(ImportArgs),

    /// Show or clear the reference product list.
    Products(ProductsArgs),

    /// Scan against the reference product list.
    Check(CheckArgs),

    /// Compare counted quantities with the reference list.
    Divergence(DivergenceArgs),

    /// Export counted totals (requires a valid license and a connection).
    Export(ExportArgs),

    /// Activate, inspect or clear the license.
    License(LicenseArgs),

    /// Issue, list and revoke licenses (password protected).
    Admin(AdminArgs),

    /// Wipe all stored data, including licenses.
    ClearCache(ClearCacheArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity level.
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    tracing::debug!(data_dir = %cli.data_dir.display(), "stk starting");

    let data_dir = cli.data_dir.as_path();
    let result = match &cli.command {
        Commands::Scan(args) => run_scan(args, data_dir),
        Commands::List(args) => run_list(args, data_dir),
        Commands::Update(args) => run_update(args, data_dir),
        Commands::Delete(args) => run_delete(args, data_dir),
        Commands::Reset(args) => run_reset(args, data_dir),
        Commands::Summary(args) => run_summary(args, data_dir),
        Commands::Import(args) => run_import(args, data_dir),
        Commands::Products(args) => run_products(args, data_dir),
        Commands::Check(args) => run_check(args, data_dir),
        Commands::Divergence(args) => run_divergence(args, data_dir),
        Commands::Export(args) => run_export(args, data_dir),
        Commands::License(args) => run_license(args, data_dir),
        Commands::Admin(args) => run_admin(args, data_dir),
        Commands::ClearCache(args) => run_clear_cache(args, data_dir),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
