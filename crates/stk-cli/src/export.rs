//! # Export Subcommand
//!
//! `stk export [--out DIR] [--format F] [--delimiter D] [--padding N]`
//! runs the license-gated export on a current-thread Tokio runtime and
//! writes `<prefix>_<YYYYMMDD>_<HHMM>.<ext>`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Args;

use stk_core::Timestamp;
use stk_export::{
    export_filename, ExportConfig, ExportGate, ExportOptions, HttpProbe, LocalRegistryCheck,
};

use crate::{license_service, open_inventory, write_output, FormatArg};

/// Arguments for `stk export`.
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Directory to write the export into.
    #[arg(long, default_value = ".")]
    pub out: PathBuf,

    /// Export file format.
    #[arg(long, value_enum, default_value_t = FormatArg::Txt)]
    pub format: FormatArg,

    /// Field delimiter between code and quantity.
    #[arg(long, short, default_value = ";")]
    pub delimiter: String,

    /// Left-pad quantities with zeros to this width (0 = no padding).
    #[arg(long, default_value_t = 0)]
    pub padding: usize,
}

pub fn run_export(args: &ExportArgs, data_dir: &Path) -> Result<u8> {
    let config = ExportConfig::from_env().context("invalid export configuration")?;
    let inv = open_inventory(data_dir)?;
    let service = Arc::new(license_service()?);
    let probe = HttpProbe::from_config(&config).context("failed to build connectivity probe")?;
    let gate = ExportGate::new(
        service,
        Arc::new(probe),
        Arc::new(LocalRegistryCheck::new(inv.registry().clone())),
    );
    let options = ExportOptions {
        delimiter: args.delimiter.clone(),
        format: args.format.into(),
        quantity_padding: args.padding,
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    let file = runtime
        .block_on(gate.export(
            inv.license_key(),
            inv.registry(),
            inv.entries(),
            &options,
            Timestamp::now(),
        ))
        .context("export refused")?;

    let name = export_filename(&config.file_prefix, Local::now().naive_local(), file.format);
    let path = write_output(&args.out, &name, &file.bytes)?;
    println!("Wrote {} ({}).", path.display(), file.mime_type());
    Ok(0)
}
