//! Import and export command implementations.
//!
//! `import` reads an uploaded CSV through the alias-aware adapter and writes
//! canonical JSON records. `export` goes the other way.

use super::models::{ExportArgs, ImportArgs};
use super::utils::{load_records, load_report_config, resolve_filter};
use crate::import::ImportOptions;
use crate::output::{write_csv, write_records};
use anyhow::{Context, Result};
use log::info;

/// Execute the import command
///
/// CLI options override the `[import]` section of the config file.
pub fn execute_import(args: ImportArgs) -> Result<()> {
    let config = load_report_config(args.config.as_deref())?;

    let mut options = ImportOptions::from(&config.import);
    if args.college_id.is_some() {
        options.college_id = args.college_id.clone();
    }
    if args.college_name.is_some() {
        options.college_name = args.college_name.clone();
    }
    if args.year.is_some() {
        options.year = args.year;
    }
    if let Some(unit) = args.unit {
        options.package_unit = unit;
    }

    info!("Importing {} ({:?} packages)", args.input.display(), options.package_unit);
    let records = load_records(&args.input, options)?;

    write_records(&records, &args.output).context("Failed to write records JSON")?;
    info!("✓ {} records written to: {}", records.len(), args.output.display());
    Ok(())
}

/// Execute the export command
pub fn execute_export(args: ExportArgs) -> Result<()> {
    let config = load_report_config(args.config.as_deref())?;
    let records = load_records(&args.input, ImportOptions::from(&config.import))?;

    let filter = resolve_filter(&args.filter, &config.filter);
    let selected: Vec<_> = filter.apply(&records).into_iter().cloned().collect();

    write_csv(&selected, &args.output).context("Failed to write CSV export")?;
    info!("✓ {} records exported to: {}", selected.len(), args.output.display());
    Ok(())
}

/// Validate import arguments
pub fn validate_import_args(args: &ImportArgs) -> Result<()> {
    if args.input.as_os_str().is_empty() {
        anyhow::bail!("Input path cannot be empty");
    }
    if args.output.as_os_str().is_empty() {
        anyhow::bail!("Output path cannot be empty");
    }
    if args.input == args.output {
        anyhow::bail!("Input and output must be different files");
    }
    Ok(())
}

/// Validate export arguments
pub fn validate_export_args(args: &ExportArgs) -> Result<()> {
    if args.output.as_os_str().is_empty() {
        anyhow::bail!("Output path cannot be empty");
    }
    if args.input == args.output {
        anyhow::bail!("Input and output must be different files");
    }
    Ok(())
}
