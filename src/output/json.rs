//! JSON report writer.
//!
//! Every report view is wrapped in the same envelope:
//! `{version, view, generatedAt, data}`.

use crate::record::PlacementRecord;
use crate::utils::config::SCHEMA_VERSION;
use crate::utils::error::OutputError;
use chrono::Utc;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Versioned envelope around one view's output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report<T> {
    /// Schema version
    pub version: String,

    /// View name (e.g. "branches")
    pub view: String,

    /// ISO 8601 timestamp
    pub generated_at: String,

    pub data: T,
}

impl<T: Serialize> Report<T> {
    pub fn new(view: impl Into<String>, data: T) -> Self {
        Self {
            version: SCHEMA_VERSION.to_string(),
            view: view.into(),
            generated_at: Utc::now().to_rfc3339(),
            data,
        }
    }
}

/// Write a report to a JSON file
///
/// **Public** - main entry point for JSON output
///
/// # Arguments
/// * `report` - Report to write
/// * `output_path` - Path to output JSON file
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
pub fn write_report<T: Serialize>(
    report: &Report<T>,
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();
    info!("Writing {} report to: {}", report.view, output_path.display());

    write_json(report, output_path)?;

    info!("Report written successfully ({} bytes)", file_size(output_path));
    Ok(())
}

/// Write a bare record collection as pretty JSON
///
/// The output loads back through `JsonFileSource`.
pub fn write_records(
    records: &[PlacementRecord],
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();
    info!("Writing {} records to: {}", records.len(), output_path.display());
    write_json(&records, output_path)
}

/// Serialize a report for stdout
pub fn report_to_string<T: Serialize>(report: &Report<T>) -> Result<String, OutputError> {
    Ok(serde_json::to_string_pretty(report)?)
}

fn write_json<T: Serialize + ?Sized>(value: &T, output_path: &Path) -> Result<(), OutputError> {
    prepare_output_path(output_path)?;

    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Validate an output path and create its parent directories
///
/// **Public** - shared by every file writer
///
/// # Errors
/// * `OutputError::InvalidPath` - Empty path, a directory, or an uncreatable parent
pub fn prepare_output_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    Ok(())
}

fn file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}
