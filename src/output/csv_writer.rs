//! CSV export of placement records.
//!
//! The exported file re-imports through the CSV adapter. Rates and money
//! are formatted to two decimals here and nowhere earlier.

use super::json::prepare_output_path;
use crate::aggregator::placement_rate;
use crate::record::PlacementRecord;
use crate::utils::config::EXPORT_HEADERS;
use crate::utils::error::OutputError;
use csv::Writer;
use log::info;
use std::fs::File;
use std::io::Write;
use std::path::Path;

fn export_row(record: &PlacementRecord) -> Vec<String> {
    let companies: Vec<&str> = record
        .company_placements
        .iter()
        .map(|cp| cp.company.as_str())
        .collect();

    vec![
        record.college_name.clone(),
        record.branch.clone(),
        record.year.to_string(),
        record.total_students.to_string(),
        record.placed_students.to_string(),
        format!("{:.2}", placement_rate(record.placed_students, record.total_students)),
        format!("{:.2}", record.avg_package),
        format!("{:.2}", record.highest_package),
        companies.join("; "),
    ]
}

/// Write records as CSV to any writer
///
/// # Errors
/// * `OutputError::CsvFailed` - If a row cannot be encoded
/// * `OutputError::WriteFailed` - If flushing fails
pub fn export_csv<W: Write>(records: &[PlacementRecord], writer: W) -> Result<(), OutputError> {
    let mut wtr = Writer::from_writer(writer);
    wtr.write_record(EXPORT_HEADERS)?;
    for record in records {
        wtr.write_record(export_row(record))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write records to a CSV file
///
/// **Public** - main entry point for CSV export
pub fn write_csv(records: &[PlacementRecord], output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();
    info!("Exporting {} records to: {}", records.len(), output_path.display());

    prepare_output_path(output_path)?;
    let file = File::create(output_path)?;
    export_csv(records, file)
}
