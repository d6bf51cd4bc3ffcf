//! Output writers for reports and exports.
//!
//! This module handles writing data to disk or stdout in various formats:
//! - JSON reports wrapped in a versioned envelope
//! - CSV exports that re-import through the CSV adapter
//! - Text tables

pub mod csv_writer;
pub mod json;
pub mod table;

// Re-export main functions
pub use csv_writer::{export_csv, write_csv};
pub use json::{prepare_output_path, report_to_string, write_records, write_report, Report};
pub use table::{render_table, TableRow};
