//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the library layers: load records, run a view,
//! write the result.

pub mod import;
pub mod models;
pub mod monitor;
pub mod report;
pub mod utils;

// Re-export main command functions
pub use import::{execute_export, execute_import, validate_export_args, validate_import_args};
pub use models::{ExportArgs, FilterArgs, ImportArgs, ReportArgs, ReportView, SimulateArgs};
pub use monitor::{execute_simulate, run_simulation, validate_simulate_args};
pub use report::{execute_report, render_view, run_report, validate_args, RenderedReport};
pub use utils::{display_schema, display_version, validate_records_file};
