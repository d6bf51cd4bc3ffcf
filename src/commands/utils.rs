use super::models::FilterArgs;
use crate::import::{CsvFileSource, ImportOptions};
use crate::output::prepare_output_path;
use crate::record::{log_defects, JsonFileSource, PlacementRecord, RecordFilter, RecordSource};
use crate::utils::config::{load_config, FilterDefaults, ReportConfig, SCHEMA_VERSION};
use anyhow::{Context, Result};
use log::{debug, info};
use std::path::{Path, PathBuf};

/// Pick a record source by file extension
///
/// `.csv` goes through the CSV adapter; anything else is read as JSON.
pub fn open_source(path: &Path, options: ImportOptions) -> Box<dyn RecordSource> {
    let is_csv = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);

    if is_csv {
        Box::new(CsvFileSource::new(path, options))
    } else {
        Box::new(JsonFileSource::new(path))
    }
}

/// Load records from a file and log any data-quality defects
pub fn load_records(path: &Path, options: ImportOptions) -> Result<Vec<PlacementRecord>> {
    let source = open_source(path, options);
    debug!("Loading records from {}", source.describe());

    let records = source
        .load()
        .with_context(|| format!("Failed to load records from {}", path.display()))?;

    let defects = log_defects(&records);
    if defects > 0 {
        info!("{} data-quality defects found (kept as-is)", defects);
    }
    Ok(records)
}

/// Load the report configuration, or defaults when no file is given
pub fn load_report_config(path: Option<&Path>) -> Result<ReportConfig> {
    match path {
        Some(path) => {
            debug!("Loading config from {}", path.display());
            load_config(path).with_context(|| format!("Failed to load config {}", path.display()))
        }
        None => Ok(ReportConfig::default()),
    }
}

/// Merge CLI predicates over configured defaults
pub fn resolve_filter(cli: &FilterArgs, defaults: &FilterDefaults) -> RecordFilter {
    RecordFilter {
        year: cli.year.or(defaults.year),
        branch: cli.branch.clone().or_else(|| defaults.branch.clone()),
        college_id: cli.college_id.clone().or_else(|| defaults.college_id.clone()),
        min_cgpa: cli.min_cgpa.or(defaults.min_cgpa),
        min_package: cli.min_package.or(defaults.min_package),
        max_package: cli.max_package.or(defaults.max_package),
    }
}

/// Print to stdout, or write to a file when a path is given
pub fn emit(content: &str, output: Option<&PathBuf>) -> Result<()> {
    match output {
        Some(path) => {
            prepare_output_path(path)?;
            std::fs::write(path, format!("{}\n", content))
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("✓ Written to: {}", path.display());
        }
        None => println!("{}", content),
    }
    Ok(())
}

/// Validate a records file
pub fn validate_records_file(file_path: PathBuf, config: Option<PathBuf>) -> Result<()> {
    println!("Validating records: {}", file_path.display());

    let config = load_report_config(config.as_deref())?;
    let records = load_records(&file_path, ImportOptions::from(&config.import))?;
    let defects: usize = records.iter().map(|r| r.defects().len()).sum();

    let mut years: Vec<i32> = records.iter().map(|r| r.year).collect();
    years.sort_unstable();
    years.dedup();

    println!("✓ Valid records file");
    println!("  Records: {}", records.len());
    println!("  Years: {:?}", years);
    println!("  Defects: {}", defects);

    Ok(())
}

/// Display schema information
pub fn display_schema(show_details: bool) {
    println!("Placement Stats Report Schema");
    println!("Current Version: {}", SCHEMA_VERSION);
    println!();

    if show_details {
        println!("Report Envelope:");
        println!("  version: string          - Schema version (e.g., '1.0.0')");
        println!("  view: string             - summary | branches | colleges | trend |");
        println!("                             recruiters | sectors | tiers | compare");
        println!("  generatedAt: string      - ISO 8601 timestamp");
        println!("  data: object | array     - View output");
        println!();
        println!("Record Fields (input):");
        println!("  collegeId: string|number - Owning institution");
        println!("  collegeName: string");
        println!("  branch: string           - Grouped by exact equality");
        println!("  year: number");
        println!("  totalStudents: number");
        println!("  placedStudents: number");
        println!("  avgPackage: number       - LPA");
        println!("  highestPackage: number   - LPA");
        println!("  avgCgpa: number?");
        println!("  companyPlacements: array - {{company, tier, sector, placements,");
        println!("                             avgPackage, minPackage, maxPackage}}");
    } else {
        println!("Use --show for detailed schema information");
    }
}

/// Display version information
pub fn display_version() {
    println!("Placement Stats v{}", env!("CARGO_PKG_VERSION"));
    println!("Report Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Aggregation engine for college placement statistics.");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_filter_cli_wins() {
        let cli = FilterArgs {
            year: Some(2024),
            ..Default::default()
        };
        let defaults = FilterDefaults {
            year: Some(2022),
            branch: Some("CSE".to_string()),
            ..Default::default()
        };

        let filter = resolve_filter(&cli, &defaults);
        assert_eq!(filter.year, Some(2024));
        assert_eq!(filter.branch.as_deref(), Some("CSE"));
        assert_eq!(filter.college_id, None);
    }

    #[test]
    fn test_open_source_by_extension() {
        let csv = open_source(Path::new("data/Upload.CSV"), ImportOptions::new());
        assert!(csv.describe().starts_with("csv:"));

        let json = open_source(Path::new("records.json"), ImportOptions::new());
        assert!(json.describe().starts_with("json:"));
    }
}
