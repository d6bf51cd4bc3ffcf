//! Configuration and constants for the engine and CLI.

use super::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Current report schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Default number of recruiters returned by the top-N view
pub const DEFAULT_TOP_N: usize = 10;

/// Default number of colleges returned by the college ranking
pub const DEFAULT_TOP_COLLEGES: usize = 10;

// All money inside the engine is lakhs per annum (LPA).
// 1 lakh = 100,000 rupees
pub const RUPEES_PER_LAKH: f64 = 100_000.0;

/// Number of points kept by the live monitor time series
pub const SERIES_WINDOW: usize = 6;

/// Decimal places used when rendering text tables
pub const DEFAULT_PRECISION: usize = 2;

// Header spellings accepted by the CSV adapter (compared case-insensitively).
// Different upload templates use different names for the same column.
pub const COLLEGE_ID_HEADERS: &[&str] = &["college id", "college_id", "collegeid"];
pub const COLLEGE_NAME_HEADERS: &[&str] = &["college", "college name", "college_name", "collegename"];
pub const BRANCH_HEADERS: &[&str] = &["branch", "program", "department"];
pub const YEAR_HEADERS: &[&str] = &["year", "academic year", "academic_year"];
pub const TOTAL_STUDENTS_HEADERS: &[&str] = &["total students", "total_students", "totalstudents", "students"];
pub const PLACED_STUDENTS_HEADERS: &[&str] = &[
    "placed students",
    "placed_students",
    "placedstudents",
    "placed",
    "offers",
];
pub const AVG_PACKAGE_HEADERS: &[&str] = &[
    "average package",
    "avg package",
    "avg_package",
    "avgpackage",
    "average_package",
];
pub const HIGHEST_PACKAGE_HEADERS: &[&str] = &["highest package", "highest_package", "highestpackage"];
pub const LOWEST_PACKAGE_HEADERS: &[&str] = &["lowest package", "lowest_package", "lowestpackage"];
pub const MEDIAN_PACKAGE_HEADERS: &[&str] = &["median package", "median_package", "medianpackage"];
pub const AVG_CGPA_HEADERS: &[&str] = &["avg cgpa", "avg_cgpa", "avgcgpa", "cgpa"];
pub const COMPANIES_HEADERS: &[&str] = &["companies", "recruiters"];
pub const INTERNSHIP_HEADERS: &[&str] = &["internship offers", "internship_offers", "internshipoffers", "internships"];
pub const HIGHER_STUDIES_HEADERS: &[&str] = &["higher studies", "higher_studies", "higherstudies"];

/// Header row written by the CSV exporter
pub const EXPORT_HEADERS: &[&str] = &[
    "College",
    "Branch",
    "Year",
    "Total Students",
    "Placed Students",
    "Placement %",
    "Avg Package",
    "Highest Package",
    "Companies",
];

/// Unit of the monetary columns in an uploaded file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PackageUnit {
    /// Already lakhs per annum (no conversion)
    #[default]
    Lakhs,
    /// Raw rupees, divided by [`RUPEES_PER_LAKH`] on import
    Rupees,
}

impl PackageUnit {
    /// Convert a value in this unit to lakhs per annum
    pub fn to_lakhs(self, value: f64) -> f64 {
        match self {
            PackageUnit::Lakhs => value,
            PackageUnit::Rupees => value / RUPEES_PER_LAKH,
        }
    }
}

impl std::str::FromStr for PackageUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lakhs" | "lpa" | "lakh" => Ok(Self::Lakhs),
            "rupees" | "inr" | "raw" => Ok(Self::Rupees),
            other => Err(format!("unknown package unit: {}", other)),
        }
    }
}

/// Complete report configuration, usually loaded from `report.toml`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ReportConfig {
    /// Number of recruiters in the top-N view
    #[serde(default)]
    pub top_n: Option<usize>,

    /// Decimal places for text output
    #[serde(default)]
    pub precision: Option<usize>,

    /// Default filter predicates
    #[serde(default)]
    pub filter: FilterDefaults,

    /// Defaults for the CSV adapter
    #[serde(default)]
    pub import: ImportDefaults,
}

/// Filter predicates that apply when the CLI does not override them
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FilterDefaults {
    pub year: Option<i32>,
    pub branch: Option<String>,
    pub college_id: Option<String>,
    pub min_cgpa: Option<f64>,
    pub min_package: Option<f64>,
    pub max_package: Option<f64>,
}

/// Import-time defaults for columns an uploaded file may not carry
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ImportDefaults {
    pub college_id: Option<String>,
    pub college_name: Option<String>,
    pub year: Option<i32>,
    pub package_unit: Option<PackageUnit>,
}

impl ReportConfig {
    pub fn top_n(&self) -> usize {
        self.top_n.unwrap_or(DEFAULT_TOP_N)
    }

    pub fn precision(&self) -> usize {
        self.precision.unwrap_or(DEFAULT_PRECISION)
    }
}

/// Load report configuration from a TOML file
///
/// # Errors
/// * `ConfigError::IoError` - If file cannot be read
/// * `ConfigError::ParseFailed` - If TOML is invalid
///
/// # Example
/// ```ignore
/// let config = load_config("report.toml")?;
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<ReportConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: ReportConfig = toml::from_str(&contents)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_package_unit_conversion() {
        assert_eq!(PackageUnit::Lakhs.to_lakhs(12.5), 12.5);
        assert_eq!(PackageUnit::Rupees.to_lakhs(1_250_000.0), 12.5);
    }

    #[test]
    fn test_package_unit_from_str() {
        assert_eq!("LPA".parse::<PackageUnit>().unwrap(), PackageUnit::Lakhs);
        assert_eq!("rupees".parse::<PackageUnit>().unwrap(), PackageUnit::Rupees);
        assert!("dollars".parse::<PackageUnit>().is_err());
    }

    #[test]
    fn test_parse_report_config() {
        let toml_str = r#"
            top_n = 5
            precision = 1

            [filter]
            year = 2024
            branch = "Computer Science"

            [import]
            college_name = "IIT Delhi"
            package_unit = "rupees"
        "#;

        let config: ReportConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.top_n(), 5);
        assert_eq!(config.precision(), 1);
        assert_eq!(config.filter.year, Some(2024));
        assert_eq!(config.filter.branch.as_deref(), Some("Computer Science"));
        assert_eq!(config.import.package_unit, Some(PackageUnit::Rupees));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: ReportConfig = toml::from_str("").unwrap();
        assert_eq!(config.top_n(), DEFAULT_TOP_N);
        assert_eq!(config.precision(), DEFAULT_PRECISION);
        assert!(config.filter.year.is_none());
    }
}
