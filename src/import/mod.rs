//! Import adapters that translate uploaded tables into placement records.

pub mod csv_reader;

pub use csv_reader::{read_csv_records, split_companies, ColumnMap, CsvFileSource};

use crate::utils::config::{ImportDefaults, PackageUnit};

/// Fallbacks and unit handling for an import
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportOptions {
    /// Used when the file has no college id column
    pub college_id: Option<String>,
    /// Used when the file has no college name column
    pub college_name: Option<String>,
    /// Used when the file has no year column
    pub year: Option<i32>,
    /// Unit of every monetary column
    pub package_unit: PackageUnit,
}

impl ImportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_college(mut self, college_id: impl Into<String>, college_name: impl Into<String>) -> Self {
        self.college_id = Some(college_id.into());
        self.college_name = Some(college_name.into());
        self
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_unit(mut self, unit: PackageUnit) -> Self {
        self.package_unit = unit;
        self
    }
}

impl From<&ImportDefaults> for ImportOptions {
    fn from(defaults: &ImportDefaults) -> Self {
        Self {
            college_id: defaults.college_id.clone(),
            college_name: defaults.college_name.clone(),
            year: defaults.year,
            package_unit: defaults.package_unit.unwrap_or_default(),
        }
    }
}
