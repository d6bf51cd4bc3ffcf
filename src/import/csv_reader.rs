//! CSV adapter: tabular uploads into placement records.
//!
//! Upload templates disagree on header spelling, so every column is located
//! through an alias list (see `utils::config`). Only the branch column is
//! mandatory; college and year may come from `ImportOptions` instead.

use super::ImportOptions;
use crate::record::schema::{parse_f64_or_zero, parse_i64_or_zero, year_from_i64};
use crate::record::{CompanyPlacement, PlacementRecord, RecordSource};
use crate::utils::config::*;
use crate::utils::error::SourceError;
use chrono::{Datelike, Utc};
use csv::{ReaderBuilder, StringRecord, Trim};
use log::{debug, info, warn};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Column positions resolved from the header row
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnMap {
    pub college_id: Option<usize>,
    pub college_name: Option<usize>,
    pub branch: usize,
    pub year: Option<usize>,
    pub total_students: Option<usize>,
    pub placed_students: Option<usize>,
    pub avg_package: Option<usize>,
    pub highest_package: Option<usize>,
    pub lowest_package: Option<usize>,
    pub median_package: Option<usize>,
    pub avg_cgpa: Option<usize>,
    pub companies: Option<usize>,
    pub internship_offers: Option<usize>,
    pub higher_studies: Option<usize>,
}

impl ColumnMap {
    /// Resolve every known column from a header row
    ///
    /// # Errors
    /// * `SourceError::MissingColumn` - If no branch column is present
    pub fn from_headers(headers: &StringRecord) -> Result<Self, SourceError> {
        let normalized: Vec<String> = headers
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').trim().to_lowercase())
            .collect();
        let find = |aliases: &[&str]| normalized.iter().position(|h| aliases.contains(&h.as_str()));

        let branch = find(BRANCH_HEADERS)
            .ok_or_else(|| SourceError::MissingColumn("Branch".to_string()))?;

        Ok(Self {
            college_id: find(COLLEGE_ID_HEADERS),
            college_name: find(COLLEGE_NAME_HEADERS),
            branch,
            year: find(YEAR_HEADERS),
            total_students: find(TOTAL_STUDENTS_HEADERS),
            placed_students: find(PLACED_STUDENTS_HEADERS),
            avg_package: find(AVG_PACKAGE_HEADERS),
            highest_package: find(HIGHEST_PACKAGE_HEADERS),
            lowest_package: find(LOWEST_PACKAGE_HEADERS),
            median_package: find(MEDIAN_PACKAGE_HEADERS),
            avg_cgpa: find(AVG_CGPA_HEADERS),
            companies: find(COMPANIES_HEADERS),
            internship_offers: find(INTERNSHIP_HEADERS),
            higher_studies: find(HIGHER_STUDIES_HEADERS),
        })
    }
}

fn cell(row: &StringRecord, idx: Option<usize>) -> &str {
    idx.and_then(|i| row.get(i)).unwrap_or("")
}

/// Split a companies cell on ',' or ';', dropping empty names
pub fn split_companies(raw: &str) -> Vec<String> {
    raw.split([',', ';'])
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Read placement records from any CSV stream
///
/// **Public** - shared by `CsvFileSource` and the import command
///
/// A row with no year cell and no configured default year is stamped with
/// the current calendar year.
///
/// # Arguments
/// * `reader` - CSV bytes with a header row
/// * `options` - Fallbacks for missing columns and the monetary unit
///
/// # Returns
/// One record per non-empty data row, in file order
///
/// # Errors
/// * `SourceError::CsvError` - If the CSV is malformed
/// * `SourceError::MissingColumn` - If there is no branch column
/// * `SourceError::MissingDefault` - If a row has no college and no default is set
pub fn read_csv_records<R: Read>(
    reader: R,
    options: &ImportOptions,
) -> Result<Vec<PlacementRecord>, SourceError> {
    let mut rdr = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let columns = ColumnMap::from_headers(rdr.headers()?)?;
    debug!("Resolved CSV columns: {:?}", columns);

    let mut records = Vec::new();
    for (idx, row) in rdr.records().enumerate() {
        let row = row?;
        // Header is line 1
        let lineno = idx + 2;

        if row.iter().all(|field| field.is_empty()) {
            continue;
        }

        records.push(parse_row(&row, &columns, options, lineno)?);
    }

    Ok(records)
}

fn parse_row(
    row: &StringRecord,
    columns: &ColumnMap,
    options: &ImportOptions,
    lineno: usize,
) -> Result<PlacementRecord, SourceError> {
    let branch = cell(row, Some(columns.branch)).to_string();
    if branch.is_empty() {
        warn!("Line {}: empty branch", lineno);
    }

    let name_cell = cell(row, columns.college_name);
    let id_cell = cell(row, columns.college_id);

    let college_name = if !name_cell.is_empty() {
        name_cell.to_string()
    } else if let Some(name) = &options.college_name {
        name.clone()
    } else {
        id_cell.to_string()
    };

    let college_id = if !id_cell.is_empty() {
        id_cell.to_string()
    } else if let Some(id) = &options.college_id {
        id.clone()
    } else if !college_name.is_empty() {
        college_name.clone()
    } else {
        return Err(SourceError::MissingDefault {
            row: lineno,
            field: "college",
        });
    };

    let year_cell = cell(row, columns.year);
    let year = if !year_cell.is_empty() {
        year_from_i64(parse_i64_or_zero(year_cell))
    } else if let Some(year) = options.year {
        year
    } else {
        let current = Utc::now().year();
        warn!("Line {}: no year and no default, using current year {}", lineno, current);
        current
    };

    let money = |idx: Option<usize>| options.package_unit.to_lakhs(parse_f64_or_zero(cell(row, idx)));

    let mut record = PlacementRecord::new(college_id, college_name, branch, year)
        .with_counts(
            parse_i64_or_zero(cell(row, columns.total_students)),
            parse_i64_or_zero(cell(row, columns.placed_students)),
        )
        .with_packages(money(columns.avg_package), money(columns.highest_package))
        .with_cgpa(parse_f64_or_zero(cell(row, columns.avg_cgpa)));
    record.lowest_package = money(columns.lowest_package);
    record.median_package = money(columns.median_package);
    record.internship_offers = parse_i64_or_zero(cell(row, columns.internship_offers));
    record.higher_studies = parse_i64_or_zero(cell(row, columns.higher_studies));
    record.id = Some(format!("{}-{}-{}", record.college_id, record.branch, record.year));

    for company in split_companies(cell(row, columns.companies)) {
        record = record.with_company(CompanyPlacement::new(company, 0, 0.0));
    }

    Ok(record)
}

/// CSV file on disk, read through the alias-aware adapter
#[derive(Debug, Clone)]
pub struct CsvFileSource {
    path: PathBuf,
    options: ImportOptions,
}

impl CsvFileSource {
    pub fn new(path: impl Into<PathBuf>, options: ImportOptions) -> Self {
        Self {
            path: path.into(),
            options,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordSource for CsvFileSource {
    fn load(&self) -> Result<Vec<PlacementRecord>, SourceError> {
        debug!("Reading CSV from: {}", self.path.display());

        let file = File::open(&self.path)?;
        let records = read_csv_records(file, &self.options)?;

        info!("Imported {} records from {}", records.len(), self.path.display());
        Ok(records)
    }

    fn describe(&self) -> String {
        format!("csv:{}", self.path.display())
    }
}
