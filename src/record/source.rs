//! Record sources.
//!
//! Records reach the engine either as an in-memory fixture or loaded from a
//! file. Once loaded, every source yields the same `Vec<PlacementRecord>`.

use super::schema::PlacementRecord;
use crate::utils::error::SourceError;
use log::{debug, info, warn};
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Anything that can resolve to a materialized record collection
pub trait RecordSource {
    /// Load the full record collection into memory
    fn load(&self) -> Result<Vec<PlacementRecord>, SourceError>;

    /// Short description for log lines
    fn describe(&self) -> String;
}

/// Records already resident in memory
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    records: Vec<PlacementRecord>,
}

impl InMemorySource {
    pub fn new(records: Vec<PlacementRecord>) -> Self {
        Self { records }
    }
}

impl RecordSource for InMemorySource {
    fn load(&self) -> Result<Vec<PlacementRecord>, SourceError> {
        Ok(self.records.clone())
    }

    fn describe(&self) -> String {
        format!("in-memory ({} records)", self.records.len())
    }
}

/// JSON file holding either a bare array of records or `{"records": [...]}`
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RecordsFile {
    Bare(Vec<PlacementRecord>),
    Wrapped { records: Vec<PlacementRecord> },
}

impl RecordSource for JsonFileSource {
    fn load(&self) -> Result<Vec<PlacementRecord>, SourceError> {
        debug!("Reading records from: {}", self.path.display());

        let file = File::open(&self.path)?;
        let parsed: RecordsFile =
            serde_json::from_reader(BufReader::new(file)).map_err(|e| {
                if e.is_data() {
                    SourceError::InvalidFormat(format!(
                        "{}: expected an array of records or {{\"records\": [...]}}",
                        self.path.display()
                    ))
                } else {
                    SourceError::JsonError(e)
                }
            })?;
        let records = match parsed {
            RecordsFile::Bare(records) => records,
            RecordsFile::Wrapped { records } => records,
        };

        info!("Loaded {} records from {}", records.len(), self.path.display());
        Ok(records)
    }

    fn describe(&self) -> String {
        format!("json:{}", self.path.display())
    }
}

/// Log every data-quality defect in a collection and return the defect count
///
/// **Public** - used by the validate command and before every report
pub fn log_defects(records: &[PlacementRecord]) -> usize {
    let mut count = 0;
    for record in records {
        for defect in record.defects() {
            warn!("{}: {}", record.label(), defect);
            count += 1;
        }
    }
    count
}
