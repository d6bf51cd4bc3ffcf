//! Record filtering.
//!
//! A filter is a conjunction of optional predicates. Absent predicates
//! impose no constraint, and the relative order of matching records is
//! preserved.

use super::schema::PlacementRecord;
use serde::{Deserialize, Serialize};

/// Predicate set applied before any grouping
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordFilter {
    pub year: Option<i32>,
    pub branch: Option<String>,
    pub college_id: Option<String>,
    #[serde(rename = "minCGPA")]
    pub min_cgpa: Option<f64>,
    pub min_package: Option<f64>,
    pub max_package: Option<f64>,
}

impl RecordFilter {
    /// Filter that accepts every record
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }

    pub fn with_college(mut self, college_id: impl Into<String>) -> Self {
        self.college_id = Some(college_id.into());
        self
    }

    pub fn with_min_cgpa(mut self, min_cgpa: f64) -> Self {
        self.min_cgpa = Some(min_cgpa);
        self
    }

    pub fn with_package_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min_package = min;
        self.max_package = max;
        self
    }

    /// True when no predicate is set
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Check whether a record satisfies every supplied predicate
    pub fn matches(&self, record: &PlacementRecord) -> bool {
        if let Some(year) = self.year {
            if record.year != year {
                return false;
            }
        }
        if let Some(branch) = &self.branch {
            if &record.branch != branch {
                return false;
            }
        }
        if let Some(college_id) = &self.college_id {
            if &record.college_id != college_id {
                return false;
            }
        }
        if let Some(min_cgpa) = self.min_cgpa {
            if record.avg_cgpa < min_cgpa {
                return false;
            }
        }
        if let Some(min_package) = self.min_package {
            if record.avg_package < min_package {
                return false;
            }
        }
        if let Some(max_package) = self.max_package {
            if record.avg_package > max_package {
                return false;
            }
        }
        true
    }

    /// Stable filter over a record collection
    pub fn apply<'a>(&self, records: &'a [PlacementRecord]) -> Vec<&'a PlacementRecord> {
        records.iter().filter(|r| self.matches(r)).collect()
    }
}
