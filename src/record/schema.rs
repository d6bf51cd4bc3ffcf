//! Placement record definitions.
//!
//! One `PlacementRecord` exists per college × branch × year. These are the
//! base facts every view is computed from. Deserialization is
//! lenient: missing, `null` or string-encoded numbers all resolve to a value,
//! since upstream tables and uploads disagree on shape.

use log::warn;
use serde::{Deserialize, Deserializer, Serialize};

/// Per-recruiter breakdown inside a placement record
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyPlacement {
    /// Recruiter name
    #[serde(default, alias = "name", deserialize_with = "null_as_default")]
    pub company: String,

    /// Recruiter tier tag (e.g. "Tier 1")
    #[serde(default, deserialize_with = "null_as_default")]
    pub tier: String,

    /// Industry sector tag (e.g. "Technology")
    #[serde(default, deserialize_with = "null_as_default")]
    pub sector: String,

    /// Number of students placed with this recruiter
    #[serde(default, deserialize_with = "lenient_i64")]
    pub placements: i64,

    /// Mean package offered, in LPA
    #[serde(default, alias = "avg_package", deserialize_with = "lenient_f64")]
    pub avg_package: f64,

    #[serde(default, alias = "min_package", deserialize_with = "lenient_f64")]
    pub min_package: f64,

    #[serde(default, alias = "max_package", deserialize_with = "lenient_f64")]
    pub max_package: f64,
}

impl CompanyPlacement {
    pub fn new(company: impl Into<String>, placements: i64, avg_package: f64) -> Self {
        Self {
            company: company.into(),
            placements,
            avg_package,
            ..Default::default()
        }
    }

    pub fn with_tags(mut self, tier: impl Into<String>, sector: impl Into<String>) -> Self {
        self.tier = tier.into();
        self.sector = sector.into();
        self
    }

    pub fn with_range(mut self, min_package: f64, max_package: f64) -> Self {
        self.min_package = min_package;
        self.max_package = max_package;
        self
    }
}

/// Placement outcome of one branch of one college in one year
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementRecord {
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_opt_string")]
    pub id: Option<String>,

    #[serde(default, alias = "college_id", deserialize_with = "lenient_string")]
    pub college_id: String,

    #[serde(default, alias = "college_name", alias = "college", deserialize_with = "null_as_default")]
    pub college_name: String,

    /// Free-text program name, grouped by exact equality
    #[serde(default, deserialize_with = "null_as_default")]
    pub branch: String,

    #[serde(default, deserialize_with = "lenient_i32")]
    pub year: i32,

    #[serde(default, alias = "total_students", deserialize_with = "lenient_i64")]
    pub total_students: i64,

    #[serde(
        default,
        alias = "placed_students",
        alias = "placed",
        alias = "offers",
        deserialize_with = "lenient_i64"
    )]
    pub placed_students: i64,

    #[serde(default, alias = "avg_package", alias = "average_package", deserialize_with = "lenient_f64")]
    pub avg_package: f64,

    #[serde(default, alias = "highest_package", deserialize_with = "lenient_f64")]
    pub highest_package: f64,

    #[serde(default, alias = "lowest_package", deserialize_with = "lenient_f64")]
    pub lowest_package: f64,

    #[serde(default, alias = "median_package", deserialize_with = "lenient_f64")]
    pub median_package: f64,

    #[serde(default, alias = "avgCGPA", alias = "avg_cgpa", deserialize_with = "lenient_f64")]
    pub avg_cgpa: f64,

    #[serde(default, alias = "internship_offers", deserialize_with = "lenient_i64")]
    pub internship_offers: i64,

    #[serde(default, alias = "higher_studies", deserialize_with = "lenient_i64")]
    pub higher_studies: i64,

    /// Recruiter breakdown, owned by this record
    #[serde(default, alias = "company_placements", deserialize_with = "null_as_default")]
    pub company_placements: Vec<CompanyPlacement>,
}

impl PlacementRecord {
    /// Create a record with zeroed counts and packages
    pub fn new(
        college_id: impl Into<String>,
        college_name: impl Into<String>,
        branch: impl Into<String>,
        year: i32,
    ) -> Self {
        Self {
            college_id: college_id.into(),
            college_name: college_name.into(),
            branch: branch.into(),
            year,
            ..Default::default()
        }
    }

    pub fn with_counts(mut self, total_students: i64, placed_students: i64) -> Self {
        self.total_students = total_students;
        self.placed_students = placed_students;
        self
    }

    pub fn with_packages(mut self, avg_package: f64, highest_package: f64) -> Self {
        self.avg_package = avg_package;
        self.highest_package = highest_package;
        self
    }

    pub fn with_cgpa(mut self, avg_cgpa: f64) -> Self {
        self.avg_cgpa = avg_cgpa;
        self
    }

    pub fn with_company(mut self, placement: CompanyPlacement) -> Self {
        self.company_placements.push(placement);
        self
    }

    /// Describe data-quality defects in this record, if any.
    ///
    /// Defects are reported, never corrected.
    pub fn defects(&self) -> Vec<String> {
        let mut defects = Vec::new();
        if self.total_students < 0 {
            defects.push(format!("negative totalStudents ({})", self.total_students));
        }
        if self.placed_students < 0 {
            defects.push(format!("negative placedStudents ({})", self.placed_students));
        }
        if self.placed_students > self.total_students {
            defects.push(format!(
                "placedStudents ({}) exceeds totalStudents ({})",
                self.placed_students, self.total_students
            ));
        }
        if self.avg_package < 0.0 || self.highest_package < 0.0 {
            defects.push("negative package value".to_string());
        }
        for cp in &self.company_placements {
            if cp.placements < 0 {
                defects.push(format!("negative placements for {}", cp.company));
            }
        }
        defects
    }

    /// Human-readable key used in log lines
    pub fn label(&self) -> String {
        format!("{}/{}/{}", self.college_name, self.branch, self.year)
    }
}

// Lenient field readers. Numbers may arrive as JSON numbers, numeric
// strings, or null; anything unreadable becomes zero.

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(json_to_f64).unwrap_or(0.0))
}

fn lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(json_to_i64).unwrap_or(0))
}

fn lenient_i32<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(year_from_i64(value.as_ref().map(json_to_i64).unwrap_or(0)))
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_opt_string(deserializer)?.unwrap_or_default())
}

fn lenient_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Read a number from a JSON value (number or numeric string)
pub(crate) fn json_to_f64(value: &serde_json::Value) -> f64 {
    match value {
        serde_json::Value::Number(n) => n.as_f64().unwrap_or(0.0),
        serde_json::Value::String(s) => parse_f64_or_zero(s),
        serde_json::Value::Null => 0.0,
        other => {
            warn!("Expected number or string, found {}", other);
            0.0
        }
    }
}

fn json_to_i64(value: &serde_json::Value) -> i64 {
    match value {
        serde_json::Value::Number(n) => n
            .as_i64()
            .unwrap_or_else(|| n.as_f64().map(|f| f as i64).unwrap_or(0)),
        serde_json::Value::String(s) => parse_i64_or_zero(s),
        serde_json::Value::Null => 0,
        other => {
            warn!("Expected integer or string, found {}", other);
            0
        }
    }
}

/// Narrow a parsed year to i32; out-of-range values become 0
pub(crate) fn year_from_i64(raw: i64) -> i32 {
    i32::try_from(raw).unwrap_or_else(|_| {
        warn!("Year {} is out of range, using 0", raw);
        0
    })
}

/// Parse a decimal cell, falling back to zero
pub(crate) fn parse_f64_or_zero(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => {
            warn!("Could not parse '{}' as a number, using 0", trimmed);
            0.0
        }
    }
}

/// Parse an integer cell, accepting "12.0" style values
pub(crate) fn parse_i64_or_zero(raw: &str) -> i64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0;
    }
    match trimmed.parse::<i64>() {
        Ok(v) => v,
        Err(_) => parse_f64_or_zero(trimmed) as i64,
    }
}
