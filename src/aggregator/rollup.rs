//! Grouping and rollup of placement records.
//!
//! Records are grouped by a key and reduced into accumulators holding
//! cumulative counts and placement-weighted sums. Groups are kept in a
//! `BTreeMap`, so iteration order depends only on the keys and never on the
//! order records arrived in.
//!
//! Example: two CSE records with (placed=10, avg=100) and (placed=30, avg=200)
//! accumulate a weighted sum of 7000 over 40 placements, i.e. an average of 175.

use super::metrics::PlacementMetrics;
use crate::record::{CompanyPlacement, PlacementRecord, RecordFilter};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Running totals for one group of placement records
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Accumulator {
    /// Number of records folded into this group
    pub record_count: usize,

    pub total_students: i64,
    pub placed_students: i64,

    /// Σ avgPackage × placedStudents
    pub weighted_package_sum: f64,

    /// Running max of highestPackage
    pub highest_package: f64,

    pub internship_offers: i64,
    pub higher_studies: i64,

    /// Distinct recruiter names
    pub companies: BTreeSet<String>,

    /// Distinct sector names
    pub sectors: BTreeSet<String>,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one record into the totals
    ///
    /// Counts saturate at the i64 bounds instead of overflowing.
    pub fn add_record(&mut self, record: &PlacementRecord) {
        self.record_count += 1;
        self.total_students = self.total_students.saturating_add(record.total_students);
        self.placed_students = self.placed_students.saturating_add(record.placed_students);
        self.weighted_package_sum += record.avg_package * record.placed_students as f64;
        self.highest_package = self.highest_package.max(record.highest_package);
        self.internship_offers = self.internship_offers.saturating_add(record.internship_offers);
        self.higher_studies = self.higher_studies.saturating_add(record.higher_studies);

        for cp in &record.company_placements {
            if !cp.company.is_empty() {
                self.companies.insert(cp.company.clone());
            }
            if !cp.sector.is_empty() {
                self.sectors.insert(cp.sector.clone());
            }
        }
    }

    /// Build a single accumulator over every record
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a PlacementRecord>,
    {
        let mut acc = Self::new();
        for record in records {
            acc.add_record(record);
        }
        acc
    }

    pub fn metrics(&self) -> PlacementMetrics {
        PlacementMetrics::from_accumulator(self)
    }
}

/// Group records by a key and accumulate each group
///
/// **Public** - generic entry point used by every record-level view
///
/// Only keys with at least one record appear in the result.
pub fn rollup_by<'a, K, I, F>(records: I, key: F) -> BTreeMap<K, Accumulator>
where
    K: Ord,
    I: IntoIterator<Item = &'a PlacementRecord>,
    F: Fn(&PlacementRecord) -> K,
{
    let mut groups: BTreeMap<K, Accumulator> = BTreeMap::new();
    for record in records {
        groups.entry(key(record)).or_default().add_record(record);
    }
    groups
}

/// Running totals for one group of recruiter placements
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompanyAccumulator {
    pub placements: i64,

    /// Σ avgPackage × placements
    pub weighted_package_sum: f64,

    /// Running max of maxPackage
    pub highest_package: f64,

    pub companies: BTreeSet<String>,

    // First tags observed for the group
    pub tier: String,
    pub sector: String,
}

impl CompanyAccumulator {
    pub fn add_placement(&mut self, cp: &CompanyPlacement) {
        if self.companies.is_empty() {
            self.tier = cp.tier.clone();
            self.sector = cp.sector.clone();
        }
        self.placements = self.placements.saturating_add(cp.placements);
        self.weighted_package_sum += cp.avg_package * cp.placements as f64;
        self.highest_package = self.highest_package.max(cp.max_package);
        if !cp.company.is_empty() {
            self.companies.insert(cp.company.clone());
        }
    }
}

/// Group every recruiter placement inside the records by a key
///
/// **Public** - used by the recruiter, sector, and tier views
///
/// Placements whose key is `None` (blank name, sector or tier) are skipped.
pub fn rollup_companies_by<'a, K, I, F>(records: I, key: F) -> BTreeMap<K, CompanyAccumulator>
where
    K: Ord,
    I: IntoIterator<Item = &'a PlacementRecord>,
    F: Fn(&CompanyPlacement) -> Option<K>,
{
    let mut groups: BTreeMap<K, CompanyAccumulator> = BTreeMap::new();
    for record in records {
        for cp in &record.company_placements {
            if let Some(k) = key(cp) {
                groups.entry(k).or_default().add_placement(cp);
            }
        }
    }
    groups
}

/// Key extractor for a tag, `None` when the tag is blank
pub fn non_blank(tag: &str) -> Option<String> {
    if tag.trim().is_empty() {
        None
    } else {
        Some(tag.to_string())
    }
}

/// Branch-level rollup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchRollup {
    pub branch: String,
    #[serde(flatten)]
    pub metrics: PlacementMetrics,
}

/// College-level rollup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollegeRollup {
    pub college_id: String,
    pub college_name: String,
    #[serde(flatten)]
    pub metrics: PlacementMetrics,
}

/// Roll up filtered records by branch, ordered by branch name
pub fn branch_rollups(records: &[PlacementRecord], filter: &RecordFilter) -> Vec<BranchRollup> {
    let filtered = filter.apply(records);
    debug!("Rolling up {} records by branch", filtered.len());

    rollup_by(filtered, |r| r.branch.clone())
        .into_iter()
        .map(|(branch, acc)| BranchRollup {
            branch,
            metrics: acc.metrics(),
        })
        .collect()
}

/// Roll up filtered records by college, ordered by college id
pub fn college_rollups(records: &[PlacementRecord], filter: &RecordFilter) -> Vec<CollegeRollup> {
    let filtered = filter.apply(records);
    debug!("Rolling up {} records by college", filtered.len());

    // The first name seen for an id wins
    let mut names: BTreeMap<&str, &str> = BTreeMap::new();
    for record in filtered.iter().copied() {
        names
            .entry(record.college_id.as_str())
            .or_insert(record.college_name.as_str());
    }

    rollup_by(filtered.iter().copied(), |r| r.college_id.clone())
        .into_iter()
        .map(|(college_id, acc)| CollegeRollup {
            college_name: names
                .get(college_id.as_str())
                .map(|n| n.to_string())
                .unwrap_or_default(),
            college_id,
            metrics: acc.metrics(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(college: &str, branch: &str, year: i32, total: i64, placed: i64, avg: f64) -> PlacementRecord {
        PlacementRecord::new(college, format!("College {}", college), branch, year)
            .with_counts(total, placed)
            .with_packages(avg, avg * 2.0)
    }

    #[test]
    fn test_rollup_by_branch_keys() {
        let records = vec![
            record("1", "ECE", 2024, 50, 40, 10.0),
            record("1", "CSE", 2024, 60, 55, 20.0),
            record("2", "CSE", 2024, 40, 30, 30.0),
        ];

        let groups = rollup_by(&records, |r| r.branch.clone());
        let keys: Vec<&String> = groups.keys().collect();
        assert_eq!(keys, vec!["CSE", "ECE"]);
        assert_eq!(groups["CSE"].record_count, 2);
        assert_eq!(groups["CSE"].placed_students, 85);
        assert_eq!(groups["CSE"].weighted_package_sum, 55.0 * 20.0 + 30.0 * 30.0);
    }

    #[test]
    fn test_rollup_empty_has_no_groups() {
        let groups = rollup_by(&[], |r: &PlacementRecord| r.year);
        assert!(groups.is_empty());
    }

    #[test]
    fn test_branch_rollups_weighted() {
        let records = vec![
            record("1", "CSE", 2024, 20, 10, 100.0),
            record("2", "CSE", 2024, 40, 30, 200.0),
            record("2", "CSE", 2023, 40, 30, 999.0),
        ];

        let rollups = branch_rollups(&records, &RecordFilter::new().with_year(2024));
        assert_eq!(rollups.len(), 1);
        assert_eq!(rollups[0].metrics.avg_package, 175.0);
        assert_eq!(rollups[0].metrics.placement_rate, 40.0 / 60.0 * 100.0);
    }

    #[test]
    fn test_college_rollups_names() {
        let records = vec![
            record("2", "CSE", 2024, 40, 30, 20.0),
            record("1", "CSE", 2024, 20, 10, 10.0),
            record("1", "ECE", 2024, 20, 20, 12.0),
        ];

        let rollups = college_rollups(&records, &RecordFilter::new());
        assert_eq!(rollups.len(), 2);
        assert_eq!(rollups[0].college_id, "1");
        assert_eq!(rollups[0].college_name, "College 1");
        assert_eq!(rollups[0].metrics.placed_students, 30);
        assert_eq!(rollups[1].college_id, "2");
    }

    #[test]
    fn test_company_rollup_tags_and_max() {
        let records = vec![
            PlacementRecord::new("1", "A", "CSE", 2024)
                .with_company(
                    CompanyPlacement::new("Google", 2, 50.0)
                        .with_tags("Tier 1", "Technology")
                        .with_range(40.0, 70.0),
                )
                .with_company(
                    CompanyPlacement::new("Google", 3, 60.0)
                        .with_tags("Tier 1", "Technology")
                        .with_range(48.0, 84.0),
                ),
        ];

        let groups = rollup_companies_by(&records, |cp| non_blank(&cp.company));
        let google = &groups["Google"];
        assert_eq!(google.placements, 5);
        assert_eq!(google.weighted_package_sum, 2.0 * 50.0 + 3.0 * 60.0);
        assert_eq!(google.highest_package, 84.0);
        assert_eq!(google.tier, "Tier 1");
    }

    #[test]
    fn test_huge_counts_saturate() {
        let records = vec![
            record("1", "CSE", 2024, 9_000_000_000_000_000_000, 9_000_000_000_000_000_000, 10.0),
            record("2", "CSE", 2024, 9_000_000_000_000_000_000, 9_000_000_000_000_000_000, 10.0),
        ];

        let rollups = branch_rollups(&records, &RecordFilter::new());
        assert_eq!(rollups[0].metrics.total_students, i64::MAX);
        assert_eq!(rollups[0].metrics.placed_students, i64::MAX);
        assert_eq!(rollups[0].metrics.placement_rate, 100.0);
    }

    #[test]
    fn test_blank_company_keys_skipped() {
        let records = vec![PlacementRecord::new("1", "A", "CSE", 2024)
            .with_company(CompanyPlacement::new("Google", 0, 0.0))
            .with_company(CompanyPlacement::new("TCS", 0, 0.0))];

        let by_sector = rollup_companies_by(&records, |cp| non_blank(&cp.sector));
        assert!(by_sector.is_empty());

        let by_company = rollup_companies_by(&records, |cp| non_blank(&cp.company));
        assert_eq!(by_company.len(), 2);
    }
}
