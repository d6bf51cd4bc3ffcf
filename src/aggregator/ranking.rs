//! Ranking views: top recruiters, sector and tier rollups, college ranking.
//!
//! Every ordering here is total: ties on the primary key are broken by name
//! so the same input always produces the same list.

use super::metrics::weighted_average;
use super::rollup::{college_rollups, non_blank, rollup_companies_by, CollegeRollup, CompanyAccumulator};
use crate::record::{PlacementRecord, RecordFilter};
use log::debug;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Per-recruiter totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecruiterRollup {
    pub company: String,
    pub tier: String,
    pub sector: String,
    pub total_placements: i64,
    /// Placement-weighted mean package (LPA)
    pub avg_package: f64,
    /// Max of every maxPackage observed (LPA)
    pub highest_package: f64,
}

/// Per-sector totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectorRollup {
    pub sector: String,
    pub placements: i64,
    /// Distinct recruiters in the sector
    pub companies: usize,
    pub avg_package: f64,
}

/// Per-tier totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierRollup {
    pub tier: String,
    pub placements: i64,
    pub companies: usize,
    pub avg_package: f64,
}

/// Top-N recruiters by total placements
///
/// **Public** - main entry point for the recruiter view
///
/// # Arguments
/// * `records` - Full record collection
/// * `filter` - Usually one year, optionally one college
/// * `limit` - Maximum number of recruiters returned
///
/// # Returns
/// Recruiters sorted by placements (descending), ties by name (ascending)
pub fn top_recruiters(
    records: &[PlacementRecord],
    filter: &RecordFilter,
    limit: usize,
) -> Vec<RecruiterRollup> {
    let filtered = filter.apply(records);
    let groups = rollup_companies_by(filtered, |cp| non_blank(&cp.company));
    debug!("Ranking {} recruiters (limit {})", groups.len(), limit);

    let mut recruiters: Vec<RecruiterRollup> = groups
        .into_iter()
        .map(|(company, acc)| RecruiterRollup {
            company,
            avg_package: weighted_average(acc.weighted_package_sum, acc.placements),
            highest_package: acc.highest_package,
            total_placements: acc.placements,
            tier: acc.tier,
            sector: acc.sector,
        })
        .collect();

    recruiters.sort_by(|a, b| {
        b.total_placements
            .cmp(&a.total_placements)
            .then_with(|| a.company.cmp(&b.company))
    });
    recruiters.truncate(limit);
    recruiters
}

/// Sector rollup sorted by placements (descending), ties by sector name
pub fn sector_rollups(records: &[PlacementRecord], filter: &RecordFilter) -> Vec<SectorRollup> {
    let filtered = filter.apply(records);
    let mut sectors: Vec<SectorRollup> = rollup_companies_by(filtered, |cp| non_blank(&cp.sector))
        .into_iter()
        .map(|(sector, acc)| SectorRollup {
            sector,
            placements: acc.placements,
            companies: acc.companies.len(),
            avg_package: avg_of(&acc),
        })
        .collect();

    sectors.sort_by(|a, b| {
        b.placements
            .cmp(&a.placements)
            .then_with(|| a.sector.cmp(&b.sector))
    });
    sectors
}

/// Tier rollup sorted by placements (descending), ties by tier name
pub fn tier_rollups(records: &[PlacementRecord], filter: &RecordFilter) -> Vec<TierRollup> {
    let filtered = filter.apply(records);
    let mut tiers: Vec<TierRollup> = rollup_companies_by(filtered, |cp| non_blank(&cp.tier))
        .into_iter()
        .map(|(tier, acc)| TierRollup {
            tier,
            placements: acc.placements,
            companies: acc.companies.len(),
            avg_package: avg_of(&acc),
        })
        .collect();

    tiers.sort_by(|a, b| b.placements.cmp(&a.placements).then_with(|| a.tier.cmp(&b.tier)));
    tiers
}

fn avg_of(acc: &CompanyAccumulator) -> f64 {
    weighted_average(acc.weighted_package_sum, acc.placements)
}

/// Sort key for the college ranking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollegeSort {
    #[default]
    PlacementRate,
    AvgPackage,
    TotalStudents,
    Name,
}

impl std::str::FromStr for CollegeSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "placement_rate" | "rate" => Ok(Self::PlacementRate),
            "avg_package" | "package" => Ok(Self::AvgPackage),
            "total_students" | "students" => Ok(Self::TotalStudents),
            "name" => Ok(Self::Name),
            other => Err(format!("unknown sort key: {}", other)),
        }
    }
}

/// Rank colleges by the given key
///
/// Numeric keys sort descending, `Name` ascending. Ties fall back to college
/// name, then college id. `limit` of `None` keeps every college.
pub fn rank_colleges(
    records: &[PlacementRecord],
    filter: &RecordFilter,
    sort: CollegeSort,
    limit: Option<usize>,
) -> Vec<CollegeRollup> {
    let mut colleges = college_rollups(records, filter);

    colleges.sort_by(|a, b| {
        let primary = match sort {
            CollegeSort::PlacementRate => b.metrics.placement_rate.total_cmp(&a.metrics.placement_rate),
            CollegeSort::AvgPackage => b.metrics.avg_package.total_cmp(&a.metrics.avg_package),
            CollegeSort::TotalStudents => b.metrics.total_students.cmp(&a.metrics.total_students),
            CollegeSort::Name => Ordering::Equal,
        };
        primary
            .then_with(|| a.college_name.cmp(&b.college_name))
            .then_with(|| a.college_id.cmp(&b.college_id))
    });

    if let Some(limit) = limit {
        colleges.truncate(limit);
    }
    colleges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::CompanyPlacement;

    fn record_with(companies: &[(&str, i64, f64)]) -> PlacementRecord {
        let mut record = PlacementRecord::new("1", "A", "CSE", 2024);
        for (name, placements, avg) in companies {
            record = record.with_company(
                CompanyPlacement::new(*name, *placements, *avg)
                    .with_tags("Tier 1", "Technology")
                    .with_range(avg * 0.8, avg * 1.4),
            );
        }
        record
    }

    #[test]
    fn test_top_recruiters_tie_break_and_truncate() {
        let records = vec![record_with(&[
            ("B", 50, 10.0),
            ("A", 10, 10.0),
            ("C", 50, 10.0),
            ("D", 30, 10.0),
            ("E", 5, 10.0),
        ])];

        let top = top_recruiters(&records, &RecordFilter::new(), 3);
        let names: Vec<&str> = top.iter().map(|r| r.company.as_str()).collect();
        assert_eq!(names, vec!["B", "C", "D"]);
        assert_eq!(top[0].total_placements, 50);
    }

    #[test]
    fn test_top_recruiters_weighted_across_records() {
        let records = vec![
            record_with(&[("Google", 1, 100.0)]),
            record_with(&[("Google", 3, 200.0)]),
        ];

        let top = top_recruiters(&records, &RecordFilter::new(), 10);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].total_placements, 4);
        assert_eq!(top[0].avg_package, 175.0);
        assert_eq!(top[0].highest_package, 280.0);
    }

    #[test]
    fn test_zero_placement_recruiter_avg_is_zero() {
        let records = vec![record_with(&[("Ghost", 0, 50.0)])];
        let top = top_recruiters(&records, &RecordFilter::new(), 10);
        assert_eq!(top[0].avg_package, 0.0);
    }

    #[test]
    fn test_sector_rollups_sorted() {
        let mut records = vec![record_with(&[("Google", 10, 50.0), ("Microsoft", 5, 40.0)])];
        records[0].company_placements.push(
            CompanyPlacement::new("Goldman Sachs", 20, 60.0).with_tags("Tier 1", "Finance"),
        );

        let sectors = sector_rollups(&records, &RecordFilter::new());
        assert_eq!(sectors.len(), 2);
        assert_eq!(sectors[0].sector, "Finance");
        assert_eq!(sectors[0].placements, 20);
        assert_eq!(sectors[1].sector, "Technology");
        assert_eq!(sectors[1].companies, 2);
        assert_eq!(sectors[1].avg_package, (10.0 * 50.0 + 5.0 * 40.0) / 15.0);
    }

    #[test]
    fn test_tier_rollups() {
        let mut records = vec![record_with(&[("Google", 10, 50.0)])];
        records[0]
            .company_placements
            .push(CompanyPlacement::new("TCS", 10, 5.0).with_tags("Tier 2", "Technology"));

        let tiers = tier_rollups(&records, &RecordFilter::new());
        let names: Vec<&str> = tiers.iter().map(|t| t.tier.as_str()).collect();
        assert_eq!(names, vec!["Tier 1", "Tier 2"]);
    }

    #[test]
    fn test_rank_colleges_by_rate() {
        let records = vec![
            PlacementRecord::new("1", "Zeta", "CSE", 2024).with_counts(100, 90),
            PlacementRecord::new("2", "Alpha", "CSE", 2024).with_counts(100, 90),
            PlacementRecord::new("3", "Beta", "CSE", 2024).with_counts(100, 95),
        ];

        let ranked = rank_colleges(&records, &RecordFilter::new(), CollegeSort::PlacementRate, Some(2));
        let names: Vec<&str> = ranked.iter().map(|c| c.college_name.as_str()).collect();
        assert_eq!(names, vec!["Beta", "Alpha"]);

        let by_name = rank_colleges(&records, &RecordFilter::new(), CollegeSort::Name, None);
        assert_eq!(by_name[0].college_name, "Alpha");
        assert_eq!(by_name.len(), 3);
    }

    #[test]
    fn test_untagged_companies_have_no_sector_or_tier() {
        let records = vec![PlacementRecord::new("1", "A", "CSE", 2024)
            .with_company(CompanyPlacement::new("Google", 0, 0.0))
            .with_company(CompanyPlacement::new("TCS", 0, 0.0))];

        assert!(sector_rollups(&records, &RecordFilter::new()).is_empty());
        assert!(tier_rollups(&records, &RecordFilter::new()).is_empty());
        assert_eq!(top_recruiters(&records, &RecordFilter::new(), 10).len(), 2);
    }

    #[test]
    fn test_college_sort_from_str() {
        assert_eq!("placement-rate".parse::<CollegeSort>().unwrap(), CollegeSort::PlacementRate);
        assert_eq!("students".parse::<CollegeSort>().unwrap(), CollegeSort::TotalStudents);
        assert!("vibes".parse::<CollegeSort>().is_err());
    }
}
