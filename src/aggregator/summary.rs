//! Whole-set summary and two-college comparison.

use super::metrics::PlacementMetrics;
use super::rollup::Accumulator;
use crate::record::{PlacementRecord, RecordFilter};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One rollup over the entire filtered set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallSummary {
    /// Number of records in the filtered set
    pub record_count: usize,

    /// Distinct colleges in the filtered set
    pub college_count: usize,

    /// Distinct recruiter sectors in the filtered set
    pub sector_count: usize,

    /// Total offers, equal to placed students
    pub total_offers: i64,

    pub internship_offers: i64,
    pub higher_studies: i64,

    #[serde(flatten)]
    pub metrics: PlacementMetrics,
}

/// Summarize every record matching the filter
///
/// **Public** - headline numbers for the dashboard
///
/// # Returns
/// `None` when no record matches, so callers can tell "no data" apart from
/// an all-zero year
pub fn overall_summary(records: &[PlacementRecord], filter: &RecordFilter) -> Option<OverallSummary> {
    let filtered = filter.apply(records);
    if filtered.is_empty() {
        debug!("No records match the summary filter");
        return None;
    }

    let colleges: BTreeSet<&str> = filtered.iter().map(|r| r.college_id.as_str()).collect();
    let acc = Accumulator::from_records(filtered.iter().copied());

    Some(OverallSummary {
        record_count: acc.record_count,
        college_count: colleges.len(),
        sector_count: acc.sectors.len(),
        total_offers: acc.placed_students,
        internship_offers: acc.internship_offers,
        higher_studies: acc.higher_studies,
        metrics: acc.metrics(),
    })
}

/// One metric compared across two colleges
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonRow {
    pub metric: String,
    /// `None` when the college has no matching records
    pub college_a: Option<f64>,
    pub college_b: Option<f64>,
}

const COMPARED_METRICS: [&str; 5] = [
    "placementRate",
    "avgPackage",
    "highestPackage",
    "totalOffers",
    "totalStudents",
];

fn metric_value(metrics: &PlacementMetrics, name: &str) -> f64 {
    match name {
        "placementRate" => metrics.placement_rate,
        "avgPackage" => metrics.avg_package,
        "highestPackage" => metrics.highest_package,
        "totalOffers" => metrics.placed_students as f64,
        "totalStudents" => metrics.total_students as f64,
        _ => 0.0,
    }
}

fn college_metrics(
    records: &[PlacementRecord],
    college_id: &str,
    filter: &RecordFilter,
) -> Option<PlacementMetrics> {
    let scoped = filter.clone().with_college(college_id);
    let matched = scoped.apply(records);
    if matched.is_empty() {
        None
    } else {
        Some(Accumulator::from_records(matched).metrics())
    }
}

/// Compare two colleges side by side under a shared filter
///
/// Any college restriction already in `filter` is replaced by the two ids.
/// Returns an empty list when neither college has matching records.
pub fn compare_colleges(
    records: &[PlacementRecord],
    college_a: &str,
    college_b: &str,
    filter: &RecordFilter,
) -> Vec<ComparisonRow> {
    let a = college_metrics(records, college_a, filter);
    let b = college_metrics(records, college_b, filter);

    if a.is_none() && b.is_none() {
        debug!("Neither {} nor {} has matching records", college_a, college_b);
        return Vec::new();
    }

    COMPARED_METRICS
        .iter()
        .map(|name| ComparisonRow {
            metric: name.to_string(),
            college_a: a.as_ref().map(|m| metric_value(m, name)),
            college_b: b.as_ref().map(|m| metric_value(m, name)),
        })
        .collect()
}
