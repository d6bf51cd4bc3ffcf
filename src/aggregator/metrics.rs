//! Derived metrics: rates and weighted averages.
//!
//! Every division here has a zero-denominator rule so that no metric is ever
//! NaN or infinite. Values are not rounded; rounding happens once, when a
//! report is rendered.

use super::rollup::Accumulator;
use serde::{Deserialize, Serialize};

/// Placement rate as a percentage
///
/// Returns 0 when `total_students` is zero or negative. Inconsistent inputs
/// (placed > total) are passed through and may exceed 100.
pub fn placement_rate(placed_students: i64, total_students: i64) -> f64 {
    if total_students > 0 {
        (placed_students as f64 / total_students as f64) * 100.0
    } else {
        0.0
    }
}

/// Weighted mean from a running weighted sum
///
/// Returns 0 when the total weight is zero or negative.
pub fn weighted_average(weighted_sum: f64, total_weight: i64) -> f64 {
    if total_weight > 0 {
        weighted_sum / total_weight as f64
    } else {
        0.0
    }
}

/// Metrics derived from one accumulator
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementMetrics {
    /// Sum of students across the group
    pub total_students: i64,

    /// Sum of placed students across the group
    pub placed_students: i64,

    /// placed / total × 100
    pub placement_rate: f64,

    /// Placement-weighted mean package (LPA)
    pub avg_package: f64,

    /// Highest package seen in the group (LPA)
    pub highest_package: f64,

    /// Distinct recruiters seen in the group
    pub company_count: usize,
}

impl PlacementMetrics {
    /// Derive metrics from an accumulator
    ///
    /// **Public** - shared by every grouped view
    pub fn from_accumulator(acc: &Accumulator) -> Self {
        Self {
            total_students: acc.total_students,
            placed_students: acc.placed_students,
            placement_rate: placement_rate(acc.placed_students, acc.total_students),
            avg_package: weighted_average(acc.weighted_package_sum, acc.placed_students),
            highest_package: acc.highest_package,
            company_count: acc.companies.len(),
        }
    }
}
