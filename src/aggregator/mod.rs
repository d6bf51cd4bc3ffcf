//! Aggregation of placement records into rollups, rankings and trends.
//!
//! This module transforms filtered records into:
//! - Branch and college rollups with derived metrics
//! - Recruiter, sector and tier rankings
//! - Per-year trend series
//! - Whole-set summaries and two-college comparisons
//!
//! Every function here is pure: same records and filter in, same output out.

pub mod metrics;
pub mod ranking;
pub mod rollup;
pub mod summary;
pub mod trend;

// Re-export main types and functions
pub use metrics::{placement_rate, weighted_average, PlacementMetrics};
pub use ranking::{
    rank_colleges, sector_rollups, tier_rollups, top_recruiters, CollegeSort, RecruiterRollup,
    SectorRollup, TierRollup,
};
pub use rollup::{
    branch_rollups, college_rollups, non_blank, rollup_by, rollup_companies_by, Accumulator,
    BranchRollup, CollegeRollup, CompanyAccumulator,
};
pub use summary::{compare_colleges, overall_summary, ComparisonRow, OverallSummary};
pub use trend::{latest_year, year_trend, YearTrendPoint};
