//! Year-over-year trend series.

use super::metrics::PlacementMetrics;
use super::rollup::rollup_by;
use crate::record::{PlacementRecord, RecordFilter};
use log::debug;
use serde::{Deserialize, Serialize};

/// One point of the trend series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearTrendPoint {
    pub year: i32,
    #[serde(flatten)]
    pub metrics: PlacementMetrics,
}

/// Build the per-year series for the filtered records
///
/// **Public** - main entry point for the trend view
///
/// # Arguments
/// * `records` - Full record collection
/// * `filter` - Typically a college and/or branch restriction
/// * `years` - Explicit axis. When `None`, the axis is every year present
///   in the filtered records; years without data are not synthesized.
///   When given, every listed year appears, with zeroed metrics if no
///   record matches it.
///
/// # Returns
/// Points ordered by ascending year. Empty when no record matches the
/// filter, even with an explicit axis.
pub fn year_trend(
    records: &[PlacementRecord],
    filter: &RecordFilter,
    years: Option<&[i32]>,
) -> Vec<YearTrendPoint> {
    let filtered = filter.apply(records);
    let groups = rollup_by(filtered, |r| r.year);
    debug!("Trend over {} years with data", groups.len());

    if groups.is_empty() {
        return Vec::new();
    }

    match years {
        None => groups
            .into_iter()
            .map(|(year, acc)| YearTrendPoint {
                year,
                metrics: acc.metrics(),
            })
            .collect(),
        Some(years) => {
            let mut axis = years.to_vec();
            axis.sort_unstable();
            axis.dedup();
            axis.into_iter()
                .map(|year| YearTrendPoint {
                    year,
                    metrics: groups
                        .get(&year)
                        .map(|acc| acc.metrics())
                        .unwrap_or_default(),
                })
                .collect()
        }
    }
}

/// Latest year present in a collection
pub fn latest_year(records: &[PlacementRecord]) -> Option<i32> {
    records.iter().map(|r| r.year).max()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<PlacementRecord> {
        vec![
            PlacementRecord::new("1", "A", "CSE", 2024).with_counts(100, 90).with_packages(20.0, 50.0),
            PlacementRecord::new("1", "A", "CSE", 2022).with_counts(100, 80).with_packages(15.0, 40.0),
            PlacementRecord::new("2", "B", "CSE", 2024).with_counts(50, 25).with_packages(10.0, 60.0),
        ]
    }

    #[test]
    fn test_trend_years_ascending() {
        let trend = year_trend(&records(), &RecordFilter::new(), None);
        let years: Vec<i32> = trend.iter().map(|p| p.year).collect();
        assert_eq!(years, vec![2022, 2024]);
        assert_eq!(trend[1].metrics.highest_package, 60.0);
        assert_eq!(trend[1].metrics.placed_students, 115);
    }

    #[test]
    fn test_trend_does_not_synthesize_gaps() {
        let trend = year_trend(&records(), &RecordFilter::new(), None);
        assert!(trend.iter().all(|p| p.year != 2023));
    }

    #[test]
    fn test_trend_explicit_years_include_empty() {
        let trend = year_trend(&records(), &RecordFilter::new().with_college("2"), Some(&[2024, 2023]));
        assert_eq!(trend.len(), 2);
        assert_eq!(trend[0].year, 2023);
        assert_eq!(trend[0].metrics, PlacementMetrics::default());
        assert_eq!(trend[1].metrics.placement_rate, 50.0);
    }

    #[test]
    fn test_explicit_axis_on_empty_input_is_empty() {
        assert!(year_trend(&[], &RecordFilter::new(), Some(&[2023, 2024])).is_empty());
        let unmatched = RecordFilter::new().with_college("9");
        assert!(year_trend(&records(), &unmatched, Some(&[2024])).is_empty());
    }

    #[test]
    fn test_latest_year() {
        assert_eq!(latest_year(&records()), Some(2024));
        assert_eq!(latest_year(&[]), None);
    }
}
