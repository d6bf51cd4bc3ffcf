//! Tick-driven live statistics simulation.
//!
//! State never lives in a global: each tick takes the previous state and a
//! random source and returns the next state.

use crate::utils::config::SERIES_WINDOW;
use serde::{Deserialize, Serialize};

/// Source of uniform values in `[0, 1)`
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;
}

impl<R: rand::Rng + ?Sized> RandomSource for R {
    fn next_unit(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

/// Headline counters shown by the live monitor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveStats {
    pub active_offers: i64,
    pub students_placed: i64,
    pub companies_active: i64,
    /// LPA
    pub average_package: f64,
    /// Percentage in [0, 100]
    pub placement_rate: f64,
}

impl Default for LiveStats {
    fn default() -> Self {
        Self {
            active_offers: 1247,
            students_placed: 892,
            companies_active: 156,
            average_package: 12.5,
            placement_rate: 71.6,
        }
    }
}

/// One point of the rolling activity series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub label: String,
    pub offers: i64,
    pub placements: i64,
    pub companies: i64,
}

impl SeriesPoint {
    /// First point of a fresh series
    pub fn seed(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            offers: 120,
            placements: 85,
            companies: 25,
        }
    }
}

fn draw_below(rng: &mut dyn RandomSource, bound: f64) -> i64 {
    (rng.next_unit() * bound).floor() as i64
}

/// Advance the live counters by one tick
///
/// Draws five values, in field order. Counters only grow; the average
/// package is floored at 0 and the rate is clamped to [0, 100].
pub fn tick(prev: &LiveStats, rng: &mut dyn RandomSource) -> LiveStats {
    let active_offers = prev.active_offers + draw_below(rng, 5.0);
    let students_placed = prev.students_placed + draw_below(rng, 3.0);
    let companies_active = prev.companies_active + i64::from(rng.next_unit() > 0.8);
    let average_package = (prev.average_package + (rng.next_unit() - 0.5) * 0.1).max(0.0);
    let placement_rate = (prev.placement_rate + (rng.next_unit() - 0.5) * 0.5).clamp(0.0, 100.0);

    LiveStats {
        active_offers,
        students_placed,
        companies_active,
        average_package,
        placement_rate,
    }
}

/// Append one point to the series, keeping the last `SERIES_WINDOW` points
///
/// An empty series restarts from the seed point without drawing.
pub fn advance_series(
    series: &[SeriesPoint],
    label: impl Into<String>,
    rng: &mut dyn RandomSource,
) -> Vec<SeriesPoint> {
    let Some(last) = series.last() else {
        return vec![SeriesPoint::seed(label)];
    };

    let next = SeriesPoint {
        label: label.into(),
        offers: (last.offers + draw_below(rng, 20.0) + 10).max(0),
        placements: (last.placements + draw_below(rng, 15.0) + 8).max(0),
        companies: (last.companies + i64::from(rng.next_unit() > 0.7)).max(0),
    };

    let keep = SERIES_WINDOW.saturating_sub(1);
    let start = series.len().saturating_sub(keep);
    let mut out = series[start..].to_vec();
    out.push(next);
    out
}

/// Counters plus series, advanced together
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Simulation {
    pub stats: LiveStats,
    pub series: Vec<SeriesPoint>,
}

impl Simulation {
    pub fn new(stats: LiveStats) -> Self {
        Self {
            stats,
            series: Vec::new(),
        }
    }

    /// Run one tick of both the counters and the series
    pub fn step(&mut self, label: impl Into<String>, rng: &mut dyn RandomSource) {
        self.stats = tick(&self.stats, rng);
        self.series = advance_series(&self.series, label, rng);
    }
}
