//! Plain-text tables for terminal output.
//!
//! Numbers are rounded here, once, to the configured precision.

use crate::aggregator::{
    BranchRollup, CollegeRollup, ComparisonRow, OverallSummary, RecruiterRollup, SectorRollup,
    TierRollup, YearTrendPoint,
};
use crate::monitor::{LiveStats, SeriesPoint};
use crate::utils::round_to;

/// A value type that renders as one table row
pub trait TableRow {
    fn headers() -> Vec<&'static str>;
    fn cells(&self, precision: usize) -> Vec<String>;
}

fn num(value: f64, precision: usize) -> String {
    format!("{:.*}", precision, round_to(value, precision))
}

fn pct(value: f64, precision: usize) -> String {
    format!("{}%", num(value, precision))
}

fn opt_num(value: Option<f64>, precision: usize) -> String {
    value.map(|v| num(v, precision)).unwrap_or_else(|| "-".to_string())
}

/// Render rows as a boxed table
///
/// The first column is left-aligned, the rest right-aligned.
pub fn render_table<T: TableRow>(title: &str, rows: &[T], precision: usize) -> String {
    let headers = T::headers();
    let body: Vec<Vec<String>> = rows.iter().map(|r| r.cells(precision)).collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &body {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }

    let rule = |left: &str, mid: &str, right: &str| {
        let segments: Vec<String> = widths.iter().map(|w| "━".repeat(w + 2)).collect();
        format!("  {}{}{}", left, segments.join(mid), right)
    };
    let line = |cells: &[String]| {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .enumerate()
            .map(|(i, (cell, w))| {
                if i == 0 {
                    format!(" {:<w$} ", cell, w = *w)
                } else {
                    format!(" {:>w$} ", cell, w = *w)
                }
            })
            .collect();
        format!("  ┃{}┃", padded.join("┃"))
    };

    let header_cells: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    let mut lines = vec![format!("  {}", title), rule("┏", "┳", "┓"), line(&header_cells), rule("┣", "╋", "┫")];
    if body.is_empty() {
        lines.push("  (no data)".to_string());
    }
    for row in &body {
        lines.push(line(row));
    }
    lines.push(rule("┗", "┻", "┛"));
    lines.join("\n")
}

impl TableRow for BranchRollup {
    fn headers() -> Vec<&'static str> {
        vec!["Branch", "Students", "Placed", "Rate", "Avg LPA", "Highest LPA", "Companies"]
    }

    fn cells(&self, p: usize) -> Vec<String> {
        vec![
            self.branch.clone(),
            self.metrics.total_students.to_string(),
            self.metrics.placed_students.to_string(),
            pct(self.metrics.placement_rate, p),
            num(self.metrics.avg_package, p),
            num(self.metrics.highest_package, p),
            self.metrics.company_count.to_string(),
        ]
    }
}

impl TableRow for CollegeRollup {
    fn headers() -> Vec<&'static str> {
        vec!["College", "Id", "Students", "Placed", "Rate", "Avg LPA", "Highest LPA", "Companies"]
    }

    fn cells(&self, p: usize) -> Vec<String> {
        vec![
            self.college_name.clone(),
            self.college_id.clone(),
            self.metrics.total_students.to_string(),
            self.metrics.placed_students.to_string(),
            pct(self.metrics.placement_rate, p),
            num(self.metrics.avg_package, p),
            num(self.metrics.highest_package, p),
            self.metrics.company_count.to_string(),
        ]
    }
}

impl TableRow for YearTrendPoint {
    fn headers() -> Vec<&'static str> {
        vec!["Year", "Students", "Placed", "Rate", "Avg LPA", "Highest LPA", "Companies"]
    }

    fn cells(&self, p: usize) -> Vec<String> {
        vec![
            self.year.to_string(),
            self.metrics.total_students.to_string(),
            self.metrics.placed_students.to_string(),
            pct(self.metrics.placement_rate, p),
            num(self.metrics.avg_package, p),
            num(self.metrics.highest_package, p),
            self.metrics.company_count.to_string(),
        ]
    }
}

impl TableRow for RecruiterRollup {
    fn headers() -> Vec<&'static str> {
        vec!["Company", "Tier", "Sector", "Placements", "Avg LPA", "Highest LPA"]
    }

    fn cells(&self, p: usize) -> Vec<String> {
        vec![
            self.company.clone(),
            self.tier.clone(),
            self.sector.clone(),
            self.total_placements.to_string(),
            num(self.avg_package, p),
            num(self.highest_package, p),
        ]
    }
}

impl TableRow for SectorRollup {
    fn headers() -> Vec<&'static str> {
        vec!["Sector", "Placements", "Companies", "Avg LPA"]
    }

    fn cells(&self, p: usize) -> Vec<String> {
        vec![
            self.sector.clone(),
            self.placements.to_string(),
            self.companies.to_string(),
            num(self.avg_package, p),
        ]
    }
}

impl TableRow for TierRollup {
    fn headers() -> Vec<&'static str> {
        vec!["Tier", "Placements", "Companies", "Avg LPA"]
    }

    fn cells(&self, p: usize) -> Vec<String> {
        vec![
            self.tier.clone(),
            self.placements.to_string(),
            self.companies.to_string(),
            num(self.avg_package, p),
        ]
    }
}

impl TableRow for ComparisonRow {
    fn headers() -> Vec<&'static str> {
        vec!["Metric", "College A", "College B"]
    }

    fn cells(&self, p: usize) -> Vec<String> {
        vec![
            self.metric.clone(),
            opt_num(self.college_a, p),
            opt_num(self.college_b, p),
        ]
    }
}

impl TableRow for OverallSummary {
    fn headers() -> Vec<&'static str> {
        vec![
            "Records",
            "Colleges",
            "Students",
            "Offers",
            "Rate",
            "Avg LPA",
            "Highest LPA",
            "Companies",
            "Sectors",
        ]
    }

    fn cells(&self, p: usize) -> Vec<String> {
        vec![
            self.record_count.to_string(),
            self.college_count.to_string(),
            self.metrics.total_students.to_string(),
            self.total_offers.to_string(),
            pct(self.metrics.placement_rate, p),
            num(self.metrics.avg_package, p),
            num(self.metrics.highest_package, p),
            self.metrics.company_count.to_string(),
            self.sector_count.to_string(),
        ]
    }
}

impl TableRow for LiveStats {
    fn headers() -> Vec<&'static str> {
        vec!["Active Offers", "Placed", "Companies", "Avg LPA", "Rate"]
    }

    fn cells(&self, p: usize) -> Vec<String> {
        vec![
            self.active_offers.to_string(),
            self.students_placed.to_string(),
            self.companies_active.to_string(),
            num(self.average_package, p),
            pct(self.placement_rate, p),
        ]
    }
}

impl TableRow for SeriesPoint {
    fn headers() -> Vec<&'static str> {
        vec!["Time", "Offers", "Placements", "Companies"]
    }

    fn cells(&self, _p: usize) -> Vec<String> {
        vec![
            self.label.clone(),
            self.offers.to_string(),
            self.placements.to_string(),
            self.companies.to_string(),
        ]
    }
}
