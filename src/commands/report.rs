//! Report command implementation.
//!
//! Every report view follows the same steps:
//! 1. Load configuration and records
//! 2. Resolve the filter (CLI over config, latest year for single-year views)
//! 3. Run the view
//! 4. Emit JSON or a text table

use super::models::{ReportArgs, ReportView};
use super::utils::{emit, load_records, load_report_config, resolve_filter};
use crate::aggregator::{
    branch_rollups, compare_colleges, latest_year, overall_summary, rank_colleges, sector_rollups,
    tier_rollups, top_recruiters, year_trend,
};
use crate::import::ImportOptions;
use crate::output::{render_table, report_to_string, write_report, Report, TableRow};
use crate::record::{PlacementRecord, RecordFilter};
use crate::utils::config::{ReportConfig, DEFAULT_TOP_COLLEGES};
use anyhow::{Context, Result};
use log::{debug, info};
use serde::Serialize;
use std::time::Instant;

/// A computed report, before it is written anywhere
#[derive(Debug, Clone)]
pub enum RenderedReport {
    Json(Report<serde_json::Value>),
    Text(String),
}

/// Execute a report command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Config or records file cannot be read
/// * Output file cannot be written
pub fn execute_report(args: ReportArgs) -> Result<()> {
    let start_time = Instant::now();
    info!("Building {} report from {}", args.view.name(), args.input.display());

    let rendered = run_report(&args)?;

    match (rendered, &args.output) {
        (RenderedReport::Json(report), Some(path)) => {
            write_report(&report, path).context("Failed to write report JSON")?;
            info!("✓ Report written to: {}", path.display());
        }
        (RenderedReport::Json(report), None) => {
            println!("{}", report_to_string(&report)?);
        }
        (RenderedReport::Text(text), output) => emit(&text, output.as_ref())?,
    }

    debug!("Report completed in {:.2}s", start_time.elapsed().as_secs_f64());
    Ok(())
}

/// Load, filter and compute a report without writing it
///
/// **Public** - used by execute_report and tests
pub fn run_report(args: &ReportArgs) -> Result<RenderedReport> {
    let config = load_report_config(args.config.as_deref())?;
    let records = load_records(&args.input, ImportOptions::from(&config.import))?;
    render_view(&args.view, &records, &args.filter_for(&records, &config), &config, args.text)
}

impl ReportArgs {
    /// Resolve the effective filter for these records
    pub fn filter_for(&self, records: &[PlacementRecord], config: &ReportConfig) -> RecordFilter {
        let mut filter = resolve_filter(&self.filter, &config.filter);
        if filter.year.is_none() && self.view.is_year_scoped() {
            filter.year = latest_year(records);
            if let Some(year) = filter.year {
                info!("No year given, using latest year in data: {}", year);
            }
        }
        filter
    }
}

/// Compute one view and render it
pub fn render_view(
    view: &ReportView,
    records: &[PlacementRecord],
    filter: &RecordFilter,
    config: &ReportConfig,
    text: bool,
) -> Result<RenderedReport> {
    debug!("Running {} view with filter {:?}", view.name(), filter);
    let name = view.name();
    let precision = config.precision();

    match view {
        ReportView::Summary => {
            let summary = overall_summary(records, filter);
            if text {
                let rows: Vec<_> = summary.into_iter().collect();
                Ok(RenderedReport::Text(render_table("SUMMARY", &rows, precision)))
            } else {
                package(name, &summary)
            }
        }
        ReportView::Branches => {
            finish(name, "BRANCHES", &branch_rollups(records, filter), precision, text)
        }
        ReportView::Colleges { sort, limit } => {
            let limit = limit.unwrap_or(DEFAULT_TOP_COLLEGES);
            let rows = rank_colleges(records, filter, *sort, Some(limit));
            finish(name, "COLLEGES", &rows, precision, text)
        }
        ReportView::Trend { years } => {
            let axis = if years.is_empty() { None } else { Some(years.as_slice()) };
            finish(name, "YEAR TREND", &year_trend(records, filter, axis), precision, text)
        }
        ReportView::Recruiters { limit } => {
            let limit = limit.unwrap_or_else(|| config.top_n());
            let rows = top_recruiters(records, filter, limit);
            finish(name, "TOP RECRUITERS", &rows, precision, text)
        }
        ReportView::Sectors => {
            finish(name, "SECTORS", &sector_rollups(records, filter), precision, text)
        }
        ReportView::Tiers => finish(name, "TIERS", &tier_rollups(records, filter), precision, text),
        ReportView::Compare {
            college_a,
            college_b,
        } => {
            // The two ids replace any configured college restriction
            let mut shared = filter.clone();
            shared.college_id = None;
            let rows = compare_colleges(records, college_a, college_b, &shared);
            let title = format!("COMPARE {} vs {}", college_a, college_b);
            finish(name, &title, &rows, precision, text)
        }
    }
}

fn finish<T: TableRow + Serialize>(
    name: &str,
    title: &str,
    rows: &[T],
    precision: usize,
    text: bool,
) -> Result<RenderedReport> {
    if text {
        Ok(RenderedReport::Text(render_table(title, rows, precision)))
    } else {
        package(name, rows)
    }
}

fn package<T: Serialize + ?Sized>(name: &str, data: &T) -> Result<RenderedReport> {
    let value = serde_json::to_value(data).context("Failed to serialize report data")?;
    Ok(RenderedReport::Json(Report::new(name, value)))
}

/// Validate report arguments
///
/// **Public** - can be called before execute_report for early validation
pub fn validate_args(args: &ReportArgs) -> Result<()> {
    if args.input.as_os_str().is_empty() {
        anyhow::bail!("Input path cannot be empty");
    }

    if let (Some(min), Some(max)) = (args.filter.min_package, args.filter.max_package) {
        if min > max {
            anyhow::bail!("min package ({}) is greater than max package ({})", min, max);
        }
    }

    match &args.view {
        ReportView::Colleges { limit: Some(0), .. } | ReportView::Recruiters { limit: Some(0) } => {
            anyhow::bail!("limit must be greater than 0");
        }
        ReportView::Compare {
            college_a,
            college_b,
        } => {
            if college_a.trim().is_empty() || college_b.trim().is_empty() {
                anyhow::bail!("Both college ids are required for compare");
            }
        }
        _ => {}
    }

    Ok(())
}
