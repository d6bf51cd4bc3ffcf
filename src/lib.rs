//! Placement Stats
//!
//! Aggregation engine for college placement statistics: rolls up raw
//! per-branch, per-year placement records into placement rates,
//! placement-weighted package averages, recruiter and sector rankings,
//! and multi-year trends.
//!
//! This crate provides the core implementation for the
//! `placement-stats` CLI tool.
//!
//! ## Getting Started
//!
//! ```bash
//! placement-stats import --input upload.csv --output records.json --year 2024
//! placement-stats branches --input records.json --text
//! placement-stats recruiters --input records.json --limit 5
//! ```
//!
//! As a library, load records through any `RecordSource` and call the
//! view functions in `aggregator` directly; they never fail and never
//! touch the filesystem.

pub mod aggregator;
pub mod commands;
pub mod import;
pub mod monitor;
pub mod output;
pub mod record;
pub mod utils;
