use crate::aggregator::CollegeSort;
use crate::utils::config::PackageUnit;
use std::path::PathBuf;

/// Filter predicates given on the command line
///
/// Any field left `None` falls back to the report configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterArgs {
    pub year: Option<i32>,
    pub branch: Option<String>,
    pub college_id: Option<String>,
    pub min_cgpa: Option<f64>,
    pub min_package: Option<f64>,
    pub max_package: Option<f64>,
}

/// Which report to compute
#[derive(Debug, Clone, PartialEq)]
pub enum ReportView {
    Summary,
    Branches,
    Colleges {
        sort: CollegeSort,
        limit: Option<usize>,
    },
    Trend {
        /// Explicit year axis; empty means "years present"
        years: Vec<i32>,
    },
    Recruiters {
        limit: Option<usize>,
    },
    Sectors,
    Tiers,
    Compare {
        college_a: String,
        college_b: String,
    },
}

impl ReportView {
    /// Name used in the report envelope
    pub fn name(&self) -> &'static str {
        match self {
            ReportView::Summary => "summary",
            ReportView::Branches => "branches",
            ReportView::Colleges { .. } => "colleges",
            ReportView::Trend { .. } => "trend",
            ReportView::Recruiters { .. } => "recruiters",
            ReportView::Sectors => "sectors",
            ReportView::Tiers => "tiers",
            ReportView::Compare { .. } => "compare",
        }
    }

    /// Views that describe a single year and default to the latest one
    pub fn is_year_scoped(&self) -> bool {
        !matches!(self, ReportView::Trend { .. })
    }
}

/// Arguments for every report command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct ReportArgs {
    /// Records file (.json or .csv)
    pub input: PathBuf,

    pub view: ReportView,

    pub filter: FilterArgs,

    /// Optional TOML report configuration
    pub config: Option<PathBuf>,

    /// Write here instead of stdout
    pub output: Option<PathBuf>,

    /// Render a text table instead of JSON
    pub text: bool,
}

impl Default for ReportArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::from("records.json"),
            view: ReportView::Summary,
            filter: FilterArgs::default(),
            config: None,
            output: None,
            text: false,
        }
    }
}

/// Arguments for the import command (CSV to JSON records)
#[derive(Debug, Clone)]
pub struct ImportArgs {
    pub input: PathBuf,
    pub output: PathBuf,
    pub college_id: Option<String>,
    pub college_name: Option<String>,
    pub year: Option<i32>,
    pub unit: Option<PackageUnit>,
    pub config: Option<PathBuf>,
}

impl Default for ImportArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::from("placements.csv"),
            output: PathBuf::from("records.json"),
            college_id: None,
            college_name: None,
            year: None,
            unit: None,
            config: None,
        }
    }
}

/// Arguments for the export command (records to CSV)
#[derive(Debug, Clone)]
pub struct ExportArgs {
    pub input: PathBuf,
    pub output: PathBuf,
    pub filter: FilterArgs,
    pub config: Option<PathBuf>,
}

impl Default for ExportArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::from("records.json"),
            output: PathBuf::from("placements.csv"),
            filter: FilterArgs::default(),
            config: None,
        }
    }
}

/// Arguments for the simulate command
#[derive(Debug, Clone)]
pub struct SimulateArgs {
    /// Number of ticks to run
    pub ticks: usize,

    /// Seed for reproducible runs; random when absent
    pub seed: Option<u64>,

    pub output: Option<PathBuf>,

    pub text: bool,
}

impl Default for SimulateArgs {
    fn default() -> Self {
        Self {
            ticks: 10,
            seed: None,
            output: None,
            text: false,
        }
    }
}
