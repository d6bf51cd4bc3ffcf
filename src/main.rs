//! Placement Stats CLI
//!
//! Rolls up college placement records into branch, college, recruiter,
//! sector and trend reports.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use placement_stats::aggregator::CollegeSort;
use placement_stats::commands::{
    display_schema, display_version, execute_export, execute_import, execute_report,
    execute_simulate, validate_args, validate_export_args, validate_import_args,
    validate_records_file, validate_simulate_args, ExportArgs, FilterArgs, ImportArgs, ReportArgs,
    ReportView, SimulateArgs,
};
use placement_stats::utils::config::PackageUnit;

/// Placement Stats - placement analytics from the command line
#[derive(Parser, Debug)]
#[command(name = "placement-stats")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Where records come from
#[derive(Args, Debug)]
struct InputOpts {
    /// Records file (.json, or .csv read through the import adapter)
    #[arg(short, long)]
    input: PathBuf,

    /// TOML report configuration
    #[arg(long, env = "PLACEMENT_STATS_CONFIG")]
    config: Option<PathBuf>,
}

/// Record filter predicates
#[derive(Args, Debug, Clone, Default)]
struct FilterOpts {
    /// Academic year (single-year views default to the latest year present)
    #[arg(long)]
    year: Option<i32>,

    /// Branch name, exact match
    #[arg(long)]
    branch: Option<String>,

    /// College id
    #[arg(long = "college")]
    college_id: Option<String>,

    /// Minimum average CGPA
    #[arg(long)]
    min_cgpa: Option<f64>,

    /// Minimum average package (LPA)
    #[arg(long)]
    min_package: Option<f64>,

    /// Maximum average package (LPA)
    #[arg(long)]
    max_package: Option<f64>,
}

impl From<FilterOpts> for FilterArgs {
    fn from(opts: FilterOpts) -> Self {
        FilterArgs {
            year: opts.year,
            branch: opts.branch,
            college_id: opts.college_id,
            min_cgpa: opts.min_cgpa,
            min_package: opts.min_package,
            max_package: opts.max_package,
        }
    }
}

/// Where and how results are written
#[derive(Args, Debug)]
struct OutputOpts {
    /// Write to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Render a text table instead of JSON
    #[arg(long)]
    text: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Overall summary for the filtered records
    Summary {
        #[command(flatten)]
        input: InputOpts,
        #[command(flatten)]
        filter: FilterOpts,
        #[command(flatten)]
        out: OutputOpts,
    },

    /// Branch-wise rollup
    Branches {
        #[command(flatten)]
        input: InputOpts,
        #[command(flatten)]
        filter: FilterOpts,
        #[command(flatten)]
        out: OutputOpts,
    },

    /// College ranking
    Colleges {
        #[command(flatten)]
        input: InputOpts,
        #[command(flatten)]
        filter: FilterOpts,
        #[command(flatten)]
        out: OutputOpts,

        /// Sort key: placement-rate, avg-package, total-students, name
        #[arg(long, default_value = "placement-rate")]
        sort: CollegeSort,

        /// Number of colleges to show
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Year-over-year trend
    Trend {
        #[command(flatten)]
        input: InputOpts,
        #[command(flatten)]
        filter: FilterOpts,
        #[command(flatten)]
        out: OutputOpts,

        /// Explicit year axis, e.g. 2021,2022,2023
        #[arg(long, value_delimiter = ',')]
        years: Vec<i32>,
    },

    /// Top recruiters by placements
    Recruiters {
        #[command(flatten)]
        input: InputOpts,
        #[command(flatten)]
        filter: FilterOpts,
        #[command(flatten)]
        out: OutputOpts,

        /// Number of recruiters to show (defaults to config top_n)
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Sector-wise rollup
    Sectors {
        #[command(flatten)]
        input: InputOpts,
        #[command(flatten)]
        filter: FilterOpts,
        #[command(flatten)]
        out: OutputOpts,
    },

    /// Recruiter tier rollup
    Tiers {
        #[command(flatten)]
        input: InputOpts,
        #[command(flatten)]
        filter: FilterOpts,
        #[command(flatten)]
        out: OutputOpts,
    },

    /// Compare two colleges side by side
    Compare {
        #[command(flatten)]
        input: InputOpts,
        #[command(flatten)]
        filter: FilterOpts,
        #[command(flatten)]
        out: OutputOpts,

        /// First college id
        #[arg(short = 'a', long = "college-a")]
        college_a: String,

        /// Second college id
        #[arg(short = 'b', long = "college-b")]
        college_b: String,
    },

    /// Convert an uploaded CSV into JSON records
    Import {
        /// CSV file to read
        #[arg(short, long)]
        input: PathBuf,

        /// JSON records file to write
        #[arg(short, long, default_value = "records.json")]
        output: PathBuf,

        /// College id for files without a college id column
        #[arg(long)]
        college_id: Option<String>,

        /// College name for files without a college column
        #[arg(long)]
        college_name: Option<String>,

        /// Year for files without a year column
        #[arg(long)]
        year: Option<i32>,

        /// Unit of package columns: lakhs or rupees
        #[arg(long)]
        unit: Option<PackageUnit>,

        /// TOML report configuration
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Export records as CSV
    Export {
        #[command(flatten)]
        input: InputOpts,
        #[command(flatten)]
        filter: FilterOpts,

        /// CSV file to write
        #[arg(short, long, default_value = "placements.csv")]
        output: PathBuf,
    },

    /// Validate a records file
    Validate {
        #[command(flatten)]
        input: InputOpts,
    },

    /// Run the live monitor simulation
    Simulate {
        /// Number of ticks
        #[arg(long, default_value = "10")]
        ticks: usize,

        /// Seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,

        #[command(flatten)]
        out: OutputOpts,
    },

    /// Display schema information
    Schema {
        /// Show full schema details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Summary { input, filter, out } => report(ReportView::Summary, input, filter, out)?,
        Commands::Branches { input, filter, out } => {
            report(ReportView::Branches, input, filter, out)?
        }
        Commands::Colleges {
            input,
            filter,
            out,
            sort,
            limit,
        } => report(ReportView::Colleges { sort, limit }, input, filter, out)?,
        Commands::Trend {
            input,
            filter,
            out,
            years,
        } => report(ReportView::Trend { years }, input, filter, out)?,
        Commands::Recruiters {
            input,
            filter,
            out,
            limit,
        } => report(ReportView::Recruiters { limit }, input, filter, out)?,
        Commands::Sectors { input, filter, out } => report(ReportView::Sectors, input, filter, out)?,
        Commands::Tiers { input, filter, out } => report(ReportView::Tiers, input, filter, out)?,
        Commands::Compare {
            input,
            filter,
            out,
            college_a,
            college_b,
        } => report(
            ReportView::Compare {
                college_a,
                college_b,
            },
            input,
            filter,
            out,
        )?,

        Commands::Import {
            input,
            output,
            college_id,
            college_name,
            year,
            unit,
            config,
        } => {
            let args = ImportArgs {
                input,
                output,
                college_id,
                college_name,
                year,
                unit,
                config,
            };
            validate_import_args(&args)?;
            execute_import(args)?;
        }

        Commands::Export {
            input,
            filter,
            output,
        } => {
            let args = ExportArgs {
                input: input.input,
                output,
                filter: filter.into(),
                config: input.config,
            };
            validate_export_args(&args)?;
            execute_export(args)?;
        }

        Commands::Validate { input } => {
            validate_records_file(input.input, input.config)?;
        }

        Commands::Simulate { ticks, seed, out } => {
            let args = SimulateArgs {
                ticks,
                seed,
                output: out.output,
                text: out.text,
            };
            validate_simulate_args(&args)?;
            execute_simulate(args)?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}

/// Build, validate and run one report view
///
/// **Private** - shared by every report subcommand
fn report(view: ReportView, input: InputOpts, filter: FilterOpts, out: OutputOpts) -> Result<()> {
    let args = ReportArgs {
        input: input.input,
        view,
        filter: filter.into(),
        config: input.config,
        output: out.output,
        text: out.text,
    };

    // Validate args first
    validate_args(&args)?;

    execute_report(args)
}
