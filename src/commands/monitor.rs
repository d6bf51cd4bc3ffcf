//! Simulate command: seeded runs of the live monitor.

use super::models::SimulateArgs;
use super::utils::emit;
use crate::monitor::{RandomSource, Simulation};
use crate::output::{render_table, report_to_string, write_report, Report};
use crate::utils::config::DEFAULT_PRECISION;
use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Run `ticks` steps from the default counters
///
/// Series labels are `HH:MM`, one minute apart from `start`.
pub fn run_simulation(ticks: usize, start: DateTime<Utc>, rng: &mut dyn RandomSource) -> Simulation {
    let mut sim = Simulation::default();
    for i in 0..ticks {
        let label = (start + Duration::minutes(i as i64)).format("%H:%M").to_string();
        sim.step(label, rng);
        debug!("Tick {}: {:?}", i + 1, sim.stats);
    }
    sim
}

/// Execute the simulate command
pub fn execute_simulate(args: SimulateArgs) -> Result<()> {
    let mut rng = match args.seed {
        Some(seed) => {
            info!("Simulating {} ticks with seed {}", args.ticks, seed);
            StdRng::seed_from_u64(seed)
        }
        None => {
            info!("Simulating {} ticks", args.ticks);
            StdRng::from_entropy()
        }
    };

    let sim = run_simulation(args.ticks, Utc::now(), &mut rng);

    if args.text {
        let text = format!(
            "{}\n\n{}",
            render_table("LIVE STATS", std::slice::from_ref(&sim.stats), DEFAULT_PRECISION),
            render_table("ACTIVITY", &sim.series, DEFAULT_PRECISION)
        );
        return emit(&text, args.output.as_ref());
    }

    let report = Report::new("simulate", &sim);
    match &args.output {
        Some(path) => write_report(&report, path).context("Failed to write simulation JSON")?,
        None => println!("{}", report_to_string(&report)?),
    }
    Ok(())
}

/// Validate simulate arguments
pub fn validate_simulate_args(args: &SimulateArgs) -> Result<()> {
    if args.ticks == 0 {
        anyhow::bail!("ticks must be greater than 0");
    }
    if args.ticks > 100_000 {
        anyhow::bail!("ticks is too large (max 100000)");
    }
    Ok(())
}
