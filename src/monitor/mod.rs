//! Live placement monitor simulation.
//!
//! Models the dashboard's "real-time" counters as pure state transitions
//! with an injected random source, so runs are reproducible under a seed.

pub mod live;

pub use live::{advance_series, tick, LiveStats, RandomSource, SeriesPoint, Simulation};
