//! Monte Carlo simulator for the pity / 50-50 / Radiance mechanism.
//!
//! Each trial pulls until a featured drop. Counters, the pity histogram and
//! grouped average-pity samples are accumulated as the run goes; per-pull
//! events are never stored.

mod aggregates;
mod config;
mod progress;
mod report;
mod runner;
mod samples;

pub use aggregates::TrialOutcome;
pub use config::SimConfig;
pub use progress::{NoProgress, ProgressObserver};
pub use report::SimReport;
pub use runner::SimulationEngine;
pub use samples::{
    percentile_value, share_at_or_below, LookupEntry, Percentiles, SampleAccumulator, SampleStats,
};
