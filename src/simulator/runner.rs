//! The trial loop.

use super::aggregates::{Aggregates, TrialOutcome};
use super::config::SimConfig;
use super::progress::{NoProgress, ProgressObserver, ProgressTracker};
use super::report::SimReport;
use crate::constants::RADIANCE_LEVELS;
use crate::error::{SimError, SimResult};
use crate::pity::PityCurve;
use crate::radiance::AllocationMachine;
use crate::rng::RandomSource;
use tracing::{debug, info, trace, warn};

/// Runs independent trials, each one pulling until a featured drop.
///
/// Allocation state carries across trials within a run. An engine runs once;
/// `run` consumes it.
#[derive(Debug)]
pub struct SimulationEngine<S> {
    config: SimConfig,
    curve: PityCurve,
    radiance_chances: [f64; RADIANCE_LEVELS],
    source: S,
}

impl<S: RandomSource> SimulationEngine<S> {
    pub fn new(config: SimConfig, source: S) -> SimResult<Self> {
        let radiance_chances = config.validate().map_err(|err| {
            warn!(error = %err, "rejected simulation config");
            err
        })?;
        Ok(Self {
            curve: config.pity_curve(),
            config,
            radiance_chances,
            source,
        })
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn run(self, num_trials: u64) -> SimResult<SimReport> {
        self.run_with_progress(num_trials, &mut NoProgress)
    }

    pub fn run_with_progress(
        mut self,
        num_trials: u64,
        observer: &mut impl ProgressObserver,
    ) -> SimResult<SimReport> {
        if num_trials == 0 {
            return Err(SimError::InvalidArgument(
                "num_trials must be a positive integer".to_string(),
            ));
        }

        info!(
            num_trials,
            sample_group_size = self.config.sample_group_size,
            radiance_chances = ?self.radiance_chances,
            "starting simulation"
        );

        let mut machine = AllocationMachine::new(self.radiance_chances);
        let mut aggregates = Aggregates::new(self.config.hard_pity, self.config.sample_group_size);
        let mut tracker = ProgressTracker::new(num_trials, self.config.progress_interval);

        for trial in 0..num_trials {
            let outcome = self.run_trial(&mut machine, &mut aggregates);
            trace!(
                trial,
                pulls = outcome.pulls,
                final_pity = outcome.final_pity,
                allocation = ?outcome.allocation,
                "trial finished"
            );
            aggregates.record_trial(&outcome);

            if let Some(percent) = tracker.check(trial) {
                debug!(trial, percent, total_pulls = aggregates.total_pulls, "progress");
                observer.on_progress(percent);
            }
        }

        let report = aggregates.finish(
            num_trials,
            machine.into_stats(),
            self.config.empty_percentile_fallback,
            self.config.empty_lookup_fallback,
        );
        info!(
            total_pulls = report.total_pulls,
            total_five_star = report.total_five_star,
            samples = report.sample_stats.sample_count,
            "simulation complete"
        );
        Ok(report)
    }

    /// Pulls until a featured drop. Standard drops reset pity and keep going.
    fn run_trial(&mut self, machine: &mut AllocationMachine, aggregates: &mut Aggregates) -> TrialOutcome {
        let mut pity = 0u32;
        let mut pulls = 0u64;
        loop {
            pity += 1;
            pulls += 1;
            aggregates.total_pulls += 1;

            if !self.curve.roll(pity, &mut self.source) {
                continue;
            }

            aggregates.record_drop(pity);
            let allocation = machine.resolve(&mut self.source);
            if allocation.is_featured() {
                return TrialOutcome {
                    pulls,
                    final_pity: pity,
                    allocation,
                };
            }
            aggregates.record_standard();
            pity = 0;
        }
    }
}
