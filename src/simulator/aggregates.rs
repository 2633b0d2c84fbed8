//! Counters accumulated over a run.

use super::report::SimReport;
use super::samples::{SampleAccumulator, SampleStats};
use crate::radiance::{Allocation, AllocationStats};

/// What a single trial (pulls until a featured drop) looked like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrialOutcome {
    /// Pulls spent in this trial, across any standard drops on the way.
    pub pulls: u64,
    /// Pity counter at the terminating featured drop.
    pub final_pity: u32,
    /// How the terminating drop became featured.
    pub allocation: Allocation,
}

/// Owned exclusively by one run; never shared across runs.
#[derive(Debug, Clone)]
pub(crate) struct Aggregates {
    pub(crate) total_pulls: u64,
    total_drops: u64,
    featured: u64,
    standard: u64,
    pity_sum: u64,
    featured_pulls_sum: u64,
    max_pulls_for_featured: u64,
    // Index i counts drops at pity i + 1.
    pity_histogram: Vec<u64>,
    samples: SampleAccumulator,
}

impl Aggregates {
    pub(crate) fn new(hard_pity: u32, sample_group_size: u32) -> Self {
        Self {
            total_pulls: 0,
            total_drops: 0,
            featured: 0,
            standard: 0,
            pity_sum: 0,
            featured_pulls_sum: 0,
            max_pulls_for_featured: 0,
            pity_histogram: vec![0; hard_pity as usize],
            samples: SampleAccumulator::new(sample_group_size),
        }
    }

    pub(crate) fn record_drop(&mut self, pity: u32) {
        self.total_drops += 1;
        self.pity_sum += u64::from(pity);
        if let Some(bucket) = (pity as usize)
            .checked_sub(1)
            .and_then(|i| self.pity_histogram.get_mut(i))
        {
            *bucket += 1;
        }
        self.samples.push(pity);
    }

    pub(crate) fn record_standard(&mut self) {
        self.standard += 1;
    }

    pub(crate) fn record_trial(&mut self, outcome: &TrialOutcome) {
        self.featured += 1;
        self.featured_pulls_sum += outcome.pulls;
        self.max_pulls_for_featured = self.max_pulls_for_featured.max(outcome.pulls);
    }

    /// Converts the counters into the immutable result record.
    pub(crate) fn finish(
        self,
        num_trials: u64,
        allocation: AllocationStats,
        empty_percentile: f64,
        empty_lookup: f64,
    ) -> SimReport {
        let sample_stats = SampleStats::from_averages(
            self.samples.group_size(),
            self.samples.into_averages(),
            empty_percentile,
            empty_lookup,
        );

        SimReport {
            num_trials,
            total_pulls: self.total_pulls,
            total_five_star: self.total_drops,
            featured_five_star: self.featured,
            standard_five_star: self.standard,
            rate_five_star: ratio(self.total_drops, self.total_pulls),
            rate_featured: ratio(self.featured, self.total_drops),
            avg_five_star_pity: ratio(self.pity_sum, self.total_drops),
            avg_pulls_per_featured: ratio(self.featured_pulls_sum, self.featured),
            max_pulls_for_featured: self.max_pulls_for_featured,
            won_fifty_fifty: allocation.won_fifty_fifty,
            lost_fifty_fifty: allocation.lost_fifty_fifty,
            guarantee_used: allocation.guarantee_used,
            fifty_fifty_win_rate: ratio(
                allocation.won_fifty_fifty,
                allocation.won_fifty_fifty + allocation.lost_fifty_fifty,
            ),
            radiance_saved: allocation.radiance_saved,
            radiance_by_counter: allocation.radiance_by_counter,
            radiance_rate: ratio(
                allocation.radiance_saved,
                allocation.radiance_saved + allocation.lost_fifty_fifty,
            ),
            visits_to_guarantee: allocation.visits_to_guarantee,
            pity_distribution: self.pity_histogram,
            guarantee_state_visits: allocation.guarantee_state_visits,
            sample_stats,
        }
    }
}

/// `NaN` when the denominator is zero.
fn ratio(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        f64::NAN
    } else {
        numerator as f64 / denominator as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_histogram_ignores_out_of_range_pity() {
        let mut agg = Aggregates::new(3, 10);
        agg.record_drop(1);
        agg.record_drop(3);
        agg.record_drop(4);
        assert_eq!(agg.pity_histogram, vec![1, 0, 1]);
        assert_eq!(agg.total_drops, 3);
    }

    #[test]
    fn test_empty_run_yields_nan_rates() {
        let report = Aggregates::new(90, 500).finish(0, AllocationStats::default(), 62.5, 50.0);
        assert!(report.rate_five_star.is_nan());
        assert!(report.fifty_fifty_win_rate.is_nan());
        assert!(report.radiance_rate.is_nan());
        assert_eq!(report.sample_stats.percentiles.p50, 62.5);
    }

    #[test]
    fn test_ratio() {
        assert_eq!(ratio(1, 4), 0.25);
        assert!(ratio(1, 0).is_nan());
    }
}
