//! Grouped average-pity samples and the percentile statistics built on them.
//!
//! Raw per-drop pity values are never kept. Every `group_size` drops are
//! collapsed into one mean, so memory grows with drops / group size.

use crate::constants::{LOOKUP_MAX_AVG_PITY, LOOKUP_MIN_AVG_PITY, PERCENTILE_RANKS};
use serde::Serialize;

/// Running sum over the current group plus the closed group means.
#[derive(Debug, Clone)]
pub struct SampleAccumulator {
    group_size: u32,
    current_sum: u64,
    current_count: u32,
    averages: Vec<f64>,
}

impl SampleAccumulator {
    pub fn new(group_size: u32) -> Self {
        Self {
            group_size: group_size.max(1),
            current_sum: 0,
            current_count: 0,
            averages: Vec::new(),
        }
    }

    pub fn push(&mut self, pity: u32) {
        self.current_sum += u64::from(pity);
        self.current_count += 1;
        if self.current_count >= self.group_size {
            self.averages
                .push(self.current_sum as f64 / f64::from(self.current_count));
            self.current_sum = 0;
            self.current_count = 0;
        }
    }

    /// Closed group means in the order they were completed.
    pub fn averages(&self) -> &[f64] {
        &self.averages
    }

    pub fn group_size(&self) -> u32 {
        self.group_size
    }

    /// A partially filled trailing group is dropped.
    pub fn into_averages(self) -> Vec<f64> {
        self.averages
    }
}

/// Average pity at each fixed rank.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Percentiles {
    pub p1: f64,
    pub p5: f64,
    pub p10: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub p90: f64,
    pub p95: f64,
    pub p99: f64,
}

/// Share of samples whose average pity is at or below `avg_pity`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupEntry {
    pub avg_pity: u32,
    pub percentile: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleStats {
    pub sample_size: u32,
    pub sample_count: usize,
    pub sample_mean: f64,
    pub sample_std_dev: f64,
    pub percentiles: Percentiles,
    pub avg_pity_percentile_lookup: Vec<LookupEntry>,
}

impl SampleStats {
    /// Sorts the averages and derives every statistic from them.
    ///
    /// `empty_percentile` and `empty_lookup` stand in when no group ever closed.
    pub fn from_averages(
        sample_size: u32,
        mut averages: Vec<f64>,
        empty_percentile: f64,
        empty_lookup: f64,
    ) -> Self {
        // The lookup scan below stops at the first larger value, which is only
        // correct on ascending input.
        averages.sort_by(f64::total_cmp);

        let count = averages.len();
        let (mean, std_dev) = if count == 0 {
            (0.0, 0.0)
        } else {
            let mean = averages.iter().sum::<f64>() / count as f64;
            let variance =
                averages.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / count as f64;
            (mean, variance.sqrt())
        };

        let [p1, p5, p10, p25, p50, p75, p90, p95, p99] =
            PERCENTILE_RANKS.map(|rank| percentile_value(&averages, rank, empty_percentile));
        let percentiles = Percentiles {
            p1,
            p5,
            p10,
            p25,
            p50,
            p75,
            p90,
            p95,
            p99,
        };

        let avg_pity_percentile_lookup = (LOOKUP_MIN_AVG_PITY..=LOOKUP_MAX_AVG_PITY)
            .map(|avg_pity| LookupEntry {
                avg_pity,
                percentile: share_at_or_below(&averages, f64::from(avg_pity), empty_lookup),
            })
            .collect();

        Self {
            sample_size,
            sample_count: count,
            sample_mean: mean,
            sample_std_dev: std_dev,
            percentiles,
            avg_pity_percentile_lookup,
        }
    }
}

/// Value at `floor(rank / 100 * len)`, clamped to the last index.
pub fn percentile_value(sorted: &[f64], rank: u32, fallback: f64) -> f64 {
    if sorted.is_empty() {
        return fallback;
    }
    let index = (f64::from(rank) / 100.0 * sorted.len() as f64).floor() as usize;
    sorted[index.min(sorted.len() - 1)]
}

/// Percentage of `sorted` that is `<= threshold`, scanning from the front.
pub fn share_at_or_below(sorted: &[f64], threshold: f64, fallback: f64) -> f64 {
    if sorted.is_empty() {
        return fallback;
    }
    let count = sorted.iter().take_while(|&&v| v <= threshold).count();
    count as f64 / sorted.len() as f64 * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_groups_close_at_group_size() {
        let mut acc = SampleAccumulator::new(2);
        for pity in [10, 20, 30, 40] {
            acc.push(pity);
        }
        assert_eq!(acc.averages(), &[15.0, 35.0]);
    }

    #[test]
    fn test_partial_group_is_not_emitted() {
        let mut acc = SampleAccumulator::new(3);
        for pity in [1, 2, 3, 4, 5] {
            acc.push(pity);
        }
        assert_eq!(acc.into_averages(), vec![2.0]);
    }

    #[test]
    fn test_percentile_index_is_floored_and_clamped() {
        let sorted: Vec<f64> = (1..=10).map(f64::from).collect();
        assert_eq!(percentile_value(&sorted, 1, 0.0), 1.0);
        assert_eq!(percentile_value(&sorted, 25, 0.0), 3.0);
        assert_eq!(percentile_value(&sorted, 50, 0.0), 6.0);
        assert_eq!(percentile_value(&sorted, 99, 0.0), 10.0);
        assert_eq!(percentile_value(&sorted, 100, 0.0), 10.0);
    }

    #[test]
    fn test_empty_samples_use_fallbacks() {
        let stats = SampleStats::from_averages(500, Vec::new(), 62.5, 50.0);
        assert_eq!(stats.sample_count, 0);
        assert_eq!(stats.sample_mean, 0.0);
        assert_eq!(stats.sample_std_dev, 0.0);
        assert_eq!(stats.percentiles.p50, 62.5);
        assert!(stats
            .avg_pity_percentile_lookup
            .iter()
            .all(|e| e.percentile == 50.0));
    }

    #[test]
    fn test_stats_sort_before_scanning() {
        let stats = SampleStats::from_averages(2, vec![70.0, 40.0, 55.0, 62.0], 0.0, 0.0);
        assert_eq!(stats.percentiles.p1, 40.0);
        assert_eq!(stats.percentiles.p99, 70.0);
        assert_eq!(stats.sample_mean, 56.75);

        let at = |x: u32| {
            stats
                .avg_pity_percentile_lookup
                .iter()
                .find(|e| e.avg_pity == x)
                .map(|e| e.percentile)
                .unwrap()
        };
        assert_eq!(at(39), 0.0);
        assert_eq!(at(40), 25.0);
        assert_eq!(at(60), 50.0);
        assert_eq!(at(62), 75.0);
        assert_eq!(at(90), 100.0);
    }

    #[test]
    fn test_population_std_dev() {
        let stats = SampleStats::from_averages(1, vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0], 0.0, 0.0);
        assert_eq!(stats.sample_mean, 5.0);
        assert_eq!(stats.sample_std_dev, 2.0);
    }

    #[test]
    fn test_lookup_covers_scan_range_and_is_monotonic() {
        let averages: Vec<f64> = (0..200).map(|i| 45.0 + (i % 37) as f64 * 0.7).collect();
        let stats = SampleStats::from_averages(10, averages, 0.0, 0.0);
        let lookup = &stats.avg_pity_percentile_lookup;
        assert_eq!(lookup.len(), 61);
        assert_eq!(lookup.first().map(|e| e.avg_pity), Some(30));
        assert_eq!(lookup.last().map(|e| e.avg_pity), Some(90));
        assert!(lookup.windows(2).all(|w| w[0].percentile <= w[1].percentile));
    }
}
