//! Simulation report generation.

use super::samples::SampleStats;
use crate::constants::RADIANCE_LEVELS;
use serde::Serialize;

/// Final, immutable result of one run.
///
/// Rates whose denominator was zero are `NaN` and serialize as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimReport {
    pub num_trials: u64,
    pub total_pulls: u64,
    #[serde(rename = "total5Star")]
    pub total_five_star: u64,
    #[serde(rename = "featured5Star")]
    pub featured_five_star: u64,
    #[serde(rename = "standard5Star")]
    pub standard_five_star: u64,

    // Rates
    #[serde(rename = "rate5Star")]
    pub rate_five_star: f64,
    pub rate_featured: f64,
    #[serde(rename = "avg5StarPity")]
    pub avg_five_star_pity: f64,
    pub avg_pulls_per_featured: f64,
    pub max_pulls_for_featured: u64,

    // 50/50 and guarantee
    pub won_fifty_fifty: u64,
    pub lost_fifty_fifty: u64,
    pub guarantee_used: u64,
    pub fifty_fifty_win_rate: f64,

    // Radiance
    pub radiance_saved: u64,
    pub radiance_by_counter: [u64; RADIANCE_LEVELS],
    pub radiance_rate: f64,
    pub visits_to_guarantee: u64,

    // Distributions
    /// Index i counts drops at pity i + 1.
    pub pity_distribution: Vec<u64>,
    /// `[not guaranteed, guaranteed]` at each drop.
    pub guarantee_state_visits: [u64; 2],

    pub sample_stats: SampleStats,
}

impl SimReport {
    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                  GACHA SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Trials: {}   Pulls: {}   5★ drops: {}\n\n",
            self.num_trials, self.total_pulls, self.total_five_star
        ));

        report.push_str("── DROPS ────────────────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  5★ Rate:             {}\n",
            percent(self.rate_five_star)
        ));
        report.push_str(&format!(
            "  Featured Share:      {}  ({} featured / {} standard)\n",
            percent(self.rate_featured),
            self.featured_five_star,
            self.standard_five_star
        ));
        report.push_str(&format!(
            "  Avg 5★ Pity:         {:.2}\n",
            self.avg_five_star_pity
        ));
        report.push_str(&format!(
            "  Avg Pulls/Featured:  {:.2}  (worst {})\n\n",
            self.avg_pulls_per_featured, self.max_pulls_for_featured
        ));

        report.push_str("── 50/50 & GUARANTEE ────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Won 50/50:           {}\n",
            self.won_fifty_fifty
        ));
        report.push_str(&format!(
            "  Lost 50/50:          {}\n",
            self.lost_fifty_fifty
        ));
        report.push_str(&format!(
            "  50/50 Win Rate:      {}\n",
            percent(self.fifty_fifty_win_rate)
        ));
        report.push_str(&format!(
            "  Guarantees Used:     {}\n",
            self.guarantee_used
        ));
        report.push_str(&format!(
            "  Drops by State:      {} on 50/50, {} guaranteed\n\n",
            self.guarantee_state_visits[0], self.guarantee_state_visits[1]
        ));

        report.push_str("── RADIANCE ─────────────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Rescues:             {}  ({} of would-be losses)\n",
            self.radiance_saved,
            percent(self.radiance_rate)
        ));
        for (level, count) in self.radiance_by_counter.iter().enumerate() {
            report.push_str(&format!("  At Streak {level}:         {count}\n"));
        }
        report.push('\n');

        report.push_str("── PITY DISTRIBUTION ────────────────────────────────────────────\n");
        let peak = self.pity_distribution.iter().copied().max().unwrap_or(0).max(1);
        for (i, &count) in self.pity_distribution.iter().enumerate() {
            if count == 0 {
                continue;
            }
            let bar_len = (count as f64 / peak as f64 * 40.0).round() as usize;
            let bar: String = "█".repeat(bar_len);
            report.push_str(&format!("  {:3}: {:>10} {}\n", i + 1, count, bar));
        }
        report.push('\n');

        let stats = &self.sample_stats;
        report.push_str("── AVERAGE PITY SAMPLES ─────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Groups:              {} of {} drops\n",
            stats.sample_count, stats.sample_size
        ));
        report.push_str(&format!(
            "  Mean ± Std Dev:      {:.2} ± {:.2}\n",
            stats.sample_mean, stats.sample_std_dev
        ));
        let p = &stats.percentiles;
        report.push_str("  Percentiles:\n");
        for (rank, value) in [
            (1, p.p1),
            (5, p.p5),
            (10, p.p10),
            (25, p.p25),
            (50, p.p50),
            (75, p.p75),
            (90, p.p90),
            (95, p.p95),
            (99, p.p99),
        ] {
            report.push_str(&format!("    p{:<3} {:.2}\n", rank, value));
        }

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");

        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

fn percent(rate: f64) -> String {
    if rate.is_finite() {
        format!("{:.3}%", rate * 100.0)
    } else {
        "n/a".to_string()
    }
}
