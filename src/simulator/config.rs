//! Simulation configuration.

use crate::constants::{
    BASE_RATE, DEFAULT_RADIANCE_CHANCES, DEFAULT_SAMPLE_GROUP_SIZE, EMPTY_LOOKUP_FALLBACK,
    EMPTY_PERCENTILE_FALLBACK, HARD_PITY, PROGRESS_INTERVAL_TRIALS, RADIANCE_LEVELS,
    SOFT_PITY_INCREASE, SOFT_PITY_START,
};
use crate::error::{SimError, SimResult};
use crate::pity::PityCurve;

/// Configuration for a simulation run. Read-only once an engine is built.
#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    /// Drop probability before soft pity
    pub base_rate: f64,

    /// Last pull that still uses the base rate
    pub soft_pity_start: u32,

    /// Probability added per pull past soft pity
    pub soft_pity_increase: f64,

    /// Pull at which a drop is certain
    pub hard_pity: u32,

    /// Radiance rescue chance by loss streak 0..=3
    pub radiance_chances: Vec<f64>,

    /// Drops averaged into one percentile sample
    pub sample_group_size: u32,

    /// Trials between progress checks
    pub progress_interval: u64,

    /// Percentile value reported when no sample group filled up
    pub empty_percentile_fallback: f64,

    /// Lookup-table percentage reported when no sample group filled up
    pub empty_lookup_fallback: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            base_rate: BASE_RATE,
            soft_pity_start: SOFT_PITY_START,
            soft_pity_increase: SOFT_PITY_INCREASE,
            hard_pity: HARD_PITY,
            radiance_chances: DEFAULT_RADIANCE_CHANCES.to_vec(),
            sample_group_size: DEFAULT_SAMPLE_GROUP_SIZE,
            progress_interval: PROGRESS_INTERVAL_TRIALS,
            empty_percentile_fallback: EMPTY_PERCENTILE_FALLBACK,
            empty_lookup_fallback: EMPTY_LOOKUP_FALLBACK,
        }
    }
}

impl SimConfig {
    /// Plain 50/50 with guarantee, no Radiance at any streak.
    pub fn radiance_disabled() -> Self {
        Self {
            radiance_chances: vec![0.0; RADIANCE_LEVELS],
            ..Default::default()
        }
    }

    /// Radiance only fires once the streak has hit its cap.
    pub fn forced_rescue_only() -> Self {
        Self {
            radiance_chances: vec![0.0, 0.0, 0.0, 1.0],
            ..Default::default()
        }
    }

    pub fn with_radiance_chances(mut self, chances: impl Into<Vec<f64>>) -> Self {
        self.radiance_chances = chances.into();
        self
    }

    pub fn with_sample_group_size(mut self, size: u32) -> Self {
        self.sample_group_size = size;
        self
    }

    pub fn with_progress_interval(mut self, trials: u64) -> Self {
        self.progress_interval = trials;
        self
    }

    /// Checks every field and returns the fixed-size Radiance table.
    ///
    /// The last Radiance entry is documented as 1.0 but not enforced, so
    /// setups that disable Radiance entirely stay expressible.
    pub fn validate(&self) -> SimResult<[f64; RADIANCE_LEVELS]> {
        let chances: [f64; RADIANCE_LEVELS] =
            self.radiance_chances.as_slice().try_into().map_err(|_| {
                SimError::Configuration(format!(
                    "radiance_chances needs exactly {RADIANCE_LEVELS} entries, got {}",
                    self.radiance_chances.len()
                ))
            })?;
        if let Some((level, chance)) = chances
            .iter()
            .enumerate()
            .find(|(_, c)| !c.is_finite() || !(0.0..=1.0).contains(*c))
        {
            return Err(SimError::Configuration(format!(
                "radiance chance at streak {level} must be within [0, 1], got {chance}"
            )));
        }
        if self.sample_group_size == 0 {
            return Err(SimError::Configuration(
                "sample_group_size must be positive".to_string(),
            ));
        }
        if self.hard_pity == 0 {
            return Err(SimError::Configuration("hard_pity must be positive".to_string()));
        }
        if self.soft_pity_start >= self.hard_pity {
            return Err(SimError::Configuration(format!(
                "soft_pity_start ({}) must be below hard_pity ({})",
                self.soft_pity_start, self.hard_pity
            )));
        }
        if !self.base_rate.is_finite() || !(0.0..=1.0).contains(&self.base_rate) {
            return Err(SimError::Configuration(format!(
                "base_rate must be within [0, 1], got {}",
                self.base_rate
            )));
        }
        if !self.soft_pity_increase.is_finite() || self.soft_pity_increase < 0.0 {
            return Err(SimError::Configuration(format!(
                "soft_pity_increase must be non-negative, got {}",
                self.soft_pity_increase
            )));
        }
        if self.progress_interval == 0 {
            return Err(SimError::Configuration(
                "progress_interval must be positive".to_string(),
            ));
        }
        Ok(chances)
    }

    pub fn pity_curve(&self) -> PityCurve {
        PityCurve::new(
            self.base_rate,
            self.soft_pity_start,
            self.soft_pity_increase,
            self.hard_pity,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_error(config: SimConfig) -> String {
        match config.validate() {
            Err(SimError::Configuration(msg)) => msg,
            other => panic!("expected configuration error, got {other:?}"),
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        let chances = SimConfig::default().validate().unwrap();
        assert_eq!(chances, DEFAULT_RADIANCE_CHANCES);
    }

    #[test]
    fn test_presets_are_valid() {
        assert_eq!(SimConfig::radiance_disabled().validate().unwrap(), [0.0; 4]);
        assert_eq!(
            SimConfig::forced_rescue_only().validate().unwrap(),
            [0.0, 0.0, 0.0, 1.0]
        );
    }

    #[test]
    fn test_short_radiance_table_rejected() {
        let msg = config_error(SimConfig::default().with_radiance_chances(vec![0.0, 0.5, 1.0]));
        assert!(msg.contains("exactly 4"), "{msg}");
    }

    #[test]
    fn test_long_radiance_table_rejected() {
        config_error(SimConfig::default().with_radiance_chances(vec![0.0; 5]));
    }

    #[test]
    fn test_out_of_range_chance_rejected() {
        let msg = config_error(SimConfig::default().with_radiance_chances(vec![0.0, 1.5, 0.5, 1.0]));
        assert!(msg.contains("streak 1"), "{msg}");
        config_error(SimConfig::default().with_radiance_chances(vec![f64::NAN, 0.0, 0.5, 1.0]));
        config_error(SimConfig::default().with_radiance_chances(vec![-0.1, 0.0, 0.5, 1.0]));
    }

    #[test]
    fn test_zero_sample_group_rejected() {
        config_error(SimConfig::default().with_sample_group_size(0));
    }

    #[test]
    fn test_curve_parameters_checked() {
        config_error(SimConfig {
            soft_pity_start: 90,
            ..Default::default()
        });
        config_error(SimConfig {
            hard_pity: 0,
            soft_pity_start: 0,
            ..Default::default()
        });
        config_error(SimConfig {
            base_rate: 1.2,
            ..Default::default()
        });
        config_error(SimConfig {
            soft_pity_increase: -0.01,
            ..Default::default()
        });
        config_error(SimConfig::default().with_progress_interval(0));
    }
}
