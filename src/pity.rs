//! Drop probability as a function of the pity counter.

use crate::constants::{BASE_RATE, HARD_PITY, SOFT_PITY_INCREASE, SOFT_PITY_START};
use crate::rng::RandomSource;

/// Base rate until soft pity, a linear ramp after it, certainty at hard pity.
#[derive(Debug, Clone, PartialEq)]
pub struct PityCurve {
    base_rate: f64,
    soft_pity_start: u32,
    soft_pity_increase: f64,
    hard_pity: u32,
    // Index i holds the probability for pity i + 1.
    table: Vec<f64>,
}

impl Default for PityCurve {
    fn default() -> Self {
        Self::new(BASE_RATE, SOFT_PITY_START, SOFT_PITY_INCREASE, HARD_PITY)
    }
}

impl PityCurve {
    /// Parameters are assumed validated (see `SimConfig::validate`).
    pub fn new(base_rate: f64, soft_pity_start: u32, soft_pity_increase: f64, hard_pity: u32) -> Self {
        let mut curve = Self {
            base_rate,
            soft_pity_start,
            soft_pity_increase,
            hard_pity,
            table: Vec::new(),
        };
        curve.table = (1..=hard_pity).map(|p| curve.probability_at(p)).collect();
        curve
    }

    pub fn hard_pity(&self) -> u32 {
        self.hard_pity
    }

    pub fn probability_at(&self, pity: u32) -> f64 {
        if pity >= self.hard_pity {
            return 1.0;
        }
        if pity <= self.soft_pity_start {
            return self.base_rate;
        }
        let ramp = (pity - self.soft_pity_start) as f64 * self.soft_pity_increase;
        (self.base_rate + ramp).min(1.0)
    }

    /// Draws one uniform value and checks it against the probability at `pity`.
    ///
    /// Pity starts at 1 for the first pull after a drop.
    pub fn roll(&self, pity: u32, source: &mut impl RandomSource) -> bool {
        let probability = match pity.checked_sub(1).and_then(|i| self.table.get(i as usize)) {
            Some(&p) => p,
            None => self.probability_at(pity),
        };
        let value = source.next_unit();
        probability >= 1.0 || value < probability
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedSource;
    use proptest::prelude::*;

    #[test]
    fn test_base_rate_through_soft_pity() {
        let curve = PityCurve::default();
        for pity in 1..=SOFT_PITY_START {
            assert_eq!(curve.probability_at(pity), BASE_RATE, "pity {pity}");
        }
    }

    #[test]
    fn test_certain_at_and_past_hard_pity() {
        let curve = PityCurve::default();
        assert_eq!(curve.probability_at(HARD_PITY), 1.0);
        assert_eq!(curve.probability_at(HARD_PITY + 25), 1.0);
    }

    #[test]
    fn test_ramp_starts_one_step_after_soft_pity() {
        let curve = PityCurve::default();
        let expected = BASE_RATE + SOFT_PITY_INCREASE;
        assert!((curve.probability_at(SOFT_PITY_START + 1) - expected).abs() < 1e-12);
        // No jump beyond a single increment across the threshold.
        let step = curve.probability_at(SOFT_PITY_START + 1) - curve.probability_at(SOFT_PITY_START);
        assert!((step - SOFT_PITY_INCREASE).abs() < 1e-12);
    }

    #[test]
    fn test_ramp_is_capped_at_one() {
        let curve = PityCurve::new(BASE_RATE, SOFT_PITY_START, 0.5, HARD_PITY);
        assert_eq!(curve.probability_at(SOFT_PITY_START + 2), 1.0);
        assert_eq!(curve.probability_at(HARD_PITY - 1), 1.0);
    }

    #[test]
    fn test_roll_compares_against_probability() {
        let curve = PityCurve::default();
        let mut hit = ScriptedSource::new([0.005]);
        let mut miss = ScriptedSource::new([0.006]);
        assert!(curve.roll(1, &mut hit));
        assert!(!curve.roll(1, &mut miss));
    }

    #[test]
    fn test_roll_at_hard_pity_always_hits_and_consumes_one_value() {
        let curve = PityCurve::default();
        let mut source = ScriptedSource::new([0.999_999]);
        assert!(curve.roll(HARD_PITY, &mut source));
        assert_eq!(source.consumed(), 1);
    }

    proptest! {
        #[test]
        fn prop_probability_is_monotonic(pity in 0u32..200) {
            let curve = PityCurve::default();
            let here = curve.probability_at(pity);
            let next = curve.probability_at(pity + 1);
            prop_assert!(next >= here);
            prop_assert!((0.0..=1.0).contains(&here));
        }

        #[test]
        fn prop_custom_curves_stay_monotonic(
            base in 0.0f64..0.5,
            soft in 1u32..60,
            step in 0.0f64..0.2,
            extra in 1u32..40,
        ) {
            let curve = PityCurve::new(base, soft, step, soft + extra);
            for pity in 0..(soft + extra + 5) {
                prop_assert!(curve.probability_at(pity + 1) >= curve.probability_at(pity));
            }
        }
    }
}
