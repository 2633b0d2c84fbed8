//! Featured/standard allocation for a high-rarity drop.
//!
//! Order of evaluation on every drop:
//! 1. An outstanding guarantee is consumed (featured, no roll).
//! 2. The 50/50 coin flip (featured on a win).
//! 3. A lost flip may be rescued by Radiance, with a chance that depends on
//!    the current loss streak.
//! 4. Otherwise the drop is standard and the next one is guaranteed.
//!
//! Because a standard result always arms the guarantee, two standard drops
//! can never happen back to back.

use crate::constants::{DEFAULT_RADIANCE_CHANCES, FIFTY_FIFTY_WIN_CHANCE, MAX_LOSS_STREAK, RADIANCE_LEVELS};
use crate::rng::RandomSource;
use serde::Serialize;

/// State carried from one drop to the next. Persists across trials.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationState {
    /// Next drop is featured unconditionally.
    pub guaranteed: bool,
    /// Consecutive unrescued losses, capped at 3.
    pub streak: u8,
}

/// How a single drop was allocated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Allocation {
    Guarantee,
    NaturalWin,
    /// Rescued by Radiance at the given (pre-reset) streak level.
    Radiance { streak: u8 },
    Lost,
}

impl Allocation {
    pub fn is_featured(self) -> bool {
        !matches!(self, Allocation::Lost)
    }

    pub fn was_radiance(self) -> bool {
        matches!(self, Allocation::Radiance { .. })
    }

    pub fn was_guarantee(self) -> bool {
        matches!(self, Allocation::Guarantee)
    }
}

/// Counters updated as a side effect of every resolve.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationStats {
    pub won_fifty_fifty: u64,
    pub lost_fifty_fifty: u64,
    pub radiance_saved: u64,
    pub guarantee_used: u64,
    pub radiance_by_counter: [u64; RADIANCE_LEVELS],
    /// Times the guarantee was armed by a loss.
    pub visits_to_guarantee: u64,
    /// State on entry to each resolve: `[not guaranteed, guaranteed]`.
    pub guarantee_state_visits: [u64; 2],
}

#[derive(Debug, Clone)]
pub struct AllocationMachine {
    radiance_chances: [f64; RADIANCE_LEVELS],
    state: AllocationState,
    stats: AllocationStats,
}

impl Default for AllocationMachine {
    fn default() -> Self {
        Self::new(DEFAULT_RADIANCE_CHANCES)
    }
}

impl AllocationMachine {
    pub fn new(radiance_chances: [f64; RADIANCE_LEVELS]) -> Self {
        Self {
            radiance_chances,
            state: AllocationState::default(),
            stats: AllocationStats::default(),
        }
    }

    pub fn state(&self) -> AllocationState {
        self.state
    }

    pub fn stats(&self) -> &AllocationStats {
        &self.stats
    }

    pub fn into_stats(self) -> AllocationStats {
        self.stats
    }

    /// Clears both the carried state and the counters.
    pub fn reset(&mut self) {
        self.state = AllocationState::default();
        self.stats = AllocationStats::default();
    }

    /// Allocates one high-rarity drop. Call only after the pull has hit.
    pub fn resolve(&mut self, source: &mut impl RandomSource) -> Allocation {
        if self.state.guaranteed {
            self.stats.guarantee_state_visits[1] += 1;
            self.stats.guarantee_used += 1;
            self.state.guaranteed = false;
            // Streak is left alone: it tracks 50/50 luck, not guarantee use.
            return Allocation::Guarantee;
        }
        self.stats.guarantee_state_visits[0] += 1;

        if source.next_unit() < FIFTY_FIFTY_WIN_CHANCE {
            self.stats.won_fifty_fifty += 1;
            self.state.streak = 0;
            return Allocation::NaturalWin;
        }

        let level = self.state.streak.min(MAX_LOSS_STREAK);
        let chance = self.radiance_chances[level as usize];
        if source.next_unit() < chance {
            self.stats.radiance_saved += 1;
            self.stats.radiance_by_counter[level as usize] += 1;
            self.state.streak = 0;
            return Allocation::Radiance { streak: level };
        }

        self.stats.lost_fifty_fifty += 1;
        self.stats.visits_to_guarantee += 1;
        self.state.streak = (self.state.streak + 1).min(MAX_LOSS_STREAK);
        self.state.guaranteed = true;
        Allocation::Lost
    }
}
