// Pity curve
pub const BASE_RATE: f64 = 0.006;
pub const SOFT_PITY_START: u32 = 73;
pub const SOFT_PITY_INCREASE: f64 = 0.06;
pub const HARD_PITY: u32 = 90;

// 50/50 and Radiance
pub const FIFTY_FIFTY_WIN_CHANCE: f64 = 0.5;
pub const RADIANCE_LEVELS: usize = 4;
pub const MAX_LOSS_STREAK: u8 = 3;
pub const DEFAULT_RADIANCE_CHANCES: [f64; RADIANCE_LEVELS] = [0.0, 0.25, 0.50, 1.0];

// Sample groups
pub const DEFAULT_SAMPLE_GROUP_SIZE: u32 = 500;
pub const PERCENTILE_RANKS: [u32; 9] = [1, 5, 10, 25, 50, 75, 90, 95, 99];
pub const LOOKUP_MIN_AVG_PITY: u32 = 30;
pub const LOOKUP_MAX_AVG_PITY: u32 = 90;

// Fallbacks when no sample group ever filled up
pub const EMPTY_PERCENTILE_FALLBACK: f64 = 62.5;
pub const EMPTY_LOOKUP_FALLBACK: f64 = 50.0;

// Progress reporting
pub const PROGRESS_INTERVAL_TRIALS: u64 = 100_000;
