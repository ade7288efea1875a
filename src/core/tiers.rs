//! Level tier table.
//!
//! Levels 1-100 are split into ten tiers of ten levels. Every level inside a
//! tier costs the same XP, and each tier costs 50 XP per level more than the
//! one before it, giving a piecewise-linear cumulative curve.

use super::constants::{TIER_COUNT, XP_FOR_LEVEL_100};
use thiserror::Error;

/// One block of contiguous levels sharing a per-level XP cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelTier {
    pub tier: u32,
    pub min_level: u32,
    /// Inclusive.
    pub max_level: u32,
    pub xp_per_level: u64,
    /// `levels_in_tier() * xp_per_level`, stored for convenience.
    pub total_xp_for_tier: u64,
}

impl LevelTier {
    const fn new(tier: u32, min_level: u32, max_level: u32, xp_per_level: u64) -> Self {
        Self {
            tier,
            min_level,
            max_level,
            xp_per_level,
            total_xp_for_tier: (max_level - min_level + 1) as u64 * xp_per_level,
        }
    }

    pub fn levels_in_tier(&self) -> u32 {
        self.max_level - self.min_level + 1
    }

    pub fn contains(&self, level: u32) -> bool {
        (self.min_level..=self.max_level).contains(&level)
    }
}

pub const LEVEL_TIERS: [LevelTier; TIER_COUNT] = [
    LevelTier::new(1, 1, 10, 100),
    LevelTier::new(2, 11, 20, 150),
    LevelTier::new(3, 21, 30, 200),
    LevelTier::new(4, 31, 40, 250),
    LevelTier::new(5, 41, 50, 300),
    LevelTier::new(6, 51, 60, 350),
    LevelTier::new(7, 61, 70, 400),
    LevelTier::new(8, 71, 80, 450),
    LevelTier::new(9, 81, 90, 500),
    LevelTier::new(10, 91, 100, 550),
];

const fn cumulative_xp_by_tier() -> [u64; TIER_COUNT] {
    let mut table = [0u64; TIER_COUNT];
    let mut running = 0u64;
    let mut i = 0;
    while i < TIER_COUNT {
        table[i] = running;
        running += LEVEL_TIERS[i].total_xp_for_tier;
        i += 1;
    }
    table
}

/// XP needed to enter each tier (entry 0 = 0). Prefix sum of `LEVEL_TIERS`.
pub const CUMULATIVE_XP_BY_TIER: [u64; TIER_COUNT] = cumulative_xp_by_tier();

/// Returns the tier containing `level`, if it is within levels 1-100.
pub fn tier_for_level(level: u32) -> Option<&'static LevelTier> {
    LEVEL_TIERS.iter().find(|t| t.contains(level))
}

/// Sum of every tier's `total_xp_for_tier`.
pub fn table_total_xp(tiers: &[LevelTier]) -> u64 {
    tiers.iter().map(|t| t.total_xp_for_tier).sum()
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TierTableError {
    #[error("tier table is empty")]
    Empty,

    #[error("tier table must start at level 1, starts at {0}")]
    BadStart(u32),

    #[error("tier {tier}: expected ordinal {expected}")]
    BadOrdinal { tier: u32, expected: u32 },

    #[error("tier {tier}: min level {min_level} is above max level {max_level}")]
    Inverted {
        tier: u32,
        min_level: u32,
        max_level: u32,
    },

    #[error("tier {tier}: starts at level {found}, expected {expected} (gap or overlap)")]
    NotContiguous { tier: u32, expected: u32, found: u32 },

    #[error("tier {tier}: total_xp_for_tier is {stored}, levels x cost gives {computed}")]
    TotalMismatch {
        tier: u32,
        stored: u64,
        computed: u64,
    },

    #[error("tier table must end at level {expected}, ends at {found}")]
    BadEnd { expected: u32, found: u32 },

    #[error("XP_FOR_LEVEL_100 is {constant}, tier table sums to {computed}")]
    CapMismatch { constant: u64, computed: u64 },
}

/// Checks that `tiers` are ascending, contiguous and cover levels 1-`last_level`,
/// and that `cap_xp` equals the table sum.
pub fn validate_tiers(
    tiers: &[LevelTier],
    last_level: u32,
    cap_xp: u64,
) -> Result<(), TierTableError> {
    let first = tiers.first().ok_or(TierTableError::Empty)?;
    if first.min_level != 1 {
        return Err(TierTableError::BadStart(first.min_level));
    }

    let mut expected_min = 1;
    for (i, tier) in tiers.iter().enumerate() {
        let expected_ordinal = i as u32 + 1;
        if tier.tier != expected_ordinal {
            return Err(TierTableError::BadOrdinal {
                tier: tier.tier,
                expected: expected_ordinal,
            });
        }
        if tier.min_level > tier.max_level {
            return Err(TierTableError::Inverted {
                tier: tier.tier,
                min_level: tier.min_level,
                max_level: tier.max_level,
            });
        }
        if tier.min_level != expected_min {
            return Err(TierTableError::NotContiguous {
                tier: tier.tier,
                expected: expected_min,
                found: tier.min_level,
            });
        }
        let computed = tier.levels_in_tier() as u64 * tier.xp_per_level;
        if computed != tier.total_xp_for_tier {
            return Err(TierTableError::TotalMismatch {
                tier: tier.tier,
                stored: tier.total_xp_for_tier,
                computed,
            });
        }
        expected_min = tier.max_level + 1;
    }

    let last = expected_min - 1;
    if last != last_level {
        return Err(TierTableError::BadEnd {
            expected: last_level,
            found: last,
        });
    }

    let computed = table_total_xp(tiers);
    if computed != cap_xp {
        return Err(TierTableError::CapMismatch {
            constant: cap_xp,
            computed,
        });
    }

    Ok(())
}

/// Validates the shipped table against `XP_FOR_LEVEL_100`.
pub fn validate_level_tiers() -> Result<(), TierTableError> {
    validate_tiers(
        &LEVEL_TIERS,
        super::constants::MAX_TABLE_LEVEL,
        XP_FOR_LEVEL_100,
    )
}
