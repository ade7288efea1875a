//! XP to level conversion and its inverse.
//!
//! Nothing here is stored: the level is recomputed from the ledger's running
//! XP total on every query.

use super::constants::*;
use super::tiers::LEVEL_TIERS;
use serde::{Deserialize, Serialize};

/// Where a given XP total sits on the progression curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressionResult {
    pub level: u32,
    /// XP earned inside the current level.
    pub current_tier_xp: u64,
    /// Cost of the current level.
    pub xp_for_next_level: u64,
    /// `current_tier_xp / xp_for_next_level * 100`, in `[0, 100)`.
    pub progress_percent: f64,
}

impl ProgressionResult {
    fn new(level: u32, current_tier_xp: u64, xp_for_next_level: u64) -> Self {
        Self {
            level,
            current_tier_xp,
            xp_for_next_level,
            progress_percent: current_tier_xp as f64 / xp_for_next_level as f64 * 100.0,
        }
    }

    /// XP still missing to finish the current level.
    pub fn xp_to_next_level(&self) -> u64 {
        self.xp_for_next_level - self.current_tier_xp
    }
}

/// Per-level cost of the synthetic tier `tier_index` past level 100
/// (0 = levels 101-110, 1 = 111-120, ...).
pub fn post_cap_xp_per_level(tier_index: u32) -> u64 {
    POST_CAP_BASE_XP_PER_LEVEL + tier_index as u64 * POST_CAP_XP_STEP_PER_TIER
}

/// Converts a cumulative XP total into a level and progress inside it.
///
/// Full tiers are consumed in order; the first tier the remainder cannot clear
/// holds the level. Past level 100 the cost of the first synthetic tier is
/// applied to all remaining XP: the tier index is taken once from the level
/// at entry (always 101) rather than per level gained, so totals spanning
/// several synthetic tiers land on a higher level than `xp_required_for_level`
/// would give. `xp_required_for_level` recomputes the cost per level.
pub fn level_from_xp(total_xp: u64) -> ProgressionResult {
    let mut remaining = total_xp;
    let mut level = 1;

    for tier in LEVEL_TIERS.iter() {
        if remaining >= tier.total_xp_for_tier {
            remaining -= tier.total_xp_for_tier;
            level = tier.max_level + 1;
        } else {
            let levels_gained = u32::try_from(remaining / tier.xp_per_level).unwrap_or(u32::MAX);
            return ProgressionResult::new(
                tier.min_level.saturating_add(levels_gained),
                remaining % tier.xp_per_level,
                tier.xp_per_level,
            );
        }
    }

    let base_tier = (level - POST_CAP_FIRST_LEVEL) / LEVELS_PER_TIER;
    let xp_per_level = post_cap_xp_per_level(base_tier);
    // Totals beyond the last representable level stay pinned at u32::MAX.
    let additional_levels = u32::try_from(remaining / xp_per_level).unwrap_or(u32::MAX);

    ProgressionResult::new(
        level.saturating_add(additional_levels),
        remaining % xp_per_level,
        xp_per_level,
    )
}

/// Same as [`level_from_xp`] for signed input; negative totals count as zero.
pub fn level_from_signed_xp(total_xp: i64) -> ProgressionResult {
    level_from_xp(total_xp.max(0) as u64)
}

/// XP for the first `levels` levels past the table (101, 102, ...).
///
/// Each full synthetic tier `k` costs `10 * (600 + 50k)`, so `f` full tiers
/// sum to `10 * (600f + 50 * f(f-1)/2)`; the partial tier is paid at tier
/// `f`'s rate. `None` when the sum does not fit in a u64.
fn post_cap_xp(levels: u32) -> Option<u64> {
    let per_tier = LEVELS_PER_TIER as u64;
    let full_tiers = (levels / LEVELS_PER_TIER) as u64;
    let partial_levels = (levels % LEVELS_PER_TIER) as u64;

    let base = POST_CAP_BASE_XP_PER_LEVEL.checked_mul(full_tiers)?;
    let ramp = POST_CAP_XP_STEP_PER_TIER
        .checked_mul(full_tiers * full_tiers.saturating_sub(1) / 2)?;
    let full_cost = per_tier.checked_mul(base.checked_add(ramp)?)?;
    let partial_cost =
        partial_levels.checked_mul(post_cap_xp_per_level(levels / LEVELS_PER_TIER))?;

    full_cost.checked_add(partial_cost)
}

/// Cumulative XP needed to reach `target_level` from zero.
///
/// Saturates at `u64::MAX` for levels whose cost does not fit.
pub fn xp_required_for_level(target_level: u32) -> u64 {
    if target_level <= 1 {
        return 0;
    }

    // Past the table, pay for each level from 101 up to (not including) the target.
    if target_level > MAX_TABLE_LEVEL {
        return post_cap_xp(target_level - POST_CAP_FIRST_LEVEL)
            .and_then(|xp| XP_FOR_LEVEL_100.checked_add(xp))
            .unwrap_or(u64::MAX);
    }

    let mut total = 0;
    for tier in LEVEL_TIERS.iter() {
        if target_level > tier.max_level {
            total += tier.total_xp_for_tier;
        } else {
            total += (target_level - tier.min_level) as u64 * tier.xp_per_level;
            break;
        }
    }
    total
}
