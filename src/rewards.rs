//! One reward per level gained.

use crate::error::RewardError;
use crate::ledger::{ClaimedReward, LedgerStore};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashSet;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RewardTier {
    Standard,
    Major,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RewardType {
    pub id: &'static str,
    pub name: &'static str,
    pub tier: RewardTier,
}

pub const REWARD_TYPES: [RewardType; 5] = [
    RewardType {
        id: "console",
        name: "Play video games",
        tier: RewardTier::Standard,
    },
    RewardType {
        id: "new-game",
        name: "Buy a new game",
        tier: RewardTier::Major,
    },
    RewardType {
        id: "series",
        name: "Watch a series or manga",
        tier: RewardTier::Standard,
    },
    RewardType {
        id: "rest",
        name: "Two quiet rest days",
        tier: RewardTier::Major,
    },
    RewardType {
        id: "activity",
        name: "Outing (cinema, bowling, ...)",
        tier: RewardTier::Standard,
    },
];

pub fn reward_type(id: &str) -> Option<&'static RewardType> {
    REWARD_TYPES.iter().find(|r| r.id == id)
}

/// Levels gained beyond 1, minus rewards already claimed.
pub fn rewards_available(level: u32, claimed_count: usize) -> u32 {
    let claimed = u32::try_from(claimed_count).unwrap_or(u32::MAX);
    level.saturating_sub(1).saturating_sub(claimed)
}

/// Claims the reward of the lowest level below `level` that has none yet.
/// Returns the level the reward was recorded against.
pub fn claim_reward_at<S: LedgerStore>(
    store: &mut S,
    level: u32,
    reward_id: &str,
    now: DateTime<Utc>,
) -> Result<u32, RewardError> {
    let reward = reward_type(reward_id)
        .ok_or_else(|| RewardError::UnknownReward(reward_id.to_string()))?;

    let claimed = store.claimed_rewards()?;
    if rewards_available(level, claimed.len()) == 0 {
        return Err(RewardError::NoneAvailable);
    }

    let taken: HashSet<u32> = claimed.iter().map(|c| c.level).collect();
    let next_level = (1..level).find(|l| !taken.contains(l)).unwrap_or(1);

    store.record_claim(ClaimedReward {
        level: next_level,
        reward_type: reward.id.to_string(),
        claimed_at: now,
    })?;
    info!(level = next_level, reward = reward.id, "reward claimed");
    Ok(next_level)
}

pub fn claim_reward<S: LedgerStore>(
    store: &mut S,
    level: u32,
    reward_id: &str,
) -> Result<u32, RewardError> {
    claim_reward_at(store, level, reward_id, Utc::now())
}
