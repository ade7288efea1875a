//! Player summary: XP, level, rewards and pacing in one view.

use crate::config::Config;
use crate::core::pacing::TargetGoal;
use crate::core::progression::level_from_xp;
use crate::error::StoreError;
use crate::ledger::{Ledger, LedgerStore};
use crate::rewards::rewards_available;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    pub total_xp: u64,
    pub level: u32,
    pub current_tier_xp: u64,
    pub xp_for_next_level: u64,
    pub progress_percent: f64,
    pub rewards_available: u32,
    /// Days left until the goal date; zero or negative once it has passed.
    pub days_remaining: i64,
    pub xp_per_day_required: u64,
    pub xp_to_target: u64,
}

pub fn build_profile_at<S: LedgerStore>(
    ledger: &Ledger<S>,
    config: &Config,
    now: DateTime<Utc>,
) -> Result<UserProfile, StoreError> {
    let total_xp = ledger.total_xp()?;
    let progression = level_from_xp(total_xp);
    let claimed = ledger.store().claimed_reward_count()?;
    let goal = TargetGoal::new(config.target_date);

    Ok(UserProfile {
        name: config.name.clone(),
        total_xp,
        level: progression.level,
        current_tier_xp: progression.current_tier_xp,
        xp_for_next_level: progression.xp_for_next_level,
        progress_percent: progression.progress_percent,
        rewards_available: rewards_available(progression.level, claimed),
        days_remaining: goal.days_until_at(now),
        xp_per_day_required: goal.xp_per_day_required_at(total_xp, now),
        xp_to_target: goal.xp_to_target(total_xp),
    })
}

pub fn build_profile<S: LedgerStore>(
    ledger: &Ledger<S>,
    config: &Config,
) -> Result<UserProfile, StoreError> {
    build_profile_at(ledger, config, Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{ClaimedReward, MemoryStore, MissionEntry};
    use crate::missions::MissionCatalog;
    use chrono::{NaiveDate, TimeZone};

    #[test]
    fn test_fresh_profile() {
        let ledger = Ledger::new(MemoryStore::new(), MissionCatalog::default());
        let config = Config::default();
        let now = Utc.with_ymd_and_hms(2026, 5, 21, 0, 0, 0).unwrap();
        let profile = build_profile_at(&ledger, &config, now).unwrap();

        assert_eq!(profile.level, 1);
        assert_eq!(profile.total_xp, 0);
        assert_eq!(profile.rewards_available, 0);
        assert_eq!(profile.days_remaining, 30);
        assert_eq!(profile.xp_per_day_required, 1084);
        assert_eq!(profile.xp_to_target, 32_500);
    }

    #[test]
    fn test_profile_counts_claimed_rewards() {
        let date = NaiveDate::from_ymd_opt(2026, 5, 20).unwrap();
        let mut store = MemoryStore::new();
        store.upsert_entry(MissionEntry::new(date, "hike", 10)).unwrap(); // 1000 XP
        let now = Utc.with_ymd_and_hms(2026, 5, 21, 0, 0, 0).unwrap();
        store
            .record_claim(ClaimedReward {
                level: 1,
                reward_type: "console".to_string(),
                claimed_at: now,
            })
            .unwrap();
        let ledger = Ledger::new(store, MissionCatalog::default());

        let profile = build_profile_at(&ledger, &Config::default(), now).unwrap();
        assert_eq!(profile.level, 11);
        assert_eq!(profile.rewards_available, 9);
        assert_eq!(profile.xp_to_target, 31_500);
    }

    #[test]
    fn test_profile_after_goal_date() {
        let ledger = Ledger::new(MemoryStore::new(), MissionCatalog::default());
        let now = Utc.with_ymd_and_hms(2026, 10, 18, 9, 0, 0).unwrap();
        let profile = build_profile_at(&ledger, &Config::default(), now).unwrap();
        assert!(profile.days_remaining <= 0);
        assert_eq!(profile.xp_per_day_required, 0);
    }

    #[test]
    fn test_profile_json_shape() {
        let ledger = Ledger::new(MemoryStore::new(), MissionCatalog::default());
        let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let profile = build_profile_at(&ledger, &Config::default(), now).unwrap();
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["name"], "Adventurer");
        assert_eq!(json["xpToTarget"], 32_500);
        assert!(json.get("daysRemaining").is_some());
    }
}
