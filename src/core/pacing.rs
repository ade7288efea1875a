//! Pacing toward the goal: days left and XP per day needed.

use super::constants::{default_target_date, MS_PER_DAY, TARGET_LEVEL, XP_FOR_LEVEL_100};
use chrono::{DateTime, NaiveDate, Utc};

/// Goal date and level. The XP target is derived from the tier table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetGoal {
    pub date: NaiveDate,
    pub level: u32,
}

impl Default for TargetGoal {
    fn default() -> Self {
        Self::new(default_target_date())
    }
}

impl TargetGoal {
    /// A goal of completing level 100 by `date`.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            level: TARGET_LEVEL,
        }
    }

    /// XP needed to complete the target level.
    pub fn target_xp(&self) -> u64 {
        XP_FOR_LEVEL_100
    }

    /// Whole days from `now` until the goal date (UTC midnight), rounded up.
    /// Zero or negative once the date has passed.
    pub fn days_until_at(&self, now: DateTime<Utc>) -> i64 {
        let target = self.date.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc();
        let diff_ms = target.timestamp_millis() - now.timestamp_millis();
        // Integer division truncates toward zero, which already is the ceiling for negatives.
        let days = diff_ms / MS_PER_DAY;
        if diff_ms % MS_PER_DAY > 0 {
            days + 1
        } else {
            days
        }
    }

    pub fn days_until(&self) -> i64 {
        self.days_until_at(Utc::now())
    }

    /// Average XP per day needed to hit the target from `current_xp`.
    /// Zero when the goal date has passed or the target is already met.
    pub fn xp_per_day_required_at(&self, current_xp: u64, now: DateTime<Utc>) -> u64 {
        let days = self.days_until_at(now);
        if days <= 0 {
            return 0;
        }
        self.xp_to_target(current_xp).div_ceil(days as u64)
    }

    pub fn xp_per_day_required(&self, current_xp: u64) -> u64 {
        self.xp_per_day_required_at(current_xp, Utc::now())
    }

    /// XP still missing to reach the target, floored at zero.
    pub fn xp_to_target(&self, current_xp: u64) -> u64 {
        self.target_xp().saturating_sub(current_xp)
    }
}

/// Days until the default goal date.
pub fn days_until_target() -> i64 {
    TargetGoal::default().days_until()
}

/// XP per day needed to reach the default goal.
pub fn xp_per_day_required(current_xp: u64) -> u64 {
    TargetGoal::default().xp_per_day_required(current_xp)
}
