//! Ledger records.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Completion count of one mission on one date.
///
/// The ledger holds at most one entry per (date, mission) pair; saving again
/// replaces the count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissionEntry {
    pub date: NaiveDate,
    pub mission_id: String,
    /// Multiplier on the mission's XP value; always at least 1.
    pub count: u32,
}

impl MissionEntry {
    pub fn new(date: NaiveDate, mission_id: impl Into<String>, count: u32) -> Self {
        Self {
            date,
            mission_id: mission_id.into(),
            count,
        }
    }
}

/// A level whose reward has been used up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimedReward {
    pub level: u32,
    pub reward_type: String,
    pub claimed_at: DateTime<Utc>,
}

/// Everything a store persists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerSnapshot {
    pub entries: Vec<MissionEntry>,
    #[serde(default)]
    pub claimed_rewards: Vec<ClaimedReward>,
}

/// An entry joined with its mission, as shown for a day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryView {
    pub mission_id: String,
    pub mission_name: String,
    pub category_id: String,
    pub count: u32,
    /// XP of a single completion.
    pub xp: u64,
    /// `xp * count`.
    pub total_xp: u64,
    pub locked: bool,
}

/// All entries of one date with the day's total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayEntries {
    pub date: NaiveDate,
    pub entries: Vec<EntryView>,
    pub total_xp: u64,
    pub locked: bool,
}
