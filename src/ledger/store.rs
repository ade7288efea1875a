//! Data-access interface for the ledger, and the in-memory implementation.

use super::types::{ClaimedReward, LedgerSnapshot, MissionEntry};
use crate::error::StoreError;
use crate::missions::MissionCatalog;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Storage capabilities the ledger rules need.
///
/// Each mutating call is one atomic update: implementations must never leave
/// a half-applied upsert or delete observable.
pub trait LedgerStore {
    fn entry(&self, date: NaiveDate, mission_id: &str) -> Result<Option<MissionEntry>, StoreError>;

    /// Inserts the entry or replaces the count of the existing (date, mission) entry.
    fn upsert_entry(&mut self, entry: MissionEntry) -> Result<(), StoreError>;

    /// Returns whether an entry was removed.
    fn delete_entry(&mut self, date: NaiveDate, mission_id: &str) -> Result<bool, StoreError>;

    /// Entries with `start <= date <= end`, ordered by date then mission id.
    fn entries_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<MissionEntry>, StoreError>;

    fn claimed_rewards(&self) -> Result<Vec<ClaimedReward>, StoreError>;

    fn record_claim(&mut self, claim: ClaimedReward) -> Result<(), StoreError>;

    fn entries_for_date(&self, date: NaiveDate) -> Result<Vec<MissionEntry>, StoreError> {
        self.entries_in_range(date, date)
    }

    fn all_entries(&self) -> Result<Vec<MissionEntry>, StoreError> {
        self.entries_in_range(NaiveDate::MIN, NaiveDate::MAX)
    }

    fn claimed_reward_count(&self) -> Result<usize, StoreError> {
        Ok(self.claimed_rewards()?.len())
    }

    /// Sum of `mission.xp * count` over every entry. Unknown missions count 0.
    fn total_xp(&self, catalog: &MissionCatalog) -> Result<u64, StoreError> {
        Ok(sum_xp(&self.all_entries()?, catalog))
    }
}

/// XP of a set of entries.
pub fn sum_xp(entries: &[MissionEntry], catalog: &MissionCatalog) -> u64 {
    entries
        .iter()
        .map(|e| catalog.mission_xp(&e.mission_id) * e.count as u64)
        .fold(0, u64::saturating_add)
}

type EntryKey = (NaiveDate, String);

/// Ledger held in memory, keyed by (date, mission id).
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<EntryKey, u32>,
    claimed: Vec<ClaimedReward>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a store from a snapshot. Later duplicates of a key win.
    pub fn from_snapshot(snapshot: LedgerSnapshot) -> Self {
        let entries = snapshot
            .entries
            .into_iter()
            .map(|e| ((e.date, e.mission_id), e.count))
            .collect();
        Self {
            entries,
            claimed: snapshot.claimed_rewards,
        }
    }

    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            entries: self
                .entries
                .iter()
                .map(|((date, id), &count)| MissionEntry::new(*date, id.clone(), count))
                .collect(),
            claimed_rewards: self.claimed.clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl LedgerStore for MemoryStore {
    fn entry(&self, date: NaiveDate, mission_id: &str) -> Result<Option<MissionEntry>, StoreError> {
        Ok(self
            .entries
            .get(&(date, mission_id.to_string()))
            .map(|&count| MissionEntry::new(date, mission_id, count)))
    }

    fn upsert_entry(&mut self, entry: MissionEntry) -> Result<(), StoreError> {
        self.entries
            .insert((entry.date, entry.mission_id), entry.count);
        Ok(())
    }

    fn delete_entry(&mut self, date: NaiveDate, mission_id: &str) -> Result<bool, StoreError> {
        Ok(self
            .entries
            .remove(&(date, mission_id.to_string()))
            .is_some())
    }

    fn entries_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<MissionEntry>, StoreError> {
        if start > end {
            return Ok(Vec::new());
        }
        Ok(self
            .entries
            .range((start, String::new())..)
            .take_while(|((date, _), _)| *date <= end)
            .map(|((date, id), &count)| MissionEntry::new(*date, id.clone(), count))
            .collect())
    }

    fn claimed_rewards(&self) -> Result<Vec<ClaimedReward>, StoreError> {
        Ok(self.claimed.clone())
    }

    fn record_claim(&mut self, claim: ClaimedReward) -> Result<(), StoreError> {
        self.claimed.push(claim);
        Ok(())
    }
}
