use super::lock::{ensure_unlocked, is_date_locked_on, today};
use super::store::{sum_xp, LedgerStore};
use super::types::{DayEntries, EntryView, MissionEntry};
use crate::error::{LedgerError, StoreError};
use crate::missions::MissionCatalog;
use chrono::NaiveDate;
use tracing::{debug, info, warn};

/// Entry rules on top of a store: validation, the lock window, and XP sums.
///
/// Methods ending in `_on` take the current date explicitly; the others use
/// the local calendar date.
pub struct Ledger<S> {
    store: S,
    catalog: MissionCatalog,
}

impl<S: LedgerStore> Ledger<S> {
    pub fn new(store: S, catalog: MissionCatalog) -> Self {
        Self { store, catalog }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn catalog(&self) -> &MissionCatalog {
        &self.catalog
    }

    /// Sets the count for (date, mission), replacing any previous count.
    /// Returns the XP this entry is now worth.
    pub fn save_entry_on(
        &mut self,
        today: NaiveDate,
        date: NaiveDate,
        mission_id: &str,
        count: u32,
    ) -> Result<u64, LedgerError> {
        let xp = self.check_mutable(today, date, mission_id)?;
        if count == 0 {
            return Err(LedgerError::InvalidCount(count));
        }

        self.store
            .upsert_entry(MissionEntry::new(date, mission_id, count))?;
        info!(%date, mission_id, count, "entry saved");
        Ok(xp * count as u64)
    }

    pub fn save_entry(
        &mut self,
        date: NaiveDate,
        mission_id: &str,
        count: u32,
    ) -> Result<u64, LedgerError> {
        self.save_entry_on(today(), date, mission_id, count)
    }

    /// Deletes the (date, mission) entry. Deleting nothing still succeeds;
    /// the return value says whether an entry existed.
    pub fn remove_entry_on(
        &mut self,
        today: NaiveDate,
        date: NaiveDate,
        mission_id: &str,
    ) -> Result<bool, LedgerError> {
        if mission_id.trim().is_empty() {
            return Err(LedgerError::MissingField("mission_id"));
        }
        self.check_unlocked(date, today)?;

        let removed = self.store.delete_entry(date, mission_id)?;
        if removed {
            info!(%date, mission_id, "entry removed");
        } else {
            debug!(%date, mission_id, "no entry to remove");
        }
        Ok(removed)
    }

    pub fn remove_entry(&mut self, date: NaiveDate, mission_id: &str) -> Result<bool, LedgerError> {
        self.remove_entry_on(today(), date, mission_id)
    }

    /// Adds one completion. Returns the new count.
    pub fn increment_on(
        &mut self,
        today: NaiveDate,
        date: NaiveDate,
        mission_id: &str,
    ) -> Result<u32, LedgerError> {
        self.check_mutable(today, date, mission_id)?;
        let next = self
            .count_of(date, mission_id)?
            .checked_add(1)
            .ok_or_else(|| LedgerError::CountOverflow(mission_id.to_string()))?;
        self.save_entry_on(today, date, mission_id, next)?;
        Ok(next)
    }

    pub fn increment(&mut self, date: NaiveDate, mission_id: &str) -> Result<u32, LedgerError> {
        self.increment_on(today(), date, mission_id)
    }

    /// Removes one completion, deleting the entry when it reaches zero.
    /// Returns the new count. Missions missing from the catalog are rejected
    /// whatever their count; `remove_entry` still deletes them.
    pub fn decrement_on(
        &mut self,
        today: NaiveDate,
        date: NaiveDate,
        mission_id: &str,
    ) -> Result<u32, LedgerError> {
        self.check_mutable(today, date, mission_id)?;

        match self.count_of(date, mission_id)? {
            0 => Ok(0),
            1 => {
                self.remove_entry_on(today, date, mission_id)?;
                Ok(0)
            }
            current => {
                self.save_entry_on(today, date, mission_id, current - 1)?;
                Ok(current - 1)
            }
        }
    }

    pub fn decrement(&mut self, date: NaiveDate, mission_id: &str) -> Result<u32, LedgerError> {
        self.decrement_on(today(), date, mission_id)
    }

    /// Entries of `date` joined with their missions. Entries whose mission is
    /// no longer in the catalog are left out.
    pub fn entries_for_date_on(
        &self,
        today: NaiveDate,
        date: NaiveDate,
    ) -> Result<Vec<EntryView>, StoreError> {
        let locked = is_date_locked_on(date, today);
        let views = self
            .store
            .entries_for_date(date)?
            .into_iter()
            .filter_map(|entry| {
                let found = self.catalog.mission(&entry.mission_id)?;
                let xp = found.mission.xp as u64;
                Some(EntryView {
                    mission_name: found.mission.name.to_string(),
                    category_id: found.category_id.to_string(),
                    mission_id: entry.mission_id,
                    count: entry.count,
                    xp,
                    total_xp: xp * entry.count as u64,
                    locked,
                })
            })
            .collect();
        Ok(views)
    }

    pub fn entries_for_date(&self, date: NaiveDate) -> Result<Vec<EntryView>, StoreError> {
        self.entries_for_date_on(today(), date)
    }

    /// Everything shown for one day.
    pub fn day_on(&self, today: NaiveDate, date: NaiveDate) -> Result<DayEntries, StoreError> {
        Ok(DayEntries {
            date,
            entries: self.entries_for_date_on(today, date)?,
            total_xp: self.day_total_xp(date)?,
            locked: is_date_locked_on(date, today),
        })
    }

    pub fn day(&self, date: NaiveDate) -> Result<DayEntries, StoreError> {
        self.day_on(today(), date)
    }

    pub fn day_total_xp(&self, date: NaiveDate) -> Result<u64, StoreError> {
        Ok(sum_xp(&self.store.entries_for_date(date)?, &self.catalog))
    }

    pub fn total_xp(&self) -> Result<u64, StoreError> {
        self.store.total_xp(&self.catalog)
    }

    fn count_of(&self, date: NaiveDate, mission_id: &str) -> Result<u32, StoreError> {
        Ok(self
            .store
            .entry(date, mission_id)?
            .map_or(0, |entry| entry.count))
    }

    /// Checks shared by every count change: mission id present, date
    /// unlocked, mission known. Returns the mission's XP value.
    fn check_mutable(
        &self,
        today: NaiveDate,
        date: NaiveDate,
        mission_id: &str,
    ) -> Result<u64, LedgerError> {
        if mission_id.trim().is_empty() {
            return Err(LedgerError::MissingField("mission_id"));
        }
        self.check_unlocked(date, today)?;
        match self.catalog.mission(mission_id) {
            Some(entry) => Ok(entry.mission.xp as u64),
            None => Err(LedgerError::UnknownMission(mission_id.to_string())),
        }
    }

    fn check_unlocked(&self, date: NaiveDate, today: NaiveDate) -> Result<(), LedgerError> {
        ensure_unlocked(date, today).inspect_err(|_| {
            warn!(%date, %today, "rejected change to locked date");
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::MemoryStore;
    use chrono::Duration;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 5, 10).unwrap()
    }

    fn ledger() -> Ledger<MemoryStore> {
        Ledger::new(MemoryStore::new(), MissionCatalog::default())
    }

    #[test]
    fn test_save_returns_xp_gained() {
        let mut ledger = ledger();
        assert_eq!(ledger.save_entry_on(today(), today(), "running", 3).unwrap(), 150);
        assert_eq!(ledger.total_xp().unwrap(), 150);
    }

    #[test]
    fn test_resave_replaces_count() {
        let mut ledger = ledger();
        ledger.save_entry_on(today(), today(), "running", 3).unwrap();
        ledger.save_entry_on(today(), today(), "running", 1).unwrap();
        assert_eq!(ledger.store().all_entries().unwrap().len(), 1);
        assert_eq!(ledger.day_total_xp(today()).unwrap(), 50);
    }

    #[test]
    fn test_validation_errors() {
        let mut ledger = ledger();
        assert!(matches!(
            ledger.save_entry_on(today(), today(), "", 1),
            Err(LedgerError::MissingField("mission_id"))
        ));
        assert!(matches!(
            ledger.save_entry_on(today(), today(), "flying", 1),
            Err(LedgerError::UnknownMission(_))
        ));
        assert!(matches!(
            ledger.save_entry_on(today(), today(), "running", 0),
            Err(LedgerError::InvalidCount(0))
        ));
        assert_eq!(ledger.total_xp().unwrap(), 0);
    }

    #[test]
    fn test_lock_checked_before_mission_lookup() {
        let mut ledger = ledger();
        let old = today() - Duration::days(3);
        let err = ledger.save_entry_on(today(), old, "flying", 1).unwrap_err();
        assert!(err.is_locked());
    }

    #[test]
    fn test_remove_on_locked_date_rejected() {
        let mut ledger = ledger();
        let old = today() - Duration::days(5);
        ledger
            .store_mut()
            .upsert_entry(MissionEntry::new(old, "running", 1))
            .unwrap();
        assert!(ledger.remove_entry_on(today(), old, "running").unwrap_err().is_locked());
        assert_eq!(ledger.total_xp().unwrap(), 50);
    }

    #[test]
    fn test_remove_missing_succeeds() {
        let mut ledger = ledger();
        assert!(!ledger.remove_entry_on(today(), today(), "running").unwrap());
    }

    #[test]
    fn test_increment_and_decrement() {
        let mut ledger = ledger();
        let date = today() - Duration::days(1);
        assert_eq!(ledger.increment_on(today(), date, "boxing").unwrap(), 1);
        assert_eq!(ledger.increment_on(today(), date, "boxing").unwrap(), 2);
        assert_eq!(ledger.day_total_xp(date).unwrap(), 120);

        assert_eq!(ledger.decrement_on(today(), date, "boxing").unwrap(), 1);
        assert_eq!(ledger.decrement_on(today(), date, "boxing").unwrap(), 0);
        assert!(ledger.store().entry(date, "boxing").unwrap().is_none());
        assert_eq!(ledger.decrement_on(today(), date, "boxing").unwrap(), 0);
    }

    #[test]
    fn test_increment_at_max_count_is_rejected() {
        let mut ledger = ledger();
        ledger.save_entry_on(today(), today(), "beard", u32::MAX).unwrap();
        let err = ledger.increment_on(today(), today(), "beard").unwrap_err();
        assert!(matches!(err, LedgerError::CountOverflow(ref id) if id == "beard"));
        assert!(err.is_validation());
        assert_eq!(
            ledger.store().entry(today(), "beard").unwrap().map(|e| e.count),
            Some(u32::MAX)
        );
    }

    #[test]
    fn test_increment_on_locked_date_reports_lock_first() {
        let mut ledger = ledger();
        let old = today() - Duration::days(4);
        ledger
            .store_mut()
            .upsert_entry(MissionEntry::new(old, "beard", u32::MAX))
            .unwrap();
        assert!(ledger.increment_on(today(), old, "beard").unwrap_err().is_locked());
    }

    #[test]
    fn test_decrement_of_retired_mission_rejected_at_any_count() {
        let mut ledger = ledger();
        for count in [1, 2] {
            ledger
                .store_mut()
                .upsert_entry(MissionEntry::new(today(), "retired-mission", count))
                .unwrap();
            let err = ledger
                .decrement_on(today(), today(), "retired-mission")
                .unwrap_err();
            assert!(matches!(err, LedgerError::UnknownMission(_)), "count {}", count);
            assert_eq!(
                ledger
                    .store()
                    .entry(today(), "retired-mission")
                    .unwrap()
                    .map(|e| e.count),
                Some(count)
            );
        }
        assert!(ledger.remove_entry_on(today(), today(), "retired-mission").unwrap());
    }

    #[test]
    fn test_entries_for_date_joins_catalog() {
        let mut ledger = ledger();
        ledger.save_entry_on(today(), today(), "hike", 2).unwrap();
        ledger
            .store_mut()
            .upsert_entry(MissionEntry::new(today(), "retired-mission", 1))
            .unwrap();

        let day = ledger.day_on(today(), today()).unwrap();
        assert_eq!(day.entries.len(), 1);
        let view = &day.entries[0];
        assert_eq!(view.mission_name, "Organized hike");
        assert_eq!(view.category_id, "physical");
        assert_eq!(view.total_xp, 200);
        assert!(!view.locked);
        assert_eq!(day.total_xp, 200);
        assert!(!day.locked);
    }

    #[test]
    fn test_old_day_reports_locked() {
        let ledger = ledger();
        let day = ledger.day_on(today(), today() - Duration::days(10)).unwrap();
        assert!(day.locked);
        assert_eq!(day.total_xp, 0);
    }
}
