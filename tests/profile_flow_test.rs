//! Integration test: a week of logging
//!
//! Logs missions over several days, then checks the profile, period stats,
//! reward claims and JSON export built on top of the ledger.

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use questlog::config::Config;
use questlog::ledger::{FileStore, Ledger, LedgerSnapshot, LedgerStore};
use questlog::missions::MissionCatalog;
use questlog::profile::build_profile_at;
use questlog::rewards::{claim_reward_at, rewards_available};
use questlog::stats::{daily_history_on, weekly_stats_on};
use questlog::utils::persistence::{load_json_or_default, save_json};
use std::path::PathBuf;

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("questlog-flow-{}-{}", name, std::process::id()))
}

fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
}

/// Logs a fixed week: each day is logged on the day itself.
fn log_week(ledger: &mut Ledger<FileStore>) {
    for offset in 0..7 {
        let date = monday() + Duration::days(offset);
        ledger.save_entry_on(date, date, "running", 2).unwrap(); // 100
        ledger.save_entry_on(date, date, "app-30min", 1).unwrap(); // 45
        if offset % 2 == 0 {
            ledger.save_entry_on(date, date, "hike", 1).unwrap(); // 100
        }
    }
}

#[test]
fn test_week_of_logging() {
    let dir = temp_dir("week");
    let store = FileStore::open(dir.join("ledger.dat")).unwrap();
    let mut ledger = Ledger::new(store, MissionCatalog::default());
    log_week(&mut ledger);

    // 7 * 145 + 4 * 100
    assert_eq!(ledger.total_xp().unwrap(), 1415);

    let sunday = monday() + Duration::days(6);
    let week = weekly_stats_on(&ledger, Some("2026-W10"), sunday).unwrap();
    assert_eq!(week.total_xp, 1415);
    assert_eq!(week.days_with_entries, 7);
    assert_eq!(week.daily_average, 202);
    let language = week
        .by_category
        .iter()
        .find(|c| c.category_id == "language")
        .unwrap();
    assert_eq!(language.total_xp, 315);
    assert_eq!(language.mission_count, 7);

    let history = daily_history_on(&ledger, 2, sunday).unwrap();
    let dates: Vec<_> = history.iter().map(|d| d.date).collect();
    assert_eq!(
        dates,
        vec![sunday, sunday - Duration::days(1), sunday - Duration::days(2)]
    );
    assert_eq!(history[0].total_xp, 245);

    std::fs::remove_dir_all(dir).ok();
}

#[test]
fn test_profile_and_rewards() {
    let dir = temp_dir("rewards");
    let store = FileStore::open(dir.join("ledger.dat")).unwrap();
    let mut ledger = Ledger::new(store, MissionCatalog::default());
    log_week(&mut ledger);

    let config = Config {
        name: "Sam".to_string(),
        target_date: NaiveDate::from_ymd_opt(2026, 6, 20).unwrap(),
    };
    let now = Utc.with_ymd_and_hms(2026, 3, 9, 12, 0, 0).unwrap();

    let profile = build_profile_at(&ledger, &config, now).unwrap();
    assert_eq!(profile.name, "Sam");
    // 1000 clears tier 1, then 415 / 150 = 2 levels with 115 left
    assert_eq!(profile.level, 13);
    assert_eq!(profile.current_tier_xp, 115);
    assert_eq!(profile.xp_for_next_level, 150);
    assert_eq!(profile.rewards_available, 12);
    assert_eq!(profile.days_remaining, 103);
    assert_eq!(profile.xp_to_target, 32_500 - 1415);
    assert_eq!(profile.xp_per_day_required, (32_500u64 - 1415).div_ceil(103));

    let first = claim_reward_at(ledger.store_mut(), profile.level, "console", now).unwrap();
    let second = claim_reward_at(ledger.store_mut(), profile.level, "rest", now).unwrap();
    assert_eq!((first, second), (1, 2));

    // Claims persist alongside entries.
    let reopened = FileStore::open(dir.join("ledger.dat")).unwrap();
    let claimed = reopened.claimed_reward_count().unwrap();
    assert_eq!(claimed, 2);
    assert_eq!(rewards_available(profile.level, claimed), 10);

    std::fs::remove_dir_all(dir).ok();
}

#[test]
fn test_export_matches_ledger() {
    let dir = temp_dir("export");
    let store = FileStore::open(dir.join("ledger.dat")).unwrap();
    let mut ledger = Ledger::new(store, MissionCatalog::default());
    log_week(&mut ledger);

    let export_path = dir.join("export.json");
    save_json(&export_path, &ledger.store().snapshot()).unwrap();
    let exported: LedgerSnapshot = load_json_or_default(&export_path);
    assert_eq!(exported, ledger.store().snapshot());
    assert_eq!(exported.entries.len(), 18);

    std::fs::remove_dir_all(dir).ok();
}
