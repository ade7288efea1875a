use chrono::NaiveDate;

// Leveling curve
pub const TIER_COUNT: usize = 10;
pub const LEVELS_PER_TIER: u32 = 10;
pub const MAX_TABLE_LEVEL: u32 = 100;
/// Total XP to complete level 100 (reach level 101). Must equal the tier table sum.
pub const XP_FOR_LEVEL_100: u64 = 32_500;

// Past level 100: 101-110 cost 600/level, 111-120 cost 650/level, ...
pub const POST_CAP_FIRST_LEVEL: u32 = 101;
pub const POST_CAP_BASE_XP_PER_LEVEL: u64 = 600;
pub const POST_CAP_XP_STEP_PER_TIER: u64 = 50;

// Goal
pub const TARGET_LEVEL: u32 = 100;
pub const DEFAULT_TARGET_DATE: (i32, u32, u32) = (2026, 6, 20);
pub const MS_PER_DAY: i64 = 86_400_000;

// Entry locking
pub const LOCK_GRACE_DAYS: i64 = 2;

// Persistence
pub const LEDGER_FILENAME: &str = "ledger.dat";
pub const CONFIG_FILENAME: &str = "config.json";
pub const LEDGER_VERSION_MAGIC: u64 = 0x5153_544C_4F47_0001; // "QSTLOG" v1
pub const DATA_DIR_ENV: &str = "QUESTLOG_DIR";

// Display
pub const DEFAULT_PLAYER_NAME: &str = "Adventurer";
pub const DEFAULT_HISTORY_DAYS: i64 = 30;

/// The default goal date as a calendar date.
pub fn default_target_date() -> NaiveDate {
    let (y, m, d) = DEFAULT_TARGET_DATE;
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or(NaiveDate::MIN)
}
