//! XP sums over weeks, months and recent days.

use crate::error::StoreError;
use crate::ledger::{lock::today, Ledger, LedgerStore};
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StatsError {
    #[error("invalid period '{0}'")]
    InvalidPeriod(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryStats {
    pub category_id: String,
    pub category_name: String,
    pub color: String,
    pub total_xp: u64,
    /// Number of entries (not completions) in the period.
    pub mission_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodStats {
    pub period: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_xp: u64,
    /// Every category, sorted by name, including those with no XP.
    pub by_category: Vec<CategoryStats>,
    /// Total XP over days that have entries, rounded.
    pub daily_average: u64,
    pub days_with_entries: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub total_xp: u64,
}

/// Sums the inclusive range `start..=end`.
pub fn period_stats<S: LedgerStore>(
    ledger: &Ledger<S>,
    start: NaiveDate,
    end: NaiveDate,
    period: &str,
) -> Result<PeriodStats, StoreError> {
    let catalog = ledger.catalog();
    let mut per_category: HashMap<&str, (u64, u32)> = HashMap::new();
    let mut days = BTreeSet::new();
    let mut total_xp: u64 = 0;

    for entry in ledger.store().entries_in_range(start, end)? {
        let Some(found) = catalog.mission(&entry.mission_id) else {
            continue;
        };
        let xp = found.mission.xp as u64 * entry.count as u64;
        let slot = per_category.entry(found.category_id).or_default();
        slot.0 = slot.0.saturating_add(xp);
        slot.1 += 1;
        total_xp = total_xp.saturating_add(xp);
        days.insert(entry.date);
    }

    let mut by_category: Vec<CategoryStats> = catalog
        .categories()
        .iter()
        .map(|category| {
            let (xp, count) = per_category.get(category.id).copied().unwrap_or_default();
            CategoryStats {
                category_id: category.id.to_string(),
                category_name: category.name.to_string(),
                color: category.color.to_string(),
                total_xp: xp,
                mission_count: count,
            }
        })
        .collect();
    by_category.sort_by(|a, b| a.category_name.cmp(&b.category_name));

    let days_with_entries = days.len() as u32;
    let daily_average = if days_with_entries > 0 {
        (total_xp as f64 / days_with_entries as f64).round() as u64
    } else {
        0
    };

    Ok(PeriodStats {
        period: period.to_string(),
        start_date: start,
        end_date: end,
        total_xp,
        by_category,
        daily_average,
        days_with_entries,
    })
}

/// Monday and Sunday of an ISO week written `YYYY-Www`.
pub fn parse_iso_week(week: &str) -> Result<(NaiveDate, NaiveDate), StatsError> {
    let invalid = || StatsError::InvalidPeriod(week.to_string());
    let (year, number) = week.trim().split_once("-W").ok_or_else(invalid)?;
    let year: i32 = year.parse().map_err(|_| invalid())?;
    let number: u32 = number.parse().map_err(|_| invalid())?;
    let monday = NaiveDate::from_isoywd_opt(year, number, Weekday::Mon).ok_or_else(invalid)?;
    Ok((monday, monday + Duration::days(6)))
}

/// First and last day of a month written `YYYY-MM`.
pub fn parse_month(month: &str) -> Result<(NaiveDate, NaiveDate), StatsError> {
    let invalid = || StatsError::InvalidPeriod(month.to_string());
    let (year, number) = month.trim().split_once('-').ok_or_else(invalid)?;
    let year: i32 = year.parse().map_err(|_| invalid())?;
    let number: u32 = number.parse().map_err(|_| invalid())?;
    let first = NaiveDate::from_ymd_opt(year, number, 1).ok_or_else(invalid)?;
    let next_first = if number == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, number + 1, 1)
    }
    .ok_or_else(invalid)?;
    Ok((first, next_first - Duration::days(1)))
}

/// Label of the ISO week containing `date`, e.g. `2026-W07`.
pub fn iso_week_label(date: NaiveDate) -> String {
    let iso = date.iso_week();
    format!("{}-W{:02}", iso.year(), iso.week())
}

pub fn month_label(date: NaiveDate) -> String {
    format!("{}-{:02}", date.year(), date.month())
}

/// Stats for an ISO week; the week containing `today` when `week` is `None`.
pub fn weekly_stats_on<S: LedgerStore>(
    ledger: &Ledger<S>,
    week: Option<&str>,
    today: NaiveDate,
) -> Result<PeriodStats, StatsError> {
    let label = week.map_or_else(|| iso_week_label(today), |w| w.trim().to_string());
    let (start, end) = parse_iso_week(&label)?;
    Ok(period_stats(ledger, start, end, &label)?)
}

pub fn weekly_stats<S: LedgerStore>(
    ledger: &Ledger<S>,
    week: Option<&str>,
) -> Result<PeriodStats, StatsError> {
    weekly_stats_on(ledger, week, today())
}

/// Stats for a calendar month; the month containing `today` when `month` is `None`.
pub fn monthly_stats_on<S: LedgerStore>(
    ledger: &Ledger<S>,
    month: Option<&str>,
    today: NaiveDate,
) -> Result<PeriodStats, StatsError> {
    let label = month.map_or_else(|| month_label(today), |m| m.trim().to_string());
    let (start, end) = parse_month(&label)?;
    Ok(period_stats(ledger, start, end, &label)?)
}

pub fn monthly_stats<S: LedgerStore>(
    ledger: &Ledger<S>,
    month: Option<&str>,
) -> Result<PeriodStats, StatsError> {
    monthly_stats_on(ledger, month, today())
}

/// Per-day XP for every date on or after `today - days`, newest first.
/// Days without entries are omitted.
pub fn daily_history_on<S: LedgerStore>(
    ledger: &Ledger<S>,
    days: i64,
    today: NaiveDate,
) -> Result<Vec<DailyTotal>, StoreError> {
    let since = today
        .checked_sub_signed(Duration::days(days.clamp(0, i32::MAX as i64)))
        .unwrap_or(NaiveDate::MIN);
    let catalog = ledger.catalog();
    let mut totals: BTreeMap<NaiveDate, u64> = BTreeMap::new();

    for entry in ledger.store().entries_in_range(since, NaiveDate::MAX)? {
        if let Some(found) = catalog.mission(&entry.mission_id) {
            let day = totals.entry(entry.date).or_default();
            *day = day.saturating_add(found.mission.xp as u64 * entry.count as u64);
        }
    }

    Ok(totals
        .into_iter()
        .rev()
        .map(|(date, total_xp)| DailyTotal { date, total_xp })
        .collect())
}

pub fn daily_history<S: LedgerStore>(
    ledger: &Ledger<S>,
    days: i64,
) -> Result<Vec<DailyTotal>, StoreError> {
    daily_history_on(ledger, days, today())
}
