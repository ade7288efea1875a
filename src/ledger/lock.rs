//! Edit window for past dates.
//!
//! Today, yesterday and the day before stay editable, as does any future
//! date. Anything older is locked.

use crate::core::constants::LOCK_GRACE_DAYS;
use crate::error::LedgerError;
use chrono::{Local, NaiveDate};

/// Today's date in local time.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// True when more than `LOCK_GRACE_DAYS` whole days separate `date` from `today`.
pub fn is_date_locked_on(date: NaiveDate, today: NaiveDate) -> bool {
    (today - date).num_days() > LOCK_GRACE_DAYS
}

pub fn is_date_locked(date: NaiveDate) -> bool {
    is_date_locked_on(date, today())
}

/// Fails with `DateLocked` if `date` can no longer be edited.
pub fn ensure_unlocked(date: NaiveDate, today: NaiveDate) -> Result<(), LedgerError> {
    if is_date_locked_on(date, today) {
        return Err(LedgerError::DateLocked {
            date,
            grace_days: LOCK_GRACE_DAYS,
        });
    }
    Ok(())
}

/// Parses a `YYYY-MM-DD` date.
pub fn parse_date(input: &str) -> Result<NaiveDate, LedgerError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(LedgerError::MissingField("date"));
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map_err(|_| LedgerError::InvalidDate(input.to_string()))
}
