//! Error types for ledger, storage and rewards.

use chrono::NaiveDate;
use thiserror::Error;

/// Failure reading or writing the backing store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("encoding error: {0}")]
    Encode(#[from] bincode::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("corrupt ledger file: {0}")]
    Corrupt(String),
}

/// Rejected entry mutation.
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("invalid count {0}: must be at least 1")]
    InvalidCount(u32),

    #[error("unknown mission: {0}")]
    UnknownMission(String),

    #[error("count for {0} is already at its maximum")]
    CountOverflow(String),

    #[error("date {date} is locked (more than {grace_days} days ago)")]
    DateLocked { date: NaiveDate, grace_days: i64 },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl LedgerError {
    /// The mutation targeted a date past the edit window.
    pub fn is_locked(&self) -> bool {
        matches!(self, LedgerError::DateLocked { .. })
    }

    /// Bad or incomplete input from the caller.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            LedgerError::MissingField(_)
                | LedgerError::InvalidDate(_)
                | LedgerError::InvalidCount(_)
                | LedgerError::UnknownMission(_)
                | LedgerError::CountOverflow(_)
        )
    }
}

#[derive(Error, Debug)]
pub enum RewardError {
    #[error("no reward available")]
    NoneAvailable,

    #[error("unknown reward: {0}")]
    UnknownReward(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}
