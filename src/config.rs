//! User configuration (`config.json` in the data directory).

use crate::core::constants::{default_target_date, CONFIG_FILENAME, DEFAULT_PLAYER_NAME};
use crate::core::pacing::TargetGoal;
use crate::utils::persistence::{load_json_or_default, save_json};
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io;
use std::path::Path;
use tracing::warn;

/// Missing fields fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Name shown on the profile.
    pub name: String,
    /// Date by which level 100 should be completed.
    pub target_date: NaiveDate,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            name: DEFAULT_PLAYER_NAME.to_string(),
            target_date: default_target_date(),
        }
    }
}

impl Config {
    /// Reads `config.json` field by field: a malformed field falls back to
    /// its default without discarding the others.
    pub fn load(data_dir: &Path) -> Self {
        let value: Value = load_json_or_default(&data_dir.join(CONFIG_FILENAME));
        Self::from_value(&value)
    }

    pub fn from_value(value: &Value) -> Self {
        let mut config = Self::default();
        if let Some(name) = field(value, "name") {
            config.name = name;
        }
        if let Some(target_date) = field(value, "targetDate") {
            config.target_date = target_date;
        }
        config
    }

    pub fn save(&self, data_dir: &Path) -> io::Result<()> {
        save_json(&data_dir.join(CONFIG_FILENAME), self)
    }

    pub fn goal(&self) -> TargetGoal {
        TargetGoal::new(self.target_date)
    }
}

fn field<T: DeserializeOwned>(value: &Value, key: &str) -> Option<T> {
    let raw = value.get(key)?;
    serde_json::from_value(raw.clone())
        .inspect_err(|e| warn!(field = key, error = %e, "ignoring invalid config field"))
        .ok()
}
