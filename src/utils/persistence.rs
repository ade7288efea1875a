//! Data directory resolution and JSON file helpers.

use crate::core::constants::DATA_DIR_ENV;
use directories::ProjectDirs;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Resolves the data directory, creating it if needed.
///
/// Precedence: explicit override, then `QUESTLOG_DIR`, then the platform
/// data directory.
pub fn data_dir(override_dir: Option<&Path>) -> io::Result<PathBuf> {
    let dir = match override_dir {
        Some(dir) => dir.to_path_buf(),
        None => match std::env::var_os(DATA_DIR_ENV) {
            Some(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => ProjectDirs::from("", "", "questlog")
                .ok_or_else(|| {
                    io::Error::new(
                        io::ErrorKind::NotFound,
                        "Could not determine data directory",
                    )
                })?
                .data_dir()
                .to_path_buf(),
        },
    };
    fs::create_dir_all(&dir)?;
    debug!(dir = %dir.display(), "using data directory");
    Ok(dir)
}

/// Loads a JSON file, returning `T::default()` if it is missing or invalid.
pub fn load_json_or_default<T: Default + serde::de::DeserializeOwned>(path: &Path) -> T {
    match fs::read_to_string(path) {
        Ok(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
            warn!(path = %path.display(), error = %e, "ignoring invalid JSON file");
            T::default()
        }),
        Err(_) => T::default(),
    }
}

/// Saves a value as pretty-printed JSON.
pub fn save_json<T: serde::Serialize>(path: &Path, data: &T) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(path, json)?;
    Ok(())
}
