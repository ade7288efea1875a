use super::store::{LedgerStore, MemoryStore};
use super::types::{ClaimedReward, LedgerSnapshot, MissionEntry};
use crate::core::constants::LEDGER_VERSION_MAGIC;
use crate::error::StoreError;
use chrono::NaiveDate;
use sha2::{Digest, Sha256};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Ledger persisted to a single checksummed binary file.
///
/// Reads are served from memory. Every mutation is applied to a copy,
/// written to disk, and only then made visible.
pub struct FileStore {
    path: PathBuf,
    inner: MemoryStore,
}

impl FileStore {
    /// Opens the ledger at `path`. A missing file is an empty ledger.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let inner = if path.exists() {
            MemoryStore::from_snapshot(read_snapshot(&path)?)
        } else {
            debug!(path = %path.display(), "no ledger file yet, starting empty");
            MemoryStore::new()
        };
        debug!(path = %path.display(), entries = inner.len(), "ledger opened");
        Ok(Self { path, inner })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn snapshot(&self) -> LedgerSnapshot {
        self.inner.snapshot()
    }

    fn commit<T>(
        &mut self,
        apply: impl FnOnce(&mut MemoryStore) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let mut next = self.inner.clone();
        let out = apply(&mut next)?;
        write_snapshot(&self.path, &next.snapshot())?;
        self.inner = next;
        Ok(out)
    }
}

impl LedgerStore for FileStore {
    fn entry(&self, date: NaiveDate, mission_id: &str) -> Result<Option<MissionEntry>, StoreError> {
        self.inner.entry(date, mission_id)
    }

    fn upsert_entry(&mut self, entry: MissionEntry) -> Result<(), StoreError> {
        self.commit(|store| store.upsert_entry(entry))
    }

    fn delete_entry(&mut self, date: NaiveDate, mission_id: &str) -> Result<bool, StoreError> {
        if self.inner.entry(date, mission_id)?.is_none() {
            return Ok(false);
        }
        self.commit(|store| store.delete_entry(date, mission_id))
    }

    fn entries_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<MissionEntry>, StoreError> {
        self.inner.entries_in_range(start, end)
    }

    fn claimed_rewards(&self) -> Result<Vec<ClaimedReward>, StoreError> {
        self.inner.claimed_rewards()
    }

    fn record_claim(&mut self, claim: ClaimedReward) -> Result<(), StoreError> {
        self.commit(|store| store.record_claim(claim))
    }
}

/// Writes the snapshot through a temporary file and renames it into place.
///
/// File format:
/// - Version magic (8 bytes)
/// - Data length (4 bytes)
/// - bincode snapshot (variable length)
/// - SHA256 checksum of the three fields above (32 bytes)
pub fn write_snapshot(path: &Path, snapshot: &LedgerSnapshot) -> Result<(), StoreError> {
    let data = bincode::serialize(snapshot)?;
    let data_len = u32::try_from(data.len())
        .map_err(|_| StoreError::Corrupt("ledger too large".to_string()))?;

    let mut hasher = Sha256::new();
    hasher.update(LEDGER_VERSION_MAGIC.to_le_bytes());
    hasher.update(data_len.to_le_bytes());
    hasher.update(&data);
    let checksum = hasher.finalize();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp_path = path.with_extension("tmp");
    {
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(&LEDGER_VERSION_MAGIC.to_le_bytes())?;
        file.write_all(&data_len.to_le_bytes())?;
        file.write_all(&data)?;
        file.write_all(&checksum)?;
        file.sync_all()?;
    }
    fs::rename(&tmp_path, path)?;

    debug!(
        path = %path.display(),
        entries = snapshot.entries.len(),
        bytes = data_len,
        "ledger written"
    );
    Ok(())
}

/// Reads and verifies a snapshot written by [`write_snapshot`].
pub fn read_snapshot(path: &Path) -> Result<LedgerSnapshot, StoreError> {
    let mut file = fs::File::open(path)?;

    let mut version_bytes = [0u8; 8];
    read_section(&mut file, &mut version_bytes, "version")?;
    let version = u64::from_le_bytes(version_bytes);
    if version != LEDGER_VERSION_MAGIC {
        warn!(path = %path.display(), "ledger file has an unknown version");
        return Err(StoreError::Corrupt(format!(
            "invalid ledger version: expected 0x{:016X}, got 0x{:016X}",
            LEDGER_VERSION_MAGIC, version
        )));
    }

    let mut length_bytes = [0u8; 4];
    read_section(&mut file, &mut length_bytes, "length")?;
    let data_len = u32::from_le_bytes(length_bytes);

    let mut data = vec![0u8; data_len as usize];
    read_section(&mut file, &mut data, "data")?;

    let mut stored_checksum = [0u8; 32];
    read_section(&mut file, &mut stored_checksum, "checksum")?;

    let mut hasher = Sha256::new();
    hasher.update(version_bytes);
    hasher.update(length_bytes);
    hasher.update(&data);
    if stored_checksum != hasher.finalize().as_slice() {
        warn!(path = %path.display(), "ledger checksum mismatch");
        return Err(StoreError::Corrupt(
            "checksum verification failed".to_string(),
        ));
    }

    Ok(bincode::deserialize(&data)?)
}

fn read_section(file: &mut fs::File, buf: &mut [u8], section: &str) -> Result<(), StoreError> {
    file.read_exact(buf).map_err(|e| match e.kind() {
        io::ErrorKind::UnexpectedEof => StoreError::Corrupt(format!("truncated {}", section)),
        _ => StoreError::Io(e),
    })
}
