/*
 *  oil.rs
 *
 *  obc-dash - on-board computer display
 *  (c) 2020-26 Stuart Hunter
 *
 *  Oil change timer, persisted to a small JSON state file
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

//! The state file holds exactly one record, `{"last_oil_ts": <epoch secs>}`.
//! Persistence is best effort: nothing in here ever fails the caller, the
//! outcome enums say what happened so the caller can log it (and tests can
//! assert on it).

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const SECS_PER_DAY: i64 = 86_400;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("state file not found: {0}")]
    Missing(PathBuf),
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("corrupt state file {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("timestamp {ts} in {path} is before the epoch")]
    OutOfRange { path: PathBuf, ts: i64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OilRecord {
    #[serde(rename = "last_oil_ts")]
    pub last_oil_change: i64,
}

/// What `load` had to do to produce a record
#[derive(Debug)]
pub enum LoadOutcome {
    /// Read from disk as-is
    Loaded(OilRecord),
    /// File was missing or corrupt, defaulted to now and written back
    Created { record: OilRecord, cause: StoreError },
    /// Defaulted to now but the write-back failed too, value lives in memory only
    Unpersisted { record: OilRecord, cause: StoreError, write_error: StoreError },
}

impl LoadOutcome {
    pub fn record(&self) -> OilRecord {
        match self {
            LoadOutcome::Loaded(record) => *record,
            LoadOutcome::Created { record, .. } => *record,
            LoadOutcome::Unpersisted { record, .. } => *record,
        }
    }
}

#[derive(Debug)]
pub enum SaveOutcome {
    Saved,
    Failed(StoreError),
}

impl SaveOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, SaveOutcome::Saved)
    }
}

/// Whole days between `ts` and `now`, floored. A clock that went backwards
/// reads as zero days.
pub fn days_since(ts: i64, now: i64) -> i64 {
    now.saturating_sub(ts).max(0).div_euclid(SECS_PER_DAY)
}

/// Oil change timer backed by the JSON state file
#[derive(Debug)]
pub struct OilStore {
    path: PathBuf,
    record: OilRecord,
}

impl OilStore {
    /// Open the store, creating the state file when it is absent or unreadable
    pub fn open(path: impl Into<PathBuf>, now: i64) -> (Self, LoadOutcome) {
        let path = path.into();
        let outcome = load(&path, now);
        log_load(&path, &outcome);
        let store = Self { record: outcome.record(), path };
        (store, outcome)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn record(&self) -> OilRecord {
        self.record
    }

    /// Re-read the file. The oil page calls this when it is entered so an
    /// edited state file is picked up.
    pub fn reload(&mut self, now: i64) -> LoadOutcome {
        let outcome = load(&self.path, now);
        log_load(&self.path, &outcome);
        self.record = outcome.record();
        outcome
    }

    pub fn save(&mut self, record: OilRecord) -> SaveOutcome {
        self.record = record;
        match save(&self.path, record) {
            Ok(()) => {
                debug!("Saved oil record {} to {}", record.last_oil_change, self.path.display());
                SaveOutcome::Saved
            }
            Err(e) => {
                warn!("Oil record not persisted: {}", e);
                SaveOutcome::Failed(e)
            }
        }
    }

    /// Restart the timer from `now`
    pub fn reset(&mut self, now: i64) -> SaveOutcome {
        info!("Oil timer reset");
        self.save(OilRecord { last_oil_change: now })
    }

    pub fn days_elapsed(&self, now: i64) -> i64 {
        days_since(self.record.last_oil_change, now)
    }
}

/// Read the record, self-healing a missing or corrupt file with `now`
pub fn load(path: &Path, now: i64) -> LoadOutcome {
    match read(path) {
        Ok(record) => LoadOutcome::Loaded(record),
        Err(cause) => {
            let record = OilRecord { last_oil_change: now };
            match save(path, record) {
                Ok(()) => LoadOutcome::Created { record, cause },
                Err(write_error) => LoadOutcome::Unpersisted { record, cause, write_error },
            }
        }
    }
}

fn read(path: &Path) -> Result<OilRecord, StoreError> {
    let data = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            StoreError::Missing(path.to_path_buf())
        } else {
            StoreError::Io { path: path.to_path_buf(), source: e }
        }
    })?;
    let record: OilRecord =
        serde_json::from_str(&data).map_err(|e| StoreError::Corrupt { path: path.to_path_buf(), source: e })?;
    if record.last_oil_change < 0 {
        return Err(StoreError::OutOfRange { path: path.to_path_buf(), ts: record.last_oil_change });
    }
    Ok(record)
}

fn save(path: &Path, record: OilRecord) -> Result<(), StoreError> {
    let io_err = |e| StoreError::Io { path: path.to_path_buf(), source: e };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
    }
    let json = serde_json::to_string(&record)
        .map_err(|e| StoreError::Corrupt { path: path.to_path_buf(), source: e })?;
    fs::write(path, json).map_err(io_err)
}

fn log_load(path: &Path, outcome: &LoadOutcome) {
    match outcome {
        LoadOutcome::Loaded(r) => {
            debug!("Oil record {} loaded from {}", r.last_oil_change, path.display())
        }
        LoadOutcome::Created { cause, .. } => {
            info!("Oil record created at {} ({})", path.display(), cause)
        }
        LoadOutcome::Unpersisted { cause, write_error, .. } => {
            warn!("Oil record kept in memory only ({}; {})", cause, write_error)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static NEXT: AtomicUsize = AtomicUsize::new(0);

    fn scratch(name: &str) -> PathBuf {
        let n = NEXT.fetch_add(1, Ordering::SeqCst);
        let dir = std::env::temp_dir().join(format!("obc-oil-{}-{}-{}", std::process::id(), name, n));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    const NOW: i64 = 1_760_000_000;

    #[test]
    fn test_days_since() {
        assert_eq!(days_since(NOW, NOW), 0);
        for n in [0i64, 1, 2, 7, 30, 365, 1000] {
            assert_eq!(days_since(NOW - SECS_PER_DAY * n, NOW), n);
        }
        // partial days floor
        assert_eq!(days_since(NOW - SECS_PER_DAY - 3600, NOW), 1);
        assert_eq!(days_since(NOW - SECS_PER_DAY + 1, NOW), 0);
    }

    #[test]
    fn test_days_since_clock_rollback_is_zero() {
        assert_eq!(days_since(NOW + 5 * SECS_PER_DAY, NOW), 0);
        assert_eq!(days_since(NOW + 1, NOW), 0);
    }

    #[test]
    fn test_days_since_extremes_do_not_overflow() {
        assert_eq!(days_since(i64::MIN, NOW), i64::MAX / SECS_PER_DAY);
        assert_eq!(days_since(i64::MAX, NOW), 0);
    }

    #[test]
    fn test_negative_timestamp_self_heals() {
        let dir = scratch("negative");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("state.json");
        fs::write(&path, format!("{{\"last_oil_ts\":{}}}", i64::MIN)).unwrap();

        let (store, outcome) = OilStore::open(&path, NOW);
        assert!(matches!(outcome, LoadOutcome::Created { cause: StoreError::OutOfRange { .. }, .. }));
        assert_eq!(store.record().last_oil_change, NOW);
        assert_eq!(store.days_elapsed(NOW), 0);
        assert!(matches!(load(&path, NOW), LoadOutcome::Loaded(OilRecord { last_oil_change: NOW })));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_absent_file_is_created_with_now() {
        let dir = scratch("absent");
        let path = dir.join("state.json");

        let (store, outcome) = OilStore::open(&path, NOW);
        assert!(matches!(outcome, LoadOutcome::Created { cause: StoreError::Missing(_), .. }));
        assert_eq!(store.record().last_oil_change, NOW);

        let on_disk = fs::read_to_string(&path).unwrap();
        assert_eq!(on_disk, format!("{{\"last_oil_ts\":{}}}", NOW));

        // later reads keep the original value
        let (store, outcome) = OilStore::open(&path, NOW + 10 * SECS_PER_DAY);
        assert!(matches!(outcome, LoadOutcome::Loaded(_)));
        assert_eq!(store.record().last_oil_change, NOW);
        assert_eq!(store.days_elapsed(NOW + 10 * SECS_PER_DAY), 10);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_corrupt_file_self_heals() {
        let dir = scratch("corrupt");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("state.json");
        fs::write(&path, "{ not json").unwrap();

        let (store, outcome) = OilStore::open(&path, NOW);
        assert!(matches!(outcome, LoadOutcome::Created { cause: StoreError::Corrupt { .. }, .. }));
        assert_eq!(store.record().last_oil_change, NOW);
        assert!(matches!(load(&path, NOW + 99), LoadOutcome::Loaded(OilRecord { last_oil_change: NOW })));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_reset_sets_now_and_zero_days() {
        let dir = scratch("reset");
        let path = dir.join("state.json");
        let (mut store, _) = OilStore::open(&path, NOW - 40 * SECS_PER_DAY);
        assert_eq!(store.days_elapsed(NOW), 40);

        assert!(store.reset(NOW).is_saved());
        assert_eq!(store.record().last_oil_change, NOW);
        assert_eq!(store.days_elapsed(NOW), 0);

        let outcome = store.reload(NOW + 5);
        assert!(matches!(outcome, LoadOutcome::Loaded(_)));
        assert_eq!(store.record().last_oil_change, NOW);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_unwritable_path_stays_in_memory() {
        let dir = scratch("blocked");
        fs::create_dir_all(&dir).unwrap();
        // a plain file where the parent directory should be
        let blocker = dir.join("blocker");
        fs::write(&blocker, "x").unwrap();
        let path = blocker.join("state.json");

        let (mut store, outcome) = OilStore::open(&path, NOW);
        assert!(matches!(outcome, LoadOutcome::Unpersisted { .. }));
        assert_eq!(store.record().last_oil_change, NOW);

        let saved = store.reset(NOW + 100);
        assert!(matches!(saved, SaveOutcome::Failed(StoreError::Io { .. })));
        // the in-memory value still moves
        assert_eq!(store.record().last_oil_change, NOW + 100);

        let _ = fs::remove_dir_all(&dir);
    }
}
