//! Finished-game statistics
//!
//! An append-only log: one record per game over, read back for the
//! "last game" summary on the menu.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::error::StatsError;

/// Summary of one completed session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsRecord {
    /// Unix timestamp (ms) when the session ended
    pub timestamp: u64,
    pub score: u64,
    pub enemies_killed: u32,
    pub asteroids_destroyed: u32,
    /// Simulated seconds from start to death
    pub session_duration: f32,
}

/// Persistence seam for finished games
pub trait StatsStore {
    /// Append one record
    fn append(&mut self, record: &StatsRecord) -> Result<(), StatsError>;

    /// Most recently appended record, if any
    fn latest(&self) -> Result<Option<StatsRecord>, StatsError>;
}

/// In-memory log, for headless runs and tests
#[derive(Debug, Clone, Default)]
pub struct MemoryStatsStore {
    pub records: Vec<StatsRecord>,
}

impl MemoryStatsStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StatsStore for MemoryStatsStore {
    fn append(&mut self, record: &StatsRecord) -> Result<(), StatsError> {
        self.records.push(record.clone());
        Ok(())
    }

    fn latest(&self) -> Result<Option<StatsRecord>, StatsError> {
        Ok(self.records.last().cloned())
    }
}

/// File-backed log with one JSON object per line
#[derive(Debug, Clone)]
pub struct JsonlStatsStore {
    path: PathBuf,
}

impl JsonlStatsStore {
    /// Default log file name
    pub const DEFAULT_PATH: &'static str = "stats.jsonl";

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All readable records, oldest first. Corrupt lines are skipped.
    pub fn records(&self) -> Result<Vec<StatsRecord>, StatsError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut records = Vec::new();
        for (i, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<StatsRecord>(line) {
                Ok(record) => records.push(record),
                Err(e) => log::warn!(
                    "Skipping unreadable stats line {} in {}: {}",
                    i + 1,
                    self.path.display(),
                    e
                ),
            }
        }
        Ok(records)
    }
}

impl StatsStore for JsonlStatsStore {
    fn append(&mut self, record: &StatsRecord) -> Result<(), StatsError> {
        let mut line = serde_json::to_string(record)?;
        line.push('\n');

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())?;
        Ok(())
    }

    fn latest(&self) -> Result<Option<StatsRecord>, StatsError> {
        Ok(self.records()?.pop())
    }
}

/// Current wall-clock time as Unix milliseconds (0 if the clock is before 1970)
pub fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(score: u64) -> StatsRecord {
        StatsRecord {
            timestamp: 1_700_000_000_000 + score,
            score,
            enemies_killed: (score / 10) as u32,
            asteroids_destroyed: 0,
            session_duration: 12.5,
        }
    }

    #[test]
    fn test_memory_store_latest() {
        let mut store = MemoryStatsStore::new();
        assert_eq!(store.latest().unwrap(), None);
        store.append(&record(10)).unwrap();
        store.append(&record(40)).unwrap();
        assert_eq!(store.latest().unwrap(), Some(record(40)));
    }

    #[test]
    fn test_jsonl_store_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonlStatsStore::new(dir.path().join("stats.jsonl"));
        assert!(store.records().unwrap().is_empty());
        assert_eq!(store.latest().unwrap(), None);
    }

    #[test]
    fn test_jsonl_store_appends_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonlStatsStore::new(dir.path().join("logs").join("stats.jsonl"));
        store.append(&record(10)).unwrap();
        store.append(&record(30)).unwrap();

        let reopened = JsonlStatsStore::new(store.path());
        assert_eq!(reopened.records().unwrap(), vec![record(10), record(30)]);
        assert_eq!(reopened.latest().unwrap(), Some(record(30)));
    }

    #[test]
    fn test_jsonl_store_skips_corrupt_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stats.jsonl");
        let mut store = JsonlStatsStore::new(&path);
        store.append(&record(20)).unwrap();
        let mut text = fs::read_to_string(&path).unwrap();
        text.push_str("{\"score\": \n\n");
        fs::write(&path, text).unwrap();

        assert_eq!(store.records().unwrap().len(), 1);
        assert_eq!(store.latest().unwrap(), Some(record(20)));
    }

    #[test]
    fn test_jsonl_store_unwritable_path_errors() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the file should be
        let mut store = JsonlStatsStore::new(dir.path());
        assert!(matches!(store.append(&record(10)), Err(StatsError::Io(_))));
    }
}
