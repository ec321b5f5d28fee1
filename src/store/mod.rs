//! JSON-file backed entry store.
//!
//! The whole entry list lives in one human-readable file and is rewritten
//! on every append. Writes go to a temporary file in the same directory and
//! are renamed over the target, so a crash mid-write never leaves a
//! half-written log behind. An advisory lock on a sidecar file makes a
//! second concurrent session fail fast instead of silently losing writes.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use fs2::FileExt;
use log::info;

use crate::error::{Result, TiltError};
use crate::models::LogEntry;

#[derive(Debug)]
pub struct EntryStore {
    path: PathBuf,
    lock_path: PathBuf,
    lock_file: File,
    entries: Vec<LogEntry>,
}

impl EntryStore {
    /// Opens the store at `path`, loading any existing entries.
    ///
    /// A missing or empty backing file yields an empty store. A backing
    /// file that exists but cannot be parsed yields `StorageCorruption`
    /// and the file is left untouched.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| TiltError::io(parent, source))?;
            }
        }

        let lock_path = path.with_extension("lock");
        let lock_file = acquire_lock(&lock_path)?;

        let entries = load_entries(&path)?;
        info!(
            "Opened entry log at {} ({} entries)",
            path.display(),
            entries.len()
        );

        Ok(Self {
            path,
            lock_path,
            lock_file,
            entries,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Appends `entry` and rewrites the backing file.
    ///
    /// The entry is kept in memory only once the rewrite has succeeded, so
    /// the file and the in-memory list never disagree.
    pub fn append(&mut self, entry: LogEntry) -> Result<()> {
        entry.validate()?;

        self.entries.push(entry);
        if let Err(err) = self.persist() {
            self.entries.pop();
            return Err(err);
        }
        Ok(())
    }

    /// Entries whose timestamp's date falls within `[start, end]`,
    /// inclusive. Stored order is preserved.
    pub fn filter_by_date_range(&self, start: NaiveDate, end: NaiveDate) -> Vec<LogEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.logged_between(start, end))
            .cloned()
            .collect()
    }

    fn persist(&self) -> Result<()> {
        let serialized = serde_json::to_string_pretty(&self.entries)
            .map_err(|source| TiltError::io(&self.path, source.into()))?;

        let tmp_path = temp_path(&self.path);
        let mut tmp_file =
            File::create(&tmp_path).map_err(|source| TiltError::io(&tmp_path, source))?;
        tmp_file
            .write_all(serialized.as_bytes())
            .map_err(|source| TiltError::io(&tmp_path, source))?;
        tmp_file
            .sync_all()
            .map_err(|source| TiltError::io(&tmp_path, source))?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path).map_err(|source| TiltError::io(&self.path, source))
    }
}

impl Drop for EntryStore {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.lock_file);
        let _ = fs::remove_file(&self.lock_path);
    }
}

fn load_entries(path: &Path) -> Result<Vec<LogEntry>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let contents = fs::read(path).map_err(|source| TiltError::io(path, source))?;

    if contents.iter().all(|byte| byte.is_ascii_whitespace()) {
        return Ok(Vec::new());
    }

    // Non-UTF-8 content counts as corruption, not an IO failure.
    serde_json::from_slice(&contents).map_err(|source| TiltError::StorageCorruption {
        path: path.to_path_buf(),
        source,
    })
}

fn acquire_lock(lock_path: &Path) -> Result<File> {
    let lock_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(lock_path)
        .map_err(|source| TiltError::io(lock_path, source))?;

    lock_file
        .try_lock_exclusive()
        .map_err(|_| TiltError::StoreLocked {
            path: lock_path.to_path_buf(),
        })?;

    Ok(lock_file)
}

fn temp_path(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| "log.json".to_string());
    path.with_file_name(format!(".{}.tmp", file_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NoteEntry, NoteInput, Posture, QuickLogEntry};
    use tempfile::TempDir;
    use uuid::Uuid;

    fn quick_entry_at(timestamp: &str) -> LogEntry {
        LogEntry::QuickLog(QuickLogEntry {
            id: Uuid::new_v4().to_string(),
            timestamp: timestamp.parse().unwrap(),
            posture: Posture::Standing,
            heart_rate: 88,
            blood_pressure: None,
            severity: 4,
            hydration_ml: Some(500),
            salt_intake_g: None,
            symptoms: vec!["Dizziness".to_string()],
            triggers: vec!["Heat".to_string()],
            what_helped: None,
        })
    }

    #[test]
    fn test_open_missing_file_starts_empty() {
        let dir = TempDir::new().unwrap();
        let store = EntryStore::open(dir.path().join("data").join("log.json")).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_append_then_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("log.json");

        let written = {
            let mut store = EntryStore::open(&path).unwrap();
            store.append(quick_entry_at("2024-03-09T08:00:00Z")).unwrap();
            store.append(quick_entry_at("2024-03-10T09:30:00Z")).unwrap();
            store.entries().to_vec()
        };

        let store = EntryStore::open(&path).unwrap();
        assert_eq!(store.entries(), written.as_slice());
    }

    #[test]
    fn test_no_temp_file_left_behind() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("log.json");

        let mut store = EntryStore::open(&path).unwrap();
        store.append(quick_entry_at("2024-03-10T09:30:00Z")).unwrap();

        assert!(path.exists());
        assert!(!dir.path().join(".log.json.tmp").exists());
    }

    #[test]
    fn test_empty_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("log.json");
        fs::write(&path, "  \n").unwrap();

        let store = EntryStore::open(&path).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_malformed_file_surfaces_corruption() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("log.json");
        fs::write(&path, "[{\"kind\": \"quick_log\", trunca").unwrap();

        let err = EntryStore::open(&path).unwrap_err();
        assert!(err.is_corruption());

        // The unreadable file must survive for manual recovery.
        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "[{\"kind\": \"quick_log\", trunca");
    }

    #[test]
    fn test_non_utf8_file_surfaces_corruption() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("log.json");
        fs::write(&path, b"[\xff\xfe]").unwrap();

        let err = EntryStore::open(&path).unwrap_err();
        assert!(err.is_corruption());
        assert_eq!(fs::read(&path).unwrap(), b"[\xff\xfe]");
    }

    #[test]
    fn test_filter_by_date_range_inclusive() {
        let dir = TempDir::new().unwrap();
        let mut store = EntryStore::open(dir.path().join("log.json")).unwrap();

        store.append(quick_entry_at("2024-03-09T23:00:00Z")).unwrap();
        store.append(quick_entry_at("2024-03-10T00:00:00Z")).unwrap();
        store.append(quick_entry_at("2024-03-10T23:59:00Z")).unwrap();
        store.append(quick_entry_at("2024-03-11T00:01:00Z")).unwrap();

        let day = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let matched = store.filter_by_date_range(day, day);

        assert_eq!(matched.len(), 2);
        assert!(matched.iter().all(|entry| {
            entry.timestamp().date_naive() == day
        }));
    }

    #[test]
    fn test_second_session_fails_fast() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("log.json");

        let first = EntryStore::open(&path).unwrap();
        let err = EntryStore::open(&path).unwrap_err();
        assert!(err.is_locked());

        drop(first);
        assert!(EntryStore::open(&path).is_ok());
    }

    #[test]
    fn test_append_rejects_empty_note() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("log.json");
        let mut store = EntryStore::open(&path).unwrap();

        let err = store
            .append(LogEntry::Note(NoteEntry::new(NoteInput::default())))
            .unwrap_err();

        assert!(matches!(err, TiltError::Validation(_)));
        assert!(store.is_empty());
        assert!(!path.exists());
    }
}
