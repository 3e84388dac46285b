//! JSON file persistence layer
//!
//! `DataStore` owns the dataset file and the backup directory. It knows
//! nothing about validation: it deals in raw [`StudentRecord`] maps, and the
//! service layer decides what is a valid student.

pub mod file_io;

pub use file_io::{read_dataset, write_dataset_atomic, DatasetMap};

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use chrono::{DateTime, Local};
use tracing::{debug, error, info, warn};

use crate::config::paths::RosterPaths;
use crate::error::{RosterError, RosterResult};

/// Prefix and suffix of the store's own backup files
const BACKUP_PREFIX: &str = "students_backup_";
const BACKUP_SUFFIX: &str = ".json";

/// Metadata about the dataset file; every field is best-effort
#[derive(Debug, Clone)]
pub struct FileInfo {
    pub path: PathBuf,
    pub exists: bool,
    pub size: u64,
    pub last_modified: Option<DateTime<Local>>,
}

/// Owns the on-disk dataset and its backups
pub struct DataStore {
    data_file: PathBuf,
    backup_dir: PathBuf,
}

impl DataStore {
    /// Create a store rooted at the application paths
    pub fn new(paths: &RosterPaths) -> RosterResult<Self> {
        paths.ensure_directories()?;
        Ok(Self {
            data_file: paths.data_file(),
            backup_dir: paths.backup_dir(),
        })
    }

    /// Create a store over explicit files (useful for testing)
    pub fn with_files(data_file: PathBuf, backup_dir: PathBuf) -> RosterResult<Self> {
        if let Some(parent) = data_file.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| RosterError::io(parent.to_path_buf(), "create directory", e.to_string()))?;
        }
        fs::create_dir_all(&backup_dir)
            .map_err(|e| RosterError::io(backup_dir.clone(), "create directory", e.to_string()))?;
        Ok(Self {
            data_file,
            backup_dir,
        })
    }

    /// Path of the dataset file
    pub fn data_file(&self) -> &Path {
        &self.data_file
    }

    /// Path of the backup directory
    pub fn backup_dir(&self) -> &Path {
        &self.backup_dir
    }

    /// Load the dataset; an absent file is an empty dataset
    pub fn load(&self) -> RosterResult<DatasetMap> {
        debug!(path = %self.data_file.display(), "loading dataset");
        let data = read_dataset(&self.data_file)?;
        debug!(records = data.len(), "dataset loaded");
        Ok(data)
    }

    /// Replace the dataset file with the given map
    ///
    /// The write is atomic from the caller's perspective; a failed save
    /// commits nothing.
    pub fn save(&self, data: &DatasetMap) -> RosterResult<()> {
        debug!(path = %self.data_file.display(), records = data.len(), "saving dataset");
        write_dataset_atomic(&self.data_file, data)
    }

    /// Copy the dataset file into the backup directory
    ///
    /// The backup is named `students_backup_<YYYYMMDD_HHMMSS>.json` from the
    /// local capture time. Fails with `EmptyData` when there is nothing to
    /// back up.
    pub fn backup(&self) -> RosterResult<PathBuf> {
        fs::create_dir_all(&self.backup_dir).map_err(|e| RosterError::BackupRestore {
            operation: "backup",
            detail: e.to_string(),
        })?;

        if !self.data_file.exists() {
            return Err(RosterError::EmptyData("no data file to back up".into()));
        }
        let size = fs::metadata(&self.data_file)
            .map(|m| m.len())
            .unwrap_or(0);
        if size == 0 {
            return Err(RosterError::EmptyData("data file is empty".into()));
        }

        let timestamp = Local::now().format("%Y%m%d_%H%M%S");
        let backup_path = self
            .backup_dir
            .join(format!("{}{}{}", BACKUP_PREFIX, timestamp, BACKUP_SUFFIX));

        fs::copy(&self.data_file, &backup_path).map_err(|e| RosterError::BackupRestore {
            operation: "backup",
            detail: e.to_string(),
        })?;

        info!(backup = %backup_path.display(), "backup created");
        Ok(backup_path)
    }

    /// Overwrite the dataset file with a backup's contents
    ///
    /// The current file is backed up first, so a restore is itself
    /// recoverable. An absent or empty backup file fails with `EmptyData`.
    pub fn restore(&self, backup_file: &Path) -> RosterResult<()> {
        if !backup_file.exists() {
            return Err(RosterError::EmptyData(format!(
                "backup file does not exist: {}",
                backup_file.display()
            )));
        }
        let size = fs::metadata(backup_file).map(|m| m.len()).unwrap_or(0);
        if size == 0 {
            return Err(RosterError::EmptyData(format!(
                "backup file is empty: {}",
                backup_file.display()
            )));
        }

        let pre_restore = self.backup()?;
        info!(backup = %pre_restore.display(), "pre-restore backup created");

        fs::copy(backup_file, &self.data_file).map_err(|e| RosterError::BackupRestore {
            operation: "restore",
            detail: e.to_string(),
        })?;

        info!(from = %backup_file.display(), "dataset restored");
        Ok(())
    }

    /// Load an external dataset file and fold it into the store
    ///
    /// With `overwrite` the imported dataset replaces the stored one;
    /// otherwise the two are merged with imported ids taking precedence.
    /// Returns the imported map as loaded, not the merged result.
    pub fn import(&self, import_file: &Path, overwrite: bool) -> RosterResult<DatasetMap> {
        if !import_file.exists() {
            return Err(RosterError::EmptyData(format!(
                "import file does not exist: {}",
                import_file.display()
            )));
        }
        let size = fs::metadata(import_file).map(|m| m.len()).unwrap_or(0);
        if size == 0 {
            return Err(RosterError::EmptyData(format!(
                "import file is empty: {}",
                import_file.display()
            )));
        }

        let contents = fs::read_to_string(import_file)
            .map_err(|e| RosterError::io(import_file.to_path_buf(), "import", e.to_string()))?;

        // The top level must be an object of records
        let imported: DatasetMap = serde_json::from_str(&contents)
            .map_err(|e| RosterError::io(import_file.to_path_buf(), "import", e.to_string()))?;

        if overwrite {
            info!(records = imported.len(), "importing with overwrite");
            self.save(&imported)?;
        } else {
            let mut merged = self.load()?;
            let before = merged.len();
            merged.extend(imported.iter().map(|(k, v)| (k.clone(), v.clone())));
            info!(
                added = merged.len() - before,
                total = merged.len(),
                "importing with merge"
            );
            self.save(&merged)?;
        }

        Ok(imported)
    }

    /// Write the persisted dataset to an external file
    ///
    /// The dataset is re-read from the store, so the export reflects what is
    /// on disk rather than any caller's working copy. Only the `json` format
    /// is supported.
    pub fn export(&self, export_file: &Path, format: &str) -> RosterResult<()> {
        if !format.eq_ignore_ascii_case("json") {
            return Err(RosterError::InvalidOperation(format!(
                "unsupported export format: {}",
                format
            )));
        }

        let data = self.load()?;
        debug!(records = data.len(), "exporting dataset");

        if let Some(parent) = export_file.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|e| RosterError::io(export_file.to_path_buf(), "export", e.to_string()))?;
            }
        }

        let contents = serde_json::to_string_pretty(&data)
            .map_err(|e| RosterError::io(export_file.to_path_buf(), "export", e.to_string()))?;
        fs::write(export_file, contents)
            .map_err(|e| RosterError::io(export_file.to_path_buf(), "export", e.to_string()))?;

        info!(path = %export_file.display(), "dataset exported");
        Ok(())
    }

    /// Metadata about the dataset file; never fails
    pub fn file_info(&self) -> FileInfo {
        let default = FileInfo {
            path: self.data_file.clone(),
            exists: false,
            size: 0,
            last_modified: None,
        };

        if !self.data_file.exists() {
            return default;
        }

        match fs::metadata(&self.data_file) {
            Ok(meta) => FileInfo {
                path: self.data_file.clone(),
                exists: true,
                size: meta.len(),
                last_modified: meta.modified().ok().map(DateTime::<Local>::from),
            },
            Err(e) => {
                error!("failed to stat data file: {}", e);
                default
            }
        }
    }

    /// Delete the dataset file, taking a best-effort backup first
    pub fn clear(&self) -> RosterResult<()> {
        if !self.data_file.exists() {
            warn!("data file does not exist, nothing to clear");
            return Ok(());
        }

        match self.backup() {
            Ok(path) => info!(backup = %path.display(), "pre-clear backup created"),
            Err(e) => warn!("pre-clear backup failed, clearing anyway: {}", e),
        }

        fs::remove_file(&self.data_file)
            .map_err(|e| RosterError::io(self.data_file.clone(), "clear", e.to_string()))?;
        warn!(path = %self.data_file.display(), "data file deleted");
        Ok(())
    }

    /// Delete backups older than the retention window
    ///
    /// Only files matching the store's own naming convention are considered.
    /// Errors are logged and swallowed; the count of deleted files is
    /// returned, 0 on failure.
    pub fn cleanup_old_backups(&self, older_than: Duration) -> usize {
        match self.cleanup_old_backups_inner(older_than) {
            Ok(count) => {
                info!(deleted = count, "backup cleanup finished");
                count
            }
            Err(e) => {
                error!("backup cleanup failed: {}", e);
                0
            }
        }
    }

    fn cleanup_old_backups_inner(&self, older_than: Duration) -> RosterResult<usize> {
        if !self.backup_dir.exists() {
            return Ok(0);
        }

        let cutoff = SystemTime::now()
            .checked_sub(older_than)
            .unwrap_or(SystemTime::UNIX_EPOCH);
        let mut deleted = 0;

        let entries = fs::read_dir(&self.backup_dir)
            .map_err(|e| RosterError::io(self.backup_dir.clone(), "cleanup", e.to_string()))?;

        for entry in entries {
            let entry = entry
                .map_err(|e| RosterError::io(self.backup_dir.clone(), "cleanup", e.to_string()))?;
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if !name.starts_with(BACKUP_PREFIX) || !name.ends_with(BACKUP_SUFFIX) {
                continue;
            }

            let modified = entry
                .metadata()
                .and_then(|m| m.modified())
                .map_err(|e| RosterError::io(entry.path(), "cleanup", e.to_string()))?;

            if modified < cutoff {
                fs::remove_file(entry.path())
                    .map_err(|e| RosterError::io(entry.path(), "cleanup", e.to_string()))?;
                debug!(backup = %entry.path().display(), "old backup deleted");
                deleted += 1;
            }
        }

        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StudentRecord;
    use tempfile::TempDir;

    fn record(id: &str, name: &str) -> StudentRecord {
        StudentRecord {
            student_id: id.to_string(),
            name: name.to_string(),
            gender: "male".into(),
            age: 20,
            class_name: "CS-1".into(),
            contact: "13800000000".into(),
        }
    }

    fn dataset(ids: &[&str]) -> DatasetMap {
        ids.iter()
            .map(|id| (id.to_string(), record(id, "Zhang San")))
            .collect()
    }

    fn test_store() -> (DataStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = DataStore::with_files(
            temp_dir.path().join("data").join("students.json"),
            temp_dir.path().join("backups"),
        )
        .unwrap();
        (store, temp_dir)
    }

    #[test]
    fn test_load_absent_is_empty() {
        let (store, _temp) = test_store();
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_load_round_trip() {
        let (store, _temp) = test_store();
        let data = dataset(&["100001", "100002"]);

        store.save(&data).unwrap();
        assert_eq!(store.load().unwrap(), data);
    }

    #[test]
    fn test_backup_requires_data() {
        let (store, _temp) = test_store();

        // No file at all
        assert!(matches!(
            store.backup(),
            Err(RosterError::EmptyData(_))
        ));

        // Zero-length file
        fs::write(store.data_file(), "").unwrap();
        assert!(matches!(store.backup(), Err(RosterError::EmptyData(_))));
    }

    #[test]
    fn test_backup_naming_convention() {
        let (store, _temp) = test_store();
        store.save(&dataset(&["100001"])).unwrap();

        let path = store.backup().unwrap();
        assert!(path.exists());

        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("students_backup_"));
        assert!(name.ends_with(".json"));
        // students_backup_YYYYMMDD_HHMMSS.json
        assert_eq!(name.len(), "students_backup_".len() + 15 + ".json".len());
    }

    #[test]
    fn test_restore_round_trip_and_pre_restore_backup() {
        let (store, temp) = test_store();
        store.save(&dataset(&["100001"])).unwrap();

        // Snapshot outside the backup directory to avoid timestamp collisions
        let snapshot = temp.path().join("snapshot.json");
        let backup = store.backup().unwrap();
        fs::rename(&backup, &snapshot).unwrap();

        // Mutate the dataset
        store.save(&dataset(&["100002", "100003"])).unwrap();

        store.restore(&snapshot).unwrap();
        let restored = store.load().unwrap();
        assert_eq!(restored.len(), 1);
        assert!(restored.contains_key("100001"));

        // The pre-restore state is itself recoverable
        let backups: Vec<_> = fs::read_dir(store.backup_dir())
            .unwrap()
            .map(|e| e.unwrap().path())
            .collect();
        assert_eq!(backups.len(), 1);
        let pre_restore = read_dataset(&backups[0]).unwrap();
        assert!(pre_restore.contains_key("100002"));
    }

    #[test]
    fn test_restore_preconditions() {
        let (store, temp) = test_store();
        store.save(&dataset(&["100001"])).unwrap();

        let missing = temp.path().join("missing.json");
        assert!(matches!(
            store.restore(&missing),
            Err(RosterError::EmptyData(_))
        ));

        let empty = temp.path().join("empty.json");
        fs::write(&empty, "").unwrap();
        assert!(matches!(
            store.restore(&empty),
            Err(RosterError::EmptyData(_))
        ));
    }

    #[test]
    fn test_import_merge_prefers_imported() {
        let (store, temp) = test_store();

        let mut current = DatasetMap::new();
        current.insert("100001".into(), record("100001", "Zhang San"));
        current.insert("100002".into(), record("100002", "Li Si"));
        store.save(&current).unwrap();

        let mut incoming = DatasetMap::new();
        incoming.insert("100002".into(), record("100002", "Wang Wu"));
        incoming.insert("100003".into(), record("100003", "Zhao Liu"));
        let import_file = temp.path().join("incoming.json");
        fs::write(
            &import_file,
            serde_json::to_string_pretty(&incoming).unwrap(),
        )
        .unwrap();

        let returned = store.import(&import_file, false).unwrap();
        assert_eq!(returned, incoming);

        let merged = store.load().unwrap();
        assert_eq!(merged.len(), 3);
        assert_eq!(merged["100002"].name, "Wang Wu");
        assert_eq!(merged["100001"].name, "Zhang San");
    }

    #[test]
    fn test_import_overwrite_replaces() {
        let (store, temp) = test_store();
        store.save(&dataset(&["100001", "100002"])).unwrap();

        let incoming = dataset(&["100002", "100003"]);
        let import_file = temp.path().join("incoming.json");
        fs::write(
            &import_file,
            serde_json::to_string_pretty(&incoming).unwrap(),
        )
        .unwrap();

        store.import(&import_file, true).unwrap();

        let stored = store.load().unwrap();
        assert_eq!(stored.len(), 2);
        assert!(!stored.contains_key("100001"));
        assert!(stored.contains_key("100003"));
    }

    #[test]
    fn test_import_rejects_bad_shape() {
        let (store, temp) = test_store();

        let import_file = temp.path().join("bad.json");
        fs::write(&import_file, "[1, 2, 3]").unwrap();
        assert!(store.import(&import_file, false).unwrap_err().is_io());

        let missing = temp.path().join("missing.json");
        assert!(matches!(
            store.import(&missing, false),
            Err(RosterError::EmptyData(_))
        ));
    }

    #[test]
    fn test_export_json_only() {
        let (store, temp) = test_store();
        store.save(&dataset(&["100001"])).unwrap();

        let out = temp.path().join("exports").join("out.json");
        store.export(&out, "json").unwrap();
        assert_eq!(read_dataset(&out).unwrap(), store.load().unwrap());

        assert!(matches!(
            store.export(&out, "csv"),
            Err(RosterError::InvalidOperation(_))
        ));
    }

    #[test]
    fn test_file_info() {
        let (store, _temp) = test_store();

        let info = store.file_info();
        assert!(!info.exists);
        assert_eq!(info.size, 0);
        assert!(info.last_modified.is_none());

        store.save(&dataset(&["100001"])).unwrap();
        let info = store.file_info();
        assert!(info.exists);
        assert!(info.size > 0);
        assert!(info.last_modified.is_some());
    }

    #[test]
    fn test_clear_backs_up_then_deletes() {
        let (store, _temp) = test_store();
        store.save(&dataset(&["100001"])).unwrap();

        store.clear().unwrap();
        assert!(!store.data_file().exists());

        // A pre-clear backup was left behind
        let backups: Vec<_> = fs::read_dir(store.backup_dir())
            .unwrap()
            .map(|e| e.unwrap().path())
            .collect();
        assert_eq!(backups.len(), 1);

        // Clearing an already-absent file is not an error
        store.clear().unwrap();
    }

    #[test]
    fn test_cleanup_old_backups() {
        let (store, _temp) = test_store();
        store.save(&dataset(&["100001"])).unwrap();
        store.backup().unwrap();

        // Unrelated files are never touched
        fs::write(store.backup_dir().join("notes.txt"), "keep me").unwrap();

        // Generous window keeps the fresh backup
        assert_eq!(store.cleanup_old_backups(Duration::from_secs(3600)), 0);

        // Zero window deletes anything older than "now"
        std::thread::sleep(Duration::from_millis(50));
        assert_eq!(store.cleanup_old_backups(Duration::ZERO), 1);
        assert!(store.backup_dir().join("notes.txt").exists());
    }

    #[test]
    fn test_cleanup_missing_dir_returns_zero() {
        let temp_dir = TempDir::new().unwrap();
        let store = DataStore::with_files(
            temp_dir.path().join("students.json"),
            temp_dir.path().join("backups"),
        )
        .unwrap();
        fs::remove_dir(store.backup_dir()).unwrap();

        assert_eq!(store.cleanup_old_backups(Duration::ZERO), 0);
    }
}
