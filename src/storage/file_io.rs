//! Dataset file I/O with atomic writes
//!
//! The dataset is one UTF-8 JSON object keyed by student id. Writes go to a
//! temp file in the same directory, are flushed and synced, then renamed
//! over the target, so the data file is either fully replaced or untouched.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use crate::error::{RosterError, RosterResult};
use crate::models::StudentRecord;

/// The on-disk dataset: student id -> raw record
pub type DatasetMap = BTreeMap<String, StudentRecord>;

/// Read the dataset file, returning an empty map if it doesn't exist
pub fn read_dataset(path: &Path) -> RosterResult<DatasetMap> {
    if !path.exists() {
        return Ok(DatasetMap::new());
    }

    let file =
        File::open(path).map_err(|e| RosterError::io(path.to_path_buf(), "load", e.to_string()))?;

    let reader = BufReader::new(file);
    serde_json::from_reader(reader)
        .map_err(|e| RosterError::io(path.to_path_buf(), "load", e.to_string()))
}

/// Write the whole dataset atomically (write to temp, then rename)
pub fn write_dataset_atomic(path: &Path, data: &DatasetMap) -> RosterResult<()> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| RosterError::io(parent.to_path_buf(), "save", e.to_string()))?;
    }

    // Temp file in the same directory, important for atomic rename
    let temp_path = path.with_extension("json.tmp");

    let file = File::create(&temp_path)
        .map_err(|e| RosterError::io(path.to_path_buf(), "save", e.to_string()))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| RosterError::io(path.to_path_buf(), "save", e.to_string()))?;

    writer
        .flush()
        .map_err(|e| RosterError::io(path.to_path_buf(), "save", e.to_string()))?;

    // Sync to disk before rename
    writer
        .get_ref()
        .sync_all()
        .map_err(|e| RosterError::io(path.to_path_buf(), "save", e.to_string()))?;

    fs::rename(&temp_path, path).map_err(|e| {
        // Try to clean up the temp file if rename fails
        let _ = fs::remove_file(&temp_path);
        RosterError::io(path.to_path_buf(), "save", e.to_string())
    })?;

    Ok(())
}
