//! Student service
//!
//! Owns the authoritative in-memory map of id -> [`Student`] and mediates
//! all mutations. Every mutating operation validates its input, checks its
//! existence precondition, applies the change to the map, then serializes
//! the whole map and saves it; if the save fails, the map is put back in a
//! disk-consistent state (by removing the inserted record, or by reloading
//! from disk) before the error propagates. Memory therefore always mirrors
//! the last successfully saved dataset.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::error::{RosterError, RosterResult};
use crate::models::{Student, StudentRecord, StudentUpdate};
use crate::storage::{DataStore, DatasetMap, FileInfo};
use crate::validation;

/// The record manager for the student roster
pub struct StudentService {
    store: DataStore,
    students: BTreeMap<String, Student>,
}

impl StudentService {
    /// Create a service over a store, loading the dataset once
    pub fn new(store: DataStore) -> RosterResult<Self> {
        let mut service = Self {
            store,
            students: BTreeMap::new(),
        };
        service.reload()?;
        info!(students = service.students.len(), "student service ready");
        Ok(service)
    }

    /// Replace the in-memory map with the dataset currently on disk
    ///
    /// This is the compensating action after a failed save: disk holds the
    /// last known-good state, so reloading guarantees memory matches it.
    /// Rows that parse but violate a field rule are logged and skipped so a
    /// single corrupt record does not take the whole dataset down.
    pub fn reload(&mut self) -> RosterResult<()> {
        let raw = self.store.load()?;
        let mut students = BTreeMap::new();

        for (id, record) in raw {
            match Student::try_from(record) {
                Ok(student) => {
                    students.insert(id, student);
                }
                Err(e) => {
                    error!(id = %id, "skipping invalid record: {}", e);
                }
            }
        }

        debug!(students = students.len(), "dataset loaded into memory");
        self.students = students;
        Ok(())
    }

    fn snapshot(&self) -> DatasetMap {
        self.students
            .iter()
            .map(|(id, student)| (id.clone(), student.to_record()))
            .collect()
    }

    fn persist(&self) -> RosterResult<()> {
        self.store.save(&self.snapshot())
    }

    /// Reload after a failed save, keeping the save error as the outcome
    fn rollback_via_reload(&mut self, save_err: RosterError) -> RosterError {
        if let Err(reload_err) = self.reload() {
            error!("rollback reload failed: {}", reload_err);
        }
        save_err
    }

    fn id_is_valid(id: &str) -> bool {
        validation::validate_student_id(id).is_ok()
    }

    /// Add a new student
    pub fn add(&mut self, record: StudentRecord) -> RosterResult<String> {
        validation::validate_student_id(&record.student_id)
            .map_err(|reason| RosterError::validation("student_id", reason))?;

        if self.students.contains_key(&record.student_id) {
            warn!(id = %record.student_id, "add rejected: student already exists");
            return Err(RosterError::duplicate(&record.student_id));
        }

        let id = record.student_id.clone();
        let student = Student::try_from(record)?;
        let name = student.name().to_string();
        info!(id = %id, name = %name, "adding student");

        self.students.insert(id.clone(), student);

        if let Err(save_err) = self.persist() {
            // Undo the insert; nothing was committed to disk
            self.students.remove(&id);
            error!(id = %id, "save failed, add rolled back");
            return Err(save_err);
        }

        Ok(format!("student {} added", name))
    }

    /// Look up a student by exact id
    pub fn get(&self, id: &str) -> RosterResult<&Student> {
        if !Self::id_is_valid(id) {
            debug!(id = %id, "lookup with invalid id format");
            return Err(RosterError::not_found(id));
        }
        self.students
            .get(id)
            .ok_or_else(|| RosterError::not_found(id))
    }

    /// Case-insensitive substring search over names
    ///
    /// An empty query returns an empty result, not "match all".
    pub fn search_by_name(&self, name: &str) -> Vec<&Student> {
        if name.is_empty() {
            return Vec::new();
        }
        let needle = name.to_lowercase();
        self.students
            .values()
            .filter(|s| s.name().to_lowercase().contains(&needle))
            .collect()
    }

    /// Exact class-name search; an empty query returns an empty result
    pub fn search_by_class(&self, class_name: &str) -> Vec<&Student> {
        if class_name.is_empty() {
            return Vec::new();
        }
        self.students
            .values()
            .filter(|s| s.class_name() == class_name)
            .collect()
    }

    /// Apply a partial update to a student
    ///
    /// An update with no set field is a successful no-op and does not save;
    /// any update with at least one set field saves the full dataset.
    pub fn update(&mut self, id: &str, update: &StudentUpdate) -> RosterResult<String> {
        if !Self::id_is_valid(id) {
            return Err(RosterError::validation(
                "student_id",
                "student id must be 6-20 digits",
            ));
        }

        let student = self
            .students
            .get(id)
            .ok_or_else(|| RosterError::not_found(id))?;
        let name = student.name().to_string();

        if update.is_empty() {
            info!(id = %id, "update with no fields set");
            return Ok("nothing to update".into());
        }

        // Validate on a working copy; the map is untouched on rejection
        let updated = student.with_update(update)?;
        info!(id = %id, name = %name, "updating student");
        self.students.insert(id.to_string(), updated);

        if let Err(save_err) = self.persist() {
            error!(id = %id, "save failed, update rolled back");
            return Err(self.rollback_via_reload(save_err));
        }

        Ok(format!("student {} updated", name))
    }

    /// Delete a student by id
    pub fn delete(&mut self, id: &str) -> RosterResult<String> {
        if !Self::id_is_valid(id) {
            return Err(RosterError::validation(
                "student_id",
                "student id must be 6-20 digits",
            ));
        }

        let student = self
            .students
            .remove(id)
            .ok_or_else(|| RosterError::not_found(id))?;
        let name = student.name().to_string();
        info!(id = %id, name = %name, "deleting student");

        if let Err(save_err) = self.persist() {
            error!(id = %id, "save failed, delete rolled back");
            return Err(self.rollback_via_reload(save_err));
        }

        Ok(format!("student {} deleted", name))
    }

    /// Delete several students in one save
    ///
    /// The input is partitioned into syntactically invalid ids, ids with no
    /// matching student, and deletable ids; only the deletable set is
    /// removed. When nothing is deletable no save happens and the count is
    /// zero. The message describes all three partitions.
    pub fn delete_batch(&mut self, ids: &[String]) -> RosterResult<(usize, String)> {
        let mut invalid = Vec::new();
        let mut not_found = Vec::new();
        let mut deletable = Vec::new();

        for id in ids {
            if !Self::id_is_valid(id) {
                invalid.push(id.clone());
            } else if self.students.contains_key(id) {
                if !deletable.contains(id) {
                    deletable.push(id.clone());
                }
            } else {
                not_found.push(id.clone());
            }
        }

        if !invalid.is_empty() {
            warn!("invalid ids in batch delete: {}", invalid.join(", "));
        }
        if !not_found.is_empty() {
            warn!("unknown ids in batch delete: {}", not_found.join(", "));
        }

        if deletable.is_empty() {
            return Ok((0, "no matching students to delete".into()));
        }

        info!(count = deletable.len(), "batch deleting students");
        for id in &deletable {
            self.students.remove(id);
        }

        if let Err(save_err) = self.persist() {
            error!("save failed, batch delete rolled back");
            return Err(self.rollback_via_reload(save_err));
        }

        let mut message = format!("deleted {} students", deletable.len());
        if !not_found.is_empty() {
            message.push_str(&format!("; not found: {}", not_found.join(", ")));
        }
        if !invalid.is_empty() {
            message.push_str(&format!("; invalid ids: {}", invalid.join(", ")));
        }

        Ok((deletable.len(), message))
    }

    /// Delete every student in a class
    pub fn delete_by_class(&mut self, class_name: &str) -> RosterResult<(usize, String)> {
        if class_name.is_empty() {
            return Err(RosterError::validation(
                "class_name",
                "class name must not be empty",
            ));
        }

        let ids: Vec<String> = self
            .students
            .values()
            .filter(|s| s.class_name() == class_name)
            .map(|s| s.id().to_string())
            .collect();

        if ids.is_empty() {
            info!(class = %class_name, "no students in class to delete");
            return Ok((0, format!("no students in class {}", class_name)));
        }

        info!(class = %class_name, count = ids.len(), "deleting class");
        self.delete_batch(&ids)
    }

    /// All students, ordered by id
    pub fn list_all(&self) -> Vec<&Student> {
        self.students.values().collect()
    }

    /// Total number of students
    pub fn count(&self) -> usize {
        self.students.len()
    }

    /// Sorted, deduplicated class names
    pub fn class_list(&self) -> Vec<String> {
        self.students
            .values()
            .map(|s| s.class_name().to_string())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Number of students in a class; an empty name counts nothing
    pub fn count_in_class(&self, class_name: &str) -> usize {
        if class_name.is_empty() {
            return 0;
        }
        self.students
            .values()
            .filter(|s| s.class_name() == class_name)
            .count()
    }

    /// Back up the dataset file
    pub fn backup(&self) -> RosterResult<PathBuf> {
        self.store.backup()
    }

    /// Restore the dataset from a backup file, then reload
    pub fn restore_from(&mut self, backup_file: &Path) -> RosterResult<()> {
        self.store.restore(backup_file)?;
        self.reload()
    }

    /// Import an external dataset file, then unconditionally reload
    ///
    /// The reload happens on the error path too, so memory can never
    /// diverge from disk after an import attempt.
    pub fn import_from(&mut self, import_file: &Path, overwrite: bool) -> RosterResult<DatasetMap> {
        let imported = self.store.import(import_file, overwrite);

        if let Err(reload_err) = self.reload() {
            error!("reload after import failed: {}", reload_err);
            if imported.is_ok() {
                return Err(reload_err);
            }
        }

        imported
    }

    /// Export the persisted dataset, then reload
    pub fn export_to(&mut self, export_file: &Path, format: &str) -> RosterResult<()> {
        let result = self.store.export(export_file, format);

        if let Err(reload_err) = self.reload() {
            error!("reload after export failed: {}", reload_err);
            if result.is_ok() {
                return Err(reload_err);
            }
        }

        result
    }

    /// Delete the dataset (with a best-effort pre-clear backup) and empty
    /// the in-memory map
    pub fn clear_all(&mut self) -> RosterResult<()> {
        self.store.clear()?;
        self.students.clear();
        Ok(())
    }

    /// Metadata about the dataset file
    pub fn file_info(&self) -> FileInfo {
        self.store.file_info()
    }

    /// Delete backups older than the retention window
    pub fn cleanup_backups(&self, older_than: Duration) -> usize {
        self.store.cleanup_old_backups(older_than)
    }
}
