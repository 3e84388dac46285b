//! End-to-end CLI tests
//!
//! Each test runs the binary against its own temporary data directory via
//! `ROSTER_DATA_DIR`, so tests never touch real user data and can run in
//! parallel.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn roster(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("roster").unwrap();
    cmd.env("ROSTER_DATA_DIR", data_dir.path());
    cmd
}

fn add_student(data_dir: &TempDir, id: &str, name: &str, class: &str) {
    roster(data_dir)
        .args([
            "student", "add", id, name, "--gender", "male", "--age", "20", "--class", class,
            "--contact", "13800000000",
        ])
        .assert()
        .success();
}

#[test]
fn add_then_show() {
    let dir = TempDir::new().unwrap();
    add_student(&dir, "100001", "Zhang San", "CS-1");

    roster(&dir)
        .args(["student", "show", "100001"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Zhang San"))
        .stdout(predicate::str::contains("CS-1"));
}

#[test]
fn add_rejects_invalid_age() {
    let dir = TempDir::new().unwrap();

    roster(&dir)
        .args([
            "student", "add", "100001", "Zhang San", "--gender", "male", "--age", "99",
            "--class", "CS-1", "--contact", "13800000000",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid age"));
}

#[test]
fn duplicate_add_fails() {
    let dir = TempDir::new().unwrap();
    add_student(&dir, "100001", "Zhang San", "CS-1");

    roster(&dir)
        .args([
            "student", "add", "100001", "Li Si", "--gender", "female", "--age", "21",
            "--class", "CS-2", "--contact", "13900000000",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn show_unknown_student_fails() {
    let dir = TempDir::new().unwrap();

    roster(&dir)
        .args(["student", "show", "999999"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No student with id '999999'"));
}

#[test]
fn list_and_count() {
    let dir = TempDir::new().unwrap();
    add_student(&dir, "100001", "Zhang San", "CS-1");
    add_student(&dir, "100002", "Li Si", "CS-2");

    roster(&dir)
        .args(["student", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Zhang San"))
        .stdout(predicate::str::contains("Total: 2 students"));

    roster(&dir)
        .args(["student", "count"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 students"));
}

#[test]
fn search_by_name_and_class() {
    let dir = TempDir::new().unwrap();
    add_student(&dir, "100001", "Zhang San", "CS-1");
    add_student(&dir, "100002", "Li Si", "CS-2");

    roster(&dir)
        .args(["student", "search", "--name", "zhang"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Zhang San"))
        .stdout(predicate::str::contains("Li Si").not());

    roster(&dir)
        .args(["student", "search", "--class", "CS-2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Li Si"));

    // Exactly one filter is required
    roster(&dir)
        .args(["student", "search"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--name or --class"));
}

#[test]
fn update_student() {
    let dir = TempDir::new().unwrap();
    add_student(&dir, "100001", "Zhang San", "CS-1");

    roster(&dir)
        .args(["student", "update", "100001", "--age", "21", "--class", "CS-2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("updated"));

    roster(&dir)
        .args(["student", "show", "100001"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Age:     21"))
        .stdout(predicate::str::contains("CS-2"));

    // No fields set is a successful no-op
    roster(&dir)
        .args(["student", "update", "100001"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing to update"));
}

#[test]
fn delete_single_and_batch() {
    let dir = TempDir::new().unwrap();
    add_student(&dir, "100001", "Zhang San", "CS-1");
    add_student(&dir, "100002", "Li Si", "CS-1");
    add_student(&dir, "100003", "Wang Wu", "CS-2");

    roster(&dir)
        .args(["student", "delete", "100003"])
        .assert()
        .success()
        .stdout(predicate::str::contains("deleted"));

    roster(&dir)
        .args(["student", "delete", "100001", "100002", "999999"])
        .assert()
        .success()
        .stdout(predicate::str::contains("deleted 2 students"))
        .stdout(predicate::str::contains("not found: 999999"));

    roster(&dir)
        .args(["student", "count"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0 students"));
}

#[test]
fn delete_class() {
    let dir = TempDir::new().unwrap();
    add_student(&dir, "100001", "Zhang San", "CS-1");
    add_student(&dir, "100002", "Li Si", "CS-1");
    add_student(&dir, "100003", "Wang Wu", "CS-2");

    roster(&dir)
        .args(["student", "delete-class", "CS-1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("deleted 2 students"));

    roster(&dir)
        .args(["student", "classes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("CS-2"))
        .stdout(predicate::str::contains("CS-1").not());
}

#[test]
fn backup_restore_round_trip() {
    let dir = TempDir::new().unwrap();
    add_student(&dir, "100001", "Zhang San", "CS-1");

    let output = roster(&dir)
        .args(["data", "backup"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Backup created"))
        .get_output()
        .stdout
        .clone();
    let backup_path = String::from_utf8(output)
        .unwrap()
        .trim()
        .strip_prefix("Backup created: ")
        .unwrap()
        .to_string();

    // Move the backup out of the backup directory so the pre-restore backup
    // cannot collide with it
    let snapshot = dir.path().join("snapshot.json");
    std::fs::rename(&backup_path, &snapshot).unwrap();

    roster(&dir)
        .args(["student", "delete", "100001"])
        .assert()
        .success();

    roster(&dir)
        .args(["data", "restore", snapshot.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 students"));

    roster(&dir)
        .args(["student", "show", "100001"])
        .assert()
        .success();
}

#[test]
fn backup_with_no_data_fails() {
    let dir = TempDir::new().unwrap();

    roster(&dir)
        .args(["data", "backup"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Nothing to work with"));
}

#[test]
fn export_then_import() {
    let dir = TempDir::new().unwrap();
    add_student(&dir, "100001", "Zhang San", "CS-1");

    let export = dir.path().join("out.json");
    roster(&dir)
        .args(["data", "export", export.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported to"));

    roster(&dir)
        .args(["student", "delete", "100001"])
        .assert()
        .success();

    roster(&dir)
        .args(["data", "import", export.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 1 records"));

    roster(&dir)
        .args(["student", "show", "100001"])
        .assert()
        .success();
}

#[test]
fn export_rejects_unknown_format() {
    let dir = TempDir::new().unwrap();
    add_student(&dir, "100001", "Zhang San", "CS-1");

    roster(&dir)
        .args(["data", "export", "out.csv", "--format", "csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported export format"));
}

#[test]
fn clear_requires_confirmation() {
    let dir = TempDir::new().unwrap();
    add_student(&dir, "100001", "Zhang San", "CS-1");

    roster(&dir)
        .args(["data", "clear"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--yes"));

    roster(&dir)
        .args(["data", "clear", "--yes"])
        .assert()
        .success();

    roster(&dir)
        .args(["student", "count"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0 students"));
}

#[test]
fn info_shows_data_file() {
    let dir = TempDir::new().unwrap();

    roster(&dir)
        .args(["data", "info"])
        .assert()
        .success()
        .stdout(predicate::str::contains("not created yet"));

    add_student(&dir, "100001", "Zhang San", "CS-1");

    roster(&dir)
        .args(["data", "info"])
        .assert()
        .success()
        .stdout(predicate::str::contains("students.json"))
        .stdout(predicate::str::contains("Students: 1"));
}

#[test]
fn config_shows_paths() {
    let dir = TempDir::new().unwrap();

    roster(&dir)
        .args(["config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("students.json"))
        .stdout(predicate::str::contains("Backup retention"));
}
