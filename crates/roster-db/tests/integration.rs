//! Integration tests for the `roster-db` flat-file backend.
//!
//! Each test works in its own temporary directory, so tests can run in
//! parallel and leave nothing behind.

#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::missing_panics_doc,
    clippy::indexing_slicing
)]

use std::fs;
use std::path::PathBuf;

use roster_db::{Backend, DbError, JsonFileBackend, StudentStore};
use roster_types::Student;
use tempfile::TempDir;

// =============================================================================
// Helpers
// =============================================================================

fn setup_temp_file() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("create temp dir");
    let path = temp_dir.path().join("data").join("school.json");
    (temp_dir, path)
}

fn student(name: &str, id: &str, term: i64) -> Student {
    Student::new(name, id, term).unwrap()
}

// =============================================================================
// Initialization
// =============================================================================

#[test]
fn ensure_initialized_creates_empty_roster() {
    let (_temp, path) = setup_temp_file();
    let backend = JsonFileBackend::new(&path);

    assert!(backend.ensure_initialized().unwrap());
    assert_eq!(fs::read_to_string(&path).unwrap(), "[]");
    assert!(StudentStore::load(&backend).unwrap().is_empty());
}

#[test]
fn ensure_initialized_keeps_existing_file() {
    let (_temp, path) = setup_temp_file();
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, r#"[{"name":"Ann","student_id":"A01234567","term":3}]"#).unwrap();

    let backend = JsonFileBackend::new(&path);
    assert!(!backend.ensure_initialized().unwrap());

    let store = StudentStore::load(&backend).unwrap();
    assert_eq!(store.len(), 1);
    assert_eq!(store.students()[0].term(), 3);
}

#[test]
fn missing_file_is_an_io_error() {
    let (_temp, path) = setup_temp_file();
    let backend = JsonFileBackend::new(&path);

    let err = StudentStore::load(&backend).unwrap_err();
    assert!(matches!(err, DbError::Io { .. }));
}

// =============================================================================
// Round trips
// =============================================================================

#[test]
fn save_then_load_round_trips_through_disk() {
    let (_temp, path) = setup_temp_file();
    let backend = JsonFileBackend::new(&path);
    backend.ensure_initialized().unwrap();

    let mut store = StudentStore::load(&backend).unwrap();
    store.add(student("Ann Lee", "A01234567", 2));
    store.add(student("Bo Chen", "A07654321", 1));
    store.add(student("Ann Lee", "A01234567", 5));
    store.save(&backend).unwrap();

    let reloaded = StudentStore::load(&backend).unwrap();
    assert_eq!(reloaded, store);
    assert_eq!(reloaded.get_by_id("A01234567").unwrap().term(), 5);
}

#[test]
fn file_holds_a_plain_json_array() {
    let (_temp, path) = setup_temp_file();
    let backend = JsonFileBackend::new(&path);
    backend.ensure_initialized().unwrap();

    StudentStore::from(vec![student("Ann Lee", "A01234567", 2)])
        .save(&backend)
        .unwrap();

    let on_disk: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(
        on_disk,
        serde_json::json!([{"name": "Ann Lee", "student_id": "A01234567", "term": 2}])
    );
}

#[test]
fn write_leaves_no_temp_file_behind() {
    let (temp, path) = setup_temp_file();
    let backend = JsonFileBackend::new(&path);
    backend.ensure_initialized().unwrap();
    backend.write_blob(b"[]").unwrap();

    let names: Vec<_> = fs::read_dir(temp.path().join("data"))
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .collect();
    assert_eq!(names, vec![std::ffi::OsString::from("school.json")]);
}

#[test]
fn corrupt_entry_on_disk_fails_load() {
    let (_temp, path) = setup_temp_file();
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, r#"[{"name":"Ann","student_id":"A01234567","term":"two"}]"#).unwrap();

    let backend = JsonFileBackend::new(&path);
    let err = StudentStore::load(&backend).unwrap_err();
    assert!(matches!(err, DbError::InvalidEntry { index: 0, .. }));
}

#[test]
fn delete_and_save_persists_removal() {
    let (_temp, path) = setup_temp_file();
    let backend = JsonFileBackend::new(&path);
    backend.ensure_initialized().unwrap();

    let store = StudentStore::from(vec![
        student("Ann Lee", "A01234567", 2),
        student("Bo Chen", "A07654321", 1),
    ]);
    store.save(&backend).unwrap();

    let mut store = StudentStore::load(&backend).unwrap();
    assert!(store.delete("A01234567"));
    store.save(&backend).unwrap();

    let reloaded = StudentStore::load(&backend).unwrap();
    assert_eq!(reloaded.len(), 1);
    assert!(reloaded.get_by_id("A01234567").is_none());
}
