//! Ordered in-memory collection of students.
//!
//! The store keeps students in insertion (or load) order and treats the
//! student ID as a lookup key without enforcing uniqueness. When several
//! students share an ID, lookups and updates see the one added last, and
//! deletes remove all of them.

use roster_types::{Student, StudentPatch};
use tracing::debug;

use crate::backend::Backend;
use crate::error::DbError;

/// The roster of one institution, held in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentStore {
    students: Vec<Student>,
}

impl StudentStore {
    /// Create an empty store.
    pub const fn new() -> Self {
        Self {
            students: Vec::new(),
        }
    }

    /// Load every student from `backend`.
    ///
    /// The stored document must be a JSON array. Each entry is validated;
    /// a single invalid entry fails the whole load with
    /// [`DbError::InvalidEntry`]. Nothing is skipped.
    pub fn load(backend: &dyn Backend) -> Result<Self, DbError> {
        let blob = backend.read_blob()?;
        let entries: Vec<serde_json::Value> = serde_json::from_slice(&blob)?;

        let students = entries
            .into_iter()
            .enumerate()
            .map(|(index, entry)| {
                Student::from_mapping(entry)
                    .map_err(|source| DbError::InvalidEntry { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!(count = students.len(), "Loaded student store");
        Ok(Self { students })
    }

    /// Write every student to `backend`, replacing what it held.
    pub fn save(&self, backend: &dyn Backend) -> Result<(), DbError> {
        let blob = serde_json::to_vec(&self.students)?;
        backend.write_blob(&blob)?;

        debug!(count = self.students.len(), "Saved student store");
        Ok(())
    }

    /// The student with `student_id`, or `None`.
    ///
    /// With duplicate IDs the last match in store order is returned.
    pub fn get_by_id(&self, student_id: &str) -> Option<&Student> {
        self.students
            .iter()
            .rev()
            .find(|student| student.student_id() == student_id)
    }

    /// Every student whose name equals `name` exactly, in store order.
    pub fn get_by_name(&self, name: &str) -> Vec<&Student> {
        self.students
            .iter()
            .filter(|student| student.name() == name)
            .collect()
    }

    /// Append a student. Duplicate IDs are accepted.
    pub fn add(&mut self, student: Student) {
        self.students.push(student);
    }

    /// Remove every student with `student_id`.
    ///
    /// Returns `true` if at least one student was removed.
    pub fn delete(&mut self, student_id: &str) -> bool {
        let before = self.students.len();
        self.students.retain(|student| student.student_id() != student_id);
        self.students.len() != before
    }

    /// Apply `patch` to the student [`get_by_id`](Self::get_by_id) would
    /// return, keeping its position in the store.
    ///
    /// The patched record is validated as a whole. On error the store is
    /// unchanged.
    pub fn update(&mut self, student_id: &str, patch: &StudentPatch) -> Result<&Student, DbError> {
        let slot = self
            .students
            .iter_mut()
            .rev()
            .find(|student| student.student_id() == student_id)
            .ok_or_else(|| DbError::NotFound(student_id.to_owned()))?;

        *slot = slot.apply(patch)?;
        Ok(&*slot)
    }

    /// All students in store order.
    pub fn students(&self) -> &[Student] {
        &self.students
    }

    /// Consume the store, yielding its students in order.
    pub fn into_students(self) -> Vec<Student> {
        self.students
    }

    /// Number of students.
    pub fn len(&self) -> usize {
        self.students.len()
    }

    /// `true` when the store holds no students.
    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }
}

impl From<Vec<Student>> for StudentStore {
    fn from(students: Vec<Student>) -> Self {
        Self { students }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::indexing_slicing)]

    use roster_types::ValidationError;

    use super::*;
    use crate::backend::MemoryBackend;

    fn student(name: &str, id: &str, term: i64) -> Student {
        Student::new(name, id, term).unwrap()
    }

    fn sample_store() -> StudentStore {
        StudentStore::from(vec![
            student("Ann Lee", "A01234567", 2),
            student("Bo Chen", "A07654321", 1),
            student("Ann Lee", "A00000001", 4),
        ])
    }

    #[test]
    fn get_by_id_on_empty_store_is_none() {
        let store = StudentStore::new();
        assert!(store.get_by_id("A01234567").is_none());
        assert!(store.get_by_id("").is_none());
    }

    #[test]
    fn get_by_id_finds_match() {
        let store = sample_store();
        assert_eq!(store.get_by_id("A07654321").unwrap().name(), "Bo Chen");
        assert!(store.get_by_id("A09999999").is_none());
    }

    #[test]
    fn get_by_id_returns_last_duplicate() {
        let mut store = StudentStore::new();
        store.add(student("First", "A01111111", 1));
        store.add(student("Other", "A02222222", 1));
        store.add(student("Last", "A01111111", 3));

        assert_eq!(store.get_by_id("A01111111").unwrap().name(), "Last");
    }

    #[test]
    fn get_by_name_returns_all_matches_in_order() {
        let store = sample_store();
        let matches = store.get_by_name("Ann Lee");

        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].student_id(), "A01234567");
        assert_eq!(matches[1].student_id(), "A00000001");
        assert!(store.get_by_name("ann lee").is_empty());
        assert!(store.get_by_name("Nobody").is_empty());
    }

    #[test]
    fn add_appends_and_allows_duplicates() {
        let mut store = sample_store();
        store.add(student("Copy", "A01234567", 9));

        assert_eq!(store.len(), 4);
        assert_eq!(store.students()[3].name(), "Copy");
    }

    #[test]
    fn delete_missing_id_leaves_store_unchanged() {
        let mut store = sample_store();
        let before = store.clone();

        assert!(!store.delete("NOPE00000"));
        assert_eq!(store, before);
    }

    #[test]
    fn delete_removes_adjacent_duplicates() {
        let mut store = StudentStore::new();
        store.add(student("A", "A01111111", 1));
        store.add(student("B", "A01111111", 2));
        store.add(student("C", "A02222222", 1));
        store.add(student("D", "A01111111", 3));

        assert!(store.delete("A01111111"));
        assert_eq!(store.len(), 1);
        assert_eq!(store.students()[0].name(), "C");
    }

    #[test]
    fn update_changes_only_patched_fields() {
        let mut store = sample_store();
        let patch = StudentPatch {
            term: Some(3),
            ..StudentPatch::default()
        };

        let updated = store.update("A01234567", &patch).unwrap();
        assert_eq!(updated.term(), 3);
        assert_eq!(updated.name(), "Ann Lee");
        assert_eq!(store.students()[0].term(), 3);
    }

    #[test]
    fn update_targets_last_duplicate() {
        let mut store = StudentStore::new();
        store.add(student("First", "A01111111", 1));
        store.add(student("Last", "A01111111", 1));
        let patch = StudentPatch {
            name: Some(String::from("Renamed")),
            ..StudentPatch::default()
        };

        store.update("A01111111", &patch).unwrap();
        assert_eq!(store.students()[0].name(), "First");
        assert_eq!(store.students()[1].name(), "Renamed");
    }

    #[test]
    fn update_missing_id_is_not_found() {
        let mut store = sample_store();
        let err = store
            .update("A09999999", &StudentPatch::default())
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound(id) if id == "A09999999"));
    }

    #[test]
    fn invalid_update_leaves_store_unchanged() {
        let mut store = sample_store();
        let before = store.clone();
        let patch = StudentPatch {
            student_id: Some(String::from("BAD")),
            ..StudentPatch::default()
        };

        let err = store.update("A01234567", &patch).unwrap_err();
        assert!(matches!(err, DbError::Validation(ValidationError::Fields(_))));
        assert_eq!(store, before);
    }

    #[test]
    fn save_then_load_preserves_order_and_mappings() {
        let backend = MemoryBackend::new();
        let store = sample_store();
        store.save(&backend).unwrap();

        let loaded = StudentStore::load(&backend).unwrap();
        let original: Vec<_> = store.students().iter().map(Student::to_mapping).collect();
        let reloaded: Vec<_> = loaded.students().iter().map(Student::to_mapping).collect();
        assert_eq!(original, reloaded);
    }

    #[test]
    fn saved_document_uses_snake_case_keys() {
        let backend = MemoryBackend::new();
        StudentStore::from(vec![student("Ann Lee", "A01234567", 2)])
            .save(&backend)
            .unwrap();

        let saved: serde_json::Value = serde_json::from_str(&backend.contents().unwrap()).unwrap();
        assert_eq!(
            saved,
            serde_json::json!([{"name": "Ann Lee", "student_id": "A01234567", "term": 2}])
        );
    }

    #[test]
    fn load_empty_array_gives_empty_store() {
        let store = StudentStore::load(&MemoryBackend::new()).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn load_defaults_missing_term() {
        let backend = MemoryBackend::with_blob(r#"[{"name": "Ann", "student_id": "A01234567"}]"#);
        let store = StudentStore::load(&backend).unwrap();
        assert_eq!(store.students()[0].term(), 1);
    }

    #[test]
    fn one_invalid_entry_fails_whole_load() {
        let backend = MemoryBackend::with_blob(
            r#"[
                {"name": "Ann", "student_id": "A01234567", "term": 1},
                {"name": "Bad", "student_id": "B01234567", "term": 1}
            ]"#,
        );

        let err = StudentStore::load(&backend).unwrap_err();
        assert!(matches!(err, DbError::InvalidEntry { index: 1, .. }));
    }

    #[test]
    fn load_rejects_non_array_document() {
        for blob in ["", "{}", "not json"] {
            let backend = MemoryBackend::with_blob(blob);
            assert!(matches!(
                StudentStore::load(&backend),
                Err(DbError::Serialization(_))
            ));
        }
    }

    #[test]
    fn positional_entry_fails_whole_load() {
        let backend = MemoryBackend::with_blob(
            r#"[
                {"name": "Ann", "student_id": "A01234567", "term": 1},
                ["Bo", "A07654321", 2]
            ]"#,
        );

        let err = StudentStore::load(&backend).unwrap_err();
        assert!(matches!(
            err,
            DbError::InvalidEntry {
                index: 1,
                source: ValidationError::Malformed(_)
            }
        ));
    }
}
