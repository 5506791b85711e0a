//! Student store: the sole owner of the authoritative roster.
//!
//! Mutations emulate a remote call with an injectable latency and persist the
//! full roster after every change. Persistence is best-effort: a failed write
//! is logged and the in-memory state stays the source of truth for the
//! session.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use uuid::Uuid;

use crate::models::{NewStudent, Student, seed_students};
use crate::storage::{STUDENTS_KEY, Storage};

/// Artificial latency applied to every mutation in production.
pub const MUTATION_LATENCY: Duration = Duration::from_millis(500);

/// Delay policy for mutating operations.
#[derive(Debug, Clone, Copy)]
pub enum Latency {
    /// No delay (tests).
    None,
    /// Fixed delay before the mutation applies.
    Fixed(Duration),
}

impl Latency {
    async fn wait(&self) {
        if let Latency::Fixed(duration) = self {
            tokio::time::sleep(*duration).await;
        }
    }
}

/// Owns the student list and persists it under [`STUDENTS_KEY`].
pub struct StudentStore {
    students: Vec<Student>,
    storage: Arc<dyn Storage>,
    latency: Latency,
}

impl StudentStore {
    /// Load the persisted roster, falling back to the seed roster when the
    /// key is absent or unreadable.
    pub fn load(storage: Arc<dyn Storage>, latency: Latency) -> Self {
        let students = match storage.get(STUDENTS_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Student>>(&raw) {
                Ok(students) => students,
                Err(e) => {
                    tracing::warn!("Failed to parse persisted students, using seed data: {}", e);
                    seed_students()
                }
            },
            Ok(None) => seed_students(),
            Err(e) => {
                tracing::warn!("Failed to read persisted students, using seed data: {}", e);
                seed_students()
            }
        };

        Self {
            students,
            storage,
            latency,
        }
    }

    /// Current roster, newest first.
    pub fn students(&self) -> &[Student] {
        &self.students
    }

    /// Create a student with a fresh unique id, prepend it, persist, and
    /// return the created record.
    pub async fn add(&mut self, input: NewStudent) -> Student {
        self.latency.wait().await;

        let student = Student {
            student_id: self.fresh_id(),
            name: input.name,
            email: input.email,
            course_id: input.course_id,
            image_url: input.image_url,
        };

        self.students.insert(0, student.clone());
        self.persist();
        student
    }

    /// Replace the student with the matching id in place. Silent no-op when
    /// no record matches.
    pub async fn update(&mut self, updated: Student) -> Student {
        self.latency.wait().await;

        if let Some(slot) = self
            .students
            .iter_mut()
            .find(|s| s.student_id == updated.student_id)
        {
            *slot = updated.clone();
        }

        self.persist();
        updated
    }

    /// Remove the student with the matching id. Idempotent.
    pub async fn remove(&mut self, student_id: &str) {
        self.latency.wait().await;

        self.students.retain(|s| s.student_id != student_id);
        self.persist();
    }

    /// Remove every student whose id is in `ids`. Returns the number removed;
    /// an empty set is a no-op.
    pub async fn remove_many(&mut self, ids: &HashSet<String>) -> usize {
        self.latency.wait().await;

        let before = self.students.len();
        self.students.retain(|s| !ids.contains(&s.student_id));
        self.persist();
        before - self.students.len()
    }

    fn fresh_id(&self) -> String {
        loop {
            let id = Uuid::new_v4().to_string();
            if !self.students.iter().any(|s| s.student_id == id) {
                return id;
            }
        }
    }

    fn persist(&self) {
        let json = match serde_json::to_string(&self.students) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!("Failed to serialize students: {}", e);
                return;
            }
        };

        if let Err(e) = self.storage.set(STUDENTS_KEY, &json) {
            tracing::error!("Failed to save students: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn new_input(name: &str) -> NewStudent {
        NewStudent {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            course_id: 1,
            image_url: "https://picsum.photos/200".to_string(),
        }
    }

    fn persisted_roster(storage: &MemoryStorage) -> Vec<Student> {
        let raw = storage.get(STUDENTS_KEY).unwrap().unwrap();
        serde_json::from_str(&raw).unwrap()
    }

    #[test]
    fn test_load_falls_back_to_seed_when_absent() {
        let store = StudentStore::load(Arc::new(MemoryStorage::new()), Latency::None);
        assert_eq!(store.students().len(), 3);
        assert_eq!(store.students()[0].name, "kiran Patil");
    }

    #[test]
    fn test_load_falls_back_to_seed_on_corrupt_json() {
        let storage = Arc::new(MemoryStorage::with_entry(STUDENTS_KEY, "not json ["));
        let store = StudentStore::load(storage, Latency::None);
        assert_eq!(store.students().len(), 3);
    }

    #[test]
    fn test_load_reads_persisted_roster() {
        let storage = Arc::new(MemoryStorage::with_entry(STUDENTS_KEY, "[]"));
        let store = StudentStore::load(storage, Latency::None);
        assert!(store.students().is_empty());
    }

    #[tokio::test]
    async fn test_add_assigns_fresh_unique_id_and_prepends() {
        let storage = Arc::new(MemoryStorage::new());
        let mut store = StudentStore::load(storage.clone(), Latency::None);

        let created = store.add(new_input("Dana")).await;

        assert_eq!(store.students().len(), 4);
        assert_eq!(store.students()[0], created);
        let matching = store
            .students()
            .iter()
            .filter(|s| s.student_id == created.student_id)
            .count();
        assert_eq!(matching, 1);
        assert_eq!(persisted_roster(&storage).len(), 4);
    }

    #[tokio::test]
    async fn test_update_replaces_only_matching_record() {
        let mut store = StudentStore::load(Arc::new(MemoryStorage::new()), Latency::None);

        let mut edited = store.students()[1].clone();
        edited.name = "Renamed".to_string();
        let others: Vec<_> = store
            .students()
            .iter()
            .filter(|s| s.student_id != edited.student_id)
            .cloned()
            .collect();

        let returned = store.update(edited.clone()).await;
        assert_eq!(returned, edited);
        assert_eq!(store.students()[1], edited);

        // Applying the same payload twice changes nothing further.
        store.update(edited.clone()).await;
        assert_eq!(store.students()[1], edited);

        for other in others {
            assert!(store.students().contains(&other));
        }
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_noop() {
        let mut store = StudentStore::load(Arc::new(MemoryStorage::new()), Latency::None);
        let before = store.students().to_vec();

        let mut ghost = before[0].clone();
        ghost.student_id = "no-such-id".to_string();
        store.update(ghost).await;

        assert_eq!(store.students(), &before[..]);
    }

    #[tokio::test]
    async fn test_remove_is_idempotent() {
        let storage = Arc::new(MemoryStorage::new());
        let mut store = StudentStore::load(storage.clone(), Latency::None);

        store.remove("1").await;
        assert_eq!(store.students().len(), 2);

        store.remove("1").await;
        assert_eq!(store.students().len(), 2);
        assert_eq!(persisted_roster(&storage).len(), 2);
    }

    #[tokio::test]
    async fn test_remove_many_handles_empty_set() {
        let mut store = StudentStore::load(Arc::new(MemoryStorage::new()), Latency::None);

        let removed = store.remove_many(&HashSet::new()).await;
        assert_eq!(removed, 0);
        assert_eq!(store.students().len(), 3);
    }

    #[tokio::test]
    async fn test_remove_many_removes_matching_ids() {
        let mut store = StudentStore::load(Arc::new(MemoryStorage::new()), Latency::None);

        let ids: HashSet<String> = ["1", "3", "absent"].iter().map(|s| s.to_string()).collect();
        let removed = store.remove_many(&ids).await;

        assert_eq!(removed, 2);
        assert_eq!(store.students().len(), 1);
        assert_eq!(store.students()[0].student_id, "2");
    }

    #[tokio::test]
    async fn test_seed_add_delete_scenario() {
        let storage = Arc::new(MemoryStorage::new());
        let mut store = StudentStore::load(storage.clone(), Latency::None);
        assert_eq!(store.students().len(), 3);

        let created = store.add(new_input("Newest")).await;
        assert_eq!(store.students().len(), 4);
        assert!(!["1", "2", "3"].contains(&created.student_id.as_str()));
        assert_eq!(persisted_roster(&storage).len(), 4);

        store.remove(&created.student_id).await;
        assert_eq!(store.students().len(), 3);
        assert_eq!(persisted_roster(&storage).len(), 3);
    }

    #[tokio::test]
    async fn test_failed_persistence_keeps_memory_state() {
        let storage = Arc::new(MemoryStorage::new());
        let mut store = StudentStore::load(storage.clone(), Latency::None);

        storage.fail_writes();
        let created = store.add(new_input("Ephemeral")).await;

        assert_eq!(store.students().len(), 4);
        assert_eq!(store.students()[0], created);
    }
}
