//! Durable key-value storage backends.
//!
//! The student store and theme store both persist through this trait so tests
//! can inject an in-memory backend instead of touching the filesystem.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::{AppError, Result};

/// Storage key for the persisted student roster (JSON array).
pub const STUDENTS_KEY: &str = "student_management_app_students";

/// Storage key for the theme preference (literal "light" or "dark").
pub const THEME_KEY: &str = "theme";

/// String key-value storage.
pub trait Storage: Send + Sync {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// File-backed storage: one file per key under a data directory.
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Create a backend rooted at `dir`, creating the directory if needed.
    pub fn new(dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&dir)
            .map_err(|e| AppError::storage(format!("Failed to create data dir {}: {}", dir.display(), e)))?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }

        std::fs::read_to_string(&path)
            .map(Some)
            .map_err(|e| AppError::storage(format!("Failed to read {}: {}", path.display(), e)))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key);
        std::fs::write(&path, value)
            .map_err(|e| AppError::storage(format!("Failed to write {}: {}", path.display(), e)))
    }
}

/// In-memory storage backend: the fallback when no data directory is
/// available, and the injected backend in tests.
#[derive(Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
    fail_writes: AtomicBool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a single key.
    pub fn with_entry(key: &str, value: &str) -> Self {
        let storage = Self::new();
        storage
            .entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        storage
    }

    /// Make every subsequent `set` fail, emulating an unavailable backend.
    pub fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AppError::storage("Storage unavailable"));
        }
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_storage_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();

        assert!(storage.get(THEME_KEY).unwrap().is_none());
        storage.set(THEME_KEY, "dark").unwrap();
        assert_eq!(storage.get(THEME_KEY).unwrap().as_deref(), Some("dark"));

        storage.set(THEME_KEY, "light").unwrap();
        assert_eq!(storage.get(THEME_KEY).unwrap().as_deref(), Some("light"));
    }

    #[test]
    fn test_file_storage_keys_are_independent() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();

        storage.set(STUDENTS_KEY, "[]").unwrap();
        storage.set(THEME_KEY, "dark").unwrap();

        assert_eq!(storage.get(STUDENTS_KEY).unwrap().as_deref(), Some("[]"));
        assert_eq!(storage.get(THEME_KEY).unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn test_file_storage_creates_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let storage = FileStorage::new(nested.clone()).unwrap();

        storage.set(THEME_KEY, "light").unwrap();
        assert!(nested.join(THEME_KEY).exists());
    }

    #[test]
    fn test_memory_storage_failing_writes() {
        let storage = MemoryStorage::new();
        storage.set(THEME_KEY, "dark").unwrap();

        storage.fail_writes();
        assert!(storage.set(THEME_KEY, "light").is_err());
        // Reads still serve the last successful write.
        assert_eq!(storage.get(THEME_KEY).unwrap().as_deref(), Some("dark"));
    }
}
