//! Key-value settings store — the persistence port behind the disclaimer flag.
//!
//! The panel persists exactly one value (the disclaimer acceptance flag), so
//! the port is deliberately small: string keys to string values, synchronous
//! reads and write-through writes. A failed read must classify as "absent"
//! at the call site — the gate re-prompts rather than silently granting
//! access.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::error::AppError;

/// Port for the panel's persisted settings.
pub trait SettingsStore {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, AppError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), AppError>;
}

/// In-memory store for tests and non-persistent sessions.
///
/// Clones share the same underlying map, so a test can hand the store to a
/// gate and still observe (or pre-seed) its contents.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| AppError::Storage("Settings store lock poisoned".to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), AppError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| AppError::Storage("Settings store lock poisoned".to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// JSON-file-backed store, the production analog of browser local storage.
///
/// The file is read once at open and written through on every `set`. An
/// unreadable or corrupt file degrades to an empty store with a warning —
/// the disclaimer gate then re-prompts, which is the safe direction.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: HashMap<String, String>,
}

impl FileStore {
    /// Open the store at `path`, loading any existing entries.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(entries) => entries,
                Err(error) => {
                    tracing::warn!(
                        path = %path.display(),
                        %error,
                        "Settings file is corrupt, starting empty"
                    );
                    HashMap::new()
                }
            },
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(error) => {
                tracing::warn!(
                    path = %path.display(),
                    %error,
                    "Settings file is unreadable, starting empty"
                );
                HashMap::new()
            }
        };

        Self { path, entries }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(&self.path, raw)?;
        Ok(())
    }
}

impl SettingsStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), AppError> {
        self.entries.insert(key.to_string(), value.to_string());
        self.persist()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn temp_path() -> PathBuf {
        std::env::temp_dir().join(format!("altimeter-store-{}.json", Uuid::new_v4()))
    }

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("flag").unwrap(), None);

        store.set("flag", "true").unwrap();
        assert_eq!(store.get("flag").unwrap(), Some("true".to_string()));

        store.set("flag", "false").unwrap();
        assert_eq!(store.get("flag").unwrap(), Some("false".to_string()));
    }

    #[test]
    fn test_memory_store_clones_share_state() {
        let mut store = MemoryStore::new();
        let observer = store.clone();

        store.set("flag", "true").unwrap();
        assert_eq!(observer.get("flag").unwrap(), Some("true".to_string()));
    }

    #[test]
    fn test_file_store_persists_across_opens() {
        let path = temp_path();

        let mut store = FileStore::open(&path);
        assert_eq!(store.get("flag").unwrap(), None);
        store.set("flag", "true").unwrap();

        let reopened = FileStore::open(&path);
        assert_eq!(reopened.get("flag").unwrap(), Some("true".to_string()));

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_file_store_corrupt_file_starts_empty() {
        let path = temp_path();
        std::fs::write(&path, "not json at all {{{").unwrap();

        let mut store = FileStore::open(&path);
        assert_eq!(store.get("flag").unwrap(), None);

        // A write replaces the corrupt contents
        store.set("flag", "true").unwrap();
        let reopened = FileStore::open(&path);
        assert_eq!(reopened.get("flag").unwrap(), Some("true".to_string()));

        std::fs::remove_file(&path).unwrap();
    }
}
