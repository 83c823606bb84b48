//! Durable client-side key-value storage.
//!
//! FAIL-OPEN
//! =========
//! Storage is best-effort: a backend that cannot read or write behaves as
//! if the key were absent and logs a warning. Downstream this degrades the
//! session to "unauthenticated" instead of surfacing an error.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// String key-value storage surviving process restarts.
pub trait Storage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);
}

/// Volatile storage for tests and one-shot sessions.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: BTreeMap<String, String>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_owned(), value.to_owned());
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

/// Storage persisted as one JSON object file, rewritten synchronously on
/// every mutation. A missing or corrupt file reads as empty.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStorage {
    #[must_use]
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = load_entries(&path);
        Self { path, entries }
    }

    fn persist(&self) {
        if let Some(parent) = self.path.parent() {
            if let Err(error) = fs::create_dir_all(parent) {
                tracing::warn!(%error, path = %self.path.display(), "storage dir create failed; session will not survive restart");
                return;
            }
        }
        let json = match serde_json::to_string_pretty(&self.entries) {
            Ok(json) => json,
            Err(error) => {
                tracing::warn!(%error, "storage serialize failed");
                return;
            }
        };
        if let Err(error) = fs::write(&self.path, json) {
            tracing::warn!(%error, path = %self.path.display(), "storage write failed; session will not survive restart");
        }
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_owned(), value.to_owned());
        self.persist();
    }

    fn remove(&mut self, key: &str) {
        if self.entries.remove(key).is_some() {
            self.persist();
        }
    }
}

fn load_entries(path: &Path) -> BTreeMap<String, String> {
    let Ok(raw) = fs::read_to_string(path) else {
        return BTreeMap::new();
    };
    match serde_json::from_str(&raw) {
        Ok(entries) => entries,
        Err(error) => {
            tracing::warn!(%error, path = %path.display(), "corrupt storage file ignored");
            BTreeMap::new()
        }
    }
}
