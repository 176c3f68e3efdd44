//! Durable key-value preference storage, the localStorage stand-in.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::{Error, Result};

/// Key-value store for preferences that survive across sessions
pub trait PreferenceStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// Store that forgets everything when dropped; the default for tests
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-seeded with one entry, handy for simulated reloads.
    pub fn seeded(key: &str, value: &str) -> Self {
        let store = Self::new();
        let mut values = store.values.lock().unwrap();
        values.insert(key.to_string(), value.to_string());
        drop(values);
        store
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store persisting preferences as a flat JSON object on disk.
///
/// Reads tolerate a missing file (no preference yet); writes are
/// read-modify-write of the whole object.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_map(&self) -> Result<HashMap<String, String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => serde_json::from_str(&contents).map_err(|e| {
                Error::Storage(format!(
                    "malformed preference file {}: {}",
                    self.path.display(),
                    e
                ))
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(Error::Storage(format!(
                "cannot read {}: {}",
                self.path.display(),
                e
            ))),
        }
    }
}

impl PreferenceStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.read_map().ok().and_then(|m| m.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut map = self.read_map()?;
        map.insert(key.to_string(), value.to_string());
        let serialized = serde_json::to_string_pretty(&map)
            .map_err(|e| Error::Storage(format!("cannot serialize preferences: {}", e)))?;
        std::fs::write(&self.path, serialized).map_err(|e| {
            Error::Storage(format!("cannot write {}: {}", self.path.display(), e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn unique_temp_file(suffix: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!(
            "microspa-prefs-{}-{}-{}.json",
            suffix,
            std::process::id(),
            nanos
        ))
    }

    #[test]
    fn memory_store_round_trips() {
        let store = MemoryStore::new();
        assert!(store.get("theme").is_none());
        store.set("theme", "dark").unwrap();
        assert_eq!(store.get("theme").as_deref(), Some("dark"));
    }

    #[test]
    fn seeded_store_starts_with_value() {
        let store = MemoryStore::seeded("theme", "dark");
        assert_eq!(store.get("theme").as_deref(), Some("dark"));
    }

    #[test]
    fn json_file_store_survives_reopening() {
        let path = unique_temp_file("reload");

        let store = JsonFileStore::new(&path);
        assert!(store.get("theme").is_none());
        store.set("theme", "dark").unwrap();

        // A fresh handle over the same file sees the value, like a reload
        let reopened = JsonFileStore::new(&path);
        assert_eq!(reopened.get("theme").as_deref(), Some("dark"));

        reopened.set("theme", "light").unwrap();
        assert_eq!(store.get("theme").as_deref(), Some("light"));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn json_file_store_rejects_malformed_file() {
        let path = unique_temp_file("malformed");
        std::fs::write(&path, "not json").unwrap();

        let store = JsonFileStore::new(&path);
        assert!(store.get("theme").is_none());
        assert!(store.set("theme", "dark").is_err());

        let _ = std::fs::remove_file(&path);
    }
}
