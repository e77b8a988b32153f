use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Mutex;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Schema version written into every persisted blob. Bump on breaking
/// changes to a stored shape; readers fall back to the default on mismatch.
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Key-value persistence used by every personalization store. Production
/// uses [`FileStorage`]; tests use [`MemoryStorage`].
pub trait StorageBackend: Send + Sync {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn write(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

#[derive(Serialize, Deserialize)]
struct Envelope<T> {
    version: u32,
    data: T,
}

/// Loads a stored value, falling back to the default when the key is absent,
/// unreadable, malformed or from another schema version. Corrupt data is
/// logged and discarded instead of crashing store construction.
pub fn load_or_default<T>(backend: &dyn StorageBackend, key: &str) -> T
where
    T: DeserializeOwned + Default,
{
    let raw = match backend.read(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return T::default(),
        Err(e) => {
            log::warn!("failed to read '{}', starting empty: {}", key, e);
            return T::default();
        }
    };

    match serde_json::from_str::<Envelope<T>>(&raw) {
        Ok(envelope) if envelope.version == SCHEMA_VERSION => envelope.data,
        Ok(envelope) => {
            log::warn!(
                "'{}' has schema version {} (expected {}), starting empty",
                key,
                envelope.version,
                SCHEMA_VERSION
            );
            T::default()
        }
        Err(e) => {
            log::warn!("malformed data in '{}', starting empty: {}", key, e);
            T::default()
        }
    }
}

/// Serializes the full value back under `key`. Every store mutation calls
/// this synchronously; the working sets are tiny.
pub fn save<T: Serialize>(
    backend: &dyn StorageBackend,
    key: &str,
    value: &T,
) -> Result<(), StoreError> {
    let envelope = Envelope {
        version: SCHEMA_VERSION,
        data: value,
    };
    let raw = serde_json::to_string(&envelope)?;
    backend.write(key, &raw)
}

/// One JSON file per key under a data directory.
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl StorageBackend for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        fs::write(self.path_for(key), value)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory backend for tests.
#[derive(Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_yields_default() {
        let backend = MemoryStorage::new();
        let value: Vec<String> = load_or_default(&backend, "absent");
        assert!(value.is_empty());
    }

    #[test]
    fn save_then_load_round_trips() {
        let backend = MemoryStorage::new();
        let value = vec!["netflix".to_string(), "spotify".to_string()];
        save(&backend, "subscription-favorites", &value).unwrap();
        let loaded: Vec<String> = load_or_default(&backend, "subscription-favorites");
        assert_eq!(loaded, value);
    }

    #[test]
    fn malformed_json_falls_back_to_default() {
        let backend = MemoryStorage::new();
        backend.write("subscription-favorites", "{not json").unwrap();
        let loaded: Vec<String> = load_or_default(&backend, "subscription-favorites");
        assert!(loaded.is_empty());
    }

    #[test]
    fn wrong_schema_version_falls_back_to_default() {
        let backend = MemoryStorage::new();
        backend
            .write("subscription-favorites", r#"{"version":99,"data":["x"]}"#)
            .unwrap();
        let loaded: Vec<String> = load_or_default(&backend, "subscription-favorites");
        assert!(loaded.is_empty());
    }

    #[test]
    fn file_storage_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileStorage::new(dir.path()).unwrap();
        save(&backend, "subscription-budget", &42u32).unwrap();
        let loaded: u32 = load_or_default(&backend, "subscription-budget");
        assert_eq!(loaded, 42);

        backend.remove("subscription-budget").unwrap();
        assert!(backend.read("subscription-budget").unwrap().is_none());
    }
}
