use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing::{debug, warn};

use crate::error::StorageError;

/// Durable string key-value store for player preferences.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-process store. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: Mutex::new(entries.into_iter().map(|(k, v)| (k.into(), v.into())).collect()),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// A JSON object of strings on disk. The file is read on first access and
/// rewritten in full on every `set`.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    cache: Mutex<Option<BTreeMap<String, String>>>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: Mutex::new(None),
        }
    }

    fn load(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match std::fs::read_to_string(&self.path) {
            Ok(text) if text.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no settings file yet");
                Ok(BTreeMap::new())
            }
            Err(e) => Err(e.into()),
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let mut cache = self.cache.lock().map_err(|_| StorageError::Poisoned)?;
        if cache.is_none() {
            *cache = Some(self.load()?);
        }
        Ok(cache.as_ref().and_then(|entries| entries.get(key).cloned()))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut cache = self.cache.lock().map_err(|_| StorageError::Poisoned)?;
        let mut entries = match cache.take() {
            Some(entries) => entries,
            // A corrupt file would otherwise block every later save.
            None => match self.load() {
                Err(StorageError::Corrupt(e)) => {
                    warn!(path = %self.path.display(), error = %e, "replacing corrupt settings file");
                    BTreeMap::new()
                }
                loaded => loaded?,
            },
        };
        entries.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let text = serde_json::to_string_pretty(&entries)?;
        let written = std::fs::write(&self.path, text);
        *cache = Some(entries);
        written?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("ahorcado-store-{}-{}", std::process::id(), name));
        let _ = std::fs::remove_dir_all(&dir);
        dir.join("settings.json")
    }

    #[test]
    fn memory_store_round_trips() {
        let store = MemoryStore::new();
        assert_eq!(store.get("hangman-difficulty").unwrap(), None);
        store.set("hangman-difficulty", "hard").unwrap();
        assert_eq!(store.get("hangman-difficulty").unwrap().as_deref(), Some("hard"));
    }

    #[test]
    fn file_store_persists_across_instances() {
        let path = scratch_path("persist");
        let store = FileStore::new(&path);
        store.set("audio-enabled", "false").unwrap();
        store.set("audio-volume", "0.25").unwrap();

        let reopened = FileStore::new(&path);
        assert_eq!(reopened.get("audio-enabled").unwrap().as_deref(), Some("false"));
        assert_eq!(reopened.get("audio-volume").unwrap().as_deref(), Some("0.25"));
        assert_eq!(reopened.get("missing").unwrap(), None);
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let store = FileStore::new(scratch_path("missing"));
        assert_eq!(store.get("anything").unwrap(), None);
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let path = scratch_path("corrupt");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "[1, 2, 3]").unwrap();
        let store = FileStore::new(&path);
        assert!(matches!(store.get("x"), Err(StorageError::Corrupt(_))));
    }

    #[test]
    fn corrupt_file_is_replaced_on_save() {
        let path = scratch_path("corrupt-save");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "{ not json").unwrap();

        let store = FileStore::new(&path);
        store.set("hangman-difficulty", "easy").unwrap();
        assert_eq!(store.get("hangman-difficulty").unwrap().as_deref(), Some("easy"));

        let reopened = FileStore::new(&path);
        assert_eq!(reopened.get("hangman-difficulty").unwrap().as_deref(), Some("easy"));
    }
}
