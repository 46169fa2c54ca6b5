use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tempfile::NamedTempFile;

use crate::data::models::{StorageError, StorageKey};

/// String-to-string persistence, the shape of browser local storage.
pub trait KeyValueBackend: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&self, key: &str, value: String) -> Result<(), StorageError>;
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[derive(Default)]
pub struct MemoryBackend {
    items: Mutex<HashMap<String, String>>,
}

impl KeyValueBackend for MemoryBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(lock(&self.items).get(key).cloned())
    }

    fn set_item(&self, key: &str, value: String) -> Result<(), StorageError> {
        lock(&self.items).insert(key.to_string(), value);
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        lock(&self.items).remove(key);
        Ok(())
    }
}

/// All keys live in one JSON object on disk. The file is re-read on every
/// access and replaced atomically on every write.
pub struct FileBackend {
    path: PathBuf,
    quota: Option<usize>,
    write_lock: Mutex<()>,
}

impl FileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            quota: None,
            write_lock: Mutex::new(()),
        }
    }

    pub fn with_quota(mut self, bytes: usize) -> Self {
        self.quota = Some(bytes);
        self
    }

    fn load(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(text) if text.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn load_for_write(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match self.load() {
            Err(StorageError::Json(e)) => {
                log::warn!(
                    "Store file {} is corrupt, starting over: {}",
                    self.path.display(),
                    e
                );
                Ok(BTreeMap::new())
            }
            other => other,
        }
    }

    fn save(&self, items: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec_pretty(items)?;
        if let Some(quota) = self.quota {
            if bytes.len() > quota {
                return Err(StorageError::QuotaExceeded {
                    needed: bytes.len(),
                    quota,
                });
            }
        }

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)?;
        let mut tmp = NamedTempFile::new_in(&dir)?;
        tmp.write_all(&bytes)?;
        tmp.flush()?;
        tmp.persist(&self.path).map_err(|e| StorageError::Io(e.error))?;
        Ok(())
    }
}

impl KeyValueBackend for FileBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.load()?.remove(key))
    }

    fn set_item(&self, key: &str, value: String) -> Result<(), StorageError> {
        let _guard = lock(&self.write_lock);
        let mut items = self.load_for_write()?;
        items.insert(key.to_string(), value);
        self.save(&items)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let _guard = lock(&self.write_lock);
        let mut items = self.load_for_write()?;
        if items.remove(key).is_some() {
            self.save(&items)?;
        }
        Ok(())
    }
}

/// Typed JSON access to the local store. Persistence is best effort: reads
/// fall back to a default and write failures are logged, never returned.
#[derive(Clone)]
pub struct StorageClient {
    backend: Arc<dyn KeyValueBackend>,
}

impl StorageClient {
    pub fn new(backend: impl KeyValueBackend + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryBackend::default())
    }

    pub fn get<T: DeserializeOwned>(&self, key: StorageKey, default: T) -> T {
        let text = match self.backend.get_item(key.as_str()) {
            Ok(Some(text)) => text,
            Ok(None) => return default,
            Err(e) => {
                log::warn!("Failed to read {}: {}", key, e);
                return default;
            }
        };

        match serde_json::from_str::<Option<T>>(&text) {
            Ok(Some(value)) => value,
            Ok(None) => default,
            Err(e) => {
                log::warn!("Discarding unreadable value for {}: {}", key, e);
                default
            }
        }
    }

    pub fn set<T: Serialize + ?Sized>(&self, key: StorageKey, value: &T) {
        let text = match serde_json::to_string(value) {
            Ok(text) => text,
            Err(e) => {
                log::error!("Failed to encode {}: {}", key, e);
                return;
            }
        };

        if let Err(e) = self.backend.set_item(key.as_str(), text) {
            log::error!("Failed to store {}: {}", key, e);
        }
    }

    pub fn remove(&self, key: StorageKey) {
        if let Err(e) = self.backend.remove_item(key.as_str()) {
            log::error!("Failed to remove {}: {}", key, e);
        }
    }

    /// Raw stored text, bypassing decoding.
    pub fn raw(&self, key: StorageKey) -> Option<String> {
        self.backend.get_item(key.as_str()).ok().flatten()
    }
}
