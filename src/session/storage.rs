//! Durable string key-value storage backing the session. `FileStorage` keeps
//! every entry in one JSON object file and replaces it through a temporary
//! sibling plus rename, so a multi-entry write lands as a single unit.

use crate::errors::AppError;
use serde_json::{Map, Value};
use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
    sync::{Arc, Mutex, PoisonError},
};
use tracing::debug;

pub trait KeyValueStorage: Send + Sync {
    /// Reads one entry.
    ///
    /// # Errors
    /// Returns `AppError::Storage` if the backing store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, AppError>;

    /// Writes all entries together; readers observe either none or all of them.
    ///
    /// # Errors
    /// Returns `AppError::Storage` if the backing store cannot be written.
    fn set_all(&self, entries: &[(&str, &str)]) -> Result<(), AppError>;

    /// Removes all listed entries together. Missing keys are not an error.
    ///
    /// # Errors
    /// Returns `AppError::Storage` if the backing store cannot be written.
    fn remove_all(&self, keys: &[&str]) -> Result<(), AppError>;

    /// Writes `set` and removes `remove` in one unit.
    ///
    /// # Errors
    /// Returns `AppError::Storage` if the backing store cannot be written.
    fn replace(&self, set: &[(&str, &str)], remove: &[&str]) -> Result<(), AppError>;
}

impl<T: KeyValueStorage + ?Sized> KeyValueStorage for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        (**self).get(key)
    }

    fn set_all(&self, entries: &[(&str, &str)]) -> Result<(), AppError> {
        (**self).set_all(entries)
    }

    fn remove_all(&self, keys: &[&str]) -> Result<(), AppError> {
        (**self).remove_all(keys)
    }

    fn replace(&self, set: &[(&str, &str)], remove: &[&str]) -> Result<(), AppError> {
        (**self).replace(set, remove)
    }
}

/// In-process storage, lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds storage with raw entries, bypassing any validation.
    #[must_use]
    pub fn with_entries(entries: &[(&str, &str)]) -> Self {
        let map = entries
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect();
        Self {
            entries: Mutex::new(map),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        Ok(self.lock().get(key).cloned())
    }

    fn set_all(&self, entries: &[(&str, &str)]) -> Result<(), AppError> {
        self.replace(entries, &[])
    }

    fn remove_all(&self, keys: &[&str]) -> Result<(), AppError> {
        self.replace(&[], keys)
    }

    fn replace(&self, set: &[(&str, &str)], remove: &[&str]) -> Result<(), AppError> {
        let mut map = self.lock();
        for key in remove {
            map.remove(*key);
        }
        for (key, value) in set {
            map.insert((*key).to_string(), (*value).to_string());
        }
        Ok(())
    }
}

/// JSON object file on disk, the native counterpart of browser local storage.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStorage {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    // An unreadable or non-object file is treated as empty; the next write replaces it.
    fn load(&self) -> Result<Map<String, Value>, AppError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(err) => {
                return Err(AppError::Storage(format!(
                    "Failed to read {}: {err}",
                    self.path.display()
                )));
            }
        };

        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(map)) => Ok(map),
            _ => {
                debug!(path = %self.path.display(), "session file is not a JSON object, ignoring");
                Ok(Map::new())
            }
        }
    }

    fn store(&self, map: &Map<String, Value>) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|err| {
                AppError::Storage(format!("Failed to create {}: {err}", parent.display()))
            })?;
        }

        let content = serde_json::to_string_pretty(map)
            .map_err(|err| AppError::Storage(format!("Failed to encode session: {err}")))?;

        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, content).map_err(|err| {
            AppError::Storage(format!("Failed to write {}: {err}", temp_path.display()))
        })?;
        fs::rename(&temp_path, &self.path).map_err(|err| {
            AppError::Storage(format!("Failed to replace {}: {err}", self.path.display()))
        })
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        let map = self.load()?;
        Ok(map.get(key).and_then(Value::as_str).map(str::to_string))
    }

    fn set_all(&self, entries: &[(&str, &str)]) -> Result<(), AppError> {
        self.replace(entries, &[])
    }

    fn remove_all(&self, keys: &[&str]) -> Result<(), AppError> {
        self.replace(&[], keys)
    }

    fn replace(&self, set: &[(&str, &str)], remove: &[&str]) -> Result<(), AppError> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut map = self.load()?;
        let before = map.len();

        for key in remove {
            map.remove(*key);
        }
        for (key, value) in set {
            map.insert((*key).to_string(), Value::String((*value).to_string()));
        }

        // Nothing to do when clearing an absent file.
        if set.is_empty() && map.len() == before && !self.path.exists() {
            return Ok(());
        }

        self.store(&map)
    }
}
