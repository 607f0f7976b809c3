//! Persistence port for presentation-layer state
//!
//! The analytics core never touches a store; callers persist the results
//! they want to keep.

use super::DataError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// Key-value persistence for serializable values
pub trait Store {
    /// Load the value saved under `key`, if any
    fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, DataError>;
    /// Save `value` under `key`, replacing any previous value
    fn save<T: Serialize>(&mut self, key: &str, value: &T) -> Result<(), DataError>;
}

/// In-process store, lost on drop
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: HashMap<String, serde_json::Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, DataError> {
        self.values
            .get(key)
            .map(|value| serde_json::from_value(value.clone()))
            .transpose()
            .map_err(DataError::from)
    }

    fn save<T: Serialize>(&mut self, key: &str, value: &T) -> Result<(), DataError> {
        self.values.insert(key.to_string(), serde_json::to_value(value)?);
        Ok(())
    }
}

/// One pretty-printed `<key>.json` file per key under a directory
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Create a store rooted at `dir`; the directory is created on first save
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, DataError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(DataError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl Store for JsonFileStore {
    fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, DataError> {
        let path = self.path_for(key)?;
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read(&path)?;
        Ok(Some(serde_json::from_slice(&content)?))
    }

    fn save<T: Serialize>(&mut self, key: &str, value: &T) -> Result<(), DataError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)?;
        fs::write(&path, serde_json::to_vec_pretty(value)?)?;
        tracing::debug!(path = ?path, "Saved value to store");
        Ok(())
    }
}
