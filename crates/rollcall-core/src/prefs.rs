//! Best-effort persistence of display options.
//!
//! Options go through a small key-value capability so the backing store
//! can be swapped (a JSON file on disk in the app, memory in tests). Any
//! read or write failure is logged and treated as "nothing saved".

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use thiserror::Error;
use tracing::{debug, warn};

use crate::models::DisplayOptions;

/// Key the options record is stored under.
pub const OPTIONS_KEY: &str = "attendanceOptions";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Storage IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Stored data is invalid: {0}")]
    Invalid(#[from] serde_json::Error),
}

/// String key-value storage with fallible access.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Stores every key in one JSON object file.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn read_all(&self) -> Result<HashMap<String, String>, StoreError> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let contents = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        // A corrupt file is replaced rather than blocking every later save.
        let mut all = self.read_all().unwrap_or_default();
        all.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(&all)?;
        std::fs::write(&self.path, contents)?;
        Ok(())
    }
}

/// In-process store, used when no file location is available.
#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let values = self
            .values
            .lock()
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut values = self
            .values
            .lock()
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Load saved options, falling back to defaults on any failure.
pub fn load_options(store: &dyn KeyValueStore) -> DisplayOptions {
    let raw = match store.get(OPTIONS_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!("No saved options");
            return DisplayOptions::default();
        }
        Err(e) => {
            warn!(error = %e, "Failed to read saved options");
            return DisplayOptions::default();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(options) => options,
        Err(e) => {
            warn!(error = %e, "Saved options are invalid, using defaults");
            DisplayOptions::default()
        }
    }
}

/// Save options; failures are logged and otherwise ignored.
pub fn save_options(store: &dyn KeyValueStore, options: &DisplayOptions) {
    let result = serde_json::to_string(options)
        .map_err(StoreError::from)
        .and_then(|json| store.set(OPTIONS_KEY, &json));
    if let Err(e) = result {
        warn!(error = %e, "Failed to save options");
    }
}
