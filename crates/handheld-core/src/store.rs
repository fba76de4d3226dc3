//! Durable key-value storage for the login flags
//!
//! Values are grouped under a namespace; a [`FileStore`] keeps each
//! namespace in its own JSON document inside the data directory.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Data directory under the platform data dir
const DATA_DIR_NAME: &str = "handheld";

/// A stored scalar
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrefValue {
    Bool(bool),
    Int(i64),
    Str(String),
}

impl From<bool> for PrefValue {
    fn from(v: bool) -> Self {
        PrefValue::Bool(v)
    }
}

impl From<i64> for PrefValue {
    fn from(v: i64) -> Self {
        PrefValue::Int(v)
    }
}

impl From<u32> for PrefValue {
    fn from(v: u32) -> Self {
        PrefValue::Int(i64::from(v))
    }
}

impl From<&str> for PrefValue {
    fn from(v: &str) -> Self {
        PrefValue::Str(v.to_string())
    }
}

impl From<String> for PrefValue {
    fn from(v: String) -> Self {
        PrefValue::Str(v)
    }
}

/// Typed key-value storage
///
/// Getters return `None` both for missing keys and for keys holding a value
/// of another type, so callers fall back to their defaults either way.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<PrefValue>;

    /// Write several entries as one batch
    fn put_all(&mut self, entries: Vec<(&str, PrefValue)>) -> Result<(), StoreError>;

    fn get_string(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            PrefValue::Str(s) => Some(s),
            _ => None,
        }
    }

    fn get_int(&self, key: &str) -> Option<i32> {
        match self.get(key)? {
            PrefValue::Int(v) => i32::try_from(v).ok(),
            _ => None,
        }
    }

    fn get_long(&self, key: &str) -> Option<i64> {
        match self.get(key)? {
            PrefValue::Int(v) => Some(v),
            _ => None,
        }
    }

    fn get_bool(&self, key: &str) -> Option<bool> {
        match self.get(key)? {
            PrefValue::Bool(b) => Some(b),
            _ => None,
        }
    }
}

/// In-memory store for tests
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, PrefValue>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<PrefValue> {
        self.values.get(key).cloned()
    }

    fn put_all(&mut self, entries: Vec<(&str, PrefValue)>) -> Result<(), StoreError> {
        for (key, value) in entries {
            self.values.insert(key.to_string(), value);
        }
        Ok(())
    }
}

/// JSON-file backed store, one file per namespace
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    values: BTreeMap<String, PrefValue>,
}

impl FileStore {
    /// Open (or lazily create) `<dir>/<namespace>.json`
    ///
    /// An unreadable or corrupt file is treated as empty so a damaged store
    /// degrades to first-launch defaults instead of blocking the app.
    pub fn open(dir: impl AsRef<Path>, namespace: &str) -> Result<Self, StoreError> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        let path = dir.join(format!("{}.json", namespace));

        let values = if path.exists() {
            let raw = fs::read_to_string(&path)?;
            serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!("Failed to parse store {:?}: {}", path, e);
                BTreeMap::new()
            })
        } else {
            BTreeMap::new()
        };

        Ok(Self { path, values })
    }

    /// Default data directory (`<data_dir>/handheld`)
    pub fn default_dir() -> Result<PathBuf, StoreError> {
        dirs::data_dir()
            .map(|d| d.join(DATA_DIR_NAME))
            .ok_or(StoreError::NoDataDir)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StoreError> {
        let contents = serde_json::to_string_pretty(&self.values)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, contents)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&tmp, fs::Permissions::from_mode(0o600))?;
        }

        fs::rename(&tmp, &self.path)?;
        tracing::debug!("Saved store to {:?}", self.path);
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<PrefValue> {
        self.values.get(key).cloned()
    }

    fn put_all(&mut self, entries: Vec<(&str, PrefValue)>) -> Result<(), StoreError> {
        for (key, value) in entries {
            self.values.insert(key.to_string(), value);
        }
        self.flush()
    }
}
