//! Key-value persistence
//!
//! The game stores a handful of scalar strings (best time, settings JSON).
//! Backends:
//! - `MemoryStore`: in-process map (native runs, tests)
//! - `LocalStorage`: browser LocalStorage (wasm32 only)

use std::collections::HashMap;
use std::fmt;

/// Persistence failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No backing store (e.g. LocalStorage disabled)
    Unavailable,
    /// The backend refused the write (quota, privacy mode)
    Rejected { key: String },
    /// A stored value could not be parsed
    Corrupt { key: String, value: String },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable => write!(f, "storage unavailable"),
            Self::Rejected { key } => write!(f, "storage rejected write to '{key}'"),
            Self::Corrupt { key, value } => {
                write!(f, "stored value for '{key}' is not valid: {value:?}")
            }
        }
    }
}

impl std::error::Error for StoreError {}

/// String key-value storage capability
pub trait KeyValueStore {
    /// Read a value; `None` when the key is absent or the store is unreadable
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Read a number, falling back to `default` when absent or unparsable
    fn get_u64(&self, key: &str, default: u64) -> u64 {
        match self.get(key) {
            None => default,
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(value) => value,
                Err(_) => {
                    let err = StoreError::Corrupt {
                        key: key.to_string(),
                        value: raw,
                    };
                    log::warn!("{err}, using {default}");
                    default
                }
            },
        }
    }

    fn set_u64(&mut self, key: &str, value: u64) -> Result<(), StoreError> {
        self.set(key, &value.to_string())
    }
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Browser LocalStorage
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

#[cfg(target_arch = "wasm32")]
impl LocalStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let storage = Self::storage().ok_or(StoreError::Unavailable)?;
        storage
            .set_item(key, value)
            .map_err(|_| StoreError::Rejected {
                key: key.to_string(),
            })
    }
}
