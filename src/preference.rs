//! Local key-value preferences.
//!
//! Reads never fail: missing or unreadable storage reads as absent. Writes
//! are best-effort and a failed write is logged and dropped.

use std::cell::RefCell;
use std::collections::HashMap;

use log::warn;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("preference storage is unavailable")]
    Unavailable,
    #[error("storage rejected the write: {0}")]
    Rejected(String),
}

pub trait PreferenceStore {
    fn read(&self, key: &str) -> Option<String>;

    fn try_write(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Store `value` under `key`, swallowing any storage failure.
    fn write(&self, key: &str, value: &str) {
        if let Err(e) = self.try_write(key, value) {
            warn!("Failed to save preference {}: {}", key, e);
        }
    }
}

/// Session-only store, used when the browser exposes no persistent storage.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<String, String>>,
}

impl PreferenceStore for MemoryStore {
    fn read(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn try_write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Storage blocked by browser policy: nothing is ever retained.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct DisabledStore {
    pub attempts: std::cell::Cell<usize>,
}

#[cfg(test)]
impl PreferenceStore for DisabledStore {
    fn read(&self, _key: &str) -> Option<String> {
        None
    }

    fn try_write(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
        self.attempts.set(self.attempts.get() + 1);
        Err(StoreError::Unavailable)
    }
}
