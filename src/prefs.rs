//! Persisted user preferences (theme, language) with soft failure.
//!
//! The backing store is injected so controllers can be exercised against
//! [`MemoryBackend`]. In the browser it is `localStorage`
//! (`host::LocalStorageBackend`). Reads and writes never surface errors to
//! callers: an unavailable store behaves like an empty one, and a failed
//! write leaves the in-memory UI state authoritative for the session.

#[cfg(test)]
#[path = "prefs_test.rs"]
mod prefs_test;

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::config::StorageKeys;

/// Failure reported by a [`PreferenceBackend`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The platform offers no persistent store (private mode, disabled storage).
    #[error("preference store unavailable")]
    Unavailable,
    /// The store exists but refused the operation (quota, security error).
    #[error("preference store rejected `{key}`: {reason}")]
    Rejected { key: String, reason: String },
}

/// A string key-value store that survives reloads.
pub trait PreferenceBackend {
    /// Read `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write `value` under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// The named preferences this page persists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preference {
    Theme,
    Language,
}

/// Typed front over a [`PreferenceBackend`].
#[derive(Clone)]
pub struct Preferences {
    backend: Rc<dyn PreferenceBackend>,
    keys: StorageKeys,
}

impl std::fmt::Debug for Preferences {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Preferences").field("keys", &self.keys).finish_non_exhaustive()
    }
}

impl Preferences {
    #[must_use]
    pub fn new(backend: Rc<dyn PreferenceBackend>, keys: StorageKeys) -> Self {
        Self { backend, keys }
    }

    fn key(&self, pref: Preference) -> &str {
        match pref {
            Preference::Theme => &self.keys.theme,
            Preference::Language => &self.keys.language,
        }
    }

    /// Read a preference. Absent on any store failure.
    #[must_use]
    pub fn get(&self, pref: Preference) -> Option<String> {
        match self.backend.get(self.key(pref)) {
            Ok(value) => value,
            Err(err) => {
                log::debug!("preference read skipped: {err}");
                None
            }
        }
    }

    /// Write a preference, best-effort.
    pub fn set(&self, pref: Preference, value: &str) {
        if let Err(err) = self.backend.set(self.key(pref), value) {
            log::debug!("preference write dropped: {err}");
        }
    }
}

/// Process-local store. Clones share the same map, which lets tests
/// simulate a reload by building a second engine over the same backend.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    values: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw stored value for `key`, bypassing [`Preferences`].
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }
}

impl PreferenceBackend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.borrow_mut().insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// A store that is never available.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableBackend;

impl PreferenceBackend for UnavailableBackend {
    fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Err(StoreError::Unavailable)
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::Unavailable)
    }
}
