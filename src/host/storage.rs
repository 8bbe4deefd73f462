//! `localStorage`-backed preferences.

use wasm_bindgen::JsValue;
use web_sys::{Storage, Window};

use crate::prefs::{PreferenceBackend, StoreError};

pub struct LocalStorageBackend {
    storage: Option<Storage>,
}

impl LocalStorageBackend {
    /// Storage access can throw (privacy modes); that reads as unavailable.
    #[must_use]
    pub fn from_window(window: &Window) -> Self {
        Self { storage: window.local_storage().ok().flatten() }
    }
}

fn rejected(key: &str, err: &JsValue) -> StoreError {
    StoreError::Rejected { key: key.to_owned(), reason: format!("{err:?}") }
}

impl PreferenceBackend for LocalStorageBackend {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let storage = self.storage.as_ref().ok_or(StoreError::Unavailable)?;
        storage.get_item(key).map_err(|err| rejected(key, &err))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let storage = self.storage.as_ref().ok_or(StoreError::Unavailable)?;
        storage.set_item(key, value).map_err(|err| rejected(key, &err))
    }
}
