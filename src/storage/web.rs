//! Browser `window.localStorage` adapter.

use wasm_bindgen::JsValue;
use web_sys::Storage;

use super::{KeyValueStore, StoreError};

/// Key/value store over the page's local storage.
pub struct LocalStorage {
    storage: Storage,
}

impl LocalStorage {
    /// Attach to `window.localStorage`.
    ///
    /// Fails outside a window context or when the browser denies storage
    /// access (some privacy modes).
    pub fn open() -> Result<Self, StoreError> {
        let window = web_sys::window()
            .ok_or_else(|| StoreError::Unavailable("no global window".to_string()))?;
        let storage = window
            .local_storage()
            .map_err(js_error)?
            .ok_or_else(|| StoreError::Unavailable("local storage disabled".to_string()))?;
        Ok(Self { storage })
    }
}

fn js_error(err: JsValue) -> StoreError {
    StoreError::Unavailable(format!("{err:?}"))
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.storage.set_item(key, value).map_err(js_error)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.storage.remove_item(key).map_err(js_error)
    }
}
