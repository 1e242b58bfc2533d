// crates/reviewlink-wasm/src/storage.rs
use reviewlink_core::store::KeyValueStore;
use reviewlink_core::{Error, Result};
use web_sys::Storage;

use crate::js_message;

/// `window.localStorage` behind the core store trait.
pub struct LocalStore {
    storage: Storage,
}

impl LocalStore {
    pub fn open() -> Result<Self> {
        let window = web_sys::window().ok_or_else(|| Error::Store("no window object".into()))?;
        let storage = window
            .local_storage()
            .map_err(|e| Error::Store(js_message(&e)))?
            .ok_or_else(|| Error::Store("localStorage is disabled".into()))?;
        Ok(Self { storage })
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, name: &str) -> Option<String> {
        self.storage.get_item(name).ok().flatten()
    }

    fn set(&mut self, name: &str, value: &str) -> Result<()> {
        self.storage
            .set_item(name, value)
            .map_err(|e| Error::Store(js_message(&e)))
    }

    fn remove(&mut self, name: &str) -> Result<()> {
        self.storage
            .remove_item(name)
            .map_err(|e| Error::Store(js_message(&e)))
    }
}
