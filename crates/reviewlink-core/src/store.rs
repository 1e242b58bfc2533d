// crates/reviewlink-core/src/store.rs

//! Name/value persistence used by the front ends to remember the API key and
//! the last resolved place.

use crate::error::Result;
use crate::model::PlaceRecord;
use std::collections::BTreeMap;

pub const KEY_API_KEY: &str = "reviewlink.api_key";
pub const KEY_LAST_PLACE: &str = "reviewlink.last_place";

pub trait KeyValueStore {
    fn get(&self, name: &str) -> Option<String>;
    fn set(&mut self, name: &str, value: &str) -> Result<()>;
    fn remove(&mut self, name: &str) -> Result<()>;

    /// The stored API key, if one is set and non-blank.
    fn api_key(&self) -> Option<String> {
        self.get(KEY_API_KEY).filter(|k| !k.trim().is_empty())
    }

    /// Last place saved with [`KeyValueStore::save_last_place`]. An entry
    /// that no longer parses is treated as absent.
    fn last_place(&self) -> Option<PlaceRecord> {
        self.get(KEY_LAST_PLACE)
            .and_then(|s| serde_json::from_str(&s).ok())
    }

    fn save_last_place(&mut self, record: &PlaceRecord) -> Result<()> {
        let json = serde_json::to_string(record)?;
        self.set(KEY_LAST_PLACE, &json)
    }
}

/// In-process store; nothing survives the process.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &BTreeMap<String, String> {
        &self.entries
    }
}

impl From<BTreeMap<String, String>> for MemoryStore {
    fn from(entries: BTreeMap<String, String>) -> Self {
        Self { entries }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, name: &str) -> Option<String> {
        self.entries.get(name).cloned()
    }

    fn set(&mut self, name: &str, value: &str) -> Result<()> {
        self.entries.insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, name: &str) -> Result<()> {
        self.entries.remove(name);
        Ok(())
    }
}
