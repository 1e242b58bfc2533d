use reviewlink_core::error::{Error, Result};
use reviewlink_core::store::KeyValueStore;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// A JSON object on disk, rewritten on every change.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// `<config dir>/reviewlink/store.json`, when the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("reviewlink").join("store.json"))
    }

    /// Opens the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text)
                .map_err(|e| Error::Store(format!("{} is not a valid store: {e}", path.display())))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(Error::Store(format!("reading {}: {e}", path.display()))),
        };
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| Error::Store(format!("creating {}: {e}", parent.display())))?;
        }
        let json = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, json)
            .map_err(|e| Error::Store(format!("writing {}: {e}", self.path.display())))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, name: &str) -> Option<String> {
        self.entries.get(name).cloned()
    }

    fn set(&mut self, name: &str, value: &str) -> Result<()> {
        self.entries.insert(name.to_string(), value.to_string());
        self.flush()
    }

    fn remove(&mut self, name: &str) -> Result<()> {
        if self.entries.remove(name).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}
