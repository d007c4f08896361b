use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::PagebuilderError;

pub const TOKEN_KEY: &str = "unsplash_access_token";
pub const PKCE_KEY: &str = "unsplash_pkce_state";

/// String key-value storage scoped to one user session.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str) -> Result<(), PagebuilderError>;

    /// Removing a key that is not present is not an error.
    fn delete(&self, key: &str) -> Result<(), PagebuilderError>;
}

/// In-process store; contents vanish with the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PagebuilderError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| PagebuilderError::StoreError("memory store lock poisoned".into()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), PagebuilderError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| PagebuilderError::StoreError("memory store lock poisoned".into()))?;
        entries.remove(key);
        Ok(())
    }
}

/// Store backed by a single JSON object on disk, so a login started by one
/// CLI invocation can be completed by the next.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

pub fn default_session_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".pagebuilder")
        .join("session.json")
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<HashMap<String, String>, PagebuilderError> {
        let data = match std::fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(HashMap::new()),
            Err(e) => return Err(e.into()),
        };
        serde_json::from_str(&data).map_err(|e| {
            PagebuilderError::StoreError(format!(
                "Corrupt session file {}: {e}",
                self.path.display()
            ))
        })
    }

    fn write_entries(&self, entries: &HashMap<String, String>) -> Result<(), PagebuilderError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(entries).map_err(|e| {
            PagebuilderError::StoreError(format!("Failed to serialize session: {e}"))
        })?;
        std::fs::write(&self.path, data)?;
        Ok(())
    }
}

impl Default for FileStore {
    fn default() -> Self {
        Self::new(default_session_path())
    }
}

impl SessionStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.read_entries().ok()?.remove(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PagebuilderError> {
        let mut entries = self.read_entries()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_entries(&entries)
    }

    fn delete(&self, key: &str) -> Result<(), PagebuilderError> {
        let mut entries = self.read_entries()?;
        if entries.remove(key).is_some() {
            self.write_entries(&entries)?;
        }
        Ok(())
    }
}
