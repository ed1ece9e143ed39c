//! JSON-file storage backend.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tracing::{debug, warn};

use super::{KeyValueStore, StorageError};

/// Stores all keys in a single JSON object on disk.
///
/// The document is read once when the store is opened and rewritten on
/// every `set`. A missing or unreadable file starts the store empty.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

impl FileStore {
    /// Open the store at `path`.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match Self::read_document(&path) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Ignoring unreadable storage file {}: {}", path.display(), e);
                HashMap::new()
            }
        };
        debug!("Opened storage {} ({} keys)", path.display(), entries.len());

        Self {
            path,
            entries: Mutex::new(entries),
        }
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(path: &Path) -> Result<HashMap<String, String>, StorageError> {
        match fs::read_to_string(path) {
            Ok(raw) if raw.trim().is_empty() => Ok(HashMap::new()),
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_document(&self, entries: &HashMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock();
        let previous = entries.insert(key.to_string(), value.to_string());

        if let Err(e) = self.write_document(&entries) {
            // Keep memory and disk consistent when the write fails.
            match previous {
                Some(old) => entries.insert(key.to_string(), old),
                None => entries.remove(key),
            };
            return Err(e);
        }

        debug!("Stored {} in {}", key, self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        let store = FileStore::open(&path);
        assert_eq!(store.get("medibot-language"), None);
        store.set("medibot-language", "or").unwrap();

        let reopened = FileStore::open(&path);
        assert_eq!(reopened.get("medibot-language").as_deref(), Some("or"));
    }

    #[test]
    fn test_corrupt_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "{not json").unwrap();

        let store = FileStore::open(&path);
        assert_eq!(store.get("medibot-language"), None);
        store.set("medibot-language", "bn").unwrap();
        assert_eq!(FileStore::open(&path).get("medibot-language").as_deref(), Some("bn"));
    }

    #[test]
    fn test_failed_write_rolls_back() {
        let dir = tempfile::tempdir().unwrap();
        // The parent "directory" is a regular file, so writes cannot succeed.
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();
        let store = FileStore::open(blocker.join("storage.json"));

        assert!(store.set("medibot-language", "hi").is_err());
        assert_eq!(store.get("medibot-language"), None);
    }
}
