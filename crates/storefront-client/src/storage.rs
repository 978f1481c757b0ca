//! Key/value storage areas.
//!
//! Two areas exist, mirroring the browser:
//!
//! - **persistent** ([`FileStore`]): auth tokens and cached profiles,
//!   survives restarts.
//! - **session** ([`MemoryStore`]): the analytics session id, lives as
//!   long as the process.
//!
//! Both are internally synchronized; reads never fail.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("corrupt storage file {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode storage: {0}")]
    Encode(#[from] serde_json::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// A string-to-string storage area.
pub trait KeyValueStore: Send + Sync + fmt::Debug {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;
    fn remove(&self, key: &str) -> StorageResult<()>;
    fn clear(&self) -> StorageResult<()>;
}

// ============================================================================
// MemoryStore
// ============================================================================

/// In-memory storage. All data is lost when dropped.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.entries.write().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.entries.write().remove(key);
        Ok(())
    }

    fn clear(&self) -> StorageResult<()> {
        self.entries.write().clear();
        Ok(())
    }
}

// ============================================================================
// FileStore
// ============================================================================

/// JSON-file storage with write-through.
///
/// The file is loaded once on open and rewritten (via temp file + rename)
/// on every mutation. Reads are served from memory.
pub struct FileStore {
    path: PathBuf,
    entries: RwLock<BTreeMap<String, String>>,
}

impl FileStore {
    /// Open the store at `path`, creating nothing until the first write.
    pub fn open(path: impl Into<PathBuf>) -> StorageResult<Self> {
        let path = path.into();
        let entries = match std::fs::read(&path) {
            Ok(bytes) if bytes.is_empty() => BTreeMap::new(),
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|source| StorageError::Corrupt { path: path.clone(), source })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(StorageError::Io { path, source }),
        };
        tracing::debug!(path = %path.display(), keys = entries.len(), "opened persistent storage");
        Ok(Self { path, entries: RwLock::new(entries) })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Apply `change` to a copy, write it, and only then publish it.
    ///
    /// Memory never holds state the file does not. `change` returns `false`
    /// when it left the map untouched.
    fn update(&self, change: impl FnOnce(&mut BTreeMap<String, String>) -> bool) -> StorageResult<()> {
        let mut entries = self.entries.write();
        let mut next = entries.clone();
        if !change(&mut next) {
            return Ok(());
        }
        self.persist(&next)?;
        *entries = next;
        Ok(())
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> StorageResult<()> {
        let io_err = |source| StorageError::Io { path: self.path.clone(), source };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(io_err)?;
            }
        }
        let bytes = serde_json::to_vec_pretty(entries)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, bytes).map_err(io_err)?;
        std::fs::rename(&tmp, &self.path).map_err(io_err)?;
        Ok(())
    }
}

impl fmt::Debug for FileStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Values are credentials; never print them.
        f.debug_struct("FileStore")
            .field("path", &self.path)
            .field("keys", &self.entries.read().keys().collect::<Vec<_>>())
            .finish()
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.update(|entries| {
            entries.insert(key.to_string(), value.to_string());
            true
        })
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.update(|entries| entries.remove(key).is_some())
    }

    fn clear(&self) -> StorageResult<()> {
        self.update(|entries| {
            entries.clear();
            true
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_basics() {
        let store = MemoryStore::new();
        assert!(store.is_empty());
        store.set("token", "abc").unwrap();
        assert_eq!(store.get("token").as_deref(), Some("abc"));
        store.set("token", "def").unwrap();
        assert_eq!(store.get("token").as_deref(), Some("def"));
        store.remove("token").unwrap();
        assert_eq!(store.get("token"), None);
        store.set("a", "1").unwrap();
        store.set("b", "2").unwrap();
        assert_eq!(store.len(), 2);
        store.clear().unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        let store = FileStore::open(&path).unwrap();
        assert_eq!(store.get("token"), None);
        store.set("token", "user-token").unwrap();
        store.set("adminToken", "admin-token").unwrap();
        drop(store);

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get("token").as_deref(), Some("user-token"));
        assert_eq!(reopened.get("adminToken").as_deref(), Some("admin-token"));

        reopened.remove("token").unwrap();
        drop(reopened);
        let again = FileStore::open(&path).unwrap();
        assert_eq!(again.get("token"), None);
        assert_eq!(again.get("adminToken").as_deref(), Some("admin-token"));
    }

    #[test]
    fn failed_write_leaves_memory_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let parent = dir.path().join("profile");
        let store = FileStore::open(parent.join("storage.json")).unwrap();
        store.set("adminToken", "kept").unwrap();

        // A plain file where the parent directory should be makes every write fail.
        std::fs::remove_dir_all(&parent).unwrap();
        std::fs::write(&parent, b"").unwrap();

        assert!(matches!(store.set("token", "t"), Err(StorageError::Io { .. })));
        assert_eq!(store.get("token"), None);

        assert!(store.remove("adminToken").is_err());
        assert_eq!(store.get("adminToken").as_deref(), Some("kept"));

        assert!(store.clear().is_err());
        assert_eq!(store.get("adminToken").as_deref(), Some("kept"));

        // Removing an absent key writes nothing, so it cannot fail.
        store.remove("missing").unwrap();
    }

    #[test]
    fn file_store_rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, b"{not json").unwrap();
        assert!(matches!(FileStore::open(&path), Err(StorageError::Corrupt { .. })));
    }

    #[test]
    fn file_store_debug_hides_values() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().join("storage.json")).unwrap();
        store.set("token", "s3cret").unwrap();
        let printed = format!("{store:?}");
        assert!(printed.contains("token"));
        assert!(!printed.contains("s3cret"));
    }
}
