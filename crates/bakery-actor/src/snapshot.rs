//! # Snapshot Stores
//!
//! A [`SnapshotStore`] is a string-keyed slot of durable text, the same shape as browser
//! local storage. A [`ResourceActor`](crate::ResourceActor) configured with one serializes its
//! ordered store as a JSON array under a single key after every mutation, reads it back when
//! it starts, and removes the key when it is cleared.
//!
//! Two backends ship with the framework:
//!
//! | Backend | Use |
//! |---------|-----|
//! | [`FileSnapshotStore`] | One `<key>.json` file per key inside a directory. |
//! | [`MemorySnapshotStore`] | Shared in-memory map; tests and ephemeral sessions. |

use crate::error::SnapshotError;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

/// Durable key-value text storage used for actor snapshots.
pub trait SnapshotStore: Send + Sync {
    /// Returns the stored text, or `None` when the key has never been written (or was removed).
    fn load(&self, key: &str) -> Result<Option<String>, SnapshotError>;

    /// Fully overwrites the value stored under `key`.
    fn save(&self, key: &str, contents: &str) -> Result<(), SnapshotError>;

    /// Deletes `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), SnapshotError>;
}

/// Stores each key as `<dir>/<key>.json`.
///
/// Writes go to a sibling temporary file first and are renamed into place, so a crash mid-write
/// leaves the previous snapshot intact.
#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    dir: PathBuf,
}

impl FileSnapshotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, SnapshotError> {
        let usable = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !usable {
            return Err(SnapshotError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> SnapshotError + '_ {
    move |source| SnapshotError::Io {
        path: path.to_path_buf(),
        source,
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn load(&self, key: &str) -> Result<Option<String>, SnapshotError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(&path)(e)),
        }
    }

    fn save(&self, key: &str, contents: &str) -> Result<(), SnapshotError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir).map_err(io_error(&self.dir))?;
        let staging = path.with_extension("json.tmp");
        fs::write(&staging, contents).map_err(io_error(&staging))?;
        fs::rename(&staging, &path).map_err(io_error(&path))
    }

    fn remove(&self, key: &str) -> Result<(), SnapshotError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error(&path)(e)),
        }
    }
}

/// In-memory snapshot storage. Clones share the same underlying map, so a test can keep one
/// handle while the actor owns another.
#[derive(Debug, Clone, Default)]
pub struct MemorySnapshotStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current raw contents under `key`.
    pub fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn load(&self, key: &str) -> Result<Option<String>, SnapshotError> {
        Ok(self.get(key))
    }

    fn save(&self, key: &str, contents: &str) -> Result<(), SnapshotError> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), contents.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), SnapshotError> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
        Ok(())
    }
}
