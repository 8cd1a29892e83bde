//! # Storage
//!
//! Whole-file JSON persistence for a [`TodoList`].
//!
//! The entire list is written as one pretty-printed array (four-space
//! indent) on every save. Writes go to `<file>.tmp` first and are renamed
//! over the real file, so a crash mid-write leaves the previous version in
//! place. There is no fsync.
//!
//! A bare `null` document (what Go writes for a nil slice) loads as an
//! empty list.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use serde::Serialize;

use crate::core::todo::TodoList;

/// Default persistence file, relative to the working directory.
pub const DEFAULT_STORAGE_PATH: &str = "todos.json";

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum StorageError {
    Io(io::Error),
    Serialize(serde_json::Error),
    Parse(serde_json::Error),
}

impl StorageError {
    /// True when the file simply isn't there yet (first run).
    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::Io(e) if e.kind() == io::ErrorKind::NotFound)
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Io(e) => write!(f, "storage I/O error: {e}"),
            StorageError::Serialize(e) => write!(f, "failed to serialize todos: {e}"),
            StorageError::Parse(e) => write!(f, "failed to parse todos: {e}"),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Io(e) => Some(e),
            StorageError::Serialize(e) | StorageError::Parse(e) => Some(e),
        }
    }
}

// ============================================================================
// Storage Handle
// ============================================================================

/// Binds a todo list to a single JSON file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Storage {
    path: PathBuf,
}

impl Storage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes the full list to the file, replacing whatever was there.
    pub fn save(&self, todos: &TodoList) -> Result<(), StorageError> {
        let json = to_json_pretty(todos).map_err(StorageError::Serialize)?;
        let tmp_path = self.tmp_path();
        fs::write(&tmp_path, json).map_err(StorageError::Io)?;
        fs::rename(&tmp_path, &self.path).map_err(StorageError::Io)?;
        debug!("Saved {} todos to {}", todos.len(), self.path.display());
        Ok(())
    }

    /// Reads the list back from the file.
    pub fn load(&self) -> Result<TodoList, StorageError> {
        let json = fs::read(&self.path).map_err(StorageError::Io)?;
        let todos: Option<TodoList> =
            serde_json::from_slice(&json).map_err(StorageError::Parse)?;
        let mut todos = todos.unwrap_or_default();
        todos.repair();
        debug!("Loaded {} todos from {}", todos.len(), self.path.display());
        Ok(todos)
    }

    /// Sibling of the storage file used for the write-then-rename.
    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }

    /// Loads the list, or starts empty if the file is missing or unreadable.
    ///
    /// The error (if any) is handed back so the caller can tell the user.
    pub fn load_or_default(&self) -> (TodoList, Option<StorageError>) {
        match self.load() {
            Ok(todos) => (todos, None),
            Err(e) if e.is_not_found() => {
                info!(
                    "No todo file at {}, starting with an empty list",
                    self.path.display()
                );
                (TodoList::new(), Some(e))
            }
            Err(e) => {
                warn!(
                    "Failed to load todos from {}: {}. Starting with an empty list",
                    self.path.display(),
                    e
                );
                (TodoList::new(), Some(e))
            }
        }
    }
}

impl Default for Storage {
    fn default() -> Self {
        Self::new(DEFAULT_STORAGE_PATH)
    }
}

fn to_json_pretty<T: Serialize>(value: &T) -> serde_json::Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    Ok(buf)
}
