//! Session persistence.
//!
//! The logged-in user (token included) is stored as JSON under a single key,
//! [`CURRENT_USER_KEY`], in a [`LocalStorage`] backend. The file-backed
//! storage keeps every key in one JSON object so the file reads like a
//! browser's local storage dump.

use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use jokroup_core::User;
use thiserror::Error;
use tracing::{debug, warn};

/// Storage key holding the serialized current user.
pub const CURRENT_USER_KEY: &str = "currentUser";

/// Errors that can occur while reading or writing the session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Session JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// String key/value storage, the client's stand-in for browser local storage.
pub trait LocalStorage: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns error if the backing store cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, SessionError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns error if the backing store cannot be written.
    fn set_item(&self, key: &str, value: &str) -> Result<(), SessionError>;

    /// Remove `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns error if the backing store cannot be written.
    fn remove_item(&self, key: &str) -> Result<(), SessionError>;
}

// =============================================================================
// File Storage
// =============================================================================

/// Local storage persisted to a JSON file.
///
/// Parent directories are created on first write. A missing or undecodable
/// file reads as empty storage, and the next write replaces it. Writes go to
/// a temp file in the same directory that is then renamed over the target,
/// so an interrupted write never leaves a truncated file behind.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    lock: Mutex<()>,
}

impl FileStorage {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<HashMap<String, String>, SessionError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(HashMap::new()),
            Err(e) => return Err(e.into()),
        };
        if raw.trim().is_empty() {
            return Ok(HashMap::new());
        }
        match serde_json::from_str(&raw) {
            Ok(map) => Ok(map),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Discarding unreadable session file");
                Ok(HashMap::new())
            }
        }
    }

    fn write_map(&self, map: &HashMap<String, String>) -> Result<(), SessionError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir)?;

        let raw = serde_json::to_string_pretty(map)?;
        let mut file = tempfile::NamedTempFile::new_in(dir)?;
        file.write_all(raw.as_bytes())?;
        file.as_file().sync_all()?;
        file.persist(&self.path).map_err(|e| e.error)?;
        debug!(path = %self.path.display(), keys = map.len(), "Wrote session file");
        Ok(())
    }
}

impl LocalStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, SessionError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(self.read_map()?.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), SessionError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut map = self.read_map()?;
        map.insert(key.to_owned(), value.to_owned());
        self.write_map(&map)
    }

    fn remove_item(&self, key: &str) -> Result<(), SessionError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut map = self.read_map()?;
        if map.remove(key).is_some() {
            self.write_map(&map)?;
        }
        Ok(())
    }
}

// =============================================================================
// Memory Storage
// =============================================================================

/// Non-persistent local storage, for tests and one-shot commands.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl LocalStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, SessionError> {
        Ok(self
            .items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), SessionError> {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), SessionError> {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
        Ok(())
    }
}

// =============================================================================
// Session Persistence
// =============================================================================

/// Reads and writes the current user through a [`LocalStorage`] backend.
#[derive(Clone)]
pub struct SessionPersistence {
    storage: Arc<dyn LocalStorage>,
}

impl std::fmt::Debug for SessionPersistence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionPersistence").finish_non_exhaustive()
    }
}

impl SessionPersistence {
    #[must_use]
    pub fn new(storage: Arc<dyn LocalStorage>) -> Self {
        Self { storage }
    }

    /// Load the persisted user.
    ///
    /// A value that no longer decodes as a user is logged and treated as no
    /// session.
    ///
    /// # Errors
    ///
    /// Returns error if the storage backend cannot be read.
    pub fn load_user(&self) -> Result<Option<User>, SessionError> {
        let Some(raw) = self.storage.get_item(CURRENT_USER_KEY)? else {
            return Ok(None);
        };

        match serde_json::from_str::<User>(&raw) {
            Ok(user) => {
                debug!(user_id = %user.id, "Loaded persisted session");
                Ok(Some(user))
            }
            Err(e) => {
                warn!(error = %e, "Ignoring unreadable persisted session");
                Ok(None)
            }
        }
    }

    /// Persist `user` as the current session.
    ///
    /// # Errors
    ///
    /// Returns error if the storage backend cannot be written.
    pub fn save_user(&self, user: &User) -> Result<(), SessionError> {
        let raw = serde_json::to_string(user)?;
        self.storage.set_item(CURRENT_USER_KEY, &raw)
    }

    /// Forget the current session.
    ///
    /// # Errors
    ///
    /// Returns error if the storage backend cannot be written.
    pub fn clear(&self) -> Result<(), SessionError> {
        self.storage.remove_item(CURRENT_USER_KEY)
    }
}
