//! File-backed repository: the persistent scope survives restarts.
//!
//! The persistent scope is a flat JSON object (`{"token": "...", "user":
//! "..."}`) written to disk after every change. The ephemeral scope stays
//! in memory and is gone when the process exits, which is exactly what a
//! closed tab does to `sessionStorage`.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use crate::{Scope, SessionRepository, StorageError};

type Entries = HashMap<String, String>;

struct Scopes {
    persistent: Entries,
    ephemeral: Entries,
}

impl Scopes {
    fn scope(&mut self, scope: Scope) -> &mut Entries {
        match scope {
            Scope::Persistent => &mut self.persistent,
            Scope::Ephemeral => &mut self.ephemeral,
        }
    }
}

/// A [`SessionRepository`] whose persistent scope lives in a JSON file.
pub struct FileRepository {
    path: PathBuf,
    scopes: Mutex<Scopes>,
}

impl FileRepository {
    /// Opens (or prepares to create) the storage file at `path`.
    ///
    /// A missing file is an empty persistent scope; it is created on the
    /// first write.
    ///
    /// # Errors
    /// - [`StorageError::Io`]: the file exists but can't be read
    /// - [`StorageError::Corrupt`]: the file isn't a JSON string map
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();
        let persistent = match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents)
                .map_err(|e| StorageError::Corrupt(e.to_string()))?,
            Err(e) if e.kind() == ErrorKind::NotFound => Entries::new(),
            Err(e) => return Err(StorageError::Io(e)),
        };
        tracing::debug!(path = %path.display(), entries = persistent.len(), "opened storage file");

        Ok(Self {
            path,
            scopes: Mutex::new(Scopes {
                persistent,
                ephemeral: Entries::new(),
            }),
        })
    }

    /// Where the persistent scope is written.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn scopes(&self) -> Result<MutexGuard<'_, Scopes>, StorageError> {
        self.scopes
            .lock()
            .map_err(|_| StorageError::Unavailable("file storage lock poisoned".into()))
    }

    /// Writes to a sibling temp file and renames it over the target, so a
    /// crash mid-write never leaves a truncated file behind.
    fn flush(&self, persistent: &Entries) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(persistent)
            .map_err(|e| StorageError::Corrupt(e.to_string()))?;
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(StorageError::Io)?;
        }
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json).map_err(StorageError::Io)?;
        fs::rename(&tmp, &self.path).map_err(StorageError::Io)
    }
}

impl SessionRepository for FileRepository {
    fn get(&self, scope: Scope, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.scopes()?.scope(scope).get(key).cloned())
    }

    fn set(&self, scope: Scope, key: &str, value: &str) -> Result<(), StorageError> {
        let mut scopes = self.scopes()?;
        if scope == Scope::Ephemeral {
            scopes.ephemeral.insert(key.to_string(), value.to_string());
            return Ok(());
        }

        // Memory only follows the disk once the write has landed.
        let mut next = scopes.persistent.clone();
        next.insert(key.to_string(), value.to_string());
        self.flush(&next)?;
        scopes.persistent = next;
        Ok(())
    }

    fn remove(&self, scope: Scope, key: &str) -> Result<(), StorageError> {
        let mut scopes = self.scopes()?;
        if scope == Scope::Ephemeral {
            scopes.ephemeral.remove(key);
            return Ok(());
        }
        if !scopes.persistent.contains_key(key) {
            return Ok(());
        }

        let mut next = scopes.persistent.clone();
        next.remove(key);
        self.flush(&next)?;
        scopes.persistent = next;
        Ok(())
    }
}
