//! Bearer token storage
//!
//! The token handed out by the OAuth callback is kept between runs so that
//! later commands can authenticate. Only one token is ever stored; the last
//! write wins.

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::Mutex,
};

use tracing::{debug, info};

use crate::error::StorageResult;

/// Persisted storage for the bearer token
pub trait TokenStore: Send + Sync {
    /// Get the stored token, if any
    fn get(&self) -> StorageResult<Option<String>>;

    /// Replace the stored token
    fn set(&self, token: &str) -> StorageResult<()>;

    /// Remove the stored token; removing nothing is not an error
    fn delete(&self) -> StorageResult<()>;
}

/// Token kept in a single file on disk
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Create a store backed by the given file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the token file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self) -> StorageResult<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => {
                let token = contents.trim();
                Ok((!token.is_empty()).then(|| token.to_string()))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, token: &str) -> StorageResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        fs::write(&self.path, token)?;
        info!("Stored token in {}", self.path.display());
        Ok(())
    }

    fn delete(&self) -> StorageResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                info!("Removed token file {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No token file to remove at {}", self.path.display());
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Token kept in memory for the lifetime of the process
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store already holding a token
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        // A panic while holding the lock cannot leave a half-written String
        self.token.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> StorageResult<Option<String>> {
        Ok(self.slot().clone())
    }

    fn set(&self, token: &str) -> StorageResult<()> {
        *self.slot() = Some(token.to_string());
        Ok(())
    }

    fn delete(&self) -> StorageResult<()> {
        self.slot().take();
        Ok(())
    }
}
