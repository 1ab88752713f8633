//! Pairing token persistence.
//!
//! The TV hands out a token the first time a client is accepted on screen.
//! Sending it back on later connections skips the pairing prompt.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File-backed store for the pairing token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    /// Creates a store backed by `path`. The file need not exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the token file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the stored token. A missing or blank file yields `None`.
    pub fn load(&self) -> io::Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(content) => {
                let token = content.trim();
                Ok((!token.is_empty()).then(|| token.to_string()))
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Writes `token`, creating parent directories as needed.
    ///
    /// Uses temp file + rename so a crash never leaves a truncated token.
    pub fn save(&self, token: &str) -> io::Result<()> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }
        let temp_path = self.path.with_extension("tmp");
        fs::write(&temp_path, token)?;
        fs::rename(&temp_path, &self.path)?;
        debug!("saved pairing token to {}", self.path.display());
        Ok(())
    }
}
