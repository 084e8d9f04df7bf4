//! Session-token storage. One opaque secret string, cached in memory and
//! optionally persisted to a file so the session survives restarts. Its
//! presence is the sole authentication signal the route guard consults.

use parking_lot::RwLock;
use secrecy::{ExposeSecret, SecretString};
use std::{fs, io, path::PathBuf};
use tracing::{debug, warn};

pub struct TokenStore {
    path: Option<PathBuf>,
    cached: RwLock<Option<SecretString>>,
}

impl TokenStore {
    /// Opens a file-backed store, loading any previously persisted token.
    #[must_use]
    pub fn open(path: PathBuf) -> Self {
        let cached = load(&path);
        Self {
            path: Some(path),
            cached: RwLock::new(cached),
        }
    }

    /// In-memory store with no persistence.
    #[must_use]
    pub fn ephemeral() -> Self {
        Self {
            path: None,
            cached: RwLock::new(None),
        }
    }

    #[must_use]
    pub fn get(&self) -> Option<SecretString> {
        self.cached.read().clone()
    }

    #[must_use]
    pub fn present(&self) -> bool {
        self.cached.read().is_some()
    }

    /// Stores the token, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if the token file cannot be written; the in-memory
    /// copy is kept either way so the session stays usable.
    pub fn set(&self, token: SecretString) -> io::Result<()> {
        *self.cached.write() = Some(token.clone());

        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, token.expose_secret())?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
        }
        debug!(path = %path.display(), "session token persisted");
        Ok(())
    }

    /// Deletes the token. Clearing an absent token is a no-op, never an
    /// error, so concurrent teardown paths stay harmless.
    pub fn clear(&self) {
        *self.cached.write() = None;

        let Some(path) = &self.path else {
            return;
        };
        if let Err(err) = fs::remove_file(path) {
            if err.kind() != io::ErrorKind::NotFound {
                warn!(path = %path.display(), error = %err, "failed to remove token file");
            }
        }
    }
}

fn load(path: &PathBuf) -> Option<SecretString> {
    match fs::read_to_string(path) {
        Ok(contents) => {
            let trimmed = contents.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(SecretString::from(trimmed.to_string()))
            }
        }
        Err(err) => {
            if err.kind() != io::ErrorKind::NotFound {
                debug!(path = %path.display(), error = %err, "token file unreadable");
            }
            None
        }
    }
}
