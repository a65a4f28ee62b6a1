//! Bearer-token storage.
//!
//! Stores the session credential in `<LADLE_HOME>/credentials.json` with
//! restricted permissions (0600). The token is never logged in full.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::paths;

/// Credential filename under the ladle home directory.
const CREDENTIAL_FILE: &str = "credentials.json";

#[derive(Debug, Serialize, Deserialize)]
struct StoredCredential {
    token: String,
}

/// Durable storage for the single active bearer token.
///
/// Exactly one token may be active at a time; writing replaces any previous
/// one. Read once at process startup, written only by login/logout.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl Default for CredentialStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialStore {
    /// Store at the default location under the ladle home directory.
    pub fn new() -> Self {
        Self {
            path: paths::ladle_home().join(CREDENTIAL_FILE),
        }
    }

    /// Store at an explicit path (used by tests).
    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }

    /// Loads the stored token, if any.
    /// Returns `None` if the file doesn't exist.
    pub fn load(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read credentials from {}", self.path.display()))?;

        let stored: StoredCredential = serde_json::from_str(&contents).with_context(|| {
            format!("Failed to parse credentials from {}", self.path.display())
        })?;
        Ok(Some(stored.token))
    }

    /// Saves a token, replacing any previous one, with restricted permissions (0600).
    pub fn save(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let contents = serde_json::to_string_pretty(&StoredCredential {
            token: token.to_string(),
        })
        .context("Failed to serialize credentials")?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(0o600)
                .open(&self.path)
                .with_context(|| format!("Failed to open {} for writing", self.path.display()))?;
            file.write_all(contents.as_bytes())
                .with_context(|| format!("Failed to write to {}", self.path.display()))?;
        }

        #[cfg(not(unix))]
        {
            fs::write(&self.path, contents)
                .with_context(|| format!("Failed to write to {}", self.path.display()))?;
        }

        Ok(())
    }

    /// Removes the stored token. Returns true if a file was removed.
    pub fn clear(&self) -> Result<bool> {
        if !self.path.exists() {
            return Ok(false);
        }
        fs::remove_file(&self.path)
            .with_context(|| format!("Failed to remove {}", self.path.display()))?;
        Ok(true)
    }
}
