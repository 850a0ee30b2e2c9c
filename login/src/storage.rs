//! Local session store
//!
//! Persists the biometric preference, the credentials cached for biometric
//! sign-in and the current session so the CLI survives between runs.
//!
//! Storage location: `~/.config/intake/session.json` unless configured
//! otherwise. A missing file reads as an empty store.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use intake_core::SessionConfig;
use serde::{Deserialize, Serialize};

use crate::error::StorageError;

/// Signed-in user as reported by the identity provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    pub email: String,
    pub id_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    pub signed_in_at: DateTime<Utc>,
}

/// Email and password kept for biometric sign-in
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedCredentials {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for SavedCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SavedCredentials")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// Session file format
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredState {
    /// Schema version for migration
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub biometric_enabled: bool,
    #[serde(default)]
    pub credentials: Option<SavedCredentials>,
    #[serde(default)]
    pub session: Option<Session>,
}

fn default_version() -> u32 {
    1
}

/// JSON file backed session store
#[derive(Debug, Clone)]
pub struct SessionStore {
    file_path: PathBuf,
}

impl SessionStore {
    /// Store at the configured session path
    pub fn from_config(config: &SessionConfig) -> Self {
        Self::with_path(config.resolved_path())
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self { file_path: path }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Read the whole store
    pub fn load(&self) -> Result<StoredState, StorageError> {
        if !self.file_path.exists() {
            return Ok(StoredState::default());
        }

        let content = fs::read_to_string(&self.file_path)?;
        let state: StoredState = serde_json::from_str(&content)?;
        Ok(state)
    }

    /// Write the whole store, user-only permissions on Unix.
    ///
    /// The file is created 0600 and an existing file is narrowed to 0600
    /// before any content is written.
    pub fn save(&self, state: &StoredState) -> Result<(), StorageError> {
        if let Some(parent) = self.file_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(state)?;

        #[cfg(unix)]
        let mut file = {
            use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(0o600)
                .open(&self.file_path)?;
            file.set_permissions(fs::Permissions::from_mode(0o600))?;
            file
        };

        #[cfg(not(unix))]
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.file_path)?;

        file.write_all(content.as_bytes())?;
        Ok(())
    }

    fn update(&self, apply: impl FnOnce(&mut StoredState)) -> Result<(), StorageError> {
        let mut state = self.load()?;
        apply(&mut state);
        self.save(&state)
    }

    pub fn biometric_enabled(&self) -> Result<bool, StorageError> {
        Ok(self.load()?.biometric_enabled)
    }

    pub fn set_biometric_enabled(&self, enabled: bool) -> Result<(), StorageError> {
        self.update(|state| state.biometric_enabled = enabled)
    }

    pub fn credentials(&self) -> Result<Option<SavedCredentials>, StorageError> {
        Ok(self.load()?.credentials)
    }

    pub fn save_credentials(&self, credentials: SavedCredentials) -> Result<(), StorageError> {
        self.update(|state| state.credentials = Some(credentials))
    }

    pub fn clear_credentials(&self) -> Result<(), StorageError> {
        self.update(|state| state.credentials = None)
    }

    pub fn session(&self) -> Result<Option<Session>, StorageError> {
        Ok(self.load()?.session)
    }

    pub fn set_session(&self, session: Session) -> Result<(), StorageError> {
        self.update(|state| state.session = Some(session))
    }

    /// Forget the signed-in user. The biometric flag and cached credentials
    /// are kept.
    pub fn clear_session(&self) -> Result<(), StorageError> {
        self.update(|state| state.session = None)
    }
}
