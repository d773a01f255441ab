//! Stored session record
//!
//! The signed-in user is written as JSON under [`SESSION_KEY`] in the data
//! directory. `Session::restore` reads it on startup and `Session::logout`
//! removes it. There is no expiry.

use super::User;
use crate::config::SaccoConfig;
use crate::error::SessionError;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const SESSION_KEY: &str = "sacco_user";

/// Where the session record lives. `path: None` keeps it in memory only.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    path: Option<PathBuf>,
}

impl SessionStore {
    pub fn at(dir: impl AsRef<Path>) -> Self {
        Self {
            path: Some(dir.as_ref().join(format!("{SESSION_KEY}.json"))),
        }
    }

    pub fn default_location() -> Self {
        match SaccoConfig::data_dir() {
            Some(dir) => Self::at(dir),
            None => Self::ephemeral(),
        }
    }

    pub fn ephemeral() -> Self {
        Self { path: None }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn load(&self) -> Result<Option<User>, SessionError> {
        let Some(path) = &self.path else {
            return Ok(None);
        };
        match fs::read_to_string(path) {
            Ok(content) => Ok(Some(serde_json::from_str(&content)?)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    pub fn save(&self, user: &User) -> Result<(), SessionError> {
        if let Some(path) = &self.path {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, serde_json::to_string_pretty(user)?)?;
        }
        Ok(())
    }

    pub fn clear(&self) -> Result<(), SessionError> {
        if let Some(path) = &self.path {
            match fs::remove_file(path) {
                Err(err) if err.kind() != ErrorKind::NotFound => return Err(err.into()),
                _ => {}
            }
        }
        Ok(())
    }
}

/// The process-wide session, handed to the app at startup
#[derive(Debug, Default)]
pub struct Session {
    store: SessionStore,
    current: Option<User>,
}

impl Session {
    /// Read the stored record. An unreadable record starts the app signed out.
    pub fn restore(store: SessionStore) -> Self {
        let current = match store.load() {
            Ok(user) => user,
            Err(err) => {
                tracing::warn!("Ignoring unreadable session record: {err}");
                None
            }
        };
        if let Some(user) = &current {
            tracing::info!("Restored session for {} ({})", user.email, user.role.label());
        }
        Self { store, current }
    }

    /// Sign in `user`. The user stays signed in for this run even if the
    /// record cannot be written.
    pub fn begin(&mut self, user: User) -> Result<(), SessionError> {
        tracing::info!("Signed in {} as {}", user.email, user.role.label());
        let saved = self.store.save(&user);
        self.current = Some(user);
        saved
    }

    pub fn logout(&mut self) -> Result<(), SessionError> {
        if let Some(user) = self.current.take() {
            tracing::info!("Signed out {}", user.email);
        }
        self.store.clear()
    }

    pub fn current(&self) -> Option<&User> {
        self.current.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.current.is_some()
    }
}
