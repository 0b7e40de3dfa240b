//! Persisted session state.
//!
//! The browser UI kept three scalar keys in local storage - `token`,
//! `username`, `balance` - read at page load and cleared wholesale on
//! logout. Here the same three keys live in a flat JSON file behind the
//! [`SessionStore`] seam, with an in-memory store for tests and embedders
//! that manage persistence themselves.

use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Mutex;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from loading or saving the persisted session.
#[derive(Debug, Error)]
pub enum SessionStoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// An authenticated session.
///
/// Absent session means anonymous browsing: the catalog is visible but the
/// cart is not. Created on successful login, destroyed on logout, otherwise
/// persisted across runs.
#[derive(Clone)]
pub struct Session {
    /// Bearer token for cart calls. Issued by the backend; opaque here.
    pub token: SecretString,
    /// Username the session belongs to.
    pub username: String,
    /// Wallet balance as the backend-issued numeric string.
    pub balance: String,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("token", &"[REDACTED]")
            .field("username", &self.username)
            .field("balance", &self.balance)
            .finish()
    }
}

/// Flat on-disk representation, one field per local-storage key.
#[derive(Debug, Serialize, Deserialize)]
struct StoredSession {
    token: String,
    username: String,
    balance: String,
}

impl From<&Session> for StoredSession {
    fn from(session: &Session) -> Self {
        Self {
            token: session.token.expose_secret().to_string(),
            username: session.username.clone(),
            balance: session.balance.clone(),
        }
    }
}

impl From<StoredSession> for Session {
    fn from(stored: StoredSession) -> Self {
        Self {
            token: SecretString::from(stored.token),
            username: stored.username,
            balance: stored.balance,
        }
    }
}

/// Persistence seam for the session.
pub trait SessionStore: Send + Sync {
    /// Load the persisted session, if any.
    ///
    /// # Errors
    ///
    /// Returns `SessionStoreError` if the backing store exists but cannot
    /// be read or parsed.
    fn load(&self) -> Result<Option<Session>, SessionStoreError>;

    /// Persist the session, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns `SessionStoreError` if the session cannot be written.
    fn save(&self, session: &Session) -> Result<(), SessionStoreError>;

    /// Destroy the persisted session. All keys are removed together.
    ///
    /// # Errors
    ///
    /// Returns `SessionStoreError` if the backing store cannot be cleared.
    fn clear(&self) -> Result<(), SessionStoreError>;
}

impl<T: SessionStore + ?Sized> SessionStore for std::sync::Arc<T> {
    fn load(&self) -> Result<Option<Session>, SessionStoreError> {
        (**self).load()
    }

    fn save(&self, session: &Session) -> Result<(), SessionStoreError> {
        (**self).save(session)
    }

    fn clear(&self) -> Result<(), SessionStoreError> {
        (**self).clear()
    }
}

/// Session store backed by a flat JSON file.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Create a store at the given path. Nothing is touched until the
    /// first load or save.
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<Session>, SessionStoreError> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let stored: StoredSession = serde_json::from_slice(&bytes)?;
        Ok(Some(stored.into()))
    }

    fn save(&self, session: &Session) -> Result<(), SessionStoreError> {
        let stored = StoredSession::from(session);
        let json = serde_json::to_vec_pretty(&stored)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionStoreError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Session store held in memory, never persisted.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    session: Mutex<Option<StoredSession>>,
}

impl MemorySessionStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<Session>, SessionStoreError> {
        let guard = self.session.lock().unwrap_or_else(|p| p.into_inner());
        Ok(guard.as_ref().map(|stored| Session {
            token: SecretString::from(stored.token.clone()),
            username: stored.username.clone(),
            balance: stored.balance.clone(),
        }))
    }

    fn save(&self, session: &Session) -> Result<(), SessionStoreError> {
        let mut guard = self.session.lock().unwrap_or_else(|p| p.into_inner());
        *guard = Some(StoredSession::from(session));
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionStoreError> {
        let mut guard = self.session.lock().unwrap_or_else(|p| p.into_inner());
        *guard = None;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample_session() -> Session {
        Session {
            token: SecretString::from("testtoken".to_string()),
            username: "criodo".to_string(),
            balance: "5000".to_string(),
        }
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("session.json"));

        assert!(store.load().unwrap().is_none());

        store.save(&sample_session()).unwrap();
        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.username, "criodo");
        assert_eq!(loaded.balance, "5000");
        assert_eq!(loaded.token.expose_secret(), "testtoken");

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
        // Clearing an already-empty store is fine
        store.clear().unwrap();
    }

    #[test]
    fn test_file_store_keys_match_local_storage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let store = FileSessionStore::new(path.clone());
        store.save(&sample_session()).unwrap();

        let raw: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(raw["token"], "testtoken");
        assert_eq!(raw["username"], "criodo");
        assert_eq!(raw["balance"], "5000");
    }

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemorySessionStore::new();
        assert!(store.load().unwrap().is_none());
        store.save(&sample_session()).unwrap();
        assert_eq!(store.load().unwrap().unwrap().username, "criodo");
        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_session_debug_redacts_token() {
        let debug = format!("{:?}", sample_session());
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("testtoken"));
    }
}
