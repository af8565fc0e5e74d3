//! Device Session Cache
//!
//! Local `SQLite` key-value storage for the signed-in session. The session
//! is a cache of who is using this device, not a credential: it is written
//! on login/signup, read at startup, and removed on logout. One well-known
//! key holds the serialized record; the last write wins.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::{params, Connection};
use thiserror::Error;
use yc_common::Session;

/// Key under which the serialized session lives.
const SESSION_KEY: &str = "auth_session";

/// Session storage errors.
#[derive(Debug, Error)]
pub enum SessionStoreError {
    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Local key-value store backing the session cache.
pub struct SessionStore {
    conn: Mutex<Connection>,
}

impl SessionStore {
    /// Open (or create) the store at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SessionStoreError> {
        let conn = Connection::open(path)?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
        )?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Read a value by key.
    pub fn get(&self, key: &str) -> Result<Option<String>, SessionStoreError> {
        let conn = self.conn.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        let mut stmt = conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let mut rows = stmt.query(params![key])?;
        match rows.next()? {
            Some(row) => Ok(Some(row.get(0)?)),
            None => Ok(None),
        }
    }

    /// Write a value, replacing any previous one.
    pub fn set(&self, key: &str, value: &str) -> Result<(), SessionStoreError> {
        let conn = self.conn.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT (key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    /// Delete a key; missing keys are not an error.
    pub fn remove(&self, key: &str) -> Result<(), SessionStoreError> {
        let conn = self.conn.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        conn.execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }
}

/// The session cache bound to its well-known key.
pub struct SessionManager {
    store: SessionStore,
}

impl SessionManager {
    /// Open the session cache at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SessionStoreError> {
        Ok(Self {
            store: SessionStore::open(path)?,
        })
    }

    /// Wrap an already-open store.
    #[must_use]
    pub const fn new(store: SessionStore) -> Self {
        Self { store }
    }

    /// Persist the session; any previous session on the device is replaced.
    pub fn save(&self, session: &Session) -> Result<(), SessionStoreError> {
        let json = serde_json::to_string(session)?;
        self.store.set(SESSION_KEY, &json)
    }

    /// The current session, if one is stored and readable.
    ///
    /// Absent or malformed data reads as "no session", never as an error.
    #[must_use]
    pub fn load(&self) -> Option<Session> {
        let raw = match self.store.get(SESSION_KEY) {
            Ok(raw) => raw?,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read session");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(session) => Some(session),
            Err(e) => {
                tracing::warn!(error = %e, "Stored session is malformed; treating as signed out");
                None
            }
        }
    }

    /// Remove the session. Idempotent; storage failures are logged, never
    /// surfaced — logout always succeeds from the caller's point of view.
    pub fn clear(&self) {
        if let Err(e) = self.store.remove(SESSION_KEY) {
            tracing::warn!(error = %e, "Failed to clear session");
        }
    }
}
