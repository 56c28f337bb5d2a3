use std::path::PathBuf;

use crate::{domain::Session, errors::Error, Result};

/// Fixed key the host shell serializes the active session under.
pub const SESSION_KEY: &str = "CANOPY_USER";

/// Source of the logged-in session, injected into the workflow at
/// construction. The workflow never mutates what it is handed.
pub trait SessionProvider: Send + Sync {
    fn session(&self) -> Result<Session>;
}

/// A session value already in hand is its own provider.
impl SessionProvider for Session {
    fn session(&self) -> Result<Session> {
        Ok(self.clone())
    }
}

/// File-backed mirror of the shell's session storage: one JSON object
/// mapping `SESSION_KEY` to the serialized session.
pub struct StoredSession {
    path: PathBuf,
}

impl StoredSession {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl SessionProvider for StoredSession {
    fn session(&self) -> Result<Session> {
        let raw = std::fs::read_to_string(&self.path).map_err(|_| Error::SessionMissing)?;
        let store: serde_json::Map<String, serde_json::Value> =
            serde_json::from_str(&raw).map_err(|_| Error::SessionMissing)?;
        let entry = store.get(SESSION_KEY).ok_or(Error::SessionMissing)?;
        // The shell stores the session as a JSON string inside the map;
        // accept an inline object as well.
        match entry {
            serde_json::Value::String(serialized) => {
                serde_json::from_str(serialized).map_err(|_| Error::SessionMissing)
            }
            other => serde_json::from_value(other.clone()).map_err(|_| Error::SessionMissing),
        }
    }
}
