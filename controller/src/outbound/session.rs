//! In-memory session store adapter.
//!
//! Mirrors the two-key layout of the production store: a boolean
//! authenticated flag and a JSON-encoded identity record. The two values
//! live and die together; any malformed or inconsistent content clears
//! both and reads as "not authenticated".

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::domain::ports::{SessionStore, SessionStoreError};
use crate::domain::session::SessionIdentity;

pub(crate) const AUTH_FLAG_KEY: &str = "isAuthenticated";
pub(crate) const IDENTITY_KEY: &str = "currentUser";

/// Process-local session store.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    entries: Mutex<HashMap<&'static str, String>>,
}

impl InMemorySessionStore {
    /// Build an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<&'static str, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Write a raw value, for tests exercising malformed content.
    #[cfg(any(test, feature = "test-support"))]
    pub fn insert_raw(&self, key: &'static str, value: impl Into<String>) {
        self.entries().insert(key, value.into());
    }
}

impl SessionStore for InMemorySessionStore {
    fn persist(&self, identity: &SessionIdentity) -> Result<(), SessionStoreError> {
        let encoded = serde_json::to_string(identity)
            .map_err(|error| SessionStoreError::storage(error.to_string()))?;
        let mut entries = self.entries();
        entries.insert(AUTH_FLAG_KEY, "true".to_owned());
        entries.insert(IDENTITY_KEY, encoded);
        Ok(())
    }

    fn load(&self) -> Result<Option<SessionIdentity>, SessionStoreError> {
        let mut entries = self.entries();
        let flagged = entries
            .get(AUTH_FLAG_KEY)
            .is_some_and(|value| value == "true");
        let raw = entries.get(IDENTITY_KEY).cloned();
        match (flagged, raw) {
            (true, Some(raw)) => match serde_json::from_str(&raw) {
                Ok(identity) => Ok(Some(identity)),
                Err(error) => {
                    tracing::warn!(error = %error, "malformed session identity; clearing session");
                    entries.remove(AUTH_FLAG_KEY);
                    entries.remove(IDENTITY_KEY);
                    Ok(None)
                }
            },
            (false, None) => Ok(None),
            // Half a session is no session.
            _ => {
                entries.remove(AUTH_FLAG_KEY);
                entries.remove(IDENTITY_KEY);
                Ok(None)
            }
        }
    }

    fn clear(&self) -> Result<(), SessionStoreError> {
        let mut entries = self.entries();
        entries.remove(AUTH_FLAG_KEY);
        entries.remove(IDENTITY_KEY);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use uuid::Uuid;

    #[test]
    fn round_trips_an_identity() {
        let store = InMemorySessionStore::new();
        let identity = SessionIdentity::ceo(Uuid::new_v4());
        store.persist(&identity).expect("persist succeeds");

        let loaded = store.load().expect("load succeeds");
        assert_eq!(loaded, Some(identity));
    }

    #[test]
    fn malformed_identity_clears_both_values() {
        let store = InMemorySessionStore::new();
        store.insert_raw(AUTH_FLAG_KEY, "true");
        store.insert_raw(IDENTITY_KEY, "{not json");

        assert_eq!(store.load().expect("load succeeds"), None);
        assert!(store.entries().get(AUTH_FLAG_KEY).is_none());
        assert!(store.entries().get(IDENTITY_KEY).is_none());
    }

    #[test]
    fn identity_without_the_flag_reads_as_unauthenticated() {
        let store = InMemorySessionStore::new();
        let identity = SessionIdentity::ceo(Uuid::new_v4());
        store.insert_raw(
            IDENTITY_KEY,
            serde_json::to_string(&identity).expect("serializes"),
        );

        assert_eq!(store.load().expect("load succeeds"), None);
        assert!(store.entries().get(IDENTITY_KEY).is_none(), "cleared");
    }

    #[test]
    fn clear_drops_both_values() {
        let store = InMemorySessionStore::new();
        store
            .persist(&SessionIdentity::ceo(Uuid::new_v4()))
            .expect("persist succeeds");
        store.clear().expect("clear succeeds");
        assert_eq!(store.load().expect("load succeeds"), None);
    }
}
