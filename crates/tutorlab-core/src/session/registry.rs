//! In-memory session registry.
//!
//! Owns the id-to-session mapping for the process lifetime. Sessions are
//! handed out behind a per-session `Mutex` so operations on one session
//! serialize while operations on different sessions run concurrently. All
//! mutation goes through the `SessionEngine`; nothing else writes
//! transcript entries.

use super::model::Session;
use crate::error::{Result, TutorLabError};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// Shared handle to one session. Hold the lock for the whole turn,
/// including the model call, to keep the transcript interleaving-free.
pub type SessionHandle = Arc<Mutex<Session>>;

/// Registry of all live sessions, keyed by session id.
///
/// There is no explicit delete: sessions live until process teardown,
/// which matches the in-memory, non-durable session model.
#[derive(Default)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<String, SessionHandle>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new session and returns its handle.
    pub async fn insert(&self, session: Session) -> SessionHandle {
        let id = session.id.clone();
        let handle = Arc::new(Mutex::new(session));
        let mut sessions = self.sessions.write().await;
        sessions.insert(id, handle.clone());
        handle
    }

    /// Looks up a session by id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the id is unknown.
    pub async fn get(&self, session_id: &str) -> Result<SessionHandle> {
        let sessions = self.sessions.read().await;
        sessions
            .get(session_id)
            .cloned()
            .ok_or_else(|| TutorLabError::not_found("session", session_id))
    }

    /// Number of registered sessions (active and ended).
    pub async fn count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_and_get() {
        let registry = SessionRegistry::new();
        let session = Session::new("s-1", "Jordan", "Solve 2x+3=7", "anxious_alex");
        registry.insert(session).await;

        let handle = registry.get("s-1").await.unwrap();
        assert_eq!(handle.lock().await.tutor_name, "Jordan");
        assert_eq!(registry.count().await, 1);
    }

    #[tokio::test]
    async fn test_get_unknown_session_is_not_found() {
        let registry = SessionRegistry::new();
        let err = registry.get("missing").await.unwrap_err();
        assert!(err.is_not_found());
    }
}
