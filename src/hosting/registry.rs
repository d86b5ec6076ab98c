use crate::ID;
use crate::gameroom::*;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Directory of live sessions by id.
///
/// Entries are never removed: an ended session stays reachable so late
/// requests get a clear answer instead of a missing one.
pub struct Registry {
    sessions: RwLock<HashMap<ID<Session>, Session>>,
    capacity: usize,
}

impl Registry {
    /// `capacity` bounds each session's inbound queue.
    pub fn new(capacity: usize) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            capacity,
        }
    }

    /// Opens a session with its creator in slot 0.
    pub async fn create(&self, nickname: Option<&str>) -> (Session, Credentials) {
        let (session, credentials) = Session::new(self.capacity, nickname);
        self.sessions
            .write()
            .await
            .insert(session.id(), session.clone());
        log::info!("[registry] created session {}", session.id());
        (session, credentials)
    }

    pub async fn get(&self, id: ID<Session>) -> Result<Session, SessionError> {
        self.sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(SessionError::NotFound)
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new(32)
    }
}
