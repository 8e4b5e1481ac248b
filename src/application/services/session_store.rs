use std::collections::HashMap;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::{Session, SessionId};

/// In-memory sessions keyed by id. Nothing survives a restart.
pub struct SessionStore {
    sessions: RwLock<HashMap<SessionId, Session>>,
    idle_ttl: Duration,
}

impl SessionStore {
    pub fn new(idle_ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            idle_ttl,
        }
    }

    /// Opens a new empty session, dropping any that have gone idle.
    pub async fn create(&self) -> SessionId {
        let session = Session::new();
        let id = session.id;

        let mut sessions = self.sessions.write().await;
        let evicted = Self::evict_idle_locked(&mut sessions, self.idle_ttl);
        if evicted > 0 {
            tracing::debug!(evicted, "Evicted idle sessions");
        }
        sessions.insert(id, session);

        id
    }

    pub async fn read<R>(&self, id: SessionId, f: impl FnOnce(&Session) -> R) -> Option<R> {
        let sessions = self.sessions.read().await;
        sessions.get(&id).map(f)
    }

    /// Applies `f` to the session and marks it active.
    pub async fn update<R>(&self, id: SessionId, f: impl FnOnce(&mut Session) -> R) -> Option<R> {
        let mut sessions = self.sessions.write().await;
        sessions.get_mut(&id).map(|session| {
            session.touch();
            f(session)
        })
    }

    pub async fn evict_idle(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        Self::evict_idle_locked(&mut sessions, self.idle_ttl)
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    fn evict_idle_locked(sessions: &mut HashMap<SessionId, Session>, ttl: Duration) -> usize {
        let now = Utc::now();
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_idle_longer_than(ttl, now));
        before - sessions.len()
    }
}
