use std::time::Duration;

use chrono::{DateTime, Utc};

use super::{SessionId, Transcript};

/// A single page session and the transcript it owns.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: SessionId,
    pub transcript: Transcript,
    pub created_at: DateTime<Utc>,
    pub last_active_at: DateTime<Utc>,
}

impl Session {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: SessionId::new(),
            transcript: Transcript::new(),
            created_at: now,
            last_active_at: now,
        }
    }

    pub fn touch(&mut self) {
        self.last_active_at = Utc::now();
    }

    pub fn is_idle_longer_than(&self, ttl: Duration, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(self.last_active_at)
            .to_std()
            .map(|idle| idle > ttl)
            .unwrap_or(false)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
