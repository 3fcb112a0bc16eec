use crate::session::Session;
use chrono::{Duration, Utc};
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::debug;

/// Fields that `update` may merge into a live session.
#[derive(Debug, Clone, Default)]
pub struct SessionUpdate {
    pub text: Option<String>,
    pub source_name: Option<String>,
}

/// Shared in-memory session map with fixed-window TTL expiry.
///
/// One coarse mutex guards every operation; nothing suspends while it
/// is held, every critical section is pure map work. Expired entries
/// are removed lazily on access, or in bulk by [`sweep`].
///
/// [`sweep`]: SessionStore::sweep
pub struct SessionStore {
    sessions: Mutex<HashMap<String, Session>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl_minutes: i64) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            ttl: Duration::minutes(ttl_minutes),
        }
    }

    /// Store extracted text under a fresh handle. Always succeeds.
    pub fn create(&self, text: impl Into<String>, source_name: impl Into<String>) -> String {
        let session = Session::new(text, source_name);
        let id = session.id.clone();
        self.sessions.lock().unwrap().insert(id.clone(), session);
        debug!(id = %id, "session created");
        id
    }

    /// Look up a session. Expired entries are removed and reported as
    /// absent; live entries get `last_accessed` refreshed and are
    /// returned by value so callers cannot reach store internals.
    pub fn get(&self, id: &str) -> Option<Session> {
        let mut sessions = self.sessions.lock().unwrap();
        let session = sessions.get_mut(id)?;
        if Utc::now() - session.created_at > self.ttl {
            sessions.remove(id);
            debug!(id = %id, "session expired on access");
            return None;
        }
        session.last_accessed = Utc::now();
        Some(session.clone())
    }

    /// Merge fields into a live session, refreshing `last_accessed`.
    /// Returns false for absent or expired sessions (expired ones are
    /// removed, same as `get`).
    pub fn update(&self, id: &str, update: SessionUpdate) -> bool {
        let mut sessions = self.sessions.lock().unwrap();
        let Some(session) = sessions.get_mut(id) else {
            return false;
        };
        if Utc::now() - session.created_at > self.ttl {
            sessions.remove(id);
            return false;
        }
        if let Some(text) = update.text {
            session.text = text;
        }
        if let Some(source_name) = update.source_name {
            session.source_name = source_name;
        }
        session.last_accessed = Utc::now();
        true
    }

    /// Remove a session. True if an entry existed.
    pub fn delete(&self, id: &str) -> bool {
        let removed = self.sessions.lock().unwrap().remove(id).is_some();
        if removed {
            debug!(id = %id, "session deleted");
        }
        removed
    }

    /// Remove every entry older than the TTL and return how many went.
    /// Never scheduled by the store itself; see [`crate::spawn_sweeper`]
    /// for the opt-in periodic task.
    pub fn sweep(&self) -> usize {
        let now = Utc::now();
        let mut sessions = self.sessions.lock().unwrap();
        let before = sessions.len();
        sessions.retain(|_, session| now - session.created_at <= self.ttl);
        let removed = before - sessions.len();
        if removed > 0 {
            debug!(removed, "swept expired sessions");
        }
        removed
    }

    /// Current entry count, including expired entries nobody has
    /// touched or swept yet.
    pub fn count(&self) -> usize {
        self.sessions.lock().unwrap().len()
    }

    /// Shift a session's creation time into the past.
    #[cfg(test)]
    pub(crate) fn backdate(&self, id: &str, by: Duration) {
        let mut sessions = self.sessions.lock().unwrap();
        if let Some(session) = sessions.get_mut(id) {
            session.created_at -= by;
        }
    }

    /// Snapshot a session without touching `last_accessed`.
    #[cfg(test)]
    pub(crate) fn peek(&self, id: &str) -> Option<Session> {
        self.sessions.lock().unwrap().get(id).cloned()
    }
}
