//! Session-scoped selection state.
//!
//! Each session owns exactly one [`Selection`]. The registry applies reducer
//! events to that selection sequentially (under a write lock) and never shares
//! state between sessions.

use std::collections::HashMap;
use std::fmt;
use std::sync::RwLock;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{ExecutionError, HeroError, HeroResult};
use crate::selection::{Selection, SelectionEvent};

/// Default cap on concurrently open sessions.
pub const DEFAULT_MAX_SESSIONS: usize = 4096;

/// Opaque session identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Creates a new random session ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// The underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for SessionId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl std::str::FromStr for SessionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// A point-in-time copy of one session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    /// The session this copy was taken from.
    pub session_id: SessionId,
    /// The session's selection at the time of the copy.
    pub selection: Selection,
    /// When the session was opened.
    pub created_at: DateTime<Utc>,
    /// Last time the session was read or updated.
    pub last_seen: DateTime<Utc>,
}

#[derive(Debug, Clone)]
struct SessionEntry {
    selection: Selection,
    created_at: DateTime<Utc>,
    last_seen: DateTime<Utc>,
}

impl SessionEntry {
    fn snapshot(&self, session_id: SessionId) -> SessionSnapshot {
        SessionSnapshot {
            session_id,
            selection: self.selection.clone(),
            created_at: self.created_at,
            last_seen: self.last_seen,
        }
    }
}

/// Thread-safe registry of per-session selections.
#[derive(Debug)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<SessionId, SessionEntry>>,
    max_sessions: usize,
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SESSIONS)
    }
}

fn lock_err(context: &'static str) -> HeroError {
    HeroError::internal(format!("poisoned lock: {context}"))
}

fn not_found(id: SessionId) -> HeroError {
    ExecutionError::SessionNotFound { id }.into()
}

impl SessionRegistry {
    /// Creates a registry holding at most `max_sessions` open sessions.
    #[must_use]
    pub fn new(max_sessions: usize) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            max_sessions,
        }
    }

    /// Opens a session with an empty selection.
    pub fn open(&self) -> HeroResult<SessionSnapshot> {
        self.open_at(Utc::now())
    }

    /// Opens a session, stamping it with `now`.
    pub fn open_at(&self, now: DateTime<Utc>) -> HeroResult<SessionSnapshot> {
        let mut sessions = self.sessions.write().map_err(|_| lock_err("session.open"))?;
        if sessions.len() >= self.max_sessions {
            return Err(ExecutionError::SessionLimitExceeded {
                max: self.max_sessions,
            }
            .into());
        }

        let id = SessionId::new();
        let entry = SessionEntry {
            selection: Selection::new(),
            created_at: now,
            last_seen: now,
        };
        let snapshot = entry.snapshot(id);
        sessions.insert(id, entry);
        debug!(session = %id, open = sessions.len(), "session opened");
        Ok(snapshot)
    }

    /// Returns the session's current state and marks it as seen.
    pub fn get(&self, id: SessionId) -> HeroResult<SessionSnapshot> {
        let mut sessions = self.sessions.write().map_err(|_| lock_err("session.get"))?;
        let entry = sessions.get_mut(&id).ok_or_else(|| not_found(id))?;
        entry.last_seen = Utc::now();
        Ok(entry.snapshot(id))
    }

    /// Applies a reducer event to the session's selection.
    pub fn apply(&self, id: SessionId, event: SelectionEvent) -> HeroResult<SessionSnapshot> {
        self.apply_at(id, event, Utc::now())
    }

    /// Applies a reducer event, stamping the session with `now`.
    pub fn apply_at(
        &self,
        id: SessionId,
        event: SelectionEvent,
        now: DateTime<Utc>,
    ) -> HeroResult<SessionSnapshot> {
        let mut sessions = self.sessions.write().map_err(|_| lock_err("session.apply"))?;
        let entry = sessions.get_mut(&id).ok_or_else(|| not_found(id))?;
        entry.selection = entry.selection.apply(event);
        entry.last_seen = now;
        debug!(session = %id, ?event, selected = entry.selection.len(), "selection updated");
        Ok(entry.snapshot(id))
    }

    /// Closes a session.
    pub fn close(&self, id: SessionId) -> HeroResult<()> {
        let mut sessions = self.sessions.write().map_err(|_| lock_err("session.close"))?;
        sessions.remove(&id).ok_or_else(|| not_found(id))?;
        debug!(session = %id, "session closed");
        Ok(())
    }

    /// Drops sessions not seen within `ttl` of `now`. Returns how many were dropped.
    pub fn evict_idle(&self, now: DateTime<Utc>, ttl: Duration) -> HeroResult<usize> {
        let mut sessions = self.sessions.write().map_err(|_| lock_err("session.evict"))?;
        let before = sessions.len();
        sessions.retain(|_, entry| now - entry.last_seen <= ttl);
        let evicted = before - sessions.len();
        if evicted > 0 {
            info!(evicted, remaining = sessions.len(), "evicted idle sessions");
        }
        Ok(evicted)
    }

    /// Number of open sessions.
    pub fn len(&self) -> HeroResult<usize> {
        let sessions = self.sessions.read().map_err(|_| lock_err("session.len"))?;
        Ok(sessions.len())
    }

    /// True when no sessions are open.
    pub fn is_empty(&self) -> HeroResult<bool> {
        self.len().map(|n| n == 0)
    }

    /// Cap on concurrently open sessions.
    #[must_use]
    pub const fn max_sessions(&self) -> usize {
        self.max_sessions
    }
}
