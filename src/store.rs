//! Per-session navigation histories held by the daemon
//!
//! Each session gets its own `NavigationHistory`, created on first use and
//! dropped when the session ends. All access goes through one lock so every
//! command runs as a single transition.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::history::NavigationHistory;
use crate::types::SessionId;

#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: Mutex<HashMap<SessionId, NavigationHistory>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` against the session's history while holding the lock,
    /// starting a fresh history if the session is unknown.
    pub fn with_session<F, R>(&self, session_id: &str, f: F) -> R
    where
        F: FnOnce(&mut NavigationHistory) -> R,
    {
        let mut sessions = self.lock();
        if !sessions.contains_key(session_id) {
            log::info!("Starting session {}", session_id);
        }
        let history = sessions.entry(session_id.to_string()).or_default();
        f(history)
    }

    /// Discard a session's history. Returns false if it did not exist.
    pub fn end(&self, session_id: &str) -> bool {
        let ended = self.lock().remove(session_id).is_some();
        if ended {
            log::info!("Ended session {}", session_id);
        }
        ended
    }

    pub fn contains(&self, session_id: &str) -> bool {
        self.lock().contains_key(session_id)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // Histories are always left in a valid state, so a poisoned lock is safe to reuse
    fn lock(&self) -> MutexGuard<'_, HashMap<SessionId, NavigationHistory>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// =============================================================================
// Tests
// =============================================================================
