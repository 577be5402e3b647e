use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

use crate::models::{SessionState, User};

/// Authoritative in-memory session cell, shared by cloning.
///
/// Every clone reads and writes the same state. Mutations are published to
/// subscribers obtained through [`SessionStore::subscribe`]; nothing is
/// persisted.
#[derive(Clone, Debug)]
pub struct SessionStore {
    inner: Arc<watch::Sender<SessionState>>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    /// A fresh store: not initialized, no user.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(SessionState::default());
        SessionStore {
            inner: Arc::new(tx),
        }
    }

    /// Current snapshot. No side effects.
    pub fn get_state(&self) -> SessionState {
        self.inner.borrow().clone()
    }

    /// Record an established session.
    pub fn set_user(&self, user: User) {
        debug!(
            event_name = "store.user.set",
            event_domain = "store",
            email = user.email.as_str(),
            "session store updated with user"
        );
        self.inner.send_if_modified(|state| {
            let next = SessionState {
                initialized: true,
                user: Some(user),
            };
            if *state == next {
                return false;
            }
            *state = next;
            true
        });
    }

    /// Drop the user. `initialized` is left as it was.
    pub fn logout(&self) {
        debug!(
            event_name = "store.user.cleared",
            event_domain = "store",
            "session store user cleared"
        );
        self.inner.send_if_modified(|state| state.user.take().is_some());
    }

    /// Settle the store as "known to be logged out": `{initialized: true, user: None}`.
    pub fn mark_unauthenticated(&self) {
        debug!(
            event_name = "store.user.unauthenticated",
            event_domain = "store",
            "session store marked unauthenticated"
        );
        self.inner.send_if_modified(|state| {
            let changed = !state.initialized || state.user.is_some();
            state.initialized = true;
            state.user = None;
            changed
        });
    }

    /// Receive every subsequent change to the state.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.inner.subscribe()
    }
}
