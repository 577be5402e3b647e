//! Shared application state.
//!
//! One `AppState` is built per process (one per browser tab, in the web
//! host) and handed to every guard and call site that needs the session.
//! There is no module-level singleton.

use crate::config::ConfigV1;
use crate::intercept::ProtectedClient;
use crate::routes::RouteGuard;
use crate::session::SessionCoordinator;
use crate::store::SessionStore;
use std::sync::Arc;

/// Everything that participates in session handling, wired to one store
/// and one transport.
#[derive(Clone)]
pub struct AppState {
    /// Configuration loaded at startup.
    pub config: Arc<ConfigV1>,
    /// The authoritative session cell.
    pub store: SessionStore,
    /// Session probe, login and logout.
    pub coordinator: Arc<SessionCoordinator>,
    /// Entry guards for protected and authentication views.
    pub guard: RouteGuard,
    /// Client for protected API calls, enforcing the 401 policy.
    pub client: Arc<ProtectedClient>,
}
