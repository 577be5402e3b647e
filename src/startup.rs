//! Application startup.
//!
//! Builds the [`AppState`] from configuration: a single transport (and with
//! it a single cookie jar) and a single session store shared by the
//! coordinator, the guards and the protected client.

use std::sync::Arc;
use tracing::info;

use crate::config::ConfigV1;
use crate::intercept::ProtectedClient;
use crate::navigation::{Navigator, Notifier};
use crate::routes::RouteGuard;
use crate::session::SessionCoordinator;
use crate::state::AppState;
use crate::store::SessionStore;
use crate::transport::{HttpTransport, Transport, TransportError};

/// Build the state over an HTTP transport for `config.api`.
///
/// # Errors
///
/// Returns an error if the base URL is invalid or the HTTP client cannot
/// be constructed.
pub fn build(
    config: ConfigV1,
    navigator: Arc<dyn Navigator>,
    notifier: Arc<dyn Notifier>,
) -> Result<AppState, TransportError> {
    let transport = Arc::new(HttpTransport::new(&config.api)?);
    Ok(build_with_transport(config, transport, navigator, notifier))
}

/// Build the state over any transport.
pub fn build_with_transport(
    config: ConfigV1,
    transport: Arc<dyn Transport>,
    navigator: Arc<dyn Navigator>,
    notifier: Arc<dyn Notifier>,
) -> AppState {
    let config = Arc::new(config);
    let store = SessionStore::new();

    let coordinator = Arc::new(SessionCoordinator::new(
        transport.clone(),
        store.clone(),
        config.api.clone(),
    ));
    let guard = RouteGuard::new(coordinator.clone(), config.routes.clone());
    let client = Arc::new(ProtectedClient::new(
        transport,
        store.clone(),
        config.routes.clone(),
        navigator,
        notifier,
    ));

    info!(
        "Session state ready for {} (login view '{}', landing view '{}')",
        config.api.base_url, config.routes.login_view, config.routes.landing_view
    );

    AppState {
        config,
        store,
        coordinator,
        guard,
        client,
    }
}
