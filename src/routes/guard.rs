use std::sync::Arc;

use tracing::debug;

use super::redirect::{path_of, return_to_of, RedirectTarget};
use crate::config::RoutesConfig;
use crate::session::SessionCoordinator;

/// What a route's entry guard decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    Proceed,
    Redirect(RedirectTarget),
}

/// Entry guards for protected views and for authentication views.
///
/// Callers should await one guard before the next navigation fires another.
#[derive(Clone)]
pub struct RouteGuard {
    coordinator: Arc<SessionCoordinator>,
    routes: RoutesConfig,
}

impl RouteGuard {
    pub fn new(coordinator: Arc<SessionCoordinator>, routes: RoutesConfig) -> Self {
        RouteGuard {
            coordinator,
            routes,
        }
    }

    pub fn routes(&self) -> &RoutesConfig {
        &self.routes
    }

    /// Guard for a protected view. `location` is the requested URL (path
    /// plus query); an unauthenticated user is sent to the login view with it
    /// attached as the return-to value.
    pub async fn require_authenticated(&self, location: &str) -> GuardOutcome {
        if self.coordinator.is_authenticated().await {
            return GuardOutcome::Proceed;
        }
        let target = self.routes.login_redirect(location);
        debug!(
            event_name = "guard.protected.redirect",
            event_domain = "routes",
            from = path_of(location),
            to = target.to.as_str(),
            "unauthenticated access redirected to login"
        );
        GuardOutcome::Redirect(target)
    }

    /// Guard for an authentication view. An already-authenticated user is
    /// moved on: to the return-to value carried by `location` when it is safe
    /// to follow, else to the landing view.
    pub async fn redirect_if_authenticated(&self, location: &str) -> GuardOutcome {
        if !self.coordinator.is_authenticated().await {
            return GuardOutcome::Proceed;
        }
        let return_to = return_to_of(location, &self.routes.return_to_param);
        let destination = self.routes.post_login_destination(return_to.as_deref());
        debug!(
            event_name = "guard.auth_view.redirect",
            event_domain = "routes",
            from = path_of(location),
            to = destination.as_str(),
            "authenticated user moved off authentication view"
        );
        GuardOutcome::Redirect(RedirectTarget::to(destination))
    }

    /// Pick the guard by view: authentication views get the inverse check,
    /// everything else is protected.
    pub async fn guard(&self, location: &str) -> GuardOutcome {
        if self.routes.is_auth_view(location) {
            self.redirect_if_authenticated(location).await
        } else {
            self.require_authenticated(location).await
        }
    }
}
