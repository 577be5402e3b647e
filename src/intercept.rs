//! Wrapper for every authenticated API call.
//!
//! A 401 on any protected request resets the session store to
//! `{initialized: true, user: None}`, tells the user they were logged out and
//! sends them to the login view with the current URL as the return-to value.
//! Call sites only see [`SessionError::Expired`].

use std::sync::Arc;

use http::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::RoutesConfig;
use crate::navigation::{Navigator, Notice, Notifier};
use crate::session::SessionError;
use crate::store::SessionStore;
use crate::transport::{ApiRequest, ApiResponse, Transport};

pub struct ProtectedClient {
    transport: Arc<dyn Transport>,
    store: SessionStore,
    routes: RoutesConfig,
    navigator: Arc<dyn Navigator>,
    notifier: Arc<dyn Notifier>,
}

impl ProtectedClient {
    pub fn new(
        transport: Arc<dyn Transport>,
        store: SessionStore,
        routes: RoutesConfig,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        ProtectedClient {
            transport,
            store,
            routes,
            navigator,
            notifier,
        }
    }

    /// Send a protected request. Any status other than 401 is handed back
    /// untouched for the caller to interpret.
    pub async fn send(&self, request: ApiRequest) -> Result<ApiResponse, SessionError> {
        let path = request.path.clone();
        let response = self.transport.send(request).await?;
        if response.status == StatusCode::UNAUTHORIZED {
            return Err(self.handle_unauthorized(&path, &response));
        }
        Ok(response)
    }

    /// GET `path` and decode a success body.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, SessionError> {
        let response = self.send(ApiRequest::get(path)).await?;
        decode(path, &response)
    }

    /// POST `body` as JSON to `path` and decode a success body.
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, SessionError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_value(body)
            .map_err(|e| SessionError::Decode(format!("request body for {}: {}", path, e)))?;
        let response = self.send(ApiRequest::post(path).json(body)).await?;
        decode(path, &response)
    }

    fn handle_unauthorized(&self, path: &str, response: &ApiResponse) -> SessionError {
        let detail = SessionError::rejected(response).detail();
        let was_authenticated = self.store.get_state().is_authenticated();
        self.store.mark_unauthenticated();

        let location = self.navigator.current_location();
        let target = self.routes.login_redirect(&location);
        warn!(
            event_name = "session.intercept.unauthorized",
            event_domain = "session",
            path,
            was_authenticated,
            redirect = self.routes.href(&target).as_str(),
            "protected call unauthorized; session reset"
        );

        self.notifier.notify(Notice::LoggedOut {
            detail: detail.clone(),
        });
        self.navigator.navigate(target);
        SessionError::Expired { detail }
    }
}

fn decode<T: DeserializeOwned>(path: &str, response: &ApiResponse) -> Result<T, SessionError> {
    if !response.is_success() {
        return Err(SessionError::rejected(response));
    }
    debug!("Decoding {} response from {}", response.status, path);
    response
        .json::<T>()
        .map_err(|e| SessionError::Decode(format!("{}: {}", path, e)))
}
