use std::sync::Arc;

use http::StatusCode;
use tracing::{debug, info, warn};

use super::error::SessionError;
use crate::config::ApiConfig;
use crate::models::{LoginRequest, LoginResponse, SessionPayload, User};
use crate::store::SessionStore;
use crate::transport::{ApiRequest, Transport};

/// Resolves "is this user logged in" against the remote session authority
/// and keeps the [`SessionStore`] in step with the answer.
///
/// The store is only written after a response has been fully received and
/// decoded, so readers never see state tied to an in-flight request.
pub struct SessionCoordinator {
    transport: Arc<dyn Transport>,
    store: SessionStore,
    api: ApiConfig,
}

impl SessionCoordinator {
    pub fn new(transport: Arc<dyn Transport>, store: SessionStore, api: ApiConfig) -> Self {
        info!(
            "Creating session coordinator (transport='{}', session='{}', login='{}')",
            transport.get_name(),
            api.session_path,
            api.login_path
        );
        SessionCoordinator {
            transport,
            store,
            api,
        }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Probe the session endpoint.
    ///
    /// A success records the user. Any non-success status settles the store
    /// as logged out, which is how a stale session clears local state. A
    /// transport failure or an undecodable success body leaves the store as
    /// it was.
    pub async fn check_session(&self) -> Result<User, SessionError> {
        let response = match self
            .transport
            .send(ApiRequest::get(&self.api.session_path))
            .await
        {
            Ok(r) => r,
            Err(e) => {
                warn!(
                    event_name = "session.probe.transport_error",
                    event_domain = "session",
                    error = e.0.as_str(),
                    "session probe got no response"
                );
                return Err(e.into());
            }
        };

        if response.is_success() {
            let user = response
                .json::<SessionPayload>()
                .map_err(|e| SessionError::Decode(format!("session payload: {}", e)))?
                .into_user();
            debug!(
                event_name = "session.probe.succeeded",
                event_domain = "session",
                email = user.email.as_str(),
                "session probe returned a user"
            );
            self.store.set_user(user.clone());
            Ok(user)
        } else {
            let err = SessionError::rejected(&response);
            self.store.mark_unauthenticated();
            info!(
                event_name = "session.probe.rejected",
                event_domain = "session",
                status = response.status.as_u16(),
                detail = err.detail().as_str(),
                "session probe rejected; store cleared"
            );
            Err(err)
        }
    }

    /// Cached authorization check.
    ///
    /// Once the store is initialized this answers from memory with no network
    /// call. Otherwise it probes once and answers with the probe's outcome.
    pub async fn is_authenticated(&self) -> bool {
        let state = self.store.get_state();
        if state.initialized {
            return state.user.is_some();
        }
        self.check_session().await.is_ok()
    }

    /// Submit credentials without asking for a long-lived session.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, SessionError> {
        self.login_with(LoginRequest::new(email, password)).await
    }

    /// Submit credentials. A single request/response exchange, never retried.
    ///
    /// A rejected login does not touch the store: an unrelated session that
    /// already exists stays in place.
    pub async fn login_with(&self, request: LoginRequest) -> Result<LoginResponse, SessionError> {
        debug!(
            event_name = "session.login.attempt",
            event_domain = "session",
            email = request.email.as_str(),
            remember_me = request.remember_me,
            "submitting credentials"
        );
        let body = serde_json::to_value(&request)
            .map_err(|e| SessionError::Decode(format!("login body: {}", e)))?;
        let response = self
            .transport
            .send(ApiRequest::post(&self.api.login_path).json(body))
            .await?;

        if !response.is_success() {
            let err = SessionError::rejected(&response);
            info!(
                event_name = "session.login.rejected",
                event_domain = "session",
                status = response.status.as_u16(),
                detail = err.detail().as_str(),
                "login rejected"
            );
            return Err(err);
        }

        let login = response
            .json::<LoginResponse>()
            .map_err(|e| SessionError::Decode(format!("login payload: {}", e)))?;
        info!(
            event_name = "session.login.succeeded",
            event_domain = "session",
            expiry = %login.expiry,
            "login succeeded"
        );
        self.store.set_user(login.user());
        Ok(login)
    }

    /// End the session remotely, optionally every session of this user.
    ///
    /// Local state is settled as logged out whatever the server says; the
    /// remote outcome is still reported. A 401 means the server had already
    /// forgotten the session and counts as success.
    pub async fn logout(&self, all: bool) -> Result<(), SessionError> {
        let mut request = ApiRequest::post(&self.api.logout_path);
        if all {
            request = request.query("all", "true");
        }
        let result = self.transport.send(request).await;
        self.store.mark_unauthenticated();

        let response = result?;
        if response.is_success() || response.status == StatusCode::UNAUTHORIZED {
            info!(
                event_name = "session.logout.succeeded",
                event_domain = "session",
                all,
                "logged out"
            );
            Ok(())
        } else {
            let err = SessionError::rejected(&response);
            warn!(
                event_name = "session.logout.failed",
                event_domain = "session",
                status = response.status.as_u16(),
                detail = err.detail().as_str(),
                "remote logout failed; local session cleared anyway"
            );
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::HttpTransport;
    use mockito::{Matcher, Server, ServerGuard};

    fn coordinator_for(server: &ServerGuard) -> SessionCoordinator {
        let api = ApiConfig::new(server.url());
        let transport = HttpTransport::new(&api).expect("transport should build");
        SessionCoordinator::new(Arc::new(transport), SessionStore::new(), api)
    }

    #[tokio::test]
    async fn test_check_session_success_sets_user() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("GET", "/api/session")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"user": {"email": "a@b.com"}}"#)
            .create_async()
            .await;

        let coordinator = coordinator_for(&server);
        let user = coordinator.check_session().await.expect("probe should succeed");
        m.assert_async().await;
        assert_eq!(user.email, "a@b.com");
        let state = coordinator.store().get_state();
        assert!(state.initialized);
        assert_eq!(state.user, Some(user));
    }

    #[tokio::test]
    async fn test_check_session_401_clears_previous_user() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/api/session")
            .with_status(401)
            .with_body(r#"{"detail": "Unauthorized"}"#)
            .create_async()
            .await;

        let coordinator = coordinator_for(&server);
        coordinator.store().set_user(User::new("a@b.com"));
        let err = coordinator.check_session().await.unwrap_err();
        assert_eq!(err.detail(), "Unauthorized");
        let state = coordinator.store().get_state();
        assert!(state.initialized);
        assert!(state.user.is_none());
    }

    #[tokio::test]
    async fn test_check_session_401_initializes_fresh_store() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/api/session")
            .with_status(401)
            .with_body(r#"{"detail": "Unauthorized"}"#)
            .create_async()
            .await;

        let coordinator = coordinator_for(&server);
        assert!(coordinator.check_session().await.is_err());
        assert!(coordinator.store().get_state().initialized);
    }

    #[tokio::test]
    async fn test_check_session_bad_payload_leaves_store() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/api/session")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let coordinator = coordinator_for(&server);
        let err = coordinator.check_session().await.unwrap_err();
        assert!(matches!(err, SessionError::Decode(_)));
        assert!(!coordinator.store().get_state().initialized);
    }

    #[tokio::test]
    async fn test_is_authenticated_memoizes() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("GET", "/api/session")
            .with_status(200)
            .with_body(r#"{"user": {"email": "a@b.com"}}"#)
            .expect(1)
            .create_async()
            .await;

        let coordinator = coordinator_for(&server);
        for _ in 0..5 {
            assert!(coordinator.is_authenticated().await);
        }
        m.assert_async().await;
    }

    #[tokio::test]
    async fn test_is_authenticated_memoizes_negative_answer() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("GET", "/api/session")
            .with_status(401)
            .with_body(r#"{"detail": "Unauthorized"}"#)
            .expect(1)
            .create_async()
            .await;

        let coordinator = coordinator_for(&server);
        for _ in 0..3 {
            assert!(!coordinator.is_authenticated().await);
        }
        m.assert_async().await;
    }

    #[tokio::test]
    async fn test_login_success_sets_user() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("POST", "/api/login")
            .match_header("content-type", "application/json")
            .match_body(Matcher::PartialJson(
                serde_json::json!({"email": "a@b.com", "password": "good"}),
            ))
            .with_status(200)
            .with_body(r#"{"email": "a@b.com", "expiry": "2030-01-01T00:00:00Z"}"#)
            .create_async()
            .await;

        let coordinator = coordinator_for(&server);
        let login = coordinator.login("a@b.com", "good").await.expect("login should succeed");
        m.assert_async().await;
        assert_eq!(login.email, "a@b.com");
        let state = coordinator.store().get_state();
        assert!(state.initialized);
        assert_eq!(state.user.unwrap().email, "a@b.com");
    }

    #[tokio::test]
    async fn test_login_remember_me_is_sent() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("POST", "/api/login")
            .match_body(Matcher::PartialJson(serde_json::json!({"remember_me": true})))
            .with_status(200)
            .with_body(r#"{"email": "a@b.com", "expiry": "2030-01-01T00:00:00Z"}"#)
            .create_async()
            .await;

        let coordinator = coordinator_for(&server);
        let request = LoginRequest::new("a@b.com", "good").remember_me(true);
        assert!(coordinator.login_with(request).await.is_ok());
        m.assert_async().await;
    }

    #[tokio::test]
    async fn test_login_failure_keeps_existing_user() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", "/api/login")
            .with_status(401)
            .with_body(r#"{"error": "Invalid email or password"}"#)
            .create_async()
            .await;

        let coordinator = coordinator_for(&server);
        coordinator.store().set_user(User::new("c@d.com"));
        let before = coordinator.store().get_state();

        let err = coordinator.login("a@b.com", "bad").await.unwrap_err();
        assert!(!err.detail().is_empty());
        assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
        assert_eq!(coordinator.store().get_state(), before);
    }

    #[tokio::test]
    async fn test_login_failure_on_fresh_store_stays_uninitialized() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", "/api/login")
            .with_status(401)
            .with_body(r#"{"detail": "Invalid email or password"}"#)
            .create_async()
            .await;

        let coordinator = coordinator_for(&server);
        assert!(coordinator.login("a@b.com", "bad").await.is_err());
        assert!(!coordinator.store().get_state().initialized);
    }

    #[tokio::test]
    async fn test_logout_all_clears_store() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("POST", "/api/logout")
            .match_query(Matcher::UrlEncoded("all".into(), "true".into()))
            .with_status(200)
            .create_async()
            .await;

        let coordinator = coordinator_for(&server);
        coordinator.store().set_user(User::new("a@b.com"));
        coordinator.logout(true).await.expect("logout should succeed");
        m.assert_async().await;
        let state = coordinator.store().get_state();
        assert!(state.initialized);
        assert!(state.user.is_none());
    }

    #[tokio::test]
    async fn test_logout_401_counts_as_success() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", "/api/logout")
            .with_status(401)
            .with_body(r#"{"detail": "Unauthorized"}"#)
            .create_async()
            .await;

        let coordinator = coordinator_for(&server);
        coordinator.store().set_user(User::new("a@b.com"));
        assert!(coordinator.logout(false).await.is_ok());
        assert!(!coordinator.store().get_state().is_authenticated());
    }

    #[tokio::test]
    async fn test_logout_server_error_still_clears_store() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", "/api/logout")
            .with_status(500)
            .create_async()
            .await;

        let coordinator = coordinator_for(&server);
        coordinator.store().set_user(User::new("a@b.com"));
        let err = coordinator.logout(false).await.unwrap_err();
        assert_eq!(err.detail(), "500 Internal Server Error");
        assert!(!coordinator.store().get_state().is_authenticated());
    }
}
