use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Location of the remote session authority.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct ApiConfig {
    /// Origin the API paths are resolved against, e.g. `https://pulse.example`.
    pub base_url: String,
    #[serde(default = "default_session_path")]
    pub session_path: String,
    #[serde(default = "default_login_path")]
    pub login_path: String,
    #[serde(default = "default_logout_path")]
    pub logout_path: String,
    /// Per-request timeout. When absent the transport's default applies.
    #[serde(default)]
    pub timeout_in_ms: Option<u64>,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        ApiConfig {
            base_url: base_url.into(),
            session_path: default_session_path(),
            login_path: default_login_path(),
            logout_path: default_logout_path(),
            timeout_in_ms: None,
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_in_ms.map(Duration::from_millis)
    }
}

fn default_session_path() -> String {
    "/api/session".to_string()
}

fn default_login_path() -> String {
    "/api/login".to_string()
}

fn default_logout_path() -> String {
    "/api/logout".to_string()
}
