use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::user::User;

/// Snapshot of what this process knows about its session.
///
/// `initialized == false` implies `user == None`. Once `initialized` is set
/// it stays set; only `user` toggles afterwards.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct SessionState {
    pub initialized: bool,
    pub user: Option<User>,
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

/// Credentials submitted to the login endpoint.
#[derive(Serialize, Debug, Clone)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    /// Asks the server for a long-lived session.
    pub remember_me: bool,
}

impl LoginRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        LoginRequest {
            email: email.into(),
            password: password.into(),
            remember_me: false,
        }
    }

    pub fn remember_me(mut self, remember_me: bool) -> Self {
        self.remember_me = remember_me;
        self
    }
}

/// Body of a successful login: the session's identity plus when it lapses.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LoginResponse {
    pub email: String,
    #[serde(deserialize_with = "deserialize_expiry")]
    pub expiry: DateTime<Utc>,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl LoginResponse {
    /// The user the store records for this login.
    pub fn user(&self) -> User {
        User {
            email: self.email.clone(),
            attributes: self.attributes.clone(),
        }
    }
}

/// Error body shared by every endpoint. The login route historically answered
/// `{"error": ...}`, hence the alias.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ErrorBody {
    #[serde(alias = "error")]
    pub detail: String,
}

/// Accepts RFC 3339 timestamps and offset-less ones, which are taken as UTC.
fn deserialize_expiry<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if let Ok(dt) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(serde::de::Error::custom)
}
