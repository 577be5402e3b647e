use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The User struct represents the identity the server vouches for.
///
/// Only `email` is interpreted; any further fields the server sends are kept
/// verbatim in `attributes` so richer payloads survive a round through the store.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct User {
    pub email: String,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl User {
    pub fn new(email: impl Into<String>) -> Self {
        User {
            email: email.into(),
            attributes: Map::new(),
        }
    }

    /// Attach an extra attribute, replacing any previous value under `key`.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}

/// Body of a successful session probe. The backend wraps the user as
/// `{"user": {...}}`; a bare user object is accepted too.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
pub enum SessionPayload {
    Wrapped { user: User },
    Bare(User),
}

impl SessionPayload {
    pub fn into_user(self) -> User {
        match self {
            SessionPayload::Wrapped { user } | SessionPayload::Bare(user) => user,
        }
    }
}
