use http::StatusCode;

use crate::models::ErrorBody;
use crate::transport::{ApiResponse, TransportError};

/// Every way a coordinator operation can fail.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SessionError {
    /// The server answered with a non-success status.
    #[error("{detail}")]
    Rejected { status: StatusCode, detail: String },

    /// A protected call hit 401 after the session had been established.
    #[error("session expired: {detail}")]
    Expired { detail: String },

    /// No response was obtained.
    #[error("transport error: {0}")]
    Transport(String),

    /// A response arrived but its body was not what the endpoint promises.
    #[error("malformed response: {0}")]
    Decode(String),
}

impl SessionError {
    /// Build a `Rejected` from a non-success response, reading `{detail}` from
    /// the body when it has one.
    pub fn rejected(response: &ApiResponse) -> Self {
        let detail = match response.json::<ErrorBody>() {
            Ok(body) if !body.detail.trim().is_empty() => body.detail,
            _ => status_line(response.status),
        };
        SessionError::Rejected {
            status: response.status,
            detail,
        }
    }

    /// Human-readable message for any variant.
    pub fn detail(&self) -> String {
        match self {
            SessionError::Rejected { detail, .. } | SessionError::Expired { detail } => {
                detail.clone()
            }
            other => other.to_string(),
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            SessionError::Rejected { status, .. } => Some(*status),
            SessionError::Expired { .. } => Some(StatusCode::UNAUTHORIZED),
            _ => None,
        }
    }

    /// True when the server itself said "not authenticated".
    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, SessionError::Rejected { .. } | SessionError::Expired { .. })
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, SessionError::Transport(_))
    }
}

impl From<TransportError> for SessionError {
    fn from(e: TransportError) -> Self {
        SessionError::Transport(e.0)
    }
}

fn status_line(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {}", status.as_u16(), reason),
        None => status.as_u16().to_string(),
    }
}
