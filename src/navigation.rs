//! The host's navigation and notice facilities.
//!
//! The coordinator never renders anything; it asks the host to move the user
//! somewhere and to show them a message.

use tracing::warn;

use crate::routes::RedirectTarget;

/// Something the user should be told about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// A protected call found the session gone.
    LoggedOut { detail: String },
}

impl Notice {
    pub fn message(&self) -> &str {
        match self {
            Notice::LoggedOut { .. } => "You have been logged out.",
        }
    }
}

pub trait Navigator: Send + Sync {
    /// The URL (path and query) the user is on right now.
    fn current_location(&self) -> String;
    fn navigate(&self, target: RedirectTarget);
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// A [`Notifier`] that only writes the notice to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notice: Notice) {
        match &notice {
            Notice::LoggedOut { detail } => warn!(
                event_name = "notice.logged_out",
                event_domain = "navigation",
                detail = detail.as_str(),
                "{}",
                notice.message()
            ),
        }
    }
}
