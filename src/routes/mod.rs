//! Client-side route guards and the return-to redirect convention.
//!
//! Protected views call [`RouteGuard::require_authenticated`]; authentication
//! views (login, register) call [`RouteGuard::redirect_if_authenticated`].
//! Redirects into an authentication view carry the originally requested URL
//! as an encoded query value so the login flow can send the user back.

pub mod guard;
pub mod redirect;

pub use guard::{GuardOutcome, RouteGuard};
pub use redirect::{is_safe_return_to, path_of, return_to_of, RedirectTarget};
