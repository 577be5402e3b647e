//! Client-side session coordination.
//!
//! Keeps one in-memory answer to "is this user logged in" in step with a
//! remote session endpoint, and decides redirects around the login and
//! logout boundaries.

pub mod config;
pub mod intercept;
pub mod models;
pub mod navigation;
pub mod routes;
pub mod session;
pub mod startup;
pub mod state;
pub mod store;
pub mod transport;
pub mod utils;
