pub mod base;
pub mod http_transport;

// Re-export so we can do "use crate::transport::*;"
pub use base::{ApiRequest, ApiResponse, Transport, TransportError};
pub use http_transport::HttpTransport;
