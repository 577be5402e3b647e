pub mod coordinator;
pub mod error;

pub use coordinator::SessionCoordinator;
pub use error::SessionError;
