pub mod session_store;

// Re-export so code outside can do "use crate::store::SessionStore;"
pub use session_store::SessionStore;
