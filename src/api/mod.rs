//! API Lambda handler and request processing

pub mod handler;
pub mod helpers;
pub mod parsing;
pub mod state;
pub mod status;

// Re-export the main handler for convenience
pub use handler::handler;
pub use state::AppState;
