//! HTTP surface: skill handlers and request processing

pub mod handler;
pub mod helpers;
pub mod parsing;
pub mod state;

// Re-export the router for convenience
pub use handler::router;
pub use state::AppState;
