//! Callback workers: deferred analysis and out-of-band delivery

pub mod deliver;
pub mod handler;
pub mod pool;
pub mod summarize;

// Re-export the main types for convenience
pub use deliver::{CallbackClient, HttpCallbackClient};
pub use handler::handle_job;
pub use pool::CallbackDispatcher;
pub use summarize::AnalysisPipeline;
