//! News analyzer - a KakaoTalk skill server that briefs and analyses the top
//! GeekNews story.
//!
//! The platform gives a skill roughly five seconds to answer, while scraping
//! plus an LLM call can take minutes. Requests are therefore answered in one
//! of two ways:
//! 1. Immediately, with a scrape-only briefing that fits the time budget
//! 2. With a `useCallback` acknowledgement, after which a callback worker runs
//!    the full analysis and POSTs the result to the platform's callback URL
//!
//! # Architecture
//!
//! The system uses:
//! - axum for the skill endpoints
//! - scraper + reqwest for reading GeekNews, with Hacker News as fallback
//! - an OpenAI-compatible chat-completion API for analysis
//! - a bounded tokio queue and worker pool for callback delivery
//!
//! # Example
//!
//! ```no_run
//! use news_analyzer::api::{AppState, router};
//! use news_analyzer::core::config::AppConfig;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     news_analyzer::setup_logging();
//!
//!     let config = AppConfig::from_env()?;
//!     let state = AppState::from_config(&config)?;
//!     let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
//!     axum::serve(listener, router(state)).await?;
//!     Ok(())
//! }
//! ```

pub mod ai;
pub mod api;
pub mod core;
pub mod errors;
pub mod kakao;
pub mod sources;
pub mod worker;

pub use errors::BotError;

/// Configure structured JSON logging.
///
/// Filtering follows `RUST_LOG` and defaults to `info`. Calling it more than
/// once is harmless; only the first call installs a subscriber.
///
/// # Example
///
/// ```
/// news_analyzer::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
