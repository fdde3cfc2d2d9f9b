//! All AI/LLM functionality

pub mod client;
pub mod prompt_builder;

use async_trait::async_trait;

use crate::core::models::Article;
use crate::errors::BotError;

// Re-export main types for convenience
pub use client::LlmClient;

/// Turns one scraped article into best-effort analysis text.
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the completion call fails or yields no text.
    async fn summarize(&self, article: &Article, detail_text: &str) -> Result<String, BotError>;
}
