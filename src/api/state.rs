//! Shared state for the skill endpoints.

use std::sync::Arc;
use std::time::Duration;

use crate::ai::LlmClient;
use crate::core::config::{AppConfig, BasicMode};
use crate::errors::BotError;
use crate::sources::{GeekNewsScraper, HackerNewsScraper};
use crate::worker::{AnalysisPipeline, CallbackDispatcher, HttpCallbackClient};

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<AnalysisPipeline>,
    pub dispatcher: Arc<CallbackDispatcher>,
    pub basic_mode: BasicMode,
    pub reply_budget: Duration,
}

impl AppState {
    /// Wire the production scrapers, LLM client and callback pool.
    ///
    /// Spawns the callback workers, so it must run inside a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns an error if an HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, BotError> {
        let source = GeekNewsScraper::new(
            config.listing_url.clone(),
            config.detail_url.clone(),
            config.fetch_timeout,
        )?;
        let summarizer = LlmClient::new(
            config.openai_api_key.clone(),
            config.openai_org_id.clone(),
            &config.openai_base_url,
            config.pipeline_config(),
            config.llm_timeout,
        )?;
        let callback_client = HttpCallbackClient::new(config.fetch_timeout)?;

        let mut pipeline = AnalysisPipeline::new(Arc::new(source), Arc::new(summarizer));
        if config.hackernews_fallback {
            let fallback =
                HackerNewsScraper::new(config.hackernews_url.clone(), config.fetch_timeout)?;
            pipeline = pipeline.with_fallback(Arc::new(fallback));
        }
        let pipeline = Arc::new(pipeline);
        let dispatcher = CallbackDispatcher::start(
            Arc::clone(&pipeline),
            Arc::new(callback_client),
            config.callback_queue_capacity,
            config.callback_workers,
        );

        Ok(Self {
            pipeline,
            dispatcher: Arc::new(dispatcher),
            basic_mode: config.basic_mode,
            reply_budget: config.reply_budget,
        })
    }
}
