//! LLM (`OpenAI`) API client module
//!
//! Encapsulates the chat-completion call used to analyse an article.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use openai_api_rs::v1::chat_completion::{ChatCompletionMessage, Content, MessageRole};
use reqwest::Client;
use serde_json::{Value, json};
use tracing::{error, info, instrument};

use super::Summarizer;
use super::prompt_builder::build_analysis_prompt;
use crate::core::config::PipelineConfig;
use crate::core::models::Article;
use crate::errors::BotError;

fn role_name(role: &MessageRole) -> &'static str {
    match role {
        MessageRole::system => "system",
        MessageRole::user => "user",
        MessageRole::assistant => "assistant",
        MessageRole::function => "function",
        MessageRole::tool => "tool",
    }
}

/// Request body for `POST /chat/completions`.
#[must_use]
pub fn completion_request_body(
    config: &PipelineConfig,
    prompt: &[ChatCompletionMessage],
) -> Value {
    let messages: Vec<Value> = prompt
        .iter()
        .map(|msg| {
            let content = match &msg.content {
                Content::Text(text) => json!(text),
                other => json!(format!("{:?}", other)),
            };
            json!({ "role": role_name(&msg.role), "content": content })
        })
        .collect();

    json!({
        "model": config.model,
        "messages": messages,
        "max_tokens": config.max_tokens,
        "temperature": config.temperature,
    })
}

/// LLM API client for article analysis
pub struct LlmClient {
    http: Client,
    api_key: String,
    org_id: Option<String>,
    base_url: String,
    config: PipelineConfig,
}

impl LlmClient {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(
        api_key: String,
        org_id: Option<String>,
        base_url: &str,
        config: PipelineConfig,
        timeout: Duration,
    ) -> Result<Self, BotError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            api_key,
            org_id,
            base_url: base_url.trim_end_matches('/').to_string(),
            config,
        })
    }

    #[must_use]
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Send one chat completion and return the first choice's text.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-2xx status, or a response
    /// without message content.
    pub async fn complete(&self, prompt: &[ChatCompletionMessage]) -> Result<String, BotError> {
        #[cfg(feature = "debug-logs")]
        info!("Using ChatGPT prompt:\n{:?}", prompt);

        let body = completion_request_body(&self.config, prompt);

        let mut request = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body);
        if let Some(org) = &self.org_id {
            request = request.header("OpenAI-Organization", org);
        }

        let response = request
            .send()
            .await
            .map_err(|e| BotError::HttpError(format!("OpenAI API request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(BotError::OpenAIError(format!(
                "status {}: {}",
                status, error_text
            )));
        }

        let response_json: Value = response
            .json()
            .await
            .map_err(|e| BotError::OpenAIError(format!("Failed to parse response: {}", e)))?;

        response_json
            .get("choices")
            .and_then(|c| c.as_array())
            .and_then(|choices| choices.first())
            .and_then(|choice| choice.get("message"))
            .and_then(|m| m.get("content"))
            .and_then(|c| c.as_str())
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(str::to_string)
            .ok_or_else(|| BotError::OpenAIError("No text in response".to_string()))
    }
}

#[async_trait]
impl Summarizer for LlmClient {
    #[instrument(
        level = "info",
        skip_all,
        fields(topic_id = %article.topic_id, model = %self.config.model)
    )]
    async fn summarize(&self, article: &Article, detail_text: &str) -> Result<String, BotError> {
        let t0 = Instant::now();
        let prompt = build_analysis_prompt(&self.config, article, detail_text);
        let result = self.complete(&prompt).await;
        let elapsed_ms = t0.elapsed().as_millis() as u64;

        match &result {
            Ok(text) => info!(elapsed_ms, chars = text.chars().count(), "Analysis generated"),
            Err(e) => error!(elapsed_ms, error = %e, "Analysis failed"),
        }
        result
    }
}
