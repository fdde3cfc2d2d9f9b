//! Out-of-band delivery of deferred replies to the platform's callback URL.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use tracing::{error, info, instrument};
use url::Url;

use crate::errors::BotError;
use crate::kakao::{SkillResponse, format_reply};

#[async_trait]
pub trait CallbackClient: Send + Sync {
    /// POST `envelope` as JSON to `callback_url`, once.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-2xx status.
    async fn post_envelope(
        &self,
        callback_url: &Url,
        envelope: &SkillResponse,
    ) -> Result<(), BotError>;
}

/// `reqwest`-backed [`CallbackClient`].
#[derive(Debug, Clone)]
pub struct HttpCallbackClient {
    http: HttpClient,
}

impl HttpCallbackClient {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(timeout: Duration) -> Result<Self, BotError> {
        let http = HttpClient::builder().timeout(timeout).build()?;
        Ok(Self { http })
    }
}

#[async_trait]
impl CallbackClient for HttpCallbackClient {
    #[instrument(level = "info", skip_all, fields(url = %callback_url))]
    async fn post_envelope(
        &self,
        callback_url: &Url,
        envelope: &SkillResponse,
    ) -> Result<(), BotError> {
        let resp = self
            .http
            .post(callback_url.clone())
            .json(envelope)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body_text = resp
                .text()
                .await
                .unwrap_or_else(|_| "<failed to read body>".to_string());
            error!("callback POST failed: status={} body={}", status, body_text);
            return Err(BotError::HttpError(format!("callback returned status {}", status)));
        }
        Ok(())
    }
}

/// Deliver a finished reply. Failures are logged and swallowed.
pub async fn deliver_reply(
    client: &dyn CallbackClient,
    callback_url: &Url,
    text: &str,
    correlation_id: &str,
) {
    let envelope = format_reply(text);
    match client.post_envelope(callback_url, &envelope).await {
        Ok(()) => info!(correlation_id, "Callback delivered"),
        Err(e) => error!(correlation_id, error = %e, "Failed to deliver callback"),
    }
}

/// Best-effort error reply after the pipeline failed.
pub async fn deliver_error(
    client: &dyn CallbackClient,
    callback_url: &Url,
    message: &str,
    correlation_id: &str,
) {
    let envelope = format_reply(message);
    if let Err(e) = client.post_envelope(callback_url, &envelope).await {
        error!(correlation_id, error = %e, "Failed to deliver error callback");
    } else {
        info!(correlation_id, "Error callback delivered");
    }
}
