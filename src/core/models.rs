use url::Url;

use crate::kakao::response_builder::truncate_reply_text;

/// The top entry of the GeekNews listing, built once per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub title: String,
    pub link: Url,
    pub description: String,
    pub points: u32,
    pub topic_id: String,
}

/// Reply text that already fits the chat platform's character ceiling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisResult {
    text: String,
}

impl AnalysisResult {
    #[must_use]
    pub fn new(text: &str) -> Self {
        Self {
            text: truncate_reply_text(text),
        }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Where a deferred reply must be delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackRequest {
    pub callback_url: Url,
}

/// A deferred request waiting for a callback worker.
#[derive(Debug, Clone)]
pub struct CallbackJob {
    pub correlation_id: String,
    pub callback: CallbackRequest,
}

impl CallbackJob {
    #[must_use]
    pub fn new(callback: CallbackRequest) -> Self {
        Self {
            correlation_id: uuid::Uuid::new_v4().to_string(),
            callback,
        }
    }
}
