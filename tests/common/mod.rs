#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use news_analyzer::ai::Summarizer;
use news_analyzer::api::AppState;
use news_analyzer::core::config::BasicMode;
use news_analyzer::core::models::Article;
use news_analyzer::errors::BotError;
use news_analyzer::kakao::SkillResponse;
use news_analyzer::sources::ArticleSource;
use news_analyzer::worker::{AnalysisPipeline, CallbackClient, CallbackDispatcher};
use tokio::sync::Notify;
use url::Url;

pub fn sample_article() -> Article {
    Article {
        title: "Rust 2024 에디션 정식 출시".to_string(),
        link: Url::parse("https://blog.rust-lang.org/2025/02/20/Rust-1.85.0.html").unwrap(),
        description: "Rust 1.85와 함께 2024 에디션이 안정화되었습니다".to_string(),
        points: 42,
        topic_id: "19377".to_string(),
    }
}

/// Source with a canned article, optionally held back until `gate` opens.
pub struct FakeSource {
    pub article: Option<Article>,
    pub detail: Result<String, String>,
    pub gate: Option<Arc<Notify>>,
    pub top_calls: AtomicUsize,
    pub detail_calls: AtomicUsize,
}

impl FakeSource {
    pub fn with_article() -> Self {
        Self {
            article: Some(sample_article()),
            detail: Ok("본문 내용입니다.".to_string()),
            gate: None,
            top_calls: AtomicUsize::new(0),
            detail_calls: AtomicUsize::new(0),
        }
    }

    pub fn empty() -> Self {
        Self {
            article: None,
            ..Self::with_article()
        }
    }

    pub fn gated(gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::with_article()
        }
    }
}

#[async_trait]
impl ArticleSource for FakeSource {
    fn name(&self) -> &str {
        "긱뉴스"
    }

    async fn fetch_top_article(&self) -> Option<Article> {
        self.top_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.article.clone()
    }

    async fn fetch_detail(&self, _topic_id: &str) -> Result<String, BotError> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        self.detail.clone().map_err(BotError::FetchError)
    }
}

/// Source that fails the test if it is touched.
pub struct UnreachableSource;

#[async_trait]
impl ArticleSource for UnreachableSource {
    fn name(&self) -> &str {
        "unreachable"
    }

    async fn fetch_top_article(&self) -> Option<Article> {
        panic!("source must not be called on this path");
    }

    async fn fetch_detail(&self, _topic_id: &str) -> Result<String, BotError> {
        panic!("source must not be called on this path");
    }
}

pub struct FakeSummarizer {
    pub reply: Result<String, String>,
    pub calls: AtomicUsize,
}

impl FakeSummarizer {
    pub fn ok(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: Err("model unavailable".to_string()),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl Summarizer for FakeSummarizer {
    async fn summarize(&self, _article: &Article, _detail_text: &str) -> Result<String, BotError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply.clone().map_err(BotError::OpenAIError)
    }
}

/// Summarizer that fails the test if it is invoked.
pub struct PanickingSummarizer;

#[async_trait]
impl Summarizer for PanickingSummarizer {
    async fn summarize(&self, _article: &Article, _detail_text: &str) -> Result<String, BotError> {
        panic!("summarizer must not be called on the synchronous path");
    }
}

/// Records every callback POST instead of sending it.
#[derive(Default)]
pub struct RecordingCallbackClient {
    pub posts: Mutex<Vec<(Url, SkillResponse)>>,
    pub fail: bool,
}

impl RecordingCallbackClient {
    pub fn failing() -> Self {
        Self {
            posts: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn posts(&self) -> Vec<(Url, SkillResponse)> {
        self.posts.lock().unwrap().clone()
    }

    /// Wait until at least `n` POSTs were recorded.
    pub async fn wait_for(&self, n: usize) -> Vec<(Url, SkillResponse)> {
        tokio::time::timeout(Duration::from_secs(5), async {
            loop {
                let posts = self.posts();
                if posts.len() >= n {
                    return posts;
                }
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        })
        .await
        .expect("callback POST not observed in time")
    }
}

#[async_trait]
impl CallbackClient for RecordingCallbackClient {
    async fn post_envelope(
        &self,
        callback_url: &Url,
        envelope: &SkillResponse,
    ) -> Result<(), BotError> {
        self.posts
            .lock()
            .unwrap()
            .push((callback_url.clone(), envelope.clone()));
        if self.fail {
            return Err(BotError::HttpError("callback endpoint down".to_string()));
        }
        Ok(())
    }
}

pub fn app_state(
    source: Arc<dyn ArticleSource>,
    summarizer: Arc<dyn Summarizer>,
    callbacks: Arc<dyn CallbackClient>,
    capacity: usize,
    workers: usize,
) -> AppState {
    let pipeline = Arc::new(AnalysisPipeline::new(source, summarizer));
    let dispatcher = CallbackDispatcher::start(Arc::clone(&pipeline), callbacks, capacity, workers);
    AppState {
        pipeline,
        dispatcher: Arc::new(dispatcher),
        basic_mode: BasicMode::Placeholder,
        reply_budget: Duration::from_millis(4500),
    }
}
