use std::env;
use std::time::Duration;

use url::Url;

const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_LISTING_URL: &str = "https://news.hada.io/";
const DEFAULT_DETAIL_URL: &str = "https://news.hada.io/topic";
const DEFAULT_HACKERNEWS_URL: &str = "https://news.ycombinator.com/";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

/// How `/basic` answers a non-empty utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BasicMode {
    /// Static placeholder naming the topic, no network calls.
    #[default]
    Placeholder,
    /// Scrape-only briefing of the current top GeekNews article.
    Headlines,
}

impl BasicMode {
    pub fn parse(raw: &str) -> Result<Self, String> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "placeholder" => Ok(BasicMode::Placeholder),
            "headlines" => Ok(BasicMode::Headlines),
            other => Err(format!(
                "BASIC_MODE: expected `placeholder` or `headlines`, got `{}`",
                other
            )),
        }
    }
}

/// One role in the analysis prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageConfig {
    pub role: String,
    pub goal: String,
}

impl StageConfig {
    pub fn new(role: &str, goal: &str) -> Self {
        Self {
            role: role.to_string(),
            goal: goal.to_string(),
        }
    }
}

/// Everything the summarizer needs to build and send its single completion call.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f64,
    pub detail_char_limit: usize,
    pub stages: Vec<StageConfig>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            max_tokens: 800,
            temperature: 0.3,
            detail_char_limit: 3000,
            stages: vec![
                StageConfig::new(
                    "기술 뉴스 리서처",
                    "기사 본문에서 사실 관계와 핵심 정보를 빠짐없이 추려낸다",
                ),
                StageConfig::new(
                    "뉴스 요약가",
                    "추려낸 정보를 비전문가도 이해할 수 있는 3~5문장으로 요약한다",
                ),
                StageConfig::new(
                    "기술 분석가",
                    "요약을 바탕으로 업계와 개발자 관점의 의미와 시사점을 정리한다",
                ),
            ],
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub openai_api_key: String,
    pub openai_org_id: Option<String>,
    pub openai_model: Option<String>,
    pub openai_base_url: String,
    pub listing_url: Url,
    pub detail_url: Url,
    pub hackernews_url: Url,
    pub hackernews_fallback: bool,
    pub bind_addr: String,
    pub fetch_timeout: Duration,
    pub llm_timeout: Duration,
    pub reply_budget: Duration,
    pub callback_queue_capacity: usize,
    pub callback_workers: usize,
    pub basic_mode: BasicMode,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let openai_api_key =
            var("OPENAI_API_KEY").ok_or_else(|| "OPENAI_API_KEY: not set".to_string())?;

        let parse_url = |key: &str, default: &str| -> Result<Url, String> {
            let raw = var(key).unwrap_or_else(|| default.to_string());
            Url::parse(&raw).map_err(|e| format!("{}: {}", key, e))
        };

        let parse_num = |key: &str, default: u64| -> Result<u64, String> {
            match var(key) {
                Some(raw) => raw
                    .trim()
                    .parse::<u64>()
                    .map_err(|e| format!("{}: {}", key, e)),
                None => Ok(default),
            }
        };

        let callback_queue_capacity = parse_num("CALLBACK_QUEUE_CAPACITY", 32)? as usize;
        if callback_queue_capacity == 0 {
            return Err("CALLBACK_QUEUE_CAPACITY: must be at least 1".to_string());
        }
        let callback_workers = parse_num("CALLBACK_WORKERS", 4)? as usize;
        if callback_workers == 0 {
            return Err("CALLBACK_WORKERS: must be at least 1".to_string());
        }

        let hackernews_fallback = match var("HACKERNEWS_FALLBACK") {
            Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" => true,
                "false" | "0" | "no" => false,
                other => {
                    return Err(format!(
                        "HACKERNEWS_FALLBACK: expected true or false, got `{}`",
                        other
                    ));
                }
            },
            None => true,
        };

        let basic_mode = match var("BASIC_MODE") {
            Some(raw) => BasicMode::parse(&raw)?,
            None => BasicMode::default(),
        };

        Ok(Self {
            openai_api_key,
            openai_org_id: var("OPENAI_ORG_ID"),
            openai_model: var("OPENAI_MODEL"),
            openai_base_url: var("OPENAI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
            listing_url: parse_url("GEEKNEWS_LISTING_URL", DEFAULT_LISTING_URL)?,
            detail_url: parse_url("GEEKNEWS_DETAIL_URL", DEFAULT_DETAIL_URL)?,
            hackernews_url: parse_url("HACKERNEWS_LISTING_URL", DEFAULT_HACKERNEWS_URL)?,
            hackernews_fallback,
            bind_addr: var("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            fetch_timeout: Duration::from_secs(parse_num("FETCH_TIMEOUT_SECS", 5)?),
            llm_timeout: Duration::from_secs(parse_num("LLM_TIMEOUT_SECS", 180)?),
            reply_budget: Duration::from_millis(parse_num("REPLY_BUDGET_MS", 4500)?),
            callback_queue_capacity,
            callback_workers,
            basic_mode,
        })
    }

    /// Prompt settings with the configured model applied.
    #[must_use]
    pub fn pipeline_config(&self) -> PipelineConfig {
        let mut pipeline = PipelineConfig::default();
        if let Some(model) = &self.openai_model {
            pipeline.model = model.clone();
        }
        pipeline
    }
}
