//! The two analysis flows behind the skill endpoints.
//!
//! - [`AnalysisPipeline::quick_briefing`]: listing scrape only, safe for the
//!   synchronous reply budget.
//! - [`AnalysisPipeline::full_analysis`]: listing, detail page and one LLM call;
//!   only ever run by callback workers.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::ai::Summarizer;
use crate::core::models::{AnalysisResult, Article};
use crate::errors::BotError;
use crate::kakao::CANNOT_RETRIEVE_MESSAGE;
use crate::sources::ArticleSource;

/// Template used when no model output is involved.
#[must_use]
pub fn briefing_text(source_name: &str, article: &Article) -> String {
    let mut text = format!(
        "📰 {} 인기글\n\n{} ({}P)\n",
        source_name, article.title, article.points
    );
    if !article.description.is_empty() {
        text.push('\n');
        text.push_str(&article.description);
        text.push('\n');
    }
    text.push_str(&format!("\n🔗 {}", article.link));
    text
}

/// Frame the model output with the article's title and link.
#[must_use]
pub fn analysis_text(article: &Article, analysis: &str) -> String {
    format!(
        "📰 {}\n\n{}\n\n🔗 {}",
        article.title,
        analysis.trim(),
        article.link
    )
}

pub struct AnalysisPipeline {
    sources: Vec<Arc<dyn ArticleSource>>,
    summarizer: Arc<dyn Summarizer>,
}

impl AnalysisPipeline {
    pub fn new(source: Arc<dyn ArticleSource>, summarizer: Arc<dyn Summarizer>) -> Self {
        Self {
            sources: vec![source],
            summarizer,
        }
    }

    /// Append a source consulted only when every earlier one yields nothing.
    #[must_use]
    pub fn with_fallback(mut self, source: Arc<dyn ArticleSource>) -> Self {
        self.sources.push(source);
        self
    }

    /// First article any source produces, with the source that produced it.
    async fn top_article(&self) -> Option<(Article, &dyn ArticleSource)> {
        for source in &self.sources {
            if let Some(article) = source.fetch_top_article().await {
                return Some((article, source.as_ref()));
            }
            warn!(source = source.name(), "Source yielded no article");
        }
        None
    }

    /// Scrape-only reply. Never calls the summarizer.
    #[instrument(level = "info", skip_all)]
    pub async fn quick_briefing(&self) -> AnalysisResult {
        match self.top_article().await {
            Some((article, source)) => {
                AnalysisResult::new(&briefing_text(source.name(), &article))
            }
            None => AnalysisResult::new(CANNOT_RETRIEVE_MESSAGE),
        }
    }

    /// Fetch, summarize and frame the top article.
    ///
    /// The detail page is read from the source that produced the article. A
    /// missing article is a normal outcome and yields the "cannot retrieve"
    /// text.
    ///
    /// # Errors
    ///
    /// Returns an error if the detail fetch or the completion call fails.
    #[instrument(level = "info", skip_all)]
    pub async fn full_analysis(&self) -> Result<AnalysisResult, BotError> {
        let Some((article, source)) = self.top_article().await else {
            return Ok(AnalysisResult::new(CANNOT_RETRIEVE_MESSAGE));
        };

        let detail = source.fetch_detail(&article.topic_id).await?;
        info!(
            source = source.name(),
            topic_id = %article.topic_id,
            detail_chars = detail.chars().count(),
            "Summarizing article"
        );
        let analysis = self.summarizer.summarize(&article, &detail).await?;
        Ok(AnalysisResult::new(&analysis_text(&article, &analysis)))
    }
}
