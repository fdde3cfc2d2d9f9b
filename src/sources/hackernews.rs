//! Hacker News (<https://news.ycombinator.com>) scraper.
//!
//! Front page rows look like:
//!
//! ```text
//! tr.athing#N
//!   span.titleline > a[href]   title, external link (or item?id=N)
//!   span.sitestr               source domain
//! tr > td.subtext
//!   span.score#score_N         "123 points"
//! ```
//!
//! Item pages (`item?id=N`) only carry a body for text posts, in `div.toptext`.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::Client;
use scraper::{Html, Selector};
use tracing::{error, info, instrument, warn};
use url::Url;

use super::geeknews::{collapse_whitespace, element_text};
use super::{ArticleSource, get_html};
use crate::core::models::Article;
use crate::errors::BotError;

static STORY_ROW: Lazy<Selector> =
    Lazy::new(|| Selector::parse("tr.athing").expect("static selector parse"));
static TITLE_LINK: Lazy<Selector> =
    Lazy::new(|| Selector::parse("span.titleline > a[href]").expect("static selector parse"));
static SITE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("span.sitestr").expect("static selector parse"));
static SCORE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("span.score").expect("static selector parse"));
static TOP_TEXT: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.toptext").expect("static selector parse"));

/// Parse the first story of a Hacker News listing page.
///
/// Returns `None` if there is no story row, or it lacks an id, a title or a
/// resolvable link. The description is the story's source domain, if shown.
#[must_use]
pub fn parse_listing(html: &str, base_url: &Url) -> Option<Article> {
    let document = Html::parse_document(html);
    let row = document.select(&STORY_ROW).next()?;
    let topic_id = row.value().id().filter(|id| !id.is_empty())?.to_string();

    let title_link = row.select(&TITLE_LINK).next()?;
    let title = element_text(title_link);
    if title.is_empty() {
        return None;
    }
    let link = base_url.join(title_link.value().attr("href")?).ok()?;

    let description = row
        .select(&SITE)
        .next()
        .map(element_text)
        .unwrap_or_default();

    // The score lives in the following row, keyed by the story id.
    let score_id = format!("score_{topic_id}");
    let points = document
        .select(&SCORE)
        .find(|span| span.value().id() == Some(score_id.as_str()))
        .map(element_text)
        .and_then(|raw| {
            raw.split_whitespace()
                .next()
                .and_then(|n| n.parse::<u32>().ok())
        })
        .unwrap_or(0);

    Some(Article {
        title,
        link,
        description,
        points,
        topic_id,
    })
}

/// Text of an item page's `div.toptext`; empty for link posts.
#[must_use]
pub fn parse_item(html: &str) -> String {
    let document = Html::parse_document(html);
    document
        .select(&TOP_TEXT)
        .next()
        .map(|text| {
            text.text()
                .map(collapse_whitespace)
                .filter(|piece| !piece.is_empty())
                .collect::<Vec<_>>()
                .join("\n")
        })
        .unwrap_or_default()
}

/// Scrapes the Hacker News front page and item pages.
#[derive(Debug, Clone)]
pub struct HackerNewsScraper {
    http: Client,
    listing_url: Url,
}

impl HackerNewsScraper {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(listing_url: Url, timeout: Duration) -> Result<Self, BotError> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("news-analyzer/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http, listing_url })
    }

    fn item_page_url(&self, topic_id: &str) -> Result<Url, BotError> {
        let mut url = self.listing_url.join("item")?;
        url.query_pairs_mut().clear().append_pair("id", topic_id);
        Ok(url)
    }
}

#[async_trait]
impl ArticleSource for HackerNewsScraper {
    fn name(&self) -> &str {
        "Hacker News"
    }

    #[instrument(level = "info", skip_all, fields(url = %self.listing_url))]
    async fn fetch_top_article(&self) -> Option<Article> {
        let t0 = Instant::now();
        let html = match get_html(&self.http, &self.listing_url).await {
            Ok(html) => html,
            Err(e) => {
                error!(
                    error = %e,
                    elapsed_ms = t0.elapsed().as_millis() as u64,
                    "Hacker News listing fetch failed"
                );
                return None;
            }
        };

        let article = parse_listing(&html, &self.listing_url);
        match &article {
            Some(a) => info!(
                topic_id = %a.topic_id,
                points = a.points,
                elapsed_ms = t0.elapsed().as_millis() as u64,
                "Fetched top Hacker News story"
            ),
            None => warn!(bytes = html.len(), "Hacker News page had no story row"),
        }
        article
    }

    #[instrument(level = "info", skip(self))]
    async fn fetch_detail(&self, topic_id: &str) -> Result<String, BotError> {
        let url = self.item_page_url(topic_id)?;
        let html = get_html(&self.http, &url).await?;
        Ok(parse_item(&html))
    }
}
