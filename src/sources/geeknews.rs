//! GeekNews (<https://news.hada.io>) scraper.
//!
//! The listing page renders one `div.topic_row` per story:
//!
//! ```text
//! div.topic_row
//!   div.topictitle > a[href] > h1        title, external link
//!   div.topicdesc  > a[href=topic?id=N]  description, discussion link
//!   div.topicinfo  > span#tpN            points
//! ```
//!
//! The detail page (`topic?id=N`) keeps the story body in `#topic_contents`.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, error, info, instrument, warn};
use url::Url;

use super::{ArticleSource, get_html};
use crate::core::models::Article;
use crate::errors::BotError;

static WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("static regex compile"));
static BLANK_LINES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n[ \t]*(\n[ \t]*)+").expect("static regex compile"));

static TOPIC_ROW: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.topic_row").expect("static selector parse"));
static TITLE_LINK: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.topictitle a[href]").expect("static selector parse"));
static HEADING: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h1").expect("static selector parse"));
static DESC_LINK: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.topicdesc a[href]").expect("static selector parse"));
static POINTS: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("div.topicinfo span[id^='tp']").expect("static selector parse")
});
static CONTENTS: Lazy<Selector> =
    Lazy::new(|| Selector::parse("#topic_contents").expect("static selector parse"));

pub(crate) fn collapse_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text.trim(), " ").into_owned()
}

pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    collapse_whitespace(&element.text().collect::<Vec<_>>().join(" "))
}

/// Extracts the `id` query parameter from a `topic?id=N` link.
fn topic_id_from_href(base_url: &Url, href: &str) -> Option<String> {
    let resolved = base_url.join(href).ok()?;
    if !resolved.path().ends_with("/topic") {
        return None;
    }
    resolved
        .query_pairs()
        .find(|(key, _)| key == "id")
        .map(|(_, value)| value.into_owned())
        .filter(|id| !id.is_empty())
}

/// Parse the first story row of a listing page.
///
/// Returns `None` if the page has no row, or the first row lacks a title, a
/// resolvable link, or a topic id.
#[must_use]
pub fn parse_listing(html: &str, base_url: &Url) -> Option<Article> {
    let document = Html::parse_document(html);
    let row = document.select(&TOPIC_ROW).next()?;

    let title_link = row.select(&TITLE_LINK).next()?;
    let title = title_link
        .select(&HEADING)
        .next()
        .map_or_else(|| element_text(title_link), element_text);
    if title.is_empty() {
        debug!("Top row has an empty title");
        return None;
    }
    let link = base_url.join(title_link.value().attr("href")?).ok()?;

    let desc_link = row.select(&DESC_LINK).next();
    let description = desc_link.map(element_text).unwrap_or_default();

    let points_span = row.select(&POINTS).next();
    let points = points_span
        .map(element_text)
        .and_then(|raw| raw.parse::<u32>().ok())
        .unwrap_or(0);

    let topic_id = desc_link
        .and_then(|a| a.value().attr("href"))
        .and_then(|href| topic_id_from_href(base_url, href))
        .or_else(|| {
            points_span
                .and_then(|span| span.value().id())
                .and_then(|id| id.strip_prefix("tp"))
                .filter(|id| !id.is_empty())
                .map(str::to_string)
        })
        .or_else(|| topic_id_from_href(base_url, link.as_str()))?;

    Some(Article {
        title,
        link,
        description,
        points,
        topic_id,
    })
}

/// Body text of a detail page; empty when `#topic_contents` is missing.
///
/// Line structure is kept, runs of blank lines are folded into one.
#[must_use]
pub fn parse_detail(html: &str) -> String {
    let document = Html::parse_document(html);
    let Some(contents) = document.select(&CONTENTS).next() else {
        return String::new();
    };

    let raw = contents.text().collect::<String>();
    let lines = raw
        .lines()
        .map(|line| WHITESPACE.replace_all(line.trim(), " ").into_owned())
        .collect::<Vec<_>>()
        .join("\n");
    BLANK_LINES.replace_all(lines.trim(), "\n\n").into_owned()
}

/// Scrapes the GeekNews front page and topic pages.
#[derive(Debug, Clone)]
pub struct GeekNewsScraper {
    http: Client,
    listing_url: Url,
    detail_url: Url,
}

impl GeekNewsScraper {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(listing_url: Url, detail_url: Url, timeout: Duration) -> Result<Self, BotError> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("news-analyzer/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            listing_url,
            detail_url,
        })
    }

    fn detail_page_url(&self, topic_id: &str) -> Url {
        let mut url = self.detail_url.clone();
        url.query_pairs_mut().clear().append_pair("id", topic_id);
        url
    }
}

#[async_trait]
impl ArticleSource for GeekNewsScraper {
    fn name(&self) -> &str {
        "긱뉴스"
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
                    "Listing fetch failed"
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
                "Fetched top GeekNews article"
            ),
            None => warn!(bytes = html.len(), "Listing page had no usable topic row"),
        }
        article
    }

    #[instrument(level = "info", skip(self))]
    async fn fetch_detail(&self, topic_id: &str) -> Result<String, BotError> {
        let url = self.detail_page_url(topic_id);
        let html = get_html(&self.http, &url).await?;
        let body = parse_detail(&html);
        if body.is_empty() {
            warn!(%url, "Detail page has no content region");
        } else {
            info!(chars = body.chars().count(), "Parsed GeekNews detail");
        }
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topic_id_requires_topic_path() {
        let base = Url::parse("https://news.hada.io/").unwrap();
        assert_eq!(
            topic_id_from_href(&base, "topic?id=123"),
            Some("123".to_string())
        );
        assert_eq!(topic_id_from_href(&base, "https://example.com/?id=5"), None);
        assert_eq!(topic_id_from_href(&base, "topic?id="), None);
    }

    #[test]
    fn detail_url_carries_the_topic_id() {
        let scraper = GeekNewsScraper::new(
            Url::parse("https://news.hada.io/").unwrap(),
            Url::parse("https://news.hada.io/topic").unwrap(),
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(
            scraper.detail_page_url("42").as_str(),
            "https://news.hada.io/topic?id=42"
        );
    }
}
