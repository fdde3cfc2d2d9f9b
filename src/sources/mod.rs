//! News sources the pipeline can read from.
//!
//! Each source hands back at most one [`Article`] per request plus, on demand,
//! the body text of that article's detail page. GeekNews is the primary
//! source; Hacker News is consulted when GeekNews yields nothing.

pub mod geeknews;
pub mod hackernews;

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::core::models::Article;
use crate::errors::BotError;

pub use geeknews::GeekNewsScraper;
pub use hackernews::HackerNewsScraper;

/// GET `url` and return the body. Non-2xx is a [`BotError::FetchError`].
pub(crate) async fn get_html(http: &Client, url: &Url) -> Result<String, BotError> {
    let response = http.get(url.clone()).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(BotError::FetchError(format!("GET {} returned {}", url, status)));
    }
    Ok(response.text().await?)
}

#[async_trait]
pub trait ArticleSource: Send + Sync {
    /// Display name used in reply headings.
    fn name(&self) -> &str;

    /// First entry of the listing, or `None` when nothing could be read.
    ///
    /// Never fails: HTTP and markup problems are logged and reported as `None`.
    async fn fetch_top_article(&self) -> Option<Article>;

    /// Body text of the detail page, empty when the page has no content region.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failures and non-2xx responses.
    async fn fetch_detail(&self, topic_id: &str) -> Result<String, BotError>;
}
