//! Latest-post fetchers.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;

use super::parser::SearchParser;
use super::types::{LatestPost, SearchFilter};

/// Source of the newest post matching a filter.
#[async_trait]
pub trait PostFetcher: Send + Sync {
    /// Return the newest matching post, or `None` when nothing matches.
    async fn fetch_latest(&self, filter: &SearchFilter) -> Result<Option<LatestPost>>;
}

/// Fetches posts from a Nitter-compatible search front end.
pub struct SearchFetcher {
    base_url: String,
    client: reqwest::Client,
}

impl SearchFetcher {
    /// Create a fetcher against the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Fetch the search timeline HTML.
    async fn fetch_search_page(&self, filter: &SearchFilter) -> Result<String> {
        let url = format!("{}/search", self.base_url);
        let query = filter.to_query();

        tracing::debug!(url = %url, query = %query, "Fetching search page");

        let response = self
            .client
            .get(&url)
            .query(&[("f", "tweets"), ("q", query.as_str())])
            .send()
            .await
            .with_context(|| format!("Search request to {url} failed"))?;

        let status = response.status();
        if !status.is_success() {
            bail!("Search request to {url} returned {status}");
        }

        let html = response
            .text()
            .await
            .context("Failed to read search response body")?;
        tracing::debug!(len = html.len(), "Got search page");

        Ok(html)
    }
}

#[async_trait]
impl PostFetcher for SearchFetcher {
    async fn fetch_latest(&self, filter: &SearchFilter) -> Result<Option<LatestPost>> {
        let html = self.fetch_search_page(filter).await?;
        let posts = SearchParser::parse(&html, filter.limit)?;
        Ok(posts.into_iter().next())
    }
}
