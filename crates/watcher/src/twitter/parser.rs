//! Search timeline HTML parser.

use anyhow::{anyhow, Result};
use scraper::{Html, Selector};

use super::types::LatestPost;

/// Parser for Nitter-style search timeline HTML.
pub struct SearchParser;

impl SearchParser {
    /// Parse up to `limit` posts from a search page, newest first.
    ///
    /// Pinned items are skipped since they are not in chronological order.
    pub fn parse(html: &str, limit: usize) -> Result<Vec<LatestPost>> {
        let document = Html::parse_document(html);

        let item_selector = selector(".timeline-item")?;
        let link_selector = selector("a.tweet-link")?;
        let fallback_link_selector = selector("a[href*='/status/']")?;
        let content_selector = selector(".tweet-content")?;
        let pinned_selector = selector(".pinned")?;

        let items: Vec<_> = document.select(&item_selector).collect();
        tracing::debug!(item_count = items.len(), "Found timeline items");

        let mut posts = Vec::new();

        for item in items {
            if posts.len() >= limit {
                break;
            }

            if item.select(&pinned_selector).next().is_some() {
                tracing::debug!("Skipping pinned item");
                continue;
            }

            let href = item
                .select(&link_selector)
                .chain(item.select(&fallback_link_selector))
                .find_map(|el| el.value().attr("href"));

            let Some(href) = href else {
                tracing::debug!("Timeline item missing status link, skipping");
                continue;
            };

            let Some((_, id)) = Self::parse_status_url(href) else {
                tracing::debug!(href, "Could not parse status URL");
                continue;
            };

            let text = item
                .select(&content_selector)
                .next()
                .map(|el| el.text().collect::<String>())
                .unwrap_or_default();

            posts.push(LatestPost::new(id, text.trim()));
        }

        tracing::debug!(count = posts.len(), "Parsed posts from HTML");
        Ok(posts)
    }

    /// Parse a status URL into username and numeric ID.
    ///
    /// Accepts relative paths (`/user/status/123#m`) and full URLs
    /// (`https://x.com/user/status/123?s=20`).
    pub fn parse_status_url(url: &str) -> Option<(String, u64)> {
        let path = match url.split_once("://") {
            Some((_, rest)) => rest.split_once('/').map_or("", |(_, p)| p),
            None => url.trim_start_matches('/'),
        };

        let parts: Vec<&str> = path.split('/').collect();
        if parts.len() < 3 || parts[1] != "status" {
            return None;
        }

        let id = parts[2].split(['?', '#']).next()?.parse().ok()?;
        Some((parts[0].to_string(), id))
    }
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| anyhow!("Invalid selector {css}: {e:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIMELINE: &str = r#"
        <div class="timeline">
          <div class="timeline-item" data-username="acct">
            <a class="tweet-link" href="/acct/status/100#m"></a>
            <div class="tweet-body">
              <div class="pinned"><span>Pinned Tweet</span></div>
              <div class="tweet-content media-body" dir="auto">Old pinned post</div>
            </div>
          </div>
          <div class="timeline-item" data-username="acct">
            <a class="tweet-link" href="/acct/status/1790000000000000002#m"></a>
            <div class="tweet-body">
              <div class="tweet-content media-body" dir="auto">
                Inflation eases in <a href="/search?q=%23May">#May</a>
              </div>
            </div>
          </div>
          <div class="timeline-item" data-username="acct">
            <a class="tweet-link" href="/acct/status/1790000000000000001#m"></a>
            <div class="tweet-body">
              <div class="tweet-content media-body" dir="auto">Dollar steady</div>
            </div>
          </div>
        </div>
    "#;

    #[test]
    fn test_parse_skips_pinned_and_keeps_order() {
        let posts = SearchParser::parse(TIMELINE, 10).unwrap();

        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].id, 1_790_000_000_000_000_002);
        assert_eq!(posts[0].text, "Inflation eases in #May");
        assert_eq!(posts[1].text, "Dollar steady");
    }

    #[test]
    fn test_parse_honors_limit() {
        let posts = SearchParser::parse(TIMELINE, 1).unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].id, 1_790_000_000_000_000_002);
    }

    #[test]
    fn test_parse_empty_timeline() {
        let html = r#"<div class="timeline"><div class="timeline-none">No items found</div></div>"#;
        assert!(SearchParser::parse(html, 10).unwrap().is_empty());
    }

    #[test]
    fn test_parse_keeps_post_without_text() {
        let html = r#"
            <div class="timeline-item">
              <a class="tweet-link" href="/acct/status/9#m"></a>
              <div class="attachments"><img src="/pic/1.jpg"></div>
            </div>
            <div class="timeline-item">
              <a class="tweet-link" href="/acct/status/8#m"></a>
              <div class="tweet-content">older</div>
            </div>
        "#;
        let posts = SearchParser::parse(html, 10).unwrap();

        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0], LatestPost::new(9, ""));
    }

    #[test]
    fn test_parse_status_url() {
        assert_eq!(
            SearchParser::parse_status_url("/acct/status/123#m"),
            Some(("acct".to_string(), 123))
        );
        assert_eq!(
            SearchParser::parse_status_url("https://x.com/acct/status/456?s=20"),
            Some(("acct".to_string(), 456))
        );
        assert_eq!(SearchParser::parse_status_url("/acct/likes"), None);
        assert_eq!(SearchParser::parse_status_url("/acct/status/abc"), None);
        assert_eq!(SearchParser::parse_status_url("https://google.com"), None);
    }
}
