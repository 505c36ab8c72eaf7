//! Monitor settings, sourced from environment variables.

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use notify::{Notifier, NotifyChannel, PushoverChannel};

use crate::twitter::SearchFilter;

/// Default watched account.
pub const DEFAULT_USERNAME: &str = "brecordernews";

/// Default comma-separated keyword list.
pub const DEFAULT_SEARCH_TERMS: &str = "economy,inflation,demand,dollar,business";

/// Default number of search results considered per poll.
pub const DEFAULT_LIMIT: usize = 10;

/// Default language code.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Default seconds between polls.
pub const DEFAULT_POLLING_INTERVAL_SECS: u64 = 15;

/// Default state file path.
pub const DEFAULT_STATE_FILE: &str = "last_tweet.json";

/// Default search front end.
pub const DEFAULT_SEARCH_BASE_URL: &str = "https://nitter.net";

/// Settings that control post monitoring and notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorSettings {
    /// Account handle (without @).
    pub username: String,
    /// Keyword terms, OR-ed together in the search query.
    pub search_terms: Vec<String>,
    /// Max search results considered per poll.
    pub limit: usize,
    /// Language code for the search.
    pub language: String,
    /// Seconds to sleep between polls.
    pub polling_interval: u64,
    /// Where the last notified post is persisted.
    pub state_file: PathBuf,
    /// Search front end base URL.
    pub search_base_url: String,
    /// Pushover application token.
    pub pushover_token: Option<String>,
    /// Pushover user key.
    pub pushover_user: Option<String>,
    /// Skip all notifications.
    pub notify_disabled: bool,
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            username: DEFAULT_USERNAME.to_string(),
            search_terms: split_terms(DEFAULT_SEARCH_TERMS),
            limit: DEFAULT_LIMIT,
            language: DEFAULT_LANGUAGE.to_string(),
            polling_interval: DEFAULT_POLLING_INTERVAL_SECS,
            state_file: PathBuf::from(DEFAULT_STATE_FILE),
            search_base_url: DEFAULT_SEARCH_BASE_URL.to_string(),
            pushover_token: None,
            pushover_user: None,
            notify_disabled: false,
        }
    }
}

impl MonitorSettings {
    /// Create settings from environment variables.
    ///
    /// # Optional Environment Variables
    /// - `TWITTER_USERNAME`: Account to watch (default: brecordernews)
    /// - `TWEET_SEARCH_TERMS`: Comma-separated keywords
    /// - `TWEET_LIMIT`: Results considered per poll (default: 10)
    /// - `TWEET_LANGUAGE`: Language code (default: en)
    /// - `POLLING_INTERVAL`: Seconds between polls (default: 15)
    /// - `STATE_FILE`: State file path (default: last_tweet.json)
    /// - `SEARCH_BASE_URL`: Search front end (default: https://nitter.net)
    /// - `PUSHOVER_TOKEN` / `PUSHOVER_USER`: Pushover credentials
    /// - `NOTIFY_DISABLED`: "true" or "1" to skip notifications
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create settings from an arbitrary key/value source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let search_terms = lookup("TWEET_SEARCH_TERMS")
            .map(|v| split_terms(&v))
            .unwrap_or(defaults.search_terms);

        let limit = parse_number(&lookup, "TWEET_LIMIT", defaults.limit)?;
        if limit == 0 {
            bail!("TWEET_LIMIT must be at least 1");
        }

        let notify_disabled = lookup("NOTIFY_DISABLED")
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(false);

        Ok(Self {
            username: lookup("TWITTER_USERNAME").unwrap_or(defaults.username),
            search_terms,
            limit,
            language: lookup("TWEET_LANGUAGE").unwrap_or(defaults.language),
            polling_interval: parse_number(
                &lookup,
                "POLLING_INTERVAL",
                defaults.polling_interval,
            )?,
            state_file: lookup("STATE_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.state_file),
            search_base_url: lookup("SEARCH_BASE_URL").unwrap_or(defaults.search_base_url),
            pushover_token: lookup("PUSHOVER_TOKEN"),
            pushover_user: lookup("PUSHOVER_USER"),
            notify_disabled,
        })
    }

    /// Keyword terms joined with ` OR `.
    #[must_use]
    pub fn search_query(&self) -> String {
        self.search_terms.join(" OR ")
    }

    /// Sleep between polls.
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.polling_interval)
    }

    /// Search filter handed to the fetcher each cycle.
    #[must_use]
    pub fn filter(&self) -> SearchFilter {
        SearchFilter {
            username: self.username.clone(),
            query: self.search_query(),
            limit: self.limit,
            language: self.language.clone(),
        }
    }

    /// Whether both Pushover credentials are present.
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.is_empty());
        present(&self.pushover_token) && present(&self.pushover_user)
    }

    /// Build the notifier for these settings.
    #[must_use]
    pub fn notifier(&self) -> Notifier {
        if self.notify_disabled {
            tracing::info!("Notifications disabled via NOTIFY_DISABLED");
            return Notifier::disabled();
        }

        let pushover: Arc<dyn NotifyChannel> = Arc::new(PushoverChannel::new(
            self.pushover_token.clone(),
            self.pushover_user.clone(),
        ));
        Notifier::from_channels(vec![pushover])
    }
}

/// Split a comma-separated list, trimming entries and dropping empty ones.
fn split_terms(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(ToString::to_string)
        .collect()
}

fn parse_number<T, F>(lookup: &F, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} must be a non-negative integer, got {raw:?}")),
        None => Ok(default),
    }
}
