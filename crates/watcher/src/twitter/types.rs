//! Twitter data types.

use serde::{Deserialize, Serialize};

/// The newest post matching a search, as returned by a fetcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatestPost {
    /// Numeric status ID.
    pub id: u64,
    /// Post text content.
    pub text: String,
}

impl LatestPost {
    /// Create a new post.
    #[must_use]
    pub fn new(id: u64, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
        }
    }
}

/// What to search for on each poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFilter {
    /// Account handle (without @).
    pub username: String,
    /// Keyword expression, e.g. `economy OR inflation`.
    pub query: String,
    /// Max results considered.
    pub limit: usize,
    /// Language code; empty means any.
    pub language: String,
}

impl SearchFilter {
    /// Render the filter as a search-operator query string.
    ///
    /// `from:acct (economy OR inflation) lang:en`
    #[must_use]
    pub fn to_query(&self) -> String {
        let mut parts = vec![format!("from:{}", self.username)];
        if !self.query.is_empty() {
            parts.push(format!("({})", self.query));
        }
        if !self.language.is_empty() {
            parts.push(format!("lang:{}", self.language));
        }
        parts.join(" ")
    }
}
