//! Last-notified post, persisted as JSON.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::twitter::LatestPost;

/// On-disk record of the most recently notified post.
///
/// Serialized as `{"tweet_id": <integer>, "tweet": <string>}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedState {
    /// ID of the last notified post.
    pub tweet_id: u64,
    /// Its text.
    pub tweet: String,
}

impl PersistedState {
    /// Build the state record for a post.
    #[must_use]
    pub fn from_post(post: &LatestPost) -> Self {
        Self {
            tweet_id: post.id,
            tweet: post.text.clone(),
        }
    }

    /// Load state from a JSON file.
    ///
    /// Never fails: a missing, unreadable or malformed file, or one whose
    /// `tweet_id` cannot be read as an integer, yields `None`.
    pub fn load(path: &Path) -> Option<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No state file");
            return None;
        }

        match Self::read(path) {
            Ok(state) => Some(state),
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Ignoring unusable state file"
                );
                None
            }
        }
    }

    fn read(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).context("Failed to read state file")?;
        let value: Value = serde_json::from_str(&content).context("State file is not JSON")?;

        let tweet_id = value
            .get("tweet_id")
            .and_then(coerce_id)
            .context("State file has no integer tweet_id")?;
        let tweet = value
            .get("tweet")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        Ok(Self { tweet_id, tweet })
    }

    /// Save state to a JSON file, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write state file {}", path.display()))?;
        Ok(())
    }
}

/// Read the last notified post ID, if any.
pub fn load_last_seen(path: &Path) -> Option<u64> {
    PersistedState::load(path).map(|state| state.tweet_id)
}

/// Accept integers, integer strings and finite floats (truncated).
fn coerce_id(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0 && *f < u64::MAX as f64)
                .map(|f| f.trunc() as u64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
