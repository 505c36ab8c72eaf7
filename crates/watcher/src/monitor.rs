//! Monitor loop - fetch, compare, notify, persist, sleep.

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use notify::{Notifier, NotifyEvent};

use crate::config::MonitorSettings;
use crate::reconcile::reconcile;
use crate::state::{load_last_seen, PersistedState};
use crate::twitter::{PostFetcher, SearchFilter};

/// Result of a single poll cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The search returned nothing.
    NoPost,
    /// The fetch itself failed; logged and skipped.
    FetchFailed,
    /// The newest post was already notified.
    Seen { id: u64 },
    /// A new post was notified and persisted.
    Notified { id: u64 },
}

/// Polls for the newest matching post and notifies once per new ID.
pub struct Monitor {
    settings: MonitorSettings,
    filter: SearchFilter,
    fetcher: Arc<dyn PostFetcher>,
    notifier: Notifier,
    last_seen: Option<u64>,
}

impl Monitor {
    /// Create a monitor, reading the last notified ID from the state file.
    #[must_use]
    pub fn new(
        settings: MonitorSettings,
        fetcher: Arc<dyn PostFetcher>,
        notifier: Notifier,
    ) -> Self {
        let last_seen = load_last_seen(&settings.state_file);
        tracing::info!(
            state = %settings.state_file.display(),
            last_seen = ?last_seen,
            "Loaded state"
        );

        Self {
            filter: settings.filter(),
            settings,
            fetcher,
            notifier,
            last_seen,
        }
    }

    /// ID of the last notified post, if any.
    #[must_use]
    pub fn last_seen(&self) -> Option<u64> {
        self.last_seen
    }

    /// Run a single poll cycle.
    ///
    /// Notification and state-write failures are returned; fetch failures
    /// are logged and reported as [`CycleOutcome::FetchFailed`].
    pub async fn poll_once(&mut self) -> Result<CycleOutcome> {
        let post = match self.fetcher.fetch_latest(&self.filter).await {
            Ok(Some(post)) => post,
            Ok(None) => {
                tracing::debug!("No matching posts");
                return Ok(CycleOutcome::NoPost);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Fetch failed");
                return Ok(CycleOutcome::FetchFailed);
            }
        };

        if !reconcile(self.last_seen, &post).is_new {
            tracing::debug!(id = post.id, "Latest post already notified");
            return Ok(CycleOutcome::Seen { id: post.id });
        }

        tracing::info!(
            id = post.id,
            username = %self.settings.username,
            "New post"
        );

        // Notify before persisting so the file never names an un-notified post.
        let event = NotifyEvent::new_post(&self.settings.username, post.id, &post.text);
        self.notifier
            .send(&event)
            .await
            .context("Failed to send notification")?;

        PersistedState::from_post(&post).save(&self.settings.state_file)?;
        self.last_seen = Some(post.id);

        Ok(CycleOutcome::Notified { id: post.id })
    }

    /// Run one poll cycle for one-shot use.
    ///
    /// Unlike [`Monitor::poll_once`], a failed fetch is an error here so the
    /// process exits non-zero.
    pub async fn run_once(&mut self) -> Result<CycleOutcome> {
        let outcome = self.poll_once().await?;
        match outcome {
            CycleOutcome::Notified { id } => tracing::info!(id, "Notified new post"),
            CycleOutcome::Seen { id } => tracing::info!(id, "No new post"),
            CycleOutcome::NoPost => tracing::info!("No matching posts"),
            CycleOutcome::FetchFailed => bail!("Fetch failed"),
        }
        Ok(outcome)
    }

    /// Poll forever, sleeping the configured interval between cycles.
    ///
    /// Returns only on a fatal error.
    pub async fn run(&mut self) -> Result<()> {
        let interval = self.settings.poll_interval();
        tracing::info!(
            username = %self.settings.username,
            query = %self.filter.to_query(),
            interval_secs = interval.as_secs(),
            notifications = self.notifier.has_channels(),
            "Starting monitor"
        );

        loop {
            let outcome = self.poll_once().await?;
            tracing::debug!(?outcome, "Poll cycle complete");
            tokio::time::sleep(interval).await;
        }
    }
}
