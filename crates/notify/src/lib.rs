//! Push notifications for tweet-watch.
//!
//! # Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use notify::{Notifier, NotifyChannel, NotifyEvent, PushoverChannel};
//!
//! # async fn run() -> Result<(), notify::ChannelError> {
//! let pushover: Arc<dyn NotifyChannel> = Arc::new(PushoverChannel::new(
//!     std::env::var("PUSHOVER_TOKEN").ok(),
//!     std::env::var("PUSHOVER_USER").ok(),
//! ));
//! let notifier = Notifier::from_channels(vec![pushover]);
//!
//! // Deliver and wait; errors are returned to the caller
//! notifier
//!     .send(&NotifyEvent::new_post("brecordernews", 42, "hello"))
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! Channels without credentials are dropped by [`Notifier::from_channels`],
//! so a notifier built from empty configuration delivers nothing and never fails.
//!
//! # Architecture
//!
//! - [`NotifyChannel`] trait defines the interface for notification channels
//! - [`PushoverChannel`] implements the Pushover messages API
//! - [`Notifier`] dispatches events to all enabled channels, in order

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod channels;
pub mod error;
pub mod events;

pub use channels::pushover::PushoverChannel;
pub use channels::NotifyChannel;
pub use error::ChannelError;
pub use events::NotifyEvent;

use std::sync::Arc;
use tracing::{debug, info, warn};

/// Central notification dispatcher.
pub struct Notifier {
    channels: Vec<Arc<dyn NotifyChannel>>,
    disabled: bool,
}

impl Notifier {
    /// Create a notifier from candidate channels, keeping the enabled ones.
    #[must_use]
    pub fn from_channels(candidates: Vec<Arc<dyn NotifyChannel>>) -> Self {
        let channels: Vec<_> = candidates.into_iter().filter(|c| c.enabled()).collect();

        if channels.is_empty() {
            warn!("No notification channels configured");
        } else {
            info!(
                channel_count = channels.len(),
                "Notification system initialized"
            );
        }

        Self::with_channels(channels)
    }

    /// Create a notifier with specific channels.
    #[must_use]
    pub fn with_channels(channels: Vec<Arc<dyn NotifyChannel>>) -> Self {
        Self {
            channels,
            disabled: false,
        }
    }

    /// Create a disabled notifier (for testing or when notifications are off).
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            channels: vec![],
            disabled: true,
        }
    }

    /// Check if any notification channels are enabled.
    #[must_use]
    pub fn has_channels(&self) -> bool {
        !self.disabled && !self.channels.is_empty()
    }

    /// Send an event to every enabled channel and wait for delivery.
    ///
    /// Channels are tried in order; the first failure is returned and the
    /// remaining channels are not attempted.
    pub async fn send(&self, event: &NotifyEvent) -> Result<(), ChannelError> {
        if self.disabled {
            debug!("Notifications disabled, skipping event");
            return Ok(());
        }

        if self.channels.is_empty() {
            debug!("No channels configured, skipping event");
            return Ok(());
        }

        for channel in &self.channels {
            let channel_name = channel.name();

            if !channel.enabled() {
                debug!(channel = channel_name, "Channel disabled, skipping");
                continue;
            }

            channel.send(event).await?;
            debug!(channel = channel_name, "Notification sent");
        }

        Ok(())
    }
}
