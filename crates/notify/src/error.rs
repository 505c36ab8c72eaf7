//! Error types for the notification system.

use thiserror::Error;

/// Errors that can occur when sending notifications.
#[derive(Debug, Error)]
pub enum ChannelError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status
    #[error("{channel} rejected the message with status {status}: {body}")]
    Status {
        channel: &'static str,
        status: u16,
        body: String,
    },

    /// Rate limited by the service
    #[error("Rate limited by {channel}")]
    RateLimited { channel: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_names_channel_and_body() {
        let err = ChannelError::Status {
            channel: "pushover",
            status: 400,
            body: "application token is invalid".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "pushover rejected the message with status 400: application token is invalid"
        );
    }

    #[test]
    fn test_rate_limited_names_channel() {
        let err = ChannelError::RateLimited { channel: "pushover" };
        assert_eq!(err.to_string(), "Rate limited by pushover");
    }
}
