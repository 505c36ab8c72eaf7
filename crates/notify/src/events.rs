//! Notification event types.

use serde::{Deserialize, Serialize};

/// Events that can trigger notifications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NotifyEvent {
    /// A watched account published a post matching the filter
    NewPost {
        username: String,
        post_id: u64,
        text: String,
    },
}

impl NotifyEvent {
    /// Create a new-post event.
    #[must_use]
    pub fn new_post(username: impl Into<String>, post_id: u64, text: impl Into<String>) -> Self {
        Self::NewPost {
            username: username.into(),
            post_id,
            text: text.into(),
        }
    }

    /// Render the message body delivered to the user.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::NewPost { username, text, .. } => format!("@{username}: {text}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_post_message() {
        let event = NotifyEvent::new_post("acct", 42, "hello");
        assert_eq!(event.message(), "@acct: hello");
    }

    #[test]
    fn test_event_serializes_with_type_tag() {
        let event = NotifyEvent::new_post("acct", 7, "hi");
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "new_post");
        assert_eq!(json["post_id"], 7);
    }
}
