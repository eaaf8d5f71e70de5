//! User feedback payload.

use serde::{Deserialize, Serialize};

use crate::types::EventId;

/// Feedback a user filed against an already-captured event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserFeedback {
    /// The event this feedback refers to.
    pub event_id: EventId,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
}

impl UserFeedback {
    pub fn new(event_id: EventId) -> Self {
        Self {
            event_id,
            name: None,
            email: None,
            comments: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_comments(mut self, comments: impl Into<String>) -> Self {
        self.comments = Some(comments.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feedback_serializes_the_event_id() {
        let id = EventId::new();
        let feedback = UserFeedback::new(id).with_comments("it broke");
        let json = serde_json::to_value(&feedback).unwrap();
        assert_eq!(
            json.get("event_id").unwrap().as_str().unwrap(),
            id.to_string()
        );
        assert_eq!(json.get("comments").unwrap().as_str(), Some("it broke"));
        assert!(json.get("name").is_none());
    }
}
