//! UI-side chat messages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Markup the UI embeds in a bot placeholder while an answer is pending.
pub const LOADING_MARKER: &str = "fa-spinner";

/// Text shown in the placeholder bubble while the backend works.
pub const LOADING_TEXT: &str =
    "<i class=\"fas fa-spinner fa-spin\"></i> Running the legal agents (retriever, applicability, citation)...";

/// Who authored a message.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// A message in the chat transcript.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub sender: Sender,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_loading: bool,
}

impl Message {
    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            id: Some(format!("user-{}", Uuid::new_v4().simple())),
            sender: Sender::User,
            content: content.into(),
            timestamp: Some(Utc::now()),
            is_loading: false,
        }
    }

    /// Create a bot message.
    pub fn bot(content: impl Into<String>) -> Self {
        Self {
            id: Some(format!("bot-{}", Uuid::new_v4().simple())),
            sender: Sender::Bot,
            content: content.into(),
            timestamp: Some(Utc::now()),
            is_loading: false,
        }
    }

    /// Create the transient bot entry shown while a reply is pending.
    pub fn loading_placeholder() -> Self {
        Self {
            is_loading: true,
            ..Self::bot(LOADING_TEXT)
        }
    }

    /// Whether this entry must be kept out of any payload sent upstream.
    pub fn is_placeholder(&self) -> bool {
        self.is_loading || self.content.contains(LOADING_MARKER)
    }
}
