//! Request and response bodies exchanged with the backend.

use serde::{Deserialize, Serialize};

use super::message::Sender;

/// Conversation role as the backend names it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl From<Sender> for Role {
    fn from(sender: Sender) -> Self {
        match sender {
            Sender::User => Role::User,
            Sender::Bot => Role::Assistant,
        }
    }
}

/// One history entry in a chat request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatHistoryItem {
    pub role: Role,
    pub content: String,
}

impl ChatHistoryItem {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Body of `POST /chat`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatRequest {
    pub query: String,
    pub file_path: Option<String>,
    pub history: Vec<ChatHistoryItem>,
}

/// Body returned by `POST /upload`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UploadResponse {
    pub file_path: String,
    pub message: String,
}

/// Per-call knobs for a chat request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatOptions {
    /// Number of most recent user turns to send; `None` or `Some(0)` sends all.
    pub history_turns: Option<usize>,
    /// Server-side path of a previously uploaded file.
    pub file_path: Option<String>,
}

impl ChatOptions {
    pub fn with_history_turns(mut self, turns: usize) -> Self {
        self.history_turns = Some(turns);
        self
    }

    pub fn with_file_path(mut self, path: impl Into<String>) -> Self {
        self.file_path = Some(path.into());
        self
    }
}
