//! Chat session: transcript, uploaded-file reference and pipeline display.

use std::path::Path;

use tracing::debug;

use crate::client::LegalClient;
use crate::error::Result;
use crate::pipeline::PipelineState;
use crate::types::{ChatOptions, Message, UploadResponse};

/// First bot message of every session.
pub const GREETING: &str = "**Hello!** I am your legal assistant. I can look up, compare and \
build compliance checklists from banking and corporate regulations.\n\n\
Upload a contract to ask questions about it, or try:\n\n\
* `How do I register a limited liability company?`\n\
* `What are the latest VAT rules?`";

/// Owns the message store and drives [`LegalClient`] the way the chat UI does.
#[derive(Debug)]
pub struct ChatSession {
    client: LegalClient,
    messages: Vec<Message>,
    current_file_path: Option<String>,
    pipeline: PipelineState,
    history_turns: Option<usize>,
    status_line: String,
}

impl ChatSession {
    pub fn new(client: LegalClient) -> Self {
        Self {
            client,
            messages: vec![Message::bot(GREETING)],
            current_file_path: None,
            pipeline: PipelineState::default(),
            history_turns: None,
            status_line: String::new(),
        }
    }

    /// Limit the history sent with each question to the newest `turns` user turns.
    pub fn with_history_turns(mut self, turns: Option<usize>) -> Self {
        self.history_turns = turns;
        self
    }

    pub fn client(&self) -> &LegalClient {
        &self.client
    }

    pub fn client_mut(&mut self) -> &mut LegalClient {
        &mut self.client
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn pipeline(&self) -> &PipelineState {
        &self.pipeline
    }

    pub fn current_file_path(&self) -> Option<&str> {
        self.current_file_path.as_deref()
    }

    /// Attach a file that is already on the server.
    pub fn set_current_file_path(&mut self, path: Option<String>) {
        self.current_file_path = path;
    }

    pub fn status_line(&self) -> &str {
        &self.status_line
    }

    /// Upload a file and make it the context for following questions.
    ///
    /// On failure the previous file reference is kept.
    pub async fn upload_path(&mut self, path: impl AsRef<Path>) -> Result<UploadResponse> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        self.status_line = format!("Uploading {name}...");

        match self.client.upload_path(path).await {
            Ok(response) => {
                self.current_file_path = Some(response.file_path.clone());
                self.status_line = format!("Ready to analyse {name}");
                Ok(response)
            }
            Err(e) => {
                self.status_line = format!("Upload of {name} failed");
                Err(e)
            }
        }
    }

    /// Ask a question.
    ///
    /// Blank input is ignored and yields `Ok(None)`. Otherwise the user
    /// message and a loading placeholder are appended, and the placeholder is
    /// replaced by the answer or by an error notice once the call returns.
    /// The history sent covers the messages before this question.
    pub async fn send(&mut self, query: &str) -> Result<Option<String>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(None);
        }

        let prior_len = self.messages.len();
        self.messages.push(Message::user(query));
        let placeholder = Message::loading_placeholder();
        let placeholder_id = placeholder.id.clone();
        self.messages.push(placeholder);

        self.pipeline.begin_request();
        self.status_line = "Sending request to the legal engine...".to_string();

        let options = ChatOptions {
            history_turns: self.history_turns,
            file_path: self.current_file_path.clone(),
        };
        let result = self
            .client
            .chat(query, &self.messages[..prior_len], &options)
            .await;

        let content = match &result {
            Ok(text) => {
                self.pipeline.complete();
                self.status_line = "Answered.".to_string();
                text.clone()
            }
            Err(e) => {
                debug!(error = %e, "chat failed");
                self.pipeline.fail(e.to_string());
                self.status_line = "Request failed.".to_string();
                format!("Connection error: {e}")
            }
        };

        if let Some(slot) = self
            .messages
            .iter_mut()
            .find(|m| m.id == placeholder_id)
        {
            slot.content = content;
            slot.is_loading = false;
        }

        result.map(Some)
    }

    /// Reset to a fresh transcript and forget the uploaded file.
    pub fn clear(&mut self) {
        self.messages = vec![Message::bot(GREETING)];
        self.current_file_path = None;
        self.pipeline = PipelineState::default();
        self.status_line.clear();
    }
}
