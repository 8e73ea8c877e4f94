//! HTTP client for the legal-assistant backend.
//!
//! One [`LegalClient`] owns its [`ClientConfig`] and a lazily built
//! transport. Reconfiguring swaps the config value and drops the cached
//! transport, so the next request is issued against the new settings.

pub mod http;
pub mod observer;

pub use observer::{ChatObserver, FnObserver};

use std::path::Path;
use std::sync::OnceLock;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::{apply_auth, AuthTransport, ClientConfig, ConfigureOptions};
use crate::error::{LegalChatError, Result};
use crate::history::build_conversation_history;
use crate::types::{ChatOptions, ChatRequest, Message, UploadResponse};

use self::http::{build_file_multipart, build_http_client, ensure_success, mime_for_file_name};

const UPLOAD_PATH: &str = "/upload";
const CHAT_PATH: &str = "/chat";
const HEALTH_PATH: &str = "/";
const UPLOAD_FIELD: &str = "file";

/// Client for the `/`, `/upload` and `/chat` endpoints.
#[derive(Debug, Default)]
pub struct LegalClient {
    config: ClientConfig,
    http: OnceLock<reqwest::Client>,
}

impl LegalClient {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            http: OnceLock::new(),
        }
    }

    /// Create a client configured from the environment.
    pub fn from_env() -> Self {
        Self::new(ClientConfig::from_env())
    }

    /// Current configuration. Never touches the network.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Merge `options` into the configuration and drop the cached transport.
    pub fn configure(&mut self, options: ConfigureOptions) {
        self.replace_config(self.config.merged(options));
    }

    pub fn set_api_key(&mut self, key: impl Into<String>, transport: AuthTransport) {
        self.configure(ConfigureOptions {
            key: Some(Some(key.into())),
            transport: Some(transport),
            ..Default::default()
        });
    }

    pub fn set_base_url(&mut self, url: impl Into<String>) {
        self.configure(ConfigureOptions {
            base_url: Some(url.into()),
            ..Default::default()
        });
    }

    /// Swap in a whole new configuration.
    pub fn replace_config(&mut self, config: ClientConfig) {
        self.config = config;
        self.http = OnceLock::new();
    }

    fn http(&self) -> Result<&reqwest::Client> {
        if let Some(client) = self.http.get() {
            return Ok(client);
        }
        let client = build_http_client(self.config.timeout())?;
        Ok(self.http.get_or_init(|| client))
    }

    fn post(&self, path: &str) -> Result<reqwest::RequestBuilder> {
        let request = self.http()?.post(self.config.endpoint(path));
        Ok(apply_auth(request, self.config.api_key(), self.config.transport()))
    }

    /// Check `GET /`. Any 2xx counts as reachable; failures are logged only.
    pub async fn check_health(&self) -> bool {
        let url = self.config.endpoint(HEALTH_PATH);
        let result = async {
            let request = apply_auth(
                self.http()?.get(&url),
                self.config.api_key(),
                self.config.transport(),
            );
            ensure_success(request.send().await?).await
        }
        .await;

        match result {
            Ok(_) => {
                debug!(url = %url, "backend reachable");
                true
            }
            Err(e) => {
                warn!(url = %url, error = %e, "backend unreachable");
                false
            }
        }
    }

    /// Upload one file as multipart field `file` to `/upload`.
    ///
    /// `mime_type` defaults to a guess from the file name's extension.
    pub async fn upload_file(
        &self,
        file_name: &str,
        data: &[u8],
        mime_type: Option<&str>,
    ) -> Result<UploadResponse> {
        if file_name.trim().is_empty() {
            return Err(LegalChatError::InvalidArgument(
                "upload file name must not be empty".to_string(),
            ));
        }
        let mime_type = mime_type.unwrap_or_else(|| mime_for_file_name(file_name));
        let boundary = format!("legalchat-{}", Uuid::new_v4().simple());
        let body = build_file_multipart(&boundary, UPLOAD_FIELD, file_name, mime_type, data);

        debug!(file_name, bytes = data.len(), "upload");

        let response = self
            .post(UPLOAD_PATH)?
            .header(
                CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(body)
            .send()
            .await?;

        let response = ensure_success(response).await?;
        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Read a file from disk and upload it under its own file name.
    pub async fn upload_path(&self, path: impl AsRef<Path>) -> Result<UploadResponse> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| {
                LegalChatError::InvalidArgument(format!("{} has no file name", path.display()))
            })?;
        let data = tokio::fs::read(path).await?;
        self.upload_file(&file_name, &data, None).await
    }

    /// Build the JSON body for a chat call.
    pub fn build_chat_request(
        &self,
        query: &str,
        messages: &[Message],
        options: &ChatOptions,
    ) -> ChatRequest {
        ChatRequest {
            query: query.to_string(),
            file_path: options.file_path.clone(),
            history: build_conversation_history(messages, options.history_turns),
        }
    }

    /// Ask the backend a question and return its full plain-text answer.
    pub async fn chat(
        &self,
        query: &str,
        messages: &[Message],
        options: &ChatOptions,
    ) -> Result<String> {
        let payload = self.build_chat_request(query, messages, options);

        debug!(
            history = payload.history.len(),
            has_file = payload.file_path.is_some(),
            "chat"
        );

        let response = self
            .post(CHAT_PATH)?
            .header(ACCEPT, "text/plain")
            .json(&payload)
            .send()
            .await?;

        let response = ensure_success(response).await?;
        Ok(response.text().await?)
    }

    /// Like [`chat`](Self::chat), abandoned with `Cancelled` once `cancel` fires.
    pub async fn chat_with_cancel(
        &self,
        query: &str,
        messages: &[Message],
        options: &ChatOptions,
        cancel: &CancellationToken,
    ) -> Result<String> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!("chat cancelled");
                Err(LegalChatError::Cancelled)
            }
            result = self.chat(query, messages, options) => result,
        }
    }

    /// Deliver a chat answer through callbacks.
    ///
    /// The backend answers in one piece, so `on_text` receives the whole text
    /// once. Exactly one of `on_complete` or `on_error` follows.
    pub async fn chat_with_observer<O: ChatObserver + ?Sized>(
        &self,
        query: &str,
        messages: &[Message],
        options: &ChatOptions,
        observer: &mut O,
    ) {
        match self.chat(query, messages, options).await {
            Ok(text) => {
                observer.on_text(&text);
                observer.on_complete();
            }
            Err(e) => observer.on_error(e),
        }
    }
}
