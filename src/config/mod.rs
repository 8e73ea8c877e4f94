//! Client configuration (layered: code > env > defaults).

pub mod auth;

pub use auth::{apply_auth, AuthTransport, API_KEY_FIELD};

use std::fmt;
use std::time::Duration;

/// Backend address used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Request timeout used when nothing else is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const ENV_BASE_URL: &str = "LEGALCHAT_BASE_URL";
const ENV_API_KEY: &str = "LEGALCHAT_API_KEY";
const ENV_TRANSPORT: &str = "LEGALCHAT_API_KEY_TRANSPORT";
const ENV_TIMEOUT_SECS: &str = "LEGALCHAT_TIMEOUT_SECS";

/// Settings for talking to the backend.
///
/// Values are replaced wholesale: every change produces a new `ClientConfig`
/// (see [`ClientConfig::merged`]) rather than mutating one in place.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
    api_key: Option<String>,
    transport: AuthTransport,
    timeout: Duration,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| ".."))
            .field("transport", &self.transport)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            transport: AuthTransport::Header,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// A partial update for [`ClientConfig`]. Absent fields keep their value.
#[derive(Debug, Clone, Default)]
pub struct ConfigureOptions {
    pub base_url: Option<String>,
    /// `Some(None)` clears the key; `None` leaves it alone.
    pub key: Option<Option<String>>,
    pub transport: Option<AuthTransport>,
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::default().with_base_url(base_url)
    }

    /// Load from environment variables, reading `.env` first if present.
    ///
    /// Unparseable values are logged and skipped so a bad variable never
    /// prevents startup.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error
        let mut options = ConfigureOptions::default();

        if let Ok(url) = std::env::var(ENV_BASE_URL) {
            if !url.trim().is_empty() {
                options.base_url = Some(url);
            }
        }
        if let Ok(key) = std::env::var(ENV_API_KEY) {
            if !key.is_empty() {
                options.key = Some(Some(key));
            }
        }
        if let Ok(raw) = std::env::var(ENV_TRANSPORT) {
            match raw.trim().parse::<AuthTransport>() {
                Ok(transport) => options.transport = Some(transport),
                Err(_) => tracing::warn!(value = %raw, "ignoring unknown {ENV_TRANSPORT}"),
            }
        }
        if let Ok(raw) = std::env::var(ENV_TIMEOUT_SECS) {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => options.timeout = Some(Duration::from_secs(secs)),
                _ => tracing::warn!(value = %raw, "ignoring invalid {ENV_TIMEOUT_SECS}"),
            }
        }

        Self::default().merged(options)
    }

    /// Return a copy with every field present in `options` replaced.
    ///
    /// A blank `base_url` counts as absent and keeps the current URL.
    pub fn merged(&self, options: ConfigureOptions) -> Self {
        let mut next = self.clone();
        if let Some(url) = options.base_url.filter(|u| !u.trim().is_empty()) {
            next.base_url = normalize_base_url(&url);
        }
        if let Some(key) = options.key {
            next.api_key = key;
        }
        if let Some(transport) = options.transport {
            next.transport = transport;
        }
        if let Some(timeout) = options.timeout {
            next.timeout = timeout;
        }
        next
    }

    pub fn with_base_url(self, url: impl Into<String>) -> Self {
        self.merged(ConfigureOptions {
            base_url: Some(url.into()),
            ..Default::default()
        })
    }

    pub fn with_api_key(self, key: impl Into<String>, transport: AuthTransport) -> Self {
        self.merged(ConfigureOptions {
            key: Some(Some(key.into())),
            transport: Some(transport),
            ..Default::default()
        })
    }

    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.merged(ConfigureOptions {
            timeout: Some(timeout),
            ..Default::default()
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    pub fn transport(&self) -> AuthTransport {
        self.transport
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Join an endpoint path onto the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

fn normalize_base_url(url: &str) -> String {
    url.strip_suffix('/').unwrap_or(url).to_string()
}
