//! Tests for environment-driven configuration.

use std::sync::{Mutex, OnceLock};
use std::time::Duration;

use legalchat::client::LegalClient;
use legalchat::config::{AuthTransport, ClientConfig, ConfigureOptions, DEFAULT_BASE_URL};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

const CONFIG_ENV_VARS: [&str; 4] = [
    "LEGALCHAT_BASE_URL",
    "LEGALCHAT_API_KEY",
    "LEGALCHAT_API_KEY_TRANSPORT",
    "LEGALCHAT_TIMEOUT_SECS",
];

struct EnvGuard {
    saved: Vec<(String, Option<String>)>,
}

impl EnvGuard {
    fn capture(keys: &[&str]) -> Self {
        let saved = keys
            .iter()
            .map(|key| ((*key).to_string(), std::env::var(key).ok()))
            .collect();
        Self { saved }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, value) in &self.saved {
            match value {
                Some(v) => std::env::set_var(key, v),
                None => std::env::remove_var(key),
            }
        }
    }
}

fn env_lock_guard() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn clean_env() -> (std::sync::MutexGuard<'static, ()>, EnvGuard) {
    let lock = env_lock_guard();
    let guard = EnvGuard::capture(&CONFIG_ENV_VARS);
    for key in CONFIG_ENV_VARS {
        std::env::remove_var(key);
    }
    (lock, guard)
}

#[test]
fn from_env_without_variables_uses_defaults() {
    let _env = clean_env();

    let config = ClientConfig::from_env();
    assert_eq!(config.base_url(), DEFAULT_BASE_URL);
    assert_eq!(config.api_key(), None);
    assert_eq!(config.transport(), AuthTransport::Header);
}

#[test]
fn from_env_reads_all_variables() {
    let _env = clean_env();
    std::env::set_var("LEGALCHAT_BASE_URL", "http://legal.internal:9000/");
    std::env::set_var("LEGALCHAT_API_KEY", "k-123");
    std::env::set_var("LEGALCHAT_API_KEY_TRANSPORT", "Query");
    std::env::set_var("LEGALCHAT_TIMEOUT_SECS", "5");

    let config = ClientConfig::from_env();
    assert_eq!(config.base_url(), "http://legal.internal:9000");
    assert_eq!(config.api_key(), Some("k-123"));
    assert_eq!(config.transport(), AuthTransport::Query);
    assert_eq!(config.timeout(), Duration::from_secs(5));
}

#[test]
fn from_env_ignores_invalid_values() {
    let _env = clean_env();
    std::env::set_var("LEGALCHAT_API_KEY_TRANSPORT", "cookie");
    std::env::set_var("LEGALCHAT_TIMEOUT_SECS", "soon");
    std::env::set_var("LEGALCHAT_API_KEY", "");

    let config = ClientConfig::from_env();
    assert_eq!(config.transport(), AuthTransport::Header);
    assert_eq!(config.timeout(), Duration::from_secs(30));
    assert_eq!(config.api_key(), None);
}

#[test]
fn configure_replaces_only_given_fields() {
    let mut client = LegalClient::new(ClientConfig::new("http://a:1"));
    client.set_api_key("k", AuthTransport::Query);
    client.configure(ConfigureOptions {
        base_url: Some("http://b:2/".to_string()),
        ..Default::default()
    });

    let config = client.config();
    assert_eq!(config.base_url(), "http://b:2");
    assert_eq!(config.api_key(), Some("k"));
    assert_eq!(config.transport(), AuthTransport::Query);
}

#[test]
fn separate_clients_do_not_share_configuration() {
    let mut first = LegalClient::default();
    let second = LegalClient::default();
    first.set_base_url("http://elsewhere:1");

    assert_eq!(first.config().base_url(), "http://elsewhere:1");
    assert_eq!(second.config().base_url(), DEFAULT_BASE_URL);
}
