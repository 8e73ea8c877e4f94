//! CLI entry point for legalchat.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::{AuthTransport, ClientConfig, ConfigureOptions};

/// Legal assistant chat CLI
#[derive(Parser, Debug)]
#[command(name = "legalchat", version, about = "Chat with the legal-assistant backend")]
pub struct Cli {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Overrides layered on top of the environment configuration.
#[derive(Args, Debug, Default)]
pub struct ConnectionArgs {
    /// Backend base URL (default: $LEGALCHAT_BASE_URL or http://localhost:8000)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Shared-secret API key
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Where to send the API key: header or query
    #[arg(long, global = true)]
    pub transport: Option<AuthTransport>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,
}

impl ConnectionArgs {
    /// Apply these overrides to `base`.
    pub fn apply(&self, base: ClientConfig) -> ClientConfig {
        base.merged(ConfigureOptions {
            base_url: self.base_url.clone(),
            key: self.api_key.clone().map(Some),
            transport: self.transport,
            timeout: self
                .timeout_secs
                .filter(|s| *s > 0)
                .map(std::time::Duration::from_secs),
        })
    }
}

/// Top-level CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check whether the backend is reachable
    Health,
    /// Upload a contract for later questions
    Upload(UploadArgs),
    /// Ask questions (interactive when no prompt is given)
    Chat(ChatArgs),
}

/// Arguments for `legalchat upload`.
#[derive(Parser, Debug)]
pub struct UploadArgs {
    /// File to upload (.docx, .pdf, .txt)
    pub path: PathBuf,
}

/// Arguments for the `chat` subcommand.
#[derive(Parser, Debug)]
pub struct ChatArgs {
    /// Server-side path of a previously uploaded file
    #[arg(long, conflicts_with = "upload")]
    pub file_path: Option<String>,

    /// Upload this file first and ask about it
    #[arg(long)]
    pub upload: Option<PathBuf>,

    /// Number of recent user turns sent as history (0 = all)
    #[arg(long)]
    pub history_turns: Option<usize>,

    /// Question (positional)
    pub prompt: Option<String>,
}

/// Interactive-mode commands typed at the prompt.
#[derive(Debug, PartialEq, Eq)]
pub enum ReplInput<'a> {
    Quit,
    Clear,
    Upload(&'a str),
    Ask(&'a str),
    Empty,
}

/// Classify one line of interactive input.
pub fn parse_repl_line(line: &str) -> ReplInput<'_> {
    let line = line.trim();
    if line.is_empty() {
        return ReplInput::Empty;
    }
    match line {
        "/quit" | "/exit" => ReplInput::Quit,
        "/clear" => ReplInput::Clear,
        _ => match line.strip_prefix("/upload ") {
            Some(path) if !path.trim().is_empty() => ReplInput::Upload(path.trim()),
            _ => ReplInput::Ask(line),
        },
    }
}
