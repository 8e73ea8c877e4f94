//! legalchat: client for the legal-assistant chat backend.
//!
//! Builds bounded conversation histories, uploads contracts and asks
//! questions over the backend's `/upload` and `/chat` endpoints.
//!
//! # Quick Start
//!
//! ```no_run
//! use legalchat::prelude::*;
//!
//! # async fn example() -> legalchat::error::Result<()> {
//! let client = LegalClient::from_env();
//! let uploaded = client.upload_path("contract.docx").await?;
//! let options = ChatOptions::default()
//!     .with_file_path(uploaded.file_path)
//!     .with_history_turns(3);
//! let answer = client.chat("Is the termination clause valid?", &[], &options).await?;
//! println!("{answer}");
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod history;
pub mod pipeline;
pub mod prelude;
pub mod session;
pub mod types;

#[cfg(feature = "cli")]
pub mod cli;
