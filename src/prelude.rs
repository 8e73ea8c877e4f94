//! Convenience re-exports for common use.

pub use crate::client::{ChatObserver, LegalClient};
pub use crate::config::{AuthTransport, ClientConfig, ConfigureOptions};
pub use crate::error::{LegalChatError, Result};
pub use crate::history::build_conversation_history;
pub use crate::pipeline::{PipelineState, Stage, StageStatus};
pub use crate::session::ChatSession;
pub use crate::types::{
    ChatHistoryItem, ChatOptions, ChatRequest, Message, Role, Sender, UploadResponse,
};
