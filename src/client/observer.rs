//! Callback interface for callers that consume answers as events.

use crate::error::LegalChatError;

/// Receives the outcome of [`LegalClient::chat_with_observer`](super::LegalClient::chat_with_observer).
pub trait ChatObserver {
    /// Answer text. Called once with the complete answer.
    fn on_text(&mut self, text: &str);

    /// Called after `on_text` when the answer was delivered.
    fn on_complete(&mut self) {}

    /// Called instead of `on_text`/`on_complete` when the request failed.
    fn on_error(&mut self, _error: LegalChatError) {}
}

/// Closure-backed observer.
pub struct FnObserver<T, C, E>
where
    T: FnMut(&str),
    C: FnMut(),
    E: FnMut(LegalChatError),
{
    pub on_text: T,
    pub on_complete: C,
    pub on_error: E,
}

impl<T, C, E> ChatObserver for FnObserver<T, C, E>
where
    T: FnMut(&str),
    C: FnMut(),
    E: FnMut(LegalChatError),
{
    fn on_text(&mut self, text: &str) {
        (self.on_text)(text)
    }

    fn on_complete(&mut self) {
        (self.on_complete)()
    }

    fn on_error(&mut self, error: LegalChatError) {
        (self.on_error)(error)
    }
}
