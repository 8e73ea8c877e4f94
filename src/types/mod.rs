//! Core types for legalchat.

pub mod message;
pub mod wire;

pub use message::*;
pub use wire::*;
