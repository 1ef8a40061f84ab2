//! AI mentor service: code reviews for solved missions and hint chat.
//!
//! Calls block, so they run on a dedicated worker thread that the host talks
//! to over channels. Replies carry the stage epoch of their request so the
//! host can drop feedback that arrives after the player moved on.

/// Blocking model clients.
pub mod client;
/// Endpoint configuration.
pub mod config;
/// Error types.
pub mod error;
/// Prompt text and fallback replies.
pub mod prompt;
/// Worker command/event types.
pub mod protocol;
mod worker;

pub use client::{GeminiClient, MentorClient};
pub use config::MentorConfig;
pub use error::MentorError;
pub use protocol::{ChatMessage, ChatRole, MentorCmd, MentorEvent, ReplyKind};
pub use worker::{spawn_mentor, MentorHandle};
