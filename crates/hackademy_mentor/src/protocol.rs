//! Protocol types for the mentor worker.

use serde::{Deserialize, Serialize};

/// Author of a chat message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Model,
    System,
}

/// One line of the player/mentor conversation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn model(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Model,
            content: content.into(),
        }
    }
}

/// Which request a reply answers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplyKind {
    Review,
    Chat,
}

/// Commands sent to the mentor worker.
///
/// `epoch` is the stage epoch at send time and is echoed back unchanged.
#[derive(Debug)]
pub enum MentorCmd {
    /// Short verdict on code that just solved its mission.
    Review {
        epoch: u64,
        code: String,
        mission: String,
    },
    /// Answer the latest player message given the conversation so far.
    Chat {
        epoch: u64,
        history: Vec<ChatMessage>,
        code: String,
        stage: String,
    },
}

/// Events produced by the mentor worker.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum MentorEvent {
    Reply {
        epoch: u64,
        kind: ReplyKind,
        text: String,
        /// `true` when `text` is a fixed placeholder standing in for a failed request.
        degraded: bool,
    },
}
