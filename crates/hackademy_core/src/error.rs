//! Error types for the editor engine, curriculum, and configuration.
//!
//! Ordinary editing never produces these: an empty token context, an unmatched
//! auto-close trigger, or an off-screen anchor are all normal outcomes.
use thiserror::Error;

/// Top-level error type for `hackademy_core`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Invalid vocabulary token {token:?}: {reason}")]
    InvalidToken { token: String, reason: &'static str },

    #[error("Unknown stage: {0}")]
    UnknownStage(String),

    #[error("Curriculum has no stages")]
    EmptyCurriculum,

    #[error("Invalid value for {key}: {value:?}")]
    InvalidConfig { key: String, value: String },
}
