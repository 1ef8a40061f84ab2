//! Mentor service errors.
//!
//! None of these reach the player: the worker turns each into a fixed
//! placeholder reply.
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MentorError {
    #[error("Mentor API key is not configured")]
    MissingApiKey,

    #[error("Mentor request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Mentor API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Mentor reply contained no text")]
    EmptyReply,
}
