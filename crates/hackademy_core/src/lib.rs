//! Core library for Hackademy: the in-editor autocomplete engine, the tutorial
//! curriculum, and mission progress tracking.

/// Tag auto-closing on `>`.
pub mod autoclose;
/// Rope-backed text storage.
pub mod buffer;
/// Configuration loading and defaults.
pub mod config;
/// Shared constants.
pub mod constants;
/// Error types.
pub mod error;
/// Popup anchor projection from text-layout metrics.
pub mod layout;
/// Stage validation and review gating.
pub mod progress;
/// Keystroke-level edit session state machine.
pub mod session;
/// Tutorial stages and the built-in curriculum.
pub mod stage;
/// Ranked completion candidates.
pub mod suggest;
/// Partial-word detection before the cursor.
pub mod token;
/// Fixed table of completable tokens.
pub mod vocabulary;

pub use buffer::{BufferSnapshot, RopeBuffer};
pub use config::Config;
pub use constants::MAX_SUGGESTIONS;
pub use error::CoreError;
pub use layout::{AnchorProjector, EditorMetrics, MonospaceProjector, PopupAnchor, ScrollOffset};
pub use progress::{MissionProgress, ReviewRequest};
pub use session::{EditSession, EditorEvent, EditorFrame, Key, KeyInput, Modifiers, SessionMode};
pub use stage::{Curriculum, Stage, StageId, StageProvider};
pub use vocabulary::{TokenCategory, Vocabulary, VocabularyEntry};
