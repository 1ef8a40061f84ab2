//! Root crate facade for the Hackademy editor engine and mentor service.

pub use hackademy_core::{
    autoclose, buffer, config, constants, error, layout, progress, session, stage, suggest, token,
    vocabulary, AnchorProjector, BufferSnapshot, Config, CoreError, Curriculum, EditSession,
    EditorEvent, EditorFrame, EditorMetrics, Key, KeyInput, MissionProgress, Modifiers,
    MonospaceProjector, PopupAnchor, ReviewRequest, RopeBuffer, ScrollOffset, SessionMode, Stage,
    StageId, StageProvider, TokenCategory, Vocabulary, VocabularyEntry, MAX_SUGGESTIONS,
};

/// AI mentor reviews and hint chat.
pub use hackademy_mentor as mentor;
