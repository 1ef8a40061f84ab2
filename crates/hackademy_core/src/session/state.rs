//! Buffer, caret, focus, and popup state owned by the edit session.

use super::dismiss::DismissTimer;
use super::input::EditCommand;
use crate::autoclose::TagCompletion;
use crate::buffer::RopeBuffer;
use crate::layout::{AnchorProjector, PopupAnchor, ScrollOffset, ScrollSync};
use crate::suggest::suggest_tokens;
use crate::token::{self, is_token_char};
use crate::vocabulary::Vocabulary;
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// Whether the suggestion popup is showing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionMode {
    Idle,
    Suggesting,
}

/// Visible suggestion popup. `entries` is never empty while it exists.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SuggestionPopup {
    pub entries: Vec<String>,
    /// Index of the highlighted entry.
    pub active: usize,
    pub anchor: PopupAnchor,
}

impl SuggestionPopup {
    /// The highlighted entry.
    pub fn active_entry(&self) -> Option<&str> {
        self.entries.get(self.active).map(String::as_str)
    }
}

/// Mutable session state shared by the key interceptors.
///
/// The session is the only writer; vocabulary lookup, token location and
/// anchor projection only read from it.
pub struct SessionState {
    buffer: RopeBuffer,
    cursor: usize,
    preferred_column: Option<usize>,
    popup: Option<SuggestionPopup>,
    scroll: ScrollSync,
    has_focus: bool,
    dismiss: DismissTimer,
    dismiss_delay: Duration,
    vocabulary: Arc<Vocabulary>,
    projector: Box<dyn AnchorProjector>,
}

impl SessionState {
    pub(crate) fn new(
        text: &str,
        vocabulary: Arc<Vocabulary>,
        projector: Box<dyn AnchorProjector>,
        dismiss_delay: Duration,
    ) -> Self {
        let buffer = RopeBuffer::new(text);
        let cursor = buffer.len_chars();
        Self {
            buffer,
            cursor,
            preferred_column: None,
            popup: None,
            scroll: ScrollSync::default(),
            has_focus: true,
            dismiss: DismissTimer::default(),
            dismiss_delay,
            vocabulary,
            projector,
        }
    }

    pub fn buffer(&self) -> &RopeBuffer {
        &self.buffer
    }

    /// Caret position in chars, always `<= buffer().len_chars()`.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn popup(&self) -> Option<&SuggestionPopup> {
        self.popup.as_ref()
    }

    pub fn mode(&self) -> SessionMode {
        if self.popup.is_some() {
            SessionMode::Suggesting
        } else {
            SessionMode::Idle
        }
    }

    pub fn has_focus(&self) -> bool {
        self.has_focus
    }

    pub fn scroll(&self) -> ScrollSync {
        self.scroll
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn dismissal_pending(&self) -> bool {
        self.dismiss.is_pending()
    }

    /// Re-derive the popup from the partial word before the caret.
    pub fn refresh_suggestions(&mut self) {
        let entries = token::locate(&self.buffer, self.cursor)
            .map(|ctx| suggest_tokens(&ctx.word, &self.vocabulary))
            .unwrap_or_default();
        if entries.is_empty() {
            if self.popup.take().is_some() {
                debug!(cursor = self.cursor, "suggestions cleared");
            }
            return;
        }
        let anchor = self
            .projector
            .project(&self.buffer, self.cursor, self.scroll.input());
        debug!(
            cursor = self.cursor,
            count = entries.len(),
            top = anchor.top,
            left = anchor.left,
            "suggestions updated"
        );
        self.popup = Some(SuggestionPopup {
            entries,
            active: 0,
            anchor,
        });
    }

    /// Highlight the next entry, wrapping to the first.
    pub fn select_next(&mut self) -> bool {
        let Some(popup) = self.popup.as_mut() else {
            return false;
        };
        popup.active = (popup.active + 1) % popup.entries.len();
        true
    }

    /// Highlight the previous entry, wrapping to the last.
    pub fn select_previous(&mut self) -> bool {
        let Some(popup) = self.popup.as_mut() else {
            return false;
        };
        let len = popup.entries.len();
        popup.active = (popup.active + len - 1) % len;
        true
    }

    /// Hide the popup without touching the buffer.
    pub fn dismiss_popup(&mut self) -> bool {
        self.popup.take().is_some()
    }

    /// Commit the highlighted entry.
    pub fn commit_active(&mut self) -> bool {
        match self.popup.as_ref().map(|popup| popup.active) {
            Some(index) => self.commit(index),
            None => false,
        }
    }

    /// Complete the partial word before the caret with entry `index`.
    ///
    /// Inserts the part of the entry beyond the typed word's length at the
    /// caret and moves the caret past it. The popup closes and any pending
    /// focus-loss dismissal is cancelled, whether or not text was inserted.
    ///
    /// # Returns
    /// `true` when the buffer changed.
    pub fn commit(&mut self, index: usize) -> bool {
        let Some(popup) = self.popup.take() else {
            return false;
        };
        self.dismiss.cancel();
        let Some(entry) = popup.entries.get(index) else {
            return false;
        };
        let Some(ctx) = token::locate(&self.buffer, self.cursor) else {
            return false;
        };
        let suffix: String = entry.chars().skip(ctx.len_chars()).collect();
        debug!(entry = entry.as_str(), word = ctx.word.as_str(), "suggestion committed");
        self.insert_at_cursor(&suffix)
    }

    /// Apply an auto-close edit at the caret, then re-derive suggestions.
    pub fn apply_tag_completion(&mut self, completion: &TagCompletion) {
        let at = self.cursor;
        if self.buffer.insert_text(at, &completion.insert).is_some() {
            debug!(tag = completion.tag.as_str(), "closing tag inserted");
        }
        self.set_cursor(at + completion.cursor_advance);
        self.refresh_suggestions();
    }

    /// Move the caret, clamped to the buffer.
    pub(crate) fn set_cursor(&mut self, char_index: usize) {
        self.cursor = char_index.min(self.buffer.len_chars());
        self.preferred_column = None;
    }

    pub(crate) fn set_scroll(&mut self, offset: ScrollOffset) {
        self.scroll.sync(offset);
        if let Some(popup) = self.popup.as_mut() {
            popup.anchor = self.projector.project(&self.buffer, self.cursor, offset);
        }
    }

    pub(crate) fn reset(&mut self, text: &str) {
        self.buffer.reset(text);
        self.cursor = self.buffer.len_chars();
        self.preferred_column = None;
        self.popup = None;
        self.dismiss.cancel();
        self.scroll.sync(ScrollOffset::default());
    }

    pub(crate) fn focus_gained(&mut self) {
        self.has_focus = true;
        if self.dismiss.cancel() {
            debug!("focus regained; dismissal cancelled");
        }
    }

    pub(crate) fn focus_lost(&mut self, now: Instant) {
        self.has_focus = false;
        self.dismiss.schedule(now, self.dismiss_delay);
    }

    /// A pointer press on a suggestion keeps focus on the input.
    pub(crate) fn retain_focus(&mut self) {
        self.has_focus = true;
    }

    pub(crate) fn tick(&mut self, now: Instant) -> bool {
        if self.dismiss.fire_if_due(now) {
            debug!("dismissal fired");
            return self.dismiss_popup();
        }
        false
    }

    pub(crate) fn insert_at_cursor(&mut self, text: &str) -> bool {
        let at = self.cursor;
        match self.buffer.insert_text(at, text) {
            Some(delta) => {
                self.set_cursor(at + delta.inserted);
                true
            }
            None => false,
        }
    }

    /// Run a default editing command.
    ///
    /// # Returns
    /// `true` when the buffer changed.
    pub(crate) fn apply_edit(&mut self, command: EditCommand) -> bool {
        let len = self.buffer.len_chars();
        match command {
            EditCommand::Insert(text) => self.insert_at_cursor(&text),
            EditCommand::Backspace => {
                if self.cursor == 0 {
                    return false;
                }
                let at = self.cursor - 1;
                self.buffer.delete_char_range(at..self.cursor);
                self.set_cursor(at);
                true
            }
            EditCommand::DeleteForward => self
                .buffer
                .delete_char_range(self.cursor..self.cursor + 1)
                .is_some(),
            EditCommand::MoveLeft { word } => {
                let target = if word {
                    self.word_start_before(self.cursor)
                } else {
                    self.cursor.saturating_sub(1)
                };
                self.set_cursor(target);
                false
            }
            EditCommand::MoveRight { word } => {
                let target = if word {
                    self.word_end_after(self.cursor)
                } else {
                    (self.cursor + 1).min(len)
                };
                self.set_cursor(target);
                false
            }
            EditCommand::MoveUp => {
                self.move_vertical(false);
                false
            }
            EditCommand::MoveDown => {
                self.move_vertical(true);
                false
            }
            EditCommand::MoveHome => {
                let (line, _) = self.buffer.char_to_line_col(self.cursor);
                self.set_cursor(self.buffer.line_col_to_char(line, 0));
                false
            }
            EditCommand::MoveEnd => {
                let (line, _) = self.buffer.char_to_line_col(self.cursor);
                let end = self.buffer.line_len_chars(line);
                self.set_cursor(self.buffer.line_col_to_char(line, end));
                false
            }
        }
    }

    fn move_vertical(&mut self, down: bool) {
        let (line, column) = self.buffer.char_to_line_col(self.cursor);
        let preferred = self.preferred_column.unwrap_or(column);
        let target = if down {
            if line + 1 >= self.buffer.line_count() {
                self.buffer.len_chars()
            } else {
                self.buffer.line_col_to_char(line + 1, preferred)
            }
        } else if line == 0 {
            0
        } else {
            self.buffer.line_col_to_char(line - 1, preferred)
        };
        self.cursor = target;
        self.preferred_column = Some(preferred);
    }

    fn word_start_before(&self, from: usize) -> usize {
        let mut chars = self.buffer.rope().chars_at(from);
        let mut index = from;
        while let Some(ch) = chars.prev() {
            if is_token_char(ch) {
                chars.next();
                break;
            }
            index -= 1;
        }
        while let Some(ch) = chars.prev() {
            if !is_token_char(ch) {
                break;
            }
            index -= 1;
        }
        index
    }

    fn word_end_after(&self, from: usize) -> usize {
        let mut index = from;
        let mut in_word = false;
        for ch in self.buffer.rope().chars_at(from) {
            match (is_token_char(ch), in_word) {
                (true, _) => in_word = true,
                (false, true) => break,
                (false, false) => {}
            }
            index += 1;
        }
        index
    }
}
