//! Keystroke-level edit session controller.
//!
//! The session owns the buffer and is its only writer. Every event is handled
//! to completion: interceptors run first, then default editing, then the
//! suggestion popup is re-derived from the partial word before the caret.
//! The only deferred work is the focus-loss dismissal, which the host drives
//! by calling [`EditSession::tick`].

mod dismiss;
pub mod input;
pub mod intercept;
pub mod state;

pub use input::{Key, KeyInput, Modifiers};
pub use intercept::{default_chain, Interception, KeyInterceptor, PopupKeys, TagAutoCloser};
pub use state::{SessionMode, SessionState, SuggestionPopup};

use crate::buffer::BufferSnapshot;
use crate::config::Config;
use crate::layout::{AnchorProjector, MonospaceProjector, ScrollOffset};
use crate::vocabulary::Vocabulary;
use input::edit_command_for;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Input delivered by the host surface.
#[derive(Clone, Debug, PartialEq)]
pub enum EditorEvent {
    Key(KeyInput),
    /// Text committed outside key events (paste, IME).
    Text(String),
    /// Caret placed by pointer or selection change.
    SetCursor(usize),
    /// Input-surface scroll position.
    Scroll(ScrollOffset),
    FocusGained,
    FocusLost,
    /// Pointer press on popup entry `index`.
    PointerSelect(usize),
}

/// What handling one event did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EditOutcome {
    pub buffer_changed: bool,
    /// Interceptor that consumed the keystroke, if any.
    pub handled_by: Option<&'static str>,
}

/// Everything the host needs to render the editor.
#[derive(Clone, Debug, Serialize)]
pub struct EditorFrame {
    pub buffer: BufferSnapshot,
    pub revision: u64,
    pub cursor: usize,
    pub line_count: usize,
    pub mode: SessionMode,
    pub popup: Option<SuggestionPopup>,
    /// Scroll applied to the display surface (mirrors the input surface).
    pub scroll: ScrollOffset,
    pub focused: bool,
}

type BufferListener = Box<dyn FnMut(&BufferSnapshot) + Send>;

/// Autocompleting edit session over one buffer.
pub struct EditSession {
    state: SessionState,
    interceptors: Vec<Box<dyn KeyInterceptor>>,
    listener: Option<BufferListener>,
    trace_events: bool,
}

impl EditSession {
    /// Start a focused session on `initial`, caret at the end.
    pub fn new(initial: &str, vocabulary: Arc<Vocabulary>, config: &Config) -> Self {
        Self::with_projector(
            initial,
            vocabulary,
            config,
            Box::new(MonospaceProjector::new(config.metrics)),
        )
    }

    /// Start a session with a custom anchor projector.
    pub fn with_projector(
        initial: &str,
        vocabulary: Arc<Vocabulary>,
        config: &Config,
        projector: Box<dyn AnchorProjector>,
    ) -> Self {
        Self {
            state: SessionState::new(initial, vocabulary, projector, config.dismiss_delay),
            interceptors: default_chain(),
            listener: None,
            trace_events: config.trace_session,
        }
    }

    /// Replace the interceptor chain. Order is precedence.
    pub fn set_interceptors(&mut self, interceptors: Vec<Box<dyn KeyInterceptor>>) {
        self.interceptors = interceptors;
    }

    /// Register the callback invoked with every new buffer revision.
    pub fn on_buffer_change<F>(&mut self, listener: F)
    where
        F: FnMut(&BufferSnapshot) + Send + 'static,
    {
        self.listener = Some(Box::new(listener));
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Current buffer contents.
    pub fn snapshot(&self) -> BufferSnapshot {
        self.state.buffer().snapshot()
    }

    pub fn frame(&self) -> EditorFrame {
        let buffer = self.state.buffer().snapshot();
        EditorFrame {
            revision: buffer.revision(),
            line_count: buffer.line_count(),
            buffer,
            cursor: self.state.cursor(),
            mode: self.state.mode(),
            popup: self.state.popup().cloned(),
            scroll: self.state.scroll().display(),
            focused: self.state.has_focus(),
        }
    }

    /// Load a new stage's snippet, dropping all ephemeral popup state.
    pub fn reset(&mut self, initial: &str) {
        self.state.reset(initial);
        info!(chars = self.state.buffer().len_chars(), "session reset");
        self.notify();
    }

    /// Handle one host event.
    ///
    /// Key and text input is ignored while the surface is unfocused.
    pub fn handle(&mut self, event: EditorEvent, now: Instant) -> EditOutcome {
        let revision = self.state.buffer().revision();
        let mut handled_by = None;
        match event {
            EditorEvent::Key(input) => {
                if self.state.has_focus() {
                    handled_by = self.dispatch_key(&input);
                }
            }
            EditorEvent::Text(text) => {
                if self.state.has_focus() {
                    handled_by = self.dispatch_text(&text);
                }
            }
            EditorEvent::SetCursor(index) => {
                self.state.set_cursor(index);
                self.state.refresh_suggestions();
            }
            EditorEvent::Scroll(offset) => self.state.set_scroll(offset),
            EditorEvent::FocusGained => self.state.focus_gained(),
            EditorEvent::FocusLost => self.state.focus_lost(now),
            EditorEvent::PointerSelect(index) => {
                // Pressing an entry must not let the input lose focus.
                self.state.retain_focus();
                self.state.commit(index);
            }
        }
        let outcome = EditOutcome {
            buffer_changed: self.state.buffer().revision() != revision,
            handled_by,
        };
        if self.trace_events {
            info!(
                revision = self.state.buffer().revision(),
                cursor = self.state.cursor(),
                mode = ?self.state.mode(),
                handled_by = ?outcome.handled_by,
                "editor event"
            );
        }
        if outcome.buffer_changed {
            self.notify();
        }
        outcome
    }

    /// Shorthand for a key event.
    pub fn handle_key(&mut self, input: KeyInput, now: Instant) -> EditOutcome {
        self.handle(EditorEvent::Key(input), now)
    }

    /// Fire the focus-loss dismissal if it is due.
    ///
    /// # Returns
    /// `true` when the popup was hidden by this tick.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.state.tick(now)
    }

    fn dispatch_key(&mut self, input: &KeyInput) -> Option<&'static str> {
        for interceptor in &self.interceptors {
            if interceptor.intercept(&mut self.state, input) == Interception::Handled {
                debug!(interceptor = interceptor.name(), key = ?input.key, "key intercepted");
                return Some(interceptor.name());
            }
        }
        if let Some(command) = edit_command_for(input) {
            self.state.apply_edit(command);
            self.state.refresh_suggestions();
        }
        None
    }

    fn dispatch_text(&mut self, text: &str) -> Option<&'static str> {
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (None, _) => None,
            (Some(ch), None) if !ch.is_control() => {
                self.dispatch_key(&KeyInput::plain(Key::Char(ch)))
            }
            _ => {
                self.state.insert_at_cursor(text);
                self.state.refresh_suggestions();
                None
            }
        }
    }

    fn notify(&mut self) {
        if let Some(listener) = self.listener.as_mut() {
            listener(&self.state.buffer().snapshot());
        }
    }
}

#[cfg(test)]
mod tests;
