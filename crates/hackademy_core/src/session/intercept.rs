//! Ordered keystroke interceptors.
//!
//! Each interceptor either consumes a keystroke or passes it on; whatever
//! reaches the end of the chain gets default editing. The default chain is
//! popup navigation first, then tag auto-closing.

use super::input::{Key, KeyInput};
use super::state::SessionState;
use crate::autoclose;

/// Result of offering a keystroke to an interceptor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Interception {
    /// Consumed; later interceptors and default editing are skipped.
    Handled,
    PassThrough,
}

/// A keystroke handler that runs ahead of default editing.
pub trait KeyInterceptor: Send {
    /// Short label used in logs and [`super::EditOutcome`].
    fn name(&self) -> &'static str;

    fn intercept(&self, state: &mut SessionState, input: &KeyInput) -> Interception;
}

/// Arrow navigation, commit, and cancel while the popup is open.
#[derive(Clone, Copy, Debug, Default)]
pub struct PopupKeys;

impl KeyInterceptor for PopupKeys {
    fn name(&self) -> &'static str {
        "popup"
    }

    fn intercept(&self, state: &mut SessionState, input: &KeyInput) -> Interception {
        if state.popup().is_none() || input.modifiers.is_shortcut() {
            return Interception::PassThrough;
        }
        match input.key {
            Key::ArrowDown => {
                state.select_next();
            }
            Key::ArrowUp => {
                state.select_previous();
            }
            Key::Enter | Key::Tab => {
                state.commit_active();
            }
            Key::Escape => {
                state.dismiss_popup();
            }
            _ => return Interception::PassThrough,
        }
        Interception::Handled
    }
}

/// Inserts `</tag>` after a `>` that completes an opening tag name.
#[derive(Clone, Copy, Debug, Default)]
pub struct TagAutoCloser;

impl KeyInterceptor for TagAutoCloser {
    fn name(&self) -> &'static str {
        "autoclose"
    }

    fn intercept(&self, state: &mut SessionState, input: &KeyInput) -> Interception {
        let Some(typed) = input.typed_char() else {
            return Interception::PassThrough;
        };
        match autoclose::complete_tag(state.buffer(), state.cursor(), typed) {
            Some(completion) => {
                state.apply_tag_completion(&completion);
                Interception::Handled
            }
            None => Interception::PassThrough,
        }
    }
}

/// Popup keys, then auto-closing.
pub fn default_chain() -> Vec<Box<dyn KeyInterceptor>> {
    vec![Box::new(PopupKeys), Box::new(TagAutoCloser)]
}
