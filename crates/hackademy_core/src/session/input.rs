//! Host key events and the default-editing commands they reduce to.

/// Key identity as reported by the host surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Home,
    End,
    Enter,
    Tab,
    Escape,
    Backspace,
    Delete,
    Char(char),
}

/// Modifier state held while a key was pressed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub command: bool,
}

impl Modifiers {
    /// True when the chord is a shortcut rather than text entry.
    pub fn is_shortcut(&self) -> bool {
        self.ctrl || self.alt || self.command
    }
}

/// A single keystroke.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyInput {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyInput {
    /// Keystroke with no modifiers held.
    pub fn plain(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::default(),
        }
    }

    /// Printable char this keystroke types, if any.
    pub fn typed_char(&self) -> Option<char> {
        match self.key {
            Key::Char(ch) if !self.modifiers.is_shortcut() && !ch.is_control() => Some(ch),
            _ => None,
        }
    }
}

/// Buffer or caret change a keystroke performs once no interceptor claims it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum EditCommand {
    Insert(String),
    Backspace,
    DeleteForward,
    MoveLeft { word: bool },
    MoveRight { word: bool },
    MoveUp,
    MoveDown,
    MoveHome,
    MoveEnd,
}

fn word_modifier(modifiers: Modifiers) -> bool {
    modifiers.ctrl || modifiers.alt
}

/// Reduce a keystroke to its default editing command.
///
/// Shortcut chords other than word-wise caret motion map to nothing; Escape
/// never edits.
pub(crate) fn edit_command_for(input: &KeyInput) -> Option<EditCommand> {
    let modifiers = input.modifiers;
    match input.key {
        Key::ArrowLeft => Some(EditCommand::MoveLeft {
            word: word_modifier(modifiers),
        }),
        Key::ArrowRight => Some(EditCommand::MoveRight {
            word: word_modifier(modifiers),
        }),
        _ if modifiers.is_shortcut() => None,
        Key::ArrowUp => Some(EditCommand::MoveUp),
        Key::ArrowDown => Some(EditCommand::MoveDown),
        Key::Home => Some(EditCommand::MoveHome),
        Key::End => Some(EditCommand::MoveEnd),
        Key::Backspace => Some(EditCommand::Backspace),
        Key::Delete => Some(EditCommand::DeleteForward),
        Key::Enter => Some(EditCommand::Insert("\n".to_string())),
        Key::Tab if modifiers.shift => None,
        Key::Tab => Some(EditCommand::Insert(crate::constants::TAB_INSERT.to_string())),
        Key::Escape => None,
        Key::Char(_) => input
            .typed_char()
            .map(|ch| EditCommand::Insert(ch.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with(key: Key, modifiers: Modifiers) -> KeyInput {
        KeyInput { key, modifiers }
    }

    #[test]
    fn printable_chars_insert_themselves() {
        assert_eq!(
            edit_command_for(&KeyInput::plain(Key::Char('a'))),
            Some(EditCommand::Insert("a".to_string()))
        );
        let shifted = Modifiers {
            shift: true,
            ..Default::default()
        };
        assert_eq!(
            edit_command_for(&with(Key::Char('>'), shifted)),
            Some(EditCommand::Insert(">".to_string()))
        );
    }

    #[test]
    fn shortcut_chords_do_not_type() {
        let ctrl = Modifiers {
            ctrl: true,
            ..Default::default()
        };
        assert_eq!(edit_command_for(&with(Key::Char('s'), ctrl)), None);
        assert_eq!(edit_command_for(&with(Key::Backspace, ctrl)), None);
        assert_eq!(
            edit_command_for(&with(Key::ArrowLeft, ctrl)),
            Some(EditCommand::MoveLeft { word: true })
        );
    }

    #[test]
    fn enter_and_tab_insert_whitespace() {
        assert_eq!(
            edit_command_for(&KeyInput::plain(Key::Enter)),
            Some(EditCommand::Insert("\n".to_string()))
        );
        assert_eq!(
            edit_command_for(&KeyInput::plain(Key::Tab)),
            Some(EditCommand::Insert("  ".to_string()))
        );
        assert_eq!(edit_command_for(&KeyInput::plain(Key::Escape)), None);
    }
}
