//! Keystroke script parsing for `hackademy replay`.
//!
//! One step per line; blank lines and lines starting with `#` are skipped.

use anyhow::{anyhow, bail, Context, Result};
use hackademy_core::{Key, KeyInput, Modifiers};

/// One scripted host action.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Step {
    /// Type each char as its own keystroke.
    Type(String),
    /// Commit text in one event, as a paste would.
    Paste(String),
    Key(KeyInput),
    Cursor(usize),
    Scroll { top: f32, left: f32 },
    Blur,
    Focus,
    /// Pointer press on popup entry.
    Click(usize),
    /// Advance the simulated clock.
    Wait(u64),
}

pub(crate) fn parse_script(source: &str) -> Result<Vec<Step>> {
    source
        .lines()
        .enumerate()
        .filter(|(_, line)| {
            let trimmed = line.trim_start();
            !trimmed.is_empty() && !trimmed.starts_with('#')
        })
        .map(|(index, line)| parse_step(line).with_context(|| format!("line {}", index + 1)))
        .collect()
}

fn parse_step(line: &str) -> Result<Step> {
    let line = line.trim_start();
    let (verb, rest) = match line.split_once(' ') {
        Some((verb, rest)) => (verb, rest),
        None => (line.trim_end(), ""),
    };
    let arg = rest.trim();
    let step = match verb {
        // Text keeps interior and trailing spaces.
        "type" => Step::Type(unescape(rest)),
        "paste" => Step::Paste(unescape(rest)),
        "key" => Step::Key(parse_key(arg)?),
        "cursor" => Step::Cursor(arg.parse().with_context(|| format!("bad offset {:?}", arg))?),
        "scroll" => {
            let mut parts = arg.split_whitespace();
            let (Some(top), Some(left), None) = (parts.next(), parts.next(), parts.next()) else {
                bail!("scroll takes <top> <left>");
            };
            Step::Scroll {
                top: top.parse().with_context(|| format!("bad top {:?}", top))?,
                left: left.parse().with_context(|| format!("bad left {:?}", left))?,
            }
        }
        "blur" => Step::Blur,
        "focus" => Step::Focus,
        "click" => Step::Click(arg.parse().with_context(|| format!("bad index {:?}", arg))?),
        "wait" => Step::Wait(arg.parse().with_context(|| format!("bad delay {:?}", arg))?),
        other => bail!("unknown step {:?}", other),
    };
    Ok(step)
}

/// `\n`, `\t` and `\\` escapes.
fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

pub(crate) fn parse_key(chord: &str) -> Result<KeyInput> {
    if chord.is_empty() {
        bail!("key needs a name");
    }
    let mut modifiers = Modifiers::default();
    let mut name = chord;
    // A lone "+" is the plus key, not a separator.
    while let Some((prefix, tail)) = name.split_once('+').filter(|(_, tail)| !tail.is_empty()) {
        match prefix.to_ascii_lowercase().as_str() {
            "ctrl" => modifiers.ctrl = true,
            "shift" => modifiers.shift = true,
            "alt" => modifiers.alt = true,
            "cmd" | "command" => modifiers.command = true,
            other => bail!("unknown modifier {:?}", other),
        }
        name = tail;
    }
    let key = key_by_name(name).ok_or_else(|| anyhow!("unknown key {:?}", name))?;
    Ok(KeyInput { key, modifiers })
}

fn key_by_name(name: &str) -> Option<Key> {
    let mut chars = name.chars();
    if let (Some(ch), None) = (chars.next(), chars.next()) {
        return Some(Key::Char(ch));
    }
    let key = match name.to_ascii_lowercase().as_str() {
        "up" => Key::ArrowUp,
        "down" => Key::ArrowDown,
        "left" => Key::ArrowLeft,
        "right" => Key::ArrowRight,
        "home" => Key::Home,
        "end" => Key::End,
        "enter" | "return" => Key::Enter,
        "tab" => Key::Tab,
        "escape" | "esc" => Key::Escape,
        "backspace" => Key::Backspace,
        "delete" | "del" => Key::Delete,
        "space" => Key::Char(' '),
        _ => return None,
    };
    Some(key)
}
