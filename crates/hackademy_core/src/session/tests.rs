//! Session-level keystroke flows: popup lifecycle, commit, auto-close, focus.

use super::*;
use std::sync::Mutex;
use std::time::Duration;

fn session_with(text: &str, tokens: &[&str]) -> EditSession {
    let vocabulary = Vocabulary::from_tokens(tokens.iter().copied()).expect("vocab");
    EditSession::new(text, Arc::new(vocabulary), &Config::default())
}

fn type_str(session: &mut EditSession, text: &str, now: Instant) {
    for ch in text.chars() {
        session.handle_key(KeyInput::plain(Key::Char(ch)), now);
    }
}

fn press(session: &mut EditSession, key: Key, now: Instant) -> EditOutcome {
    session.handle_key(KeyInput::plain(key), now)
}

fn entries(session: &EditSession) -> Vec<String> {
    session
        .state()
        .popup()
        .map(|popup| popup.entries.clone())
        .unwrap_or_default()
}

#[test]
fn typing_a_prefix_opens_the_popup_below_the_caret() {
    let now = Instant::now();
    let mut session = session_with("", &["div", "divider", "span"]);
    type_str(&mut session, "di", now);

    let frame = session.frame();
    assert_eq!(frame.mode, SessionMode::Suggesting);
    let popup = frame.popup.expect("popup");
    assert_eq!(popup.entries, vec!["div", "divider"]);
    assert_eq!(popup.active, 0);
    assert_eq!(popup.anchor.top, 40.0);
    assert_eq!(popup.anchor.left, 16.0 + 48.0 + 2.0 * 8.5);
}

#[test]
fn separator_closes_the_popup() {
    let now = Instant::now();
    let mut session = session_with("", &["div"]);
    type_str(&mut session, "d", now);
    assert_eq!(session.state().mode(), SessionMode::Suggesting);
    type_str(&mut session, " ", now);
    assert_eq!(session.state().mode(), SessionMode::Idle);
    assert!(session.frame().popup.is_none());
}

#[test]
fn down_wraps_from_last_to_first_without_editing() {
    let now = Instant::now();
    let mut session = session_with("", &["span", "section", "select"]);
    type_str(&mut session, "s", now);
    press(&mut session, Key::ArrowDown, now);
    let outcome = press(&mut session, Key::ArrowDown, now);
    assert_eq!(session.state().popup().map(|p| p.active), Some(2));
    assert_eq!(
        session.state().popup().and_then(|p| p.active_entry()),
        Some("select")
    );
    assert!(!outcome.buffer_changed);
    assert_eq!(outcome.handled_by, Some("popup"));

    press(&mut session, Key::ArrowDown, now);
    assert_eq!(session.state().popup().map(|p| p.active), Some(0));
    press(&mut session, Key::ArrowUp, now);
    assert_eq!(session.state().popup().map(|p| p.active), Some(2));
    assert_eq!(session.snapshot().text(), "s");
}

#[test]
fn enter_commits_suffix_and_moves_caret_past_it() {
    let now = Instant::now();
    let mut session = session_with("<button className=\"\">", &["bg-black", "bg-blue-500"]);
    session.handle(EditorEvent::SetCursor(19), now);
    type_str(&mut session, "bg-b", now);
    press(&mut session, Key::ArrowDown, now);
    let outcome = press(&mut session, Key::Enter, now);

    assert!(outcome.buffer_changed);
    assert_eq!(session.snapshot().text(), "<button className=\"bg-blue-500\">");
    assert_eq!(session.state().cursor(), 30);
    assert_eq!(session.state().mode(), SessionMode::Idle);
}

#[test]
fn tab_commits_and_keeps_typed_case() {
    let now = Instant::now();
    let mut session = session_with("", &["useState"]);
    type_str(&mut session, "USE", now);
    press(&mut session, Key::Tab, now);
    assert_eq!(session.snapshot().text(), "USEState");
}

#[test]
fn enter_inserts_newline_when_idle() {
    let now = Instant::now();
    let mut session = session_with("ab", &["div"]);
    press(&mut session, Key::Enter, now);
    assert_eq!(session.snapshot().text(), "ab\n");
    assert_eq!(session.state().cursor(), 3);
}

#[test]
fn committed_word_does_not_reopen_the_popup() {
    let now = Instant::now();
    let mut session = session_with("", &["header", "footer"]);
    type_str(&mut session, "hea", now);
    press(&mut session, Key::Enter, now);
    assert_eq!(session.snapshot().text(), "header");
    assert_eq!(session.state().mode(), SessionMode::Idle);

    // Re-deriving at the new caret finds the exact word, which never suggests itself.
    session.handle(EditorEvent::SetCursor(6), now);
    assert_eq!(session.state().mode(), SessionMode::Idle);
}

#[test]
fn escape_hides_popup_without_editing() {
    let now = Instant::now();
    let mut session = session_with("", &["div"]);
    type_str(&mut session, "d", now);
    let outcome = press(&mut session, Key::Escape, now);
    assert!(!outcome.buffer_changed);
    assert_eq!(session.state().mode(), SessionMode::Idle);
    assert_eq!(session.snapshot().text(), "d");
}

#[test]
fn gt_after_open_tag_inserts_closing_tag() {
    let now = Instant::now();
    let mut session = session_with("", &["div"]);
    type_str(&mut session, "<div", now);
    assert_eq!(entries(&session), Vec::<String>::new());
    let outcome = press(&mut session, Key::Char('>'), now);

    assert_eq!(outcome.handled_by, Some("autoclose"));
    assert_eq!(session.snapshot().text(), "<div></div>");
    assert_eq!(session.state().cursor(), 5);
    assert_eq!(session.state().mode(), SessionMode::Idle);
}

#[test]
fn gt_with_popup_open_still_auto_closes() {
    let now = Instant::now();
    let mut session = session_with("", &["h1", "h2", "header"]);
    type_str(&mut session, "<h", now);
    assert_eq!(entries(&session), vec!["h1", "h2", "header"]);
    press(&mut session, Key::Char('>'), now);
    assert_eq!(session.snapshot().text(), "<h></h>");
    assert_eq!(session.state().mode(), SessionMode::Idle);
}

#[test]
fn gt_after_closing_tag_is_plain() {
    let now = Instant::now();
    let mut session = session_with("</div", &["div"]);
    let outcome = press(&mut session, Key::Char('>'), now);
    assert_eq!(outcome.handled_by, None);
    assert_eq!(session.snapshot().text(), "</div>");
}

#[test]
fn blur_dismisses_after_grace_delay() {
    let start = Instant::now();
    let mut session = session_with("", &["div"]);
    type_str(&mut session, "d", start);
    session.handle(EditorEvent::FocusLost, start);
    assert!(!session.tick(start + Duration::from_millis(100)));
    assert_eq!(session.state().mode(), SessionMode::Suggesting);
    assert!(session.tick(start + Duration::from_millis(200)));
    assert_eq!(session.state().mode(), SessionMode::Idle);
}

#[test]
fn refocus_cancels_pending_dismissal() {
    let start = Instant::now();
    let mut session = session_with("", &["div"]);
    type_str(&mut session, "d", start);
    session.handle(EditorEvent::FocusLost, start);
    session.handle(EditorEvent::FocusGained, start + Duration::from_millis(50));
    assert!(!session.tick(start + Duration::from_secs(1)));
    assert_eq!(session.state().mode(), SessionMode::Suggesting);
}

#[test]
fn pointer_select_commits_before_dismissal_and_survives_it() {
    let start = Instant::now();
    let mut session = session_with("", &["span", "section"]);
    type_str(&mut session, "s", start);
    session.handle(EditorEvent::FocusLost, start);
    let outcome = session.handle(EditorEvent::PointerSelect(1), start + Duration::from_millis(20));
    assert!(outcome.buffer_changed);
    assert_eq!(session.snapshot().text(), "section");
    assert!(session.state().has_focus());
    assert!(!session.state().dismissal_pending());

    // A fresh popup opened right after the commit must not be hit by the old timer.
    press(&mut session, Key::Char(' '), start + Duration::from_millis(30));
    type_str(&mut session, "s", start + Duration::from_millis(40));
    assert!(!session.tick(start + Duration::from_millis(500)));
    assert_eq!(session.state().mode(), SessionMode::Suggesting);
    assert_eq!(session.snapshot().text(), "section s");
}

#[test]
fn keys_are_ignored_while_unfocused() {
    let now = Instant::now();
    let mut session = session_with("", &["div"]);
    session.handle(EditorEvent::FocusLost, now);
    let outcome = press(&mut session, Key::Char('x'), now);
    assert!(!outcome.buffer_changed);
    assert_eq!(session.snapshot().text(), "");
}

#[test]
fn scroll_is_mirrored_and_reanchors_the_popup() {
    let now = Instant::now();
    let mut session = session_with("a\nb\n", &["div"]);
    type_str(&mut session, "d", now);
    session.handle(EditorEvent::Scroll(ScrollOffset::new(24.0, 0.0)), now);
    let frame = session.frame();
    assert_eq!(frame.scroll, ScrollOffset::new(24.0, 0.0));
    assert_eq!(session.state().scroll().input(), frame.scroll);
    assert_eq!(frame.popup.expect("popup").anchor.top, 16.0 + 3.0 * 24.0 - 24.0);
}

#[test]
fn caret_moves_rederive_suggestions() {
    let now = Instant::now();
    let mut session = session_with("div sp", &["span", "divider"]);
    assert_eq!(session.state().mode(), SessionMode::Idle);
    press(&mut session, Key::ArrowLeft, now);
    assert_eq!(entries(&session), vec!["span"]);
    session.handle(EditorEvent::SetCursor(3), now);
    assert_eq!(entries(&session), vec!["divider"]);
}

#[test]
fn pasted_text_is_inserted_verbatim() {
    let now = Instant::now();
    let mut session = session_with("", &["div"]);
    session.handle(EditorEvent::Text("<div".to_string()), now);
    assert_eq!(session.snapshot().text(), "<div");
    session.handle(EditorEvent::Text(">".to_string()), now);
    assert_eq!(session.snapshot().text(), "<div></div>");
    session.handle(EditorEvent::Text("\n".to_string()), now);
    assert_eq!(session.snapshot().text(), "<div>\n</div>");
}

#[test]
fn listener_sees_every_new_revision() {
    let now = Instant::now();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let mut session = session_with("", &["div"]);
    session.on_buffer_change(move |snapshot| {
        sink.lock().expect("sink").push(snapshot.text());
    });
    type_str(&mut session, "<p", now);
    press(&mut session, Key::ArrowLeft, now);
    press(&mut session, Key::End, now);
    press(&mut session, Key::Char('>'), now);
    session.reset("fresh");

    let seen = seen.lock().expect("seen");
    assert_eq!(
        *seen,
        vec![
            "<".to_string(),
            "<p".to_string(),
            "<p></p>".to_string(),
            "fresh".to_string()
        ]
    );
}

#[test]
fn reset_clears_popup_and_places_caret_at_end() {
    let now = Instant::now();
    let mut session = session_with("", &["div"]);
    type_str(&mut session, "d", now);
    session.handle(EditorEvent::FocusLost, now);
    session.reset("<div>\n</div>");
    assert_eq!(session.state().mode(), SessionMode::Idle);
    assert_eq!(session.state().cursor(), 12);
    assert!(!session.state().dismissal_pending());
}

#[test]
fn shifted_enter_and_tab_still_commit() {
    let now = Instant::now();
    let shifted = |key| KeyInput {
        key,
        modifiers: Modifiers {
            shift: true,
            ..Modifiers::default()
        },
    };

    let mut session = session_with("", &["div", "divider"]);
    type_str(&mut session, "di", now);
    let outcome = session.handle_key(shifted(Key::Enter), now);
    assert_eq!(outcome.handled_by, Some("popup"));
    assert_eq!(session.snapshot().text(), "div");
    assert_eq!(session.state().mode(), SessionMode::Idle);

    let mut session = session_with("", &["div", "divider"]);
    type_str(&mut session, "di", now);
    press(&mut session, Key::ArrowDown, now);
    session.handle_key(shifted(Key::Tab), now);
    assert_eq!(session.snapshot().text(), "divider");
    assert_eq!(session.state().mode(), SessionMode::Idle);
}
