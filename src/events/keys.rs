//! Key naming.
//!
//! Confirm keys are configured by name (`"Enter"`, `","`), the way browser
//! `KeyboardEvent.key` values read. These helpers map terminal key events onto
//! those names.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Named (non-character) keys that may be used as confirm keys.
const NAMED_KEYS: &[&str] = &[
    "Enter",
    "Tab",
    "Escape",
    "Backspace",
    "Delete",
    "ArrowUp",
    "ArrowDown",
    "ArrowLeft",
    "ArrowRight",
    "Home",
    "End",
];

/// Name of a key event, or `None` for keys with no stable name.
///
/// Characters are only named when typed bare or with Shift, so Ctrl/Alt
/// chords never match a character confirm key.
pub fn key_name(key: &KeyEvent) -> Option<String> {
    let name = match key.code {
        KeyCode::Enter => "Enter",
        KeyCode::Tab => "Tab",
        KeyCode::Esc => "Escape",
        KeyCode::Backspace => "Backspace",
        KeyCode::Delete => "Delete",
        KeyCode::Up => "ArrowUp",
        KeyCode::Down => "ArrowDown",
        KeyCode::Left => "ArrowLeft",
        KeyCode::Right => "ArrowRight",
        KeyCode::Home => "Home",
        KeyCode::End => "End",
        KeyCode::Char(c)
            if key.modifiers == KeyModifiers::NONE || key.modifiers == KeyModifiers::SHIFT =>
        {
            return Some(c.to_string());
        }
        _ => return None,
    };
    Some(name.to_string())
}

/// Whether a configured key name can ever be produced by [`key_name`].
pub fn is_known_key_name(name: &str) -> bool {
    NAMED_KEYS.contains(&name) || name.chars().count() == 1
}
