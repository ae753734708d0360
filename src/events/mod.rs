//! Event handling for the application.
//!
//! Terminal input is translated into [`Event`]s that the demo app routes to
//! the focused tag editor.

mod handler;
mod keys;

use crossterm::event::KeyEvent;

pub use handler::EventHandler;
pub use keys::{is_known_key_name, key_name};

/// Application events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// Text was pasted (bracketed paste).
    Paste(String),
    /// The terminal gained focus.
    FocusGained,
    /// The terminal lost focus.
    FocusLost,
    /// The terminal was resized.
    Resize(u16, u16),
    /// No input within the tick rate; drives timers.
    Tick,
    /// The application should exit.
    Quit,
}
