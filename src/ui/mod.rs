//! User interface components.
//!
//! Terminal rendering for tag editor fields, plus the help bar and toasts
//! used by the demo form.

mod components;
pub mod theme;

pub use components::{
    editor_hints, render_editor_help, render_suggestions, render_tag_editor, TextInput, Toast,
    ToastKind, ToastStack, FIELD_HEIGHT,
};
pub use theme::Theme;
