//! Reusable UI components.

mod help_bar;
mod input;
mod tag_editor;
mod toast;

pub use help_bar::{editor_hints, render_editor_help};
pub use input::TextInput;
pub use tag_editor::{render_suggestions, render_tag_editor, FIELD_HEIGHT};
pub use toast::{Toast, ToastKind, ToastStack};
