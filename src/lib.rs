//! Mosaic Tags - a typeahead tag editor widget for terminal forms.
//!
//! A [`editor::TagEditor`] mounts into a container element of a
//! [`markup::Document`], keeps its tags mirrored into a hidden form field,
//! and offers suggestions while the user types. [`registry`] discovers
//! declaratively marked containers; [`ui`] draws editors with ratatui.

pub mod app;
pub mod config;
pub mod editor;
pub mod error;
pub mod events;
pub mod logging;
pub mod markup;
pub mod registry;
pub mod ui;

pub use config::TagEditorConfig;
pub use editor::{Rejection, TagAction, TagEditor, TagEditorHooks};
pub use markup::{Document, NodeId, SharedDocument};
pub use registry::TagEditorRegistry;
