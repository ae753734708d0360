//! Application settings for the demo form.

use serde::{Deserialize, Serialize};

use super::{Result, TagEditorConfig};

/// Default event loop tick rate in milliseconds.
pub const DEFAULT_TICK_RATE_MS: u64 = 50;

/// One tag editor field on the demo form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSettings {
    /// Label shown above the field.
    pub label: String,
    /// Emit the field as a declarative container and let discovery mount it.
    #[serde(default)]
    pub declarative: bool,
    /// Editor configuration.
    #[serde(flatten)]
    pub editor: TagEditorConfig,
}

impl FieldSettings {
    /// Create a field with the given label and editor config.
    pub fn new(label: impl Into<String>, editor: TagEditorConfig) -> Self {
        Self {
            label: label.into(),
            declarative: false,
            editor,
        }
    }

    /// Mark the field as declarative.
    pub fn declarative(mut self) -> Self {
        self.declarative = true;
        self
    }
}

/// Application-wide settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// The UI theme to use.
    pub theme: String,
    /// Event loop tick rate in milliseconds.
    pub tick_rate_ms: u64,
    /// Log filter used when `RUST_LOG` is not set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_filter: Option<String>,
    /// Fields shown on the form, in order.
    pub fields: Vec<FieldSettings>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            tick_rate_ms: DEFAULT_TICK_RATE_MS,
            log_filter: None,
            fields: default_fields(),
        }
    }
}

impl Settings {
    /// Validate every field's editor config.
    ///
    /// # Errors
    ///
    /// Returns the first field validation failure, prefixed with its label.
    pub fn validate(&self) -> Result<()> {
        for field in &self.fields {
            field.editor.validate().map_err(|e| match e {
                super::ConfigError::ValidationError(msg) => super::ConfigError::ValidationError(
                    format!("field '{}': {}", field.label, msg),
                ),
                other => other,
            })?;
        }
        Ok(())
    }
}

/// The showcase form used when no fields are configured.
fn default_fields() -> Vec<FieldSettings> {
    vec![
        FieldSettings::new(
            "Topics",
            TagEditorConfig::default()
                .with_name("topics")
                .with_tags(["design-system"])
                .with_suggestions([
                    "accessibility",
                    "components",
                    "design-system",
                    "forms",
                    "performance",
                    "tables",
                    "theming",
                ])
                .with_max_tags(6)
                .with_max_length(24),
        ),
        FieldSettings::new(
            "Languages",
            TagEditorConfig::default()
                .with_name("languages")
                .with_placeholder("Pick a language...")
                .with_suggestions(["Go", "Python", "Rust", "TypeScript", "Zig"])
                .with_allow_free_text(false)
                .with_show_all_on_focus(true)
                .with_variant("success"),
        ),
        FieldSettings::new(
            "Status",
            TagEditorConfig::default()
                .with_name("status")
                .with_tags(["stable", "documented"])
                .with_variant("info")
                .with_read_only(true),
        )
        .declarative(),
    ]
}
