//! Tag editor configuration.

use serde::{Deserialize, Serialize};

use super::{ConfigError, Result};
use crate::events::is_known_key_name;

/// Default input placeholder.
pub const DEFAULT_PLACEHOLDER: &str = "Add a tag...";

/// Default pill variant.
pub const DEFAULT_VARIANT: &str = "primary";

/// Default hidden field name.
pub const DEFAULT_FIELD_NAME: &str = "tags";

/// Configuration for one tag editor instance.
///
/// Every field has a documented default, so partial TOML tables and partial
/// declarative attribute sets both produce a complete config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TagEditorConfig {
    /// Seed tag values.
    #[serde(alias = "tags")]
    pub initial_tags: Vec<String>,
    /// Candidate values for typeahead.
    pub suggestions: Vec<String>,
    /// Input placeholder.
    pub placeholder: String,
    /// Hard cap on tag count (`None` is unbounded).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tags: Option<usize>,
    /// Hard cap on characters per tag (`None` is unbounded).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    /// Whether a tag value may repeat.
    pub allow_duplicates: bool,
    /// If false, only values from the suggestion list may be added.
    pub allow_free_text: bool,
    /// Trim whitespace before validating and storing.
    pub trim_value: bool,
    /// Key names that commit the pending input as a tag.
    pub confirm_keys: Vec<String>,
    /// Style label for pills. Has no behavioral effect.
    pub variant: String,
    /// Display tags only; no mutation is possible.
    pub read_only: bool,
    /// Show the full suggestion list on focus, even with an empty query.
    pub show_all_on_focus: bool,
    /// Minimum typed characters before suggestions are filtered.
    pub min_chars_for_suggestions: usize,
    /// Name of the hidden form field. Falls back to the container's
    /// `data-name`, then to `"tags"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Default for TagEditorConfig {
    fn default() -> Self {
        Self {
            initial_tags: Vec::new(),
            suggestions: Vec::new(),
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            max_tags: None,
            max_length: None,
            allow_duplicates: false,
            allow_free_text: true,
            trim_value: true,
            confirm_keys: vec!["Enter".to_string(), ",".to_string()],
            variant: DEFAULT_VARIANT.to_string(),
            read_only: false,
            show_all_on_focus: false,
            min_chars_for_suggestions: 1,
            name: None,
        }
    }
}

impl TagEditorConfig {
    /// Set the seed tags.
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.initial_tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Set the suggestion list.
    pub fn with_suggestions<I, S>(mut self, suggestions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.suggestions = suggestions.into_iter().map(Into::into).collect();
        self
    }

    /// Cap the number of tags.
    pub fn with_max_tags(mut self, max: usize) -> Self {
        self.max_tags = Some(max);
        self
    }

    /// Cap the length of each tag.
    pub fn with_max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    /// Allow or forbid repeated values.
    pub fn with_allow_duplicates(mut self, allow: bool) -> Self {
        self.allow_duplicates = allow;
        self
    }

    /// Allow or forbid values outside the suggestion list.
    pub fn with_allow_free_text(mut self, allow: bool) -> Self {
        self.allow_free_text = allow;
        self
    }

    /// Enable or disable whitespace trimming.
    pub fn with_trim_value(mut self, trim: bool) -> Self {
        self.trim_value = trim;
        self
    }

    /// Replace the confirm keys.
    pub fn with_confirm_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.confirm_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Set the pill variant.
    pub fn with_variant(mut self, variant: impl Into<String>) -> Self {
        self.variant = variant.into();
        self
    }

    /// Make the editor read-only.
    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    /// Show every suggestion on focus.
    pub fn with_show_all_on_focus(mut self, show: bool) -> Self {
        self.show_all_on_focus = show;
        self
    }

    /// Set the minimum query length for filtering.
    pub fn with_min_chars(mut self, min: usize) -> Self {
        self.min_chars_for_suggestions = min;
        self
    }

    /// Set the placeholder.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Set the hidden field name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Whether `key` (as produced by [`crate::events::key_name`]) commits input.
    pub fn is_confirm_key(&self, key: &str) -> bool {
        self.confirm_keys.iter().any(|k| k == key)
    }

    /// Validate this config.
    ///
    /// Checks that:
    /// - every confirm key is a recognized key name
    /// - caps, when set, are non-zero
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::ValidationError` describing the first problem.
    pub fn validate(&self) -> Result<()> {
        if let Some(key) = self.confirm_keys.iter().find(|k| !is_known_key_name(k)) {
            return Err(ConfigError::ValidationError(format!(
                "unknown confirm key '{}'",
                key
            )));
        }

        if self.max_tags == Some(0) {
            return Err(ConfigError::ValidationError(
                "maxTags must be at least 1".to_string(),
            ));
        }

        if self.max_length == Some(0) {
            return Err(ConfigError::ValidationError(
                "maxLength must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}
