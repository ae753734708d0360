//! Declarative editor configuration read from container `data-*` attributes.
//!
//! Lists are comma-separated with no escaping, so a tag containing a literal
//! comma cannot be expressed in this format.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use super::TagEditorConfig;

/// Attribute marking a container for auto-discovery.
pub const MARKER_ATTRIBUTE: &str = "data-mosaic-tags";

/// Split a comma-separated list, trimming entries and dropping empty ones.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Build an editor config from a container's dataset.
///
/// Keys are the camelCase dataset keys (`maxTags`, not `data-max-tags`).
/// Unrecognized keys are ignored. Numeric values that do not parse leave the
/// cap unbounded.
pub fn config_from_dataset(dataset: &BTreeMap<String, String>) -> TagEditorConfig {
    let mut config = TagEditorConfig::default();

    if let Some(tags) = dataset.get("tags") {
        config.initial_tags = split_list(tags);
    }
    if let Some(suggestions) = dataset.get("suggestions") {
        config.suggestions = split_list(suggestions);
    }
    if let Some(placeholder) = dataset.get("placeholder") {
        config.placeholder = placeholder.clone();
    }
    if let Some(value) = dataset.get("maxTags") {
        config.max_tags = parse_cap("maxTags", value);
    }
    if let Some(value) = dataset.get("maxLength") {
        config.max_length = parse_cap("maxLength", value);
    }
    if let Some(variant) = dataset.get("variant") {
        config.variant = variant.clone();
    }
    if let Some(name) = dataset.get("name") {
        config.name = Some(name.clone());
    }
    if flag(dataset, "allowDuplicates") == Some("true") {
        config.allow_duplicates = true;
    }
    if flag(dataset, "readOnly") == Some("true") {
        config.read_only = true;
    }
    if flag(dataset, "showAllOnFocus") == Some("true") {
        config.show_all_on_focus = true;
    }
    if flag(dataset, "allowFreeText") == Some("false") {
        config.allow_free_text = false;
    }

    config
}

/// Write the declarative subset of a config back out as dataset entries.
///
/// Fields the attribute format cannot carry (confirm keys, trimming, minimum
/// query length) are left out. Values at their default are omitted.
pub fn dataset_from_config(config: &TagEditorConfig) -> BTreeMap<String, String> {
    let defaults = TagEditorConfig::default();
    let mut dataset = BTreeMap::new();

    if !config.initial_tags.is_empty() {
        dataset.insert("tags".to_string(), config.initial_tags.join(","));
    }
    if !config.suggestions.is_empty() {
        dataset.insert("suggestions".to_string(), config.suggestions.join(","));
    }
    if config.placeholder != defaults.placeholder {
        dataset.insert("placeholder".to_string(), config.placeholder.clone());
    }
    if let Some(max) = config.max_tags {
        dataset.insert("maxTags".to_string(), max.to_string());
    }
    if let Some(max) = config.max_length {
        dataset.insert("maxLength".to_string(), max.to_string());
    }
    if config.variant != defaults.variant {
        dataset.insert("variant".to_string(), config.variant.clone());
    }
    if let Some(name) = &config.name {
        dataset.insert("name".to_string(), name.clone());
    }
    if config.allow_duplicates {
        dataset.insert("allowDuplicates".to_string(), "true".to_string());
    }
    if config.read_only {
        dataset.insert("readOnly".to_string(), "true".to_string());
    }
    if config.show_all_on_focus {
        dataset.insert("showAllOnFocus".to_string(), "true".to_string());
    }
    if !config.allow_free_text {
        dataset.insert("allowFreeText".to_string(), "false".to_string());
    }

    dataset
}

fn flag<'a>(dataset: &'a BTreeMap<String, String>, key: &str) -> Option<&'a str> {
    dataset.get(key).map(String::as_str)
}

/// Read a numeric cap from its leading integer, as browsers parse `data-*`
/// numbers: `"5px"` is 5, a negative number is a cap of 0, and text with no
/// leading digits leaves the field unbounded.
fn parse_cap(key: &str, value: &str) -> Option<usize> {
    let trimmed = value.trim_start();
    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    let digits = &unsigned[..end];

    if digits.is_empty() {
        warn!(key, value, "Ignoring unparsable numeric attribute");
        return None;
    }
    if end < unsigned.len() {
        debug!(key, value, digits, "Ignoring trailing characters in numeric attribute");
    }
    if negative {
        return Some(0);
    }
    match digits.parse::<usize>() {
        Ok(n) => Some(n),
        Err(e) => {
            warn!(key, value, error = %e, "Numeric attribute out of range, leaving unbounded");
            None
        }
    }
}
