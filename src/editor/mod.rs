//! Tag editor controller.
//!
//! A [`TagEditor`] owns one mounted editor: its ordered tag list, the
//! typeahead state and the markup inside its container. All mutation goes
//! through its methods, and every mutation re-syncs the markup so the hidden
//! form field always equals the tags joined by commas.
//!
//! ## Interaction states
//!
//! - `Idle`: dropdown closed.
//! - `SuggestionsOpen`: dropdown visible; the highlight indexes the filtered list.
//! - `Destroyed`: terminal; every method is a no-op.
//!
//! Typing or focusing with an eligible query opens the dropdown. Escape, a
//! blur (after [`BLUR_CLOSE_DELAY`]), a successful add, or an empty filtered
//! list closes it.

mod hooks;
mod markup;
mod rejection;
mod suggestions;
mod timers;

use std::fmt;
use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, trace, warn};

use crate::config::{TagEditorConfig, DEFAULT_FIELD_NAME};
use crate::events::key_name;
use crate::markup::{Document, NodeId, SharedDocument};
use crate::ui::TextInput;

pub use hooks::TagEditorHooks;
pub use rejection::Rejection;
pub use suggestions::{default_filter, SuggestionState};
pub use timers::{TimerKind, TimerQueue, BLUR_CLOSE_DELAY, DUPLICATE_FLASH, ERROR_FLASH};

use markup::{EditorNodes, RenderState};

/// How a caller identifies the container to mount into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContainerRef {
    /// A node in the document.
    Node(NodeId),
    /// An element id, with or without a leading `#`.
    Id(String),
}

impl ContainerRef {
    /// Resolve to a live node.
    pub fn resolve(&self, doc: &Document) -> Option<NodeId> {
        match self {
            ContainerRef::Node(node) => doc.contains(*node).then_some(*node),
            ContainerRef::Id(id) => doc.find_by_id(id.trim_start_matches('#')),
        }
    }
}

impl fmt::Display for ContainerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContainerRef::Node(node) => write!(f, "{}", node),
            ContainerRef::Id(id) => write!(f, "#{}", id.trim_start_matches('#')),
        }
    }
}

impl From<NodeId> for ContainerRef {
    fn from(node: NodeId) -> Self {
        ContainerRef::Node(node)
    }
}

impl From<&str> for ContainerRef {
    fn from(id: &str) -> Self {
        ContainerRef::Id(id.to_string())
    }
}

impl From<String> for ContainerRef {
    fn from(id: String) -> Self {
        ContainerRef::Id(id)
    }
}

/// Outcome of a key press, for the host to react to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagAction {
    /// A tag was added (the stored value).
    Added(String),
    /// A tag was removed.
    Removed(String),
    /// A confirm key was pressed but the value was refused.
    Rejected(Rejection),
}

/// A mounted tag editor.
#[derive(Debug)]
pub struct TagEditor {
    /// Host document.
    document: SharedDocument,
    /// Container the editor was mounted into.
    container: NodeId,
    /// Nodes created by this editor. `None` once destroyed.
    nodes: Option<EditorNodes>,
    config: TagEditorConfig,
    hooks: TagEditorHooks,
    /// Name of the hidden form field.
    field_name: String,
    /// Current tags, in insertion order.
    tags: Vec<String>,
    /// Pending input text.
    input: TextInput,
    suggestions: SuggestionState,
    timers: TimerQueue,
    focused: bool,
    disabled: bool,
    /// Transient error state.
    error: bool,
    /// Existing tag being re-flashed after a duplicate add.
    flashing: Option<String>,
}

impl TagEditor {
    /// Mount an editor without hooks.
    ///
    /// Returns `None` if the container cannot be resolved.
    pub fn create(
        document: &SharedDocument,
        container: impl Into<ContainerRef>,
        config: TagEditorConfig,
    ) -> Option<Self> {
        Self::create_with_hooks(document, container, config, TagEditorHooks::default())
    }

    /// Mount an editor into `container`.
    ///
    /// Builds the editor markup, seeds the tags from the config and renders
    /// them. Returns `None` if the container cannot be resolved.
    pub fn create_with_hooks(
        document: &SharedDocument,
        container: impl Into<ContainerRef>,
        config: TagEditorConfig,
        hooks: TagEditorHooks,
    ) -> Option<Self> {
        let container_ref = container.into();

        let (container, field_name, nodes) = {
            let mut doc = match document.try_borrow_mut() {
                Ok(doc) => doc,
                Err(_) => {
                    warn!(container = %container_ref, "Document is busy, tag editor not created");
                    return None;
                }
            };

            let Some(container) = container_ref.resolve(&doc) else {
                debug!(container = %container_ref, "Container not found, tag editor not created");
                return None;
            };

            let field_name = config
                .name
                .clone()
                .or_else(|| doc.attribute(container, "data-name").map(str::to_string))
                .unwrap_or_else(|| DEFAULT_FIELD_NAME.to_string());

            let nodes = match EditorNodes::build(&mut doc, container, &config, &field_name) {
                Ok(nodes) => nodes,
                Err(e) => {
                    warn!(container = %container_ref, error = %e, "Failed to build tag editor markup");
                    return None;
                }
            };
            (container, field_name, nodes)
        };

        let editor = Self {
            document: document.clone(),
            container,
            nodes: Some(nodes),
            tags: config.initial_tags.clone(),
            input: TextInput::with_placeholder(config.placeholder.clone()),
            config,
            hooks,
            field_name,
            suggestions: SuggestionState::new(),
            timers: TimerQueue::new(),
            focused: false,
            disabled: false,
            error: false,
            flashing: None,
        };
        editor.render();

        debug!(
            container = %container,
            field = %editor.field_name,
            tags = editor.tags.len(),
            read_only = editor.config.read_only,
            "Tag editor mounted"
        );
        Some(editor)
    }

    // ========================================================================
    // Tag operations
    // ========================================================================

    /// Add a tag. Returns whether it was accepted.
    pub fn add(&mut self, value: &str) -> bool {
        self.try_add(value).is_ok()
    }

    /// Add a tag, reporting why it was refused.
    ///
    /// On success returns the stored value (trimmed when configured), after
    /// clearing the input, closing the dropdown and invoking `on_add` then
    /// `on_change`.
    pub fn try_add(&mut self, value: &str) -> Result<String, Rejection> {
        let result = self.check_and_push(value);
        match &result {
            Ok(tag) => {
                debug!(tag = %tag, count = self.tags.len(), "Tag added");
                if let Some(on_add) = self.hooks.on_add.as_mut() {
                    on_add(tag);
                }
                self.notify_change();
            }
            Err(reason) => {
                debug!(value, reason = %reason, "Tag rejected");
            }
        }
        result
    }

    fn check_and_push(&mut self, value: &str) -> Result<String, Rejection> {
        if self.is_destroyed() {
            return Err(Rejection::Destroyed);
        }

        let tag = if self.config.trim_value {
            value.trim()
        } else {
            value
        };

        if tag.is_empty() {
            return Err(Rejection::Empty);
        }

        if self.config.read_only {
            return Err(Rejection::ReadOnly);
        }

        if let Some(max) = self.config.max_length {
            if tag.chars().count() > max {
                return Err(self.flash_error(Rejection::TooLong { max }));
            }
        }

        if let Some(max) = self.config.max_tags {
            if self.tags.len() >= max {
                return Err(Rejection::LimitReached { max });
            }
        }

        if !self.config.allow_duplicates && self.has_tag(tag) {
            self.flash_duplicate(tag);
            return Err(Rejection::Duplicate);
        }

        if !self.config.allow_free_text {
            let lower = tag.to_lowercase();
            let known = self
                .config
                .suggestions
                .iter()
                .any(|s| s.to_lowercase() == lower);
            if !known {
                return Err(self.flash_error(Rejection::NotInSuggestions));
            }
        }

        let valid = self.hooks.validate.as_ref().map_or(true, |validate| validate(tag));
        if !valid {
            return Err(self.flash_error(Rejection::Invalid));
        }

        let vetoed = self
            .hooks
            .on_before_add
            .as_mut()
            .map_or(false, |before_add| before_add(tag) == Some(false));
        if vetoed {
            return Err(Rejection::Vetoed);
        }

        let tag = tag.to_string();
        self.tags.push(tag.clone());
        self.input.clear();
        self.suggestions.close();
        self.render();
        Ok(tag)
    }

    /// Remove a tag. Returns false if it is not present.
    ///
    /// Invokes `on_remove` then `on_change`, then returns focus to the input.
    pub fn remove(&mut self, value: &str) -> bool {
        if self.is_destroyed() || self.config.read_only {
            return false;
        }
        let Some(index) = self.tags.iter().position(|t| t == value) else {
            return false;
        };

        let tag = self.tags.remove(index);
        self.render();
        debug!(tag = %tag, count = self.tags.len(), "Tag removed");

        if let Some(on_remove) = self.hooks.on_remove.as_mut() {
            on_remove(&tag);
        }
        self.notify_change();
        self.focus();
        true
    }

    /// Remove the most recently added tag, returning it.
    pub fn remove_last(&mut self) -> Option<String> {
        let last = self.tags.last()?.clone();
        self.remove(&last).then_some(last)
    }

    /// Clear every tag and invoke `on_change`.
    pub fn remove_all(&mut self) {
        if self.is_destroyed() || self.config.read_only {
            return;
        }
        self.tags.clear();
        self.render();
        debug!("All tags removed");
        self.notify_change();
    }

    /// Replace the tags wholesale, without validation, and invoke `on_change`.
    pub fn set_tags<I, S>(&mut self, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if self.is_destroyed() || self.config.read_only {
            return;
        }
        self.tags = tags.into_iter().map(Into::into).collect();
        self.render();
        debug!(count = self.tags.len(), "Tags replaced");
        self.notify_change();
    }

    /// A copy of the current tags.
    pub fn get_tags(&self) -> Vec<String> {
        self.tags.clone()
    }

    /// The current tags.
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Whether a tag is present (case-sensitive).
    pub fn has_tag(&self, value: &str) -> bool {
        self.tags.iter().any(|t| t == value)
    }

    /// Replace the suggestion source. Existing tags are not re-validated.
    pub fn set_suggestions<I, S>(&mut self, suggestions: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if self.is_destroyed() {
            return;
        }
        self.config.suggestions = suggestions.into_iter().map(Into::into).collect();

        if self.config.suggestions.is_empty() {
            return;
        }
        if let Some(nodes) = self.nodes.as_mut() {
            match self.document.try_borrow_mut() {
                Ok(mut doc) => {
                    if let Err(e) = nodes.ensure_suggestions_panel(&mut doc) {
                        warn!(error = %e, "Failed to create suggestions panel");
                    }
                }
                Err(_) => warn!("Document is busy, suggestions panel not created"),
            }
        }
    }

    /// The suggestion source.
    pub fn suggestions(&self) -> &[String] {
        &self.config.suggestions
    }

    /// Change the pill variant and re-render.
    pub fn set_variant(&mut self, variant: impl Into<String>) {
        if self.is_destroyed() {
            return;
        }
        self.config.variant = variant.into();
        self.render();
    }

    // ========================================================================
    // Interaction
    // ========================================================================

    /// Handle a key press while the input is focused.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<TagAction> {
        if !self.accepts_input() {
            return None;
        }
        trace!(key = ?key.code, modifiers = ?key.modifiers, "Tag editor key");

        if let Some(name) = key_name(&key) {
            if self.config.is_confirm_key(&name) {
                return self.confirm();
            }
        }

        match key.code {
            KeyCode::Backspace if self.input.is_empty() => {
                self.remove_last().map(TagAction::Removed)
            }
            KeyCode::Esc => {
                self.suggestions.close();
                self.render();
                None
            }
            KeyCode::Down => {
                if self.suggestions.is_open() {
                    self.suggestions.highlight_next();
                } else if self.config.show_all_on_focus || !self.input.is_empty() {
                    let value = self.input.value().to_string();
                    let show_all = self.config.show_all_on_focus && value.is_empty();
                    self.show_suggestions(&value, show_all);
                }
                self.render();
                None
            }
            KeyCode::Up => {
                if self.suggestions.is_open() {
                    self.suggestions.highlight_previous();
                    self.render();
                }
                None
            }
            _ => {
                if self.input.handle_input(key) {
                    self.on_input_changed();
                }
                None
            }
        }
    }

    /// Type text one key at a time, as if entered on the keyboard.
    pub fn input_text(&mut self, text: &str) -> Vec<TagAction> {
        text.chars()
            .filter_map(|c| {
                self.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
            })
            .collect()
    }

    /// Paste text at the cursor.
    ///
    /// Comma-separated segments are committed immediately; the trailing
    /// segment stays in the input.
    pub fn paste(&mut self, text: &str) {
        if !self.accepts_input() {
            return;
        }
        self.input.insert_str(text);
        self.on_input_changed();
    }

    /// Focus the input. No-op when read-only, disabled or destroyed.
    ///
    /// Cancels a pending blur close, and opens every suggestion when
    /// `show_all_on_focus` is set.
    pub fn focus(&mut self) {
        if !self.has_input() || self.disabled {
            return;
        }
        self.timers.cancel(TimerKind::CloseSuggestions);
        if self.focused {
            return;
        }
        self.focused = true;
        if self.config.show_all_on_focus && !self.config.suggestions.is_empty() {
            self.show_suggestions("", true);
            self.render();
        }
    }

    /// Blur the input now.
    pub fn blur(&mut self) {
        self.blur_at(Instant::now());
    }

    /// Blur the input; the dropdown closes after [`BLUR_CLOSE_DELAY`].
    pub fn blur_at(&mut self, now: Instant) {
        if !self.focused {
            return;
        }
        self.focused = false;
        self.timers
            .schedule(TimerKind::CloseSuggestions, now, BLUR_CLOSE_DELAY);
    }

    /// Highlight a suggestion under the pointer.
    pub fn hover_suggestion(&mut self, index: usize) {
        if !self.accepts_input() {
            return;
        }
        self.suggestions.set_highlighted(index);
        self.render();
    }

    /// Commit a suggestion by its index in the filtered list, then refocus.
    pub fn click_suggestion(&mut self, index: usize) -> bool {
        if !self.accepts_input() {
            return false;
        }
        let Some(value) = self.suggestions.filtered().get(index).cloned() else {
            return false;
        };
        let added = self.add(&value);
        self.focus();
        added
    }

    /// Remove a tag through its pill's remove control.
    pub fn click_remove(&mut self, tag: &str) -> bool {
        if self.disabled {
            return false;
        }
        self.remove(tag)
    }

    /// A click on the editor region focuses the input.
    pub fn click_editor(&mut self) {
        self.focus();
    }

    /// Open the dropdown with every eligible suggestion.
    pub fn show_all_suggestions(&mut self) {
        if self.is_destroyed() {
            return;
        }
        self.show_suggestions("", true);
        self.render();
    }

    /// Close the dropdown.
    pub fn close_suggestions(&mut self) {
        if self.is_destroyed() {
            return;
        }
        self.suggestions.close();
        self.render();
    }

    /// Enable interaction.
    pub fn enable(&mut self) {
        if self.is_destroyed() {
            return;
        }
        self.disabled = false;
        self.render();
    }

    /// Disable interaction and close the dropdown. Tags are untouched.
    pub fn disable(&mut self) {
        if self.is_destroyed() {
            return;
        }
        self.disabled = true;
        self.focused = false;
        self.timers.cancel(TimerKind::CloseSuggestions);
        self.suggestions.close();
        self.render();
    }

    /// Fire every expired deadline.
    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    /// Fire deadlines expired at `now`.
    pub fn tick_at(&mut self, now: Instant) {
        if self.is_destroyed() {
            return;
        }
        let fired = self.timers.drain_expired(now);
        if fired.is_empty() {
            return;
        }
        for kind in fired {
            trace!(?kind, "Tag editor timer fired");
            match kind {
                TimerKind::ClearError => self.error = false,
                TimerKind::CloseSuggestions => self.suggestions.close(),
                TimerKind::ClearFlash => self.flashing = None,
            }
        }
        self.render();
    }

    /// Empty the container and release everything the editor holds.
    ///
    /// Every later call is a no-op.
    pub fn destroy(&mut self) {
        let Some(nodes) = self.nodes.take() else {
            return;
        };
        match self.document.try_borrow_mut() {
            Ok(mut doc) => {
                if let Err(e) = doc.clear_children(self.container) {
                    warn!(error = %e, "Failed to empty tag editor container");
                }
            }
            Err(_) => warn!(wrapper = %nodes.wrapper, "Document is busy, container not emptied"),
        }

        self.hooks = TagEditorHooks::default();
        self.timers.clear();
        self.suggestions.close();
        self.input.clear();
        self.tags.clear();
        self.focused = false;
        self.error = false;
        self.flashing = None;
        debug!(container = %self.container, "Tag editor destroyed");
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// The container the editor was mounted into.
    pub fn container(&self) -> NodeId {
        self.container
    }

    /// The editor region node.
    pub fn element(&self) -> Option<NodeId> {
        self.nodes.as_ref().map(|n| n.editor)
    }

    /// The configuration in effect.
    pub fn config(&self) -> &TagEditorConfig {
        &self.config
    }

    /// Name of the hidden form field.
    pub fn hidden_field_name(&self) -> &str {
        &self.field_name
    }

    /// Value submitted with the form.
    pub fn form_value(&self) -> String {
        self.tags.join(",")
    }

    /// Pending input text.
    pub fn input_value(&self) -> &str {
        self.input.value()
    }

    /// Input cursor position, in characters.
    pub fn input_cursor(&self) -> usize {
        self.input.cursor()
    }

    /// Placeholder shown while the input is empty.
    pub fn placeholder(&self) -> &str {
        self.input.placeholder()
    }

    /// Suggestions matching the live query.
    pub fn filtered_suggestions(&self) -> &[String] {
        self.suggestions.filtered()
    }

    /// Index of the highlighted suggestion.
    pub fn highlighted_index(&self) -> Option<usize> {
        self.suggestions.highlighted()
    }

    /// Whether the dropdown is open.
    pub fn is_suggestions_open(&self) -> bool {
        self.suggestions.is_open()
    }

    /// Whether the transient error state is showing.
    pub fn has_error(&self) -> bool {
        self.error
    }

    /// The duplicate tag currently being re-flashed.
    pub fn flashing_tag(&self) -> Option<&str> {
        self.flashing.as_deref()
    }

    /// Whether the tag cap has been reached.
    pub fn is_max_reached(&self) -> bool {
        self.config
            .max_tags
            .map_or(false, |max| self.tags.len() >= max)
    }

    /// Whether the input has focus.
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Whether the editor is disabled.
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Whether the editor is read-only.
    pub fn is_read_only(&self) -> bool {
        self.config.read_only
    }

    /// Whether the editor has been destroyed.
    pub fn is_destroyed(&self) -> bool {
        self.nodes.is_none()
    }

    /// Whether the editor has an input element.
    pub fn has_input(&self) -> bool {
        self.nodes.as_ref().map_or(false, |n| n.input.is_some())
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn accepts_input(&self) -> bool {
        self.has_input() && !self.disabled
    }

    fn confirm(&mut self) -> Option<TagAction> {
        let value = match self.suggestions.highlighted_value() {
            Some(suggestion) => suggestion.to_string(),
            None if !self.input.is_empty() => self.input.value().to_string(),
            None => return None,
        };
        Some(match self.try_add(&value) {
            Ok(tag) => TagAction::Added(tag),
            Err(reason) => TagAction::Rejected(reason),
        })
    }

    fn on_input_changed(&mut self) {
        let value = self.input.value().to_string();

        if value.contains(',') {
            let mut parts: Vec<&str> = value.split(',').collect();
            let trailing = parts.pop().unwrap_or_default();
            for part in parts {
                self.add(part);
            }
            self.input.set_value(trailing);
            self.render();
            return;
        }

        if value.chars().count() >= self.config.min_chars_for_suggestions {
            self.show_suggestions(&value, false);
        } else if self.config.show_all_on_focus {
            self.show_suggestions("", true);
        } else {
            self.suggestions.close();
        }
        self.render();
    }

    fn show_suggestions(&mut self, query: &str, show_all: bool) {
        let has_panel = self
            .nodes
            .as_ref()
            .map_or(false, |n| n.suggestions.is_some());
        if !has_panel || self.config.suggestions.is_empty() {
            return;
        }

        let query = query.to_lowercase();
        let filtered = match &self.hooks.filter_suggestions {
            Some(filter) => filter(&self.config.suggestions, &query, &self.tags),
            None => default_filter(
                &self.config.suggestions,
                &query,
                &self.tags,
                self.config.allow_duplicates,
                show_all,
            ),
        };
        self.suggestions.open_with(filtered);
    }

    fn flash_error(&mut self, reason: Rejection) -> Rejection {
        self.error = true;
        self.timers
            .schedule(TimerKind::ClearError, Instant::now(), ERROR_FLASH);
        self.render();
        reason
    }

    fn flash_duplicate(&mut self, tag: &str) {
        self.flashing = Some(tag.to_string());
        self.timers
            .schedule(TimerKind::ClearFlash, Instant::now(), DUPLICATE_FLASH);
        self.render();
    }

    fn notify_change(&mut self) {
        if let Some(on_change) = self.hooks.on_change.as_mut() {
            on_change(&self.tags);
        }
    }

    fn render(&self) {
        let Some(nodes) = &self.nodes else {
            return;
        };
        let state = RenderState {
            tags: &self.tags,
            variant: &self.config.variant,
            read_only: self.config.read_only,
            input_value: self.input.value(),
            suggestions: &self.suggestions,
            error: self.error,
            disabled: self.disabled,
            max_reached: self.is_max_reached(),
            flashing: self.flashing.as_deref(),
        };
        match self.document.try_borrow_mut() {
            Ok(mut doc) => {
                if let Err(e) = nodes.sync(&mut doc, &state) {
                    warn!(error = %e, "Failed to sync tag editor markup");
                }
            }
            Err(_) => warn!("Document is busy, tag editor markup not synced"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::Document;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn new_document() -> (SharedDocument, NodeId) {
        let mut doc = Document::new();
        let container = doc.create_element("div");
        doc.set_attribute(container, "id", "field").unwrap();
        let root = doc.root();
        doc.append_child(root, container).unwrap();
        (doc.into_shared(), container)
    }

    fn mount(config: TagEditorConfig) -> (SharedDocument, TagEditor) {
        mount_with_hooks(config, TagEditorHooks::default())
    }

    fn mount_with_hooks(config: TagEditorConfig, hooks: TagEditorHooks) -> (SharedDocument, TagEditor) {
        let (doc, container) = new_document();
        let editor = TagEditor::create_with_hooks(&doc, container, config, hooks).unwrap();
        (doc, editor)
    }

    fn hidden_value(doc: &SharedDocument, editor: &TagEditor) -> Option<String> {
        let doc = doc.borrow();
        doc.descendants(editor.container())
            .into_iter()
            .find(|&n| doc.attribute(n, "type") == Some("hidden"))
            .and_then(|n| doc.attribute(n, "value").map(str::to_string))
    }

    fn pill_texts(doc: &SharedDocument, editor: &TagEditor) -> Vec<String> {
        let doc = doc.borrow();
        doc.query_class(editor.container(), markup::PILL_TEXT_CLASS)
            .into_iter()
            .filter_map(|n| doc.text(n).map(str::to_string))
            .collect()
    }

    fn suggestions() -> TagEditorConfig {
        TagEditorConfig::default().with_suggestions(["apple", "apricot", "banana"])
    }

    // ------------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------------

    #[test]
    fn test_create_missing_container_returns_none() {
        let (doc, _) = new_document();
        assert!(TagEditor::create(&doc, "#nope", TagEditorConfig::default()).is_none());
    }

    #[test]
    fn test_create_by_id() {
        let (doc, container) = new_document();
        let editor = TagEditor::create(&doc, "#field", TagEditorConfig::default()).unwrap();
        assert_eq!(editor.container(), container);

        let editor = TagEditor::create(&doc, "field", TagEditorConfig::default()).unwrap();
        assert_eq!(editor.container(), container);
    }

    #[test]
    fn test_create_renders_initial_tags() {
        let (doc, editor) = mount(TagEditorConfig::default().with_tags(["a", "b"]));
        assert_eq!(editor.get_tags(), vec!["a", "b"]);
        assert_eq!(pill_texts(&doc, &editor), vec!["a", "b"]);
        assert_eq!(hidden_value(&doc, &editor).as_deref(), Some("a,b"));
    }

    #[test]
    fn test_hidden_field_name_resolution() {
        let (_, editor) = mount(TagEditorConfig::default());
        assert_eq!(editor.hidden_field_name(), "tags");

        let (_, editor) = mount(TagEditorConfig::default().with_name("topics"));
        assert_eq!(editor.hidden_field_name(), "topics");

        let (doc, container) = new_document();
        doc.borrow_mut()
            .set_attribute(container, "data-name", "keywords")
            .unwrap();
        let editor = TagEditor::create(&doc, container, TagEditorConfig::default()).unwrap();
        assert_eq!(editor.hidden_field_name(), "keywords");
    }

    #[test]
    fn test_markup_structure() {
        let (doc, editor) = mount(suggestions());
        let d = doc.borrow();
        let container = editor.container();

        assert_eq!(d.query_class(container, markup::WRAPPER_CLASS).len(), 1);
        assert_eq!(d.query_class(container, markup::EDITOR_CLASS).len(), 1);
        assert_eq!(d.query_class(container, markup::INPUT_CLASS).len(), 1);
        assert_eq!(d.query_class(container, markup::SUGGESTIONS_CLASS).len(), 1);

        let input = d.query_class(container, markup::INPUT_CLASS)[0];
        assert_eq!(d.attribute(input, "placeholder"), Some("Add a tag..."));
    }

    #[test]
    fn test_repeated_renders_keep_markup_bounded() {
        let (doc, mut editor) = mount(suggestions().with_tags(["a", "b", "c", "d", "e"]));
        let slots = doc.borrow().slot_count();
        let live = doc.borrow().node_count();

        for _ in 0..2_000 {
            editor.input_text("a");
            assert!(editor.is_suggestions_open());
            editor.handle_key(key(KeyCode::Backspace));
        }

        assert_eq!(editor.get_tags(), vec!["a", "b", "c", "d", "e"]);
        assert!(doc.borrow().slot_count() <= slots + 3);
        assert!(doc.borrow().node_count() <= live + 3);
        assert_eq!(pill_texts(&doc, &editor), vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn test_no_suggestions_panel_without_suggestions() {
        let (doc, editor) = mount(TagEditorConfig::default());
        let d = doc.borrow();
        assert!(d
            .query_class(editor.container(), markup::SUGGESTIONS_CLASS)
            .is_empty());
    }

    // ------------------------------------------------------------------------
    // Add
    // ------------------------------------------------------------------------

    #[test]
    fn test_basic_commit_and_duplicate() {
        let (_, mut editor) = mount(TagEditorConfig::default());
        assert!(editor.add("hello"));
        assert_eq!(editor.get_tags(), vec!["hello"]);

        assert!(!editor.add("hello"));
        assert_eq!(editor.get_tags(), vec!["hello"]);
    }

    #[test]
    fn test_duplicate_flashes_existing_pill() {
        let (doc, mut editor) = mount(TagEditorConfig::default().with_tags(["hello"]));
        assert_eq!(editor.try_add("hello"), Err(Rejection::Duplicate));
        assert_eq!(editor.flashing_tag(), Some("hello"));
        assert!(!editor.has_error());
        assert_eq!(
            doc.borrow()
                .query_class(editor.container(), markup::PILL_FLASH_CLASS)
                .len(),
            1
        );

        editor.tick_at(Instant::now() + Duration::from_secs(1));
        assert_eq!(editor.flashing_tag(), None);
    }

    #[test]
    fn test_duplicates_allowed() {
        let (_, mut editor) = mount(TagEditorConfig::default().with_allow_duplicates(true));
        assert!(editor.add("x"));
        assert!(editor.add("x"));
        assert_eq!(editor.get_tags(), vec!["x", "x"]);
    }

    #[test]
    fn test_duplicate_check_is_case_sensitive() {
        let (_, mut editor) = mount(TagEditorConfig::default());
        assert!(editor.add("Rust"));
        assert!(editor.add("rust"));
    }

    #[test]
    fn test_uniqueness_over_many_adds() {
        let (_, mut editor) = mount(TagEditorConfig::default());
        let values = ["a", "b", "a", " b ", "c", "a", "c", "d", "b"];
        for value in values.iter().cycle().take(40) {
            editor.add(value);
        }
        let tags = editor.get_tags();
        let mut deduped = tags.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), tags.len());
        assert_eq!(tags, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_cap_invariant() {
        let (_, mut editor) = mount(TagEditorConfig::default().with_max_tags(3));
        assert!(editor.add("a"));
        assert!(editor.add("b"));
        assert!(editor.add("c"));
        assert!(editor.is_max_reached());

        assert_eq!(editor.try_add("d"), Err(Rejection::LimitReached { max: 3 }));
        assert_eq!(editor.get_tags(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_max_reached_class() {
        let (doc, mut editor) = mount(TagEditorConfig::default().with_max_tags(1));
        let element = editor.element().unwrap();
        assert!(!doc.borrow().has_class(element, markup::MAX_REACHED_CLASS));

        editor.add("a");
        assert!(doc.borrow().has_class(element, markup::MAX_REACHED_CLASS));

        editor.remove("a");
        assert!(!doc.borrow().has_class(element, markup::MAX_REACHED_CLASS));
    }

    #[test]
    fn test_length_boundary() {
        let (_, mut editor) = mount(TagEditorConfig::default().with_max_length(5));
        assert_eq!(
            editor.try_add(&"x".repeat(6)),
            Err(Rejection::TooLong { max: 5 })
        );
        assert!(editor.has_error());
        assert!(editor.add(&"x".repeat(5)));
    }

    #[test]
    fn test_length_counts_characters() {
        let (_, mut editor) = mount(TagEditorConfig::default().with_max_length(4));
        assert!(editor.add("café"));
    }

    #[test]
    fn test_error_state_clears_after_delay() {
        let (doc, mut editor) = mount(TagEditorConfig::default().with_max_length(1));
        let element = editor.element().unwrap();
        editor.add("too long");
        assert!(doc.borrow().has_class(element, markup::ERROR_CLASS));

        editor.tick_at(Instant::now());
        assert!(editor.has_error());

        editor.tick_at(Instant::now() + ERROR_FLASH + Duration::from_millis(10));
        assert!(!editor.has_error());
        assert!(!doc.borrow().has_class(element, markup::ERROR_CLASS));
    }

    #[test]
    fn test_free_text_restriction() {
        let (_, mut editor) = mount(
            TagEditorConfig::default()
                .with_suggestions(["Go", "Rust"])
                .with_allow_free_text(false),
        );
        assert!(editor.add("go"));
        assert_eq!(editor.get_tags(), vec!["go"]);

        assert_eq!(editor.try_add("Python"), Err(Rejection::NotInSuggestions));
        assert!(editor.has_error());
    }

    #[test]
    fn test_free_text_restriction_with_no_suggestions() {
        let (_, mut editor) = mount(TagEditorConfig::default().with_allow_free_text(false));
        assert_eq!(editor.try_add("x"), Err(Rejection::NotInSuggestions));
    }

    #[test]
    fn test_trim() {
        let (_, mut editor) = mount(TagEditorConfig::default());
        assert!(editor.add("  hi  "));
        assert_eq!(editor.get_tags(), vec!["hi"]);
        assert_eq!(editor.try_add("   "), Err(Rejection::Empty));

        let (_, mut editor) = mount(TagEditorConfig::default().with_trim_value(false));
        assert!(editor.add(" hi "));
        assert_eq!(editor.get_tags(), vec![" hi "]);
    }

    #[test]
    fn test_rejection_priority() {
        let (_, mut editor) = mount(TagEditorConfig::default().with_read_only(true));
        assert_eq!(editor.try_add(""), Err(Rejection::Empty));
        assert_eq!(editor.try_add("x"), Err(Rejection::ReadOnly));

        let (_, mut editor) = mount(
            TagEditorConfig::default()
                .with_tags(["aaa"])
                .with_max_tags(1)
                .with_max_length(2),
        );
        assert_eq!(editor.try_add("aaa"), Err(Rejection::TooLong { max: 2 }));

        let (_, mut editor) = mount(TagEditorConfig::default().with_tags(["a"]).with_max_tags(1));
        assert_eq!(editor.try_add("a"), Err(Rejection::LimitReached { max: 1 }));
    }

    #[test]
    fn test_validate_hook() {
        let hooks = TagEditorHooks::new().validate(|tag| tag.chars().all(char::is_alphanumeric));
        let (_, mut editor) = mount_with_hooks(TagEditorConfig::default(), hooks);

        assert_eq!(editor.try_add("no spaces"), Err(Rejection::Invalid));
        assert!(editor.has_error());
        assert!(editor.add("ok"));
    }

    #[test]
    fn test_before_add_veto_is_silent() {
        let hooks = TagEditorHooks::new().on_before_add(|tag| {
            if tag == "blocked" {
                Some(false)
            } else {
                None
            }
        });
        let (_, mut editor) = mount_with_hooks(TagEditorConfig::default(), hooks);

        assert_eq!(editor.try_add("blocked"), Err(Rejection::Vetoed));
        assert!(!editor.has_error());
        assert!(editor.add("fine"));
    }

    #[test]
    fn test_add_callbacks_in_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let add_log = Rc::clone(&log);
        let change_log = Rc::clone(&log);
        let hooks = TagEditorHooks::new()
            .on_add(move |tag| add_log.borrow_mut().push(format!("add:{}", tag)))
            .on_change(move |tags| change_log.borrow_mut().push(format!("change:{}", tags.join("|"))));
        let (_, mut editor) = mount_with_hooks(TagEditorConfig::default(), hooks);

        editor.add("a");
        editor.add("b");
        editor.add("b");
        assert_eq!(
            *log.borrow(),
            vec!["add:a", "change:a", "add:b", "change:a|b"]
        );
    }

    #[test]
    fn test_callbacks_can_read_document() {
        let (doc, container) = new_document();
        let seen = Rc::new(RefCell::new(String::new()));
        let seen_in_hook = Rc::clone(&seen);
        let doc_in_hook = Rc::clone(&doc);
        let hooks = TagEditorHooks::new().on_change(move |_| {
            *seen_in_hook.borrow_mut() = doc_in_hook.borrow().to_html(container);
        });
        let mut editor =
            TagEditor::create_with_hooks(&doc, container, TagEditorConfig::default(), hooks).unwrap();

        editor.add("x");
        assert!(seen.borrow().contains(r#"value="x""#));
    }

    #[test]
    fn test_successful_add_clears_input_and_closes() {
        let (_, mut editor) = mount(suggestions());
        editor.input_text("ap");
        assert!(editor.is_suggestions_open());

        editor.handle_key(key(KeyCode::Enter));
        assert_eq!(editor.get_tags(), vec!["ap"]);
        assert_eq!(editor.input_value(), "");
        assert!(!editor.is_suggestions_open());
    }

    // ------------------------------------------------------------------------
    // Remove / replace
    // ------------------------------------------------------------------------

    #[test]
    fn test_remove_is_idempotent() {
        let (_, mut editor) = mount(TagEditorConfig::default());
        assert!(!editor.remove("x"));

        editor.add("x");
        assert!(editor.remove("x"));
        assert!(!editor.remove("x"));
        assert!(editor.get_tags().is_empty());
    }

    #[test]
    fn test_remove_callbacks_and_focus() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let remove_log = Rc::clone(&log);
        let change_log = Rc::clone(&log);
        let hooks = TagEditorHooks::new()
            .on_remove(move |tag| remove_log.borrow_mut().push(format!("remove:{}", tag)))
            .on_change(move |tags| change_log.borrow_mut().push(format!("change:{}", tags.len())));
        let (_, mut editor) =
            mount_with_hooks(TagEditorConfig::default().with_tags(["a", "b"]), hooks);

        assert!(editor.remove("a"));
        assert_eq!(*log.borrow(), vec!["remove:a", "change:1"]);
        assert!(editor.is_focused());
    }

    #[test]
    fn test_remove_all() {
        let changes = Rc::new(RefCell::new(Vec::new()));
        let changes_in_hook = Rc::clone(&changes);
        let hooks = TagEditorHooks::new()
            .on_change(move |tags| changes_in_hook.borrow_mut().push(tags.to_vec()));
        let (doc, mut editor) =
            mount_with_hooks(TagEditorConfig::default().with_tags(["a", "b"]), hooks);

        editor.remove_all();
        assert!(editor.get_tags().is_empty());
        assert_eq!(*changes.borrow(), vec![Vec::<String>::new()]);
        assert_eq!(hidden_value(&doc, &editor).as_deref(), Some(""));
    }

    #[test]
    fn test_set_tags_skips_validation() {
        let (_, mut editor) = mount(TagEditorConfig::default().with_max_tags(1));
        editor.set_tags(["a", "a", "b"]);
        assert_eq!(editor.get_tags(), vec!["a", "a", "b"]);
    }

    #[test]
    fn test_set_tags_round_trip() {
        let (doc, mut editor) = mount(TagEditorConfig::default().with_tags(["z", "a", "m"]));
        let before = hidden_value(&doc, &editor);
        editor.set_tags(editor.get_tags());
        assert_eq!(editor.get_tags(), vec!["z", "a", "m"]);
        assert_eq!(hidden_value(&doc, &editor), before);
    }

    #[test]
    fn test_get_tags_is_a_copy() {
        let (_, mut editor) = mount(TagEditorConfig::default());
        editor.add("a");
        let mut copy = editor.get_tags();
        copy.push("b".to_string());
        assert_eq!(editor.get_tags(), vec!["a"]);
    }

    #[test]
    fn test_has_tag() {
        let (_, editor) = mount(TagEditorConfig::default().with_tags(["a"]));
        assert!(editor.has_tag("a"));
        assert!(!editor.has_tag("A"));
    }

    #[test]
    fn test_hidden_field_tracks_every_mutation() {
        let (doc, mut editor) = mount(TagEditorConfig::default());
        editor.add("a");
        editor.add("b");
        assert_eq!(hidden_value(&doc, &editor).as_deref(), Some("a,b"));
        editor.remove("a");
        assert_eq!(hidden_value(&doc, &editor).as_deref(), Some("b"));
        editor.set_tags(["x", "y", "z"]);
        assert_eq!(hidden_value(&doc, &editor).as_deref(), Some("x,y,z"));
        editor.remove_all();
        assert_eq!(hidden_value(&doc, &editor).as_deref(), Some(""));
        editor.paste("p,q,");
        assert_eq!(hidden_value(&doc, &editor), Some(editor.form_value()));
        assert_eq!(editor.form_value(), "p,q");
    }

    // ------------------------------------------------------------------------
    // Read-only
    // ------------------------------------------------------------------------

    #[test]
    fn test_read_only_scenario() {
        let (doc, mut editor) =
            mount(TagEditorConfig::default().with_tags(["a", "b"]).with_read_only(true));

        assert!(!editor.add("c"));
        assert!(!editor.remove("a"));
        editor.remove_all();
        editor.set_tags(["z"]);
        assert_eq!(editor.get_tags(), vec!["a", "b"]);

        assert!(!editor.has_input());
        editor.focus();
        assert!(!editor.is_focused());

        let d = doc.borrow();
        let container = editor.container();
        assert!(d.query_class(container, markup::INPUT_CLASS).is_empty());
        assert!(d.query_class(container, markup::PILL_REMOVE_CLASS).is_empty());
        assert_eq!(d.query_class(container, markup::DISPLAY_CLASS).len(), 1);
        assert!(d.query_class(container, markup::SUGGESTIONS_CLASS).is_empty());
    }

    #[test]
    fn test_read_only_ignores_keys() {
        let (_, mut editor) = mount(TagEditorConfig::default().with_tags(["a"]).with_read_only(true));
        assert_eq!(editor.handle_key(key(KeyCode::Backspace)), None);
        assert_eq!(editor.get_tags(), vec!["a"]);
    }

    // ------------------------------------------------------------------------
    // Typing, paste and keyboard navigation
    // ------------------------------------------------------------------------

    #[test]
    fn test_paste_with_commas() {
        let (_, mut editor) = mount(TagEditorConfig::default());
        editor.paste("x,y,z");
        assert_eq!(editor.get_tags(), vec!["x", "y"]);
        assert_eq!(editor.input_value(), "z");
    }

    #[test]
    fn test_paste_without_commas_stays_in_input() {
        let (_, mut editor) = mount(TagEditorConfig::default());
        editor.paste("hello");
        assert!(editor.get_tags().is_empty());
        assert_eq!(editor.input_value(), "hello");
    }

    #[test]
    fn test_typing_filters_suggestions() {
        let (_, mut editor) = mount(suggestions());
        editor.input_text("ap");
        assert!(editor.is_suggestions_open());
        assert_eq!(editor.filtered_suggestions(), &["apple", "apricot"]);
    }

    #[test]
    fn test_filter_excludes_existing_tag() {
        let (_, mut editor) = mount(suggestions().with_tags(["apple"]));
        editor.input_text("ap");
        assert_eq!(editor.filtered_suggestions(), &["apricot"]);
    }

    #[test]
    fn test_no_matches_closes_dropdown() {
        let (_, mut editor) = mount(suggestions());
        editor.input_text("ap");
        editor.input_text("x");
        assert!(!editor.is_suggestions_open());
        assert!(editor.filtered_suggestions().is_empty());
    }

    #[test]
    fn test_min_chars_for_suggestions() {
        let (_, mut editor) = mount(suggestions().with_min_chars(2));
        editor.input_text("a");
        assert!(!editor.is_suggestions_open());
        editor.input_text("p");
        assert!(editor.is_suggestions_open());
    }

    #[test]
    fn test_short_query_shows_all_when_configured() {
        let (_, mut editor) = mount(suggestions().with_min_chars(3).with_show_all_on_focus(true));
        editor.input_text("b");
        assert_eq!(editor.filtered_suggestions(), &["apple", "apricot", "banana"]);
    }

    #[test]
    fn test_show_all_on_focus() {
        let (_, mut editor) = mount(suggestions().with_show_all_on_focus(true));
        editor.focus();
        assert!(editor.is_suggestions_open());
        assert_eq!(editor.filtered_suggestions().len(), 3);

        let (_, mut editor) = mount(suggestions());
        editor.focus();
        assert!(!editor.is_suggestions_open());
    }

    #[test]
    fn test_custom_filter_hook() {
        let hooks = TagEditorHooks::new()
            .filter_suggestions(|all, query, _| {
                all.iter()
                    .filter(|s| s.starts_with(query))
                    .rev()
                    .cloned()
                    .collect()
            });
        let (_, mut editor) = mount_with_hooks(suggestions().with_tags(["apple"]), hooks);
        editor.input_text("AP");
        assert_eq!(editor.filtered_suggestions(), &["apricot", "apple"]);
    }

    #[test]
    fn test_arrow_navigation_clamps() {
        let (_, mut editor) = mount(suggestions());
        editor.input_text("a");
        assert_eq!(editor.filtered_suggestions().len(), 3);
        assert_eq!(editor.highlighted_index(), None);

        for _ in 0..5 {
            editor.handle_key(key(KeyCode::Down));
        }
        assert_eq!(editor.highlighted_index(), Some(2));

        for _ in 0..5 {
            editor.handle_key(key(KeyCode::Up));
        }
        assert_eq!(editor.highlighted_index(), Some(0));
    }

    #[test]
    fn test_arrow_down_opens_when_closed() {
        let (_, mut editor) = mount(suggestions());
        editor.handle_key(key(KeyCode::Down));
        assert!(!editor.is_suggestions_open());

        editor.input_text("ban");
        editor.handle_key(key(KeyCode::Esc));
        assert!(!editor.is_suggestions_open());
        editor.handle_key(key(KeyCode::Down));
        assert_eq!(editor.filtered_suggestions(), &["banana"]);

        let (_, mut editor) = mount(suggestions().with_show_all_on_focus(true));
        editor.handle_key(key(KeyCode::Down));
        assert_eq!(editor.filtered_suggestions().len(), 3);
    }

    #[test]
    fn test_confirm_commits_highlighted_suggestion() {
        let (_, mut editor) = mount(suggestions());
        editor.input_text("ap");
        editor.handle_key(key(KeyCode::Down));
        editor.handle_key(key(KeyCode::Down));

        let action = editor.handle_key(key(KeyCode::Enter));
        assert_eq!(action, Some(TagAction::Added("apricot".to_string())));
        assert_eq!(editor.get_tags(), vec!["apricot"]);
        assert_eq!(editor.highlighted_index(), None);
    }

    #[test]
    fn test_comma_commits_input_without_inserting() {
        let (_, mut editor) = mount(TagEditorConfig::default());
        editor.input_text("rust");
        let action = editor.handle_key(key(KeyCode::Char(',')));
        assert_eq!(action, Some(TagAction::Added("rust".to_string())));
        assert_eq!(editor.input_value(), "");
    }

    #[test]
    fn test_confirm_on_empty_input_does_nothing() {
        let (_, mut editor) = mount(TagEditorConfig::default());
        assert_eq!(editor.handle_key(key(KeyCode::Enter)), None);
        assert_eq!(editor.input_value(), "");
    }

    #[test]
    fn test_confirm_reports_rejection() {
        let (_, mut editor) = mount(TagEditorConfig::default().with_tags(["a"]));
        editor.input_text("a");
        assert_eq!(
            editor.handle_key(key(KeyCode::Enter)),
            Some(TagAction::Rejected(Rejection::Duplicate))
        );
        assert_eq!(editor.input_value(), "a");
    }

    #[test]
    fn test_custom_confirm_keys() {
        let (_, mut editor) = mount(TagEditorConfig::default().with_confirm_keys(["Tab", ";"]));
        editor.input_text("a;");
        assert_eq!(editor.get_tags(), vec!["a"]);

        editor.input_text("b");
        editor.handle_key(key(KeyCode::Tab));
        assert_eq!(editor.get_tags(), vec!["a", "b"]);

        editor.input_text("c");
        assert_eq!(editor.handle_key(key(KeyCode::Enter)), None);
        assert_eq!(editor.input_value(), "c");
    }

    #[test]
    fn test_comma_typed_when_not_a_confirm_key_splits() {
        let (_, mut editor) = mount(TagEditorConfig::default().with_confirm_keys(["Enter"]));
        editor.input_text("a,b");
        assert_eq!(editor.get_tags(), vec!["a"]);
        assert_eq!(editor.input_value(), "b");
    }

    #[test]
    fn test_backspace_on_empty_removes_last() {
        let (_, mut editor) = mount(TagEditorConfig::default().with_tags(["a", "b"]));
        let action = editor.handle_key(key(KeyCode::Backspace));
        assert_eq!(action, Some(TagAction::Removed("b".to_string())));
        assert_eq!(editor.get_tags(), vec!["a"]);
    }

    #[test]
    fn test_backspace_with_text_edits_input() {
        let (_, mut editor) = mount(TagEditorConfig::default().with_tags(["a"]));
        editor.input_text("xy");
        assert_eq!(editor.handle_key(key(KeyCode::Backspace)), None);
        assert_eq!(editor.input_value(), "x");
        assert_eq!(editor.get_tags(), vec!["a"]);
    }

    #[test]
    fn test_escape_keeps_input() {
        let (_, mut editor) = mount(suggestions());
        editor.input_text("ap");
        editor.handle_key(key(KeyCode::Down));
        editor.handle_key(key(KeyCode::Esc));
        assert!(!editor.is_suggestions_open());
        assert_eq!(editor.highlighted_index(), None);
        assert_eq!(editor.input_value(), "ap");
    }

    #[test]
    fn test_blur_closes_after_delay() {
        let (_, mut editor) = mount(suggestions());
        editor.focus();
        editor.input_text("ap");
        let now = Instant::now();
        editor.blur_at(now);
        assert!(editor.is_suggestions_open());

        editor.tick_at(now + Duration::from_millis(100));
        assert!(editor.is_suggestions_open());

        editor.tick_at(now + BLUR_CLOSE_DELAY);
        assert!(!editor.is_suggestions_open());
    }

    #[test]
    fn test_refocus_cancels_blur_close() {
        let (_, mut editor) = mount(suggestions());
        editor.focus();
        editor.input_text("ap");
        let now = Instant::now();
        editor.blur_at(now);
        editor.focus();

        editor.tick_at(now + Duration::from_secs(1));
        assert!(editor.is_suggestions_open());
    }

    #[test]
    fn test_click_suggestion_commits_and_refocuses() {
        let (_, mut editor) = mount(suggestions());
        editor.focus();
        editor.input_text("an");
        editor.blur();

        assert!(editor.click_suggestion(0));
        assert_eq!(editor.get_tags(), vec!["banana"]);
        assert!(editor.is_focused());
        assert!(!editor.click_suggestion(0));
    }

    #[test]
    fn test_hover_highlights() {
        let (doc, mut editor) = mount(suggestions());
        editor.input_text("ap");
        editor.hover_suggestion(1);
        assert_eq!(editor.highlighted_index(), Some(1));

        let d = doc.borrow();
        let items = d.query_class(editor.container(), markup::SUGGESTION_ITEM_CLASS);
        assert_eq!(items.len(), 2);
        assert!(d.has_class(items[1], markup::HIGHLIGHTED_CLASS));
        assert!(!d.has_class(items[0], markup::HIGHLIGHTED_CLASS));
    }

    #[test]
    fn test_suggestions_panel_open_class() {
        let (doc, mut editor) = mount(suggestions());
        let panel = doc.borrow().query_class(editor.container(), markup::SUGGESTIONS_CLASS)[0];

        editor.input_text("b");
        assert!(doc.borrow().has_class(panel, markup::OPEN_CLASS));
        editor.close_suggestions();
        assert!(!doc.borrow().has_class(panel, markup::OPEN_CLASS));
        assert!(doc.borrow().children(panel).is_empty());
    }

    #[test]
    fn test_click_remove() {
        let (_, mut editor) = mount(TagEditorConfig::default().with_tags(["a", "b"]));
        assert!(editor.click_remove("a"));
        assert_eq!(editor.get_tags(), vec!["b"]);
    }

    #[test]
    fn test_click_editor_focuses() {
        let (_, mut editor) = mount(TagEditorConfig::default());
        editor.click_editor();
        assert!(editor.is_focused());
    }

    // ------------------------------------------------------------------------
    // Enable / disable / suggestions / variant
    // ------------------------------------------------------------------------

    #[test]
    fn test_disable_blocks_interaction_not_api() {
        let (doc, mut editor) = mount(TagEditorConfig::default().with_tags(["a"]));
        editor.disable();
        assert!(editor.is_disabled());
        assert_eq!(editor.handle_key(key(KeyCode::Backspace)), None);
        editor.paste("x,");
        assert!(!editor.click_remove("a"));
        assert_eq!(editor.get_tags(), vec!["a"]);

        let element = editor.element().unwrap();
        assert!(doc.borrow().has_class(element, markup::DISABLED_CLASS));
        {
            let d = doc.borrow();
            let input = d.query_class(editor.container(), markup::INPUT_CLASS)[0];
            assert!(d.has_attribute(input, "disabled"));
        }

        assert!(editor.add("b"));

        editor.enable();
        assert!(!doc.borrow().has_class(element, markup::DISABLED_CLASS));
        editor.handle_key(key(KeyCode::Backspace));
        assert_eq!(editor.get_tags(), vec!["a"]);
    }

    #[test]
    fn test_disable_closes_suggestions() {
        let (doc, mut editor) = mount(suggestions());
        editor.focus();
        editor.input_text("ap");
        assert!(editor.is_suggestions_open());

        editor.disable();
        assert!(!editor.is_suggestions_open());
        assert!(editor.filtered_suggestions().is_empty());
        let d = doc.borrow();
        let panel = d.query_class(editor.container(), markup::SUGGESTIONS_CLASS)[0];
        assert!(!d.has_class(panel, markup::OPEN_CLASS));
        assert!(d.children(panel).is_empty());
    }

    #[test]
    fn test_set_suggestions_does_not_revalidate() {
        let (doc, mut editor) = mount(
            TagEditorConfig::default()
                .with_tags(["legacy"])
                .with_allow_free_text(false),
        );
        assert!(doc
            .borrow()
            .query_class(editor.container(), markup::SUGGESTIONS_CLASS)
            .is_empty());

        editor.set_suggestions(["go", "rust"]);
        assert_eq!(editor.get_tags(), vec!["legacy"]);
        assert_eq!(editor.suggestions(), &["go", "rust"]);
        assert!(editor.add("Rust"));
        assert_eq!(
            doc.borrow()
                .query_class(editor.container(), markup::SUGGESTIONS_CLASS)
                .len(),
            1
        );

        editor.input_text("g");
        assert_eq!(editor.filtered_suggestions(), &["go"]);
    }

    #[test]
    fn test_set_variant() {
        let (doc, mut editor) = mount(TagEditorConfig::default().with_tags(["a"]));
        let container = editor.container();
        let pill_class = |variant: &str| {
            doc.borrow()
                .query_class(container, &format!("mosaic-tag-pill-{}", variant))
                .len()
        };
        assert_eq!(pill_class("primary"), 1);

        editor.set_variant("danger");
        assert_eq!(pill_class("primary"), 0);
        assert_eq!(pill_class("danger"), 1);
    }

    #[test]
    fn test_show_all_suggestions() {
        let (_, mut editor) = mount(suggestions().with_tags(["banana"]));
        editor.show_all_suggestions();
        assert_eq!(editor.filtered_suggestions(), &["apple", "apricot"]);
    }

    // ------------------------------------------------------------------------
    // Destroy
    // ------------------------------------------------------------------------

    #[test]
    fn test_destroy_empties_container() {
        let (doc, mut editor) = mount(suggestions().with_tags(["a"]));
        editor.destroy();

        assert!(editor.is_destroyed());
        assert!(doc.borrow().children(editor.container()).is_empty());
        assert!(editor.element().is_none());
    }

    #[test]
    fn test_calls_after_destroy_are_no_ops() {
        let (doc, mut editor) = mount(TagEditorConfig::default().with_max_length(1));
        editor.add("too long");
        editor.destroy();

        assert_eq!(editor.try_add("x"), Err(Rejection::Destroyed));
        assert!(!editor.remove("x"));
        editor.set_tags(["x"]);
        editor.remove_all();
        editor.set_suggestions(["x"]);
        editor.focus();
        editor.paste("a,b");
        assert_eq!(editor.handle_key(key(KeyCode::Enter)), None);
        editor.tick_at(Instant::now() + Duration::from_secs(5));
        editor.destroy();

        assert!(editor.get_tags().is_empty());
        assert!(doc.borrow().children(editor.container()).is_empty());
    }

    #[test]
    fn test_container_reusable_after_destroy() {
        let (doc, mut editor) = mount(TagEditorConfig::default());
        let container = editor.container();
        editor.destroy();

        let editor = TagEditor::create(&doc, container, TagEditorConfig::default().with_tags(["n"]))
            .unwrap();
        assert_eq!(hidden_value(&doc, &editor).as_deref(), Some("n"));
    }
}
