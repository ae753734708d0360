//! Markup produced by a mounted editor and kept in sync with its state.

use crate::config::TagEditorConfig;
use crate::markup::{Document, NodeId, Result};

use super::suggestions::SuggestionState;

pub const WRAPPER_CLASS: &str = "mosaic-tag-editor-wrapper";
pub const EDITOR_CLASS: &str = "mosaic-tag-editor";
pub const DISPLAY_CLASS: &str = "mosaic-tag-display";
pub const INPUT_CLASS: &str = "mosaic-tag-editor-input";
pub const PILL_CLASS: &str = "mosaic-tag-pill";
pub const PILL_TEXT_CLASS: &str = "mosaic-tag-pill-text";
pub const PILL_REMOVE_CLASS: &str = "mosaic-tag-pill-remove";
pub const PILL_FLASH_CLASS: &str = "mosaic-tag-pill-flash";
pub const SUGGESTIONS_CLASS: &str = "mosaic-tag-suggestions";
pub const SUGGESTION_ITEM_CLASS: &str = "mosaic-tag-suggestion-item";
pub const OPEN_CLASS: &str = "mosaic-open";
pub const HIGHLIGHTED_CLASS: &str = "mosaic-highlighted";
pub const ERROR_CLASS: &str = "mosaic-tag-editor-error";
pub const MAX_REACHED_CLASS: &str = "mosaic-tag-editor-max-reached";
pub const DISABLED_CLASS: &str = "mosaic-disabled";

/// Nodes created by an editor inside its container.
#[derive(Debug, Clone)]
pub struct EditorNodes {
    pub wrapper: NodeId,
    pub editor: NodeId,
    pub input: Option<NodeId>,
    pub suggestions: Option<NodeId>,
    pub hidden: NodeId,
}

/// Snapshot of editor state needed to render.
pub struct RenderState<'a> {
    pub tags: &'a [String],
    pub variant: &'a str,
    pub read_only: bool,
    pub input_value: &'a str,
    pub suggestions: &'a SuggestionState,
    pub error: bool,
    pub disabled: bool,
    pub max_reached: bool,
    pub flashing: Option<&'a str>,
}

impl EditorNodes {
    /// Build the editor structure and append it to `container`.
    pub fn build(
        doc: &mut Document,
        container: NodeId,
        config: &TagEditorConfig,
        field_name: &str,
    ) -> Result<Self> {
        let wrapper = doc.create_element("div");
        doc.add_class(wrapper, WRAPPER_CLASS)?;

        let editor = doc.create_element("div");
        if config.read_only {
            doc.add_class(editor, DISPLAY_CLASS)?;
            doc.set_attribute(editor, "aria-label", "Tags")?;
        } else {
            doc.add_class(editor, EDITOR_CLASS)?;
            doc.set_attribute(editor, "aria-label", "Tag editor")?;
        }
        doc.set_attribute(editor, "role", "listbox")?;
        doc.append_child(wrapper, editor)?;

        let input = if config.read_only {
            None
        } else {
            let input = doc.create_element("input");
            doc.add_class(input, INPUT_CLASS)?;
            doc.set_attribute(input, "type", "text")?;
            doc.set_attribute(input, "placeholder", config.placeholder.as_str())?;
            doc.set_attribute(input, "aria-autocomplete", "list")?;
            doc.set_attribute(input, "value", "")?;
            doc.append_child(editor, input)?;
            Some(input)
        };

        let hidden = doc.create_element("input");
        doc.set_attribute(hidden, "type", "hidden")?;
        doc.set_attribute(hidden, "name", field_name)?;
        doc.set_attribute(hidden, "value", "")?;
        doc.append_child(wrapper, hidden)?;

        doc.append_child(container, wrapper)?;

        let mut nodes = Self {
            wrapper,
            editor,
            input,
            suggestions: None,
            hidden,
        };
        if !config.read_only && !config.suggestions.is_empty() {
            nodes.ensure_suggestions_panel(doc)?;
        }
        Ok(nodes)
    }

    /// Create the suggestions panel if it does not exist yet.
    ///
    /// The panel sits between the editor region and the hidden field.
    pub fn ensure_suggestions_panel(&mut self, doc: &mut Document) -> Result<()> {
        if self.suggestions.is_some() || self.input.is_none() {
            return Ok(());
        }
        let panel = doc.create_element("div");
        doc.add_class(panel, SUGGESTIONS_CLASS)?;
        doc.set_attribute(panel, "role", "listbox")?;
        doc.insert_before(self.wrapper, panel, self.hidden)?;
        self.suggestions = Some(panel);
        Ok(())
    }

    /// Bring the markup in line with `state`.
    pub fn sync(&self, doc: &mut Document, state: &RenderState<'_>) -> Result<()> {
        self.sync_pills(doc, state)?;

        doc.toggle_class(self.editor, ERROR_CLASS, state.error)?;
        doc.toggle_class(self.editor, DISABLED_CLASS, state.disabled)?;
        if !state.read_only {
            doc.toggle_class(self.editor, MAX_REACHED_CLASS, state.max_reached)?;
        }

        if let Some(input) = self.input {
            doc.set_attribute(input, "value", state.input_value)?;
            if state.disabled {
                doc.set_attribute(input, "disabled", "")?;
            } else {
                doc.remove_attribute(input, "disabled");
            }
        }

        if let Some(panel) = self.suggestions {
            self.sync_suggestions(doc, panel, state.suggestions)?;
        }

        doc.set_attribute(self.hidden, "value", state.tags.join(","))?;
        Ok(())
    }

    fn sync_pills(&self, doc: &mut Document, state: &RenderState<'_>) -> Result<()> {
        let stale: Vec<NodeId> = doc
            .children(self.editor)
            .iter()
            .copied()
            .filter(|&child| Some(child) != self.input)
            .collect();
        for child in stale {
            doc.remove(child)?;
        }

        let variant_class = format!("{}-{}", PILL_CLASS, state.variant);
        for tag in state.tags {
            let pill = doc.create_element("span");
            doc.add_class(pill, PILL_CLASS)?;
            doc.add_class(pill, &variant_class)?;
            if state.flashing == Some(tag.as_str()) {
                doc.add_class(pill, PILL_FLASH_CLASS)?;
            }
            doc.set_attribute(pill, "role", "option")?;
            doc.set_attribute(pill, "data-tag", tag.as_str())?;

            let text = doc.create_element("span");
            doc.add_class(text, PILL_TEXT_CLASS)?;
            doc.set_text(text, tag.as_str())?;
            doc.append_child(pill, text)?;

            if !state.read_only {
                let remove = doc.create_element("button");
                doc.add_class(remove, PILL_REMOVE_CLASS)?;
                doc.set_attribute(remove, "type", "button")?;
                doc.set_attribute(remove, "aria-label", format!("Remove {}", tag))?;
                doc.set_attribute(remove, "tabindex", "-1")?;
                doc.set_text(remove, "\u{00d7}")?;
                doc.append_child(pill, remove)?;
            }

            match self.input {
                Some(input) => doc.insert_before(self.editor, pill, input)?,
                None => doc.append_child(self.editor, pill)?,
            }
        }
        Ok(())
    }

    fn sync_suggestions(
        &self,
        doc: &mut Document,
        panel: NodeId,
        suggestions: &SuggestionState,
    ) -> Result<()> {
        doc.clear_children(panel)?;
        doc.toggle_class(panel, OPEN_CLASS, suggestions.is_open())?;
        if !suggestions.is_open() {
            return Ok(());
        }

        for (index, suggestion) in suggestions.filtered().iter().enumerate() {
            let item = doc.create_element("div");
            doc.add_class(item, SUGGESTION_ITEM_CLASS)?;
            if suggestions.highlighted() == Some(index) {
                doc.add_class(item, HIGHLIGHTED_CLASS)?;
            }
            doc.set_attribute(item, "data-index", index.to_string())?;
            doc.set_text(item, suggestion.as_str())?;
            doc.append_child(panel, item)?;
        }
        Ok(())
    }
}
