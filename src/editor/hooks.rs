//! Host callbacks for a tag editor.

use std::fmt;

type TagCallback = Box<dyn FnMut(&str)>;
type ChangeCallback = Box<dyn FnMut(&[String])>;
type BeforeAddCallback = Box<dyn FnMut(&str) -> Option<bool>>;
type Validator = Box<dyn Fn(&str) -> bool>;
type SuggestionFilter = Box<dyn Fn(&[String], &str, &[String]) -> Vec<String>>;

/// Optional callbacks invoked by a [`TagEditor`](super::TagEditor).
///
/// Callbacks run synchronously inside the editor operation that triggers
/// them, after the editor's markup has been updated.
#[derive(Default)]
pub struct TagEditorHooks {
    pub(super) on_add: Option<TagCallback>,
    pub(super) on_remove: Option<TagCallback>,
    pub(super) on_change: Option<ChangeCallback>,
    pub(super) on_before_add: Option<BeforeAddCallback>,
    pub(super) validate: Option<Validator>,
    pub(super) filter_suggestions: Option<SuggestionFilter>,
}

impl TagEditorHooks {
    /// Create an empty hook set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Called with each tag after it is added.
    pub fn on_add(mut self, f: impl FnMut(&str) + 'static) -> Self {
        self.on_add = Some(Box::new(f));
        self
    }

    /// Called with each tag after it is removed.
    pub fn on_remove(mut self, f: impl FnMut(&str) + 'static) -> Self {
        self.on_remove = Some(Box::new(f));
        self
    }

    /// Called with the full tag list after any change.
    pub fn on_change(mut self, f: impl FnMut(&[String]) + 'static) -> Self {
        self.on_change = Some(Box::new(f));
        self
    }

    /// Called before a validated tag is added. Returning `Some(false)` drops
    /// the tag silently; `None` and `Some(true)` let it through.
    pub fn on_before_add(mut self, f: impl FnMut(&str) -> Option<bool> + 'static) -> Self {
        self.on_before_add = Some(Box::new(f));
        self
    }

    /// Custom validation. Returning `false` rejects the tag with an error flash.
    pub fn validate(mut self, f: impl Fn(&str) -> bool + 'static) -> Self {
        self.validate = Some(Box::new(f));
        self
    }

    /// Replace the default suggestion filter.
    ///
    /// Receives all suggestions, the lower-cased query and the current tags.
    pub fn filter_suggestions(
        mut self,
        f: impl Fn(&[String], &str, &[String]) -> Vec<String> + 'static,
    ) -> Self {
        self.filter_suggestions = Some(Box::new(f));
        self
    }
}

impl fmt::Debug for TagEditorHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TagEditorHooks")
            .field("on_add", &self.on_add.is_some())
            .field("on_remove", &self.on_remove.is_some())
            .field("on_change", &self.on_change.is_some())
            .field("on_before_add", &self.on_before_add.is_some())
            .field("validate", &self.validate.is_some())
            .field("filter_suggestions", &self.filter_suggestions.is_some())
            .finish()
    }
}
