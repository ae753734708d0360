//! Suggestion dropdown state and default filtering.

/// Filter `all` against a lower-cased `query`.
///
/// A suggestion is kept when it matches (forced by `show_all`, an empty query,
/// or a case-insensitive substring hit) and, unless duplicates are allowed,
/// is not already a tag. Relative order is preserved.
pub fn default_filter(
    all: &[String],
    query: &str,
    tags: &[String],
    allow_duplicates: bool,
    show_all: bool,
) -> Vec<String> {
    all.iter()
        .filter(|s| show_all || query.is_empty() || s.to_lowercase().contains(query))
        .filter(|s| allow_duplicates || !tags.contains(s))
        .cloned()
        .collect()
}

/// Open/closed state of the dropdown and its highlighted row.
///
/// `highlighted`, when set, always indexes into `filtered`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuggestionState {
    filtered: Vec<String>,
    highlighted: Option<usize>,
    open: bool,
}

impl SuggestionState {
    /// Create a closed, empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open with a freshly filtered list. An empty list closes instead.
    pub fn open_with(&mut self, filtered: Vec<String>) {
        if filtered.is_empty() {
            self.close();
            return;
        }
        self.filtered = filtered;
        self.highlighted = None;
        self.open = true;
    }

    /// Close and forget the filtered list.
    pub fn close(&mut self) {
        self.filtered.clear();
        self.highlighted = None;
        self.open = false;
    }

    /// Whether the dropdown is visible.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// The currently filtered suggestions.
    pub fn filtered(&self) -> &[String] {
        &self.filtered
    }

    /// Index of the highlighted suggestion.
    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    /// The highlighted suggestion's value.
    pub fn highlighted_value(&self) -> Option<&str> {
        self.highlighted
            .and_then(|i| self.filtered.get(i))
            .map(String::as_str)
    }

    /// Highlight a row. Out-of-range indices are ignored.
    pub fn set_highlighted(&mut self, index: usize) {
        if index < self.filtered.len() {
            self.highlighted = Some(index);
        }
    }

    /// Move the highlight down one row, stopping at the last.
    pub fn highlight_next(&mut self) {
        if self.filtered.is_empty() {
            return;
        }
        let last = self.filtered.len() - 1;
        self.highlighted = Some(match self.highlighted {
            None => 0,
            Some(i) => (i + 1).min(last),
        });
    }

    /// Move the highlight up one row, stopping at the first.
    pub fn highlight_previous(&mut self) {
        if self.filtered.is_empty() {
            return;
        }
        self.highlighted = Some(self.highlighted.map_or(0, |i| i.saturating_sub(1)));
    }
}
