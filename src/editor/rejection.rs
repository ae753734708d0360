//! Reasons an add can be refused.

use thiserror::Error;

/// Why a value was not added as a tag.
///
/// Variants are listed in the order they are checked; the first failing
/// check wins.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    /// The editor has been destroyed.
    #[error("the tag editor has been destroyed")]
    Destroyed,
    /// The value is empty (after trimming, when enabled).
    #[error("tag is empty")]
    Empty,
    /// The editor is read-only.
    #[error("tags are read-only")]
    ReadOnly,
    /// The value is longer than the per-tag cap.
    #[error("tag is longer than {max} characters")]
    TooLong { max: usize },
    /// The tag cap has been reached.
    #[error("no more than {max} tags allowed")]
    LimitReached { max: usize },
    /// The value is already a tag and duplicates are not allowed.
    #[error("tag is already added")]
    Duplicate,
    /// Free text is disabled and the value matches no suggestion.
    #[error("tag must be one of the suggestions")]
    NotInSuggestions,
    /// The custom validator refused the value.
    #[error("tag is not valid")]
    Invalid,
    /// The before-add hook vetoed the value.
    #[error("tag was refused")]
    Vetoed,
}

impl Rejection {
    /// Whether this rejection flashes the editor's error state.
    pub fn flashes_error(&self) -> bool {
        matches!(
            self,
            Rejection::TooLong { .. } | Rejection::NotInSuggestions | Rejection::Invalid
        )
    }

    /// Whether the host should surface this rejection to the user.
    ///
    /// Empty input, vetoes and calls on a read-only or destroyed editor stay silent.
    pub fn is_user_facing(&self) -> bool {
        !matches!(
            self,
            Rejection::Empty | Rejection::Vetoed | Rejection::Destroyed | Rejection::ReadOnly
        )
    }
}
