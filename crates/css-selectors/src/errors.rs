use thiserror::Error;

use crate::selector::{MAX_FULLNAME_LEN, MAX_SELECTOR_DEPTH};

/// Errors produced while parsing or extending a selector.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorError {
    /// A character outside the selector alphabet
    #[error("unexpected character `{ch}` at offset {offset}")]
    UnexpectedCharacter { ch: char, offset: usize },

    /// A `#`, `.` or `:` prefix with no name after it
    #[error("missing name after `{prefix}` at offset {offset}")]
    EmptyName { prefix: char, offset: usize },

    /// A second `#id` on the same simple selector
    #[error("id set twice at offset {offset}")]
    DuplicateId { offset: usize },

    /// No simple selector in the input at all
    #[error("empty selector")]
    Empty,

    /// More than `MAX_SELECTOR_DEPTH` simple selectors
    #[error("selector exceeds {MAX_SELECTOR_DEPTH} simple selectors")]
    TooDeep,

    /// A generated node name longer than `MAX_FULLNAME_LEN` characters
    #[error("selector name exceeds {MAX_FULLNAME_LEN} characters")]
    NameTooLong,
}
