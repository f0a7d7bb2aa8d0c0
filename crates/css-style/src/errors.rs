use css_selectors::SelectorError;
use css_syntax::ValueDefError;
use css_values::KeywordError;
use thiserror::Error;

use crate::properties::PropertyKey;

/// Errors surfaced by engine registration and rule insertion.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StyleError {
    #[error("selector: {0}")]
    Selector(#[from] SelectorError),

    #[error("value definition: {0}")]
    ValueDef(#[from] ValueDefError),

    #[error("keyword: {0}")]
    Keyword(#[from] KeywordError),

    /// A property name registered twice
    #[error("property `{name}` is already registered")]
    DuplicateProperty { name: String },

    /// An explicit key already assigned to another property
    #[error("property key {key} is already taken by `{name}`")]
    KeyTaken { key: PropertyKey, name: String },
}
