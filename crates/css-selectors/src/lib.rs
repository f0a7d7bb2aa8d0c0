//! CSS Selectors Module
//!
//! This crate implements the selector model used by the style engine: a
//! selector is an ordered chain of simple-selector nodes separated by
//! whitespace (the descendant combinator), each node carrying an optional
//! type, an optional id, and sorted sets of classes and pseudo-class states.
//! It also provides the compound-name expansion used to index and look up
//! nodes in the style-link trie.

/// Errors reported by the selector parser.
mod errors;

/// Compound-name expansion for trie indexing.
mod expand;

/// The simple-selector node model.
mod node;

/// The character-driven selector parser.
mod parser;

/// The compound selector.
mod selector;

pub use errors::SelectorError;
pub use expand::expand_names;
pub use node::SimpleSelector;
pub use selector::{MAX_FULLNAME_LEN, MAX_SELECTOR_DEPTH, Selector};
