//! CSS Syntax Module
//!
//! This crate compiles the W3C value-definition mini-language
//! (`auto | <length> | <percentage>`, juxtaposition, `&&`, `||`, `|`,
//! bracket groups, `<type>` references, repetition suffixes) into a
//! `ValueDef` tree, and parses property value text against a compiled tree.
//! <https://www.w3.org/TR/css-values-4/#value-defs>

/// Compiling definition text into `ValueDef` trees.
mod definition;

/// Errors reported by the compiler and the registries.
mod errors;

/// Matching value text against a compiled definition.
mod parse;

/// Parsers for the built-in `<type>` references.
pub mod parsers;

/// Character scanner over definition text.
mod scanner;

/// The value-type registry and built-in `<type>` parsers.
mod types;

pub use definition::{Combinator, REPEAT_UNBOUNDED, SyntaxContext, ValueDef};
pub use errors::ValueDefError;
pub use types::{TypeParser, ValueType, ValueTypeId, ValueTypeRegistry};
