//! CSS Style Module
//!
//! This crate turns registered style rules into computed declarations: it
//! holds the property registry, the style-link trie that indexes rules by
//! compound selector, and the cascade engine with its computed-style cache.

/// Built-in keyword, type and property tables installed at engine setup.
mod builtins;

/// Dense declarations and sparse property lists.
mod declaration;

/// The engine facade owning the registries, the trie and the cache.
mod engine;

/// Errors surfaced by registration and rule insertion.
mod errors;

/// The property registry.
mod properties;

/// The style-link trie.
mod sheet;

pub use declaration::{StyleDeclaration, StyleProperties};
pub use engine::StyleEngine;
pub use errors::StyleError;
pub use properties::{PropertyDef, PropertyKey, PropertyRegistry};
pub use sheet::{StyleRule, StyleSheet};
