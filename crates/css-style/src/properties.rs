use std::collections::HashMap;

use css_syntax::{SyntaxContext, ValueDef};
use css_values::Value;
use tracing::warn;

use crate::errors::StyleError;

/// Dense index of a registered property, usable directly as an array slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PropertyKey(pub usize);

impl std::fmt::Display for PropertyKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A registered property: its compiled value definition and initial value.
#[derive(Debug)]
pub struct PropertyDef {
    pub key: PropertyKey,
    pub name: String,

    /// Compiled value-definition tree driving value parsing
    pub syntax: ValueDef,

    /// Parsed initial value; `Value::Invalid` when the initial text did not
    /// match the syntax
    pub initial: Value,
}

/// Append-only mapping from property names to dense keys and definitions.
#[derive(Debug, Default)]
pub struct PropertyRegistry {
    defs: Vec<Option<PropertyDef>>,
    by_name: HashMap<String, PropertyKey>,
}

impl PropertyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a property under the next free key.
    ///
    /// The syntax text must compile; an initial value that fails to parse
    /// against it is stored as `Value::Invalid`.
    pub fn register(
        &mut self,
        name: &str,
        syntax_text: &str,
        initial_text: &str,
        context: &SyntaxContext,
    ) -> Result<PropertyKey, StyleError> {
        let key = PropertyKey(self.defs.len());
        self.register_with_key(key, name, syntax_text, initial_text, context)?;
        Ok(key)
    }

    /// Register a property under a caller-chosen key, growing the table as
    /// needed. Used for built-ins with fixed keys.
    pub fn register_with_key(
        &mut self,
        key: PropertyKey,
        name: &str,
        syntax_text: &str,
        initial_text: &str,
        context: &SyntaxContext,
    ) -> Result<(), StyleError> {
        if self.by_name.contains_key(name) {
            return Err(StyleError::DuplicateProperty {
                name: name.to_string(),
            });
        }
        if let Some(Some(existing)) = self.defs.get(key.0) {
            return Err(StyleError::KeyTaken {
                key,
                name: existing.name.clone(),
            });
        }

        let syntax = context.compile(syntax_text)?;
        let initial = context.parse_value(&syntax, initial_text).unwrap_or_else(|| {
            warn!(property = name, initial = initial_text, "initial value does not match syntax");
            Value::Invalid
        });

        if self.defs.len() <= key.0 {
            self.defs.resize_with(key.0 + 1, || None);
        }
        self.defs[key.0] = Some(PropertyDef {
            key,
            name: name.to_string(),
            syntax,
            initial,
        });
        self.by_name.insert(name.to_string(), key);

        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&PropertyDef> {
        self.get_by_key(*self.by_name.get(name)?)
    }

    pub fn get_by_key(&self, key: PropertyKey) -> Option<&PropertyDef> {
        self.defs.get(key.0)?.as_ref()
    }

    pub fn key_of(&self, name: &str) -> Option<PropertyKey> {
        self.by_name.get(name).copied()
    }

    /// Size of the dense key space (largest key + 1).
    pub fn count(&self) -> usize {
        self.defs.len()
    }

    /// Registered definitions, in key order.
    pub fn iter(&self) -> impl Iterator<Item = &PropertyDef> {
        self.defs.iter().filter_map(Option::as_ref)
    }
}

#[cfg(test)]
mod tests {
    use css_syntax::ValueTypeRegistry;
    use css_values::{KeywordRegistry, Unit, UnitValue};

    use super::*;

    fn fixture() -> (KeywordRegistry, ValueTypeRegistry) {
        let mut keywords = KeywordRegistry::new();
        keywords.register_auto("auto");
        keywords.register_auto("none");
        (keywords, ValueTypeRegistry::with_builtins())
    }

    #[test]
    fn test_register_assigns_dense_keys() {
        let (keywords, types) = fixture();
        let context = SyntaxContext::new(&keywords, &types);
        let mut registry = PropertyRegistry::new();

        let width = registry
            .register("width", "auto | <length> | <percentage>", "auto", &context)
            .unwrap();
        let height = registry
            .register("height", "auto | <length> | <percentage>", "auto", &context)
            .unwrap();

        assert_eq!(width, PropertyKey(0));
        assert_eq!(height, PropertyKey(1));
        assert_eq!(registry.count(), 2);
        assert_eq!(registry.get("width").unwrap().key, width);
        assert_eq!(registry.get_by_key(height).unwrap().name, "height");
    }

    #[test]
    fn test_initial_value_is_parsed() {
        let (keywords, types) = fixture();
        let context = SyntaxContext::new(&keywords, &types);
        let mut registry = PropertyRegistry::new();

        let key = registry
            .register("margin-top", "<length> | <percentage> | auto", "0", &context)
            .unwrap();
        assert_eq!(
            registry.get_by_key(key).unwrap().initial,
            Value::Unit(UnitValue::new(0.0, Unit::Px))
        );
    }

    #[test]
    fn test_bad_initial_becomes_invalid() {
        let (keywords, types) = fixture();
        let context = SyntaxContext::new(&keywords, &types);
        let mut registry = PropertyRegistry::new();

        let key = registry
            .register("width", "auto | <length>", "blue", &context)
            .unwrap();
        assert_eq!(registry.get_by_key(key).unwrap().initial, Value::Invalid);
    }

    #[test]
    fn test_bad_syntax_is_an_error() {
        let (keywords, types) = fixture();
        let context = SyntaxContext::new(&keywords, &types);
        let mut registry = PropertyRegistry::new();

        let result = registry.register("width", "auto | <nonsense>", "auto", &context);
        assert!(matches!(result, Err(StyleError::ValueDef(_))));
        assert_eq!(registry.count(), 0);
        assert!(registry.get("width").is_none());
    }

    #[test]
    fn test_register_with_key_grows_table() {
        let (keywords, types) = fixture();
        let context = SyntaxContext::new(&keywords, &types);
        let mut registry = PropertyRegistry::new();

        registry
            .register_with_key(PropertyKey(4), "opacity", "<number>", "1", &context)
            .unwrap();
        assert_eq!(registry.count(), 5);
        assert_eq!(registry.key_of("opacity"), Some(PropertyKey(4)));

        // The next auto key lands after the grown table.
        let key = registry.register("width", "auto | <length>", "auto", &context).unwrap();
        assert_eq!(key, PropertyKey(5));
    }

    #[test]
    fn test_duplicate_registrations_rejected() {
        let (keywords, types) = fixture();
        let context = SyntaxContext::new(&keywords, &types);
        let mut registry = PropertyRegistry::new();

        registry.register("width", "auto | <length>", "auto", &context).unwrap();
        assert!(matches!(
            registry.register("width", "<length>", "0", &context),
            Err(StyleError::DuplicateProperty { .. })
        ));
        assert!(matches!(
            registry.register_with_key(PropertyKey(0), "height", "<length>", "0", &context),
            Err(StyleError::KeyTaken { .. })
        ));
    }
}
