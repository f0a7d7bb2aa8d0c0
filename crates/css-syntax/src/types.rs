use std::collections::HashMap;

use css_values::Value;

use crate::definition::ValueDef;
use crate::parsers;

/// A function that parses one whitespace-delimited component against a
/// registered `<type>`, returning `None` when the component does not match.
pub type TypeParser = fn(&str) -> Option<Value>;

/// Index of a type in the registry; stored in `ValueDef::Type` nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ValueTypeId(pub usize);

/// A registered `<type>` reference target.
pub struct ValueType {
    /// Canonical name without the angle brackets, e.g. `length`
    pub name: String,

    /// Parser invoked for components matched against this type
    pub parser: TypeParser,
}

impl std::fmt::Debug for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValueType").field("name", &self.name).finish()
    }
}

/// Registry of `<type>` references and type aliases usable in value
/// definitions.
///
/// Aliases map a bare identifier to a previously compiled tree that gets
/// cloned in place wherever the identifier appears.
#[derive(Debug, Default)]
pub struct ValueTypeRegistry {
    types: Vec<ValueType>,
    by_name: HashMap<String, ValueTypeId>,
    aliases: HashMap<String, ValueDef>,
}

impl ValueTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with the engine's built-in `<type>` set installed.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();

        registry.register("length", parsers::parse_length);
        registry.register("percentage", parsers::parse_percentage);
        registry.register("number", parsers::parse_number);
        registry.register("integer", parsers::parse_integer);
        registry.register("color", parsers::parse_color);
        registry.register("string", parsers::parse_string);
        registry.register("url", parsers::parse_url);
        registry.register("image", parsers::parse_url);
        registry.register("angle", parsers::parse_angle);
        registry.register("time", parsers::parse_time);

        registry
    }

    /// Register a type parser under `name`, or return the id of the existing
    /// registration with that name.
    pub fn register(&mut self, name: &str, parser: TypeParser) -> ValueTypeId {
        if let Some(id) = self.by_name.get(name) {
            return *id;
        }

        let id = ValueTypeId(self.types.len());
        self.types.push(ValueType {
            name: name.to_string(),
            parser,
        });
        self.by_name.insert(name.to_string(), id);

        id
    }

    /// Map a bare identifier to a compiled definition tree.
    pub fn register_alias(&mut self, alias: &str, definition: ValueDef) {
        self.aliases.insert(alias.to_string(), definition);
    }

    pub fn resolve(&self, name: &str) -> Option<ValueTypeId> {
        self.by_name.get(name).copied()
    }

    pub fn resolve_alias(&self, alias: &str) -> Option<&ValueDef> {
        self.aliases.get(alias)
    }

    pub fn get(&self, id: ValueTypeId) -> Option<&ValueType> {
        self.types.get(id.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_is_idempotent() {
        let mut registry = ValueTypeRegistry::new();
        let first = registry.register("length", parsers::parse_length);
        let again = registry.register("length", parsers::parse_length);

        assert_eq!(first, again);
        assert_eq!(registry.resolve("length"), Some(first));
        assert_eq!(registry.resolve("nonsense"), None);
    }

    #[test]
    fn test_builtins_present() {
        let registry = ValueTypeRegistry::with_builtins();
        for name in ["length", "percentage", "number", "integer", "color", "string", "url", "image", "angle", "time"] {
            assert!(registry.resolve(name).is_some(), "missing builtin `{name}`");
        }
    }

    #[test]
    fn test_get_exposes_parser() {
        let registry = ValueTypeRegistry::with_builtins();
        let id = registry.resolve("integer").unwrap();
        let value_type = registry.get(id).unwrap();

        assert_eq!(value_type.name, "integer");
        assert_eq!((value_type.parser)("7"), Some(Value::Integer(7)));
    }
}
