use std::collections::HashMap;
use std::rc::Rc;

use css_selectors::Selector;
use css_syntax::{SyntaxContext, TypeParser, ValueDef, ValueTypeId, ValueTypeRegistry};
use css_values::{KeywordId, KeywordRegistry, Value};
use lasso::{Rodeo, Spur};
use tracing::{debug, warn};

use crate::builtins;
use crate::declaration::{StyleDeclaration, StyleProperties};
use crate::errors::StyleError;
use crate::properties::{PropertyDef, PropertyKey, PropertyRegistry};
use crate::sheet::{StyleRule, StyleSheet};

/// The style engine: keyword, type and property registries, the style-link
/// trie, and the computed-style cache.
///
/// All mutating operations take `&mut self`; a host driving the engine from
/// several threads has to serialize access externally.
pub struct StyleEngine {
    keywords: KeywordRegistry,
    types: ValueTypeRegistry,
    properties: PropertyRegistry,
    sheet: StyleSheet,

    /// Computed declarations keyed by selector hash; flushed on every rule
    /// insertion. Collisions are accepted (cheap keying).
    cache: HashMap<u32, Rc<StyleDeclaration>>,

    /// De-duplicating pool for rule origin paths
    origins: Rodeo,
}

impl Default for StyleEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for StyleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StyleEngine")
            .field("keywords", &self.keywords.len())
            .field("properties", &self.properties.count())
            .field("rules", &self.sheet.rule_count())
            .field("cached_styles", &self.cache.len())
            .finish_non_exhaustive()
    }
}

impl StyleEngine {
    /// An engine with empty registries.
    pub fn new() -> Self {
        StyleEngine {
            keywords: KeywordRegistry::new(),
            types: ValueTypeRegistry::new(),
            properties: PropertyRegistry::new(),
            sheet: StyleSheet::new(),
            cache: HashMap::new(),
            origins: Rodeo::default(),
        }
    }

    /// An engine with the built-in types, keywords and properties installed.
    pub fn with_builtins() -> Result<Self, StyleError> {
        let mut engine = StyleEngine {
            types: ValueTypeRegistry::with_builtins(),
            ..Self::new()
        };
        builtins::install(&mut engine)?;
        Ok(engine)
    }

    pub fn keywords(&self) -> &KeywordRegistry {
        &self.keywords
    }

    pub fn register_keyword(&mut self, id: KeywordId, name: &str) -> Result<(), StyleError> {
        self.keywords.register(id, name)?;
        Ok(())
    }

    /// Register `name` under the next free keyword id.
    pub fn register_keyword_auto(&mut self, name: &str) -> KeywordId {
        self.keywords.register_auto(name)
    }

    pub fn keyword_key(&self, name: &str) -> Option<KeywordId> {
        self.keywords.key_of(name)
    }

    pub fn keyword_name(&self, id: KeywordId) -> Option<&str> {
        self.keywords.name_of(id)
    }

    /// Register a `<type>` parser usable in value definitions.
    pub fn register_value_type(&mut self, name: &str, parser: TypeParser) -> ValueTypeId {
        self.types.register(name, parser)
    }

    /// Compile `definition_text` and map `alias` to the resulting tree;
    /// wherever the alias appears in a later definition, the tree is cloned
    /// in place.
    pub fn register_value_type_alias(
        &mut self,
        alias: &str,
        definition_text: &str,
    ) -> Result<(), StyleError> {
        let definition = SyntaxContext::new(&self.keywords, &self.types).compile(definition_text)?;
        self.types.register_alias(alias, definition);
        Ok(())
    }

    pub fn resolve_value_type_alias(&self, alias: &str) -> Option<&ValueDef> {
        self.types.resolve_alias(alias)
    }

    /// Register a property: compile its syntax, parse its initial value.
    pub fn register_property(
        &mut self,
        name: &str,
        syntax_text: &str,
        initial_text: &str,
    ) -> Result<PropertyKey, StyleError> {
        let context = SyntaxContext::new(&self.keywords, &self.types);
        self.properties
            .register(name, syntax_text, initial_text, &context)
    }

    /// Register a property under a fixed key, growing the table as needed.
    pub fn register_property_with_key(
        &mut self,
        key: PropertyKey,
        name: &str,
        syntax_text: &str,
        initial_text: &str,
    ) -> Result<(), StyleError> {
        let context = SyntaxContext::new(&self.keywords, &self.types);
        self.properties
            .register_with_key(key, name, syntax_text, initial_text, &context)
    }

    pub fn get_property(&self, name: &str) -> Option<&PropertyDef> {
        self.properties.get(name)
    }

    pub fn get_property_by_key(&self, key: PropertyKey) -> Option<&PropertyDef> {
        self.properties.get_by_key(key)
    }

    pub fn property_count(&self) -> usize {
        self.properties.count()
    }

    /// Parse one declaration value against the named property's syntax.
    pub fn parse_property_value(&self, name: &str, value_text: &str) -> Option<Value> {
        let definition = &self.properties.get(name)?.syntax;
        SyntaxContext::new(&self.keywords, &self.types).parse_value(definition, value_text)
    }

    /// Turn `(property, value-text)` pairs into a validated properties list.
    ///
    /// Unknown properties and values that fail to parse are skipped with a
    /// warning; the rest of the body still loads.
    pub fn parse_properties(&self, pairs: &[(&str, &str)]) -> StyleProperties {
        let mut properties = StyleProperties::new();

        for (name, value_text) in pairs.iter().copied() {
            let Some(def) = self.properties.get(name) else {
                warn!(property = name, "skipping unknown property");
                continue;
            };

            let context = SyntaxContext::new(&self.keywords, &self.types);
            match context.parse_value(&def.syntax, value_text) {
                Some(value) => properties.set(def.key, value),
                None => {
                    warn!(property = name, value = value_text, "skipping malformed value");
                }
            }
        }

        properties
    }

    /// Parse `selector_text` and index the rule body under it.
    pub fn add_rule(
        &mut self,
        selector_text: &str,
        properties: StyleProperties,
        origin: Option<&str>,
    ) -> Result<(), StyleError> {
        let selector = Selector::parse(selector_text)?;
        self.insert_rule(&selector, properties, origin);
        Ok(())
    }

    /// Index a rule body under an already-parsed selector.
    pub fn insert_rule(
        &mut self,
        selector: &Selector,
        properties: StyleProperties,
        origin: Option<&str>,
    ) {
        let origin = origin.map(|path| self.origins.get_or_intern(path));
        let rule = StyleRule::new(selector, properties, origin);

        debug!(
            selector = %rule.selector_text,
            rank = rule.rank,
            batch = rule.batch_num,
            "adding style rule"
        );

        self.sheet.insert(selector, rule);
        self.cache.clear();
    }

    /// Every rule matched by `selector`, in cascade order.
    pub fn query_selector(&self, selector: &Selector) -> Vec<&StyleRule> {
        self.sheet.query(selector)
    }

    /// The cascaded declaration for `selector`.
    ///
    /// Served from the cache when possible; the returned declaration is
    /// shared and read-only.
    pub fn computed_style(&mut self, selector: &Selector) -> Rc<StyleDeclaration> {
        if let Some(hit) = self.cache.get(&selector.hash()) {
            return Rc::clone(hit);
        }

        let mut declaration = StyleDeclaration::with_len(self.properties.count());
        for rule in self.sheet.query(selector) {
            for (key, value) in rule.properties.iter() {
                // The list is in cascade order, so the first writer wins.
                if !declaration.contains(key) {
                    declaration.set(key, value.clone());
                }
            }
        }

        let shared = Rc::new(declaration);
        self.cache.insert(selector.hash(), Rc::clone(&shared));
        shared
    }

    /// Number of cached computed declarations.
    pub fn cached_styles(&self) -> usize {
        self.cache.len()
    }

    /// Resolve an interned origin path.
    pub fn origin_name(&self, origin: Spur) -> &str {
        self.origins.resolve(&origin)
    }

    /// Write every rule matched by `selector`, in cascade order.
    pub fn write_rules<W: std::fmt::Write>(
        &self,
        selector: &Selector,
        out: &mut W,
    ) -> std::fmt::Result {
        for rule in self.sheet.query(selector) {
            self.write_rule(rule, out)?;
        }
        Ok(())
    }

    /// Write the trie summary followed by every stored rule.
    pub fn write_all<W: std::fmt::Write>(&self, out: &mut W) -> std::fmt::Result {
        self.sheet.write_tree(out)?;

        let mut rules: Vec<&StyleRule> = self.sheet.iter_rules().collect();
        rules.sort_by_key(|rule| rule.batch_num);

        for rule in rules {
            self.write_rule(rule, out)?;
        }
        Ok(())
    }

    fn write_rule<W: std::fmt::Write>(&self, rule: &StyleRule, out: &mut W) -> std::fmt::Result {
        write!(out, "{} {{", rule.selector_text)?;
        for (key, value) in rule.properties.iter() {
            let name = self
                .properties
                .get_by_key(key)
                .map(|def| def.name.as_str())
                .unwrap_or("?");
            write!(out, " {}: {};", name, self.format_value(value))?;
        }
        write!(out, " }}")?;

        write!(out, "  /* rank {}, batch {}", rule.rank, rule.batch_num)?;
        if let Some(origin) = rule.origin {
            write!(out, ", origin {}", self.origin_name(origin))?;
        }
        writeln!(out, " */")
    }

    /// Readable form of a value, for diagnostics only.
    fn format_value(&self, value: &Value) -> String {
        match value {
            Value::None => "none".to_string(),
            Value::Invalid => "<invalid>".to_string(),
            Value::Unparsed(text) => text.clone(),
            Value::Numeric(number) => number.to_string(),
            Value::Integer(number) => number.to_string(),
            Value::String(text) => format!("\"{text}\""),
            Value::Keyword(id) => self
                .keywords
                .name_of(*id)
                .unwrap_or("<unknown keyword>")
                .to_string(),
            Value::Color(color) => format!(
                "#{:02x}{:02x}{:02x}{:02x}",
                color.r, color.g, color.b, color.a
            ),
            Value::Image(url) => format!("url({url})"),
            Value::Unit(unit_value) => unit_value.to_string(),
            Value::Array(items) => {
                let parts: Vec<String> =
                    items.iter().map(|item| self.format_value(item)).collect();
                parts.join(" ")
            }
        }
    }
}
