use css_values::Value;

use crate::properties::PropertyKey;

/// A dense style declaration indexed by property key.
///
/// A slot holding `Value::Invalid` is unset. The declaration grows on
/// demand; its length covers the largest key written so far.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct StyleDeclaration {
    slots: Vec<Value>,
}

impl StyleDeclaration {
    pub fn new() -> Self {
        Self::default()
    }

    /// A declaration with `len` unset slots.
    pub fn with_len(len: usize) -> Self {
        StyleDeclaration {
            slots: vec![Value::Invalid; len],
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The value stored under `key`, if the slot is set.
    pub fn get(&self, key: PropertyKey) -> Option<&Value> {
        self.slots.get(key.0).filter(|value| value.is_valid())
    }

    /// Whether the slot under `key` is set.
    pub fn contains(&self, key: PropertyKey) -> bool {
        self.get(key).is_some()
    }

    /// Store a value, growing the declaration if needed.
    pub fn set(&mut self, key: PropertyKey, value: Value) {
        if self.slots.len() <= key.0 {
            self.slots.resize(key.0 + 1, Value::Invalid);
        }
        self.slots[key.0] = value;
    }

    /// Unset the slot under `key`.
    pub fn unset(&mut self, key: PropertyKey) {
        if let Some(slot) = self.slots.get_mut(key.0) {
            *slot = Value::Invalid;
        }
    }

    /// Copy every valid `src` slot that is still unset here, growing to
    /// `src`'s length as needed.
    pub fn merge(&mut self, src: &StyleDeclaration) {
        if self.slots.len() < src.slots.len() {
            self.slots.resize(src.slots.len(), Value::Invalid);
        }
        for (index, value) in src.slots.iter().enumerate() {
            if value.is_valid() && !self.slots[index].is_valid() {
                self.slots[index] = value.clone();
            }
        }
    }

    /// Overwrite from every valid `src` slot, growing to `src`'s length as
    /// needed.
    pub fn replace(&mut self, src: &StyleDeclaration) {
        if self.slots.len() < src.slots.len() {
            self.slots.resize(src.slots.len(), Value::Invalid);
        }
        for (index, value) in src.slots.iter().enumerate() {
            if value.is_valid() {
                self.slots[index] = value.clone();
            }
        }
    }

    /// Set slots, in key order.
    pub fn iter(&self) -> impl Iterator<Item = (PropertyKey, &Value)> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, value)| value.is_valid())
            .map(|(index, value)| (PropertyKey(index), value))
    }
}

/// A sparse ordered list of `(key, value)` pairs, used to accumulate rule
/// bodies before they are merged into a declaration.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct StyleProperties {
    entries: Vec<(PropertyKey, Value)>,
}

impl StyleProperties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a value, replacing an earlier entry for the same key in place.
    pub fn set(&mut self, key: PropertyKey, value: Value) {
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    pub fn get(&self, key: PropertyKey) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (PropertyKey, &Value)> {
        self.entries.iter().map(|(key, value)| (*key, value))
    }
}

impl FromIterator<(PropertyKey, Value)> for StyleProperties {
    fn from_iter<T: IntoIterator<Item = (PropertyKey, Value)>>(iter: T) -> Self {
        let mut properties = StyleProperties::new();
        for (key, value) in iter {
            properties.set(key, value);
        }
        properties
    }
}
