use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A stable integer id for a registered CSS keyword.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct KeywordId(pub u32);

impl std::fmt::Display for KeywordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeywordError {
    /// Registering would overwrite an existing id or name.
    #[error("keyword `{name}` (id {id}) collides with an existing registration")]
    Duplicate { id: KeywordId, name: String },
}

/// Bidirectional mapping between keyword ids and canonical keyword names.
///
/// Registration is append-only: once an id or a name is taken, a second
/// registration touching either is rejected.
#[derive(Debug, Default)]
pub struct KeywordRegistry {
    by_name: HashMap<String, KeywordId>,
    by_id: HashMap<KeywordId, String>,
    next_id: u32,
}

impl KeywordRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `name` under the caller-chosen `id`.
    ///
    /// Fails if either direction of the mapping already has an entry.
    pub fn register(&mut self, id: KeywordId, name: &str) -> Result<(), KeywordError> {
        if self.by_id.contains_key(&id) || self.by_name.contains_key(name) {
            return Err(KeywordError::Duplicate {
                id,
                name: name.to_string(),
            });
        }

        self.by_name.insert(name.to_string(), id);
        self.by_id.insert(id, name.to_string());

        if id.0 >= self.next_id {
            self.next_id = id.0 + 1;
        }

        Ok(())
    }

    /// Register `name` under the next free id, or return the id it already
    /// has. Used for the built-in keyword table where ids are not
    /// significant, only stable.
    pub fn register_auto(&mut self, name: &str) -> KeywordId {
        if let Some(id) = self.by_name.get(name) {
            return *id;
        }

        while self.by_id.contains_key(&KeywordId(self.next_id)) {
            self.next_id += 1;
        }

        let id = KeywordId(self.next_id);
        self.next_id += 1;

        self.by_name.insert(name.to_string(), id);
        self.by_id.insert(id, name.to_string());

        id
    }

    /// Exact-match lookup of a keyword id by name.
    pub fn key_of(&self, name: &str) -> Option<KeywordId> {
        self.by_name.get(name).copied()
    }

    /// Exact-match lookup of a keyword name by id.
    pub fn name_of(&self, id: KeywordId) -> Option<&str> {
        self.by_id.get(&id).map(String::as_str)
    }

    /// Number of registered keywords.
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_lookup() {
        let mut registry = KeywordRegistry::new();
        registry.register(KeywordId(1), "auto").unwrap();
        registry.register(KeywordId(2), "none").unwrap();

        assert_eq!(registry.key_of("auto"), Some(KeywordId(1)));
        assert_eq!(registry.key_of("none"), Some(KeywordId(2)));
        assert_eq!(registry.name_of(KeywordId(1)), Some("auto"));
        assert_eq!(registry.key_of("inherit"), None);
        assert_eq!(registry.name_of(KeywordId(9)), None);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut registry = KeywordRegistry::new();
        registry.register(KeywordId(1), "auto").unwrap();

        let err = registry.register(KeywordId(1), "none").unwrap_err();
        assert!(matches!(err, KeywordError::Duplicate { .. }));
        assert_eq!(registry.key_of("none"), None);
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut registry = KeywordRegistry::new();
        registry.register(KeywordId(1), "auto").unwrap();

        assert!(registry.register(KeywordId(2), "auto").is_err());
        assert_eq!(registry.key_of("auto"), Some(KeywordId(1)));
    }

    #[test]
    fn test_register_auto_skips_taken_ids() {
        let mut registry = KeywordRegistry::new();
        registry.register(KeywordId(0), "auto").unwrap();
        registry.register(KeywordId(1), "none").unwrap();

        let id = registry.register_auto("normal");
        assert_eq!(id, KeywordId(2));

        // Idempotent for an already-known name.
        assert_eq!(registry.register_auto("auto"), KeywordId(0));
        assert_eq!(registry.len(), 3);
    }
}
