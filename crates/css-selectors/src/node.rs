use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// One simple selector: an optional type, an optional id, and sorted
/// duplicate-free sets of classes and pseudo-class states.
///
/// The canonical text form (`fullname`) is `type#id.class1.class2:state1:state2`
/// with classes and states in sorted order; it is determined solely by the
/// node's content.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimpleSelector {
    /// Element type name, `*` for the wildcard
    pub type_name: Option<String>,

    /// `#id`, at most one
    pub id: Option<String>,

    /// `.class` names
    pub classes: BTreeSet<String>,

    /// `:state` pseudo-class names
    pub status: BTreeSet<String>,
}

impl SimpleSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// A node matching any element.
    pub fn any() -> Self {
        SimpleSelector {
            type_name: Some("*".to_string()),
            ..Self::default()
        }
    }

    /// Whether no component has been set.
    pub fn is_empty(&self) -> bool {
        self.type_name.is_none()
            && self.id.is_none()
            && self.classes.is_empty()
            && self.status.is_empty()
    }

    /// Whether the type is the `*` wildcard.
    pub fn is_wildcard(&self) -> bool {
        self.type_name.as_deref() == Some("*")
    }

    /// The canonical concatenated name of this node.
    pub fn fullname(&self) -> String {
        let mut name = String::new();

        if let Some(type_name) = &self.type_name {
            name.push_str(type_name);
        }
        if let Some(id) = &self.id {
            name.push('#');
            name.push_str(id);
        }
        for class in &self.classes {
            name.push('.');
            name.push_str(class);
        }
        for state in &self.status {
            name.push(':');
            name.push_str(state);
        }

        name
    }

    /// Specificity contribution of this node: 100 per id, 10 per class or
    /// state, 1 for a concrete (non-wildcard) type.
    pub fn rank(&self) -> u32 {
        let mut rank = 0;

        if self.id.is_some() {
            rank += 100;
        }
        rank += 10 * (self.classes.len() + self.status.len()) as u32;
        if self.type_name.is_some() && !self.is_wildcard() {
            rank += 1;
        }

        rank
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(type_name: Option<&str>, id: Option<&str>, classes: &[&str], status: &[&str]) -> SimpleSelector {
        SimpleSelector {
            type_name: type_name.map(String::from),
            id: id.map(String::from),
            classes: classes.iter().map(|s| s.to_string()).collect(),
            status: status.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_fullname_is_sorted_and_canonical() {
        let selector = node(Some("tv"), Some("m"), &["b", "a"], &["h", "f"]);
        assert_eq!(selector.fullname(), "tv#m.a.b:f:h");

        let same_content = node(Some("tv"), Some("m"), &["a", "b"], &["f", "h"]);
        assert_eq!(selector.fullname(), same_content.fullname());
    }

    #[test]
    fn test_fullname_partial_nodes() {
        assert_eq!(node(None, None, &["red"], &[]).fullname(), ".red");
        assert_eq!(node(None, None, &[], &["hover"]).fullname(), ":hover");
        assert_eq!(node(Some("*"), None, &[], &[]).fullname(), "*");
        assert_eq!(node(Some("div"), None, &[], &[]).fullname(), "div");
    }

    #[test]
    fn test_rank() {
        assert_eq!(node(Some("div"), None, &[], &[]).rank(), 1);
        assert_eq!(node(Some("*"), None, &[], &[]).rank(), 0);
        assert_eq!(node(None, Some("x"), &[], &[]).rank(), 100);
        assert_eq!(node(Some("a"), Some("x"), &["b", "c"], &["h"]).rank(), 131);
    }
}
