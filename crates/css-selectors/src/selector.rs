use std::sync::atomic::{AtomicU64, Ordering};

use crate::errors::SelectorError;
use crate::node::SimpleSelector;
use crate::parser;

/// Maximum number of simple selectors in one compound selector.
pub const MAX_SELECTOR_DEPTH: usize = 32;

/// Maximum length of a generated node name, in characters.
pub const MAX_FULLNAME_LEN: usize = 1024;

/// Source-order tie break: every selector gets the next value at creation,
/// so a later rule wins over an earlier one of equal specificity.
static NEXT_BATCH: AtomicU64 = AtomicU64::new(1);

fn next_batch_num() -> u64 {
    NEXT_BATCH.fetch_add(1, Ordering::Relaxed)
}

/// A compound selector: simple-selector nodes in ancestor-to-target order,
/// with cached specificity, source-order batch number, and name hash.
#[derive(Debug, Clone)]
pub struct Selector {
    nodes: Vec<SimpleSelector>,
    rank: u32,
    batch_num: u64,
    hash: u32,
}

impl Selector {
    /// Parse selector text into a compound selector.
    pub fn parse(input: &str) -> Result<Selector, SelectorError> {
        let nodes = parser::parse_nodes(input)?;
        Selector::from_nodes(nodes)
    }

    pub(crate) fn from_nodes(nodes: Vec<SimpleSelector>) -> Result<Selector, SelectorError> {
        if nodes.is_empty() {
            return Err(SelectorError::Empty);
        }
        if nodes.len() > MAX_SELECTOR_DEPTH {
            tracing::warn!(depth = nodes.len(), "selector too deep, rejecting");
            return Err(SelectorError::TooDeep);
        }

        let mut selector = Selector {
            nodes,
            rank: 0,
            batch_num: next_batch_num(),
            hash: 0,
        };
        selector.refresh();
        Ok(selector)
    }

    /// Append one more target node, making the current target an ancestor.
    pub fn append(&mut self, node: SimpleSelector) -> Result<(), SelectorError> {
        if self.nodes.len() == MAX_SELECTOR_DEPTH {
            tracing::warn!(depth = self.nodes.len() + 1, "selector too deep, rejecting");
            return Err(SelectorError::TooDeep);
        }
        if node.fullname().chars().count() > MAX_FULLNAME_LEN {
            return Err(SelectorError::NameTooLong);
        }

        self.nodes.push(node);
        self.refresh();
        Ok(())
    }

    /// Nodes in ancestor-to-target order.
    pub fn nodes(&self) -> &[SimpleSelector] {
        &self.nodes
    }

    /// The rightmost (target) node.
    pub fn target(&self) -> &SimpleSelector {
        // from_nodes rejects empty node lists
        self.nodes.last().unwrap()
    }

    /// Total specificity over all nodes.
    pub fn rank(&self) -> u32 {
        self.rank
    }

    /// Monotonic creation counter, the tie break at equal rank.
    pub fn batch_num(&self) -> u64 {
        self.batch_num
    }

    /// DJB-style rolling hash over the node fullnames in order.
    pub fn hash(&self) -> u32 {
        self.hash
    }

    /// Canonical text: node fullnames joined by single spaces. Parsing the
    /// canonical text yields an equal selector (modulo batch number).
    pub fn canonical_text(&self) -> String {
        let names: Vec<String> = self.nodes.iter().map(SimpleSelector::fullname).collect();
        names.join(" ")
    }

    fn refresh(&mut self) {
        self.rank = self.nodes.iter().map(SimpleSelector::rank).sum();

        let mut hash: u32 = 5381;
        for (index, node) in self.nodes.iter().enumerate() {
            if index > 0 {
                hash = hash.wrapping_mul(33).wrapping_add(u32::from(b' '));
            }
            for byte in node.fullname().bytes() {
                hash = hash.wrapping_mul(33).wrapping_add(u32::from(byte));
            }
        }
        self.hash = hash;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_sums_over_nodes() {
        let selector = Selector::parse("div.red #menu:hover").unwrap();
        // div.red = 1 + 10, #menu:hover = 100 + 10
        assert_eq!(selector.rank(), 121);
    }

    #[test]
    fn test_batch_numbers_increase() {
        let first = Selector::parse("div").unwrap();
        let second = Selector::parse("div").unwrap();
        assert!(second.batch_num() > first.batch_num());
    }

    #[test]
    fn test_hash_depends_on_content_only() {
        let first = Selector::parse("div.a.b").unwrap();
        let second = Selector::parse("div.b.a").unwrap();
        let other = Selector::parse("div.a.c").unwrap();

        assert_eq!(first.hash(), second.hash());
        assert_ne!(first.hash(), other.hash());
    }

    #[test]
    fn test_duplicate_keeps_batch() {
        let original = Selector::parse("div.red").unwrap();
        let copy = original.clone();
        assert_eq!(copy.batch_num(), original.batch_num());
        assert_eq!(copy.hash(), original.hash());
    }

    #[test]
    fn test_append_updates_rank_and_hash() {
        let mut selector = Selector::parse("div").unwrap();
        let hash_before = selector.hash();

        let mut node = SimpleSelector::new();
        node.classes.insert("red".to_string());
        selector.append(node).unwrap();

        assert_eq!(selector.rank(), 11);
        assert_ne!(selector.hash(), hash_before);
        assert_eq!(selector.canonical_text(), "div .red");
    }

    #[test]
    fn test_depth_bound() {
        let text = vec!["div"; MAX_SELECTOR_DEPTH + 1].join(" ");
        assert!(matches!(
            Selector::parse(&text),
            Err(SelectorError::TooDeep)
        ));

        let text = vec!["div"; MAX_SELECTOR_DEPTH].join(" ");
        let mut selector = Selector::parse(&text).unwrap();
        assert_eq!(
            selector.append(SimpleSelector::any()),
            Err(SelectorError::TooDeep)
        );
    }

    #[test]
    fn test_canonical_round_trip() {
        let original = Selector::parse("tv#m.b.a:h  .x:focus\tdiv").unwrap();
        let reparsed = Selector::parse(&original.canonical_text()).unwrap();

        assert_eq!(reparsed.nodes(), original.nodes());
        assert_eq!(reparsed.rank(), original.rank());
        assert_eq!(reparsed.hash(), original.hash());
    }
}
