use std::collections::{HashMap, HashSet};

use css_selectors::{Selector, SimpleSelector, expand_names};
use lasso::Spur;

use crate::declaration::StyleProperties;

/// A style rule as stored in the trie: the properties set at one selector,
/// plus everything the cascade needs to order it.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleRule {
    /// Interned source path the rule came from, if known
    pub origin: Option<Spur>,

    /// Canonical selector text, for diagnostics
    pub selector_text: String,

    /// Selector specificity
    pub rank: u32,

    /// Source-order tie break; higher wins at equal rank
    pub batch_num: u64,

    /// The rule body
    pub properties: StyleProperties,
}

impl StyleRule {
    pub fn new(selector: &Selector, properties: StyleProperties, origin: Option<Spur>) -> Self {
        StyleRule {
            origin,
            selector_text: selector.canonical_text(),
            rank: selector.rank(),
            batch_num: selector.batch_num(),
            properties,
        }
    }
}

/// A trie node holding the rules defined at one selector suffix.
///
/// `parents` continues the trail one depth deeper: it maps the fullname of
/// an ancestor node to the key of the corresponding link inside the
/// next-depth group of that name. Links are owned by the group maps only;
/// parents resolve by key, so there are no cycles to manage.
#[derive(Debug, Default)]
struct StyleLink {
    /// Canonical text of the selector suffix this link stands for
    selector_text: String,

    /// Ancestor fullname -> link key at the next depth
    parents: HashMap<String, String>,

    /// Rules whose selector ends exactly at this link
    rules: Vec<StyleRule>,
}

/// All links whose rightmost node has the same compound name.
#[derive(Debug)]
struct LinkGroup {
    /// The node the group is keyed by
    node: SimpleSelector,

    /// Link key (parent-selector text) -> link
    links: HashMap<String, StyleLink>,
}

/// The style-link trie: one map per ancestor depth, keyed by compound node
/// name. Depth 0 is the rightmost (target) position of a selector.
#[derive(Debug, Default)]
pub struct StyleSheet {
    levels: Vec<HashMap<String, LinkGroup>>,
}

impl StyleSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index `rule` under `selector`, walking the nodes right to left and
    /// creating groups and links as needed.
    pub fn insert(&mut self, selector: &Selector, rule: StyleRule) {
        let nodes = selector.nodes();
        let mut rule = Some(rule);

        // Link key at the current depth: `*` for the target position, the
        // running suffix text deeper up the chain.
        let mut link_key = String::from("*");
        let mut prev: Option<(String, String)> = None;

        for depth in 0..nodes.len() {
            let node = &nodes[nodes.len() - 1 - depth];
            let name = node.fullname();

            // Wire the previous link to this one before touching the level.
            if let Some((prev_name, prev_key)) = &prev
                && let Some(level) = self.levels.get_mut(depth - 1)
                && let Some(group) = level.get_mut(prev_name)
                && let Some(link) = group.links.get_mut(prev_key)
            {
                link.parents.insert(name.clone(), link_key.clone());
            }

            if self.levels.len() == depth {
                self.levels.push(HashMap::new());
            }

            let selector_text = if link_key == "*" {
                name.clone()
            } else {
                format!("{name} {link_key}")
            };

            let group = self.levels[depth]
                .entry(name.clone())
                .or_insert_with(|| LinkGroup {
                    node: node.clone(),
                    links: HashMap::new(),
                });
            let link = group
                .links
                .entry(link_key.clone())
                .or_insert_with(|| StyleLink {
                    selector_text: selector_text.clone(),
                    ..StyleLink::default()
                });

            if depth == nodes.len() - 1
                && let Some(rule) = rule.take()
            {
                link.rules.push(rule);
            }

            prev = Some((name, link_key));
            link_key = selector_text;
        }
    }

    /// Collect every rule matched by `selector`, ordered by specificity and
    /// then source order, both descending. Ties keep insertion order.
    pub fn query(&self, selector: &Selector) -> Vec<&StyleRule> {
        let mut results = Vec::new();

        let Some((target, ancestors)) = selector.nodes().split_last() else {
            return results;
        };
        let Some(target_level) = self.levels.first() else {
            return results;
        };

        for name in expand_names(target) {
            if let Some(group) = target_level.get(&name) {
                for link in group.links.values() {
                    self.collect_link(link, 0, ancestors, &mut results);
                }
            }
        }

        results
    }

    /// Collect a link's rules, then follow its parents map through the
    /// remaining element ancestors (descendant-combinator semantics: any
    /// ancestor in the chain may satisfy an ancestor in the selector).
    fn collect_link<'sheet>(
        &'sheet self,
        link: &'sheet StyleLink,
        depth: usize,
        ancestors: &[SimpleSelector],
        results: &mut Vec<&'sheet StyleRule>,
    ) {
        for rule in &link.rules {
            merge_rule(results, rule);
        }

        if ancestors.is_empty() || link.parents.is_empty() {
            return;
        }

        // Each parents entry is entered once, at the nearest matching
        // ancestor; the remaining chain below that point covers everything
        // a farther match could reach.
        let mut matched: HashSet<String> = HashSet::new();

        for index in (0..ancestors.len()).rev() {
            for name in expand_names(&ancestors[index]) {
                if matched.contains(&name) {
                    continue;
                }
                let Some(link_key) = link.parents.get(&name) else {
                    continue;
                };
                matched.insert(name.clone());

                if let Some(deeper) = self
                    .levels
                    .get(depth + 1)
                    .and_then(|level| level.get(&name))
                    .and_then(|group| group.links.get(link_key))
                {
                    self.collect_link(deeper, depth + 1, &ancestors[..index], results);
                }
            }
        }
    }

    /// Every stored rule, in unspecified order.
    pub fn iter_rules(&self) -> impl Iterator<Item = &StyleRule> {
        self.levels
            .iter()
            .flat_map(|level| level.values())
            .flat_map(|group| group.links.values())
            .flat_map(|link| link.rules.iter())
    }

    /// Total number of stored rules.
    pub fn rule_count(&self) -> usize {
        self.iter_rules().count()
    }

    /// Write a structural summary of the trie: every group and link per
    /// depth, with node specificity and rule counts.
    pub fn write_tree<W: std::fmt::Write>(&self, out: &mut W) -> std::fmt::Result {
        for (depth, level) in self.levels.iter().enumerate() {
            writeln!(out, "depth {depth}:")?;

            let mut names: Vec<&String> = level.keys().collect();
            names.sort();

            for name in names {
                let group = &level[name];
                writeln!(out, "  group `{name}` (rank {})", group.node.rank())?;

                let mut keys: Vec<&String> = group.links.keys().collect();
                keys.sort();

                for key in keys {
                    let link = &group.links[key];
                    writeln!(
                        out,
                        "    link `{}`: {} rule(s), {} parent(s)",
                        link.selector_text,
                        link.rules.len(),
                        link.parents.len()
                    )?;
                }
            }
        }
        Ok(())
    }
}

/// Insert into the ordered result list, keeping `(rank, batch_num)`
/// descending and placing ties after existing entries.
fn merge_rule<'sheet>(results: &mut Vec<&'sheet StyleRule>, rule: &'sheet StyleRule) {
    let position = results.partition_point(|existing| {
        (existing.rank, existing.batch_num) >= (rule.rank, rule.batch_num)
    });
    results.insert(position, rule);
}
