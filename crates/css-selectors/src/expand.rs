use crate::node::SimpleSelector;
use crate::selector::MAX_FULLNAME_LEN;

/// Enumerate every compound name under which `node` may be indexed or
/// looked up: each combination of the optional type, the optional id, a
/// subset of the classes (in sorted order) and a subset of the states,
/// plus `*` for "any node".
///
/// The output is duplicate-free and deterministically ordered. A single
/// scratch buffer is reused across the recursion, so nothing is allocated
/// beyond the returned names.
pub fn expand_names(node: &SimpleSelector) -> Vec<String> {
    let mut names = Vec::new();
    collect_names(node, &mut names);
    names
}

/// `expand_names`, appending into a caller-provided list.
pub fn collect_names(node: &SimpleSelector, names: &mut Vec<String>) {
    names.push("*".to_string());

    let classes: Vec<&str> = node.classes.iter().map(String::as_str).collect();
    let status: Vec<&str> = node.status.iter().map(String::as_str).collect();
    let mut scratch = String::with_capacity(MAX_FULLNAME_LEN.min(256));

    // Typeless combinations first, then type-prefixed ones.
    with_id_level(node, None, &classes, &status, &mut scratch, names);
    if let Some(type_name) = &node.type_name {
        with_id_level(node, Some(type_name.as_str()), &classes, &status, &mut scratch, names);
    }
}

fn with_id_level(
    node: &SimpleSelector,
    type_name: Option<&str>,
    classes: &[&str],
    status: &[&str],
    scratch: &mut String,
    names: &mut Vec<String>,
) {
    scratch.clear();
    if let Some(type_name) = type_name {
        scratch.push_str(type_name);
    }

    class_level(classes, 0, status, scratch, names);

    if let Some(id) = &node.id {
        let base_len = scratch.len();
        scratch.push('#');
        scratch.push_str(id);
        class_level(classes, 0, status, scratch, names);
        scratch.truncate(base_len);
    }
}

/// Emit the current prefix with every subset of `classes[start..]` appended,
/// each followed by every subset of the states.
fn class_level(
    classes: &[&str],
    start: usize,
    status: &[&str],
    scratch: &mut String,
    names: &mut Vec<String>,
) {
    status_level(status, 0, scratch, names);

    for index in start..classes.len() {
        let base_len = scratch.len();
        scratch.push('.');
        scratch.push_str(classes[index]);
        class_level(classes, index + 1, status, scratch, names);
        scratch.truncate(base_len);
    }
}

fn status_level(
    status: &[&str],
    start: usize,
    scratch: &mut String,
    names: &mut Vec<String>,
) {
    emit(scratch, names);

    for index in start..status.len() {
        let base_len = scratch.len();
        scratch.push(':');
        scratch.push_str(status[index]);
        status_level(status, index + 1, scratch, names);
        scratch.truncate(base_len);
    }
}

fn emit(scratch: &str, names: &mut Vec<String>) {
    // The all-absent combination is empty, and a bare `*` type would repeat
    // the leading wildcard entry.
    if scratch.is_empty() || scratch == "*" {
        return;
    }
    names.push(scratch.to_string());
}
