use crate::errors::SelectorError;
use crate::node::SimpleSelector;
use crate::selector::MAX_FULLNAME_LEN;

/// Characters allowed inside a name token. `*` is the type wildcard.
fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '*'
}

/// Which component of the current node the token being built belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    TypeName,
    Id,
    Class,
    Status,
}

impl Target {
    fn prefix(self) -> char {
        match self {
            Target::TypeName => '\0',
            Target::Id => '#',
            Target::Class => '.',
            Target::Status => ':',
        }
    }
}

/// Parse selector text into simple-selector nodes, ancestor first.
///
/// Whitespace separates nodes (descendant combinator); within a node, `#`,
/// `.` and `:` start an id, class or state token and the leading bare name
/// is the type. Any character outside the alphabet aborts the parse.
pub(crate) fn parse_nodes(input: &str) -> Result<Vec<SimpleSelector>, SelectorError> {
    let mut nodes = Vec::new();
    let mut node = SimpleSelector::new();
    let mut buffer = String::new();
    let mut target = Target::TypeName;
    let mut token_offset = 0;

    for (offset, c) in input.char_indices() {
        match c {
            c if c.is_whitespace() => {
                commit_token(&mut node, &mut buffer, target, token_offset)?;
                finish_node(&mut nodes, &mut node)?;
                target = Target::TypeName;
            }
            '#' | '.' | ':' => {
                commit_token(&mut node, &mut buffer, target, token_offset)?;
                target = match c {
                    '#' => Target::Id,
                    '.' => Target::Class,
                    _ => Target::Status,
                };
                token_offset = offset;
            }
            c if is_name_char(c) => buffer.push(c),
            other => {
                return Err(SelectorError::UnexpectedCharacter { ch: other, offset });
            }
        }
    }

    commit_token(&mut node, &mut buffer, target, token_offset)?;
    finish_node(&mut nodes, &mut node)?;

    if nodes.is_empty() {
        return Err(SelectorError::Empty);
    }

    Ok(nodes)
}

fn commit_token(
    node: &mut SimpleSelector,
    buffer: &mut String,
    target: Target,
    offset: usize,
) -> Result<(), SelectorError> {
    if buffer.is_empty() {
        // A bare node boundary is fine; a dangling `#`, `.` or `:` is not.
        if target == Target::TypeName {
            return Ok(());
        }
        return Err(SelectorError::EmptyName {
            prefix: target.prefix(),
            offset,
        });
    }

    let token = std::mem::take(buffer);
    match target {
        Target::TypeName => {
            node.type_name = Some(token);
        }
        Target::Id => {
            if node.id.is_some() {
                return Err(SelectorError::DuplicateId { offset });
            }
            node.id = Some(token);
        }
        Target::Class => {
            node.classes.insert(token);
        }
        Target::Status => {
            node.status.insert(token);
        }
    }

    Ok(())
}

fn finish_node(
    nodes: &mut Vec<SimpleSelector>,
    node: &mut SimpleSelector,
) -> Result<(), SelectorError> {
    if node.is_empty() {
        return Ok(());
    }

    let finished = std::mem::take(node);
    if finished.fullname().chars().count() > MAX_FULLNAME_LEN {
        tracing::warn!("selector node name too long, rejecting");
        return Err(SelectorError::NameTooLong);
    }

    nodes.push(finished);
    Ok(())
}
