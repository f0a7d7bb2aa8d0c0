use css_values::Value;

use crate::definition::{Combinator, SyntaxContext, ValueDef};

/// Match `input` against a compiled definition.
///
/// The input is split into whitespace-delimited components; the whole input
/// must be consumed for the match to succeed. A match producing a single
/// component value yields that value, several yield `Value::Array`, and an
/// all-optional match consuming nothing yields `Value::None`.
pub(crate) fn parse_value(
    definition: &ValueDef,
    input: &str,
    context: &SyntaxContext,
) -> Option<Value> {
    let components: Vec<&str> = input.split_whitespace().collect();

    let mut values = Vec::new();
    let end = match_def(definition, &components, 0, context, &mut values)?;
    if end != components.len() {
        return None;
    }

    match values.len() {
        0 => Some(Value::None),
        1 => values.pop(),
        _ => Some(Value::Array(values)),
    }
}

/// Match a definition node starting at `pos`, appending produced values to
/// `values` and returning the position after the match.
fn match_def(
    definition: &ValueDef,
    components: &[&str],
    pos: usize,
    context: &SyntaxContext,
    values: &mut Vec<Value>,
) -> Option<usize> {
    match definition {
        ValueDef::Keyword(id) => {
            let name = context.keywords.name_of(*id)?;
            if *components.get(pos)? != name {
                return None;
            }
            values.push(Value::Keyword(*id));
            Some(pos + 1)
        }
        ValueDef::Type(type_id) => {
            let value_type = context.types.get(*type_id)?;
            let value = (value_type.parser)(components.get(pos)?)?;
            values.push(value);
            Some(pos + 1)
        }
        ValueDef::Group {
            combinator,
            min,
            max,
            children,
        } => {
            let mut count: u32 = 0;
            let mut cursor = pos;

            while count < *max {
                let mut iteration = Vec::new();
                let Some(next) =
                    match_once(*combinator, children, components, cursor, context, &mut iteration)
                else {
                    break;
                };

                values.append(&mut iteration);

                // An iteration that consumed nothing satisfies any remaining
                // bound without looping further.
                if next == cursor {
                    count = count.max(*min);
                    break;
                }

                cursor = next;
                count += 1;
            }

            if count >= *min { Some(cursor) } else { None }
        }
    }
}

/// Match one iteration of a group body according to its combinator.
fn match_once(
    combinator: Combinator,
    children: &[ValueDef],
    components: &[&str],
    pos: usize,
    context: &SyntaxContext,
    values: &mut Vec<Value>,
) -> Option<usize> {
    match combinator {
        Combinator::Juxtaposition | Combinator::Brackets => {
            let mut cursor = pos;
            for child in children {
                cursor = match_def(child, components, cursor, context, values)?;
            }
            Some(cursor)
        }
        Combinator::OneOf => {
            // Leftmost matching alternative wins.
            for child in children {
                let mut attempt = Vec::new();
                if let Some(next) = match_def(child, components, pos, context, &mut attempt) {
                    values.append(&mut attempt);
                    return Some(next);
                }
            }
            None
        }
        Combinator::AllOf => match_any_order(children, components, pos, context, values)
            .filter(|(_, matched)| *matched == children.len())
            .map(|(next, _)| next),
        Combinator::AnyOf => match_any_order(children, components, pos, context, values)
            .filter(|(_, matched)| *matched > 0)
            .map(|(next, _)| next),
    }
}

/// Match children in any order, each at most once, preferring the leftmost
/// unmatched child at every step. Returns the end position and how many
/// children matched.
fn match_any_order(
    children: &[ValueDef],
    components: &[&str],
    pos: usize,
    context: &SyntaxContext,
    values: &mut Vec<Value>,
) -> Option<(usize, usize)> {
    let mut matched = vec![false; children.len()];
    let mut cursor = pos;

    'scan: loop {
        for (index, child) in children.iter().enumerate() {
            if matched[index] {
                continue;
            }

            let mut attempt = Vec::new();
            if let Some(next) = match_def(child, components, cursor, context, &mut attempt) {
                matched[index] = true;
                values.append(&mut attempt);
                cursor = next;
                continue 'scan;
            }
        }
        break;
    }

    Some((cursor, matched.iter().filter(|m| **m).count()))
}
