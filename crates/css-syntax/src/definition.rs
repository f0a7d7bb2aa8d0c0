use css_values::{KeywordId, KeywordRegistry, Value};

use crate::errors::{ValueDefError, preview};
use crate::parse;
use crate::scanner::Scanner;
use crate::types::{ValueTypeId, ValueTypeRegistry};

/// Upper bound marker for unbounded repetition (`*`, `+`, `{m,}`).
pub const REPEAT_UNBOUNDED: u32 = u32::MAX;

/// How the children of a definition group combine.
///
/// Binding strength, tightest first: juxtaposition, `&&`, `||`, `|`.
/// Brackets group a sub-definition and carry its repetition bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// Components in the given order (space separated in the definition)
    Juxtaposition,

    /// `&&` - all components, in any order
    AllOf,

    /// `||` - one or more components, in any order
    AnyOf,

    /// `|` - exactly one component
    OneOf,

    /// `[ ]` - a grouped sub-definition
    Brackets,
}

/// A compiled value definition.
///
/// Property registrations compile their syntax text into this tree once;
/// value parsing then walks it for every declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueDef {
    /// A literal keyword, matched against the keyword registry
    Keyword(KeywordId),

    /// A `<type>` reference, matched through its registered parser
    Type(ValueTypeId),

    /// A combinator over sub-definitions, with repetition bounds
    Group {
        combinator: Combinator,
        min: u32,
        max: u32,
        children: Vec<ValueDef>,
    },
}

impl ValueDef {
    fn group(combinator: Combinator, children: Vec<ValueDef>) -> ValueDef {
        ValueDef::Group {
            combinator,
            min: 1,
            max: 1,
            children,
        }
    }
}

/// Registries a definition compiles and parses against.
#[derive(Clone, Copy)]
pub struct SyntaxContext<'a> {
    pub keywords: &'a KeywordRegistry,
    pub types: &'a ValueTypeRegistry,
}

impl<'a> SyntaxContext<'a> {
    pub fn new(keywords: &'a KeywordRegistry, types: &'a ValueTypeRegistry) -> Self {
        SyntaxContext { keywords, types }
    }

    /// Compile value-definition text into a tree.
    pub fn compile(&self, input: &str) -> Result<ValueDef, ValueDefError> {
        let tokens = tokenize(input)?;
        if tokens.is_empty() {
            return Err(ValueDefError::Empty);
        }

        let mut parser = DefParser {
            tokens,
            pos: 0,
            context: *self,
        };
        let definition = parser.parse_one_of()?;

        match parser.tokens.get(parser.pos) {
            None => Ok(definition),
            Some(spanned) if spanned.token == DefToken::Close => {
                Err(ValueDefError::UnbalancedBracket {
                    offset: spanned.offset,
                })
            }
            Some(spanned) => Err(ValueDefError::MisplacedSign {
                token: spanned.token.describe(),
                offset: spanned.offset,
            }),
        }
    }

    /// Parse value text against a compiled definition.
    ///
    /// Returns `None` when the text does not match the definition.
    pub fn parse_value(&self, definition: &ValueDef, input: &str) -> Option<Value> {
        parse::parse_value(definition, input, self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum DefToken {
    /// Bare identifier
    Ident(String),

    /// `<name>` reference (range suffix, if any, is dropped)
    Type(String),

    Bar,
    DoubleBar,
    DoubleAmp,
    Open,
    Close,

    /// `?`, `*`, `+`, `{m,n}` normalized to bounds
    Repeat(u32, u32),
}

impl DefToken {
    fn describe(&self) -> String {
        match self {
            DefToken::Ident(name) => preview(name),
            DefToken::Type(name) => format!("<{}>", preview(name)),
            DefToken::Bar => "|".to_string(),
            DefToken::DoubleBar => "||".to_string(),
            DefToken::DoubleAmp => "&&".to_string(),
            DefToken::Open => "[".to_string(),
            DefToken::Close => "]".to_string(),
            DefToken::Repeat(min, max) => format!("{{{min},{max}}}"),
        }
    }
}

#[derive(Debug)]
struct SpannedToken {
    token: DefToken,
    offset: usize,
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

fn tokenize(input: &str) -> Result<Vec<SpannedToken>, ValueDefError> {
    let mut scanner = Scanner::new(input);
    let mut tokens = Vec::new();

    loop {
        scanner.skip_whitespace();
        let offset = scanner.offset();

        let Some(c) = scanner.peek() else {
            break;
        };

        let token = match c {
            '|' => {
                if scanner.peek_at(1) == Some('|') {
                    scanner.consume();
                    scanner.consume();
                    DefToken::DoubleBar
                } else {
                    scanner.consume();
                    DefToken::Bar
                }
            }
            '&' => {
                if scanner.peek_at(1) == Some('&') {
                    scanner.consume();
                    scanner.consume();
                    DefToken::DoubleAmp
                } else {
                    return Err(ValueDefError::UnexpectedCharacter {
                        token: "&".to_string(),
                        offset,
                    });
                }
            }
            '[' => {
                scanner.consume();
                DefToken::Open
            }
            ']' => {
                scanner.consume();
                DefToken::Close
            }
            '?' => {
                scanner.consume();
                DefToken::Repeat(0, 1)
            }
            '*' => {
                scanner.consume();
                DefToken::Repeat(0, REPEAT_UNBOUNDED)
            }
            '+' => {
                scanner.consume();
                DefToken::Repeat(1, REPEAT_UNBOUNDED)
            }
            '{' => {
                scanner.consume();
                tokenize_repetition(&mut scanner, offset)?
            }
            '<' => {
                scanner.consume();
                tokenize_type(&mut scanner, offset)?
            }
            c if is_ident_char(c) => {
                DefToken::Ident(scanner.consume_while(is_ident_char))
            }
            other => {
                return Err(ValueDefError::UnexpectedCharacter {
                    token: other.to_string(),
                    offset,
                });
            }
        };

        tokens.push(SpannedToken { token, offset });
    }

    Ok(tokens)
}

/// `{m}`, `{m,}` or `{m,n}`; the opening brace is already consumed.
fn tokenize_repetition(scanner: &mut Scanner, offset: usize) -> Result<DefToken, ValueDefError> {
    let body = scanner.consume_while(|c| c != '}');
    if scanner.consume() != Some('}') {
        return Err(ValueDefError::UnexpectedEnd {
            offset: scanner.offset(),
        });
    }

    let bad = || ValueDefError::BadRepetition {
        token: preview(&body),
        offset,
    };

    let (min_text, max_text) = match body.split_once(',') {
        Some((min, max)) => (min, Some(max)),
        None => (body.as_str(), None),
    };

    let min: u32 = min_text.trim().parse().map_err(|_| bad())?;
    let max = match max_text {
        None => min,
        Some(text) if text.trim().is_empty() => REPEAT_UNBOUNDED,
        Some(text) => text.trim().parse().map_err(|_| bad())?,
    };

    if max < min {
        return Err(bad());
    }

    Ok(DefToken::Repeat(min, max))
}

/// `<name>` or `<name [lo,hi]>`; the opening angle bracket is already
/// consumed. The range suffix is accepted and dropped.
fn tokenize_type(scanner: &mut Scanner, offset: usize) -> Result<DefToken, ValueDefError> {
    let body = scanner.consume_while(|c| c != '>');
    if scanner.consume() != Some('>') {
        return Err(ValueDefError::UnexpectedEnd {
            offset: scanner.offset(),
        });
    }

    let name: String = body
        .trim()
        .chars()
        .take_while(|c| is_ident_char(*c))
        .collect();

    if name.is_empty() {
        return Err(ValueDefError::UnexpectedCharacter {
            token: preview(&body),
            offset,
        });
    }

    Ok(DefToken::Type(name))
}

/// Recursive-descent parser over the token list.
///
/// Grammar, loosest binding first:
///
/// ```text
/// one_of := any_of ( '|'  any_of )*
/// any_of := all_of ( '||' all_of )*
/// all_of := juxt   ( '&&' juxt   )*
/// juxt   := term+
/// term   := ( ident | <type> | '[' one_of ']' ) repeat?
/// ```
struct DefParser<'a> {
    tokens: Vec<SpannedToken>,
    pos: usize,
    context: SyntaxContext<'a>,
}

impl DefParser<'_> {
    fn peek(&self) -> Option<&DefToken> {
        self.tokens.get(self.pos).map(|spanned| &spanned.token)
    }

    fn eat(&mut self, token: &DefToken) -> bool {
        if self.peek() == Some(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn parse_one_of(&mut self) -> Result<ValueDef, ValueDefError> {
        let mut children = vec![self.parse_any_of()?];
        while self.eat(&DefToken::Bar) {
            children.push(self.parse_any_of()?);
        }
        Ok(Self::collapse(Combinator::OneOf, children))
    }

    fn parse_any_of(&mut self) -> Result<ValueDef, ValueDefError> {
        let mut children = vec![self.parse_all_of()?];
        while self.eat(&DefToken::DoubleBar) {
            children.push(self.parse_all_of()?);
        }
        Ok(Self::collapse(Combinator::AnyOf, children))
    }

    fn parse_all_of(&mut self) -> Result<ValueDef, ValueDefError> {
        let mut children = vec![self.parse_juxtaposition()?];
        while self.eat(&DefToken::DoubleAmp) {
            children.push(self.parse_juxtaposition()?);
        }
        Ok(Self::collapse(Combinator::AllOf, children))
    }

    fn parse_juxtaposition(&mut self) -> Result<ValueDef, ValueDefError> {
        let mut children = vec![self.parse_term()?];
        while matches!(
            self.peek(),
            Some(DefToken::Ident(_) | DefToken::Type(_) | DefToken::Open)
        ) {
            children.push(self.parse_term()?);
        }
        Ok(Self::collapse(Combinator::Juxtaposition, children))
    }

    fn parse_term(&mut self) -> Result<ValueDef, ValueDefError> {
        let Some(spanned) = self.tokens.get(self.pos) else {
            let offset = self.tokens.last().map(|spanned| spanned.offset).unwrap_or(0);
            return Err(ValueDefError::UnexpectedEnd { offset });
        };
        let offset = spanned.offset;

        let term = match &spanned.token {
            DefToken::Ident(name) => {
                self.pos += 1;
                self.resolve_ident(name, offset)?
            }
            DefToken::Type(name) => {
                let term = self
                    .context
                    .types
                    .resolve(name)
                    .map(ValueDef::Type)
                    .ok_or_else(|| ValueDefError::UnknownType {
                        token: preview(name),
                        offset,
                    })?;
                self.pos += 1;
                term
            }
            DefToken::Open => {
                self.pos += 1;
                let inner = self.parse_one_of()?;
                if !self.eat(&DefToken::Close) {
                    return Err(ValueDefError::UnexpectedEnd { offset });
                }
                ValueDef::group(Combinator::Brackets, vec![inner])
            }
            other => {
                return Err(ValueDefError::MisplacedSign {
                    token: other.describe(),
                    offset,
                });
            }
        };

        Ok(self.apply_repetition(term))
    }

    /// Attach a trailing repetition suffix to the preceding term.
    ///
    /// The bounds land on the term itself when it is a plain group; a leaf
    /// (or a group that already carries bounds) gets wrapped instead.
    fn apply_repetition(&mut self, term: ValueDef) -> ValueDef {
        let Some(DefToken::Repeat(new_min, new_max)) = self.peek().cloned() else {
            return term;
        };
        self.pos += 1;

        match term {
            ValueDef::Group {
                combinator,
                min: 1,
                max: 1,
                children,
            } => ValueDef::Group {
                combinator,
                min: new_min,
                max: new_max,
                children,
            },
            leaf_or_bounded => ValueDef::Group {
                combinator: Combinator::Brackets,
                min: new_min,
                max: new_max,
                children: vec![leaf_or_bounded],
            },
        }
    }

    /// Resolve a bare identifier: alias tree first, then keyword.
    fn resolve_ident(&self, name: &str, offset: usize) -> Result<ValueDef, ValueDefError> {
        if let Some(aliased) = self.context.types.resolve_alias(name) {
            return Ok(aliased.clone());
        }

        self.context
            .keywords
            .key_of(name)
            .map(ValueDef::Keyword)
            .ok_or_else(|| ValueDefError::UnknownIdentifier {
                token: preview(name),
                offset,
            })
    }

    fn collapse(combinator: Combinator, mut children: Vec<ValueDef>) -> ValueDef {
        if children.len() == 1 {
            children.pop().unwrap()
        } else {
            ValueDef::group(combinator, children)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context_fixture() -> (KeywordRegistry, ValueTypeRegistry) {
        let mut keywords = KeywordRegistry::new();
        for name in ["auto", "none", "thin", "thick", "solid", "dashed"] {
            keywords.register_auto(name);
        }
        (keywords, ValueTypeRegistry::with_builtins())
    }

    #[test]
    fn test_compile_alternatives() {
        let (keywords, types) = context_fixture();
        let context = SyntaxContext::new(&keywords, &types);

        let def = context.compile("auto | <length> | <percentage>").unwrap();
        match def {
            ValueDef::Group {
                combinator: Combinator::OneOf,
                children,
                ..
            } => {
                assert_eq!(children.len(), 3);
                assert!(matches!(children[0], ValueDef::Keyword(_)));
                assert!(matches!(children[1], ValueDef::Type(_)));
            }
            other => panic!("expected one-of group, got {other:?}"),
        }
    }

    #[test]
    fn test_compile_unknown_type_fails() {
        let (keywords, types) = context_fixture();
        let context = SyntaxContext::new(&keywords, &types);

        let err = context.compile("auto | <nonsense>").unwrap_err();
        assert!(matches!(err, ValueDefError::UnknownType { .. }));
    }

    #[test]
    fn test_compile_unknown_identifier_fails() {
        let (keywords, types) = context_fixture();
        let context = SyntaxContext::new(&keywords, &types);

        let err = context.compile("blorp").unwrap_err();
        assert!(matches!(
            err,
            ValueDefError::UnknownIdentifier { ref token, .. } if token == "blorp"
        ));
    }

    #[test]
    fn test_precedence_juxtaposition_over_alternation() {
        let (keywords, types) = context_fixture();
        let context = SyntaxContext::new(&keywords, &types);

        // `<length> <length> | auto` groups as `[<length> <length>] | auto`.
        let def = context.compile("<length> <length> | auto").unwrap();
        match def {
            ValueDef::Group {
                combinator: Combinator::OneOf,
                children,
                ..
            } => {
                assert_eq!(children.len(), 2);
                assert!(matches!(
                    children[0],
                    ValueDef::Group {
                        combinator: Combinator::Juxtaposition,
                        ..
                    }
                ));
                assert!(matches!(children[1], ValueDef::Keyword(_)));
            }
            other => panic!("expected one-of group, got {other:?}"),
        }
    }

    #[test]
    fn test_precedence_all_of_over_any_of() {
        let (keywords, types) = context_fixture();
        let context = SyntaxContext::new(&keywords, &types);

        let def = context.compile("thin && solid || thick").unwrap();
        match def {
            ValueDef::Group {
                combinator: Combinator::AnyOf,
                children,
                ..
            } => {
                assert_eq!(children.len(), 2);
                assert!(matches!(
                    children[0],
                    ValueDef::Group {
                        combinator: Combinator::AllOf,
                        ..
                    }
                ));
            }
            other => panic!("expected any-of group, got {other:?}"),
        }
    }

    #[test]
    fn test_brackets_override_precedence() {
        let (keywords, types) = context_fixture();
        let context = SyntaxContext::new(&keywords, &types);

        let def = context.compile("<length> [ thin | thick ]").unwrap();
        match def {
            ValueDef::Group {
                combinator: Combinator::Juxtaposition,
                children,
                ..
            } => {
                assert!(matches!(
                    children[1],
                    ValueDef::Group {
                        combinator: Combinator::Brackets,
                        ..
                    }
                ));
            }
            other => panic!("expected juxtaposition, got {other:?}"),
        }
    }

    #[test]
    fn test_repetition_suffixes() {
        let (keywords, types) = context_fixture();
        let context = SyntaxContext::new(&keywords, &types);

        let def = context.compile("<length>{1,4}").unwrap();
        match def {
            ValueDef::Group {
                combinator: Combinator::Brackets,
                min: 1,
                max: 4,
                ..
            } => {}
            other => panic!("expected bounded group, got {other:?}"),
        }

        let def = context.compile("[ auto | <length> ]?").unwrap();
        match def {
            ValueDef::Group {
                combinator: Combinator::Brackets,
                min: 0,
                max: 1,
                ..
            } => {}
            other => panic!("expected optional group, got {other:?}"),
        }

        let def = context.compile("<length>+").unwrap();
        match def {
            ValueDef::Group {
                min: 1,
                max: REPEAT_UNBOUNDED,
                ..
            } => {}
            other => panic!("expected unbounded group, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_definitions() {
        let (keywords, types) = context_fixture();
        let context = SyntaxContext::new(&keywords, &types);

        assert!(matches!(
            context.compile("| auto"),
            Err(ValueDefError::MisplacedSign { .. })
        ));
        assert!(matches!(
            context.compile("[ auto"),
            Err(ValueDefError::UnexpectedEnd { .. })
        ));
        assert!(matches!(
            context.compile("auto ]"),
            Err(ValueDefError::UnbalancedBracket { .. })
        ));
        assert!(matches!(
            context.compile("<length>{4,1}"),
            Err(ValueDefError::BadRepetition { .. })
        ));
        assert!(matches!(context.compile("   "), Err(ValueDefError::Empty)));
    }

    #[test]
    fn test_alias_is_cloned_in_place() {
        let (keywords, mut types) = context_fixture();
        let alias_tree = {
            let context = SyntaxContext::new(&keywords, &types);
            context.compile("thin | thick").unwrap()
        };
        types.register_alias("line-width", alias_tree.clone());

        let context = SyntaxContext::new(&keywords, &types);
        let def = context.compile("line-width").unwrap();
        assert_eq!(def, alias_tree);
    }
}
