use thiserror::Error;

/// Longest slice of offending input echoed back in an error message.
const TOKEN_PREVIEW_LEN: usize = 32;

/// Truncate a token for inclusion in an error message.
pub(crate) fn preview(token: &str) -> String {
    if token.chars().count() <= TOKEN_PREVIEW_LEN {
        token.to_string()
    } else {
        let mut out: String = token.chars().take(TOKEN_PREVIEW_LEN).collect();
        out.push('…');
        out
    }
}

/// Errors produced while compiling a value definition.
///
/// Offsets are character offsets into the definition text; offending tokens
/// are truncated so messages stay bounded.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValueDefError {
    /// A bare identifier that is neither a type alias nor a registered keyword
    #[error("unknown identifier `{token}` at offset {offset}")]
    UnknownIdentifier { token: String, offset: usize },

    /// An `<ident>` reference to a type that is not registered
    #[error("unknown data type `<{token}>` at offset {offset}")]
    UnknownType { token: String, offset: usize },

    /// A character that cannot start or continue any token
    #[error("unexpected character `{token}` at offset {offset}")]
    UnexpectedCharacter { token: String, offset: usize },

    /// A sign with no term before it, or two signs in a row
    #[error("misplaced `{token}` at offset {offset}")]
    MisplacedSign { token: String, offset: usize },

    /// Input ended inside a bracket group or a `<type>` reference
    #[error("unexpected end of definition at offset {offset}")]
    UnexpectedEnd { offset: usize },

    /// A `]` with no matching `[`
    #[error("unbalanced `]` at offset {offset}")]
    UnbalancedBracket { offset: usize },

    /// A malformed `{m,n}` repetition suffix
    #[error("malformed repetition `{token}` at offset {offset}")]
    BadRepetition { token: String, offset: usize },

    /// The definition contains no terms at all
    #[error("empty definition")]
    Empty,
}
