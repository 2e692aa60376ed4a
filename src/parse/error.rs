use thiserror::Error;

/// Errors produced when building an expression tree from tokens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("empty expression")]
    EmptyExpression,

    #[error("unbalanced parenthesis at offset {offset}")]
    UnbalancedParens { offset: usize },

    #[error("parentheses nested deeper than {limit} at offset {offset}")]
    NestingTooDeep { offset: usize, limit: usize },

    #[error("unexpected {found} at offset {offset}")]
    UnexpectedToken { found: String, offset: usize },

    #[error("unexpected trailing {found} at offset {offset}")]
    TrailingTokens { found: String, offset: usize },
}
