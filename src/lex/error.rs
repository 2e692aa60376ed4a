use thiserror::Error;

/// Errors produced while splitting an expression into tokens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("unterminated string literal starting at offset {offset}")]
    UnterminatedString { offset: usize },

    #[error("unexpected character '{ch}' at offset {offset}")]
    UnexpectedChar { ch: char, offset: usize },
}

impl LexError {
    /// Byte offset into the expression where lexing stopped.
    #[must_use]
    pub fn offset(&self) -> usize {
        match self {
            LexError::UnterminatedString { offset } | LexError::UnexpectedChar { offset, .. } => {
                *offset
            }
        }
    }
}
