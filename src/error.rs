use std::num::ParseIntError;

use thiserror::Error;

use crate::lex::LexError;
use crate::parse::ParseError;
use crate::resolve::UnresolvableFieldError;

/// Failure translating a single expression string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpressionError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    UnresolvableField(#[from] UnresolvableFieldError),
}

/// Failure translating one record of a batch. Every variant carries the index of
/// the record that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslateError {
    #[error("record {index}: missing rule attribute '{attribute}'")]
    MissingRuleAttribute { index: usize, attribute: String },

    #[error("record {index}: invalid quantity '{raw_value}'")]
    InvalidQuantity {
        index: usize,
        raw_value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("record {index}: {source} in expression '{expression}'")]
    Expression {
        index: usize,
        expression: String,
        #[source]
        source: ExpressionError,
    },
}

impl TranslateError {
    /// Index of the input record that failed.
    #[must_use]
    pub fn record_index(&self) -> usize {
        match self {
            TranslateError::MissingRuleAttribute { index, .. }
            | TranslateError::InvalidQuantity { index, .. }
            | TranslateError::Expression { index, .. } => *index,
        }
    }
}
