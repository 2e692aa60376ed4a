use std::fmt;
use std::ops::Range;

use crate::types::{CompareOp, Operand};

/// Token classes of the rule expression language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    LParen,
    RParen,
    And,
    Or,
    Not,
    Compare(CompareOp),
    /// Opening of `<x>.eval("toUpperCase()",`; closed by a plain `)`.
    UpperCaseOpen,
    Path(String),
    Str(String),
    Number(String),
    Bool(bool),
    Null,
}

impl TokenKind {
    /// The comparison operand this token stands for, if it can be one.
    #[must_use]
    pub fn as_operand(&self) -> Option<Operand> {
        match self {
            TokenKind::Path(p) => Some(Operand::Path(p.clone())),
            TokenKind::Str(s) => Some(Operand::Str(s.clone())),
            TokenKind::Number(n) => Some(Operand::Number(n.clone())),
            TokenKind::Bool(b) => Some(Operand::Bool(*b)),
            TokenKind::Null => Some(Operand::Null),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_operand(&self) -> bool {
        self.as_operand().is_some()
    }
}

/// A token and the byte range it covers in the source expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Range<usize>,
}

impl Token {
    #[must_use]
    pub fn new(kind: TokenKind, span: Range<usize>) -> Self {
        Self { kind, span }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::LParen => write!(f, "'('"),
            TokenKind::RParen => write!(f, "')'"),
            TokenKind::And => write!(f, "'&&'"),
            TokenKind::Or => write!(f, "'||'"),
            TokenKind::Not => write!(f, "'!'"),
            TokenKind::Compare(op) => write!(f, "'{op}'"),
            TokenKind::UpperCaseOpen => write!(f, "case-insensitive call"),
            TokenKind::Path(p) => write!(f, "field '{p}'"),
            TokenKind::Str(s) => write!(f, "string {s:?}"),
            TokenKind::Number(n) => write!(f, "number {n}"),
            TokenKind::Bool(b) => write!(f, "'{b}'"),
            TokenKind::Null => write!(f, "'null'"),
        }
    }
}
