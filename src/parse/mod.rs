mod error;
mod parser;

pub use error::ParseError;

use crate::lex::{Token, TokenKind};
use crate::types::Expr;

use parser::Parser;

/// Deepest parenthesis nesting accepted. The parser and classifier recurse once
/// per level.
pub const MAX_DEPTH: usize = 128;

/// Parse a token sequence into an [`Expr`] tree, consuming every token.
///
/// # Errors
///
/// Returns [`ParseError`] if the tokens are empty, parentheses do not balance or
/// nest deeper than [`MAX_DEPTH`], or the sequence does not follow the expression
/// grammar.
pub fn parse(tokens: &[Token]) -> Result<Expr, ParseError> {
    if tokens.is_empty() {
        return Err(ParseError::EmptyExpression);
    }
    check_balance(tokens)?;

    let mut parser = Parser::new(tokens);
    let expr = parser.expr()?;
    if let Some(t) = parser.peek() {
        return Err(ParseError::TrailingTokens {
            found: t.kind.to_string(),
            offset: t.span.start,
        });
    }
    Ok(expr)
}

/// Reports the first opener past [`MAX_DEPTH`], the first stray `)` or, failing
/// that, the innermost unclosed opener.
fn check_balance(tokens: &[Token]) -> Result<(), ParseError> {
    let mut open = Vec::new();
    for t in tokens {
        match t.kind {
            TokenKind::LParen | TokenKind::UpperCaseOpen => {
                if open.len() == MAX_DEPTH {
                    return Err(ParseError::NestingTooDeep {
                        offset: t.span.start,
                        limit: MAX_DEPTH,
                    });
                }
                open.push(t.span.start);
            }
            TokenKind::RParen => {
                if open.pop().is_none() {
                    return Err(ParseError::UnbalancedParens {
                        offset: t.span.start,
                    });
                }
            }
            _ => {}
        }
    }
    match open.last() {
        Some(&offset) => Err(ParseError::UnbalancedParens { offset }),
        None => Ok(()),
    }
}
