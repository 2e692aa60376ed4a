use crate::lex::{Token, TokenKind};
use crate::types::{Comparison, Expr, LogicalOp, Operand};

use super::error::ParseError;

/// Recursive-descent parser over a token slice.
///
/// Precedence, loosest first: `||`, `&&`, `!`, primary.
pub(super) struct Parser<'t> {
    tokens: &'t [Token],
    pos: usize,
}

impl<'t> Parser<'t> {
    pub(super) fn new(tokens: &'t [Token]) -> Self {
        Self { tokens, pos: 0 }
    }

    pub(super) fn peek(&self) -> Option<&'t Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<&'t Token> {
        let token = self.tokens.get(self.pos)?;
        self.pos += 1;
        Some(token)
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.peek().is_some_and(|t| t.kind == *kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn unexpected(&self, token: Option<&Token>) -> ParseError {
        match token {
            Some(t) => ParseError::UnexpectedToken {
                found: t.kind.to_string(),
                offset: t.span.start,
            },
            None => ParseError::UnexpectedToken {
                found: "end of input".to_owned(),
                offset: self.tokens.last().map_or(0, |t| t.span.end),
            },
        }
    }

    // -- Expressions --------------------------------------------------------

    pub(super) fn expr(&mut self) -> Result<Expr, ParseError> {
        self.or_expr()
    }

    fn or_expr(&mut self) -> Result<Expr, ParseError> {
        self.chain(LogicalOp::Or, &TokenKind::Or, Self::and_expr)
    }

    fn and_expr(&mut self) -> Result<Expr, ParseError> {
        self.chain(LogicalOp::And, &TokenKind::And, Self::unary)
    }

    /// `term (sep term)*`, flattened into one group. A lone term passes through.
    fn chain(
        &mut self,
        op: LogicalOp,
        sep: &TokenKind,
        term: fn(&mut Self) -> Result<Expr, ParseError>,
    ) -> Result<Expr, ParseError> {
        let first = term(self)?;
        if !self.eat(sep) {
            return Ok(first);
        }
        let mut children = vec![first, term(self)?];
        while self.eat(sep) {
            children.push(term(self)?);
        }
        Ok(Expr::Group { op, children })
    }

    fn unary(&mut self) -> Result<Expr, ParseError> {
        if !self.eat(&TokenKind::Not) {
            return self.primary();
        }
        match self.peek() {
            Some(t) if t.kind == TokenKind::LParen => Ok(!self.parenthesized()?),
            _ => Ok(Expr::Compare(self.comparison()?.negate())),
        }
    }

    fn primary(&mut self) -> Result<Expr, ParseError> {
        match self.peek() {
            Some(t) if t.kind == TokenKind::LParen => self.parenthesized(),
            _ => Ok(Expr::Compare(self.comparison()?)),
        }
    }

    fn parenthesized(&mut self) -> Result<Expr, ParseError> {
        let open = match self.advance() {
            Some(t) if t.kind == TokenKind::LParen => t,
            other => return Err(self.unexpected(other)),
        };
        let inner = self.expr()?;
        match self.advance() {
            Some(t) if t.kind == TokenKind::RParen => Ok(inner),
            None => Err(ParseError::UnbalancedParens {
                offset: open.span.start,
            }),
            other => Err(self.unexpected(other)),
        }
    }

    // -- Comparisons --------------------------------------------------------

    fn comparison(&mut self) -> Result<Comparison, ParseError> {
        let field = match self.advance() {
            Some(Token {
                kind: TokenKind::Path(p),
                ..
            }) => p.clone(),
            other => return Err(self.unexpected(other)),
        };
        let op = match self.advance() {
            Some(Token {
                kind: TokenKind::Compare(op),
                ..
            }) => *op,
            other => return Err(self.unexpected(other)),
        };
        let value = self.operand()?;
        Ok(Comparison {
            field,
            op,
            value,
            negated: false,
        })
    }

    fn operand(&mut self) -> Result<Operand, ParseError> {
        let token = self.advance();
        match token.and_then(|t| t.kind.as_operand()) {
            Some(operand) => Ok(operand),
            None => Err(self.unexpected(token)),
        }
    }
}
