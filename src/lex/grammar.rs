use std::borrow::Cow;

use winnow::ascii::digit1;
use winnow::combinator::{alt, opt, repeat};
use winnow::error::{ErrMode, ModalResult};
use winnow::prelude::*;
use winnow::token::{any, take_till, take_while};

use crate::types::CompareOp;

use super::token::TokenKind;

/// First argument of the case-insensitive call idiom, quotes included.
const UPPER_CASE_MARKER: &str = "\"toUpperCase()\"";

fn ws(input: &mut &str) -> ModalResult<()> {
    take_while(0.., |c: char| c.is_ascii_whitespace())
        .void()
        .parse_next(input)
}

// -- Field paths ------------------------------------------------------------

/// One path segment, optionally followed by a zero-argument accessor call
/// (`getAmount()`).
fn segment(input: &mut &str) -> ModalResult<()> {
    (
        take_while(1.., |c: char| c.is_ascii_alphabetic() || c == '_' || c == '$'),
        take_while(0.., |c: char| {
            c.is_ascii_alphanumeric() || c == '_' || c == '$'
        }),
        opt("()"),
    )
        .void()
        .parse_next(input)
}

fn path<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    (segment, repeat(0.., ('.', segment)).map(|()| ()))
        .take()
        .parse_next(input)
}

fn word(input: &mut &str) -> ModalResult<TokenKind> {
    let text = path.parse_next(input)?;
    Ok(match text {
        "true" => TokenKind::Bool(true),
        "false" => TokenKind::Bool(false),
        "null" => TokenKind::Null,
        other => TokenKind::Path(other.to_owned()),
    })
}

// -- Case-insensitive call idiom ---------------------------------------------

/// `MVEL.eval("toUpperCase()",` or any path whose last segment is `eval`.
fn upper_case_open(input: &mut &str) -> ModalResult<TokenKind> {
    let target = path.parse_next(input)?;
    let is_eval = target
        .rsplit('.')
        .next()
        .is_some_and(|last| last.eq_ignore_ascii_case("eval"));
    if !is_eval {
        return Err(ErrMode::from_input(input));
    }
    (ws, '(', ws, UPPER_CASE_MARKER, ws, ',')
        .void()
        .parse_next(input)?;
    Ok(TokenKind::UpperCaseOpen)
}

// -- Literals ---------------------------------------------------------------

/// Run of literal text up to the next quote or backslash.
fn plain<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_till(0.., ['"', '\\']).parse_next(input)
}

/// Double-quoted literal, borrowed from the input unless it contains escapes.
/// Unknown escapes keep their backslash.
fn string_literal<'i>(input: &mut &'i str) -> ModalResult<Cow<'i, str>> {
    '"'.parse_next(input)?;
    let mut text = Cow::Borrowed(plain.parse_next(input)?);
    while opt('\\').parse_next(input)?.is_some() {
        let buf = text.to_mut();
        match any.parse_next(input)? {
            'n' => buf.push('\n'),
            't' => buf.push('\t'),
            c @ ('"' | '\\') => buf.push(c),
            other => {
                buf.push('\\');
                buf.push(other);
            }
        }
        buf.push_str(plain.parse_next(input)?);
    }
    '"'.parse_next(input)?;
    Ok(text)
}

fn number<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    (opt('-'), digit1, opt(('.', digit1)))
        .take()
        .parse_next(input)
}

// -- Operators --------------------------------------------------------------

fn symbol(input: &mut &str) -> ModalResult<TokenKind> {
    alt((
        "&&".value(TokenKind::And),
        "||".value(TokenKind::Or),
        "==".value(TokenKind::Compare(CompareOp::Eq)),
        "!=".value(TokenKind::Compare(CompareOp::Neq)),
        ">=".value(TokenKind::Compare(CompareOp::Gte)),
        "<=".value(TokenKind::Compare(CompareOp::Lte)),
        ">".value(TokenKind::Compare(CompareOp::Gt)),
        "<".value(TokenKind::Compare(CompareOp::Lt)),
        '!'.value(TokenKind::Not),
        '('.value(TokenKind::LParen),
        ')'.value(TokenKind::RParen),
    ))
    .parse_next(input)
}

/// A single token. Leading whitespace must already be consumed.
pub(super) fn token(input: &mut &str) -> ModalResult<TokenKind> {
    alt((
        upper_case_open,
        word,
        string_literal.map(|s| TokenKind::Str(s.into_owned())),
        number.map(|n: &str| TokenKind::Number(n.to_owned())),
        symbol,
    ))
    .parse_next(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex_one(src: &str) -> (TokenKind, &str) {
        let mut input = src;
        let kind = token(&mut input).unwrap();
        (kind, input)
    }

    #[test]
    fn path_with_accessor_call() {
        let (kind, rest) = lex_one("order.subTotal.getAmount()>=100");
        assert_eq!(kind, TokenKind::Path("order.subTotal.getAmount()".into()));
        assert_eq!(rest, ">=100");
    }

    #[test]
    fn keywords_are_not_paths() {
        assert_eq!(lex_one("true").0, TokenKind::Bool(true));
        assert_eq!(lex_one("false)").0, TokenKind::Bool(false));
        assert_eq!(lex_one("null").0, TokenKind::Null);
        assert_eq!(lex_one("trueish").0, TokenKind::Path("trueish".into()));
    }

    #[test]
    fn upper_case_opener() {
        let (kind, rest) = lex_one(r#"MVEL.eval("toUpperCase()",discreteOrderItem.category.name)"#);
        assert_eq!(kind, TokenKind::UpperCaseOpen);
        assert_eq!(rest, "discreteOrderItem.category.name)");

        let (kind, rest) = lex_one(r#"EVAL ( "toUpperCase()" , x)"#);
        assert_eq!(kind, TokenKind::UpperCaseOpen);
        assert_eq!(rest, " x)");
    }

    #[test]
    fn eval_without_marker_is_a_path() {
        let (kind, rest) = lex_one(r#"MVEL.eval("toLowerCase()",x)"#);
        assert_eq!(kind, TokenKind::Path("MVEL.eval".into()));
        assert!(rest.starts_with('('));
    }

    #[test]
    fn string_with_escapes() {
        let (kind, rest) = lex_one(r#""a\"b\\c" rest"#);
        assert_eq!(kind, TokenKind::Str("a\"b\\c".into()));
        assert_eq!(rest, " rest");
    }

    #[test]
    fn plain_string_is_borrowed() {
        let mut input = r#""test category"=="#;
        let text = string_literal(&mut input).unwrap();
        assert!(matches!(text, Cow::Borrowed("test category")));
        assert_eq!(input, "==");
    }

    #[test]
    fn unknown_escape_keeps_backslash() {
        assert_eq!(
            lex_one(r#""a\qb\n""#).0,
            TokenKind::Str("a\\qb\n".into())
        );
    }

    #[test]
    fn unterminated_after_escape_fails() {
        let mut input = r#""abc\""#;
        assert!(string_literal(&mut input).is_err());
    }

    #[test]
    fn numbers() {
        assert_eq!(lex_one("100").0, TokenKind::Number("100".into()));
        assert_eq!(lex_one("-2.50)").0, TokenKind::Number("-2.50".into()));
    }

    #[test]
    fn two_char_operators_win() {
        assert_eq!(lex_one("!=").0, TokenKind::Compare(CompareOp::Neq));
        assert_eq!(lex_one("!(").0, TokenKind::Not);
        assert_eq!(lex_one(">=").0, TokenKind::Compare(CompareOp::Gte));
        assert_eq!(lex_one("> 1").0, TokenKind::Compare(CompareOp::Gt));
        assert_eq!(lex_one("&&").0, TokenKind::And);
    }

    #[test]
    fn lone_ampersand_fails() {
        let mut input = "& x";
        assert!(token(&mut input).is_err());
    }
}
