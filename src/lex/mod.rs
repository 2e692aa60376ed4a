mod error;
mod grammar;
mod normalize;
mod token;

pub use error::LexError;
pub use token::{Token, TokenKind};

/// Split an expression into tokens.
///
/// The case-insensitive `eval("toUpperCase()", ..)` idiom is collapsed into a
/// single comparator token before returning.
///
/// # Errors
///
/// Returns [`LexError`] on an unterminated string literal or a character that
/// starts no token.
pub fn tokenize(expr: &str) -> Result<Vec<Token>, LexError> {
    let mut input = expr;
    let mut tokens = Vec::new();
    loop {
        input = input.trim_start_matches(|c: char| c.is_ascii_whitespace());
        if input.is_empty() {
            break;
        }
        let start = expr.len() - input.len();
        let rest = input;
        match grammar::token(&mut input) {
            Ok(kind) => {
                let end = expr.len() - input.len();
                tokens.push(Token::new(kind, start..end));
            }
            Err(_) => return Err(lex_error(rest, start)),
        }
    }
    tracing::trace!(count = tokens.len(), "tokenized expression");
    Ok(normalize::collapse_case_insensitive(tokens))
}

fn lex_error(rest: &str, offset: usize) -> LexError {
    match rest.chars().next() {
        Some('"') => LexError::UnterminatedString { offset },
        Some(ch) => LexError::UnexpectedChar { ch, offset },
        None => LexError::UnexpectedChar { ch: ' ', offset },
    }
}
