use crate::types::CompareOp;

use super::token::{Token, TokenKind};

/// Collapse `eval("toUpperCase()", A) == eval("toUpperCase()", B)` into
/// `A <IEq> B` (and `!=` into `INeq`).
///
/// Sequences that only partially match are left untouched so the parser can report
/// them at their original position.
pub(super) fn collapse_case_insensitive(tokens: Vec<Token>) -> Vec<Token> {
    if !tokens.iter().any(|t| t.kind == TokenKind::UpperCaseOpen) {
        return tokens;
    }
    let mut out = Vec::with_capacity(tokens.len());
    let mut i = 0;
    while i < tokens.len() {
        if let Some(collapsed) = match_idiom(&tokens[i..]) {
            out.extend(collapsed);
            i += IDIOM_LEN;
        } else {
            out.push(tokens[i].clone());
            i += 1;
        }
    }
    out
}

const IDIOM_LEN: usize = 7;

fn match_idiom(window: &[Token]) -> Option<[Token; 3]> {
    let [open_l, left, close_l, cmp, open_r, right, close_r, ..] = window else {
        return None;
    };
    let framed = open_l.kind == TokenKind::UpperCaseOpen
        && close_l.kind == TokenKind::RParen
        && open_r.kind == TokenKind::UpperCaseOpen
        && close_r.kind == TokenKind::RParen;
    if !framed || !left.kind.is_operand() || !right.kind.is_operand() {
        return None;
    }
    let op = match cmp.kind {
        TokenKind::Compare(CompareOp::Eq) => CompareOp::IEq,
        TokenKind::Compare(CompareOp::Neq) => CompareOp::INeq,
        _ => return None,
    };
    Some([
        left.clone(),
        Token::new(TokenKind::Compare(op), cmp.span.clone()),
        right.clone(),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lex::tokenize;

    fn kinds(src: &str) -> Vec<TokenKind> {
        tokenize(src).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn collapses_equality() {
        assert_eq!(
            kinds(r#"MVEL.eval("toUpperCase()",discreteOrderItem.category.name)==MVEL.eval("toUpperCase()","merchandise")"#),
            vec![
                TokenKind::Path("discreteOrderItem.category.name".into()),
                TokenKind::Compare(CompareOp::IEq),
                TokenKind::Str("merchandise".into()),
            ]
        );
    }

    #[test]
    fn collapses_inequality_inside_larger_expression() {
        assert_eq!(
            kinds(r#"a==1&&EVAL("toUpperCase()",b)!=EVAL("toUpperCase()","x")"#),
            vec![
                TokenKind::Path("a".into()),
                TokenKind::Compare(CompareOp::Eq),
                TokenKind::Number("1".into()),
                TokenKind::And,
                TokenKind::Path("b".into()),
                TokenKind::Compare(CompareOp::INeq),
                TokenKind::Str("x".into()),
            ]
        );
    }

    #[test]
    fn relational_comparator_is_not_collapsed() {
        let tokens = kinds(r#"EVAL("toUpperCase()",b)>EVAL("toUpperCase()","x")"#);
        assert_eq!(tokens[0], TokenKind::UpperCaseOpen);
        assert_eq!(tokens.len(), 7);
    }

    #[test]
    fn one_sided_idiom_is_not_collapsed() {
        let tokens = kinds(r#"EVAL("toUpperCase()",b)=="x""#);
        assert_eq!(tokens[0], TokenKind::UpperCaseOpen);
    }
}
