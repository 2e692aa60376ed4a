//! Translate boolean rule expressions into the structured rule tree used by a
//! visual rule builder.
//!
//! ```
//! use rulebuilder::{translate, ComparisonOp, FieldService, InputRecord, LogicalOp};
//!
//! let records = [InputRecord::new()
//!     .set("matchRule", "customer.emailAddress!=customer.username&&customer.deactivated==true")];
//!
//! let wrapper = translate(&records, "matchRule", None, &FieldService::customer()).unwrap();
//! let rule = &wrapper[0];
//! assert_eq!(rule.group_operator, LogicalOp::And);
//!
//! let ops: Vec<_> = rule.leaves().map(|leaf| leaf.operator).collect();
//! assert_eq!(ops, [ComparisonOp::NotEqualField, ComparisonOp::Equals]);
//! ```

mod classify;
mod error;
mod lex;
mod parse;
mod resolve;
mod translate;
mod types;

pub use classify::{classify, classify_expr};
pub use error::{ExpressionError, TranslateError};
pub use lex::{tokenize, LexError, Token, TokenKind};
pub use parse::{parse, ParseError, MAX_DEPTH};
pub use resolve::{FieldResolver, FieldService, FieldType, RootContext, UnresolvableFieldError};
pub use translate::{
    translate, translate_expression, PartialTranslation, Translator, TranslatorBuilder,
    TranslatorConfig,
};
pub use types::{
    field, field_ref, CompareOp, Comparison, ComparisonOp, Expr, ExpressionLeaf, FieldExpr,
    InputRecord, LogicalOp, Operand, RuleGroup, RuleNode, RuleRecord, RuleWrapper,
};
