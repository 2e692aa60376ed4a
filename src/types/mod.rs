mod expr;
mod record;
mod rule;
mod wrapper;

pub use expr::{field, field_ref, CompareOp, Comparison, Expr, FieldExpr, Operand};
pub use record::InputRecord;
pub use rule::{ComparisonOp, ExpressionLeaf, LogicalOp, RuleGroup, RuleNode, RuleRecord};
pub use wrapper::RuleWrapper;
