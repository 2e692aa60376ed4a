use crate::resolve::{FieldResolver, UnresolvableFieldError};
use crate::types::{
    CompareOp, Comparison, ComparisonOp, Expr, ExpressionLeaf, Operand, RuleGroup, RuleNode,
};

/// Resolve a single comparison into a rule-builder leaf.
///
/// Operator selection, first match wins:
/// 1. case-insensitive comparators map to `IEQUALS`/`INOT_EQUAL` with the right
///    operand's content as value, resolved when it is a known field;
/// 2. `== null` / `!= null` map to `IS_NULL` / `NOT_NULL`;
/// 3. a right operand the resolver knows as a field selects the `*_FIELD` form, with
///    the resolved right field as value;
/// 4. everything else maps directly, keeping the literal text.
///
/// A comparison negated with `!` takes the negated operator.
///
/// # Errors
///
/// Returns [`UnresolvableFieldError`] if the left path (or a right-hand field
/// path) cannot be resolved.
pub fn classify<R>(cmp: &Comparison, resolver: &R) -> Result<ExpressionLeaf, UnresolvableFieldError>
where
    R: FieldResolver + ?Sized,
{
    let field_name = resolver.resolve(&cmp.field)?;
    let (operator, value) = match (cmp.op, &cmp.value) {
        (op, Operand::Path(path))
            if op.is_case_insensitive() && resolver.is_known_field(path) =>
        {
            (op.literal_operator(), resolver.resolve(path)?)
        }
        (op, value) if op.is_case_insensitive() => (op.literal_operator(), value.text()),
        (CompareOp::Eq, Operand::Null) => (ComparisonOp::IsNull, String::new()),
        (CompareOp::Neq, Operand::Null) => (ComparisonOp::NotNull, String::new()),
        (op, Operand::Path(path)) if resolver.is_known_field(path) => {
            (op.field_operator(), resolver.resolve(path)?)
        }
        (op, value) => (op.literal_operator(), value.text()),
    };
    let operator = if cmp.negated {
        operator.negated()
    } else {
        operator
    };
    Ok(ExpressionLeaf {
        field_name,
        operator,
        value,
    })
}

/// Classify every comparison of a parsed tree, keeping its group structure.
///
/// # Errors
///
/// Returns the first [`UnresolvableFieldError`] in left-to-right order.
pub fn classify_expr<R>(expr: &Expr, resolver: &R) -> Result<RuleNode, UnresolvableFieldError>
where
    R: FieldResolver + ?Sized,
{
    match expr {
        Expr::Compare(cmp) => classify(cmp, resolver).map(RuleNode::Leaf),
        Expr::Group { op, children } => {
            let children = children
                .iter()
                .map(|child| classify_expr(child, resolver))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(RuleNode::Group(RuleGroup {
                group_operator: *op,
                children,
            }))
        }
    }
}
