use std::fmt;

use serde::{Deserialize, Serialize};

/// Logical connective of a rule group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogicalOp {
    And,
    Or,
    /// Negation of the conjunction of the group's children.
    Not,
}

/// Operator of a leaf comparison, as understood by the rule builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComparisonOp {
    Equals,
    NotEqual,
    #[serde(rename = "IEQUALS")]
    IEquals,
    #[serde(rename = "INOT_EQUAL")]
    INotEqual,
    GreaterThan,
    GreaterOrEqual,
    LessThan,
    LessOrEqual,
    EqualsField,
    NotEqualField,
    GreaterThanField,
    GreaterOrEqualField,
    LessThanField,
    LessOrEqualField,
    IsNull,
    NotNull,
}

impl ComparisonOp {
    /// The operator with the opposite truth value.
    #[must_use]
    pub fn negated(self) -> Self {
        use ComparisonOp::*;
        match self {
            Equals => NotEqual,
            NotEqual => Equals,
            IEquals => INotEqual,
            INotEqual => IEquals,
            GreaterThan => LessOrEqual,
            LessOrEqual => GreaterThan,
            GreaterOrEqual => LessThan,
            LessThan => GreaterOrEqual,
            EqualsField => NotEqualField,
            NotEqualField => EqualsField,
            GreaterThanField => LessOrEqualField,
            LessOrEqualField => GreaterThanField,
            GreaterOrEqualField => LessThanField,
            LessThanField => GreaterOrEqualField,
            IsNull => NotNull,
            NotNull => IsNull,
        }
    }

    /// Whether the leaf value names another field rather than holding a literal.
    #[must_use]
    pub fn compares_fields(self) -> bool {
        use ComparisonOp::*;
        matches!(
            self,
            EqualsField
                | NotEqualField
                | GreaterThanField
                | GreaterOrEqualField
                | LessThanField
                | LessOrEqualField
        )
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        use ComparisonOp::*;
        match self {
            Equals => "EQUALS",
            NotEqual => "NOT_EQUAL",
            IEquals => "IEQUALS",
            INotEqual => "INOT_EQUAL",
            GreaterThan => "GREATER_THAN",
            GreaterOrEqual => "GREATER_OR_EQUAL",
            LessThan => "LESS_THAN",
            LessOrEqual => "LESS_OR_EQUAL",
            EqualsField => "EQUALS_FIELD",
            NotEqualField => "NOT_EQUAL_FIELD",
            GreaterThanField => "GREATER_THAN_FIELD",
            GreaterOrEqualField => "GREATER_OR_EQUAL_FIELD",
            LessThanField => "LESS_THAN_FIELD",
            LessOrEqualField => "LESS_OR_EQUAL_FIELD",
            IsNull => "IS_NULL",
            NotNull => "NOT_NULL",
        }
    }
}

/// A resolved comparison: relative field name, operator, and value.
///
/// For the `*_FIELD` operators `value` is the relative name of the right-hand field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpressionLeaf {
    #[serde(rename = "name")]
    pub field_name: String,
    pub operator: ComparisonOp,
    pub value: String,
}

/// A nested logical group inside a rule record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleGroup {
    pub group_operator: LogicalOp,
    #[serde(rename = "groups")]
    pub children: Vec<RuleNode>,
}

/// Node of the resolved rule tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleNode {
    Group(RuleGroup),
    Leaf(ExpressionLeaf),
}

/// The top-level rule translated from one input record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
    pub group_operator: LogicalOp,
    #[serde(rename = "groups")]
    pub children: Vec<RuleNode>,
}

impl RuleRecord {
    #[must_use]
    pub fn with_quantity(mut self, quantity: Option<i64>) -> Self {
        self.quantity = quantity;
        self
    }

    /// Leaves directly under this record, skipping nested groups.
    pub fn leaves(&self) -> impl Iterator<Item = &ExpressionLeaf> {
        self.children.iter().filter_map(|node| match node {
            RuleNode::Leaf(leaf) => Some(leaf),
            RuleNode::Group(_) => None,
        })
    }
}

/// A bare leaf becomes an `AND` record holding just that leaf; a group becomes the
/// record itself.
impl From<RuleNode> for RuleRecord {
    fn from(node: RuleNode) -> Self {
        match node {
            RuleNode::Group(group) => RuleRecord {
                quantity: None,
                group_operator: group.group_operator,
                children: group.children,
            },
            leaf @ RuleNode::Leaf(_) => RuleRecord {
                quantity: None,
                group_operator: LogicalOp::And,
                children: vec![leaf],
            },
        }
    }
}

impl fmt::Display for LogicalOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogicalOp::And => write!(f, "AND"),
            LogicalOp::Or => write!(f, "OR"),
            LogicalOp::Not => write!(f, "NOT"),
        }
    }
}

impl fmt::Display for ComparisonOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ExpressionLeaf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {:?}", self.field_name, self.operator, self.value)
    }
}

fn write_group(f: &mut fmt::Formatter<'_>, op: LogicalOp, children: &[RuleNode]) -> fmt::Result {
    write!(f, "{op}(")?;
    for (i, child) in children.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{child}")?;
    }
    write!(f, ")")
}

impl fmt::Display for RuleNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleNode::Group(g) => write_group(f, g.group_operator, &g.children),
            RuleNode::Leaf(leaf) => write!(f, "{leaf}"),
        }
    }
}

impl fmt::Display for RuleRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_group(f, self.group_operator, &self.children)?;
        if let Some(q) = self.quantity {
            write!(f, " x{q}")?;
        }
        Ok(())
    }
}
