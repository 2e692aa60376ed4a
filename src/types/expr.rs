use std::fmt;
use std::ops::Not;

use super::rule::{ComparisonOp, LogicalOp};

/// Comparators as they appear in source expressions.
///
/// `IEq` and `INeq` never come out of the character-level lexer directly; they are
/// produced when the `eval("toUpperCase()", ..)` idiom is collapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOp {
    Eq,
    Neq,
    Gt,
    Gte,
    Lt,
    Lte,
    IEq,
    INeq,
}

impl CompareOp {
    /// The operator a comparison against a literal classifies to.
    #[must_use]
    pub fn literal_operator(self) -> ComparisonOp {
        match self {
            CompareOp::Eq => ComparisonOp::Equals,
            CompareOp::Neq => ComparisonOp::NotEqual,
            CompareOp::Gt => ComparisonOp::GreaterThan,
            CompareOp::Gte => ComparisonOp::GreaterOrEqual,
            CompareOp::Lt => ComparisonOp::LessThan,
            CompareOp::Lte => ComparisonOp::LessOrEqual,
            CompareOp::IEq => ComparisonOp::IEquals,
            CompareOp::INeq => ComparisonOp::INotEqual,
        }
    }

    /// The operator a comparison against another field classifies to. The
    /// case-insensitive comparators have no field form and keep their literal one.
    #[must_use]
    pub fn field_operator(self) -> ComparisonOp {
        match self {
            CompareOp::Eq => ComparisonOp::EqualsField,
            CompareOp::Neq => ComparisonOp::NotEqualField,
            CompareOp::Gt => ComparisonOp::GreaterThanField,
            CompareOp::Gte => ComparisonOp::GreaterOrEqualField,
            CompareOp::Lt => ComparisonOp::LessThanField,
            CompareOp::Lte => ComparisonOp::LessOrEqualField,
            CompareOp::IEq | CompareOp::INeq => self.literal_operator(),
        }
    }

    #[must_use]
    pub fn is_case_insensitive(self) -> bool {
        matches!(self, CompareOp::IEq | CompareOp::INeq)
    }
}

/// Right-hand side of a comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    /// A dotted field path, possibly naming another field of the same root.
    Path(String),
    /// String literal content with escapes already resolved.
    Str(String),
    /// Numeric literal, kept exactly as written.
    Number(String),
    Bool(bool),
    Null,
}

impl Operand {
    /// The operand's content as the rule builder stores it: quotes stripped for
    /// strings, everything else verbatim.
    #[must_use]
    pub fn text(&self) -> String {
        match self {
            Operand::Path(p) => p.clone(),
            Operand::Str(s) => s.clone(),
            Operand::Number(n) => n.clone(),
            Operand::Bool(b) => b.to_string(),
            Operand::Null => "null".to_owned(),
        }
    }
}

impl From<&str> for Operand {
    fn from(v: &str) -> Self {
        Operand::Str(v.to_owned())
    }
}

impl From<String> for Operand {
    fn from(v: String) -> Self {
        Operand::Str(v)
    }
}

impl From<bool> for Operand {
    fn from(v: bool) -> Self {
        Operand::Bool(v)
    }
}

impl From<i64> for Operand {
    fn from(v: i64) -> Self {
        Operand::Number(v.to_string())
    }
}

/// A single unresolved comparison: raw left path, comparator, right operand.
///
/// `negated` is set when `!` was applied directly to the comparison; the classifier
/// folds it into the operator instead of producing a `NOT` group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparison {
    pub field: String,
    pub op: CompareOp,
    pub value: Operand,
    pub negated: bool,
}

impl Comparison {
    #[must_use]
    pub fn negate(mut self) -> Self {
        self.negated = !self.negated;
        self
    }
}

/// Parsed expression tree. Field paths are still raw strings; classification
/// against a resolver turns it into a [`RuleNode`](super::RuleNode).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Compare(Comparison),
    Group { op: LogicalOp, children: Vec<Expr> },
}

impl Expr {
    /// Conjoin with another expression. Chaining extends an existing `AND` group
    /// so `a.and(b).and(c)` matches what `a&&b&&c` parses to.
    #[must_use]
    pub fn and(self, other: Expr) -> Expr {
        self.chain(LogicalOp::And, other)
    }

    /// Disjoin with another expression, extending an existing `OR` group.
    #[must_use]
    pub fn or(self, other: Expr) -> Expr {
        self.chain(LogicalOp::Or, other)
    }

    fn chain(self, op: LogicalOp, other: Expr) -> Expr {
        match self {
            Expr::Group {
                op: existing,
                mut children,
            } if existing == op => {
                children.push(other);
                Expr::Group { op, children }
            }
            first => Expr::Group {
                op,
                children: vec![first, other],
            },
        }
    }
}

/// Grouped negation. A negated conjunction hands its terms to the `NOT` group
/// directly; anything else becomes the single child.
impl Not for Expr {
    type Output = Expr;

    fn not(self) -> Expr {
        match self {
            Expr::Group {
                op: LogicalOp::And,
                children,
            } => Expr::Group {
                op: LogicalOp::Not,
                children,
            },
            other => Expr::Group {
                op: LogicalOp::Not,
                children: vec![other],
            },
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompareOp::Eq => write!(f, "=="),
            CompareOp::Neq => write!(f, "!="),
            CompareOp::Gt => write!(f, ">"),
            CompareOp::Gte => write!(f, ">="),
            CompareOp::Lt => write!(f, "<"),
            CompareOp::Lte => write!(f, "<="),
            CompareOp::IEq => write!(f, "==i"),
            CompareOp::INeq => write!(f, "!=i"),
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Path(p) => write!(f, "{p}"),
            Operand::Str(s) => write!(f, "{s:?}"),
            Operand::Number(n) => write!(f, "{n}"),
            Operand::Bool(b) => write!(f, "{b}"),
            Operand::Null => write!(f, "null"),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Compare(c) => {
                if c.negated {
                    write!(f, "!")?;
                }
                write!(f, "({} {} {})", c.field, c.op, c.value)
            }
            Expr::Group { op, children } => {
                if *op == LogicalOp::Not {
                    write!(f, "NOT ")?;
                }
                let sep = match op {
                    LogicalOp::Or => " OR ",
                    LogicalOp::And | LogicalOp::Not => " AND ",
                };
                write!(f, "(")?;
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        write!(f, "{sep}")?;
                    }
                    write!(f, "{child}")?;
                }
                write!(f, ")")
            }
        }
    }
}

/// Left-hand field path waiting for its comparator; each method turns it into an
/// [`Expr::Compare`] against an [`Operand`]. Start one with [`field()`].
#[derive(Debug, Clone)]
pub struct FieldExpr {
    path: String,
}

impl FieldExpr {
    fn compare(self, op: CompareOp, value: Operand) -> Expr {
        Expr::Compare(Comparison {
            field: self.path,
            op,
            value,
            negated: false,
        })
    }

    #[must_use]
    pub fn eq(self, value: impl Into<Operand>) -> Expr {
        self.compare(CompareOp::Eq, value.into())
    }

    #[must_use]
    pub fn neq(self, value: impl Into<Operand>) -> Expr {
        self.compare(CompareOp::Neq, value.into())
    }

    #[must_use]
    pub fn gt(self, value: impl Into<Operand>) -> Expr {
        self.compare(CompareOp::Gt, value.into())
    }

    #[must_use]
    pub fn gte(self, value: impl Into<Operand>) -> Expr {
        self.compare(CompareOp::Gte, value.into())
    }

    #[must_use]
    pub fn lt(self, value: impl Into<Operand>) -> Expr {
        self.compare(CompareOp::Lt, value.into())
    }

    #[must_use]
    pub fn lte(self, value: impl Into<Operand>) -> Expr {
        self.compare(CompareOp::Lte, value.into())
    }

    /// Case-insensitive equality, as written with the `toUpperCase()` idiom.
    #[must_use]
    pub fn ieq(self, value: impl Into<Operand>) -> Expr {
        self.compare(CompareOp::IEq, value.into())
    }
}

#[must_use]
pub fn field(path: &str) -> FieldExpr {
    FieldExpr {
        path: path.to_owned(),
    }
}

/// A right-hand operand naming another field.
#[must_use]
pub fn field_ref(path: &str) -> Operand {
    Operand::Path(path.to_owned())
}
