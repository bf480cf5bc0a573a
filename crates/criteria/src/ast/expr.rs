use model::core::value::Value;
use std::fmt;

/// Operators of the binary expression nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    And,
    Or,
    Equals,
    Matches,
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BinaryOperator::And => write!(f, "and"),
            BinaryOperator::Or => write!(f, "or"),
            BinaryOperator::Equals => write!(f, "="),
            BinaryOperator::Matches => write!(f, "matches"),
        }
    }
}

/// An expression under construction.
///
/// Binary variants own their children, so an `Expr` is always a strict tree:
/// a subexpression cannot be shared between two parents. Parent links are
/// assigned when the expression is assembled into an
/// [`ExprTree`](crate::ast::tree::ExprTree).
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Access to a named attribute of the filtered entity.
    Field(String),

    /// A value to be supplied later.
    Parameter,

    /// A single constant value, think `5` or `"asdf"`. The type is not
    /// restricted here; compilers decide which kinds they handle.
    Literal(Value),

    Binary {
        op: BinaryOperator,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

impl Expr {
    pub fn binary(op: BinaryOperator, left: Expr, right: Expr) -> Self {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Field(name) => write!(f, "{name}"),
            Expr::Parameter => write!(f, "?"),
            Expr::Literal(Value::String(s)) => write!(f, "{s:?}"),
            Expr::Literal(value) => write!(f, "{value}"),
            Expr::Binary { op, left, right } => write!(f, "({left} {op} {right})"),
        }
    }
}
