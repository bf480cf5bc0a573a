//! Expression trees describing conditions for selecting an entity.
//!
//! This crate decouples the concrete query language from the execution of
//! queries against a database: callers build an [`Expr`] with the factory
//! functions below, assemble it into an [`ExprTree`], and hand the tree to a
//! compiler implementing [`ExprVisitor`].

use model::core::value::Value;

pub mod ast;
pub mod traverse;

pub use ast::{
    annotations::Annotations,
    expr::{BinaryOperator, Expr},
    tree::{ExprId, ExprTree, Node, NodeKind},
    visitor::ExprVisitor,
};
pub use traverse::{iterate_parents, iterate_post_order};

pub fn field(name: impl Into<String>) -> Expr {
    Expr::Field(name.into())
}

pub fn parameter() -> Expr {
    Expr::Parameter
}

pub fn literal(value: impl Into<Value>) -> Expr {
    Expr::Literal(value.into())
}

/// Conjunction of two terms.
pub fn and(left: Expr, right: Expr) -> Expr {
    Expr::binary(BinaryOperator::And, left, right)
}

/// Disjunction of two terms.
pub fn or(left: Expr, right: Expr) -> Expr {
    Expr::binary(BinaryOperator::Or, left, right)
}

pub fn equals(left: Expr, right: Expr) -> Expr {
    Expr::binary(BinaryOperator::Equals, left, right)
}

/// Full-text match of `left` against the query in `right`.
pub fn matches(left: Expr, right: Expr) -> Expr {
    Expr::binary(BinaryOperator::Matches, left, right)
}
