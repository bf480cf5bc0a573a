//! JSON representation of an expression tree.
//!
//! ```json
//! { "and": [
//!     { "equals": [{ "field": "title" }, { "literal": "foo" }] },
//!     { "matches": [{ "field": "description" }, { "literal": "search term" }] }
//! ] }
//! ```
//!
//! `"parameter"` stands for a parameter node. Literal values are JSON
//! scalars; arrays and objects are accepted here and rejected by the compiler.

use criteria::Expr;
use model::core::value::Value;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExprFile {
    Field(String),
    Literal(serde_json::Value),
    Parameter,
    And(Box<ExprFile>, Box<ExprFile>),
    Or(Box<ExprFile>, Box<ExprFile>),
    Equals(Box<ExprFile>, Box<ExprFile>),
    Matches(Box<ExprFile>, Box<ExprFile>),
}

impl ExprFile {
    pub fn parse(source: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(source)
    }

    /// Builds the expression through the `criteria` factory functions.
    pub fn into_expr(self) -> Expr {
        match self {
            ExprFile::Field(name) => criteria::field(name),
            ExprFile::Literal(value) => criteria::literal(Value::from_json(value)),
            ExprFile::Parameter => criteria::parameter(),
            ExprFile::And(l, r) => criteria::and(l.into_expr(), r.into_expr()),
            ExprFile::Or(l, r) => criteria::or(l.into_expr(), r.into_expr()),
            ExprFile::Equals(l, r) => criteria::equals(l.into_expr(), r.into_expr()),
            ExprFile::Matches(l, r) => criteria::matches(l.into_expr(), r.into_expr()),
        }
    }
}
