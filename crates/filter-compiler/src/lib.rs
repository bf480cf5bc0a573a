//! Compiles [`criteria`] expression trees to parameterized SQL `WHERE` clauses.
//!
//! Fields are either native columns, emitted by name, or attributes of the
//! JSON document column, emitted as `Fields->'name'`. Literals compared with
//! a document attribute are bound as JSON text and cast with `::jsonb`; all
//! other literals are bound as-is. No literal is ever spliced into the SQL.
//!
//! ```
//! use criteria::{equals, field, literal, ExprTree};
//! use filter_compiler::compile;
//!
//! let tree = ExprTree::new(equals(field("title"), literal("foo")));
//! let (clause, params) = compile(&tree).into_result().unwrap();
//! assert_eq!(clause, "(Fields->'title' = ?::jsonb)");
//! assert_eq!(params.len(), 1);
//! ```

pub mod binder;
pub mod compiler;
pub mod context;
pub mod dialect;
pub mod error;
pub mod filter;
pub mod literal;
pub mod sql;

pub use compiler::FilterCompiler;
pub use error::{CompileError, CompileErrors};
pub use filter::CompiledFilter;
pub use sql::{SqlFilterCompiler, compile};
