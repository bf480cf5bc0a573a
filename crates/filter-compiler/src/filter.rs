use crate::error::{CompileError, CompileErrors};
use model::core::value::Value;

/// Result of compiling an expression tree to a `WHERE` clause.
///
/// `where_clause` is `None` when the root node could not be compiled. A
/// failure anywhere in the tree poisons every ancestor, so a clause is only
/// present when `errors` is empty. Callers should still go through
/// [`into_result`](Self::into_result) rather than check the clause alone.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledFilter {
    pub where_clause: Option<String>,
    pub parameters: Vec<Value>,
    pub errors: Vec<CompileError>,
}

impl CompiledFilter {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty() && self.where_clause.is_some()
    }

    /// The clause and its parameters, or every error that was collected.
    pub fn into_result(self) -> Result<(String, Vec<Value>), CompileErrors> {
        match self.where_clause {
            Some(clause) if self.errors.is_empty() => Ok((clause, self.parameters)),
            _ => Err(CompileErrors(self.errors)),
        }
    }
}
