use criteria::ExprId;
use thiserror::Error;

/// A problem found while compiling one node of a filter.
///
/// Errors are collected rather than returned early, so one compilation
/// reports every independent problem in the tree.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompileError {
    /// A `Parameter` node was reached.
    #[error("Parameter expression not supported")]
    UnsupportedExpression { node: ExprId },

    /// A document field name contains a single quote.
    #[error("Single quote not allowed in field name: {name}")]
    UnsafeFieldName { node: ExprId, name: String },

    /// A document field name contains `?` while placeholders are anonymous.
    #[error("Placeholder character '?' not allowed in field name: {name}")]
    PlaceholderInFieldName { node: ExprId, name: String },

    /// A literal holds a value the target column cannot be compared against.
    #[error("Unknown value type of {value}: {kind}")]
    UnsupportedLiteralType {
        node: ExprId,
        value: String,
        kind: &'static str,
    },
}

impl CompileError {
    /// The node the error was reported for.
    pub fn node(&self) -> ExprId {
        match self {
            CompileError::UnsupportedExpression { node }
            | CompileError::UnsafeFieldName { node, .. }
            | CompileError::PlaceholderInFieldName { node, .. }
            | CompileError::UnsupportedLiteralType { node, .. } => *node,
        }
    }
}

/// Every error of a failed compilation.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Filter failed to compile: {}", join(.0))]
pub struct CompileErrors(pub Vec<CompileError>);

fn join(errors: &[CompileError]) -> String {
    if errors.is_empty() {
        return "no fragment produced".to_string();
    }
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl CompileErrors {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CompileError> {
        self.0.iter()
    }
}

impl IntoIterator for CompileErrors {
    type Item = CompileError;
    type IntoIter = std::vec::IntoIter<CompileError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
