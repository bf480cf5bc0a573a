use criteria::ExprTree;

/// A trait for compiling expression trees into a specific filter format.
pub trait FilterCompiler {
    /// The type of filter that this compiler produces.
    type Filter;

    /// Compile the tree into a filter.
    fn compile(&self, tree: &ExprTree) -> Self::Filter;
}
