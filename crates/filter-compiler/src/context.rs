//! Document-context propagation, the first compiler pass.
//!
//! Literals compared against a field of the JSON document column must be bound
//! as JSON values, while literals compared against a native column are bound
//! as-is. The emitting pass cannot see that from the literal alone, so this
//! pass marks document fields and every `Equals` node with a marked child.
//! A literal is in document context when one of its ancestors is marked.

use criteria::{
    Annotations, BinaryOperator, ExprTree, Node, NodeKind, iterate_parents, iterate_post_order,
};
use model::schema::StorageSchema;
use tracing::trace;

pub const DOCUMENT_CONTEXT: &str = "JSON";

/// Marks the nodes below `root` that reference the document column.
pub fn mark_document_context(root: Node<'_>, schema: &StorageSchema) -> Annotations {
    let mut annotations = Annotations::new();

    iterate_post_order(root, |node| {
        match node.kind() {
            NodeKind::Field(name) if schema.is_document_field(name) => {
                trace!(node = %node.id(), field = %name, "Document field");
                annotations.set(node.id(), DOCUMENT_CONTEXT, true);
            }
            NodeKind::Binary {
                op: BinaryOperator::Equals,
                left,
                right,
            } => {
                if annotations.is_marked(*left, DOCUMENT_CONTEXT)
                    || annotations.is_marked(*right, DOCUMENT_CONTEXT)
                {
                    trace!(node = %node.id(), "Document comparison");
                    annotations.set(node.id(), DOCUMENT_CONTEXT, true);
                }
            }
            _ => {}
        }
        true
    });

    annotations
}

/// Iterates the parent chain to see if `node` sits under a document comparison.
pub fn is_in_document_context(node: Node<'_>, annotations: &Annotations) -> bool {
    let mut result = false;
    iterate_parents(node, |ancestor| {
        if annotations.is_marked(ancestor.id(), DOCUMENT_CONTEXT) {
            result = true;
            return false;
        }
        true
    });
    result
}

/// [`is_in_document_context`] for every node of `tree` at once, indexed by
/// [`ExprId::index`](criteria::ExprId::index).
///
/// Parents are stored after their children, so a reverse scan sees each
/// parent's answer before its children need it.
pub fn document_scope(tree: &ExprTree, annotations: &Annotations) -> Vec<bool> {
    let mut scope = vec![false; tree.node_count()];
    for node in tree.nodes().rev() {
        if let Some(parent) = node.parent() {
            scope[node.id().index()] = scope[parent.id().index()]
                || annotations.is_marked(parent.id(), DOCUMENT_CONTEXT);
        }
    }
    scope
}
