//! Arena representation of an assembled expression.
//!
//! Nodes are stored in a flat table and refer to each other by [`ExprId`].
//! Child links point down, parent links point up; neither owns the other, so
//! the table has no reference cycles. Both are fixed once [`ExprTree::new`]
//! returns.

use crate::ast::{
    expr::{BinaryOperator, Expr},
    visitor::ExprVisitor,
};
use model::core::value::Value;
use std::fmt;
use tracing::trace;

/// Identity of a node within its [`ExprTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExprId(usize);

impl ExprId {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for ExprId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Field(String),
    Parameter,
    Literal(Value),
    Binary {
        op: BinaryOperator,
        left: ExprId,
        right: ExprId,
    },
}

#[derive(Debug, Clone)]
struct Slot {
    kind: NodeKind,
    parent: Option<ExprId>,
}

#[derive(Debug, Clone)]
pub struct ExprTree {
    nodes: Vec<Slot>,
    root: ExprId,
}

impl ExprTree {
    /// Assembles `expr` into a tree rooted at `expr` itself.
    pub fn new(expr: Expr) -> Self {
        let mut nodes = Vec::new();
        let root = assemble(&mut nodes, expr);
        trace!(nodes = nodes.len(), "Assembled expression tree");
        Self { nodes, root }
    }

    pub fn root(&self) -> Node<'_> {
        Node {
            tree: self,
            id: self.root,
        }
    }

    pub fn node(&self, id: ExprId) -> Option<Node<'_>> {
        (id.0 < self.nodes.len()).then_some(Node { tree: self, id })
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// All nodes in storage order. Storage order is a post-order of the tree.
    pub fn nodes(&self) -> impl DoubleEndedIterator<Item = Node<'_>> + ExactSizeIterator {
        (0..self.nodes.len()).map(move |i| Node {
            tree: self,
            id: ExprId(i),
        })
    }

    fn slot(&self, id: ExprId) -> &Slot {
        &self.nodes[id.0]
    }
}

impl From<Expr> for ExprTree {
    fn from(expr: Expr) -> Self {
        ExprTree::new(expr)
    }
}

enum Frame {
    Visit(Expr),
    Right { op: BinaryOperator, right: Expr },
    Build { op: BinaryOperator, left: ExprId },
}

// Explicit work stack so chains of any depth assemble without recursion.
// Children are pushed before their parent, left subtree before right.
fn assemble(nodes: &mut Vec<Slot>, expr: Expr) -> ExprId {
    let mut stack = vec![Frame::Visit(expr)];
    // root of the most recently completed subtree
    let mut last = ExprId(0);

    while let Some(frame) = stack.pop() {
        let kind = match frame {
            Frame::Visit(Expr::Binary { op, left, right }) => {
                stack.push(Frame::Right { op, right: *right });
                stack.push(Frame::Visit(*left));
                continue;
            }
            Frame::Right { op, right } => {
                stack.push(Frame::Build { op, left: last });
                stack.push(Frame::Visit(right));
                continue;
            }
            Frame::Visit(Expr::Field(name)) => NodeKind::Field(name),
            Frame::Visit(Expr::Parameter) => NodeKind::Parameter,
            Frame::Visit(Expr::Literal(value)) => NodeKind::Literal(value),
            Frame::Build { op, left } => NodeKind::Binary {
                op,
                left,
                right: last,
            },
        };

        let id = ExprId(nodes.len());
        if let NodeKind::Binary { left, right, .. } = &kind {
            reparent(nodes, *left, id);
            reparent(nodes, *right, id);
        }
        nodes.push(Slot { kind, parent: None });
        last = id;
    }

    last
}

// the only place a parent link is ever written
fn reparent(nodes: &mut [Slot], child: ExprId, parent: ExprId) {
    let slot = &mut nodes[child.0];
    debug_assert!(slot.parent.is_none(), "node {child} already has a parent");
    slot.parent = Some(parent);
}

/// Borrowed handle to one node of an [`ExprTree`].
#[derive(Clone, Copy)]
pub struct Node<'a> {
    tree: &'a ExprTree,
    id: ExprId,
}

impl<'a> Node<'a> {
    pub fn id(&self) -> ExprId {
        self.id
    }

    pub fn tree(&self) -> &'a ExprTree {
        self.tree
    }

    pub fn kind(&self) -> &'a NodeKind {
        &self.tree.slot(self.id).kind
    }

    /// Returns the parent node, or `None` for the root.
    pub fn parent(&self) -> Option<Node<'a>> {
        self.tree.slot(self.id).parent.map(|id| self.with_id(id))
    }

    pub fn is_root(&self) -> bool {
        self.tree.slot(self.id).parent.is_none()
    }

    pub fn left(&self) -> Option<Node<'a>> {
        self.children().map(|(left, _)| left)
    }

    pub fn right(&self) -> Option<Node<'a>> {
        self.children().map(|(_, right)| right)
    }

    pub fn children(&self) -> Option<(Node<'a>, Node<'a>)> {
        match self.kind() {
            NodeKind::Binary { left, right, .. } => Some((self.with_id(*left), self.with_id(*right))),
            _ => None,
        }
    }

    pub fn operator(&self) -> Option<BinaryOperator> {
        match self.kind() {
            NodeKind::Binary { op, .. } => Some(*op),
            _ => None,
        }
    }

    pub fn field_name(&self) -> Option<&'a str> {
        match self.kind() {
            NodeKind::Field(name) => Some(name),
            _ => None,
        }
    }

    /// Ancestors from the parent up to the root.
    pub fn ancestors(&self) -> Ancestors<'a> {
        Ancestors {
            next: self.parent(),
        }
    }

    /// Calls the visitor callback matching this node's kind.
    pub fn accept<V: ExprVisitor>(&self, visitor: &mut V) -> V::Output {
        match self.kind() {
            NodeKind::Field(name) => visitor.visit_field(*self, name),
            NodeKind::Parameter => visitor.visit_parameter(*self),
            NodeKind::Literal(value) => visitor.visit_literal(*self, value),
            NodeKind::Binary { op, left, right } => {
                let (left, right) = (self.with_id(*left), self.with_id(*right));
                match op {
                    BinaryOperator::And => visitor.visit_and(*self, left, right),
                    BinaryOperator::Or => visitor.visit_or(*self, left, right),
                    BinaryOperator::Equals => visitor.visit_equals(*self, left, right),
                    BinaryOperator::Matches => visitor.visit_matches(*self, left, right),
                }
            }
        }
    }

    fn with_id(&self, id: ExprId) -> Node<'a> {
        Node {
            tree: self.tree,
            id,
        }
    }
}

impl PartialEq for Node<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for Node<'_> {}

impl fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id)
            .field("kind", self.kind())
            .finish()
    }
}

pub struct Ancestors<'a> {
    next: Option<Node<'a>>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = Node<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.parent();
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{and, equals, field, literal, or, parameter};

    #[test]
    fn test_assembly_sets_parents() {
        let tree = ExprTree::new(and(equals(field("ID"), literal(5)), parameter()));
        let root = tree.root();

        assert!(root.is_root());
        assert_eq!(root.operator(), Some(BinaryOperator::And));

        let (eq, param) = root.children().expect("binary root");
        assert_eq!(eq.parent(), Some(root));
        assert_eq!(param.parent(), Some(root));
        assert_eq!(param.kind(), &NodeKind::Parameter);

        let (id, five) = eq.children().expect("binary equals");
        assert_eq!(id.field_name(), Some("ID"));
        assert_eq!(id.parent(), Some(eq));
        assert_eq!(five.kind(), &NodeKind::Literal(Value::Int32(5)));
        assert_eq!(five.parent(), Some(eq));
    }

    #[test]
    fn test_parent_links_match_child_links() {
        let tree = ExprTree::new(or(
            and(field("a"), field("b")),
            equals(field("c"), or(literal(true), literal("x"))),
        ));

        let mut roots = 0;
        for node in tree.nodes() {
            match node.parent() {
                Some(parent) => {
                    let (left, right) = parent.children().expect("parents are binary");
                    assert!(left == node || right == node);
                }
                None => roots += 1,
            }
            if let Some((left, right)) = node.children() {
                assert_eq!(left.parent(), Some(node));
                assert_eq!(right.parent(), Some(node));
            }
        }
        assert_eq!(roots, 1);
        assert_eq!(tree.node_count(), 9);
    }

    #[test]
    fn test_single_node_tree() {
        let tree = ExprTree::from(field("title"));
        assert_eq!(tree.node_count(), 1);
        assert!(tree.root().parent().is_none());
        assert!(tree.root().children().is_none());
        assert_eq!(tree.root().ancestors().count(), 0);
    }

    #[test]
    fn test_ancestors() {
        let tree = ExprTree::new(and(or(field("a"), literal(1)), field("b")));
        let leaf = tree.root().left().and_then(|or| or.right()).expect("literal");
        let chain: Vec<_> = leaf.ancestors().map(|n| n.operator()).collect();
        assert_eq!(
            chain,
            vec![Some(BinaryOperator::Or), Some(BinaryOperator::And)]
        );
    }

    #[test]
    fn test_node_lookup() {
        let tree = ExprTree::new(field("a"));
        assert!(tree.node(tree.root().id()).is_some());
        assert!(tree.node(ExprId(1)).is_none());
    }
}
