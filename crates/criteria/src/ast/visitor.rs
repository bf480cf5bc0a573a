use crate::ast::tree::Node;
use model::core::value::Value;

/// Visitor trait for expression trees.
///
/// [`Node::accept`] calls the method matching the node's kind. Binary
/// callbacks receive their children but do not descend into them. An
/// implementation either recurses by calling `accept` on the children itself,
/// or visits [`ExprTree::nodes`](crate::ExprTree::nodes) in storage order,
/// where children always come before their parent.
pub trait ExprVisitor {
    type Output;

    fn visit_field(&mut self, node: Node<'_>, name: &str) -> Self::Output;
    fn visit_parameter(&mut self, node: Node<'_>) -> Self::Output;
    fn visit_literal(&mut self, node: Node<'_>, value: &Value) -> Self::Output;
    fn visit_and(&mut self, node: Node<'_>, left: Node<'_>, right: Node<'_>) -> Self::Output;
    fn visit_or(&mut self, node: Node<'_>, left: Node<'_>, right: Node<'_>) -> Self::Output;
    fn visit_equals(&mut self, node: Node<'_>, left: Node<'_>, right: Node<'_>) -> Self::Output;
    fn visit_matches(&mut self, node: Node<'_>, left: Node<'_>, right: Node<'_>) -> Self::Output;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{and, ast::tree::ExprTree, equals, field, literal, matches, or, parameter};

    /// Renders the tree in prefix notation, exercising every callback.
    struct Prefix;

    impl Prefix {
        fn binary(&mut self, name: &str, left: Node<'_>, right: Node<'_>) -> String {
            format!("{name}({}, {})", left.accept(self), right.accept(self))
        }
    }

    impl ExprVisitor for Prefix {
        type Output = String;

        fn visit_field(&mut self, _node: Node<'_>, name: &str) -> String {
            format!("field:{name}")
        }

        fn visit_parameter(&mut self, _node: Node<'_>) -> String {
            "param".to_string()
        }

        fn visit_literal(&mut self, _node: Node<'_>, value: &Value) -> String {
            format!("lit:{value}")
        }

        fn visit_and(&mut self, _node: Node<'_>, left: Node<'_>, right: Node<'_>) -> String {
            self.binary("and", left, right)
        }

        fn visit_or(&mut self, _node: Node<'_>, left: Node<'_>, right: Node<'_>) -> String {
            self.binary("or", left, right)
        }

        fn visit_equals(&mut self, _node: Node<'_>, left: Node<'_>, right: Node<'_>) -> String {
            self.binary("eq", left, right)
        }

        fn visit_matches(&mut self, _node: Node<'_>, left: Node<'_>, right: Node<'_>) -> String {
            self.binary("match", left, right)
        }
    }

    #[test]
    fn test_dispatch_reaches_every_kind() {
        let tree = ExprTree::new(or(
            and(equals(field("ID"), literal(5)), parameter()),
            matches(field("body"), literal("term")),
        ));

        assert_eq!(
            tree.root().accept(&mut Prefix),
            "or(and(eq(field:ID, lit:5), param), match(field:body, lit:term))"
        );
    }

    #[test]
    fn test_accept_on_subtree() {
        let tree = ExprTree::new(and(field("a"), equals(field("b"), literal(false))));
        let right = tree.root().right().expect("right child");
        assert_eq!(right.accept(&mut Prefix), "eq(field:b, lit:false)");
    }
}
