use crate::ast::tree::Node;

/// Calls `f` for every member of the parent chain of `node`, starting with
/// its parent. Stops iterating if `f` returns false.
pub fn iterate_parents<'a, F>(node: Node<'a>, mut f: F)
where
    F: FnMut(Node<'a>) -> bool,
{
    for ancestor in node.ancestors() {
        if !f(ancestor) {
            return;
        }
    }
}

/// Calls `f` for every node of the subtree rooted at `node`, children before
/// their parent and left before right.
///
/// Returns false if `f` returned false for some node, in which case no
/// further nodes were visited.
pub fn iterate_post_order<'a, F>(node: Node<'a>, mut f: F) -> bool
where
    F: FnMut(Node<'a>) -> bool,
{
    // (node, children already pushed)
    let mut stack = vec![(node, false)];
    while let Some((current, expanded)) = stack.pop() {
        match current.children() {
            Some((left, right)) if !expanded => {
                stack.push((current, true));
                stack.push((right, false));
                stack.push((left, false));
            }
            _ => {
                if !f(current) {
                    return false;
                }
            }
        }
    }
    true
}
