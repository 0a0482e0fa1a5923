//! Depth-bounded pre-order traversal.

use super::Node;

/// Visit `root` and every node below it in pre-order.
///
/// See [`walk_with_depth`] for the meaning of `max_depth`.
pub fn walk<'a, F>(root: &'a Node, max_depth: Option<usize>, mut visit: F)
where
    F: FnMut(&'a Node),
{
    walk_with_depth(root, max_depth, |node, _| visit(node));
}

/// Visit `root` and every node below it in pre-order, passing each node's
/// depth relative to `root` (root = 0).
///
/// Children are visited in field-declaration order, and within a list field
/// in list order. Nodes deeper than `max_depth` are neither visited nor
/// descended into; `None` means unbounded.
pub fn walk_with_depth<'a, F>(root: &'a Node, max_depth: Option<usize>, mut visit: F)
where
    F: FnMut(&'a Node, usize),
{
    let mut stack = vec![(root, 0_usize)];

    while let Some((node, depth)) = stack.pop() {
        visit(node, depth);

        if max_depth.is_none_or(|max| depth < max) {
            let children: Vec<&Node> = node.children().collect();
            stack.extend(children.into_iter().rev().map(|child| (child, depth + 1)));
        }
    }
}

#[cfg(test)]
#[path = "walk_tests.rs"]
mod tests;
