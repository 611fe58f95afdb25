//! Utilities to traverse the binary trees behind both indexes.

use tinyvec::TinyVec;

/// A node of an owned binary tree.
pub(crate) trait TreeNode: Sized {
    /// The child holding values `<=` the split value.
    fn left(&self) -> Option<&Self>;

    /// The child holding values `>` the split value.
    fn right(&self) -> Option<&Self>;

    /// Returns `true` if this is a leaf node without children.
    #[inline]
    fn is_leaf(&self) -> bool {
        self.left().is_none() && self.right().is_none()
    }

    /// How many nodes this node accounts for in [`subtree_size`].
    ///
    /// Range tree nodes override this to include their associated tree.
    #[inline]
    fn weight(&self) -> usize {
        1
    }
}

/// Lazily yields every leaf below a node, left to right.
///
/// If the root is itself a leaf, it is the only item.
#[derive(Debug)]
pub(crate) struct Leaves<'a, T: TreeNode> {
    // Use TinyVec to avoid heap allocations for shallow trees
    stack: TinyVec<[Option<&'a T>; 32]>,
}

impl<'a, T: TreeNode> Leaves<'a, T> {
    pub(crate) fn new(root: &'a T) -> Self {
        let mut stack = TinyVec::new();
        stack.push(Some(root));
        Self { stack }
    }
}

impl<'a, T: TreeNode> Iterator for Leaves<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop().flatten() {
            if node.is_leaf() {
                return Some(node);
            }
            // pushed in reverse so the left child is popped first
            if let Some(right) = node.right() {
                self.stack.push(Some(right));
            }
            if let Some(left) = node.left() {
                self.stack.push(Some(left));
            }
        }
        None
    }
}

/// All leaves below `root`, including `root` itself if it is a leaf.
#[inline]
pub(crate) fn leaves<T: TreeNode>(root: &T) -> Leaves<'_, T> {
    Leaves::new(root)
}

/// The summed [`TreeNode::weight`] of every node below and including `root`.
pub(crate) fn subtree_size<T: TreeNode>(root: &T) -> usize {
    let mut stack: TinyVec<[Option<&T>; 32]> = TinyVec::new();
    stack.push(Some(root));

    let mut size = 0;
    while let Some(node) = stack.pop().flatten() {
        size += node.weight();
        stack.extend([node.left(), node.right()].into_iter().flatten().map(Some));
    }
    size
}

/// The number of nodes on the longest root-to-leaf path.
pub(crate) fn subtree_depth<T: TreeNode>(root: &T) -> usize {
    let left = root.left().map_or(0, subtree_depth);
    let right = root.right().map_or(0, subtree_depth);
    1 + left.max(right)
}
