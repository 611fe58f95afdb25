use std::fmt;

use crate::point::Point;
use crate::r#type::IndexableNum;
use crate::region::Region;
use crate::traversal::{subtree_depth, subtree_size, TreeNode};

/// An immutable, balanced k-d tree over a set of points.
///
/// Usually this will be created from scratch via [`KDTreeBuilder`][crate::kdtree::KDTreeBuilder]
/// or [`KDTree::try_new`].
///
/// The tree is never mutated after construction, so it is `Send` and `Sync` whenever the
/// point identifiers are, and can be queried from many threads without locking.
#[derive(Debug, Clone, PartialEq)]
pub struct KDTree<N: IndexableNum, T> {
    pub(crate) points: Vec<Point<N, T>>,
    pub(crate) root: Box<Node<N>>,
    pub(crate) dimensions: usize,
    pub(crate) bounds: Region<N>,
}

impl<N: IndexableNum, T> KDTree<N, T> {
    /// The minimum bounding region of every indexed point.
    pub fn bounds(&self) -> &Region<N> {
        &self.bounds
    }

    /// The number of nodes on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        subtree_depth(self.root.as_ref())
    }

    /// Consume the tree, returning the indexed points in insertion order.
    pub fn into_points(self) -> Vec<Point<N, T>> {
        self.points
    }

    pub(crate) fn root(&self) -> &Node<N> {
        &self.root
    }

    pub(crate) fn node_count(&self) -> usize {
        subtree_size(self.root.as_ref())
    }
}

/// A node in the KDTree.
///
/// Internal nodes split their points on `axis`: values `<= value` go left, values `> value`
/// go right, and both children are always present. Leaves hold the insertion indices of
/// their points; more than one only when those points share a coordinate tuple. The `axis`
/// and `value` of a leaf are unused.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Node<N: IndexableNum> {
    pub(crate) axis: usize,
    pub(crate) value: N,
    pub(crate) left: Option<Box<Node<N>>>,
    pub(crate) right: Option<Box<Node<N>>>,
    pub(crate) items: Vec<u32>,
}

impl<N: IndexableNum> Node<N> {
    pub(crate) fn leaf(items: Vec<u32>) -> Self {
        Self {
            axis: 0,
            value: N::default(),
            left: None,
            right: None,
            items,
        }
    }

    pub(crate) fn split(axis: usize, value: N, left: Self, right: Self) -> Self {
        Self {
            axis,
            value,
            left: Some(Box::new(left)),
            right: Some(Box::new(right)),
            items: vec![],
        }
    }
}

impl<N: IndexableNum> TreeNode for Node<N> {
    fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }
}

impl<N: IndexableNum, T: fmt::Display> KDTree<N, T> {
    fn write_node(&self, f: &mut fmt::Formatter<'_>, node: &Node<N>) -> fmt::Result {
        if node.is_leaf() {
            return self.write_summary(f, node);
        }

        write!(f, "axis {}: ({}) -> left: (", node.axis, node.value)?;
        if let Some(left) = node.left() {
            self.write_summary(f, left)?;
        }
        write!(f, "), right: (")?;
        if let Some(right) = node.right() {
            self.write_summary(f, right)?;
        }
        write!(f, ")")
    }

    fn write_summary(&self, f: &mut fmt::Formatter<'_>, node: &Node<N>) -> fmt::Result {
        if !node.is_leaf() {
            return write!(f, "{}", node.value);
        }
        for (i, &item) in node.items.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}", self.points[item as usize])?;
        }
        Ok(())
    }
}

/// One line per node, in pre-order.
impl<N: IndexableNum, T: fmt::Display> fmt::Display for KDTree<N, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stack = vec![self.root()];
        while let Some(node) = stack.pop() {
            self.write_node(f, node)?;
            writeln!(f)?;
            stack.extend(node.right());
            stack.extend(node.left());
        }
        Ok(())
    }
}
