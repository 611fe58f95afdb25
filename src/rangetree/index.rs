use std::fmt;

use crate::point::Point;
use crate::r#type::IndexableNum;
use crate::traversal::{subtree_depth, subtree_size, TreeNode};

/// An immutable, multi-level range tree over a set of points.
///
/// The first level is a balanced binary tree over the first coordinate. Every node of a
/// level that is not the last owns an associated level built from the same points over the
/// next coordinate, so a query narrows one axis per level.
///
/// Usually this will be created from scratch via
/// [`RangeTreeBuilder`][crate::rangetree::RangeTreeBuilder] or [`RangeTree::try_new`].
///
/// The tree is never mutated after construction, so it is `Send` and `Sync` whenever the
/// point identifiers are, and can be queried from many threads without locking.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeTree<N: IndexableNum, T> {
    pub(crate) points: Vec<Point<N, T>>,
    pub(crate) level: Level<N>,
    pub(crate) dimensions: usize,
}

impl<N: IndexableNum, T> RangeTree<N, T> {
    /// The number of nodes on the longest root-to-leaf path of the first level.
    pub fn depth(&self) -> usize {
        subtree_depth(self.level.root.as_ref())
    }

    /// Consume the tree, returning the indexed points in insertion order.
    pub fn into_points(self) -> Vec<Point<N, T>> {
        self.points
    }
}

/// A balanced binary tree over a single axis.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Level<N: IndexableNum> {
    pub(crate) axis: usize,
    pub(crate) root: Box<Node<N>>,
}

impl<N: IndexableNum> Level<N> {
    /// Every node of this level and of all levels below it.
    pub(crate) fn size(&self) -> usize {
        subtree_size(self.root.as_ref())
    }
}

/// A node in one level of the RangeTree.
///
/// Values `<= value` on the level's axis are on the left, values `> value` on the right. A
/// leaf stands for exactly one value; on the last axis it holds the insertion indices of every
/// point with that coordinate tuple.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Node<N: IndexableNum> {
    pub(crate) value: N,
    pub(crate) left: Option<Box<Node<N>>>,
    pub(crate) right: Option<Box<Node<N>>>,
    pub(crate) associated: Option<Box<Level<N>>>,
    pub(crate) items: Vec<u32>,
}

impl<N: IndexableNum> Node<N> {
    /// Returns `true` if the value of this node lies within `[low, high]`.
    #[inline]
    pub(crate) fn within(&self, low: N, high: N) -> bool {
        low <= self.value && self.value <= high
    }
}

impl<N: IndexableNum> TreeNode for Node<N> {
    fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }

    fn weight(&self) -> usize {
        1 + self.associated.as_ref().map_or(0, |level| level.size())
    }
}

impl<N: IndexableNum, T: fmt::Display> RangeTree<N, T> {
    fn write_level(&self, f: &mut fmt::Formatter<'_>, level: &Level<N>) -> fmt::Result {
        let indent = level.axis * 2;
        let mut stack = vec![level.root.as_ref()];
        while let Some(node) = stack.pop() {
            write!(f, "{:indent$}", "")?;
            if node.is_leaf() {
                self.write_summary(f, node)?;
            } else {
                write!(f, "axis {}: ({}) -> left: (", level.axis, node.value)?;
                if let Some(left) = node.left() {
                    self.write_summary(f, left)?;
                }
                write!(f, "), right: (")?;
                if let Some(right) = node.right() {
                    self.write_summary(f, right)?;
                }
                write!(f, ")")?;
            }
            writeln!(f)?;

            if let Some(associated) = &node.associated {
                self.write_level(f, associated)?;
            }
            stack.extend(node.right());
            stack.extend(node.left());
        }
        Ok(())
    }

    fn write_summary(&self, f: &mut fmt::Formatter<'_>, node: &Node<N>) -> fmt::Result {
        if node.items.is_empty() {
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

/// One line per node in pre-order, each node followed by its associated level indented by
/// the level's axis.
impl<N: IndexableNum, T: fmt::Display> fmt::Display for RangeTree<N, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_level(f, &self.level)
    }
}
