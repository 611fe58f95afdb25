use crate::error::{RangeIndexError, Result};
use crate::kdtree::index::{KDTree, Node};
use crate::point::Point;
use crate::r#type::IndexableNum;
use crate::region::Region;
use crate::util::{flatten_coords, lower_median, validate_points, FlatCoords};

/// A builder to create a [`KDTree`].
///
/// ```
/// use range_index::kdtree::KDTreeBuilder;
/// use range_index::{Point, Region};
///
/// let mut builder = KDTreeBuilder::new(2);
/// builder.add(Point::new([1, 1], 'a'));
/// builder.add(Point::new([2, 4], 'b'));
/// builder.add(Point::new([3, 1], 'c'));
/// builder.add(Point::new([4, 3], 'd'));
/// let tree = builder.finish().unwrap();
///
/// let found = tree.range(&Region::new([(1, 3), (1, 4)])).unwrap();
/// let mut ids: Vec<char> = found.iter().map(|p| *p.id()).collect();
/// ids.sort();
/// assert_eq!(ids, vec!['a', 'b', 'c']);
/// ```
#[derive(Debug, Clone)]
pub struct KDTreeBuilder<N: IndexableNum, T> {
    dimensions: usize,
    points: Vec<Point<N, T>>,
}

impl<N: IndexableNum, T> KDTreeBuilder<N, T> {
    /// Create a new builder for points with the provided number of dimensions.
    pub fn new(dimensions: usize) -> Self {
        Self::with_capacity(dimensions, 0)
    }

    /// Create a new builder, reserving room for `num_items` points.
    pub fn with_capacity(dimensions: usize, num_items: usize) -> Self {
        Self {
            dimensions,
            points: Vec::with_capacity(num_items),
        }
    }

    /// The number of dimensions every added point must have.
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Add a point to the index.
    ///
    /// This returns the insertion index, which provides a lookup back into
    /// [`points`][crate::SpatialIndex::points] of the finished tree. Points are validated in
    /// [`finish`][Self::finish].
    #[inline]
    pub fn add(&mut self, point: Point<N, T>) -> u32 {
        let index = self.points.len() as u32;
        self.points.push(point);
        index
    }

    /// Consume this builder, performing the k-d partitioning and generating a KDTree ready
    /// for queries.
    pub fn finish(self) -> Result<KDTree<N, T>> {
        let dimensions = validate_points(&self.points)?;
        if dimensions != self.dimensions {
            return Err(RangeIndexError::DimensionMismatch {
                expected: self.dimensions,
                found: dimensions,
            });
        }

        let buffer = flatten_coords(&self.points);
        let coords = FlatCoords::new(&buffer, dimensions);
        let indices = (0..self.points.len() as u32).collect();
        let root = build_subtree(coords, indices, 0);
        let bounds = Region::from_points(&self.points)?;

        let tree = KDTree {
            points: self.points,
            root: Box::new(root),
            dimensions,
            bounds,
        };
        log::debug!(
            "Built k-d tree over {} points in {} dimensions ({} nodes, depth {})",
            tree.points.len(),
            dimensions,
            tree.node_count(),
            tree.depth()
        );
        Ok(tree)
    }
}

impl<N: IndexableNum, T> KDTree<N, T> {
    /// Build a tree over `points`, inferring the dimensionality from the first point.
    pub fn try_new(points: Vec<Point<N, T>>) -> Result<Self> {
        let dimensions = points
            .first()
            .ok_or(RangeIndexError::EmptyInput)?
            .dimensions();
        KDTreeBuilder { dimensions, points }.finish()
    }
}

/// Build the subtree over a non-empty subset of points.
///
/// The split axis cycles with `depth`. When every point of the subset has the same value on
/// that axis, the next axis that still separates them is used instead; a subset that no axis
/// separates is a set of coincident points and becomes a single leaf.
fn build_subtree<N: IndexableNum>(coords: FlatCoords<'_, N>, indices: Vec<u32>, depth: usize) -> Node<N> {
    debug_assert!(!indices.is_empty());
    let dimensions = coords.dimensions();

    for offset in 0..dimensions {
        let axis = (depth + offset) % dimensions;
        let distinct = coords.sorted_distinct(&indices, axis);
        if distinct.len() < 2 {
            continue;
        }

        let value = lower_median(&distinct);
        let (left, right) = coords.partition(indices, axis, value);
        let next = depth + offset + 1;
        return Node::split(
            axis,
            value,
            build_subtree(coords, left, next),
            build_subtree(coords, right, next),
        );
    }

    Node::leaf(indices)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::traversal::TreeNode;

    #[test]
    fn single_point_is_a_leaf() {
        let tree = KDTree::try_new(vec![Point::new([5., 7.], ())]).unwrap();
        assert!(tree.root().is_leaf());
        assert_eq!(tree.root(), &Node::leaf(vec![0]));
        assert_eq!(tree.node_count(), 1);
    }

    #[test]
    fn splits_on_lower_median() {
        let tree = KDTree::try_new(vec![
            Point::new([1, 1], 'a'),
            Point::new([2, 4], 'b'),
            Point::new([3, 1], 'c'),
            Point::new([4, 3], 'd'),
        ])
        .unwrap();

        let root = tree.root();
        assert_eq!(root.axis, 0);
        assert_eq!(root.value, 2);

        // {a, b} split on y, {c, d} split on y
        let left = root.left().unwrap();
        assert_eq!(left.axis, 1);
        assert_eq!(left.value, 1);
        let right = root.right().unwrap();
        assert_eq!(right.axis, 1);
        assert_eq!(right.value, 1);
        assert_eq!(right.left().unwrap().items, vec![2]);
        assert_eq!(right.right().unwrap().items, vec![3]);
    }

    #[test]
    fn skips_axes_that_do_not_separate() {
        // all share x, so the root must split on y
        let tree = KDTree::try_new(vec![
            Point::new([0, 3], 0),
            Point::new([0, 1], 1),
            Point::new([0, 2], 2),
        ])
        .unwrap();
        assert_eq!(tree.root().axis, 1);
        assert_eq!(tree.root().value, 2);
        assert_eq!(tree.node_count(), 5);
    }

    #[test]
    fn coincident_points_share_a_leaf() {
        let tree = KDTree::try_new(vec![
            Point::new([1, 1], 'a'),
            Point::new([1, 1], 'b'),
            Point::new([2, 2], 'c'),
        ])
        .unwrap();
        assert_eq!(tree.node_count(), 3);
        assert_eq!(tree.root().left().unwrap().items, vec![0, 1]);
    }

    #[test]
    fn builder_checks_dimensions() {
        let mut builder = KDTreeBuilder::new(3);
        assert_eq!(builder.add(Point::new([1., 2.], ())), 0);
        assert_eq!(builder.add(Point::new([3., 4.], ())), 1);
        assert_eq!(
            builder.finish(),
            Err(RangeIndexError::DimensionMismatch {
                expected: 3,
                found: 2
            })
        );

        let empty: KDTreeBuilder<f64, ()> = KDTreeBuilder::new(2);
        assert_eq!(empty.finish(), Err(RangeIndexError::EmptyInput));
    }
}
