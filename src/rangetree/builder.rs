use crate::error::{RangeIndexError, Result};
use crate::point::Point;
use crate::rangetree::index::{Level, Node, RangeTree};
use crate::r#type::IndexableNum;
use crate::util::{flatten_coords, lower_median, validate_points, FlatCoords};

/// A builder to create a [`RangeTree`].
///
/// ```
/// use range_index::rangetree::RangeTreeBuilder;
/// use range_index::{Point, Region};
///
/// let mut builder = RangeTreeBuilder::new(3);
/// builder.add(Point::new([1, 4, 2], 'a'));
/// builder.add(Point::new([3, 6, 2], 'b'));
/// builder.add(Point::new([4, 2, 2], 'c'));
/// builder.add(Point::new([2, 9, 8], 'd'));
/// builder.add(Point::new([5, 8, 4], 'e'));
/// let tree = builder.finish().unwrap();
///
/// let mut ids = tree.range(&Region::new([(3, 7), (2, 9), (0, 5)])).unwrap();
/// ids.sort();
/// assert_eq!(ids, vec![&'b', &'c', &'e']);
/// ```
#[derive(Debug, Clone)]
pub struct RangeTreeBuilder<N: IndexableNum, T> {
    dimensions: usize,
    points: Vec<Point<N, T>>,
}

impl<N: IndexableNum, T> RangeTreeBuilder<N, T> {
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

    /// Consume this builder, building every level and generating a RangeTree ready for
    /// queries.
    ///
    /// With the `rayon` feature, associated levels and sibling subtrees are built in
    /// parallel.
    pub fn finish(self) -> Result<RangeTree<N, T>> {
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
        let level = build_level(coords, indices, 0);

        let tree = RangeTree {
            points: self.points,
            level,
            dimensions,
        };
        log::debug!(
            "Built range tree over {} points in {} dimensions ({} nodes, depth {})",
            tree.points.len(),
            dimensions,
            tree.level.size(),
            tree.depth()
        );
        Ok(tree)
    }
}

impl<N: IndexableNum, T> RangeTree<N, T> {
    /// Build a tree over `points`, inferring the dimensionality from the first point.
    pub fn try_new(points: Vec<Point<N, T>>) -> Result<Self> {
        let dimensions = points
            .first()
            .ok_or(RangeIndexError::EmptyInput)?
            .dimensions();
        RangeTreeBuilder { dimensions, points }.finish()
    }
}

fn build_level<N: IndexableNum>(coords: FlatCoords<'_, N>, indices: Vec<u32>, axis: usize) -> Level<N> {
    Level {
        axis,
        root: Box::new(build_node(coords, indices, axis)),
    }
}

/// Build the subtree of one level over a non-empty subset of points.
///
/// Splits at the lower median of the distinct values on `axis`, equal values going left,
/// until a single value remains.
fn build_node<N: IndexableNum>(coords: FlatCoords<'_, N>, indices: Vec<u32>, axis: usize) -> Node<N> {
    debug_assert!(!indices.is_empty());
    let is_terminal = axis + 1 == coords.dimensions();
    let distinct = coords.sorted_distinct(&indices, axis);
    let value = lower_median(&distinct);

    if distinct.len() == 1 {
        let (associated, items) = if is_terminal {
            (None, indices)
        } else {
            let level = build_level(coords, indices, axis + 1);
            (Some(Box::new(level)), vec![])
        };
        return Node {
            value,
            left: None,
            right: None,
            associated,
            items,
        };
    }

    let associated_indices = (!is_terminal).then(|| indices.clone());
    let (left, right) = coords.partition(indices, axis, value);
    let (associated, (left, right)) = join(
        || associated_indices.map(|indices| Box::new(build_level(coords, indices, axis + 1))),
        || {
            join(
                || build_node(coords, left, axis),
                || build_node(coords, right, axis),
            )
        },
    );

    Node {
        value,
        left: Some(Box::new(left)),
        right: Some(Box::new(right)),
        associated,
        items: vec![],
    }
}

#[cfg(feature = "rayon")]
#[inline]
fn join<A, B, RA, RB>(a: A, b: B) -> (RA, RB)
where
    A: FnOnce() -> RA + Send,
    B: FnOnce() -> RB + Send,
    RA: Send,
    RB: Send,
{
    rayon::join(a, b)
}

#[cfg(not(feature = "rayon"))]
#[inline]
fn join<A, B, RA, RB>(a: A, b: B) -> (RA, RB)
where
    A: FnOnce() -> RA,
    B: FnOnce() -> RB,
{
    (a(), b())
}
