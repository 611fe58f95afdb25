//! Points with opaque identifiers.

use std::cmp::Ordering;
use std::fmt;

use tinyvec::TinyVec;

use crate::r#type::IndexableNum;
use crate::util::compare;

/// Coordinates are stored inline up to this many dimensions.
pub(crate) type Coords<N> = TinyVec<[N; 4]>;

/// An immutable point: a fixed-length coordinate vector plus an opaque identifier.
///
/// The identifier is never inspected by the indexes; it is handed back from queries.
#[derive(Debug, Clone, PartialEq)]
pub struct Point<N: IndexableNum, T> {
    coords: Coords<N>,
    id: T,
}

impl<N: IndexableNum, T> Point<N, T> {
    /// Create a new point from its coordinates and identifier.
    pub fn new(coords: impl IntoIterator<Item = N>, id: T) -> Self {
        Self {
            coords: coords.into_iter().collect(),
            id,
        }
    }

    /// The coordinates of this point, one per axis.
    #[inline]
    pub fn coords(&self) -> &[N] {
        &self.coords
    }

    /// The coordinate on `axis`.
    ///
    /// Panics if `axis >= self.dimensions()`.
    #[inline]
    pub fn coord(&self, axis: usize) -> N {
        self.coords[axis]
    }

    /// The number of coordinates.
    #[inline]
    pub fn dimensions(&self) -> usize {
        self.coords.len()
    }

    /// The identifier of this point.
    #[inline]
    pub fn id(&self) -> &T {
        &self.id
    }

    /// Consume the point, returning its identifier.
    pub fn into_id(self) -> T {
        self.id
    }

    /// Returns `true` if both points have the same coordinate tuple.
    pub fn coincides_with<U>(&self, other: &Point<N, U>) -> bool {
        self.coords.len() == other.coords.len()
            && self
                .coords
                .iter()
                .zip(other.coords.iter())
                .all(|(a, b)| compare(a, b) == Ordering::Equal)
    }
}

impl<N: IndexableNum, T: fmt::Display> fmt::Display for Point<N, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = [", self.id)?;
        for (i, c) in self.coords.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{c}")?;
        }
        write!(f, "]")
    }
}

/// Merge points that share a coordinate tuple into one point carrying all of their ids.
///
/// Groups appear in the order of their first member, and ids within a group keep their
/// input order.
///
/// ```
/// use range_index::{merge_coincident, Point};
///
/// let merged = merge_coincident(vec![
///     Point::new([1, 1], "a"),
///     Point::new([2, 4], "b"),
///     Point::new([1, 1], "c"),
/// ]);
/// assert_eq!(merged.len(), 2);
/// assert_eq!(merged[0].id(), &vec!["a", "c"]);
/// assert_eq!(merged[1].id(), &vec!["b"]);
/// ```
pub fn merge_coincident<N: IndexableNum, T>(points: Vec<Point<N, T>>) -> Vec<Point<N, Vec<T>>> {
    let mut order: Vec<usize> = (0..points.len()).collect();
    // stable, so ids of one group stay in input order
    order.sort_by(|&a, &b| lexicographic(points[a].coords(), points[b].coords()));

    let mut slots: Vec<Option<Point<N, T>>> = points.into_iter().map(Some).collect();
    let mut groups: Vec<(usize, Point<N, Vec<T>>)> = vec![];
    for i in order {
        let Some(point) = slots[i].take() else {
            continue;
        };
        match groups.last_mut() {
            Some((_, group)) if group.coincides_with(&point) => group.id.push(point.id),
            _ => groups.push((
                i,
                Point {
                    coords: point.coords,
                    id: vec![point.id],
                },
            )),
        }
    }

    groups.sort_by_key(|(first, _)| *first);
    groups.into_iter().map(|(_, group)| group).collect()
}

fn lexicographic<N: IndexableNum>(a: &[N], b: &[N]) -> Ordering {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| compare(x, y))
        .find(|o| o.is_ne())
        .unwrap_or_else(|| a.len().cmp(&b.len()))
}
