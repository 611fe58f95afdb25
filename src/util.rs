//! Helpers shared by the k-d tree and range tree builders.

use std::cmp::Ordering;

use crate::error::{RangeIndexError, Result};
use crate::point::Point;
use crate::r#type::IndexableNum;

/// Order two coordinate values.
///
/// Builders reject NaN up front, so the fallback is never hit on indexed data.
#[inline]
pub(crate) fn compare<N: IndexableNum>(a: &N, b: &N) -> Ordering {
    a.partial_cmp(b).unwrap_or(Ordering::Equal)
}

/// Check that `points` can be indexed and return their shared dimensionality.
pub(crate) fn validate_points<N: IndexableNum, T>(points: &[Point<N, T>]) -> Result<usize> {
    let first = points.first().ok_or(RangeIndexError::EmptyInput)?;
    if u32::try_from(points.len()).is_err() {
        return Err(RangeIndexError::General(format!(
            "Cannot index {} points, at most {} are supported.",
            points.len(),
            u32::MAX
        )));
    }

    let dimensions = first.dimensions();
    if dimensions == 0 {
        return Err(RangeIndexError::DimensionMismatch {
            expected: 1,
            found: 0,
        });
    }

    for (index, point) in points.iter().enumerate() {
        if point.dimensions() != dimensions {
            return Err(RangeIndexError::DimensionMismatch {
                expected: dimensions,
                found: point.dimensions(),
            });
        }
        if let Some(axis) = point.coords().iter().position(|c| !c.is_ordered()) {
            log::warn!("Rejecting point {index} with an unordered coordinate on axis {axis}");
            return Err(RangeIndexError::InvalidCoordinate { index, axis });
        }
    }

    Ok(dimensions)
}

/// Check that a query has the dimensionality of the index it is run against.
#[inline]
pub(crate) fn check_dimensions(expected: usize, found: usize) -> Result<()> {
    if expected != found {
        return Err(RangeIndexError::DimensionMismatch { expected, found });
    }
    Ok(())
}

/// Interleaved coordinates of every point, addressed by insertion index.
///
/// Builders work on this view rather than on the points themselves, so construction never
/// needs to share the caller's ids across threads.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FlatCoords<'a, N: IndexableNum> {
    coords: &'a [N],
    dimensions: usize,
}

impl<'a, N: IndexableNum> FlatCoords<'a, N> {
    pub(crate) fn new(coords: &'a [N], dimensions: usize) -> Self {
        debug_assert_eq!(coords.len() % dimensions, 0);
        Self { coords, dimensions }
    }

    #[inline]
    pub(crate) fn dimensions(&self) -> usize {
        self.dimensions
    }

    #[inline]
    pub(crate) fn get(&self, index: u32, axis: usize) -> N {
        self.coords[index as usize * self.dimensions + axis]
    }

    /// The sorted, deduplicated values of `axis` over the given subset of points.
    pub(crate) fn sorted_distinct(&self, indices: &[u32], axis: usize) -> Vec<N> {
        let mut values: Vec<N> = indices.iter().map(|&i| self.get(i, axis)).collect();
        values.sort_by(compare);
        values.dedup_by(|a, b| compare(a, b) == Ordering::Equal);
        values
    }

    /// Partition a subset into the points `<= split` and the points `> split` on `axis`.
    ///
    /// Relative order is kept on both sides.
    pub(crate) fn partition(&self, indices: Vec<u32>, axis: usize, split: N) -> (Vec<u32>, Vec<u32>) {
        indices
            .into_iter()
            .partition(|&i| self.get(i, axis) <= split)
    }
}

/// Copy the coordinates of every point into one interleaved buffer.
pub(crate) fn flatten_coords<N: IndexableNum, T>(points: &[Point<N, T>]) -> Vec<N> {
    points
        .iter()
        .flat_map(|p| p.coords().iter().copied())
        .collect()
}

/// The lower median of a sorted, non-empty slice of distinct values.
#[inline]
pub(crate) fn lower_median<N: IndexableNum>(distinct: &[N]) -> N {
    debug_assert!(!distinct.is_empty());
    distinct[(distinct.len() - 1) / 2]
}

#[cfg(test)]
mod test {
    use super::*;

    fn points() -> Vec<Point<f64, char>> {
        vec![
            Point::new([3., 1.], 'a'),
            Point::new([1., 2.], 'b'),
            Point::new([3., 5.], 'c'),
            Point::new([2., 2.], 'd'),
        ]
    }

    #[test]
    fn distinct_values_are_sorted() {
        let buffer = flatten_coords(&points());
        let coords = FlatCoords::new(&buffer, 2);
        assert_eq!(coords.get(2, 1), 5.);

        let values = coords.sorted_distinct(&[0, 1, 2, 3], 0);
        assert_eq!(values, vec![1., 2., 3.]);
        assert_eq!(lower_median(&values), 2.);

        let values = coords.sorted_distinct(&[0, 2], 0);
        assert_eq!(values, vec![3.]);
        assert_eq!(lower_median(&values), 3.);
    }

    #[test]
    fn lower_median_of_even_count() {
        assert_eq!(lower_median(&[1, 2, 3, 4]), 2);
        assert_eq!(lower_median(&[1, 2]), 1);
    }

    #[test]
    fn equal_values_partition_left() {
        let buffer = flatten_coords(&points());
        let coords = FlatCoords::new(&buffer, 2);
        let (left, right) = coords.partition(vec![0, 1, 2, 3], 0, 2.);
        assert_eq!(left, vec![1, 3]);
        assert_eq!(right, vec![0, 2]);
    }

    #[test]
    fn rejects_bad_input() {
        let empty: Vec<Point<f64, char>> = vec![];
        assert_eq!(validate_points(&empty), Err(RangeIndexError::EmptyInput));

        let mixed = vec![Point::new([1., 2.], 'a'), Point::new([1., 2., 3.], 'b')];
        assert_eq!(
            validate_points(&mixed),
            Err(RangeIndexError::DimensionMismatch {
                expected: 2,
                found: 3
            })
        );

        let nan = vec![Point::new([1., 2.], 'a'), Point::new([1., f64::NAN], 'b')];
        assert_eq!(
            validate_points(&nan),
            Err(RangeIndexError::InvalidCoordinate { index: 1, axis: 1 })
        );

        assert_eq!(validate_points(&points()), Ok(2));
        assert!(check_dimensions(2, 2).is_ok());
        assert!(check_dimensions(2, 3).is_err());
    }
}
