//! Axis-aligned hyper-rectangles.

use std::cmp::Ordering;
use std::fmt;

use geo_traits::{CoordTrait, RectTrait};
use tinyvec::TinyVec;

use crate::error::{RangeIndexError, Result};
use crate::point::Point;
use crate::r#type::IndexableNum;
use crate::util::compare;

/// An axis-aligned hyper-rectangle with one inclusive `(min, max)` bound per dimension.
///
/// Bounds are normalised on construction, so a reversed `(high, low)` pair describes the same
/// region as `(low, high)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Region<N: IndexableNum> {
    bounds: TinyVec<[(N, N); 4]>,
}

impl<N: IndexableNum> Region<N> {
    /// Create a region from one `(min, max)` pair per dimension.
    ///
    /// ```
    /// use range_index::Region;
    ///
    /// let region = Region::new([(3, 1), (1, 4)]);
    /// assert_eq!(region.bounds(), &[(1, 3), (1, 4)]);
    /// ```
    pub fn new(bounds: impl IntoIterator<Item = (N, N)>) -> Self {
        let bounds = bounds
            .into_iter()
            .map(|(a, b)| if b < a { (b, a) } else { (a, b) })
            .collect();
        Self { bounds }
    }

    /// The minimum bounding region of a set of points.
    ///
    /// Fails on an empty slice, on points of differing dimensions and on NaN coordinates.
    pub fn from_points<T>(points: &[Point<N, T>]) -> Result<Self> {
        let first = points.first().ok_or(RangeIndexError::EmptyInput)?;
        let mut bounds: TinyVec<[(N, N); 4]> = first.coords().iter().map(|&c| (c, c)).collect();

        for (index, point) in points.iter().enumerate() {
            if point.dimensions() != bounds.len() {
                return Err(RangeIndexError::DimensionMismatch {
                    expected: bounds.len(),
                    found: point.dimensions(),
                });
            }
            if let Some(axis) = point.coords().iter().position(|c| !c.is_ordered()) {
                return Err(RangeIndexError::InvalidCoordinate { index, axis });
            }
            for ((min, max), &c) in bounds.iter_mut().zip(point.coords()) {
                if c < *min {
                    *min = c;
                }
                if c > *max {
                    *max = c;
                }
            }
        }

        Ok(Self { bounds })
    }

    /// Create a two-dimensional region from any rectangle.
    pub fn from_rect(rect: &impl RectTrait<T = N>) -> Self {
        Self::new([
            (rect.min().x(), rect.max().x()),
            (rect.min().y(), rect.max().y()),
        ])
    }

    /// The number of dimensions of this region.
    #[inline]
    pub fn dimensions(&self) -> usize {
        self.bounds.len()
    }

    /// The `(min, max)` bound of every dimension.
    #[inline]
    pub fn bounds(&self) -> &[(N, N)] {
        &self.bounds
    }

    /// The lower bound on `axis`.
    #[inline]
    pub fn min(&self, axis: usize) -> N {
        self.bounds[axis].0
    }

    /// The upper bound on `axis`.
    #[inline]
    pub fn max(&self, axis: usize) -> N {
        self.bounds[axis].1
    }

    /// Returns `true` if every coordinate lies within the corresponding bound, inclusive.
    ///
    /// Coordinates of a different dimensionality are never contained.
    pub fn contains_coords(&self, coords: &[N]) -> bool {
        self.bounds.len() == coords.len()
            && self
                .bounds
                .iter()
                .zip(coords)
                .all(|(&(min, max), &c)| min <= c && c <= max)
    }

    /// Returns `true` if the point lies within this region, inclusive.
    #[inline]
    pub fn contains_point<T>(&self, point: &Point<N, T>) -> bool {
        self.contains_coords(point.coords())
    }

    /// The per-axis intersection of two regions, or `None` if any axis has no overlap.
    ///
    /// Regions that only touch intersect in a region of zero width on that axis. Regions of
    /// different dimensionality have no intersection.
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        if self.dimensions() != other.dimensions() {
            return None;
        }
        let mut bounds = TinyVec::with_capacity(self.dimensions());
        for (&(a_min, a_max), &(b_min, b_max)) in self.bounds.iter().zip(other.bounds.iter()) {
            let min = if b_min > a_min { b_min } else { a_min };
            let max = if b_max < a_max { b_max } else { a_max };
            if max < min {
                return None;
            }
            bounds.push((min, max));
        }
        Some(Self { bounds })
    }

    /// Returns `true` if the two regions share at least one point.
    ///
    /// Regions of different dimensionality never intersect.
    pub fn intersects(&self, other: &Self) -> bool {
        self.dimensions() == other.dimensions()
            && self
                .bounds
                .iter()
                .zip(other.bounds.iter())
                .all(|(&(a_min, a_max), &(b_min, b_max))| a_min <= b_max && b_min <= a_max)
    }

    /// Returns `true` if `inner` lies entirely within this region.
    ///
    /// Equivalent to `self.intersection(inner) == Some(inner)`. A region of different
    /// dimensionality is never contained.
    pub fn contains(&self, inner: &Self) -> bool {
        self.dimensions() == inner.dimensions()
            && self
                .bounds
                .iter()
                .zip(inner.bounds.iter())
                .all(|(&(o_min, o_max), &(i_min, i_max))| o_min <= i_min && i_max <= o_max)
    }

    /// Split this region in two at `value` along `axis`.
    ///
    /// The lower half ends at `value` and the upper half starts at it; `value` is clamped to
    /// the region's bounds on that axis.
    pub fn split(&self, axis: usize, value: N) -> (Self, Self) {
        let (min, max) = self.bounds[axis];
        let value = match (compare(&value, &min), compare(&value, &max)) {
            (Ordering::Less, _) => min,
            (_, Ordering::Greater) => max,
            _ => value,
        };

        let mut lower = self.clone();
        lower.bounds[axis].1 = value;
        let mut upper = self.clone();
        upper.bounds[axis].0 = value;
        (lower, upper)
    }
}

impl<N: IndexableNum> fmt::Display for Region<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, (min, max)) in self.bounds.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "[{min}, {max}]")?;
        }
        write!(f, "]")
    }
}
