use geo_traits::RectTrait;

use crate::error::Result;
use crate::point::Point;
use crate::r#type::IndexableNum;
use crate::region::Region;

/// A trait for searching and accessing data out of either index.
///
/// Both [`KDTree`][crate::kdtree::KDTree] and [`RangeTree`][crate::rangetree::RangeTree]
/// are immutable once built, so any number of readers may query one concurrently.
pub trait SpatialIndex<N: IndexableNum, T> {
    /// The indexed points, in insertion order.
    fn points(&self) -> &[Point<N, T>];

    /// The number of coordinates of every indexed point.
    fn dimensions(&self) -> usize;

    /// The total number of nodes in this index, including any nested sub-indexes.
    fn size(&self) -> usize;

    /// Search the index for points within a region.
    ///
    /// Returns the insertion indices of found items. Fails if `region` does not have the
    /// dimensionality of the index.
    fn range_indices(&self, region: &Region<N>) -> Result<Vec<u32>>;

    /// The number of points in this index.
    fn num_items(&self) -> usize {
        self.points().len()
    }

    /// Search the index for points within a region.
    ///
    /// Returns the identifiers of found items.
    fn range_ids<'a>(&'a self, region: &Region<N>) -> Result<Vec<&'a T>>
    where
        N: 'a,
    {
        let points = self.points();
        Ok(self
            .range_indices(region)?
            .into_iter()
            .map(|i| points[i as usize].id())
            .collect())
    }

    /// Search a two-dimensional index for points within a rectangle.
    ///
    /// Returns the insertion indices of found items.
    fn range_rect(&self, rect: &impl RectTrait<T = N>) -> Result<Vec<u32>> {
        self.range_indices(&Region::from_rect(rect))
    }
}
