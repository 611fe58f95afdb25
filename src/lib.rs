//! Immutable indexes for orthogonal range queries over static sets of points in any number
//! of dimensions.
//!
//! Two indexes are provided, both built once from a list of [`Point`]s and queried with a
//! [`Region`], an axis-aligned box with one closed interval per axis:
//!
//! - [`KDTree`][kdtree::KDTree]: a balanced k-d tree with `2n - 1` nodes. Queries visit
//!   `O(n^(1 - 1/d) + k)` nodes.
//! - [`RangeTree`][rangetree::RangeTree]: a multi-level range tree with
//!   `O(n log^(d-1) n)` nodes, answering queries in `O(log^d n + k)`.
//!
//! ```
//! use range_index::kdtree::KDTree;
//! use range_index::rangetree::RangeTree;
//! use range_index::{Point, Region, SpatialIndex};
//!
//! let points = vec![
//!     Point::new([1, 1], 'a'),
//!     Point::new([2, 4], 'b'),
//!     Point::new([3, 1], 'c'),
//!     Point::new([4, 3], 'd'),
//! ];
//! let region = Region::new([(1, 3), (1, 4)]);
//!
//! let kdtree = KDTree::try_new(points.clone()).unwrap();
//! let mut ids = kdtree.range_ids(&region).unwrap();
//! ids.sort();
//! assert_eq!(ids, vec![&'a', &'b', &'c']);
//!
//! let rangetree = RangeTree::try_new(points).unwrap();
//! let mut ids = rangetree.range(&region).unwrap();
//! ids.sort();
//! assert_eq!(ids, vec![&'a', &'b', &'c']);
//! ```
//!
//! ## Features
//!
//! - `rayon`: build the associated levels of a [`RangeTree`][rangetree::RangeTree] in
//!   parallel.

mod error;
pub mod kdtree;
mod point;
pub mod rangetree;
mod region;
mod r#trait;
mod traversal;
mod r#type;
mod util;

pub use error::{RangeIndexError, Result};
pub use point::{merge_coincident, Point};
pub use r#trait::SpatialIndex;
pub use r#type::IndexableNum;
pub use region::Region;

#[cfg(test)]
pub(crate) mod test;
