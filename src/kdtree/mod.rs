//! An implementation of an immutable, balanced k-d tree.
//!
//! Points live only in the leaves; each internal node splits its subset at the lower median
//! of the distinct values on its axis, with equal values going left. For `n` points with
//! distinct coordinates the tree has exactly `2n - 1` nodes.

#![warn(missing_docs)]

mod builder;
mod index;
mod r#trait;

pub use builder::KDTreeBuilder;
pub use index::KDTree;
