//! An implementation of an immutable, multi-level range tree.
//!
//! A range tree over `d` dimensions answers a range query in `O(log^d n + k)` time for `k`
//! results, at the cost of `O(n log^(d-1) n)` nodes: every node of the first `d - 1` levels
//! carries a full tree over the next axis.

#![warn(missing_docs)]

mod builder;
mod index;
mod r#trait;

pub use builder::RangeTreeBuilder;
pub use index::RangeTree;
