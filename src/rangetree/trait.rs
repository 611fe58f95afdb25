use crate::error::Result;
use crate::point::Point;
use crate::rangetree::index::{Level, Node, RangeTree};
use crate::r#trait::SpatialIndex;
use crate::r#type::IndexableNum;
use crate::region::Region;
use crate::traversal::{leaves, TreeNode};
use crate::util::check_dimensions;

impl<N: IndexableNum, T> SpatialIndex<N, T> for RangeTree<N, T> {
    fn points(&self) -> &[Point<N, T>] {
        &self.points
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn size(&self) -> usize {
        self.level.size()
    }

    fn range_indices(&self, region: &Region<N>) -> Result<Vec<u32>> {
        check_dimensions(self.dimensions, region.dimensions())?;

        let mut result = vec![];
        self.level.range(region, &mut result);
        log::trace!(
            "range tree search over {region} found {} points",
            result.len()
        );
        Ok(result)
    }
}

impl<N: IndexableNum, T> RangeTree<N, T> {
    /// Search the tree for points within a region.
    ///
    /// Returns the identifiers of every point inside the region, including each id of
    /// coincident points.
    pub fn range(&self, region: &Region<N>) -> Result<Vec<&T>> {
        self.range_ids(region)
    }

    /// Find the identifiers of the points with exactly the given coordinates.
    ///
    /// Returns an empty list if no indexed point has these coordinates.
    pub fn search(&self, coords: &[N]) -> Result<Vec<&T>> {
        check_dimensions(self.dimensions, coords.len())?;

        let mut level = &self.level;
        loop {
            let value = coords[level.axis];
            let mut node = level.root.as_ref();
            while !node.is_leaf() {
                let child = if value <= node.value {
                    node.left()
                } else {
                    node.right()
                };
                match child {
                    Some(child) => node = child,
                    None => return Ok(vec![]),
                }
            }
            if node.value != value {
                return Ok(vec![]);
            }

            match &node.associated {
                Some(associated) => level = associated.as_ref(),
                None => {
                    return Ok(node
                        .items
                        .iter()
                        .map(|&i| self.points[i as usize].id())
                        .collect())
                }
            }
        }
    }
}

impl<N: IndexableNum> Level<N> {
    /// Collect the insertion indices of every point in `region`.
    ///
    /// Only this level's axis is checked here; the remaining axes are narrowed by the
    /// associated levels of the canonical subtrees.
    pub(crate) fn range(&self, region: &Region<N>, result: &mut Vec<u32>) {
        let (low, high) = region.bounds()[self.axis];
        let Some(split) = self.find_split_node(low, high) else {
            return;
        };

        let mut subtrees = vec![];
        if split.is_leaf() {
            subtrees.push(split);
        } else {
            if let Some(left) = split.left() {
                split_search(left, low, high, false, &mut subtrees);
            }
            if let Some(right) = split.right() {
                split_search(right, low, high, true, &mut subtrees);
            }
        }

        for subtree in subtrees {
            match &subtree.associated {
                Some(associated) => associated.range(region, result),
                None => {
                    result.extend(leaves(subtree).flat_map(|leaf| leaf.items.iter().copied()))
                }
            }
        }
    }

    /// The first node below the root whose value lies within `[low, high]`.
    ///
    /// Returns `None` when the range falls between two leaves or outside the level.
    pub(crate) fn find_split_node(&self, low: N, high: N) -> Option<&Node<N>> {
        let mut node = self.root.as_ref();
        loop {
            if node.within(low, high) {
                return Some(node);
            }
            node = if node.value < low {
                node.right()?
            } else {
                node.left()?
            };
        }
    }
}

/// Canonical decomposition of `[low, high]` on one side of the split node.
///
/// Walks down from `node`: whenever the value of the current node is within the range, the
/// far child is in range as a whole and the walk continues into the near child; otherwise
/// the walk moves toward the range. The near child is the left one, unless `mirrored`.
pub(crate) fn split_search<'a, N: IndexableNum>(
    node: &'a Node<N>,
    low: N,
    high: N,
    mirrored: bool,
    subtrees: &mut Vec<&'a Node<N>>,
) {
    let mut node = node;
    loop {
        let (near, far) = if mirrored {
            (node.right(), node.left())
        } else {
            (node.left(), node.right())
        };
        let within = node.within(low, high);

        match (far, near) {
            (Some(far), Some(near)) if within => {
                subtrees.push(far);
                node = near;
            }
            (Some(far), None) if within => {
                subtrees.push(far);
                return;
            }
            (Some(far), _) => node = far,
            (None, Some(near)) if within => node = near,
            (None, None) if within => {
                subtrees.push(node);
                return;
            }
            (None, _) => return,
        }
    }
}
