use crate::error::Result;
use crate::kdtree::index::{KDTree, Node};
use crate::point::Point;
use crate::r#trait::SpatialIndex;
use crate::r#type::IndexableNum;
use crate::region::Region;
use crate::traversal::{leaves, TreeNode};
use crate::util::check_dimensions;

impl<N: IndexableNum, T> SpatialIndex<N, T> for KDTree<N, T> {
    fn points(&self) -> &[Point<N, T>] {
        &self.points
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn size(&self) -> usize {
        self.node_count()
    }

    fn range_indices(&self, region: &Region<N>) -> Result<Vec<u32>> {
        check_dimensions(self.dimensions, region.dimensions())?;

        let roots = self.canonical_roots(region);
        let result: Vec<u32> = roots
            .iter()
            .flat_map(|&root| leaves(root))
            .flat_map(|leaf| leaf.items.iter().copied())
            .collect();

        log::trace!(
            "k-d range search over {region} visited {} subtrees, found {} points",
            roots.len(),
            result.len()
        );
        Ok(result)
    }
}

impl<N: IndexableNum, T> KDTree<N, T> {
    /// Search the tree for points within a region.
    ///
    /// ```
    /// use range_index::kdtree::KDTree;
    /// use range_index::{Point, Region};
    ///
    /// let tree = KDTree::try_new(vec![
    ///     Point::new([1., 1.], "a"),
    ///     Point::new([2., 4.], "b"),
    ///     Point::new([3., 1.], "c"),
    /// ])
    /// .unwrap();
    ///
    /// // reversed bounds describe the same region
    /// let found = tree.range(&Region::new([(2., 1.), (4., 1.)])).unwrap();
    /// assert_eq!(found.len(), 2);
    /// ```
    pub fn range(&self, region: &Region<N>) -> Result<Vec<&Point<N, T>>> {
        Ok(self
            .range_indices(region)?
            .into_iter()
            .map(|i| &self.points[i as usize])
            .collect())
    }

    /// Find the points with exactly the given coordinates.
    ///
    /// Returns an empty list if no indexed point has these coordinates.
    pub fn search(&self, coords: &[N]) -> Result<Vec<&Point<N, T>>> {
        check_dimensions(self.dimensions, coords.len())?;

        let mut node = self.root();
        while !node.is_leaf() {
            let child = if coords[node.axis] <= node.value {
                node.left()
            } else {
                node.right()
            };
            match child {
                Some(child) => node = child,
                None => return Ok(vec![]),
            }
        }

        let points: Vec<&Point<N, T>> = node
            .items
            .iter()
            .map(|&i| &self.points[i as usize])
            .collect();
        if points.first().is_some_and(|p| p.coords() == coords) {
            Ok(points)
        } else {
            Ok(vec![])
        }
    }

    /// The roots of the subtrees whose leaves together are exactly the points in `region`.
    ///
    /// Walks down from the root while the whole query lies on one side of the split, then
    /// decomposes both sides of the first node that splits the query.
    pub(crate) fn canonical_roots(&self, region: &Region<N>) -> Vec<&Node<N>> {
        let mut roots = vec![];
        let mut node = self.root();
        let mut cell = self.bounds.clone();

        while let (Some(left), Some(right)) = (node.left(), node.right()) {
            let (low, high) = region.bounds()[node.axis];
            let (left_cell, right_cell) = cell.split(node.axis, node.value);
            if node.value < low {
                node = right;
                cell = right_cell;
            } else if node.value >= high {
                node = left;
                cell = left_cell;
            } else {
                // split node
                collect_subtrees(left, &left_cell, region, self, &mut roots);
                collect_subtrees(right, &right_cell, region, self, &mut roots);
                return roots;
            }
        }

        collect_subtrees(node, &cell, region, self, &mut roots);
        roots
    }
}

/// One-sided descent below a split node.
///
/// A subtree whose cell lies inside the query is taken whole, and a leaf is taken when its
/// point is inside the query.
fn collect_subtrees<'a, N: IndexableNum, T>(
    node: &'a Node<N>,
    cell: &Region<N>,
    region: &Region<N>,
    tree: &KDTree<N, T>,
    roots: &mut Vec<&'a Node<N>>,
) {
    if node.is_leaf() {
        if region.contains_point(&tree.points[node.items[0] as usize]) {
            roots.push(node);
        }
        return;
    }
    if region.contains(cell) {
        roots.push(node);
        return;
    }
    if !region.intersects(cell) {
        return;
    }

    let (left_cell, right_cell) = cell.split(node.axis, node.value);
    if let Some(left) = node.left() {
        collect_subtrees(left, &left_cell, region, tree, roots);
    }
    if let Some(right) = node.right() {
        collect_subtrees(right, &right_cell, region, tree, roots);
    }
}
