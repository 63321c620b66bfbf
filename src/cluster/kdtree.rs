//! K-D tree over the points of a single trajectory
//!
//! Used for the exact nearest-neighbour step of the Hausdorff distance when a
//! trajectory is too long for a linear scan to be cheap.

use super::point::Point;
use std::cmp::Ordering;

/// KD-Tree implementation for exact nearest-neighbour queries
///
/// Points are separated from nodes. Nodes hold only indices into the Points slice.
pub struct KDTree<'a> {
    /// All points in the tree
    points: &'a [Point],
    /// Root node of the tree
    root: Option<Box<KDTreeNode>>,
}

/// A node in the K-D tree
struct KDTreeNode {
    /// Index of the point associated with this node
    point_id: usize,

    split: usize,
    left: Option<Box<KDTreeNode>>,
    right: Option<Box<KDTreeNode>>,
}

impl KDTree<'_> {
    /// Finds the point closest to `pt`
    ///
    /// Returns `(index, distance)` of the nearest point, or `None`
    /// when the tree is empty. The result is exact, not approximate.
    pub fn nearest(&self, pt: &Point) -> Option<(usize, f64)> {
        let root = self.root.as_deref()?;
        let mut best = (root.point_id, f64::INFINITY);
        self.nearest_recursive(Some(root), pt, &mut best);
        Some(best)
    }

    fn nearest_recursive(&self, t: Option<&KDTreeNode>, pt: &Point, best: &mut (usize, f64)) {
        let t = match t {
            None => return,
            Some(t) => t,
        };

        let node_pt = &self.points[t.point_id];
        let d = node_pt.dist(pt);
        if d < best.1 {
            *best = (t.point_id, d);
        }

        let diff = pt.0[t.split] - node_pt.0[t.split];

        let (this_side, other_side) = if diff < 0.0 {
            (t.left.as_deref(), t.right.as_deref())
        } else {
            (t.right.as_deref(), t.left.as_deref())
        };

        self.nearest_recursive(this_side, pt, best);
        // Points across the splitting line are at least |diff| away
        if diff.abs() < best.1 {
            self.nearest_recursive(other_side, pt, best);
        }
    }

    /// Returns the height of the K-D tree
    #[cfg(test)]
    pub fn height(&self) -> usize {
        self.root.as_ref().map_or(0, |r| r.height())
    }
}

#[cfg(test)]
impl KDTreeNode {
    fn height(&self) -> usize {
        let ht = self.left.as_ref().map_or(0, |l| l.height());
        let rht = self.right.as_ref().map_or(0, |r| r.height());
        ht.max(rht) + 1
    }
}

/// Creates a new K-D tree built from the given points
pub fn new_kd_tree(points: &[Point]) -> KDTree<'_> {
    let mut ids: Vec<usize> = (0..points.len()).collect();
    let root = build_tree(points, &mut ids, 0);
    KDTree { points, root }
}

/// Builds a tree node by finding the median point on the split dimension and
/// recursively building left and right subtrees
///
/// After partitioning, every id left of the median has a coordinate `<=` the
/// pivot and every id right of it has a coordinate `>=` the pivot.
fn build_tree(points: &[Point], ids: &mut [usize], depth: usize) -> Option<Box<KDTreeNode>> {
    if ids.is_empty() {
        return None;
    }

    let split = depth % 2;
    let m = ids.len() / 2;
    ids.select_nth_unstable_by(m, |&a, &b| {
        points[a].0[split]
            .partial_cmp(&points[b].0[split])
            .unwrap_or(Ordering::Equal)
    });

    let point_id = ids[m];
    let (left, rest) = ids.split_at_mut(m);
    let right = &mut rest[1..];

    Some(Box::new(KDTreeNode {
        point_id,
        split,
        left: build_tree(points, left, depth + 1),
        right: build_tree(points, right, depth + 1),
    }))
}
