//! Arena-based k-d tree for nearest-neighbor and proximity queries.
//!
//! Nodes are stored contiguously in a `Vec` and reference their children by
//! index, so the whole tree is one allocation that is cloned, moved and
//! dropped as a unit. The tree is built once from a snapshot of points and is
//! read-only afterward; if the points change, build a new tree.
//!
//! # Determinism
//!
//! Every comparison the tree makes falls back to a fixed total order
//! (coordinate along the split dimension, then the lexicographic order of the
//! whole point, then the point's index in the input slice). Two builds from the
//! same input produce the same tree, and a query always returns the same
//! neighbor even when several points are equally close.
//!
//! # Example
//!
//! ```rust
//! use kdtree::{KdTree, Point};
//!
//! let points = vec![
//!     Point::<3>::new(0.0, 0.0, 0.0),
//!     Point::<3>::new(5.0, 1.0, 0.0),
//!     Point::<3>::new(-3.0, 2.0, 8.0),
//! ];
//!
//! let tree = KdTree::build(&points).unwrap();
//! let nearest = tree.nearest(&Point::<3>::new(4.0, 0.0, 0.0)).unwrap();
//!
//! assert_eq!(nearest.index, 1);
//! assert_eq!(nearest.point, points[1]);
//! ```

use std::cmp::Ordering;

use crate::error::KdTreeError;
use crate::point::{self, Point};

/// Index into the node arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NodeId(u32);

impl NodeId {
    fn new(index: usize) -> Self {
        debug_assert!(index < u32::MAX as usize, "NodeId overflow");
        NodeId(index as u32)
    }

    /// Returns the index into the arena
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// A point from the input set together with its position in that set.
#[derive(Clone, Copy, Debug)]
struct Entry<const D: usize> {
    point: Point<D>,
    index: usize,
}

impl<const D: usize> Entry<D> {
    /// Strict order along `dim`; only equal for the same input index.
    fn cmp_along(&self, other: &Self, dim: usize) -> Ordering {
        point::cmp_along(&self.point, &other.point, dim).then(self.index.cmp(&other.index))
    }
}

/// A node in the arena-based tree.
///
/// The split dimension is not stored; it is `depth % D` and is recomputed
/// while walking down from the root.
#[derive(Clone, Debug)]
pub(crate) struct Node<const D: usize> {
    pub(crate) point: Point<D>,
    pub(crate) index: usize,
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,
}

/// The result of a nearest-neighbor query.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Neighbor<const D: usize> {
    /// The closest indexed point
    pub point: Point<D>,
    /// Position of that point in the slice the tree was built from
    pub index: usize,
    /// Squared Euclidean distance to the query
    pub distance_squared: f64,
}

impl<const D: usize> Neighbor<D> {
    fn of(node: &Node<D>, query: &Point<D>) -> Self {
        Self {
            point: node.point,
            index: node.index,
            distance_squared: point::distance_squared(&node.point, query),
        }
    }

    /// Closer wins; equal distances fall back to the point order, then index.
    fn is_better_than(&self, other: &Self) -> bool {
        self.distance_squared
            .total_cmp(&other.distance_squared)
            .then_with(|| point::total_cmp(&self.point, &other.point))
            .then(self.index.cmp(&other.index))
            == Ordering::Less
    }
}

/// Balanced k-d tree over a fixed set of `D`-dimensional points.
///
/// `Clone` produces an independent deep copy of the whole arena.
#[derive(Clone, Debug)]
pub struct KdTree<const D: usize> {
    /// Contiguous storage for all nodes
    pub(crate) nodes: Vec<Node<D>>,
    /// Root node of the tree, `None` when built from no points
    pub(crate) root: Option<NodeId>,
}

impl<const D: usize> KdTree<D> {
    const NONZERO_DIMENSION: () = assert!(D > 0, "a k-d tree needs at least one dimension");

    /// Builds a balanced tree from a snapshot of points.
    ///
    /// At each depth the median along dimension `depth % D` is chosen with a
    /// partition-based selection (no full sort), becomes the node, and the
    /// lower and upper halves become the left and right subtrees.
    ///
    /// # Arguments
    ///
    /// * `points` - Points to index; their positions in this slice are the
    ///   indices reported by queries
    ///
    /// # Errors
    ///
    /// Returns [`KdTreeError::NonFinite`] if any coordinate is NaN or infinite.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kdtree::{KdTree, Point};
    ///
    /// let points: Vec<Point<2>> = (0..10).map(|i| Point::<2>::new(i as f64, 0.0)).collect();
    /// let tree = KdTree::build(&points).unwrap();
    /// assert_eq!(tree.len(), 10);
    /// ```
    pub fn build(points: &[Point<D>]) -> Result<Self, KdTreeError> {
        let () = Self::NONZERO_DIMENSION;

        if let Some(index) = points.iter().position(|p| !point::is_finite(p)) {
            return Err(KdTreeError::NonFinite { index });
        }

        let mut entries: Vec<Entry<D>> = points
            .iter()
            .enumerate()
            .map(|(index, &point)| Entry { point, index })
            .collect();

        let mut arena = Vec::with_capacity(points.len());
        let root = Self::build_recursive(&mut entries, 0, &mut arena);

        Ok(KdTree { nodes: arena, root })
    }

    fn build_recursive(
        entries: &mut [Entry<D>],
        depth: usize,
        arena: &mut Vec<Node<D>>,
    ) -> Option<NodeId> {
        if entries.is_empty() {
            return None;
        }

        let dim = depth % D;
        let median = (entries.len() - 1) / 2;
        select_nth(entries, median, dim);

        let (lower, rest) = entries.split_at_mut(median);
        let (pivot, upper) = rest.split_at_mut(1);
        let pivot = pivot[0];

        let left = Self::build_recursive(lower, depth + 1, arena);
        let right = Self::build_recursive(upper, depth + 1, arena);

        let id = NodeId::new(arena.len());
        arena.push(Node {
            point: pivot.point,
            index: pivot.index,
            left,
            right,
        });
        Some(id)
    }

    /// Finds the indexed point closest to `query`.
    ///
    /// Descends toward the query's half-space, then unwinds, visiting a
    /// sibling subtree only when its splitting plane is no farther than the
    /// best squared distance found so far.
    ///
    /// # Errors
    ///
    /// Returns [`KdTreeError::Empty`] if the tree holds no points.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kdtree::{KdTree, KdTreeError, Point};
    ///
    /// let empty = KdTree::<3>::build(&[]).unwrap();
    /// assert_eq!(empty.nearest(&Point::origin()), Err(KdTreeError::Empty));
    /// ```
    pub fn nearest(&self, query: &Point<D>) -> Result<Neighbor<D>, KdTreeError> {
        let root = self.root.ok_or(KdTreeError::Empty)?;
        Ok(self.nearest_recursive(root, query, 0))
    }

    fn nearest_recursive(&self, node_id: NodeId, query: &Point<D>, depth: usize) -> Neighbor<D> {
        let node = &self.nodes[node_id.index()];
        let dim = depth % D;

        let (near, far) = if point::cmp_along(query, &node.point, dim) == Ordering::Less {
            (node.left, node.right)
        } else {
            (node.right, node.left)
        };

        let mut best = Neighbor::of(node, query);

        if let Some(child) = near {
            let candidate = self.nearest_recursive(child, query, depth + 1);
            if candidate.is_better_than(&best) {
                best = candidate;
            }
        }

        if let Some(child) = far {
            let plane = query[dim] - node.point[dim];
            if plane * plane <= best.distance_squared {
                let candidate = self.nearest_recursive(child, query, depth + 1);
                if candidate.is_better_than(&best) {
                    best = candidate;
                }
            }
        }

        best
    }

    /// Finds all indexed points within `radius` of `query` (inclusive).
    ///
    /// Subtrees are pruned when their splitting plane lies farther than the
    /// radius. Results are input indices in no particular order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kdtree::{KdTree, Point};
    ///
    /// let points = vec![
    ///     Point::<2>::new(0.0, 0.0),
    ///     Point::<2>::new(1.0, 0.0),
    ///     Point::<2>::new(10.0, 0.0),
    /// ];
    /// let tree = KdTree::build(&points).unwrap();
    ///
    /// let mut found = tree.within_radius(&Point::<2>::new(0.0, 0.0), 2.0);
    /// found.sort_unstable();
    /// assert_eq!(found, vec![0, 1]);
    /// ```
    pub fn within_radius(&self, query: &Point<D>, radius: f64) -> Vec<usize> {
        let mut result = Vec::new();
        if radius < 0.0 || radius.is_nan() {
            return result;
        }
        if let Some(root) = self.root {
            self.within_recursive(root, query, radius * radius, 0, &mut result);
        }
        result
    }

    fn within_recursive(
        &self,
        node_id: NodeId,
        query: &Point<D>,
        radius_sq: f64,
        depth: usize,
        result: &mut Vec<usize>,
    ) {
        let node = &self.nodes[node_id.index()];
        let dim = depth % D;

        if point::distance_squared(&node.point, query) <= radius_sq {
            result.push(node.index);
        }

        // Left holds coordinates <= the node's, right holds >=.
        let delta = query[dim] - node.point[dim];
        let plane_in_reach = delta * delta <= radius_sq;

        if let Some(left) = node.left {
            if delta <= 0.0 || plane_in_reach {
                self.within_recursive(left, query, radius_sq, depth + 1, result);
            }
        }
        if let Some(right) = node.right {
            if delta >= 0.0 || plane_in_reach {
                self.within_recursive(right, query, radius_sq, depth + 1, result);
            }
        }
    }

    /// Number of indexed points
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the tree was built from no points
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Iterates over `(input index, point)` pairs in arena order
    pub fn points(&self) -> impl Iterator<Item = (usize, &Point<D>)> + '_ {
        self.nodes.iter().map(|n| (n.index, &n.point))
    }

    /// Height of the tree (0 for an empty tree)
    pub fn height(&self) -> usize {
        self.root.map_or(0, |root| self.height_recursive(root))
    }

    fn height_recursive(&self, node_id: NodeId) -> usize {
        let node = &self.nodes[node_id.index()];
        let left = node.left.map_or(0, |c| self.height_recursive(c));
        let right = node.right.map_or(0, |c| self.height_recursive(c));
        1 + left.max(right)
    }
}

/// Partially orders `entries` so that position `k` holds the element it would
/// hold if sorted along `dim`, with everything before it smaller and
/// everything after it larger.
fn select_nth<const D: usize>(entries: &mut [Entry<D>], k: usize, dim: usize) {
    let mut lo = 0;
    let mut hi = entries.len() - 1;

    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        entries.swap(mid, hi);
        let pivot = partition(entries, lo, hi, dim);

        match pivot.cmp(&k) {
            Ordering::Equal => return,
            Ordering::Greater => hi = pivot - 1,
            Ordering::Less => lo = pivot + 1,
        }
    }
}

/// Lomuto partition around `entries[hi]`; returns the pivot's final position.
fn partition<const D: usize>(entries: &mut [Entry<D>], lo: usize, hi: usize, dim: usize) -> usize {
    let pivot = entries[hi];
    let mut store = lo;

    for i in lo..hi {
        if entries[i].cmp_along(&pivot, dim) == Ordering::Less {
            entries.swap(i, store);
            store += 1;
        }
    }

    entries.swap(store, hi);
    store
}
