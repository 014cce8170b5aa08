//! The 2D-tree itself: node arena, bulk balancing, insertion and membership.
//!
//! Nodes are stored in a `Vec` owned by the [`PointSet`] and refer to their
//! children by index. Each level splits on alternating axes, starting with x
//! at the root. A node never stores its region of the plane; traversals
//! derive it by splitting the parent's region at the parent's point along
//! the parent's axis.
//!
//! Routing is on raw coordinates: a key whose coordinate on the node's axis
//! is `>=` the node's goes right, anything smaller goes left. Only the final
//! equality check uses the epsilon tolerance.

mod iter;

pub use iter::{InOrder, Iter};

use crate::geometry::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a node in the arena.
pub(crate) type NodeId = usize;

/// Axis a tree level splits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Splits on x.
    Vertical,
    /// Splits on y.
    Horizontal,
}

impl Orientation {
    /// The orientation of the next level down.
    pub fn next(self) -> Self {
        match self {
            Orientation::Vertical => Orientation::Horizontal,
            Orientation::Horizontal => Orientation::Vertical,
        }
    }

    /// The coordinate of `point` this orientation splits on.
    #[inline]
    pub fn coordinate(self, point: &Point) -> f64 {
        match self {
            Orientation::Vertical => point.x(),
            Orientation::Horizontal => point.y(),
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub(crate) point: Point,
    pub(crate) orientation: Orientation,
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,
    /// Number of points in this subtree, including this one.
    pub(crate) size: usize,
}

impl Node {
    fn leaf(point: Point, orientation: Orientation) -> Self {
        Self {
            point,
            orientation,
            left: None,
            right: None,
            size: 1,
        }
    }

    #[inline]
    pub(crate) fn routes_right(&self, key: &Point) -> bool {
        self.orientation.coordinate(key) >= self.orientation.coordinate(&self.point)
    }

    #[inline]
    fn child_toward(&self, key: &Point) -> Option<NodeId> {
        if self.routes_right(key) {
            self.right
        } else {
            self.left
        }
    }

    /// Regions of the left and right children, given this node's region.
    pub(crate) fn split_region(&self, region: &Rect) -> (Rect, Rect) {
        match self.orientation {
            Orientation::Vertical => region.split_at_x(self.point.x()),
            Orientation::Horizontal => region.split_at_y(self.point.y()),
        }
    }
}

/// A set of points in the plane indexed by a 2D-tree.
///
/// Built balanced from a batch of points with [`PointSet::from_points`];
/// later [`put`](PointSet::put) calls attach leaves without rebalancing.
///
/// ```
/// use kdtree2d::{Point, PointSet, Rect};
///
/// let set = PointSet::from_points(vec![
///     Point::new(1.0, 2.0),
///     Point::new(3.0, 4.0),
///     Point::new(5.0, 1.0),
///     Point::new(2.0, 8.0),
/// ]);
/// assert!(set.contains(&Point::new(3.0, 4.0)));
/// assert!(!set.contains(&Point::new(9.0, 9.0)));
///
/// let hits = set.range(&Rect::new(Point::new(0.0, 0.0), Point::new(4.0, 5.0)));
/// assert_eq!(hits.as_slice(), &[Point::new(1.0, 2.0), Point::new(3.0, 4.0)]);
///
/// assert_eq!(set.nearest(&Point::new(0.0, 0.0))?, Some(Point::new(1.0, 2.0)));
/// # Ok::<(), kdtree2d::PointSetError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct PointSet {
    nodes: Vec<Node>,
    root: Option<NodeId>,
}

impl PointSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty set with room for `capacity` points.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            root: None,
        }
    }

    /// Builds a balanced tree from an unordered batch of points.
    ///
    /// Each level sorts its slice on that level's axis and takes the median
    /// as the subtree root, so the depth is logarithmic in the number of
    /// distinct points. Duplicates (within epsilon) are dropped and points
    /// with non-finite coordinates are skipped.
    pub fn from_points(mut points: Vec<Point>) -> Self {
        let before = points.len();
        points.retain(|point| {
            if point.is_finite() {
                true
            } else {
                log::warn!("Skipping non-finite point {} during bulk build", point);
                false
            }
        });

        let mut set = Self::with_capacity(points.len());
        set.balance(&mut points, Orientation::Vertical);
        log::debug!(
            "Bulk built point set: {} input points, {} stored, depth {}",
            before,
            set.len(),
            set.depth()
        );
        set
    }

    fn balance(&mut self, points: &mut [Point], orientation: Orientation) {
        if points.is_empty() {
            return;
        }
        points.sort_by(|a, b| orientation.coordinate(a).total_cmp(&orientation.coordinate(b)));
        let middle = points.len() / 2;
        self.put(points[middle]);

        let (lower, upper) = points.split_at_mut(middle);
        self.balance(lower, orientation.next());
        self.balance(&mut upper[1..], orientation.next());
    }

    /// Number of distinct points stored.
    pub fn len(&self) -> usize {
        self.root.map_or(0, |root| self.nodes[root].size)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Inserts `point`, returning `false` if an equal point (within epsilon)
    /// is already present or the point has a non-finite coordinate.
    ///
    /// The new leaf is attached where the descent ends; the tree is not
    /// rebalanced.
    pub fn put(&mut self, point: Point) -> bool {
        if !point.is_finite() {
            log::warn!("Rejecting non-finite point {}", point);
            return false;
        }
        if self.contains(&point) {
            return false;
        }

        let mut orientation = Orientation::Vertical;
        let mut parent = None;
        let mut current = self.root;
        while let Some(id) = current {
            let node = &mut self.nodes[id];
            node.size += 1;
            let go_right = node.routes_right(&point);
            orientation = node.orientation.next();
            parent = Some((id, go_right));
            current = if go_right { node.right } else { node.left };
        }

        let id = self.nodes.len();
        self.nodes.push(Node::leaf(point, orientation));
        match parent {
            Some((parent, true)) => self.nodes[parent].right = Some(id),
            Some((parent, false)) => self.nodes[parent].left = Some(id),
            None => self.root = Some(id),
        }
        true
    }

    /// True if a point equal to `key` (within epsilon) is stored.
    pub fn contains(&self, key: &Point) -> bool {
        let mut current = self.root;
        while let Some(id) = current {
            let node = &self.nodes[id];
            if node.point == *key {
                return true;
            }
            current = node.child_toward(key);
        }
        false
    }

    /// Number of levels in the tree; zero when empty.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut level: Vec<NodeId> = self.root.into_iter().collect();
        while !level.is_empty() {
            depth += 1;
            level = level
                .iter()
                .flat_map(|&id| {
                    let node = &self.nodes[id];
                    node.left.into_iter().chain(node.right)
                })
                .collect();
        }
        depth
    }

    /// Level-order (breadth-first) traversal of the stored points.
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self)
    }

    /// In-order traversal: left subtree, node, right subtree.
    pub fn in_order(&self) -> InOrder<'_> {
        InOrder::new(self)
    }

    pub(crate) fn root(&self) -> Option<NodeId> {
        self.root
    }

    #[inline]
    pub(crate) fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }
}

impl FromIterator<Point> for PointSet {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Self::from_points(iter.into_iter().collect())
    }
}

impl Extend<Point> for PointSet {
    fn extend<I: IntoIterator<Item = Point>>(&mut self, iter: I) {
        for point in iter {
            self.put(point);
        }
    }
}

impl<'a> IntoIterator for &'a PointSet {
    type Item = &'a Point;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for PointSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "PointSet {{")?;
        for point in self.in_order() {
            writeln!(f, "\t{},", point)?;
        }
        write!(f, "}}")
    }
}
