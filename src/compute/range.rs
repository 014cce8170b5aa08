//! Rectangle range queries.

use super::Points;
use crate::geometry::{Point, Rect};
use crate::tree::{NodeId, PointSet};

impl PointSet {
    /// All stored points inside `query`, edges included.
    ///
    /// A subtree is skipped as soon as its region does not overlap the query,
    /// so a balanced tree answers small queries without visiting most nodes.
    /// A query with a NaN corner matches nothing.
    pub fn range(&self, query: &Rect) -> Points {
        if !query.is_valid() {
            log::warn!("Rejecting range query with NaN coordinates");
            return Points::default();
        }
        let mut found = Vec::new();
        if let Some(root) = self.root() {
            self.range_from(root, query, &Rect::plane(), &mut found);
        }
        Points::distinct_sorted(found)
    }

    fn range_from(&self, id: NodeId, query: &Rect, region: &Rect, found: &mut Vec<Point>) {
        if !query.intersects(region) {
            return;
        }
        let node = self.node(id);
        if query.contains(&node.point) {
            found.push(node.point);
        }
        let (left_region, right_region) = node.split_region(region);
        if let Some(left) = node.left {
            self.range_from(left, query, &left_region, found);
        }
        if let Some(right) = node.right {
            self.range_from(right, query, &right_region, found);
        }
    }
}
