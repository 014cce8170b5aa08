//! Query layer over a [`PointSet`](crate::PointSet).
//!
//! Both query engines walk the tree carrying each node's region of the plane,
//! starting from the whole plane at the root and splitting it at every node
//! on the way down. Regions are never stored in the tree.
//!
//! - [`range`]: rectangle queries, pruned by region/query overlap
//! - [`nearest`]: k-nearest-neighbor queries, pruned by region distance
//!
//! Results come back as [`Points`], an owned sequence that holds no borrow of
//! the tree, so the tree can be mutated while results are still in use.

pub mod nearest;
pub mod range;

use crate::geometry::Point;
use serde::{Deserialize, Serialize};
use std::slice;
use std::vec;

/// An owned, detached sequence of distinct points returned by a query.
///
/// Range results are in lexicographic (x, then y) order; nearest-neighbor
/// results are in ascending distance from the key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Points {
    points: Vec<Point>,
}

impl Points {
    /// Sorts lexicographically and drops epsilon-equal neighbors.
    pub(crate) fn distinct_sorted(mut points: Vec<Point>) -> Self {
        points.sort_by(Point::total_cmp);
        points.dedup_by(|a, b| a == b);
        Self { points }
    }

    /// Takes `points` as already ordered and distinct.
    pub(crate) fn from_ordered(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&Point> {
        self.points.first()
    }

    pub fn iter(&self) -> slice::Iter<'_, Point> {
        self.points.iter()
    }

    pub fn as_slice(&self) -> &[Point] {
        &self.points
    }

    /// True if a point equal to `point` (within epsilon) is in the result.
    pub fn contains(&self, point: &Point) -> bool {
        self.points.iter().any(|p| p == point)
    }

    pub fn into_vec(self) -> Vec<Point> {
        self.points
    }
}

impl IntoIterator for Points {
    type Item = Point;
    type IntoIter = vec::IntoIter<Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.into_iter()
    }
}

impl<'a> IntoIterator for &'a Points {
    type Item = &'a Point;
    type IntoIter = slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

impl From<Points> for Vec<Point> {
    fn from(points: Points) -> Self {
        points.points
    }
}
