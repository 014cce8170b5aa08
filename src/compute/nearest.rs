//! k-nearest-neighbor queries.
//!
//! The search keeps its best-so-far answers in a candidate set: at most `k`
//! distinct entries ordered by distance, with records held in a [`SlabPool`]
//! of `k + 1` slots created for the call. Every visited node is offered to
//! the set, which evicts its farthest entry once it holds more than `k`. A
//! point epsilon-equal to a kept one only replaces it when closer. A child
//! subtree is skipped when the set is already full and the child's region
//! lies farther from the key than the worst kept distance.

use super::Points;
use crate::error::Result;
use crate::geometry::{Point, Rect};
use crate::pool::SlabPool;
use crate::tree::{NodeId, PointSet};
use smallvec::SmallVec;

#[derive(Debug, Clone, Copy)]
struct Candidate {
    distance: f64,
    point: Point,
}

/// Bounded set of the closest points seen so far.
#[derive(Debug)]
pub(crate) struct CandidateSet {
    pool: SlabPool<Candidate>,
    /// Pool slots in ascending distance order.
    order: SmallVec<[usize; 16]>,
    limit: usize,
}

impl CandidateSet {
    /// A set keeping the `limit` closest candidates.
    pub fn new(limit: usize) -> Self {
        Self {
            pool: SlabPool::with_capacity(limit.saturating_add(1)),
            order: SmallVec::new(),
            limit,
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// True once `limit` candidates are held.
    pub fn is_full(&self) -> bool {
        self.order.len() >= self.limit
    }

    /// Distance of the farthest kept candidate.
    pub fn worst_distance(&self) -> Option<f64> {
        self.order.last().map(|&slot| self.distance_at(slot))
    }

    /// True when nothing at `bound` or farther can enter the set.
    pub fn excludes(&self, bound: f64) -> bool {
        self.is_full() && self.worst_distance().is_some_and(|worst| bound > worst)
    }

    /// Adds `point` at `distance`, evicting the farthest entry if the set
    /// grows past its limit. Equal distances keep insertion order.
    ///
    /// A kept point equal to `point` within epsilon is replaced when the new
    /// distance is smaller, otherwise the offer is ignored, so every kept
    /// entry is a distinct point.
    pub fn offer(&mut self, point: Point, distance: f64) -> Result<()> {
        if let Some(index) = self.position_of(&point) {
            if self.distance_at(self.order[index]) <= distance {
                return Ok(());
            }
            let replaced = self.order.remove(index);
            self.pool.remove(replaced);
        }

        let slot = self.pool.insert(Candidate { distance, point })?;
        let pool = &self.pool;
        let position = self
            .order
            .partition_point(|&kept| Self::slot_distance(pool, kept) <= distance);
        self.order.insert(position, slot);

        if self.order.len() > self.limit
            && let Some(evicted) = self.order.pop()
        {
            self.pool.remove(evicted);
        }
        Ok(())
    }

    /// Kept points in ascending distance.
    pub fn into_points(self) -> Points {
        let pool = &self.pool;
        Points::from_ordered(
            self.order
                .iter()
                .filter_map(|&slot| pool.get(slot).map(|c| c.point))
                .collect(),
        )
    }

    fn position_of(&self, point: &Point) -> Option<usize> {
        self.order
            .iter()
            .position(|&slot| self.pool.get(slot).is_some_and(|c| c.point == *point))
    }

    fn distance_at(&self, slot: usize) -> f64 {
        Self::slot_distance(&self.pool, slot)
    }

    fn slot_distance(pool: &SlabPool<Candidate>, slot: usize) -> f64 {
        pool.get(slot).map_or(f64::INFINITY, |c| c.distance)
    }
}

impl PointSet {
    /// The stored point closest to `key`, or `None` when the set is empty.
    pub fn nearest(&self, key: &Point) -> Result<Option<Point>> {
        Ok(self.nearest_k(key, 1)?.into_iter().next())
    }

    /// The `k` stored points closest to `key`, nearest first.
    ///
    /// Returns `min(k, n)` points, where `n` is the number of distinct stored
    /// points (epsilon twins count once); `k == 0`, an empty set, or a key with a
    /// non-finite coordinate give an empty result. Points at equal distance
    /// are kept in the order the search met them until the set is full.
    ///
    /// The candidate pool is sized so that it cannot run out; an
    /// [`AllocationFailure`](crate::PointSetError::AllocationFailure) here
    /// would indicate a bug.
    pub fn nearest_k(&self, key: &Point, k: usize) -> Result<Points> {
        if k == 0 {
            return Ok(Points::default());
        }
        let Some(root) = self.root() else {
            return Ok(Points::default());
        };
        if !key.is_finite() {
            log::warn!("Rejecting nearest-neighbor query with non-finite key {}", key);
            return Ok(Points::default());
        }

        let mut candidates = CandidateSet::new(k.min(self.len()));
        self.nearest_from(root, key, &Rect::plane(), &mut candidates)?;
        log::trace!("nearest_k: kept {} of {} requested", candidates.len(), k);
        Ok(candidates.into_points())
    }

    fn nearest_from(
        &self,
        id: NodeId,
        key: &Point,
        region: &Rect,
        candidates: &mut CandidateSet,
    ) -> Result<()> {
        let node = self.node(id);
        candidates.offer(node.point, key.distance(&node.point))?;

        let (left_region, right_region) = node.split_region(region);
        let left = (node.left, left_region);
        let right = (node.right, right_region);
        let ordered = if node.routes_right(key) {
            [right, left]
        } else {
            [left, right]
        };

        for (child, child_region) in ordered {
            let Some(child) = child else {
                continue;
            };
            if candidates.excludes(child_region.distance(key)) {
                continue;
            }
            self.nearest_from(child, key, &child_region, candidates)?;
        }
        Ok(())
    }
}
