//! Traversals over a live [`PointSet`].

use super::{NodeId, PointSet};
use crate::geometry::Point;
use smallvec::SmallVec;
use std::collections::VecDeque;
use std::iter::FusedIterator;

/// Breadth-first traversal, driven by a queue of pending nodes.
///
/// Yields each stored point exactly once, root first, then level by level.
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    set: &'a PointSet,
    pending: VecDeque<NodeId>,
    remaining: usize,
}

impl<'a> Iter<'a> {
    pub(super) fn new(set: &'a PointSet) -> Self {
        Self {
            set,
            pending: set.root().into_iter().collect(),
            remaining: set.len(),
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Point;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.pending.pop_front()?;
        let node = self.set.node(id);
        self.pending.extend(node.left);
        self.pending.extend(node.right);
        self.remaining -= 1;
        Some(&node.point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}

/// Depth-first, left subtree before node before right subtree.
///
/// Uses an explicit stack, so degenerate trees do not recurse deeply.
#[derive(Debug, Clone)]
pub struct InOrder<'a> {
    set: &'a PointSet,
    stack: SmallVec<[NodeId; 32]>,
    next_left: Option<NodeId>,
}

impl<'a> InOrder<'a> {
    pub(super) fn new(set: &'a PointSet) -> Self {
        Self {
            set,
            stack: SmallVec::new(),
            next_left: set.root(),
        }
    }
}

impl<'a> Iterator for InOrder<'a> {
    type Item = &'a Point;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(id) = self.next_left {
            self.stack.push(id);
            self.next_left = self.set.node(id).left;
        }
        let id = self.stack.pop()?;
        let node = self.set.node(id);
        self.next_left = node.right;
        Some(&node.point)
    }
}

impl FusedIterator for InOrder<'_> {}
