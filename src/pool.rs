//! Bounded slab pool for same-size records.
//!
//! A `SlabPool<T>` owns exactly `capacity` record slots and a parallel
//! occupancy bitmap. Runs of contiguous slots are handed out first-fit by a
//! linear scan of the bitmap, so the pool never grows and never touches the
//! heap after creation. It backs the candidate set of a single
//! nearest-neighbor search and is dropped when that search returns.
//!
//! Fragmentation is visible to callers: a request for `n` contiguous slots
//! fails when the longest free run is shorter than `n`, even if `n` or more
//! slots are free in total.
//!
//! ```
//! use kdtree2d::SlabPool;
//!
//! let mut pool: SlabPool<u64> = SlabPool::with_capacity(4);
//! let a = pool.allocate(2)?;
//! let b = pool.allocate(2)?;
//! pool.deallocate(a);
//! assert!(pool.allocate(3).is_err());
//! pool.deallocate(b);
//! assert!(pool.allocate(3).is_ok());
//! # Ok::<(), kdtree2d::PointSetError>(())
//! ```

use crate::error::{PointSetError, Result};
use std::mem;
use std::ops::Range;

/// A contiguous run of slots handed out by [`SlabPool::allocate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlabRun {
    start: usize,
    len: usize,
}

impl SlabRun {
    pub fn new(start: usize, len: usize) -> Self {
        Self { start, len }
    }

    /// Index of the first slot.
    pub fn start(&self) -> usize {
        self.start
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Slot indices covered by the run, saturating at `usize::MAX`.
    pub fn slots(&self) -> Range<usize> {
        self.start..self.start.saturating_add(self.len)
    }
}

/// Fixed-capacity arena with an occupancy bitmap.
#[derive(Debug)]
pub struct SlabPool<T> {
    slots: Vec<Option<T>>,
    occupied: Vec<bool>,
    live: usize,
}

impl<T> SlabPool<T> {
    /// Creates a pool of `capacity` slots of `size_of::<T>()` bytes each.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        Self {
            slots,
            occupied: vec![false; capacity],
            live: 0,
        }
    }

    /// Size in bytes of one record.
    pub fn record_size(&self) -> usize {
        mem::size_of::<T>()
    }

    pub fn capacity(&self) -> usize {
        self.occupied.len()
    }

    /// Number of slots currently allocated.
    pub fn live_slots(&self) -> usize {
        self.live
    }

    pub fn free_slots(&self) -> usize {
        self.capacity() - self.live
    }

    pub fn is_full(&self) -> bool {
        self.live == self.capacity()
    }

    /// Length of the longest run of contiguous free slots.
    pub fn largest_free_run(&self) -> usize {
        let mut best = 0;
        let mut current = 0;
        for &used in &self.occupied {
            if used {
                current = 0;
            } else {
                current += 1;
                best = best.max(current);
            }
        }
        best
    }

    /// Reserves `count` contiguous free slots, first fit.
    ///
    /// Fails with [`PointSetError::AllocationFailure`] when no free run of
    /// that length exists. Zero-length requests also fail.
    pub fn allocate(&mut self, count: usize) -> Result<SlabRun> {
        let Some(start) = self.find_free_run(count) else {
            log::trace!(
                "slab pool exhausted: requested {} contiguous slots, {} of {} free",
                count,
                self.free_slots(),
                self.capacity()
            );
            return Err(PointSetError::AllocationFailure {
                requested: count,
                capacity: self.capacity(),
            });
        };
        for used in &mut self.occupied[start..start + count] {
            *used = true;
        }
        self.live += count;
        Ok(SlabRun::new(start, count))
    }

    /// Releases the slots of `run` and drops anything stored in them.
    ///
    /// A run starting outside the arena is ignored. A run that overhangs the
    /// end of the arena is clamped.
    pub fn deallocate(&mut self, run: SlabRun) {
        if run.start >= self.capacity() {
            return;
        }
        let end = run.start + run.len.min(self.capacity() - run.start);
        for slot in run.start..end {
            if mem::replace(&mut self.occupied[slot], false) {
                self.live -= 1;
            }
            self.slots[slot] = None;
        }
    }

    /// Stores `value` in an allocated slot, replacing any previous record.
    ///
    /// Returns false and drops `value` if `slot` is not allocated.
    pub fn store(&mut self, slot: usize, value: T) -> bool {
        if !self.is_allocated(slot) {
            return false;
        }
        self.slots[slot] = Some(value);
        true
    }

    /// Allocates a single slot and stores `value` in it.
    pub fn insert(&mut self, value: T) -> Result<usize> {
        let run = self.allocate(1)?;
        self.slots[run.start] = Some(value);
        Ok(run.start)
    }

    /// Takes the record out of `slot` and frees the slot.
    pub fn remove(&mut self, slot: usize) -> Option<T> {
        if !self.is_allocated(slot) {
            return None;
        }
        let value = self.slots[slot].take();
        self.deallocate(SlabRun::new(slot, 1));
        value
    }

    pub fn get(&self, slot: usize) -> Option<&T> {
        if !self.is_allocated(slot) {
            return None;
        }
        self.slots[slot].as_ref()
    }

    pub fn get_mut(&mut self, slot: usize) -> Option<&mut T> {
        if !self.is_allocated(slot) {
            return None;
        }
        self.slots[slot].as_mut()
    }

    pub fn is_allocated(&self, slot: usize) -> bool {
        self.occupied.get(slot).copied().unwrap_or(false)
    }

    fn find_free_run(&self, count: usize) -> Option<usize> {
        if count == 0 || count > self.capacity() {
            return None;
        }
        let mut run_start = 0;
        let mut run_len = 0;
        for (slot, &used) in self.occupied.iter().enumerate() {
            if used {
                run_start = slot + 1;
                run_len = 0;
                continue;
            }
            run_len += 1;
            if run_len == count {
                return Some(run_start);
            }
        }
        None
    }
}
