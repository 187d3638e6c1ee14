//! Range-splitting traversal for parallel consumption
//!
//! A [`Splitter`] covers a slot range `[index, fence)` of a heap's store and
//! can hand off its lower half to another splitter. Splitters hold only
//! integers, so halves can be sent to other threads that share
//! `&IndexedHeap`. The fence and the expected modification count bind
//! lazily on first use; after that, structural changes to the heap are
//! reported as [`HeapError::ConcurrentModification`]. Only the count is
//! recorded, so a different heap of at least the bound length is not
//! detected; a shorter one is reported as [`HeapError::IndexOutOfBounds`].
//!
//! ```rust
//! use rust_indexed_heap::IndexedHeap;
//!
//! let heap: IndexedHeap<u64> = (1..=100).collect();
//! let mut upper = heap.splitter();
//! let mut lower = upper.try_split(&heap).unwrap();
//!
//! let (a, b) = std::thread::scope(|s| {
//!     let left = s.spawn(|| {
//!         let mut sum = 0;
//!         lower.for_each_remaining(&heap, |x| sum += x).map(|_| sum)
//!     });
//!     let right = s.spawn(|| {
//!         let mut sum = 0;
//!         upper.for_each_remaining(&heap, |x| sum += x).map(|_| sum)
//!     });
//!     (left.join().unwrap(), right.join().unwrap())
//! });
//! assert_eq!(a.unwrap() + b.unwrap(), 5050);
//! ```

use crate::error::HeapError;
use crate::indexed::IndexedHeap;
use bitflags::bitflags;
use compare::Compare;
use std::hash::Hash;

bitflags! {
    /// Properties reported by every [`Splitter`]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Characteristics: u32 {
        /// `estimate_size` is exact
        const SIZED = 0x0040;
        /// Both halves of a split are `SIZED`
        const SUBSIZED = 0x4000;
        /// No element is ever absent
        const NONNULL = 0x0100;
    }
}

/// Bounds bound on first use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Bound {
    fence: usize,
    expected: u64,
}

/// Splittable traversal over a slot range of an [`IndexedHeap`].
///
/// Created by [`IndexedHeap::splitter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Splitter {
    index: usize,
    bound: Option<Bound>,
}

impl Splitter {
    pub(crate) fn new() -> Self {
        Splitter {
            index: 0,
            bound: None,
        }
    }

    fn bind<T, C>(&mut self, heap: &IndexedHeap<T, C>) -> Bound
    where
        T: Hash + Eq + Clone,
        C: Compare<T>,
    {
        *self.bound.get_or_insert_with(|| Bound {
            fence: heap.len(),
            expected: heap.modification_count(),
        })
    }

    fn check<T, C>(&mut self, heap: &IndexedHeap<T, C>) -> Result<Bound, HeapError>
    where
        T: Hash + Eq + Clone,
        C: Compare<T>,
    {
        let bound = self.bind(heap);
        let found = heap.modification_count();
        if found != bound.expected {
            return Err(HeapError::ConcurrentModification {
                expected: bound.expected,
                found,
            });
        }
        Ok(bound)
    }

    /// Splits off the lower half of the remaining range.
    ///
    /// Returns `None` when fewer than two slots remain.
    pub fn try_split<T, C>(&mut self, heap: &IndexedHeap<T, C>) -> Option<Splitter>
    where
        T: Hash + Eq + Clone,
        C: Compare<T>,
    {
        let bound = self.bind(heap);
        let lo = self.index;
        let mid = lo + (bound.fence.saturating_sub(lo)) / 2;
        if lo >= mid {
            return None;
        }
        self.index = mid;
        Some(Splitter {
            index: lo,
            bound: Some(Bound {
                fence: mid,
                expected: bound.expected,
            }),
        })
    }

    /// Number of elements left in this range
    pub fn estimate_size<T, C>(&mut self, heap: &IndexedHeap<T, C>) -> usize
    where
        T: Hash + Eq + Clone,
        C: Compare<T>,
    {
        self.bind(heap).fence.saturating_sub(self.index)
    }

    /// Always `SIZED | SUBSIZED | NONNULL`
    pub fn characteristics(&self) -> Characteristics {
        Characteristics::SIZED | Characteristics::SUBSIZED | Characteristics::NONNULL
    }

    /// Calls `f` on the next element, returning whether there was one.
    ///
    /// # Errors
    /// Returns [`HeapError::ConcurrentModification`] if the heap changed
    /// structurally since this splitter was bound, and
    /// [`HeapError::IndexOutOfBounds`] if `heap` is shorter than the heap the
    /// range was bound to.
    pub fn try_advance<'h, T, C, F>(
        &mut self,
        heap: &'h IndexedHeap<T, C>,
        f: F,
    ) -> Result<bool, HeapError>
    where
        T: Hash + Eq + Clone,
        C: Compare<T>,
        F: FnOnce(&'h T),
    {
        let bound = self.check(heap)?;
        if self.index >= bound.fence {
            return Ok(false);
        }
        let element = heap
            .as_slice()
            .get(self.index)
            .ok_or(HeapError::IndexOutOfBounds {
                index: self.index,
                len: heap.len(),
            })?;
        f(element);
        self.index += 1;
        Ok(true)
    }

    /// Calls `f` on every remaining element.
    ///
    /// # Errors
    /// Returns [`HeapError::ConcurrentModification`] if the heap changed
    /// structurally since this splitter was bound, and
    /// [`HeapError::IndexOutOfBounds`] if `heap` is shorter than the bound
    /// range. In both cases no element is visited.
    pub fn for_each_remaining<'h, T, C, F>(
        &mut self,
        heap: &'h IndexedHeap<T, C>,
        mut f: F,
    ) -> Result<(), HeapError>
    where
        T: Hash + Eq + Clone,
        C: Compare<T>,
        F: FnMut(&'h T),
    {
        let bound = self.check(heap)?;
        let remaining = heap.as_slice().get(self.index..bound.fence).ok_or(
            HeapError::IndexOutOfBounds {
                index: bound.fence.saturating_sub(1),
                len: heap.len(),
            },
        )?;
        for element in remaining {
            f(element);
        }
        self.index = bound.fence;
        Ok(())
    }
}
