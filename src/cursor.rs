//! Traversal over an [`IndexedHeap`] in store order
//!
//! Two flavours are provided:
//!
//! - [`Iter`]: a plain borrowing iterator. The borrow checker rules out any
//!   mutation while it is alive.
//! - [`Cursor`]: a detached cursor that is advanced with the heap passed in
//!   explicitly, so the element it is on can be removed mid-traversal.
//!   Structural changes made behind its back are reported as
//!   [`HeapError::ConcurrentModification`].
//!
//! # Removing through a cursor
//!
//! Removing slot `i` moves the last element into `i` and repairs the heap.
//! If that element sifts down, slot `i` now holds an unvisited element and is
//! visited again. If it sifts up, it lands in a slot the cursor has already
//! passed, so the cursor remembers it and visits it after the direct slots
//! are exhausted. Either way every element alive at the end is visited
//! exactly once.
//!
//! ```rust
//! use rust_indexed_heap::IndexedHeap;
//!
//! let mut heap: IndexedHeap<u32> = (0..10).collect();
//! let mut cursor = heap.cursor();
//! let mut kept = Vec::new();
//! while let Some(&value) = cursor.next(&heap).unwrap() {
//!     if value % 3 == 0 {
//!         cursor.remove_current(&mut heap).unwrap();
//!     } else {
//!         kept.push(value);
//!     }
//! }
//! kept.sort();
//! assert_eq!(kept, vec![1, 2, 4, 5, 7, 8]);
//! assert_eq!(heap.len(), 6);
//! ```

use crate::error::HeapError;
use crate::indexed::IndexedHeap;
use compare::Compare;
use smallvec::SmallVec;
use std::hash::Hash;
use std::iter::FusedIterator;

/// Borrowing iterator over a heap's elements in store order
#[derive(Debug, Clone)]
pub struct Iter<'a, T> {
    inner: std::slice::Iter<'a, T>,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(store: &'a [T]) -> Self {
        Iter {
            inner: store.iter(),
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<&'a T> {
        self.inner.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

/// Elements relocated above the cursor by a removal
type Bumped<T> = SmallVec<[T; 4]>;

/// Where the cursor is in its traversal
#[derive(Debug, Clone)]
enum Phase<T> {
    /// Walking live slots; `next` is the next slot to visit
    Direct { next: usize, bumped: Bumped<T> },
    /// Slots exhausted; visiting elements that were bumped above the cursor
    Deferred(Bumped<T>),
    Done,
}

/// The element most recently returned by [`Cursor::next`]
#[derive(Debug, Clone)]
enum Current<T> {
    None,
    Slot(usize),
    Bumped(T),
}

/// A detached cursor over an [`IndexedHeap`].
///
/// Created by [`IndexedHeap::cursor`]. Each call takes the heap the cursor
/// was created from; passing a different heap is not detected. The cursor
/// records the heap's modification count and fails with
/// [`HeapError::ConcurrentModification`] once the heap has been structurally
/// modified other than through [`remove_current`](Cursor::remove_current).
#[derive(Debug, Clone)]
pub struct Cursor<T> {
    expected: u64,
    phase: Phase<T>,
    current: Current<T>,
}

impl<T: Hash + Eq + Clone> Cursor<T> {
    pub(crate) fn new(mod_count: u64) -> Self {
        Cursor {
            expected: mod_count,
            phase: Phase::Direct {
                next: 0,
                bumped: SmallVec::new(),
            },
            current: Current::None,
        }
    }

    fn check<C>(&self, heap: &IndexedHeap<T, C>) -> Result<(), HeapError>
    where
        C: Compare<T>,
    {
        let found = heap.modification_count();
        if found == self.expected {
            Ok(())
        } else {
            Err(HeapError::ConcurrentModification {
                expected: self.expected,
                found,
            })
        }
    }

    /// Advances to the next element.
    ///
    /// Returns `Ok(None)` once every element has been visited.
    ///
    /// # Errors
    /// Returns [`HeapError::ConcurrentModification`] if the heap changed
    /// structurally since the cursor last touched it.
    pub fn next<'h, C>(&mut self, heap: &'h IndexedHeap<T, C>) -> Result<Option<&'h T>, HeapError>
    where
        C: Compare<T>,
    {
        self.check(heap)?;
        loop {
            match &mut self.phase {
                Phase::Direct { next, bumped } => {
                    if *next < heap.len() {
                        let slot = *next;
                        *next += 1;
                        self.current = Current::Slot(slot);
                        return Ok(Some(&heap.as_slice()[slot]));
                    }
                    let pending = std::mem::take(bumped);
                    self.phase = Phase::Deferred(pending);
                }
                Phase::Deferred(pending) => match pending.pop() {
                    Some(element) => {
                        if let Some(found) = heap.get_element(&element) {
                            self.current = Current::Bumped(element);
                            return Ok(Some(found));
                        }
                    }
                    None => self.phase = Phase::Done,
                },
                Phase::Done => {
                    self.current = Current::None;
                    return Ok(None);
                }
            }
        }
    }

    /// Removes the element most recently returned by [`next`](Self::next).
    ///
    /// # Errors
    /// - [`HeapError::NoCurrentElement`] if `next` has not returned an element
    ///   since the last removal.
    /// - [`HeapError::ConcurrentModification`] if the heap changed behind the
    ///   cursor.
    pub fn remove_current<C>(&mut self, heap: &mut IndexedHeap<T, C>) -> Result<T, HeapError>
    where
        C: Compare<T>,
    {
        self.check(heap)?;
        let removed = match std::mem::replace(&mut self.current, Current::None) {
            Current::None => return Err(HeapError::NoCurrentElement),
            Current::Slot(slot) => {
                let (removed, moved_to) = heap.remove_at(slot);
                if let Phase::Direct { next, bumped } = &mut self.phase {
                    match moved_to {
                        Some(above) => bumped.push(heap.as_slice()[above].clone()),
                        None => *next = slot,
                    }
                }
                removed
            }
            Current::Bumped(element) => heap.take(&element).ok_or(HeapError::NotFound)?,
        };
        self.expected = heap.modification_count();
        Ok(removed)
    }

    /// Returns true once the traversal has finished
    pub fn is_done(&self) -> bool {
        matches!(self.phase, Phase::Done)
    }
}
