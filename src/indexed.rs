//! Set-backed indexed binary heap
//!
//! [`IndexedHeap`] is an array binary min-heap paired with a position index
//! mapping every element to its current slot. The index gives O(1)
//! membership tests and lets arbitrary elements be removed or re-positioned
//! in O(log n), which is what Dijkstra/A*-style searches need for
//! decrease-key.
//!
//! Elements are identified by `Eq + Hash`; ordering comes from a
//! [`Compare`] strategy, by default the elements' own `Ord`. Keeping the two
//! separate is what makes decrease-key work: a frontier entry can be found by
//! its node id while being ordered by its distance.
//!
//! # Time Complexity
//!
//! | Operation                    | Complexity          |
//! |------------------------------|---------------------|
//! | `push`                       | O(log n) amortized  |
//! | `peek`                       | O(1)                |
//! | `pop`                        | O(log n)            |
//! | `remove` / `take`            | O(log n)            |
//! | `adjust` / `update`          | O(log n)            |
//! | `contains`                   | O(1)                |
//! | bulk load, `retain`, `remove_if` | O(n)            |
//! | `to_sorted_vec`              | O(n log n)          |
//!
//! # Example
//!
//! ```rust
//! use rust_indexed_heap::IndexedHeap;
//!
//! let mut heap = IndexedHeap::new();
//! for value in [5, 3, 8, 1] {
//!     heap.push(value).unwrap();
//! }
//! assert!(heap.push(3).is_err());
//!
//! assert_eq!(heap.pop(), Some(1));
//! assert_eq!(heap.pop(), Some(3));
//! assert_eq!(heap.pop(), Some(5));
//! assert_eq!(heap.pop(), Some(8));
//! assert_eq!(heap.pop(), None);
//! ```

use crate::cursor::{Cursor, Iter};
use crate::error::HeapError;
use crate::growth;
use crate::split::Splitter;
use compare::{natural, Compare, Natural};
use rustc_hash::{FxHashMap, FxHashSet};
use std::alloc::{handle_alloc_error, Layout};
use std::borrow::Borrow;
use std::hash::Hash;

/// A binary min-heap of unique elements with an element → slot index.
///
/// See the [module documentation](self) for an overview.
#[derive(Clone)]
pub struct IndexedHeap<T, C = Natural<T>> {
    /// Elements in heap order; occupied slots are exactly `0..store.len()`
    store: Vec<T>,
    /// Current slot of every element in `store`
    index: FxHashMap<T, usize>,
    cmp: C,
    /// Bumped by every structural mutation
    mod_count: u64,
}

impl<T: Ord + Hash + Clone> IndexedHeap<T> {
    /// Creates an empty heap ordered by `T`'s `Ord`
    pub fn new() -> Self {
        Self::with_comparator(natural())
    }

    /// Creates an empty heap with room for `capacity` elements
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_comparator(capacity, natural())
    }

    /// Restores a heap from a sequence produced by
    /// [`to_element_sequence`](Self::to_element_sequence).
    ///
    /// The sequence does not need to be in heap order; the store is heapified
    /// once after loading.
    ///
    /// # Errors
    /// Returns [`HeapError::DuplicateElement`] if the sequence holds two equal
    /// elements.
    pub fn from_element_sequence(elements: Vec<T>) -> Result<Self, HeapError> {
        Self::from_element_sequence_with_comparator(elements, natural())
    }
}

impl<T: Hash + Eq + Clone, C: Compare<T>> IndexedHeap<T, C> {
    /// Creates an empty heap ordered by `cmp`
    ///
    /// # Example
    ///
    /// ```rust
    /// use rust_indexed_heap::IndexedHeap;
    ///
    /// // Max-heap through a reversed comparator
    /// let mut heap = IndexedHeap::with_comparator(|a: &i32, b: &i32| b.cmp(a));
    /// heap.push(1).unwrap();
    /// heap.push(7).unwrap();
    /// assert_eq!(heap.peek(), Some(&7));
    /// ```
    pub fn with_comparator(cmp: C) -> Self {
        IndexedHeap {
            store: Vec::new(),
            index: FxHashMap::default(),
            cmp,
            mod_count: 0,
        }
    }

    /// Creates an empty heap ordered by `cmp` with room for `capacity` elements
    pub fn with_capacity_and_comparator(capacity: usize, cmp: C) -> Self {
        IndexedHeap {
            store: Vec::with_capacity(capacity),
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            cmp,
            mod_count: 0,
        }
    }

    /// Restores a heap ordered by `cmp` from an arbitrarily ordered sequence.
    ///
    /// # Errors
    /// Returns [`HeapError::DuplicateElement`] if the sequence holds two equal
    /// elements.
    pub fn from_element_sequence_with_comparator(
        elements: Vec<T>,
        cmp: C,
    ) -> Result<Self, HeapError> {
        let mut index =
            FxHashMap::with_capacity_and_hasher(elements.len(), Default::default());
        for (slot, element) in elements.iter().enumerate() {
            if index.insert(element.clone(), slot).is_some() {
                return Err(HeapError::DuplicateElement);
            }
        }
        Ok(Self::from_parts(elements, index, cmp))
    }

    /// Bulk-loads elements, keeping the first of any run of equal elements.
    pub(crate) fn from_unique_iter<I: IntoIterator<Item = T>>(iter: I, cmp: C) -> Self {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        let mut store = Vec::with_capacity(lower);
        let mut index = FxHashMap::with_capacity_and_hasher(lower, Default::default());
        for element in iter {
            if !index.contains_key(&element) {
                index.insert(element.clone(), store.len());
                store.push(element);
            }
        }
        Self::from_parts(store, index, cmp)
    }

    /// Heapifies a loaded store once and points the index at the final slots.
    fn from_parts(mut store: Vec<T>, mut index: FxHashMap<T, usize>, cmp: C) -> Self {
        heapify(&mut store, &cmp);
        reindex(&store, &mut index);
        IndexedHeap {
            store,
            index,
            cmp,
            mod_count: 0,
        }
    }

    /// Returns the number of elements in the heap
    #[inline]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns true if the heap is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Returns the number of elements the store can hold without growing
    pub fn capacity(&self) -> usize {
        self.store.capacity()
    }

    /// Returns the ordering strategy
    pub fn comparator(&self) -> &C {
        &self.cmp
    }

    /// Returns the store in heap order
    ///
    /// Slot 0 holds the minimum; beyond that the order is only partial.
    pub fn as_slice(&self) -> &[T] {
        &self.store
    }

    /// Inserts an element.
    ///
    /// # Errors
    /// - [`HeapError::DuplicateElement`] if an equal element is present; the
    ///   heap is unchanged.
    /// - [`HeapError::CapacityExhausted`] if the store cannot grow any further.
    ///
    /// # Time Complexity
    /// O(log n) amortized.
    pub fn push(&mut self, element: T) -> Result<(), HeapError> {
        if self.index.contains_key(&element) {
            return Err(HeapError::DuplicateElement);
        }
        self.reserve_for_push()?;

        let slot = self.store.len();
        self.index.insert(element.clone(), slot);
        self.store.push(element);
        self.mod_count += 1;

        let IndexedHeap {
            store, index, cmp, ..
        } = self;
        sift_up(store, &*cmp, slot, |e, s| record_slot(index, e, s));
        Ok(())
    }

    /// Returns the minimum element without removing it
    #[inline]
    pub fn peek(&self) -> Option<&T> {
        self.store.first()
    }

    /// Removes and returns the minimum element
    ///
    /// # Time Complexity
    /// O(log n).
    pub fn pop(&mut self) -> Option<T> {
        if self.store.is_empty() {
            return None;
        }
        let min = self.store.swap_remove(0);
        self.index.remove(&min);
        self.mod_count += 1;

        if !self.store.is_empty() {
            let IndexedHeap {
                store, index, cmp, ..
            } = self;
            record_slot(index, &store[0], 0);
            sift_down(store, &*cmp, 0, |e, s| record_slot(index, e, s));
        }
        Some(min)
    }

    /// Returns true if an element equal to `key` is in the heap
    #[inline]
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(key)
    }

    /// Returns the stored element equal to `key`
    pub fn get_element<Q>(&self, key: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.get(key).map(|&slot| &self.store[slot])
    }

    /// Returns the current slot of the element equal to `key`
    pub fn position<Q>(&self, key: &Q) -> Option<usize>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.get(key).copied()
    }

    /// Returns the element at `slot` in store order.
    ///
    /// # Errors
    /// Returns [`HeapError::IndexOutOfBounds`] if `slot >= len()`.
    pub fn get(&self, slot: usize) -> Result<&T, HeapError> {
        self.store.get(slot).ok_or(HeapError::IndexOutOfBounds {
            index: slot,
            len: self.store.len(),
        })
    }

    /// Removes the element equal to `key`, returning whether it was present
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.take(key).is_some()
    }

    /// Removes and returns the element equal to `key`
    ///
    /// # Time Complexity
    /// O(log n).
    pub fn take<Q>(&mut self, key: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let slot = *self.index.get(key)?;
        Some(self.remove_at(slot).0)
    }

    /// Removes the element at `slot`.
    ///
    /// The last element is moved into the freed slot and sifted down, or up
    /// if it did not move down. When it ends up above `slot`, its final slot
    /// is returned alongside the removed element; a cursor that already
    /// visited the slots above needs to visit it separately.
    pub(crate) fn remove_at(&mut self, slot: usize) -> (T, Option<usize>) {
        let last = self.store.len() - 1;
        let removed = self.store.swap_remove(slot);
        self.index.remove(&removed);
        self.mod_count += 1;

        if slot == last {
            return (removed, None);
        }

        let IndexedHeap {
            store, index, cmp, ..
        } = self;
        record_slot(index, &store[slot], slot);
        if sift_down(store, &*cmp, slot, |e, s| record_slot(index, e, s)) == slot {
            let moved_to = sift_up(store, &*cmp, slot, |e, s| record_slot(index, e, s));
            if moved_to != slot {
                return (removed, Some(moved_to));
            }
        }
        (removed, None)
    }

    /// Re-positions the element equal to `key` after its priority changed.
    ///
    /// Use this when the comparator observes state outside the element
    /// (shared tables, `Cell`s). To change the element itself, use
    /// [`update`](Self::update).
    ///
    /// # Errors
    /// Returns [`HeapError::NotFound`] if no such element is present.
    pub fn adjust<Q>(&mut self, key: &Q) -> Result<(), HeapError>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let slot = *self.index.get(key).ok_or(HeapError::NotFound)?;
        self.repair(slot);
        Ok(())
    }

    /// Mutates the element equal to `key` in place, then re-positions it.
    ///
    /// This is the decrease-key (or increase-key) operation. The closure may
    /// change anything that affects ordering but must leave the element's
    /// identity (`Eq` and `Hash`) untouched.
    ///
    /// # Errors
    /// Returns [`HeapError::NotFound`] if no such element is present.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rust_indexed_heap::IndexedHeap;
    /// use std::hash::{Hash, Hasher};
    ///
    /// #[derive(Clone, Debug)]
    /// struct Task { id: u32, cost: u32 }
    /// impl PartialEq for Task {
    ///     fn eq(&self, other: &Self) -> bool { self.id == other.id }
    /// }
    /// impl Eq for Task {}
    /// impl Hash for Task {
    ///     fn hash<H: Hasher>(&self, state: &mut H) { self.id.hash(state) }
    /// }
    /// impl std::borrow::Borrow<u32> for Task {
    ///     fn borrow(&self) -> &u32 { &self.id }
    /// }
    ///
    /// let mut heap = IndexedHeap::with_comparator(|a: &Task, b: &Task| a.cost.cmp(&b.cost));
    /// heap.push(Task { id: 1, cost: 10 }).unwrap();
    /// heap.push(Task { id: 2, cost: 20 }).unwrap();
    ///
    /// heap.update(&2u32, |task| task.cost = 5).unwrap();
    /// assert_eq!(heap.peek().map(|t| t.id), Some(2));
    /// ```
    pub fn update<Q, F>(&mut self, key: &Q, f: F) -> Result<(), HeapError>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        F: FnOnce(&mut T),
    {
        let slot = *self.index.get(key).ok_or(HeapError::NotFound)?;
        f(&mut self.store[slot]);
        debug_assert_eq!(
            self.index.get::<T>(&self.store[slot]),
            Some(&slot),
            "update changed the identity of a heap element"
        );
        self.repair(slot);
        Ok(())
    }

    /// Sifts the element at `slot` up, or down if it did not move up.
    fn repair(&mut self, slot: usize) -> usize {
        self.mod_count += 1;
        let IndexedHeap {
            store, index, cmp, ..
        } = self;
        let moved_to = sift_up(store, &*cmp, slot, |e, s| record_slot(index, e, s));
        if moved_to != slot {
            return moved_to;
        }
        sift_down(store, &*cmp, slot, |e, s| record_slot(index, e, s))
    }

    /// Removes all elements
    pub fn clear(&mut self) {
        self.store.clear();
        self.index.clear();
        self.mod_count += 1;
    }

    /// Removes all elements, yielding them in store order
    pub fn drain(&mut self) -> std::vec::Drain<'_, T> {
        self.index.clear();
        self.mod_count += 1;
        self.store.drain(..)
    }

    /// Removes every element for which `pred` returns true, returning how many
    /// were removed.
    ///
    /// Runs in O(n): matching elements are marked in one pass, the survivors
    /// are compacted to the front of the store, and the store is heapified
    /// once. The heap is unchanged if `pred` panics.
    pub fn remove_if<F>(&mut self, mut pred: F) -> usize
    where
        F: FnMut(&T) -> bool,
    {
        let doomed: Vec<bool> = self.store.iter().map(|e| pred(e)).collect();
        let removed = doomed.iter().filter(|&&d| d).count();
        if removed == 0 {
            return 0;
        }

        let mut write = 0;
        for read in 0..self.store.len() {
            if doomed[read] {
                self.index.remove(&self.store[read]);
            } else {
                self.store.swap(write, read);
                write += 1;
            }
        }
        self.store.truncate(write);
        self.mod_count += 1;

        heapify(&mut self.store, &self.cmp);
        reindex(&self.store, &mut self.index);
        removed
    }

    /// Keeps only the elements for which `keep` returns true
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&T) -> bool,
    {
        self.remove_if(|e| !keep(e));
    }

    /// Removes every element that appears in `elements`, returning how many
    /// were removed
    pub fn remove_all<'a, I>(&mut self, elements: I) -> usize
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        let doomed: FxHashSet<&T> = elements.into_iter().collect();
        self.remove_if(|e| doomed.contains(e))
    }

    /// Removes every element that does not appear in `elements`, returning
    /// how many were removed
    pub fn retain_all<'a, I>(&mut self, elements: I) -> usize
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        let kept: FxHashSet<&T> = elements.into_iter().collect();
        self.remove_if(|e| !kept.contains(e))
    }

    /// Returns the elements in ascending order, leaving the heap untouched
    ///
    /// # Time Complexity
    /// O(n log n); sorts a clone of the store.
    pub fn to_sorted_vec(&self) -> Vec<T> {
        let mut sorted = self.store.clone();
        sort_heap(&mut sorted, &self.cmp);
        sorted
    }

    /// Consumes the heap, returning the elements in ascending order
    pub fn into_sorted_vec(self) -> Vec<T> {
        let mut sorted = self.store;
        sort_heap(&mut sorted, &self.cmp);
        sorted
    }

    /// Returns the elements in store order, for
    /// [`from_element_sequence`](IndexedHeap::from_element_sequence)
    pub fn to_element_sequence(&self) -> Vec<T> {
        self.store.clone()
    }

    /// Consumes the heap, returning the store in heap order
    pub fn into_vec(self) -> Vec<T> {
        self.store
    }

    /// Returns an iterator over the elements in store (heap) order
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.store)
    }

    /// Returns a detached cursor over the heap.
    ///
    /// Unlike [`iter`](Self::iter), the cursor does not borrow the heap, so it
    /// can remove the element it is on. See [`Cursor`].
    pub fn cursor(&self) -> Cursor<T> {
        Cursor::new(self.mod_count)
    }

    /// Returns a splitter over the whole heap. See [`Splitter`].
    pub fn splitter(&self) -> Splitter {
        Splitter::new()
    }

    /// Monotonic count of structural modifications
    pub fn modification_count(&self) -> u64 {
        self.mod_count
    }

    /// Reserves room for at least `additional` more elements.
    ///
    /// # Errors
    /// Returns [`HeapError::CapacityExhausted`] if the total would exceed the
    /// addressable limit.
    pub fn reserve(&mut self, additional: usize) -> Result<(), HeapError> {
        let required = self
            .store
            .len()
            .checked_add(additional)
            .ok_or(HeapError::CapacityExhausted {
                required: usize::MAX,
            })?;
        self.grow_to(required)
    }

    /// Shrinks the store and index as close to `len()` as possible
    pub fn shrink_to_fit(&mut self) {
        self.store.shrink_to_fit();
        self.index.shrink_to_fit();
    }

    fn reserve_for_push(&mut self) -> Result<(), HeapError> {
        if self.store.len() < self.store.capacity() {
            return Ok(());
        }
        let required = self.store.len() + 1;
        if self.store.capacity() == 0 {
            return self.grow_exact(required.max(growth::DEFAULT_INITIAL_CAPACITY));
        }
        self.grow_to(required)
    }

    fn grow_to(&mut self, required: usize) -> Result<(), HeapError> {
        let new_capacity = growth::grow_capacity::<T>(self.store.capacity(), required)?;
        self.grow_exact(new_capacity)
    }

    fn grow_exact(&mut self, new_capacity: usize) -> Result<(), HeapError> {
        let additional = new_capacity.saturating_sub(self.store.len());
        if self.store.try_reserve_exact(additional).is_err() {
            match Layout::array::<T>(new_capacity) {
                Ok(layout) => handle_alloc_error(layout),
                Err(_) => {
                    return Err(HeapError::CapacityExhausted {
                        required: new_capacity,
                    })
                }
            }
        }
        self.index
            .try_reserve(new_capacity.saturating_sub(self.index.len()))
            .map_err(|_| HeapError::CapacityExhausted {
                required: new_capacity,
            })
    }

    /// Checks heap order, index correctness and uniqueness.
    ///
    /// Panics with a description of the first violation found.
    #[doc(hidden)]
    pub fn assert_invariants(&self) {
        assert_eq!(
            self.index.len(),
            self.store.len(),
            "index size does not match store size"
        );
        for (slot, element) in self.store.iter().enumerate() {
            assert_eq!(
                self.index.get(element),
                Some(&slot),
                "index entry for slot {slot} is stale"
            );
            if slot > 0 {
                let parent = (slot - 1) / 2;
                assert!(
                    !self.cmp.compares_lt(element, &self.store[parent]),
                    "slot {slot} is smaller than its parent {parent}"
                );
            }
        }
    }
}

// ============================================================================
// Store helpers
// ============================================================================

/// Points the index entry of `element` at `slot`
#[inline]
fn record_slot<T: Hash + Eq>(index: &mut FxHashMap<T, usize>, element: &T, slot: usize) {
    match index.get_mut(element) {
        Some(entry) => *entry = slot,
        None => debug_assert!(false, "element missing from position index"),
    }
}

/// Rewrites every index entry from the store
fn reindex<T: Hash + Eq>(store: &[T], index: &mut FxHashMap<T, usize>) {
    for (slot, element) in store.iter().enumerate() {
        record_slot(index, element, slot);
    }
}

/// Moves `store[pos]` toward the root while it is smaller than its parent.
///
/// `moved` is told the new slot of every element that changes place.
/// Returns the final slot of the sifted element.
pub(crate) fn sift_up<T, C, F>(store: &mut [T], cmp: &C, mut pos: usize, mut moved: F) -> usize
where
    C: Compare<T>,
    F: FnMut(&T, usize),
{
    let start = pos;
    while pos > 0 {
        let parent = (pos - 1) / 2;
        if cmp.compares_lt(&store[pos], &store[parent]) {
            store.swap(pos, parent);
            moved(&store[pos], pos);
            pos = parent;
        } else {
            break;
        }
    }
    if pos != start {
        moved(&store[pos], pos);
    }
    pos
}

/// Moves `store[pos]` toward the leaves while a child is smaller.
///
/// At each level the smaller of the two children is the swap candidate.
/// Returns the final slot of the sifted element.
pub(crate) fn sift_down<T, C, F>(store: &mut [T], cmp: &C, mut pos: usize, mut moved: F) -> usize
where
    C: Compare<T>,
    F: FnMut(&T, usize),
{
    let start = pos;
    let len = store.len();
    loop {
        let left = 2 * pos + 1;
        if left >= len {
            break;
        }
        let right = left + 1;
        let child = if right < len && cmp.compares_lt(&store[right], &store[left]) {
            right
        } else {
            left
        };
        if cmp.compares_lt(&store[child], &store[pos]) {
            store.swap(pos, child);
            moved(&store[pos], pos);
            pos = child;
        } else {
            break;
        }
    }
    if pos != start {
        moved(&store[pos], pos);
    }
    pos
}

/// Restores heap order over an arbitrarily ordered store in O(n)
pub(crate) fn heapify<T, C: Compare<T>>(store: &mut [T], cmp: &C) {
    for pos in (0..store.len() / 2).rev() {
        sift_down(store, cmp, pos, |_, _| {});
    }
}

/// Sorts a heap-ordered store ascending.
///
/// Repeatedly swaps the root with the last unsorted slot and sifts down,
/// which leaves the store descending; one reversal finishes it.
fn sort_heap<T, C: Compare<T>>(store: &mut [T], cmp: &C) {
    for end in (1..store.len()).rev() {
        store.swap(0, end);
        sift_down(&mut store[..end], cmp, 0, |_, _| {});
    }
    store.reverse();
}
