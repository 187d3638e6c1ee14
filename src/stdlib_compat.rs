//! Standard library trait implementations for [`IndexedHeap`]
//!
//! Collection conversions follow `HashSet`: building a heap from an iterator
//! or a `Vec` silently keeps the first of any equal elements, while
//! [`IndexedHeap::from_element_sequence`] rejects them.
//!
//! # Equality
//!
//! Two heaps are equal when they hold the same set of elements. The store
//! layout, the insertion order and the comparator play no part; two heaps
//! filled in different orders compare equal.
//!
//! ```rust
//! use rust_indexed_heap::IndexedHeap;
//!
//! let a: IndexedHeap<i32> = vec![3, 1, 2].into();
//! let b: IndexedHeap<i32> = [2, 3, 1, 3].into_iter().collect();
//! assert_eq!(a, b);
//! ```

use crate::cursor::Iter;
use crate::error::HeapError;
use crate::indexed::IndexedHeap;
use compare::{natural, Compare};
use std::fmt;
use std::hash::Hash;

impl<T: Ord + Hash + Clone> Default for IndexedHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord + Hash + Clone> FromIterator<T> for IndexedHeap<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        IndexedHeap::from_unique_iter(iter, natural())
    }
}

impl<T: Ord + Hash + Clone> From<Vec<T>> for IndexedHeap<T> {
    fn from(elements: Vec<T>) -> Self {
        IndexedHeap::from_unique_iter(elements, natural())
    }
}

impl<T: Ord + Hash + Clone, const N: usize> From<[T; N]> for IndexedHeap<T> {
    fn from(elements: [T; N]) -> Self {
        IndexedHeap::from_unique_iter(elements, natural())
    }
}

/// Duplicates are skipped.
///
/// # Panics
/// Panics if the store cannot grow, like `Vec::extend`.
impl<T: Hash + Eq + Clone, C: Compare<T>> Extend<T> for IndexedHeap<T, C> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            match self.push(element) {
                Ok(()) | Err(HeapError::DuplicateElement) => {}
                Err(err) => panic!("{err}"),
            }
        }
    }
}

impl<T: Hash + Eq + Clone, C: Compare<T>> IntoIterator for IndexedHeap<T, C> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    /// Consumes the heap, yielding elements in store order
    fn into_iter(self) -> Self::IntoIter {
        self.into_vec().into_iter()
    }
}

impl<'a, T: Hash + Eq + Clone, C: Compare<T>> IntoIterator for &'a IndexedHeap<T, C> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, C1, C2> PartialEq<IndexedHeap<T, C2>> for IndexedHeap<T, C1>
where
    T: Hash + Eq + Clone,
    C1: Compare<T>,
    C2: Compare<T>,
{
    fn eq(&self, other: &IndexedHeap<T, C2>) -> bool {
        self.len() == other.len() && self.iter().all(|element| other.contains(element))
    }
}

impl<T: Hash + Eq + Clone, C: Compare<T>> Eq for IndexedHeap<T, C> {}

impl<T: fmt::Debug, C> fmt::Debug for IndexedHeap<T, C>
where
    T: Hash + Eq + Clone,
    C: Compare<T>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_iter_skips_duplicates() {
        let heap: IndexedHeap<i32> = [5, 1, 5, 3, 1].into_iter().collect();
        assert_eq!(heap.len(), 3);
        heap.assert_invariants();
        assert_eq!(heap.into_sorted_vec(), vec![1, 3, 5]);
    }

    #[test]
    fn test_extend_skips_duplicates() {
        let mut heap: IndexedHeap<i32> = IndexedHeap::new();
        heap.extend([4, 2, 4, 9]);
        heap.extend(vec![2, 1]);
        heap.assert_invariants();
        assert_eq!(heap.to_sorted_vec(), vec![1, 2, 4, 9]);
    }

    #[test]
    fn test_equality_ignores_layout() {
        let mut a = IndexedHeap::new();
        let mut b = IndexedHeap::new();
        for x in [1, 2, 3, 4, 5] {
            a.push(x).unwrap();
        }
        for x in [5, 4, 3, 2, 1] {
            b.push(x).unwrap();
        }
        assert_ne!(a.as_slice(), b.as_slice());
        assert_eq!(a, b);

        b.remove(&3);
        assert_ne!(a, b);
    }

    #[test]
    fn test_equality_ignores_comparator() {
        let natural: IndexedHeap<i32> = (0..5).collect();
        let mut reversed = IndexedHeap::with_comparator(|a: &i32, b: &i32| b.cmp(a));
        reversed.extend(0..5);
        assert!(natural == reversed);
    }

    #[test]
    fn test_into_iter_by_ref_and_value() {
        let heap: IndexedHeap<i32> = (0..4).collect();
        let mut by_ref: Vec<i32> = (&heap).into_iter().copied().collect();
        by_ref.sort();
        assert_eq!(by_ref, vec![0, 1, 2, 3]);

        let mut by_value: Vec<i32> = heap.into_iter().collect();
        by_value.sort();
        assert_eq!(by_value, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_debug_as_set() {
        let heap: IndexedHeap<i32> = vec![1].into();
        assert_eq!(format!("{heap:?}"), "{1}");
        assert_eq!(IndexedHeap::<i32>::default().len(), 0);
    }
}
