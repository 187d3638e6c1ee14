//! `serde` support, enabled with the `serde` feature
//!
//! A heap serializes as `{ "len": n, "elements": [...] }` with the elements
//! in store order. Deserializing goes through
//! [`IndexedHeap::from_element_sequence`], so the element order does not have
//! to satisfy heap order, duplicates are rejected, and a `len` that does not
//! match the element count is an error.
//!
//! Only naturally ordered heaps can be deserialized directly; for a custom
//! comparator, deserialize a `Vec<T>` and call
//! [`IndexedHeap::from_element_sequence_with_comparator`].

use crate::indexed::IndexedHeap;
use compare::Compare;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::hash::Hash;

#[derive(Serialize)]
struct SnapshotRef<'a, T> {
    len: usize,
    elements: &'a [T],
}

#[derive(Deserialize)]
struct Snapshot<T> {
    len: usize,
    elements: Vec<T>,
}

impl<T, C> Serialize for IndexedHeap<T, C>
where
    T: Serialize + Hash + Eq + Clone,
    C: Compare<T>,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        SnapshotRef {
            len: self.len(),
            elements: self.as_slice(),
        }
        .serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for IndexedHeap<T>
where
    T: Deserialize<'de> + Ord + Hash + Clone,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let snapshot = Snapshot::<T>::deserialize(deserializer)?;
        if snapshot.len != snapshot.elements.len() {
            return Err(D::Error::invalid_length(
                snapshot.elements.len(),
                &format!("{} elements", snapshot.len).as_str(),
            ));
        }
        IndexedHeap::from_element_sequence(snapshot.elements).map_err(D::Error::custom)
    }
}
