//! Set-backed indexed priority queue for Rust
//!
//! This crate provides [`IndexedHeap`], an array binary min-heap paired with a
//! position index. The index maps every element to its slot, which gives:
//!
//! - **O(1) membership**: `contains` is a hash lookup, and inserting an
//!   element that is already present is rejected
//! - **O(log n) removal of any element**, not just the minimum
//! - **O(log n) decrease-key / increase-key** through `update` and `adjust`,
//!   the operation Dijkstra and A* need
//! - **O(n) bulk operations**: bulk loading and predicate removal heapify once
//!   instead of paying O(log n) per element
//!
//! On top of the heap, the [`pathfinding`] module runs Dijkstra's algorithm and
//! A* search with a decrease-key frontier.
//!
//! # Example
//!
//! ```rust
//! use rust_indexed_heap::{HeapError, IndexedHeap};
//!
//! let mut heap = IndexedHeap::new();
//! heap.push(5).unwrap();
//! heap.push(2).unwrap();
//! assert_eq!(heap.push(5), Err(HeapError::DuplicateElement));
//!
//! assert!(heap.contains(&5));
//! assert!(heap.remove(&5));
//! assert!(!heap.contains(&5));
//! assert_eq!(heap.pop(), Some(2));
//! ```
//!
//! # Cargo features
//!
//! - `serde`: `Serialize`/`Deserialize` for [`IndexedHeap`]

pub mod cursor;
pub mod error;
pub mod growth;
pub mod indexed;
pub mod pathfinding;
#[cfg(feature = "serde")]
pub mod serde_impl;
pub mod split;
pub mod stdlib_compat;

// Re-export the main types for convenience
pub use compare;
pub use cursor::{Cursor, Iter};
pub use error::HeapError;
pub use indexed::IndexedHeap;
pub use split::{Characteristics, Splitter};
