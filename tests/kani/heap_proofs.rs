//! Bounded proofs for IndexedHeap operations
//!
//! Each harness builds a heap from a handful of symbolic values and checks
//! the contract of one operation for every possible input up to the bound.

#[cfg(kani)]
use rust_indexed_heap::{HeapError, IndexedHeap};

/// Proof: Empty heap operations are safe
#[cfg(kani)]
#[kani::proof]
#[kani::unwind(5)]
fn verify_empty_heap_operations() {
    let mut heap: IndexedHeap<u8> = IndexedHeap::new();
    let probe: u8 = kani::any();

    assert!(heap.is_empty());
    assert!(heap.peek().is_none());
    assert!(heap.pop().is_none());
    assert!(!heap.contains(&probe));
    assert!(!heap.remove(&probe));
}

/// Proof: push either grows the heap by one or rejects a duplicate
#[cfg(kani)]
#[kani::proof]
#[kani::unwind(6)]
fn verify_push_is_set_insert() {
    let mut heap = IndexedHeap::new();
    let a: u8 = kani::any();
    let b: u8 = kani::any();

    assert!(heap.push(a).is_ok());
    let result = heap.push(b);
    if a == b {
        assert!(result == Err(HeapError::DuplicateElement));
        assert!(heap.len() == 1);
    } else {
        assert!(result.is_ok());
        assert!(heap.len() == 2);
    }
    assert!(heap.contains(&a) && heap.contains(&b));
}

/// Proof: peek is the minimum of three distinct values
#[cfg(kani)]
#[kani::proof]
#[kani::unwind(6)]
fn verify_peek_is_minimum() {
    let a: u8 = kani::any();
    let b: u8 = kani::any();
    let c: u8 = kani::any();
    kani::assume(a != b && b != c && a != c);

    let mut heap = IndexedHeap::new();
    heap.push(a).unwrap();
    heap.push(b).unwrap();
    heap.push(c).unwrap();

    let min = a.min(b).min(c);
    assert!(heap.peek() == Some(&min));
    assert!(heap.pop() == Some(min));
    assert!(!heap.contains(&min));
}

/// Proof: removing any present element keeps the others reachable
#[cfg(kani)]
#[kani::proof]
#[kani::unwind(6)]
fn verify_remove_arbitrary() {
    let a: u8 = kani::any();
    let b: u8 = kani::any();
    let c: u8 = kani::any();
    kani::assume(a != b && b != c && a != c);

    let mut heap = IndexedHeap::new();
    heap.push(a).unwrap();
    heap.push(b).unwrap();
    heap.push(c).unwrap();

    assert!(heap.remove(&b));
    assert!(heap.len() == 2);
    assert!(!heap.contains(&b));
    assert!(heap.position(&a).is_some());
    assert!(heap.position(&c).is_some());
    assert!(heap.pop() == Some(a.min(c)));
}
