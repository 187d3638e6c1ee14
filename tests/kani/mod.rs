//! Kani proof harnesses
//!
//! - `heap_proofs.rs`: push/pop/remove/update contracts on small heaps
//!
//! To run these proofs:
//!   cargo kani --tests

#[cfg(kani)]
#[path = "heap_proofs.rs"]
mod heap_proofs;
