//! Error type shared by every fallible heap operation
//!
//! Empty-queue access is not an error: `peek` and `pop` return `None` so
//! that callers can drive a search loop with `while let Some(..)`.

use std::fmt;

/// Error type for heap operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapError {
    /// An equal element is already in the heap; the heap was left unchanged
    DuplicateElement,
    /// The element is not in the heap
    NotFound,
    /// Slot access past the end of the store
    IndexOutOfBounds {
        /// The requested slot
        index: usize,
        /// The number of occupied slots
        len: usize,
    },
    /// The heap was structurally modified behind a cursor or splitter
    ConcurrentModification {
        /// Modification count recorded when the traversal started
        expected: u64,
        /// Modification count observed now
        found: u64,
    },
    /// `remove_current` was called without a current element
    NoCurrentElement,
    /// Growing the store would exceed the addressable array limit
    CapacityExhausted {
        /// The minimum capacity that was required
        required: usize,
    },
}

impl fmt::Display for HeapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeapError::DuplicateElement => write!(f, "element is already present in the heap"),
            HeapError::NotFound => write!(f, "element is not present in the heap"),
            HeapError::IndexOutOfBounds { index, len } => {
                write!(f, "index {index} out of bounds for heap of length {len}")
            }
            HeapError::ConcurrentModification { expected, found } => {
                write!(
                    f,
                    "heap was modified during traversal (expected modification count {expected}, found {found})"
                )
            }
            HeapError::NoCurrentElement => {
                write!(f, "cursor has no current element to remove")
            }
            HeapError::CapacityExhausted { required } => {
                write!(f, "required heap capacity {required} exceeds the addressable limit")
            }
        }
    }
}

impl std::error::Error for HeapError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            HeapError::IndexOutOfBounds { index: 4, len: 2 }.to_string(),
            "index 4 out of bounds for heap of length 2"
        );
        assert!(HeapError::ConcurrentModification {
            expected: 3,
            found: 5
        }
        .to_string()
        .contains("expected modification count 3, found 5"));
    }

    #[test]
    fn test_is_std_error() {
        fn takes_error(_: &dyn std::error::Error) {}
        takes_error(&HeapError::DuplicateElement);
    }
}
