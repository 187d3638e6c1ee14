//! Capacity growth policy for the heap store
//!
//! The store grows by `max(min_growth, preferred_growth)` slots, where the
//! preferred growth roughly doubles small stores and adds 50% to large ones.
//! The result is clamped to a soft maximum a few slots below the hard limit
//! of what a `Vec<T>` can address; a request that cannot be met even at the
//! hard limit is reported as [`HeapError::CapacityExhausted`].
//!
//! | Current capacity | Preferred growth |
//! |------------------|------------------|
//! | `< 64`           | `capacity + 2`   |
//! | `>= 64`          | `capacity / 2`   |

use crate::error::HeapError;

/// Capacity of a heap created without an explicit capacity once it first grows
pub const DEFAULT_INITIAL_CAPACITY: usize = 11;

/// Headroom kept between the soft maximum and the hard limit
const SOFT_MAX_HEADROOM: usize = 8;

/// Largest number of `T`s a single allocation can hold
pub fn hard_max_capacity<T>() -> usize {
    let size = std::mem::size_of::<T>();
    if size == 0 {
        usize::MAX
    } else {
        isize::MAX as usize / size
    }
}

/// The capacity the policy prefers not to exceed
pub fn soft_max_capacity<T>() -> usize {
    hard_max_capacity::<T>().saturating_sub(SOFT_MAX_HEADROOM)
}

/// Preferred number of extra slots for a store of `capacity` slots
pub fn preferred_growth(capacity: usize) -> usize {
    if capacity < 64 {
        capacity + 2
    } else {
        capacity >> 1
    }
}

/// Computes the new capacity for a store that must hold `required` elements.
///
/// Returns `old_capacity` unchanged when it is already large enough.
pub fn grow_capacity<T>(old_capacity: usize, required: usize) -> Result<usize, HeapError> {
    if required <= old_capacity {
        return Ok(old_capacity);
    }
    new_length(
        old_capacity,
        required - old_capacity,
        preferred_growth(old_capacity),
        soft_max_capacity::<T>(),
        hard_max_capacity::<T>(),
    )
}

/// Core of the growth policy, with the limits passed explicitly.
///
/// `min_growth` must be positive.
pub fn new_length(
    old_length: usize,
    min_growth: usize,
    preferred_growth: usize,
    soft_max: usize,
    hard_max: usize,
) -> Result<usize, HeapError> {
    debug_assert!(min_growth > 0);

    if let Some(preferred) = old_length.checked_add(min_growth.max(preferred_growth)) {
        if preferred <= soft_max {
            return Ok(preferred);
        }
    }

    match old_length.checked_add(min_growth) {
        Some(min_length) if min_length <= soft_max => Ok(soft_max),
        Some(min_length) if min_length <= hard_max => Ok(min_length),
        Some(min_length) => Err(HeapError::CapacityExhausted {
            required: min_length,
        }),
        None => Err(HeapError::CapacityExhausted {
            required: usize::MAX,
        }),
    }
}
