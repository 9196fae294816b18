//! Allocation helpers shared by the block image and summary buffers.

use crate::error::Result;

/// Allocates a Vec filled with `value`, failing instead of aborting.
/// Returns Error::AllocationFailed if the reservation fails.
#[inline]
pub(crate) fn try_alloc_vec<T: Clone>(value: T, len: usize) -> Result<Vec<T>> {
    let mut v = Vec::new();
    v.try_reserve_exact(len)?;
    v.resize(len, value);
    Ok(v)
}

/// Allocates `len` default (zeroed) values with fallible allocation.
#[inline]
pub(crate) fn try_alloc_default<T: Default + Clone>(len: usize) -> Result<Vec<T>> {
    try_alloc_vec(T::default(), len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_try_alloc_vec() {
        let v = try_alloc_vec(7u8, 5).unwrap();
        assert_eq!(v, vec![7u8; 5]);
        assert_eq!(v.capacity(), 5);
    }

    #[test]
    fn test_try_alloc_default_zeroed() {
        let v: Vec<u32> = try_alloc_default(3).unwrap();
        assert_eq!(v, vec![0, 0, 0]);
    }

    #[test]
    fn test_try_alloc_failure() {
        let result = try_alloc_vec(0u64, usize::MAX / 4);
        assert_eq!(result.unwrap_err(), Error::AllocationFailed);
    }
}
