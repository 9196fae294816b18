//! Per-block neighbor statistics carried alongside a traversal.
//!
//! The entropy model reads the nonzero count of the block above and the
//! block to the left. Only two rows of summaries are ever live, so the
//! buffer is a ping-pong pair of `width`-long rows and the cursor indices
//! in [`BlockContext`](crate::BlockContext) alternate between the halves.

use crate::consts::SUMMARY_ROWS;
use crate::error::Result;
use crate::helpers::try_alloc_default;

/// Access to the nonzero coefficient count of a summary record.
///
/// This is the only part of a summary the storage layer relies on.
pub trait NonZeroCount {
    /// Number of nonzero coefficients recorded for the block.
    fn num_non_zeros(&self) -> u8;

    /// Records the number of nonzero coefficients for the block.
    fn set_num_non_zeros(&mut self, count: u8);
}

/// Minimal neighbor summary record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NeighborSummary {
    num_non_zeros: u8,
}

impl NeighborSummary {
    /// Summary with a zero count.
    #[must_use]
    pub const fn new() -> Self {
        Self { num_non_zeros: 0 }
    }
}

impl NonZeroCount for NeighborSummary {
    #[inline]
    fn num_non_zeros(&self) -> u8 {
        self.num_non_zeros
    }

    #[inline]
    fn set_num_non_zeros(&mut self, count: u8) {
        self.num_non_zeros = count;
    }
}

impl NonZeroCount for u8 {
    #[inline]
    fn num_non_zeros(&self) -> u8 {
        *self
    }

    #[inline]
    fn set_num_non_zeros(&mut self, count: u8) {
        *self = count;
    }
}

/// Allocates the two-row ping-pong summary buffer for a grid `width` blocks
/// wide.
pub fn new_summary_rows<S: Default + Clone>(width: u32) -> Result<Vec<S>> {
    try_alloc_default(width as usize * SUMMARY_ROWS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_count() {
        let mut s = NeighborSummary::new();
        assert_eq!(s.num_non_zeros(), 0);
        s.set_num_non_zeros(17);
        assert_eq!(s.num_non_zeros(), 17);
    }

    #[test]
    fn test_u8_summary() {
        let mut s = 0u8;
        s.set_num_non_zeros(3);
        assert_eq!(s.num_non_zeros(), 3);
    }

    #[test]
    fn test_new_summary_rows() {
        let rows: Vec<NeighborSummary> = new_summary_rows(5).unwrap();
        assert_eq!(rows.len(), 10);
        assert!(rows.iter().all(|s| s.num_non_zeros() == 0));
    }
}
