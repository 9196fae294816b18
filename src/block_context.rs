//! Traversal cursor over a block image.
//!
//! A [`BlockContext`] is plain data: block indices into the image that
//! created it and indices into the caller's neighbor summary buffer. It
//! borrows nothing, so the image stays freely usable while a cursor is held;
//! every dereference goes back through the image and is bounds checked.

use crate::neighbor_summary::NonZeroCount;

/// Cursor bundling the current block, the block above it and the neighbor
/// summary slots for the current and previous rows.
///
/// Created by [`begin`](crate::BlockBasedImageBase::begin) or
/// [`off_y`](crate::BlockBasedImageBase::off_y) and advanced with
/// [`next`](crate::BlockBasedImageBase::next).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockContext {
    pub(crate) cur: u32,
    pub(crate) above: Option<u32>,
    pub(crate) num_nonzeros_here: usize,
    pub(crate) num_nonzeros_above: usize,
    pub(crate) summary_base: usize,
    pub(crate) x: u32,
    pub(crate) y: u32,
}

impl BlockContext {
    /// Physical slot of the current block.
    #[inline]
    pub fn cur_index(&self) -> u32 {
        self.cur
    }

    /// Physical slot of the block above, `None` on the first row of a
    /// fully materialized image.
    #[inline]
    pub fn above_index(&self) -> Option<u32> {
        self.above
    }

    /// Logical column of the current block.
    #[inline]
    pub fn x(&self) -> u32 {
        self.x
    }

    /// Logical row of the current block.
    #[inline]
    pub fn y(&self) -> u32 {
        self.y
    }

    /// Index of the current block's slot in the summary buffer.
    #[inline]
    pub fn summary_here_index(&self) -> usize {
        self.num_nonzeros_here
    }

    /// Index of the above block's slot in the summary buffer.
    #[inline]
    pub fn summary_above_index(&self) -> usize {
        self.num_nonzeros_above
    }

    /// Summary record for the current block.
    ///
    /// # Panics
    /// If `summaries` is shorter than the two-row buffer the cursor was
    /// created for.
    #[inline]
    pub fn neighbor_context_here<'a, S>(&self, summaries: &'a mut [S]) -> &'a mut S {
        &mut summaries[self.num_nonzeros_here]
    }

    /// Summary record for the block above.
    ///
    /// # Panics
    /// If `summaries` is shorter than the two-row buffer the cursor was
    /// created for.
    #[inline]
    pub fn neighbor_context_above<'a, S>(&self, summaries: &'a [S]) -> &'a S {
        &summaries[self.num_nonzeros_above]
    }

    /// Summary record for the block to the left, `None` in the first column.
    #[inline]
    pub fn neighbor_context_left<'a, S>(&self, summaries: &'a [S]) -> Option<&'a S> {
        if self.x == 0 {
            None
        } else {
            Some(&summaries[self.num_nonzeros_here - 1])
        }
    }

    /// Nonzero count recorded for the current block.
    #[inline]
    pub fn non_zeros_here<S: NonZeroCount>(&self, summaries: &[S]) -> u8 {
        summaries[self.num_nonzeros_here].num_non_zeros()
    }

    /// Nonzero count recorded for the block above.
    #[inline]
    pub fn non_zeros_above<S: NonZeroCount>(&self, summaries: &[S]) -> u8 {
        summaries[self.num_nonzeros_above].num_non_zeros()
    }

    /// Realigns both summary indices with the start of logical row `y`'s
    /// ping-pong halves, offset by the current column.
    #[inline]
    pub(crate) fn realign_summaries(&mut self, width: u32) {
        let width = width as usize;
        let row_start = self.summary_base + (self.y as usize & 1) * width;
        let other_start = self.summary_base + (!self.y as usize & 1) * width;
        self.num_nonzeros_here = row_start + self.x as usize;
        self.num_nonzeros_above = other_start + self.x as usize;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::neighbor_summary::NeighborSummary;

    fn ctx_at(x: u32, y: u32, width: u32) -> BlockContext {
        let mut ctx = BlockContext {
            cur: 0,
            above: None,
            num_nonzeros_here: 0,
            num_nonzeros_above: 0,
            summary_base: 0,
            x,
            y,
        };
        ctx.realign_summaries(width);
        ctx
    }

    #[test]
    fn test_realign_even_row() {
        let ctx = ctx_at(2, 4, 5);
        assert_eq!(ctx.summary_here_index(), 2);
        assert_eq!(ctx.summary_above_index(), 7);
    }

    #[test]
    fn test_realign_odd_row() {
        let ctx = ctx_at(0, 3, 5);
        assert_eq!(ctx.summary_here_index(), 5);
        assert_eq!(ctx.summary_above_index(), 0);
    }

    #[test]
    fn test_summary_accessors() {
        let mut summaries = vec![NeighborSummary::new(); 8];
        let ctx = ctx_at(1, 1, 4);

        ctx.neighbor_context_here(&mut summaries)
            .set_num_non_zeros(9);
        summaries[1].set_num_non_zeros(4);

        assert_eq!(ctx.non_zeros_here(&summaries), 9);
        assert_eq!(ctx.non_zeros_above(&summaries), 4);
        assert_eq!(
            ctx.neighbor_context_left(&summaries)
                .map(|s| s.num_non_zeros()),
            Some(0)
        );
        assert!(ctx_at(0, 1, 4).neighbor_context_left(&summaries).is_none());
    }
}
