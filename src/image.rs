//! Block storage engine.
//!
//! [`BlockBasedImageBase`] owns the coefficient blocks of one color channel
//! and hands out [`BlockContext`] cursors for raster-order traversal.
//!
//! Two layouts share one interface:
//!
//! - **Full**: `nblocks` slots, block `(y, x)` lives at `y * width + x`.
//! - **Memory-optimized**: only [`RING_ROWS`] rows are kept and logical rows
//!   wrap onto them, so memory is `O(width)` whatever the image height.
//!
//! The layout is fixed by `init` and never re-decided afterwards. The
//! `FORCE_MEMORY_OPTIMIZED` parameter pins it at compile time, which lets
//! the optimizer drop the full-layout branches entirely.

use std::fmt;
use std::mem::size_of;

use log::{debug, warn};

use crate::aligned_block::AlignedBlock;
use crate::block_context::BlockContext;
use crate::config::Limits;
use crate::consts::{BLOCK_ALIGNMENT, RING_MASK, RING_ROWS};
use crate::error::{Error, Result};
use crate::helpers::try_alloc_default;

/// Block image whose layout is chosen at `init`.
pub type BlockBasedImage = BlockBasedImageBase<false>;

/// Block image that is always memory-optimized (ring of [`RING_ROWS`] rows).
pub type StreamingBlockImage = BlockBasedImageBase<true>;

/// Storage for one channel's grid of coefficient blocks.
///
/// Constructed empty, initialized exactly once with [`init`](Self::init),
/// and released on drop. Not `Clone`: the backing storage is exclusively
/// owned.
pub struct BlockBasedImageBase<const FORCE_MEMORY_OPTIMIZED: bool = false> {
    image: Vec<AlignedBlock>,
    width: u32,
    height: u32,
    nblocks: u32,
    memory_optimized_image: bool,
    allow_progressive: bool,
}

impl<const F: bool> Default for BlockBasedImageBase<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const F: bool> fmt::Debug for BlockBasedImageBase<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockBasedImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("nblocks", &self.nblocks)
            .field("memory_optimized", &self.is_memory_optimized())
            .field("allow_progressive", &self.allow_progressive)
            .finish()
    }
}

impl<const FORCE_MEMORY_OPTIMIZED: bool> BlockBasedImageBase<FORCE_MEMORY_OPTIMIZED> {
    /// Creates an empty, uninitialized image.
    #[must_use]
    pub fn new() -> Self {
        Self {
            image: Vec::new(),
            width: 0,
            height: 0,
            nblocks: 0,
            memory_optimized_image: FORCE_MEMORY_OPTIMIZED,
            allow_progressive: false,
        }
    }

    /// Allocates zeroed storage for a `width` x `height` grid.
    ///
    /// In full layout `nblocks` slots are allocated. In memory-optimized
    /// layout `nblocks` is only validated; [`RING_ROWS`]` * width` slots are
    /// allocated instead.
    ///
    /// # Errors
    /// - [`Error::InvalidDimensions`] for a zero width or height
    /// - [`Error::BlockCountExceedsGrid`] if `nblocks > width * height`
    /// - [`Error::AlreadyInitialized`] on a second call
    /// - [`Error::AllocationFailed`] if the allocation fails
    pub fn init(
        &mut self,
        width: u32,
        height: u32,
        nblocks: u32,
        memory_optimized_image: bool,
    ) -> Result<()> {
        self.init_with_limits(
            width,
            height,
            nblocks,
            memory_optimized_image,
            &Limits::default(),
        )
    }

    pub(crate) fn init_with_limits(
        &mut self,
        width: u32,
        height: u32,
        nblocks: u32,
        memory_optimized_image: bool,
        limits: &Limits,
    ) -> Result<()> {
        if FORCE_MEMORY_OPTIMIZED {
            debug_assert!(
                memory_optimized_image,
                "memory_optimized_image must match the forced layout"
            );
        }
        if self.width != 0 {
            warn!("block image re-initialized ({}x{})", width, height);
            return Err(Error::AlreadyInitialized);
        }
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        let capacity = u64::from(width) * u64::from(height);
        if u64::from(nblocks) > capacity {
            warn!(
                "requested {} blocks for a {}x{} grid",
                nblocks, width, height
            );
            return Err(Error::BlockCountExceedsGrid {
                requested: nblocks,
                capacity,
            });
        }
        limits.check_dimensions(width, height)?;

        let memory_optimized = FORCE_MEMORY_OPTIMIZED || memory_optimized_image;
        let block_count = if memory_optimized {
            width
                .checked_mul(RING_ROWS)
                .ok_or(Error::InvalidDimensions { width, height })?
        } else {
            nblocks
        };
        limits.check_alloc(storage_bytes(block_count))?;

        let image = try_alloc_default::<AlignedBlock>(block_count as usize)?;
        debug_assert_eq!(image.as_ptr() as usize % BLOCK_ALIGNMENT, 0);

        self.image = image;
        self.width = width;
        self.height = height;
        self.nblocks = block_count;
        self.memory_optimized_image = memory_optimized;

        debug!(
            "block image {}x{}: {} blocks, {} bytes, memory_optimized={}",
            width,
            height,
            block_count,
            self.bytes_allocated(),
            memory_optimized
        );
        Ok(())
    }

    pub(crate) fn set_allow_progressive(&mut self, allow: bool) {
        self.allow_progressive = allow;
    }

    /// True if only the last [`RING_ROWS`] rows are retained.
    #[inline(always)]
    pub fn is_memory_optimized(&self) -> bool {
        FORCE_MEMORY_OPTIMIZED || self.memory_optimized_image
    }

    /// Bytes reserved for block storage, alignment slack included.
    pub fn bytes_allocated(&self) -> usize {
        storage_bytes(self.nblocks)
    }

    /// Number of block slots in the backing storage.
    pub fn blocks_allocated(&self) -> usize {
        self.nblocks as usize
    }

    /// Grid width in blocks.
    #[inline]
    pub fn block_width(&self) -> u32 {
        self.width
    }

    /// Grid height in blocks (informational in memory-optimized layout).
    #[inline]
    pub fn block_height(&self) -> u32 {
        self.height
    }

    /// Progressive-mode toggle carried for collaborators. Not interpreted
    /// by the storage engine.
    #[inline]
    pub fn allow_progressive(&self) -> bool {
        self.allow_progressive
    }

    // ------------------------------------------------------------------
    // Cursors
    // ------------------------------------------------------------------

    /// Cursor at the first block with no block above.
    ///
    /// `summary_start` is the offset of the two-row summary buffer inside
    /// the caller's summary slice (normally 0).
    pub fn begin(&self, summary_start: usize) -> BlockContext {
        BlockContext {
            cur: 0,
            above: None,
            num_nonzeros_here: summary_start,
            num_nonzeros_above: summary_start + self.width as usize,
            summary_base: summary_start,
            x: 0,
            y: 0,
        }
    }

    /// Cursor at the first block of logical row `y`.
    pub fn off_y(&self, y: u32, summary_start: usize) -> BlockContext {
        let width = self.width;
        let (cur, above) = if self.is_memory_optimized() {
            (
                width * (y & RING_MASK),
                Some(width * (y.wrapping_add(RING_MASK) & RING_MASK)),
            )
        } else if y != 0 {
            (width.saturating_mul(y), Some(width.saturating_mul(y - 1)))
        } else {
            (0, None)
        };

        let mut ctx = BlockContext {
            cur,
            above,
            num_nonzeros_here: summary_start,
            num_nonzeros_above: summary_start,
            summary_base: summary_start,
            x: 0,
            y,
        };
        ctx.realign_summaries(width);
        ctx
    }

    /// Advances `ctx` by one block in raster order and returns the new
    /// position as an image-relative linear offset (`y * width + x`).
    ///
    /// Pass `has_left = false` when the block being moved onto has no left
    /// neighbor. Crossing a row boundary (or `has_left = false`) realigns the
    /// summary indices with the new row's half of the ping-pong buffer, so
    /// they never read the previous row's tail.
    #[inline]
    pub fn next(&self, ctx: &mut BlockContext, has_left: bool) -> u32 {
        let width = self.width;
        ctx.cur = ctx.cur.wrapping_add(1);
        ctx.x += 1;
        let new_row = ctx.x >= width;
        if new_row {
            ctx.x = 0;
            ctx.y = ctx.y.wrapping_add(1);
        }

        let retval = if self.is_memory_optimized() {
            if ctx.cur == self.nblocks {
                ctx.cur = 0;
            }
            ctx.y.wrapping_mul(width).wrapping_add(ctx.x)
        } else {
            ctx.cur
        };

        ctx.above = if ctx.cur < width {
            if self.is_memory_optimized() {
                Some(ctx.cur + RING_MASK * width)
            } else {
                None
            }
        } else {
            Some(ctx.cur - width)
        };

        ctx.num_nonzeros_here += 1;
        ctx.num_nonzeros_above += 1;
        if new_row || !has_left {
            ctx.realign_summaries(width);
        }
        retval
    }

    // ------------------------------------------------------------------
    // Cursor resolution
    // ------------------------------------------------------------------

    /// Current block of `ctx`.
    #[inline]
    pub fn here(&self, ctx: &BlockContext) -> Result<&AlignedBlock> {
        self.slot(ctx.cur)
    }

    /// Mutable current block of `ctx`.
    #[inline]
    pub fn here_mut(&mut self, ctx: &BlockContext) -> Result<&mut AlignedBlock> {
        self.slot_mut(ctx.cur)
    }

    /// Block above the current block of `ctx`, if there is one.
    #[inline]
    pub fn above(&self, ctx: &BlockContext) -> Result<Option<&AlignedBlock>> {
        ctx.above.map(|index| self.slot(index)).transpose()
    }

    // ------------------------------------------------------------------
    // Random access
    // ------------------------------------------------------------------

    /// Block at logical row `y`, column `x`.
    ///
    /// # Errors
    /// [`Error::OutOfRange`] if `x >= width`, or (full layout) if the block
    /// lies beyond the allocated slots. Memory-optimized rows always wrap.
    #[inline]
    pub fn at(&self, y: u32, x: u32) -> Result<&AlignedBlock> {
        let index = self.index_of(y, x)?;
        self.slot(index)
    }

    /// Mutable block at logical row `y`, column `x`.
    #[inline]
    pub fn at_mut(&mut self, y: u32, x: u32) -> Result<&mut AlignedBlock> {
        let index = self.index_of(y, x)?;
        self.slot_mut(index)
    }

    /// Block at linear offset `offset` (`y * width + x`).
    ///
    /// Memory-optimized offsets wrap modulo the ring size.
    #[inline]
    pub fn raster(&self, offset: u32) -> Result<&AlignedBlock> {
        let index = self.raster_index(offset)?;
        self.slot(index)
    }

    /// Mutable block at linear offset `offset`.
    #[inline]
    pub fn raster_mut(&mut self, offset: u32) -> Result<&mut AlignedBlock> {
        let index = self.raster_index(offset)?;
        self.slot_mut(index)
    }

    #[inline(always)]
    fn index_of(&self, y: u32, x: u32) -> Result<u32> {
        if x >= self.width {
            return Err(Error::OutOfRange {
                index: u64::from(x),
                limit: u64::from(self.width),
            });
        }
        if self.is_memory_optimized() {
            return Ok(x + (y & RING_MASK) * self.width);
        }
        let index = u64::from(y) * u64::from(self.width) + u64::from(x);
        if index >= u64::from(self.nblocks) {
            return Err(Error::OutOfRange {
                index,
                limit: u64::from(self.nblocks),
            });
        }
        Ok(index as u32)
    }

    #[inline(always)]
    fn raster_index(&self, offset: u32) -> Result<u32> {
        if self.is_memory_optimized() {
            let index = offset.checked_rem(self.nblocks).ok_or(Error::OutOfRange {
                index: u64::from(offset),
                limit: 0,
            })?;
            debug_assert!(index < self.nblocks);
            return Ok(index);
        }
        if offset >= self.nblocks {
            return Err(Error::OutOfRange {
                index: u64::from(offset),
                limit: u64::from(self.nblocks),
            });
        }
        Ok(offset)
    }

    #[inline(always)]
    fn slot(&self, index: u32) -> Result<&AlignedBlock> {
        let limit = self.image.len() as u64;
        self.image.get(index as usize).ok_or(Error::OutOfRange {
            index: u64::from(index),
            limit,
        })
    }

    #[inline(always)]
    fn slot_mut(&mut self, index: u32) -> Result<&mut AlignedBlock> {
        let limit = self.image.len() as u64;
        self.image.get_mut(index as usize).ok_or(Error::OutOfRange {
            index: u64::from(index),
            limit,
        })
    }
}

/// Bytes reported for `block_count` slots, including alignment slack.
#[inline]
pub(crate) const fn storage_bytes(block_count: u32) -> usize {
    BLOCK_ALIGNMENT + block_count as usize * size_of::<AlignedBlock>()
}
