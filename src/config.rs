//! Builder-style configuration for block images.

use crate::consts::RING_ROWS;
use crate::error::{Error, Result};
use crate::image::{storage_bytes, BlockBasedImage, BlockBasedImageBase, StreamingBlockImage};

/// Resource limits checked before any storage is allocated.
///
/// All limits default to 0 (disabled).
///
/// # Example
///
/// ```
/// use jpeg_block_image::{Limits, StorageConfig};
///
/// let limits = Limits::default()
///     .max_width(1024)
///     .max_alloc_bytes(1 << 20);
///
/// let image = StorageConfig::new(64, 64).limits(limits).build();
/// assert!(image.is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Limits {
    /// Maximum grid width in blocks (0 = unlimited)
    pub max_width: u32,
    /// Maximum grid height in blocks (0 = unlimited)
    pub max_height: u32,
    /// Maximum bytes of block storage (0 = unlimited)
    pub max_alloc_bytes: usize,
}

impl Limits {
    /// Set the maximum grid width in blocks.
    #[must_use]
    pub fn max_width(mut self, width: u32) -> Self {
        self.max_width = width;
        self
    }

    /// Set the maximum grid height in blocks.
    #[must_use]
    pub fn max_height(mut self, height: u32) -> Self {
        self.max_height = height;
        self
    }

    /// Set the maximum bytes of block storage.
    #[must_use]
    pub fn max_alloc_bytes(mut self, bytes: usize) -> Self {
        self.max_alloc_bytes = bytes;
        self
    }

    pub(crate) fn check_dimensions(&self, width: u32, height: u32) -> Result<()> {
        let too_wide = self.max_width != 0 && width > self.max_width;
        let too_tall = self.max_height != 0 && height > self.max_height;
        if too_wide || too_tall {
            return Err(Error::InvalidDimensions { width, height });
        }
        Ok(())
    }

    pub(crate) fn check_alloc(&self, bytes: usize) -> Result<()> {
        if self.max_alloc_bytes != 0 && bytes > self.max_alloc_bytes {
            return Err(Error::AllocationLimitExceeded {
                requested: bytes,
                limit: self.max_alloc_bytes,
            });
        }
        Ok(())
    }
}

/// Configuration for one channel's block image.
///
/// # Example
///
/// ```
/// use jpeg_block_image::StorageConfig;
///
/// // Full grid for random access
/// let image = StorageConfig::new(80, 60).build()?;
/// assert_eq!(image.blocks_allocated(), 80 * 60);
///
/// // Two-row ring for a single streaming pass
/// let streaming = StorageConfig::new(80, 60).build_streaming()?;
/// assert!(streaming.is_memory_optimized());
/// # Ok::<(), jpeg_block_image::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StorageConfig {
    width: u32,
    height: u32,
    /// Blocks to allocate in full layout (None = width * height)
    block_count: Option<u32>,
    memory_optimized: bool,
    allow_progressive: bool,
    limits: Limits,
}

impl StorageConfig {
    /// Configuration for a `width` x `height` grid of blocks, full layout.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            block_count: None,
            memory_optimized: false,
            allow_progressive: false,
            limits: Limits::default(),
        }
    }

    /// Number of blocks to allocate in full layout.
    ///
    /// Must not exceed `width * height`. Ignored by memory-optimized images.
    #[must_use]
    pub fn block_count(mut self, nblocks: u32) -> Self {
        self.block_count = Some(nblocks);
        self
    }

    /// Keep only the last few rows (single top-to-bottom pass).
    #[must_use]
    pub fn memory_optimized(mut self, enable: bool) -> Self {
        self.memory_optimized = enable;
        self
    }

    /// Progressive-mode toggle passed through to collaborators.
    #[must_use]
    pub fn allow_progressive(mut self, enable: bool) -> Self {
        self.allow_progressive = enable;
        self
    }

    /// Resource limits applied before allocation.
    #[must_use]
    pub fn limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Bytes of block storage this configuration would allocate.
    pub fn estimate_bytes(&self) -> usize {
        let blocks = if self.memory_optimized {
            self.width.saturating_mul(RING_ROWS)
        } else {
            self.block_count
                .unwrap_or_else(|| self.width.saturating_mul(self.height))
        };
        storage_bytes(blocks)
    }

    /// Builds and initializes an image with the configured layout.
    pub fn build(&self) -> Result<BlockBasedImage> {
        self.build_as(self.memory_optimized)
    }

    /// Builds an image that is memory-optimized by type.
    pub fn build_streaming(&self) -> Result<StreamingBlockImage> {
        self.build_as(true)
    }

    fn build_as<const F: bool>(&self, memory_optimized: bool) -> Result<BlockBasedImageBase<F>> {
        let nblocks = match self.block_count {
            Some(n) => n,
            None if memory_optimized || F => self.width.saturating_mul(self.height),
            None => self
                .width
                .checked_mul(self.height)
                .ok_or(Error::InvalidDimensions {
                    width: self.width,
                    height: self.height,
                })?,
        };
        let mut image = BlockBasedImageBase::<F>::new();
        image.init_with_limits(
            self.width,
            self.height,
            nblocks,
            memory_optimized,
            &self.limits,
        )?;
        image.set_allow_progressive(self.allow_progressive);
        Ok(image)
    }
}
