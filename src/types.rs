//! Shared type definitions for block images.

use crate::consts::{LUMA_SUBPOSITIONS, NUM_BLOCK_TYPES};
use crate::error::{Error, Result};

// =============================================================================
// Color Channels
// =============================================================================

/// Color channel a block image belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum ColorChannel {
    /// Luminance
    #[default]
    Y = 0,
    /// Blue-difference chroma
    Cb = 1,
    /// Red-difference chroma
    Cr = 2,
    /// Black (CMYK/YCCK only)
    K = 3,
}

impl ColorChannel {
    /// All channels in component order.
    pub const ALL: [ColorChannel; NUM_BLOCK_TYPES] = [
        ColorChannel::Y,
        ColorChannel::Cb,
        ColorChannel::Cr,
        ColorChannel::K,
    ];

    /// Channel for component index `index`.
    pub fn from_index(index: usize) -> Result<Self> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(Error::InvalidComponentIndex(index))
    }

    /// Component index of this channel.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns true for the chroma channels.
    pub const fn is_chroma(self) -> bool {
        matches!(self, ColorChannel::Cb | ColorChannel::Cr)
    }
}

// =============================================================================
// Block Coordinates
// =============================================================================

/// Block position inside a channel's grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BlockCoord {
    /// Column in blocks
    pub x: u32,
    /// Row in blocks
    pub y: u32,
}

impl BlockCoord {
    /// Coordinate at column `x`, row `y`.
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Where to find the blocks a color prediction draws on.
///
/// One optional luma coordinate per sub-position of a
/// `LUMA_SUBPOSITIONS` x `LUMA_SUBPOSITIONS` table, plus one optional chroma
/// coordinate. Empty slots stay empty in the assembled context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BlockColorContextIndices {
    /// Luma block coordinates, `[row][col]`
    pub luminance_index: [[Option<BlockCoord>; LUMA_SUBPOSITIONS]; LUMA_SUBPOSITIONS],
    /// Chroma block coordinate
    pub chroma_index: Option<BlockCoord>,
}
