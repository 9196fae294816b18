//! Color prediction context assembly.
//!
//! Gathers references to the luma and chroma blocks a color predictor looks
//! at. The gathering only happens with the `color-context` feature; without
//! it the assembled context carries the component id and nothing else, and
//! the block images are never touched.

use crate::aligned_block::AlignedBlock;
use crate::consts::{LUMA_SUBPOSITIONS, NUM_BLOCK_TYPES};
use crate::error::Result;
use crate::image::BlockBasedImage;
use crate::types::BlockColorContextIndices;
#[cfg(feature = "color-context")]
use crate::types::ColorChannel;

/// Blocks drawn on by a color prediction for one component.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockColorContext<'a> {
    /// Component being predicted
    pub color: u8,
    /// Luma blocks, `[row][col]`, `None` where no coordinate was given
    pub luminance: [[Option<&'a AlignedBlock>; LUMA_SUBPOSITIONS]; LUMA_SUBPOSITIONS],
    /// Chroma block, if a coordinate was given
    pub chroma: Option<&'a AlignedBlock>,
}

/// True if this build gathers color context blocks.
pub const fn color_context_enabled() -> bool {
    cfg!(feature = "color-context")
}

/// Assembles the color context for `component`.
///
/// Luma coordinates resolve against the [`ColorChannel::Y`] image, the chroma
/// coordinate against [`ColorChannel::Cb`]. Bounds are enforced by
/// [`at`](crate::BlockBasedImageBase::at) alone.
///
/// # Errors
/// Propagates [`Error::OutOfRange`](crate::Error::OutOfRange) from any
/// coordinate outside its image.
#[cfg(feature = "color-context")]
pub fn get_color_context_blocks<'a>(
    indices: &BlockColorContextIndices,
    channels: &'a [BlockBasedImage; NUM_BLOCK_TYPES],
    component: u8,
) -> Result<BlockColorContext<'a>> {
    let mut retval = BlockColorContext {
        color: component,
        ..Default::default()
    };

    let luma = &channels[ColorChannel::Y.index()];
    for (row, coords) in retval.luminance.iter_mut().zip(&indices.luminance_index) {
        for (slot, coord) in row.iter_mut().zip(coords) {
            if let Some(coord) = coord {
                *slot = Some(luma.at(coord.y, coord.x)?);
            }
        }
    }
    if let Some(coord) = indices.chroma_index {
        retval.chroma = Some(channels[ColorChannel::Cb.index()].at(coord.y, coord.x)?);
    }
    Ok(retval)
}

/// Assembles the color context for `component`.
///
/// Color context gathering is compiled out: only the component is set.
#[cfg(not(feature = "color-context"))]
pub fn get_color_context_blocks<'a>(
    _indices: &BlockColorContextIndices,
    _channels: &'a [BlockBasedImage; NUM_BLOCK_TYPES],
    component: u8,
) -> Result<BlockColorContext<'a>> {
    Ok(BlockColorContext {
        color: component,
        ..Default::default()
    })
}
