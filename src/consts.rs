//! Block geometry and storage constants.

/// Width/height of a DCT block in coefficients.
pub const DCTSIZE: usize = 8;

/// Number of coefficients in a DCT block (64).
pub const DCTSIZE2: usize = DCTSIZE * DCTSIZE;

/// Required alignment of every block slot, in bytes.
pub const BLOCK_ALIGNMENT: usize = 32;

/// Number of physical block rows kept by a memory-optimized image.
///
/// Two rows are enough for a top-to-bottom pass that only looks at the
/// row above. The `ring-depth-4` feature keeps four.
#[cfg(not(feature = "ring-depth-4"))]
pub const RING_ROWS: u32 = 2;

/// Number of physical block rows kept by a memory-optimized image.
#[cfg(feature = "ring-depth-4")]
pub const RING_ROWS: u32 = 4;

/// Mask equivalent of `% RING_ROWS` (RING_ROWS is a power of two).
pub const RING_MASK: u32 = RING_ROWS - 1;

/// Number of rows in the neighbor summary ping-pong buffer.
pub const SUMMARY_ROWS: usize = 2;

/// Number of color channels a block image set can hold (Y, Cb, Cr, K).
pub const NUM_BLOCK_TYPES: usize = 4;

/// Side of the luma sub-position table used by color prediction.
pub const LUMA_SUBPOSITIONS: usize = 4;
