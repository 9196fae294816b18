//! # jpeg-block-image
//!
//! Block storage for DCT-coefficient image codecs.
//!
//! A [`BlockBasedImage`] holds one color channel's grid of 8x8 coefficient
//! blocks and hands out [`BlockContext`] cursors that walk the grid in
//! raster order, tracking the block above and the neighbor summary slots
//! an entropy model reads.
//!
//! Two layouts share one interface:
//!
//! - **Full** - every block of the grid is kept, random access anywhere
//! - **Memory-optimized** - only the last few rows are kept in a ring, for a
//!   single top-to-bottom pass over images too large to materialize
//!
//! ## Quick Start
//!
//! ```
//! use jpeg_block_image::{new_summary_rows, NeighborSummary, NonZeroCount, StorageConfig};
//!
//! # fn main() -> Result<(), jpeg_block_image::Error> {
//! let (width, height) = (40, 30);
//! let mut image = StorageConfig::new(width, height)
//!     .memory_optimized(true)
//!     .build()?;
//! let mut summaries: Vec<NeighborSummary> = new_summary_rows(width)?;
//!
//! for y in 0..height {
//!     let mut ctx = image.off_y(y, 0);
//!     for x in 0..width {
//!         let block = image.here_mut(&ctx)?;
//!         block.set_dc((x + y) as i16);
//!         let count = block.count_non_zeros_7x7();
//!         ctx.neighbor_context_here(&mut summaries).set_num_non_zeros(count);
//!         image.next(&mut ctx, x + 1 < width);
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Random Access
//!
//! ```
//! use jpeg_block_image::{BlockBasedImage, Error};
//!
//! # fn main() -> Result<(), Error> {
//! let mut image = BlockBasedImage::new();
//! image.init(4, 2, 8, false)?;
//!
//! image.at_mut(1, 3)?.set_dc(12);
//! assert_eq!(image.raster(7)?.get_dc(), 12);
//! assert!(matches!(image.at(0, 4), Err(Error::OutOfRange { .. })));
//! # Ok(())
//! # }
//! ```
//!
//! ## Cargo Features
//!
//! | Feature | Effect |
//! |---------|--------|
//! | `ring-depth-4` | Memory-optimized images keep 4 rows instead of 2 |
//! | `color-context` | [`get_color_context_blocks`] gathers luma/chroma blocks |

#![deny(unsafe_code)]
#![warn(missing_docs)]

/// Fixed-size aligned coefficient block.
pub mod aligned_block;

/// Traversal cursor.
pub mod block_context;

/// Color prediction context assembly.
pub mod color_context;

/// Builder configuration and limits.
pub mod config;

/// Block geometry and storage constants.
pub mod consts;

/// Block storage engine.
pub mod image;

/// Neighbor summary records.
pub mod neighbor_summary;

/// Channel and coordinate types.
pub mod types;

mod error;
mod helpers;

pub use aligned_block::AlignedBlock;
pub use block_context::BlockContext;
pub use color_context::{color_context_enabled, get_color_context_blocks, BlockColorContext};
pub use config::{Limits, StorageConfig};
pub use consts::{DCTSIZE2, RING_ROWS};
pub use image::{BlockBasedImage, BlockBasedImageBase, StreamingBlockImage};
pub use neighbor_summary::{new_summary_rows, NeighborSummary, NonZeroCount};
pub use types::{BlockColorContextIndices, BlockCoord, ColorChannel};

/// Error type for block storage operations.
///
/// # Example
///
/// ```
/// use jpeg_block_image::{BlockBasedImage, Error};
///
/// let mut image = BlockBasedImage::new();
/// match image.init(4, 2, 9, false) {
///     Err(Error::BlockCountExceedsGrid { requested, capacity }) => {
///         eprintln!("{} blocks do not fit in {}", requested, capacity);
///     }
///     other => panic!("unexpected: {:?}", other),
/// }
/// ```
pub use error::Error;

/// Result type alias for block storage operations.
pub use error::Result;
