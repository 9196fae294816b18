//! Property-based tests for block image addressing and traversal.
//!
//! Uses proptest to check the addressing laws over random grid shapes.

use jpeg_block_image::{AlignedBlock, BlockBasedImage, StorageConfig, RING_ROWS};
use proptest::prelude::*;

fn addr(block: &AlignedBlock) -> usize {
    block as *const AlignedBlock as usize
}

fn ring(width: u32, height: u32) -> BlockBasedImage {
    StorageConfig::new(width, height)
        .memory_optimized(true)
        .build()
        .unwrap()
}

proptest! {
    #[test]
    fn prop_ring_raster_is_pure_modulus(width in 1u32..64, offset in any::<u32>()) {
        let image = ring(width, 8);
        let wrapped = offset % (RING_ROWS * width);
        prop_assert_eq!(
            addr(image.raster(offset).unwrap()),
            addr(image.raster(wrapped).unwrap())
        );
        // Wrapping twice changes nothing
        prop_assert_eq!(
            addr(image.raster(wrapped).unwrap()),
            addr(image.raster(wrapped % (RING_ROWS * width)).unwrap())
        );
    }

    #[test]
    fn prop_ring_at_accepts_any_row(width in 1u32..64, y in any::<u32>(), x in 0u32..64) {
        let image = ring(width, 8);
        let result = image.at(y, x);
        if x < width {
            let block = result.unwrap();
            prop_assert_eq!(addr(block), addr(image.at(y % RING_ROWS, x).unwrap()));
        } else {
            prop_assert!(result.is_err());
        }
    }

    #[test]
    fn prop_full_at_matches_raster(
        width in 1u32..32,
        height in 1u32..32,
        y in 0u32..40,
        x in 0u32..40,
    ) {
        let image = StorageConfig::new(width, height).build().unwrap();
        let result = image.at(y, x);
        if x < width && y < height {
            let linear = y * width + x;
            prop_assert_eq!(addr(result.unwrap()), addr(image.raster(linear).unwrap()));
        } else {
            prop_assert!(result.is_err());
        }
    }

    #[test]
    fn prop_next_visits_row_major(
        width in 1u32..24,
        rows in 1u32..24,
        memory_optimized in any::<bool>(),
    ) {
        let image = StorageConfig::new(width, rows)
            .memory_optimized(memory_optimized)
            .build()
            .unwrap();
        let mut ctx = image.begin(0);
        let mut expected = 0u32;
        for y in 0..rows {
            for x in 0..width {
                prop_assert_eq!(
                    addr(image.here(&ctx).unwrap()),
                    addr(image.at(y, x).unwrap())
                );
                let offset = image.next(&mut ctx, x + 1 < width);
                expected += 1;
                prop_assert_eq!(offset, expected);
            }
        }
    }

    #[test]
    fn prop_summaries_stay_in_buffer(width in 1u32..24, rows in 1u32..24, start in 0usize..16) {
        let image = StorageConfig::new(width, rows).build_streaming().unwrap();
        let mut ctx = image.off_y(0, start);
        let limit = start + 2 * width as usize;
        for _ in 0..rows {
            for x in 0..width {
                prop_assert!(ctx.summary_here_index() >= start);
                prop_assert!(ctx.summary_here_index() < limit);
                prop_assert!(ctx.summary_above_index() >= start);
                prop_assert!(ctx.summary_above_index() < limit);
                prop_assert_eq!(
                    ctx.summary_here_index().abs_diff(ctx.summary_above_index()),
                    width as usize
                );
                image.next(&mut ctx, x + 1 < width);
            }
        }
    }

    #[test]
    fn prop_ring_memory_independent_of_height(width in 1u32..256, height in 2u32..1_000_000) {
        let image = ring(width, height);
        prop_assert_eq!(image.blocks_allocated(), (RING_ROWS * width) as usize);
    }
}
