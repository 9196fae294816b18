//! Shared helpers for block image integration tests.

#![allow(dead_code)] // Not all test files use all helpers

use jpeg_block_image::{AlignedBlock, DCTSIZE2};

/// Deterministic block content for position `(y, x)`.
///
/// The number of nonzero coefficients varies with position so neighbor
/// summaries of different blocks are distinguishable.
pub fn synthetic_block(y: u32, x: u32) -> AlignedBlock {
    let mut coeffs = [0i16; DCTSIZE2];
    let seed = y.wrapping_mul(31).wrapping_add(x.wrapping_mul(17));
    let nonzeros = (seed % 40) as usize + 1;
    for (i, c) in coeffs.iter_mut().take(nonzeros).enumerate() {
        *c = ((seed as usize + i) % 7) as i16 + 1;
    }
    coeffs[0] = (y * 1000 + x) as i16;
    AlignedBlock::from_coefficients(coeffs)
}

/// 7x7 nonzero count of [`synthetic_block`] at `(y, x)`.
pub fn expected_count(y: u32, x: u32) -> u8 {
    synthetic_block(y, x).count_non_zeros_7x7()
}
