//! Fixed-size, 32-byte aligned coefficient block.
//!
//! The storage engine never looks inside a block. The accessors here exist
//! for the code that fills blocks and for the nonzero statistics that feed
//! the neighbor summary.

use wide::{i16x8, CmpEq};

use crate::consts::{DCTSIZE, DCTSIZE2};

/// One 8x8 block of quantized DCT coefficients in natural (row-major) order.
///
/// The alignment lets vector loads run on every slot of a block image
/// without a misaligned first lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(C, align(32))]
pub struct AlignedBlock {
    raw_data: [i16; DCTSIZE2],
}

impl Default for AlignedBlock {
    fn default() -> Self {
        Self::new()
    }
}

impl AlignedBlock {
    /// An all-zero block.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            raw_data: [0; DCTSIZE2],
        }
    }

    /// Wraps coefficients given in natural order.
    #[must_use]
    pub const fn from_coefficients(raw_data: [i16; DCTSIZE2]) -> Self {
        Self { raw_data }
    }

    /// Coefficients in natural order.
    #[inline]
    pub fn coefficients(&self) -> &[i16; DCTSIZE2] {
        &self.raw_data
    }

    /// Mutable coefficients in natural order.
    #[inline]
    pub fn coefficients_mut(&mut self) -> &mut [i16; DCTSIZE2] {
        &mut self.raw_data
    }

    /// Coefficient at natural-order index `index`.
    #[inline]
    pub fn get_coefficient(&self, index: usize) -> i16 {
        self.raw_data[index]
    }

    /// Sets the coefficient at natural-order index `index`.
    #[inline]
    pub fn set_coefficient(&mut self, index: usize, value: i16) {
        self.raw_data[index] = value;
    }

    /// DC coefficient.
    #[inline]
    pub fn get_dc(&self) -> i16 {
        self.raw_data[0]
    }

    /// Sets the DC coefficient.
    #[inline]
    pub fn set_dc(&mut self, value: i16) {
        self.raw_data[0] = value;
    }

    /// Resets every coefficient to zero.
    #[inline]
    pub fn zero(&mut self) {
        self.raw_data = [0; DCTSIZE2];
    }

    /// True if every coefficient is zero.
    pub fn is_zero(&self) -> bool {
        self.nonzero_row_masks().iter().all(|&m| m == 0)
    }

    /// Number of nonzero coefficients, DC included.
    pub fn count_non_zeros(&self) -> u8 {
        self.nonzero_row_masks()
            .iter()
            .map(|m| m.count_ones() as u8)
            .sum()
    }

    /// Number of nonzero coefficients in the 7x7 AC interior
    /// (first row and first column excluded).
    ///
    /// This is the statistic the neighbor summary carries between blocks.
    pub fn count_non_zeros_7x7(&self) -> u8 {
        self.nonzero_row_masks()[1..]
            .iter()
            .map(|m| (m & 0xFE).count_ones() as u8)
            .sum()
    }

    /// One byte per block row, bit `c` set if column `c` is nonzero.
    #[inline(always)]
    fn nonzero_row_masks(&self) -> [u8; DCTSIZE] {
        let zero = i16x8::ZERO;
        let mut masks = [0u8; DCTSIZE];
        for (row, mask) in masks.iter_mut().enumerate() {
            let base = row * DCTSIZE;
            let mut lanes = [0i16; DCTSIZE];
            lanes.copy_from_slice(&self.raw_data[base..base + DCTSIZE]);
            let is_zero = i16x8::new(lanes).simd_eq(zero);
            *mask = !(is_zero.to_bitmask() as u8);
        }
        masks
    }
}
