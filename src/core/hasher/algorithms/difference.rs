//! Difference Hash (dHash) implementation.
//!
//! dHash works by:
//! 1. Area-averaging the intensity plane down to a 9x8 grid
//! 2. Comparing each cell to the one to its right
//! 3. If left cell is brighter, set bit to 1, else 0
//!
//! This captures the relative gradient of brightness changes. Each bit is
//! already relative to its neighbour, so no global threshold is needed.

use super::super::downsample::area_resize;
use super::super::fingerprint::Fingerprint;
use super::super::threshold::exceeds;
use super::super::traits::{HashAlgorithm, HashAlgorithmKind};
use super::super::GRID_SIZE;
use crate::core::pixels::LumaPlane;

/// Difference Hash (dHash) implementation
#[derive(Debug, Clone, Default)]
pub struct DifferenceHasher;

impl DifferenceHasher {
    /// Create a new dHash hasher
    pub fn new() -> Self {
        Self
    }
}

impl HashAlgorithm for DifferenceHasher {
    fn hash_luma(&self, plane: &LumaPlane) -> Fingerprint {
        // One extra column to compute differences
        let grid = area_resize(plane, GRID_SIZE + 1, GRID_SIZE);

        let bits = (0..GRID_SIZE).flat_map(|y| {
            let row = grid.row(y);
            (0..GRID_SIZE).map(move |x| exceeds(row[x], row[x + 1]))
        });

        Fingerprint::from_bits(bits)
    }

    fn kind(&self) -> HashAlgorithmKind {
        HashAlgorithmKind::Difference
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::pixels::PixelBuffer;

    fn create_solid_image(value: u8) -> PixelBuffer {
        PixelBuffer::gray_from_fn(100, 100, |_, _| value).unwrap()
    }

    fn create_left_to_right_gradient() -> PixelBuffer {
        // Gradient: left is dark, right is bright (left < right)
        PixelBuffer::gray_from_fn(100, 100, |x, _| (x * 255 / 99) as u8).unwrap()
    }

    fn create_right_to_left_gradient() -> PixelBuffer {
        // Gradient: right is dark, left is bright (left > right)
        PixelBuffer::gray_from_fn(100, 100, |x, _| ((99 - x) * 255 / 99) as u8).unwrap()
    }

    #[test]
    fn identical_images_produce_identical_hash() {
        let hasher = DifferenceHasher::new();
        let image = create_left_to_right_gradient();

        let hash1 = hasher.hash_pixels(&image).unwrap();
        let hash2 = hasher.hash_pixels(&image).unwrap();

        assert_eq!(hash1.distance(&hash2), 0);
    }

    #[test]
    fn opposite_gradients_are_maximally_different() {
        let hasher = DifferenceHasher::new();

        let hash1 = hasher.hash_pixels(&create_left_to_right_gradient()).unwrap();
        let hash2 = hasher.hash_pixels(&create_right_to_left_gradient()).unwrap();

        // Brightening to the right never sets a bit; darkening always does
        assert_eq!(hash1, Fingerprint::ZERO);
        assert_eq!(hash2.to_u64(), u64::MAX);
        assert_eq!(hash1.distance(&hash2), 64);
    }

    #[test]
    fn solid_image_produces_zero_hash() {
        let hasher = DifferenceHasher::new();
        assert_eq!(
            hasher.hash_pixels(&create_solid_image(77)).unwrap(),
            Fingerprint::ZERO
        );
    }

    #[test]
    fn kind_returns_difference() {
        let hasher = DifferenceHasher::new();
        assert_eq!(hasher.kind(), HashAlgorithmKind::Difference);
    }
}
