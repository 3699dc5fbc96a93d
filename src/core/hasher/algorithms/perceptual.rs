//! Perceptual Hash (pHash) implementation.
//!
//! pHash uses the Discrete Cosine Transform (DCT) to extract
//! frequency information from the image. This makes it more
//! robust to:
//! - Scaling
//! - Brightness/contrast changes
//! - Compression artifacts
//!
//! Steps:
//! 1. Area-average the intensity plane to 32x32
//! 2. Take the orthonormal 2-D DCT-II, keeping the 8x8 lowest frequencies
//! 3. Drop the DC term, leaving 63 AC coefficients in row-major order
//! 4. Set bit `i` when coefficient `i` is above the coefficients' mean
//!
//! Only 63 bits carry information: the least significant bit of the
//! fingerprint is always 0.

use super::super::dct::DctTable;
use super::super::fingerprint::Fingerprint;
use super::super::threshold::{binarize, ThresholdMethod};
use super::super::traits::{HashAlgorithm, HashAlgorithmKind};
use super::super::{DCT_SIZE, GRID_SIZE};
use crate::core::pixels::LumaPlane;

/// Perceptual Hash (pHash) implementation using DCT
#[derive(Debug, Clone)]
pub struct PerceptualHasher {
    threshold: ThresholdMethod,
    table: DctTable,
}

impl PerceptualHasher {
    /// Create a new pHash hasher
    pub fn new(threshold: ThresholdMethod) -> Self {
        Self {
            threshold,
            table: DctTable::new(DCT_SIZE, GRID_SIZE),
        }
    }
}

impl Default for PerceptualHasher {
    fn default() -> Self {
        Self::new(ThresholdMethod::default())
    }
}

impl HashAlgorithm for PerceptualHasher {
    fn hash_luma(&self, plane: &LumaPlane) -> Fingerprint {
        // Area-averaged to DCT_SIZE x DCT_SIZE inside the transform
        let block = self.table.low_frequencies(plane);

        binarize(&block[1..], self.threshold)
    }

    fn kind(&self) -> HashAlgorithmKind {
        HashAlgorithmKind::Perceptual
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::pixels::PixelBuffer;

    fn create_solid_image(value: u8) -> PixelBuffer {
        PixelBuffer::gray_from_fn(100, 100, |_, _| value).unwrap()
    }

    fn create_pattern_image(offset: u8) -> PixelBuffer {
        PixelBuffer::gray_from_fn(96, 96, |x, y| {
            let wave = ((x as f64 * 0.11).sin() + (y as f64 * 0.07 + x as f64 * 0.02).cos()) * 45.0;
            (110.0 + wave) as u8 + offset
        })
        .unwrap()
    }

    #[test]
    fn identical_images_produce_identical_hash() {
        let hasher = PerceptualHasher::default();
        let image = create_pattern_image(0);

        let hash1 = hasher.hash_pixels(&image).unwrap();
        let hash2 = hasher.hash_pixels(&image).unwrap();

        assert_eq!(hash1, hash2);
    }

    #[test]
    fn solid_image_produces_zero_hash() {
        let hasher = PerceptualHasher::default();
        assert_eq!(
            hasher.hash_pixels(&create_solid_image(128)).unwrap(),
            Fingerprint::ZERO
        );
    }

    #[test]
    fn brightness_shift_keeps_hash() {
        let hasher = PerceptualHasher::default();

        let hash1 = hasher.hash_pixels(&create_pattern_image(0)).unwrap();
        let hash2 = hasher.hash_pixels(&create_pattern_image(20)).unwrap();

        assert!(hash1.distance(&hash2) <= 2);
    }

    #[test]
    fn last_bit_is_reserved() {
        let hasher = PerceptualHasher::default();
        let hash = hasher.hash_pixels(&create_pattern_image(0)).unwrap();

        assert_eq!(hash.bit(63), Some(false));
    }

    #[test]
    fn kind_returns_perceptual() {
        let hasher = PerceptualHasher::default();
        assert_eq!(hasher.kind(), HashAlgorithmKind::Perceptual);
    }
}
