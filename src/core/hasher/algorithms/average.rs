//! Average Hash (aHash) implementation.
//!
//! aHash works by:
//! 1. Area-averaging the intensity plane down to an 8x8 grid
//! 2. Computing the mean (or median) of the 64 cells
//! 3. For each cell, row-major: if brighter than the threshold, set bit to 1
//!
//! This is the fastest hash but less robust to edits.

use super::super::downsample::area_resize;
use super::super::fingerprint::Fingerprint;
use super::super::threshold::{binarize, ThresholdMethod};
use super::super::traits::{HashAlgorithm, HashAlgorithmKind};
use super::super::GRID_SIZE;
use crate::core::pixels::LumaPlane;

/// Average Hash (aHash) implementation
#[derive(Debug, Clone, Default)]
pub struct AverageHasher {
    threshold: ThresholdMethod,
}

impl AverageHasher {
    /// Create a new aHash hasher
    pub fn new(threshold: ThresholdMethod) -> Self {
        Self { threshold }
    }
}

impl HashAlgorithm for AverageHasher {
    fn hash_luma(&self, plane: &LumaPlane) -> Fingerprint {
        let grid = area_resize(plane, GRID_SIZE, GRID_SIZE);
        binarize(grid.values(), self.threshold)
    }

    fn kind(&self) -> HashAlgorithmKind {
        HashAlgorithmKind::Average
    }
}
