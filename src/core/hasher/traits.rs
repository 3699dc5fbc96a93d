//! Trait definitions for perceptual hashing.

use super::fingerprint::Fingerprint;
use super::threshold::ThresholdMethod;
use super::MIN_DIMENSION;
use crate::core::pixels::{LumaPlane, PixelBuffer};
use crate::error::{CompareError, InvalidInputError};
use serde::{Deserialize, Serialize};

/// A computed perceptual hash that can be compared
pub trait PerceptualHash: Clone + Send + Sync {
    /// Compute the Hamming distance to another hash
    ///
    /// Returns the number of bits that differ between the two hashes.
    /// Lower distance = more similar images.
    fn distance(&self, other: &Self) -> u32;

    /// Get the raw hash bytes
    fn as_bytes(&self) -> &[u8];

    /// Get the hash as a hexadecimal string
    fn to_hex(&self) -> String {
        self.as_bytes()
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect()
    }

    /// Get the total number of bits in this hash
    fn bit_count(&self) -> u32 {
        (self.as_bytes().len() * 8) as u32
    }

    /// Calculate similarity as a percentage (0-100)
    fn similarity(&self, other: &Self) -> f64 {
        let distance = self.distance(other);
        let max_distance = self.bit_count();
        if max_distance == 0 {
            return 100.0;
        }
        (1.0 - (distance as f64 / max_distance as f64)) * 100.0
    }
}

/// Available hash algorithms
///
/// Fingerprints are only comparable when produced by the same algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HashAlgorithmKind {
    /// Average Hash (aHash) - 8x8 cells against their own mean
    Average,
    /// Difference Hash (dHash) - horizontal brightness gradients
    Difference,
    /// Perceptual Hash (pHash) - low-frequency DCT coefficients
    Perceptual,
}

impl HashAlgorithmKind {
    /// Get a human-readable description of the algorithm
    pub fn description(&self) -> &'static str {
        match self {
            HashAlgorithmKind::Average => {
                "Average Hash (aHash) - Fast comparison based on average brightness"
            }
            HashAlgorithmKind::Difference => {
                "Difference Hash (dHash) - Compares brightness gradients between pixels"
            }
            HashAlgorithmKind::Perceptual => {
                "Perceptual Hash (pHash) - DCT-based, robust to edits and transformations"
            }
        }
    }
}

impl std::fmt::Display for HashAlgorithmKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HashAlgorithmKind::Average => write!(f, "aHash"),
            HashAlgorithmKind::Difference => write!(f, "dHash"),
            HashAlgorithmKind::Perceptual => write!(f, "pHash"),
        }
    }
}

/// Trait for hash algorithm implementations
pub trait HashAlgorithm: Send + Sync {
    /// Compute a fingerprint from an already-reduced intensity plane.
    ///
    /// The plane is at least `MIN_DIMENSION` on each side.
    fn hash_luma(&self, plane: &LumaPlane) -> Fingerprint;

    /// Get the algorithm kind
    fn kind(&self) -> HashAlgorithmKind;

    /// Validate decoded pixels, then compute their fingerprint.
    fn hash_pixels(&self, pixels: &PixelBuffer) -> Result<Fingerprint, InvalidInputError> {
        ensure_min_size(pixels.width(), pixels.height())?;
        Ok(self.hash_luma(&pixels.to_luma_plane()))
    }
}

pub(crate) fn ensure_min_size(width: u32, height: u32) -> Result<(), InvalidInputError> {
    if width < MIN_DIMENSION || height < MIN_DIMENSION {
        return Err(InvalidInputError::TooSmall {
            width,
            height,
            min: MIN_DIMENSION,
        });
    }
    Ok(())
}

/// A fingerprint tagged with the settings that produced it.
///
/// Two values are comparable only when both the algorithm and the threshold
/// method match. dHash ignores the threshold method, so it carries none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageHashValue {
    /// The 64-bit fingerprint
    fingerprint: Fingerprint,
    /// The algorithm that produced this hash
    algorithm: HashAlgorithmKind,
    /// Threshold derivation, `None` for dHash
    threshold: Option<ThresholdMethod>,
}

impl ImageHashValue {
    /// Create a new hash value
    pub fn new(
        fingerprint: Fingerprint,
        algorithm: HashAlgorithmKind,
        threshold: ThresholdMethod,
    ) -> Self {
        let threshold = match algorithm {
            HashAlgorithmKind::Difference => None,
            HashAlgorithmKind::Average | HashAlgorithmKind::Perceptual => Some(threshold),
        };

        Self {
            fingerprint,
            algorithm,
            threshold,
        }
    }

    pub fn fingerprint(&self) -> Fingerprint {
        self.fingerprint
    }

    /// Get the algorithm that produced this hash
    pub fn algorithm(&self) -> HashAlgorithmKind {
        self.algorithm
    }

    /// Threshold method the bits were derived with, if the algorithm uses one
    pub fn threshold_method(&self) -> Option<ThresholdMethod> {
        self.threshold
    }

    /// Hamming distance, refusing to compare across algorithms or thresholds
    pub fn try_distance(&self, other: &ImageHashValue) -> Result<u32, CompareError> {
        if self.algorithm != other.algorithm {
            return Err(CompareError::AlgorithmMismatch {
                left: self.algorithm.to_string(),
                right: other.algorithm.to_string(),
            });
        }

        if let (Some(left), Some(right)) = (self.threshold, other.threshold) {
            if left != right {
                return Err(CompareError::ThresholdMismatch {
                    left: left.to_string(),
                    right: right.to_string(),
                });
            }
        }

        Ok(self.fingerprint.distance(&other.fingerprint))
    }
}
