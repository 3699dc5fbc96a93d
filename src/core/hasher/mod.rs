//! # Hasher Module
//!
//! Computes 64-bit perceptual fingerprints from decoded pixels.
//!
//! ## Supported Algorithms
//! - **pHash (Perceptual Hash)** - DCT-based, the default
//! - **aHash (Average Hash)** - Fastest, good for exact duplicates
//! - **dHash (Difference Hash)** - Horizontal gradients
//!
//! ## How It Works
//! 1. Convert to grayscale (`0.299R + 0.587G + 0.114B`)
//! 2. Area-average down to a small fixed grid
//! 3. Derive one signal per cell
//! 4. Threshold each signal against the image's own mean or median
//! 5. Pack the bits MSB-first into a [`Fingerprint`]
//!
//! Fingerprints are compared with Hamming distance. Only fingerprints from
//! the same algorithm are comparable.
//!
//! ## Example
//! ```rust,ignore
//! use phash_engine::core::hasher::{HasherConfig, HashAlgorithmKind};
//!
//! let engine = HasherConfig::new()
//!     .algorithm(HashAlgorithmKind::Perceptual)
//!     .build();
//!
//! let fingerprint = engine.compute(&pixels)?;
//! println!("{fingerprint}");
//! ```

mod algorithms;
mod dct;
mod downsample;
mod fingerprint;
mod threshold;
mod traits;

pub use algorithms::{AverageHasher, DifferenceHasher, PerceptualHasher};
pub use dct::DctTable;
pub use downsample::area_resize;
pub use fingerprint::{Fingerprint, HEX_LEN};
pub use threshold::{binarize, ThresholdMethod, TIE_EPSILON};
pub use traits::{HashAlgorithm, HashAlgorithmKind, ImageHashValue, PerceptualHash};

use crate::core::pixels::{validate_layout, Channels, PixelBuffer};
use crate::error::InvalidInputError;
use std::sync::Arc;

/// Smallest accepted width and height
pub const MIN_DIMENSION: u32 = 8;

/// Side of the reduced grid (8x8 = 64 bits)
pub const GRID_SIZE: usize = 8;

/// Side of the grid fed to the DCT
pub const DCT_SIZE: usize = 32;

/// Configuration builder for the engine
#[derive(Debug, Clone)]
pub struct HasherConfig {
    /// Algorithm to use
    algorithm: HashAlgorithmKind,
    /// Threshold derivation (ignored by dHash)
    threshold: ThresholdMethod,
}

impl HasherConfig {
    /// Create a new hasher configuration with defaults
    pub fn new() -> Self {
        Self {
            algorithm: HashAlgorithmKind::Perceptual,
            threshold: ThresholdMethod::Mean,
        }
    }

    /// Set the hash algorithm
    pub fn algorithm(mut self, algorithm: HashAlgorithmKind) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Set how the per-image threshold is derived
    pub fn threshold(mut self, threshold: ThresholdMethod) -> Self {
        self.threshold = threshold;
        self
    }

    /// Build the engine
    pub fn build(self) -> HashEngine {
        let hasher: Arc<dyn HashAlgorithm> = match self.algorithm {
            HashAlgorithmKind::Average => Arc::new(AverageHasher::new(self.threshold)),
            HashAlgorithmKind::Difference => Arc::new(DifferenceHasher::new()),
            HashAlgorithmKind::Perceptual => Arc::new(PerceptualHasher::new(self.threshold)),
        };

        HashEngine {
            config: self,
            hasher,
        }
    }
}

impl Default for HasherConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Stateless fingerprinting engine.
///
/// Holds only immutable configuration; cheap to clone and safe to share
/// across threads.
#[derive(Clone)]
pub struct HashEngine {
    config: HasherConfig,
    hasher: Arc<dyn HashAlgorithm>,
}

impl HashEngine {
    /// Engine with the default configuration (pHash, mean threshold)
    pub fn new() -> Self {
        HasherConfig::new().build()
    }

    pub fn algorithm(&self) -> HashAlgorithmKind {
        self.hasher.kind()
    }

    pub fn threshold_method(&self) -> ThresholdMethod {
        self.config.threshold
    }

    /// Compute the fingerprint of decoded pixels.
    ///
    /// Fails before doing any work if the image is smaller than
    /// `MIN_DIMENSION` on either side.
    pub fn compute(&self, pixels: &PixelBuffer) -> Result<Fingerprint, InvalidInputError> {
        let fingerprint = self.hasher.hash_pixels(pixels)?;

        tracing::trace!(
            algorithm = %self.hasher.kind(),
            width = pixels.width(),
            height = pixels.height(),
            %fingerprint,
            "computed fingerprint"
        );

        Ok(fingerprint)
    }

    /// Validate an unowned buffer, then compute its fingerprint
    pub fn compute_raw(
        &self,
        width: u32,
        height: u32,
        channels: u8,
        data: &[u8],
    ) -> Result<Fingerprint, InvalidInputError> {
        let channels = Channels::from_count(channels)?;
        validate_layout(width, height, channels.count(), data.len())?;
        traits::ensure_min_size(width, height)?;

        let pixels = PixelBuffer::new(width, height, channels, data.to_vec())?;
        self.compute(&pixels)
    }

    /// Compute and tag the fingerprint with this engine's algorithm and threshold
    pub fn compute_value(&self, pixels: &PixelBuffer) -> Result<ImageHashValue, InvalidInputError> {
        Ok(ImageHashValue::new(
            self.compute(pixels)?,
            self.algorithm(),
            self.threshold_method(),
        ))
    }
}

impl Default for HashEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for HashEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HashEngine")
            .field("algorithm", &self.config.algorithm)
            .field("threshold", &self.config.threshold)
            .finish()
    }
}

/// Compute a fingerprint with the default engine
pub fn compute(pixels: &PixelBuffer) -> Result<Fingerprint, InvalidInputError> {
    HashEngine::new().compute(pixels)
}

/// Hamming distance between two fingerprints, in `[0, 64]`
pub fn distance(a: &Fingerprint, b: &Fingerprint) -> u32 {
    a.distance(b)
}
