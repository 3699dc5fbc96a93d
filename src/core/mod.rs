//! # Core Module
//!
//! The embeddable fingerprinting engine and the batch tooling around it.
//!
//! ## Modules
//! - `pixels` - Decoded pixel buffers and the intensity plane
//! - `hasher` - Computes 64-bit perceptual fingerprints
//! - `decode` - Turns encoded images (files, bytes, base64) into pixels
//! - `scanner` - Discovers image files in directories
//! - `pipeline` - Hashes many files in parallel
//! - `comparator` - Finds duplicates by comparing fingerprints

pub mod comparator;
pub mod decode;
pub mod hasher;
pub mod pipeline;
pub mod pixels;
pub mod scanner;

// Re-export commonly used types
pub use comparator::{MatchResult, MatchType};
pub use decode::FastDecoder;
pub use hasher::{
    compute, distance, Fingerprint, HashAlgorithmKind, HashEngine, HasherConfig, PerceptualHash,
};
pub use pixels::{Channels, PixelBuffer};
pub use scanner::ImageFile;
