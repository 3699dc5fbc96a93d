//! # Error Module
//!
//! Typed errors for the hashing engine and its collaborators.
//!
//! ## Design Principles
//! - **Never panic** on caller data - return errors instead
//! - **Fail before computing** - input is validated up front
//! - **Include context** - dimensions, lengths, paths

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error
#[derive(Error, Debug)]
pub enum PhashError {
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),

    #[error("Decoding error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Invalid fingerprint: {0}")]
    Parse(#[from] FingerprintParseError),

    #[error("Scanning error: {0}")]
    Scan(#[from] ScanError),

    #[error("Comparison error: {0}")]
    Compare(#[from] CompareError),
}

/// Malformed or undersized pixel input.
///
/// This is the only error the engine itself produces.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidInputError {
    #[error("image dimensions must be non-zero (got {width}x{height})")]
    ZeroDimension { width: u32, height: u32 },

    #[error("image is {width}x{height}, at least {min}x{min} pixels are required")]
    TooSmall { width: u32, height: u32, min: u32 },

    #[error(
        "buffer holds {actual} bytes but a {width}x{height} image with {channels} channel(s) needs {expected}"
    )]
    LengthMismatch {
        width: u32,
        height: u32,
        channels: u8,
        expected: usize,
        actual: usize,
    },

    #[error("unsupported channel count: {0} (expected 1, 2, 3 or 4)")]
    UnsupportedChannels(u8),
}

/// Errors that occur while turning encoded images into pixels
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Failed to read image file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Input is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Failed to decode image: {reason}")]
    Image { reason: String },

    #[error("Decoded image has no pixels")]
    Empty,
}

/// Errors that occur when parsing the textual fingerprint form
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FingerprintParseError {
    #[error("expected 16 hex digits, got {0} characters")]
    InvalidLength(usize),

    #[error("invalid hex digit {digit:?} at position {position}")]
    InvalidDigit { digit: char, position: usize },
}

/// Errors that occur while discovering image files
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Path not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Failed to read {path}: {source}")]
    ReadEntry {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// Errors that occur when comparing fingerprints
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompareError {
    #[error("Cannot compare a {left} fingerprint with a {right} fingerprint")]
    AlgorithmMismatch { left: String, right: String },

    #[error("Cannot compare fingerprints thresholded by {left} with ones thresholded by {right}")]
    ThresholdMismatch { left: String, right: String },

    #[error("Duplicate threshold {threshold} exceeds the {max}-bit fingerprint width")]
    ThresholdOutOfRange { threshold: u32, max: u32 },
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, PhashError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn too_small_mentions_minimum() {
        let error = InvalidInputError::TooSmall {
            width: 4,
            height: 4,
            min: 8,
        };
        let message = error.to_string();
        assert!(message.contains("4x4"));
        assert!(message.contains("8x8"));
    }

    #[test]
    fn length_mismatch_reports_both_lengths() {
        let error = InvalidInputError::LengthMismatch {
            width: 8,
            height: 8,
            channels: 3,
            expected: 192,
            actual: 191,
        };
        let message = error.to_string();
        assert!(message.contains("191"));
        assert!(message.contains("192"));
    }

    #[test]
    fn invalid_input_converts_to_top_level() {
        let error: PhashError = InvalidInputError::UnsupportedChannels(5).into();
        assert!(matches!(error, PhashError::InvalidInput(_)));
        assert!(error.to_string().starts_with("Invalid input"));
    }

    #[test]
    fn io_error_includes_path() {
        let error = DecodeError::Io {
            path: PathBuf::from("/photos/broken.jpg"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert!(error.to_string().contains("/photos/broken.jpg"));
    }

    #[test]
    fn threshold_mismatch_names_both_methods() {
        let error = CompareError::ThresholdMismatch {
            left: "mean".to_string(),
            right: "median".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("mean"));
        assert!(message.contains("median"));
    }
}
