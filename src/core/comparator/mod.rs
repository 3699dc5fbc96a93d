//! # Comparator Module
//!
//! Finds duplicates by comparing perceptual hashes.
//!
//! ## How It Works
//! 1. Compare all pairs using Hamming distance
//! 2. Apply comparison strategy to determine duplicates
//!
//! Pairs produced by different algorithms or threshold methods are never
//! compared.
//!
//! ## Comparison Thresholds
//! Bands used inside the strategy's threshold; pairs beyond it are always
//! `MaybeSimilar`, and reported pairs are at most `Similar`.
//!
//! | Distance | Classification |
//! |----------|---------------|
//! | 0        | Exact match   |
//! | 1-4      | Near-exact    |
//! | 5-10     | Similar       |
//! | 11+      | Maybe similar |

mod traits;

pub use traits::{ComparisonStrategy, ThresholdStrategy, DEFAULT_THRESHOLD};

use crate::core::hasher::{ImageHashValue, PerceptualHash};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Result of comparing two images
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    /// Path to the first image
    pub image_a: PathBuf,
    /// Path to the second image
    pub image_b: PathBuf,
    /// Hamming distance between hashes
    pub distance: u32,
    /// Similarity as a percentage (0-100)
    pub similarity_percent: f64,
    /// Classification of the match
    pub match_type: MatchType,
}

/// Classification of match types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchType {
    /// Distance = 0, identical perceptual content
    Exact,
    /// Distance 1-4, virtually identical
    NearExact,
    /// Distance 5-10, likely duplicates
    Similar,
    /// Distance 11+, possibly related
    MaybeSimilar,
}

impl MatchType {
    /// Classify based on Hamming distance
    pub fn from_distance(distance: u32) -> Self {
        match distance {
            0 => MatchType::Exact,
            1..=4 => MatchType::NearExact,
            5..=10 => MatchType::Similar,
            _ => MatchType::MaybeSimilar,
        }
    }

    /// Check if this match type is considered a duplicate
    pub fn is_duplicate(&self) -> bool {
        matches!(self, MatchType::Exact | MatchType::NearExact | MatchType::Similar)
    }
}

impl std::fmt::Display for MatchType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchType::Exact => write!(f, "Exact Match"),
            MatchType::NearExact => write!(f, "Near-Exact Match"),
            MatchType::Similar => write!(f, "Similar"),
            MatchType::MaybeSimilar => write!(f, "Possibly Similar"),
        }
    }
}

/// Compare two tagged hashes, `None` when they are not comparable
pub fn compare_pair(
    a: (&PathBuf, &ImageHashValue),
    b: (&PathBuf, &ImageHashValue),
    strategy: &dyn ComparisonStrategy,
) -> Option<MatchResult> {
    let distance = a.1.try_distance(b.1).ok()?;

    Some(MatchResult {
        image_a: a.0.clone(),
        image_b: b.0.clone(),
        distance,
        similarity_percent: a.1.fingerprint().similarity(&b.1.fingerprint()),
        match_type: strategy.classify(distance),
    })
}

/// Find all duplicate pairs from a collection of hashes
pub fn find_duplicate_pairs(
    images: &[(PathBuf, ImageHashValue)],
    strategy: &dyn ComparisonStrategy,
) -> Vec<MatchResult> {
    let mut matches = Vec::new();
    let mut skipped = 0usize;

    // Compare all pairs
    for i in 0..images.len() {
        for j in (i + 1)..images.len() {
            let (path_a, hash_a) = &images[i];
            let (path_b, hash_b) = &images[j];

            match compare_pair((path_a, hash_a), (path_b, hash_b), strategy) {
                Some(result) if strategy.is_duplicate(result.distance) => matches.push(result),
                Some(_) => {}
                None => skipped += 1,
            }
        }
    }

    if skipped > 0 {
        tracing::debug!(skipped, "skipped pairs hashed with different settings");
    }

    matches
}
