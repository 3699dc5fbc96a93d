//! Duplicate policies over Hamming distance.

use super::MatchType;
use crate::core::hasher::Fingerprint;
use crate::error::CompareError;

/// Distance at or below which two fingerprints are likely duplicates
pub const DEFAULT_THRESHOLD: u32 = 10;

/// Decides which distances count as duplicates
pub trait ComparisonStrategy: Send + Sync {
    /// Whether a pair at `distance` is reported
    fn is_duplicate(&self, distance: u32) -> bool;

    /// Get the threshold used
    fn threshold(&self) -> u32;

    /// Human-readable description of the strategy
    fn description(&self) -> String;

    /// Label a distance, consistent with [`ComparisonStrategy::is_duplicate`].
    ///
    /// The fixed bands of [`MatchType::from_distance`] apply inside the
    /// threshold, except that a reported pair is never labelled
    /// `MaybeSimilar` and an unreported one always is.
    fn classify(&self, distance: u32) -> MatchType {
        if !self.is_duplicate(distance) {
            return MatchType::MaybeSimilar;
        }

        match MatchType::from_distance(distance) {
            MatchType::MaybeSimilar => MatchType::Similar,
            band => band,
        }
    }
}

/// Pairs within a fixed number of differing bits are duplicates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThresholdStrategy {
    threshold: u32,
}

impl ThresholdStrategy {
    /// Create a strategy; `threshold` can be at most the fingerprint width.
    pub fn new(threshold: u32) -> Result<Self, CompareError> {
        if threshold > Fingerprint::BITS {
            return Err(CompareError::ThresholdOutOfRange {
                threshold,
                max: Fingerprint::BITS,
            });
        }
        Ok(Self { threshold })
    }
}

impl Default for ThresholdStrategy {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl ComparisonStrategy for ThresholdStrategy {
    fn is_duplicate(&self, distance: u32) -> bool {
        distance <= self.threshold
    }

    fn threshold(&self) -> u32 {
        self.threshold
    }

    fn description(&self) -> String {
        format!(
            "pairs differing in at most {} of {} bits are reported",
            self.threshold,
            Fingerprint::BITS
        )
    }
}
