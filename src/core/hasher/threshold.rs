//! Self-relative binarization of per-cell signals.

use super::fingerprint::Fingerprint;
use serde::{Deserialize, Serialize};

/// Margin a signal must clear to count as above the threshold.
///
/// Exact ties, and rounding noise around a tie, produce a 0 bit.
pub const TIE_EPSILON: f64 = 1e-6;

/// How the per-image threshold is derived from the image's own signals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ThresholdMethod {
    /// Arithmetic mean of all signals
    #[default]
    Mean,
    /// Middle signal (mean of the two middle ones for an even count)
    Median,
}

impl ThresholdMethod {
    /// Compute the threshold over `signals`
    pub fn threshold(&self, signals: &[f64]) -> f64 {
        if signals.is_empty() {
            return 0.0;
        }

        match self {
            ThresholdMethod::Mean => signals.iter().sum::<f64>() / signals.len() as f64,
            ThresholdMethod::Median => {
                let mut sorted = signals.to_vec();
                sorted.sort_by(f64::total_cmp);
                let mid = sorted.len() / 2;
                if sorted.len() % 2 == 0 {
                    (sorted[mid - 1] + sorted[mid]) / 2.0
                } else {
                    sorted[mid]
                }
            }
        }
    }
}

impl std::fmt::Display for ThresholdMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ThresholdMethod::Mean => write!(f, "mean"),
            ThresholdMethod::Median => write!(f, "median"),
        }
    }
}

/// True when `signal` is strictly above `threshold`, ties resolving to false
pub fn exceeds(signal: f64, threshold: f64) -> bool {
    signal - threshold > TIE_EPSILON
}

/// Set bit `i` when `signals[i]` exceeds the self-relative threshold.
///
/// At most 64 signals are packed; unused trailing bits stay 0.
pub fn binarize(signals: &[f64], method: ThresholdMethod) -> Fingerprint {
    let threshold = method.threshold(signals);
    Fingerprint::from_bits(signals.iter().map(|&signal| exceeds(signal, threshold)))
}
