//! Weighted evaluation scoring
//!
//! The standard key-estimation evaluation score: full credit for an
//! exact match, partial credit for the musically-close misses reached
//! through the four key relations.

use crate::model::Key;

/// Score a predicted key against an annotated ground truth
///
/// Returns 1.0 for an exact match, 0.5 if the prediction is the ground
/// truth's dominant, 0.3 if its relative, 0.2 if its parallel, and 0.0
/// otherwise.
pub fn score_key(predicted: Key, ground_truth: Key) -> f64 {
    if predicted == ground_truth {
        1.0
    } else if predicted == ground_truth.dominant() {
        0.5
    } else if predicted == ground_truth.relative() {
        0.3
    } else if predicted == ground_truth.parallel() {
        0.2
    } else {
        0.0
    }
}
