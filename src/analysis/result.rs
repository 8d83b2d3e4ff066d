//! Key estimation result types

use serde::{Deserialize, Serialize};

use crate::model::Key;

/// Complete result of one whole-piece key estimation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyEstimate {
    /// The single, whole-piece key estimate
    pub key: Key,

    /// Estimation confidence (0.0-1.0)
    ///
    /// Margin between the winning key's final-layer score and the
    /// runner-up, mapped through the log domain: 1.0 when no other key
    /// comes close, 0.0 on an exact tie.
    pub confidence: f32,

    /// Final-layer score vector of the global pass, one entry per key
    /// index (log10 domain)
    ///
    /// A coarse relative-confidence signal per candidate global key;
    /// larger (less negative) is more likely.
    pub key_scores: Vec<f64>,

    /// Per-observation local key sequence from the first decoding pass
    ///
    /// Same length as the input observation sequence; useful for
    /// inspecting where the piece leans toward neighboring keys even
    /// though the reported estimate is global.
    pub local_keys: Vec<Key>,

    /// log10 probability of the winning global-pass Viterbi path
    pub max_log_probability: f64,
}

/// Confidence from a final-layer score vector: the relative-likelihood
/// margin between the best entry and the runner-up
pub(crate) fn score_margin(scores: &[f64], best_index: usize) -> f32 {
    let best = scores[best_index];
    let mut second = f64::NEG_INFINITY;
    for (i, &score) in scores.iter().enumerate() {
        if i != best_index && score > second {
            second = score;
        }
    }
    if !best.is_finite() {
        return 0.0;
    }
    // 10^(second - best) is the runner-up's likelihood relative to the
    // winner: 1.0 on a tie, 0.0 when the winner stands alone.
    let relative = 10f64.powf(second - best);
    (1.0 - relative).clamp(0.0, 1.0) as f32
}
