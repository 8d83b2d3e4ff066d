//! # Clavis
//!
//! Musical key estimation from pitch-class sequences, built around a
//! two-stage hidden Markov model.
//!
//! ## Features
//!
//! - **Circular domain model**: validated 12-value pitch classes and
//!   24-value keys with the relative/parallel/dominant/subdominant
//!   relations
//! - **Rotation-generated templates**: literature key profiles
//!   (Krumhansl-Kessler, Temperley, Aarden-Essen, ...) and key
//!   transition tables expanded from compact hand-curated constants
//! - **Log-domain Viterbi decoding**: numerically stable over long
//!   observation sequences
//! - **Two-pass cascade**: a local-key pass, then a global pass that
//!   reuses the first pass's transition table as its emission table to
//!   collapse the piece to one stable key
//!
//! ## Quick Start
//!
//! ```
//! use clavis::{estimate_key, EstimatorConfig};
//! use clavis::model::PitchClass;
//!
//! // A C major arpeggio: C, E, G
//! let observations: Vec<PitchClass> = [0, 4, 7]
//!     .iter()
//!     .map(|&i| PitchClass::from_index(i))
//!     .collect::<Result<_, _>>()?;
//!
//! let estimate = estimate_key(&observations, &EstimatorConfig::default())?;
//! println!("{} (confidence: {:.2})", estimate.key, estimate.confidence);
//! # Ok::<(), clavis::KeyError>(())
//! ```
//!
//! ## Architecture
//!
//! The estimation pipeline follows this flow:
//!
//! ```text
//! PitchClass sequence -> Viterbi pass 1 (local keys) -> Viterbi pass 2 -> global Key
//! ```
//!
//! Pass 1 decodes one locally-best key per observation from the
//! configured profile (emission) and transition templates. Pass 2
//! treats that key sequence as observations, pins the transition table
//! to the absorbing `zero` template so the hidden key can never change,
//! and reuses pass 1's transition table as its emission table. The
//! decoded constant path is the whole-piece key.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod config;
pub mod error;
pub mod hmm;
pub mod io;
pub mod model;
pub mod templates;

// Re-export main types
pub use analysis::result::KeyEstimate;
pub use analysis::scoring::score_key;
pub use config::EstimatorConfig;
pub use error::KeyError;
pub use model::{Key, PitchClass};
pub use templates::{KeyProfile, KeyTransition};

use analysis::result::score_margin;
use hmm::HiddenMarkovModel;
use model::key::KEY_COUNT;
use templates::transitions::symmetric_initial;

/// Estimate the key of a piece from its pitch-class observations
///
/// Runs the two-pass cascade: a local-key Viterbi pass over the raw
/// observations, then a global pass over the resulting key sequence
/// with the absorbing `zero` transition table, which forces the whole
/// piece to be explained by one persistent hidden key.
///
/// # Arguments
///
/// * `observations` - Ordered, non-empty pitch-class sequence
/// * `config` - Template selections (profiles, transition)
///
/// # Returns
///
/// [`KeyEstimate`] with the global key, a 24-entry score vector, the
/// per-observation local key sequence, and a confidence value.
///
/// # Errors
///
/// Returns [`KeyError`] if the sequence is empty, a template selection
/// is invalid, or decoding degenerates (every key unreachable at some
/// step).
///
/// # Example
///
/// ```
/// use clavis::{estimate_key, EstimatorConfig};
/// use clavis::io::parse_pitch_class_sequence;
///
/// let observations = parse_pitch_class_sequence("c e g c e g b d g")?;
/// let estimate = estimate_key(&observations, &EstimatorConfig::default())?;
/// assert!(estimate.key.is_major());
/// # Ok::<(), clavis::KeyError>(())
/// ```
pub fn estimate_key(
    observations: &[PitchClass],
    config: &EstimatorConfig,
) -> Result<KeyEstimate, KeyError> {
    log::debug!(
        "Starting key estimation: {} observations, profiles {}/{}, transition {}",
        observations.len(),
        config.major_profile,
        config.minor_profile,
        config.key_transition
    );

    if observations.is_empty() {
        return Err(KeyError::InvalidModel(
            "empty pitch-class sequence".to_string(),
        ));
    }

    let profile = config.key_profile()?;
    let transition = config.key_transition()?;
    let emission_map = profile.emission_map();
    let transition_map = transition.transition_map();
    let initial = symmetric_initial().to_vec();
    let states: Vec<usize> = (0..KEY_COUNT).collect();

    // Pass 1: local keys. States are the 24 keys, observations the raw
    // pitch classes.
    let pitch_classes: Vec<usize> = observations.iter().map(|pc| pc.index()).collect();
    let local_pass = HiddenMarkovModel::new(
        pitch_classes,
        states.clone(),
        initial.clone(),
        rows_to_vecs(&transition_map),
        rows_to_vecs(&emission_map),
    )?
    .run_viterbi()?;

    let local_keys = local_pass
        .path
        .iter()
        .map(|&index| Key::from_index(index))
        .collect::<Result<Vec<_>, _>>()?;
    log::debug!(
        "Local pass decoded {} keys, log10 probability {:.4}",
        local_keys.len(),
        local_pass.max_log_probability
    );

    // Pass 2: global key. The local key sequence becomes the
    // observation alphabet, the zero transition pins the hidden key in
    // place, and pass 1's transition table is reused as the emission
    // table ("likelihood of hearing local key X inside global key Y").
    let zero_map = KeyTransition::new("zero")?.transition_map();
    let global_pass = HiddenMarkovModel::new(
        local_pass.path.clone(),
        states,
        initial,
        rows_to_vecs(&zero_map),
        rows_to_vecs(&transition_map),
    )?
    .run_viterbi()?;

    // The zero transition makes the decoded path constant; its front
    // element is the whole-piece estimate.
    let key = global_pass
        .path
        .first()
        .copied()
        .map(Key::from_index)
        .ok_or_else(|| KeyError::InvalidModel("empty decoded key sequence".to_string()))??;

    let confidence = score_margin(&global_pass.final_scores, key.index());
    log::debug!(
        "Estimated key: {} (confidence {:.3}, log10 probability {:.4})",
        key,
        confidence,
        global_pass.max_log_probability
    );

    Ok(KeyEstimate {
        key,
        confidence,
        key_scores: global_pass.final_scores,
        local_keys,
        max_log_probability: global_pass.max_log_probability,
    })
}

fn rows_to_vecs<const N: usize, const M: usize>(table: &[[f64; N]; M]) -> Vec<Vec<f64>> {
    table.iter().map(|row| row.to_vec()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pitch_classes(indices: &[usize]) -> Vec<PitchClass> {
        indices
            .iter()
            .map(|&i| PitchClass::from_index(i).unwrap())
            .collect()
    }

    #[test]
    fn test_estimate_key_empty_sequence() {
        let result = estimate_key(&[], &EstimatorConfig::default());
        assert!(matches!(result, Err(KeyError::InvalidModel(_))));
    }

    #[test]
    fn test_estimate_key_c_major_triad() {
        // C, E, G with the default templates lands squarely on C major.
        let observations = pitch_classes(&[0, 4, 7]);
        let estimate = estimate_key(&observations, &EstimatorConfig::default()).unwrap();
        assert_eq!(estimate.key, Key::from_index(0).unwrap());
        assert_eq!(estimate.local_keys.len(), 3);
        assert_eq!(estimate.key_scores.len(), 24);
    }

    #[test]
    fn test_estimate_key_a_minor_triad() {
        let observations = pitch_classes(&[9, 0, 4]);
        let estimate = estimate_key(&observations, &EstimatorConfig::default()).unwrap();
        assert_eq!(estimate.key, Key::from_name("a").unwrap());
        assert!(estimate.key.is_minor());
    }

    #[test]
    fn test_estimate_key_deterministic() {
        let observations = pitch_classes(&[0, 2, 4, 5, 7, 9, 11, 0]);
        let config = EstimatorConfig::default();
        let first = estimate_key(&observations, &config).unwrap();
        let second = estimate_key(&observations, &config).unwrap();
        assert_eq!(first.key, second.key);
        assert_eq!(first.local_keys, second.local_keys);
        assert_eq!(first.max_log_probability, second.max_log_probability);
        assert_eq!(first.key_scores, second.key_scores);
    }

    #[test]
    fn test_estimate_key_bad_template() {
        let observations = pitch_classes(&[0, 4, 7]);
        let config = EstimatorConfig {
            key_transition: "bogus".to_string(),
            ..EstimatorConfig::default()
        };
        assert!(matches!(
            estimate_key(&observations, &config),
            Err(KeyError::InvalidTemplate(_))
        ));
    }

    #[test]
    fn test_local_keys_align_with_observations() {
        let observations = pitch_classes(&[7, 11, 2, 7, 11, 2]);
        let estimate = estimate_key(&observations, &EstimatorConfig::default()).unwrap();
        assert_eq!(estimate.local_keys.len(), observations.len());
    }
}
