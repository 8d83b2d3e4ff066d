//! Key-transition templates (transition probabilities)
//!
//! Each template is a 24-element array, logically two 12-element
//! halves: tonic-relationship weights (staying at or near the source
//! key) and relative-key weights (moving to the opposite mode). The
//! per-source-key rows are rotations of the halves.
//!
//! The `zero` template is special: it expands to the identity-like
//! "stay exactly at the source key" matrix, which the second cascade
//! pass relies on to force a single global key.

use crate::error::KeyError;
use crate::model::key::{Key, KEY_COUNT};
use crate::model::pitch_class::PITCH_CLASS_COUNT;
use crate::templates::rotate_left;

const LINEAR: [f64; 24] = [
    9.0 / 132.0,
    4.0 / 132.0,
    6.0 / 132.0,
    6.0 / 132.0,
    5.0 / 132.0,
    8.0 / 132.0,
    1.0 / 132.0,
    8.0 / 132.0,
    5.0 / 132.0,
    6.0 / 132.0,
    6.0 / 132.0,
    4.0 / 132.0,
    8.0 / 132.0,
    2.0 / 132.0,
    7.0 / 132.0,
    3.0 / 132.0,
    7.0 / 132.0,
    7.0 / 132.0,
    3.0 / 132.0,
    7.0 / 132.0,
    2.0 / 132.0,
    8.0 / 132.0,
    5.0 / 132.0,
    5.0 / 132.0,
];

const EXPONENTIAL2: [f64; 24] = [
    256.0 / 1245.0,
    8.0 / 1245.0,
    32.0 / 1245.0,
    32.0 / 1245.0,
    16.0 / 1245.0,
    128.0 / 1245.0,
    1.0 / 1245.0,
    128.0 / 1245.0,
    16.0 / 1245.0,
    32.0 / 1245.0,
    32.0 / 1245.0,
    8.0 / 1245.0,
    128.0 / 1245.0,
    2.0 / 1245.0,
    64.0 / 1245.0,
    4.0 / 1245.0,
    64.0 / 1245.0,
    64.0 / 1245.0,
    4.0 / 1245.0,
    64.0 / 1245.0,
    2.0 / 1245.0,
    128.0 / 1245.0,
    16.0 / 1245.0,
    16.0 / 1245.0,
];

const EXPONENTIAL10: [f64; 24] = [
    100000000.0 / 144442221.0,
    1000.0 / 144442221.0,
    100000.0 / 144442221.0,
    100000.0 / 144442221.0,
    10000.0 / 144442221.0,
    10000000.0 / 144442221.0,
    1.0 / 144442221.0,
    10000000.0 / 144442221.0,
    10000.0 / 144442221.0,
    100000.0 / 144442221.0,
    100000.0 / 144442221.0,
    1000.0 / 144442221.0,
    10000000.0 / 144442221.0,
    10.0 / 144442221.0,
    1000000.0 / 144442221.0,
    100.0 / 144442221.0,
    1000000.0 / 144442221.0,
    1000000.0 / 144442221.0,
    100.0 / 144442221.0,
    1000000.0 / 144442221.0,
    10.0 / 144442221.0,
    10000000.0 / 144442221.0,
    10000.0 / 144442221.0,
    10000.0 / 144442221.0,
];

const ZERO: [f64; 24] = [
    1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
];

const SYMMETRICAL: [f64; 24] = [
    1.0 / 24.0,
    1.0 / 24.0,
    1.0 / 24.0,
    1.0 / 24.0,
    1.0 / 24.0,
    1.0 / 24.0,
    1.0 / 24.0,
    1.0 / 24.0,
    1.0 / 24.0,
    1.0 / 24.0,
    1.0 / 24.0,
    1.0 / 24.0,
    1.0 / 24.0,
    1.0 / 24.0,
    1.0 / 24.0,
    1.0 / 24.0,
    1.0 / 24.0,
    1.0 / 24.0,
    1.0 / 24.0,
    1.0 / 24.0,
    1.0 / 24.0,
    1.0 / 24.0,
    1.0 / 24.0,
    1.0 / 24.0,
];

const HEATMAP: [f64; 24] = [
    1.0, 6.0, 4.0, 4.0, 5.0, 2.0, 9.0, 2.0, 5.0, 4.0, 4.0, 6.0, 2.0, 8.0, 3.0, 7.0, 3.0,
    3.0, 7.0, 3.0, 8.0, 2.0, 5.0, 5.0,
];

/// Position of pitch class A within the minor half; the anchor for
/// re-aligning minor source keys, which are indexed by their own tonic
/// rather than by relative-major distance.
const MINOR_ANCHOR: usize = 9;

fn base_template(name: &str) -> Option<&'static [f64; 24]> {
    match name {
        "linear" => Some(&LINEAR),
        "exponential2" => Some(&EXPONENTIAL2),
        "exponential10" => Some(&EXPONENTIAL10),
        "zero" => Some(&ZERO),
        "symmetrical" => Some(&SYMMETRICAL),
        "heatmap" => Some(&HEATMAP),
        _ => None,
    }
}

/// The symmetric 1/24 prior over keys, used as the initial
/// distribution of both decoding passes
pub fn symmetric_initial() -> [f64; KEY_COUNT] {
    SYMMETRICAL
}

/// Transition-template generator
///
/// Holds one 24-element base template and expands it into the full
/// key-to-key weight table by per-source-key rotation. Immutable after
/// construction; build once per decoding session.
#[derive(Debug, Clone)]
pub struct KeyTransition {
    base: [f64; 24],
}

impl KeyTransition {
    /// Select a named transition template
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::InvalidTemplate`] if the name is unknown.
    pub fn new(name: &str) -> Result<Self, KeyError> {
        let base = base_template(name).ok_or_else(|| {
            KeyError::InvalidTemplate(format!("unknown key transition: \"{}\"", name))
        })?;
        Ok(Self { base: *base })
    }

    /// Build a transition template from caller-supplied weights
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::InvalidTemplate`] unless the slice has
    /// exactly 24 entries.
    pub fn custom(weights: &[f64]) -> Result<Self, KeyError> {
        if weights.len() != KEY_COUNT {
            return Err(KeyError::InvalidTemplate(format!(
                "custom key transition must have 24 weights, got {}",
                weights.len()
            )));
        }
        let mut base = [0.0; KEY_COUNT];
        base.copy_from_slice(weights);
        Ok(Self { base })
    }

    /// Build a transition template from an already-validated array
    pub fn from_array(base: [f64; 24]) -> Self {
        Self { base }
    }

    /// The un-rotated 24-element base template
    pub fn base_array(&self) -> &[f64; 24] {
        &self.base
    }

    /// Expand into the full transition table, one row per source key
    ///
    /// For a major source, the tonic half is the base's first 12
    /// entries and the relative half the last 12. For a minor source
    /// the halves swap roles, and the tonic half is first rotate-copied
    /// so it starts at pitch class A, aligning the circle of minor
    /// keys. Both halves then rotate by the common `12 - tonic` amount
    /// and reassemble into the 24-element row.
    pub fn transition_map(&self) -> [[f64; KEY_COUNT]; KEY_COUNT] {
        let mut map = [[0.0; KEY_COUNT]; KEY_COUNT];
        for from in Key::all() {
            let rotation = PITCH_CLASS_COUNT - from.tonic().index();
            let mut tonic_half = [0.0; PITCH_CLASS_COUNT];
            let mut relative_half = [0.0; PITCH_CLASS_COUNT];
            if from.is_major() {
                tonic_half.copy_from_slice(&self.base[..PITCH_CLASS_COUNT]);
                relative_half.copy_from_slice(&self.base[PITCH_CLASS_COUNT..]);
            } else {
                for (i, slot) in tonic_half.iter_mut().enumerate() {
                    *slot = self.base[PITCH_CLASS_COUNT + (MINOR_ANCHOR + i) % PITCH_CLASS_COUNT];
                }
                relative_half.copy_from_slice(&self.base[..PITCH_CLASS_COUNT]);
            }
            let tonic_half = rotate_left(&tonic_half, rotation);
            let relative_half = rotate_left(&relative_half, rotation);
            let row = &mut map[from.index()];
            for to in Key::all() {
                let tonic = to.tonic().index();
                row[to.index()] = if to.is_major() {
                    tonic_half[tonic]
                } else {
                    relative_half[tonic]
                };
            }
        }
        map
    }
}

impl Default for KeyTransition {
    /// The `exponential10` template
    fn default() -> Self {
        Self { base: EXPONENTIAL10 }
    }
}
