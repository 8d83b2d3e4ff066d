//! Key-profile templates (emission probabilities)
//!
//! Each profile is a 12-element array of relative pitch-class weights
//! for a C tonic; the per-key emission rows are rotations of it. The
//! named profiles come from the key-finding literature:
//!
//! - `krumhansl_kessler`: Krumhansl & Kessler (1982) probe-tone ratings
//! - `aarden_essen`: Aarden (2003), derived from the Essen folksong corpus
//! - `sapp`: Sapp's simplified weights (scale tones only)
//! - `bellman_budge`: Bellman (2005) chord-based profile
//! - `temperley`: Temperley (2007) Bayesian note-distribution profile
//! - `albrecht_shanahan1`/`albrecht_shanahan2`: Albrecht & Shanahan (2013)
//!
//! The weights are unnormalized relative likelihoods; Viterbi decoding
//! only compares scores within a step, so rows are used as-is.

use crate::error::KeyError;
use crate::model::key::{Key, KEY_COUNT};
use crate::model::pitch_class::PITCH_CLASS_COUNT;
use crate::templates::rotate_left;

const KRUMHANSL_KESSLER_MAJOR: [f64; 12] = [
    0.15195022732711172,
    0.0533620483369227,
    0.08327351040918879,
    0.05575496530270399,
    0.10480976310122037,
    0.09787030390045463,
    0.06030150753768843,
    0.1241923905240488,
    0.05719071548217276,
    0.08758076094759511,
    0.05479779851639147,
    0.06891600861450106,
];

const KRUMHANSL_KESSLER_MINOR: [f64; 12] = [
    0.14221523253201526,
    0.06021118849696697,
    0.07908335205571781,
    0.12087171422152324,
    0.05841383958660975,
    0.07930802066951245,
    0.05706582790384183,
    0.1067175915524601,
    0.08941810829027184,
    0.06043585711076162,
    0.07503931700741405,
    0.07121995057290496,
];

const AARDEN_ESSEN_MAJOR: [f64; 12] = [
    0.17766092893562843,
    0.001456239417504233,
    0.1492649402940239,
    0.0016018593592562562,
    0.19804892078043168,
    0.11358695456521818,
    0.002912478835008466,
    0.2206199117520353,
    0.001456239417504233,
    0.08154936738025305,
    0.002329979068008373,
    0.049512180195127924,
];

const AARDEN_ESSEN_MINOR: [f64; 12] = [
    0.18264800547944018,
    0.007376190221285707,
    0.14049900421497014,
    0.16859900505797015,
    0.0070249402107482066,
    0.14436200433086013,
    0.0070249402107482066,
    0.18616100558483017,
    0.04566210136986304,
    0.019318600579558018,
    0.07376190221285707,
    0.017562300526869017,
];

const SAPP_MAJOR: [f64; 12] = [
    0.2222222222222222,
    0.0,
    0.1111111111111111,
    0.0,
    0.1111111111111111,
    0.1111111111111111,
    0.0,
    0.2222222222222222,
    0.0,
    0.1111111111111111,
    0.0,
    0.1111111111111111,
];

const SAPP_MINOR: [f64; 12] = [
    0.2222222222222222,
    0.0,
    0.1111111111111111,
    0.1111111111111111,
    0.0,
    0.1111111111111111,
    0.0,
    0.2222222222222222,
    0.1111111111111111,
    0.0,
    0.05555555555555555,
    0.05555555555555555,
];

const BELLMAN_BUDGE_MAJOR: [f64; 12] = [
    0.168, 0.0086, 0.1295, 0.0141, 0.1349, 0.1193, 0.0125, 0.2028,
    0.018000000000000002, 0.0804, 0.0062, 0.1057,
];

const BELLMAN_BUDGE_MINOR: [f64; 12] = [
    0.1816,
    0.0069,
    0.12990000000000002,
    0.1334,
    0.010700000000000001,
    0.1115,
    0.0138,
    0.2107,
    0.07490000000000001,
    0.015300000000000001,
    0.0092,
    0.10210000000000001,
];

const TEMPERLEY_MAJOR: [f64; 12] = [
    0.17616580310880825,
    0.014130946773433817,
    0.11493170042392838,
    0.019312293923692884,
    0.15779557230334432,
    0.10833725859632594,
    0.02260951483749411,
    0.16839378238341965,
    0.02449364107395195,
    0.08619877531794629,
    0.013424399434762127,
    0.09420631182289213,
];

const TEMPERLEY_MINOR: [f64; 12] = [
    0.1702127659574468,
    0.020081281377002155,
    0.1133158020559407,
    0.14774085584508725,
    0.011714080803251255,
    0.10996892182644036,
    0.02510160172125269,
    0.1785799665311977,
    0.09658140090843893,
    0.016017212526894576,
    0.03179536218025341,
    0.07889074826679417,
];

const ALBRECHT_SHANAHAN1_MAJOR: [f64; 12] = [
    0.238, 0.006, 0.111, 0.006, 0.137, 0.094, 0.016, 0.214, 0.009, 0.080, 0.008, 0.081,
];

const ALBRECHT_SHANAHAN1_MINOR: [f64; 12] = [
    0.220, 0.006, 0.104, 0.123, 0.019, 0.103, 0.012, 0.214, 0.062, 0.022, 0.061, 0.052,
];

const ALBRECHT_SHANAHAN2_MAJOR: [f64; 12] = [
    0.21169, 0.00892766, 0.120448, 0.0100265, 0.131444, 0.0911768, 0.0215947, 0.204703,
    0.012894, 0.0900445, 0.012617, 0.0844338,
];

const ALBRECHT_SHANAHAN2_MINOR: [f64; 12] = [
    0.201933, 0.009335, 0.107284, 0.124169, 0.0199224, 0.108324, 0.014314, 0.202699,
    0.0653907, 0.0252515, 0.071959, 0.049419,
];

// Scale-tone-only minor variants, one per minor scale form.
const SIMPLE_NATURAL_MINOR: [f64; 12] = [
    0.2222222222222222,
    0.0,
    0.1111111111111111,
    0.1111111111111111,
    0.0,
    0.1111111111111111,
    0.0,
    0.2222222222222222,
    0.1111111111111111,
    0.0,
    0.1111111111111111,
    0.0,
];

const SIMPLE_HARMONIC_MINOR: [f64; 12] = [
    0.2222222222222222,
    0.0,
    0.1111111111111111,
    0.1111111111111111,
    0.0,
    0.1111111111111111,
    0.0,
    0.2222222222222222,
    0.1111111111111111,
    0.0,
    0.0,
    0.1111111111111111,
];

const SIMPLE_MELODIC_MINOR: [f64; 12] = [
    0.2222222222222222,
    0.0,
    0.1111111111111111,
    0.1111111111111111,
    0.0,
    0.1111111111111111,
    0.0,
    0.2222222222222222,
    0.05555555555555555,
    0.05555555555555555,
    0.05555555555555555,
    0.05555555555555555,
];

/// Look up a named major-mode profile
pub(crate) fn major_template(name: &str) -> Option<&'static [f64; 12]> {
    match name {
        "krumhansl_kessler" => Some(&KRUMHANSL_KESSLER_MAJOR),
        "aarden_essen" => Some(&AARDEN_ESSEN_MAJOR),
        "sapp" => Some(&SAPP_MAJOR),
        "bellman_budge" => Some(&BELLMAN_BUDGE_MAJOR),
        "temperley" => Some(&TEMPERLEY_MAJOR),
        "albrecht_shanahan1" => Some(&ALBRECHT_SHANAHAN1_MAJOR),
        "albrecht_shanahan2" => Some(&ALBRECHT_SHANAHAN2_MAJOR),
        _ => None,
    }
}

/// Look up a named minor-mode profile
pub(crate) fn minor_template(name: &str) -> Option<&'static [f64; 12]> {
    match name {
        "krumhansl_kessler" => Some(&KRUMHANSL_KESSLER_MINOR),
        "aarden_essen" => Some(&AARDEN_ESSEN_MINOR),
        "sapp" => Some(&SAPP_MINOR),
        "bellman_budge" => Some(&BELLMAN_BUDGE_MINOR),
        "temperley" => Some(&TEMPERLEY_MINOR),
        "albrecht_shanahan1" => Some(&ALBRECHT_SHANAHAN1_MINOR),
        "albrecht_shanahan2" => Some(&ALBRECHT_SHANAHAN2_MINOR),
        "simple_natural_minor" => Some(&SIMPLE_NATURAL_MINOR),
        "simple_harmonic_minor" => Some(&SIMPLE_HARMONIC_MINOR),
        "simple_melodic_minor" => Some(&SIMPLE_MELODIC_MINOR),
        _ => None,
    }
}

/// Emission-template generator
///
/// Holds one major and one minor 12-element base template and expands
/// them into per-key pitch-class weight rows by rotation. Immutable
/// after construction; build once per decoding session.
#[derive(Debug, Clone)]
pub struct KeyProfile {
    major: [f64; 12],
    minor: [f64; 12],
}

impl KeyProfile {
    /// Select named major and minor profiles
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::InvalidTemplate`] if either name is unknown
    /// for its mode.
    pub fn new(major_name: &str, minor_name: &str) -> Result<Self, KeyError> {
        let major = major_template(major_name).ok_or_else(|| {
            KeyError::InvalidTemplate(format!("unknown major key profile: \"{}\"", major_name))
        })?;
        let minor = minor_template(minor_name).ok_or_else(|| {
            KeyError::InvalidTemplate(format!("unknown minor key profile: \"{}\"", minor_name))
        })?;
        Ok(Self {
            major: *major,
            minor: *minor,
        })
    }

    /// Select the same named profile for both modes
    pub fn from_name(name: &str) -> Result<Self, KeyError> {
        Self::new(name, name)
    }

    /// Build a profile from caller-supplied weights
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::InvalidTemplate`] unless both slices have
    /// exactly 12 entries.
    pub fn custom(major: &[f64], minor: &[f64]) -> Result<Self, KeyError> {
        Ok(Self {
            major: profile_array(major, "major")?,
            minor: profile_array(minor, "minor")?,
        })
    }

    /// Build a profile from already-validated arrays
    pub fn from_arrays(major: [f64; 12], minor: [f64; 12]) -> Self {
        Self { major, minor }
    }

    /// The un-rotated major base template
    pub fn major_profile(&self) -> &[f64; 12] {
        &self.major
    }

    /// The un-rotated minor base template
    pub fn minor_profile(&self) -> &[f64; 12] {
        &self.minor
    }

    /// Expand into the full emission table, one row per key
    ///
    /// For each key, the base template of the matching mode is rotated
    /// by `12 - tonic` so index 0 lines up with the key's own tonic;
    /// `map[key][pc]` is then the rotated weight at `pc`. Rows are
    /// defined for every (key, pitch class) pair but do not sum to 1.
    pub fn emission_map(&self) -> [[f64; PITCH_CLASS_COUNT]; KEY_COUNT] {
        let mut map = [[0.0; PITCH_CLASS_COUNT]; KEY_COUNT];
        for key in Key::all() {
            let base = if key.is_major() { &self.major } else { &self.minor };
            let rotation = PITCH_CLASS_COUNT - key.tonic().index();
            map[key.index()] = rotate_left(base, rotation);
        }
        map
    }
}

impl Default for KeyProfile {
    /// `temperley` major, `sapp` minor
    fn default() -> Self {
        Self {
            major: TEMPERLEY_MAJOR,
            minor: SAPP_MINOR,
        }
    }
}

pub(crate) fn profile_array(weights: &[f64], mode: &str) -> Result<[f64; 12], KeyError> {
    if weights.len() != PITCH_CLASS_COUNT {
        return Err(KeyError::InvalidTemplate(format!(
            "custom {} profile must have 12 weights, got {}",
            mode,
            weights.len()
        )));
    }
    let mut array = [0.0; PITCH_CLASS_COUNT];
    array.copy_from_slice(weights);
    Ok(array)
}
