//! Observation sequence input
//!
//! Reads pitch-class observation sequences from plain text or CSV
//! files. This is the thin symbol-level front end; producing symbols
//! from audio or MIDI is a job for external feature extractors, whose
//! output lands here as text.

use std::fs;
use std::path::Path;

use crate::error::KeyError;
use crate::model::PitchClass;

/// Read a pitch-class sequence from a file
///
/// The file may mix comma, whitespace, and newline separators; each
/// non-empty token is either a pitch-class spelling (`c#`, `Eb`, ...)
/// or a chromatic index (`0`..`11`).
///
/// # Errors
///
/// Returns [`KeyError::IoError`] if the file cannot be read,
/// [`KeyError::InvalidSymbol`] for an unrecognized token, and
/// [`KeyError::InvalidModel`] if the file contains no symbols at all.
///
/// # Example
///
/// ```no_run
/// use clavis::io::read_pitch_class_sequence;
///
/// let sequence = read_pitch_class_sequence("melody.csv")?;
/// println!("{} observations", sequence.len());
/// # Ok::<(), clavis::KeyError>(())
/// ```
pub fn read_pitch_class_sequence<P: AsRef<Path>>(path: P) -> Result<Vec<PitchClass>, KeyError> {
    let path = path.as_ref();
    log::debug!("Reading pitch-class sequence from {}", path.display());
    let text = fs::read_to_string(path)
        .map_err(|e| KeyError::IoError(format!("{}: {}", path.display(), e)))?;
    parse_pitch_class_sequence(&text)
}

/// Parse a pitch-class sequence from in-memory text
///
/// Same token rules as [`read_pitch_class_sequence`].
///
/// # Errors
///
/// Returns [`KeyError::InvalidSymbol`] for an unrecognized token and
/// [`KeyError::InvalidModel`] for input with no symbols.
pub fn parse_pitch_class_sequence(text: &str) -> Result<Vec<PitchClass>, KeyError> {
    let mut sequence = Vec::new();
    for token in text.split(|c: char| c == ',' || c.is_whitespace()) {
        if token.is_empty() {
            continue;
        }
        let pitch_class = match token.parse::<usize>() {
            Ok(index) => PitchClass::from_index(index)?,
            Err(_) => PitchClass::from_name(token)?,
        };
        sequence.push(pitch_class);
    }
    if sequence.is_empty() {
        return Err(KeyError::InvalidModel(
            "no pitch classes in input".to_string(),
        ));
    }
    log::debug!("Parsed {} pitch-class observations", sequence.len());
    Ok(sequence)
}
