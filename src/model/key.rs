//! Major and minor keys, with the four derived-key relations

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::KeyError;
use crate::model::pitch_class::{PitchClass, PITCH_CLASS_COUNT};

/// Number of keys (12 major + 12 minor)
pub const KEY_COUNT: usize = 24;

/// A major or minor tonal center
///
/// Indices `[0, 12)` are the major keys, where the index equals the
/// tonic's chromatic index; `[12, 24)` are the minor keys, where the
/// index is `12 + tonic`. Equality and ordering follow the index.
///
/// The canonical spelling is the tonic's name, capitalized for major
/// keys and lowercase for minor keys (`"Eb"` is E-flat major, `"eb"`
/// is E-flat minor), matching the usual shorthand of key-annotated
/// ground-truth datasets.
///
/// # Example
///
/// ```
/// use clavis::model::Key;
///
/// let a_minor = Key::from_name("a")?;
/// assert_eq!(a_minor.index(), 21);
/// assert_eq!(a_minor.relative(), Key::from_name("C")?);
/// # Ok::<(), clavis::KeyError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Key(u8);

impl Key {
    /// Create a key from its index (0..24)
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::InvalidSymbol`] if `index` is 24 or larger.
    pub fn from_index(index: usize) -> Result<Self, KeyError> {
        if index < KEY_COUNT {
            Ok(Key(index as u8))
        } else {
            Err(KeyError::InvalidSymbol(format!(
                "key index out of range: {}",
                index
            )))
        }
    }

    /// The major key with the given tonic
    pub fn major(tonic: PitchClass) -> Self {
        Key(tonic.index() as u8)
    }

    /// The minor key with the given tonic
    pub fn minor(tonic: PitchClass) -> Self {
        Key((PITCH_CLASS_COUNT + tonic.index()) as u8)
    }

    /// Parse a key spelling
    ///
    /// An uppercase first letter selects the major mode, a lowercase
    /// first letter the minor mode; the tonic accepts the same
    /// enharmonic spellings as [`PitchClass::from_name`] (`"F#"` is
    /// F-sharp major, `"bb"` is B-flat minor).
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::InvalidSymbol`] for an empty string or an
    /// unrecognized tonic.
    pub fn from_name(name: &str) -> Result<Self, KeyError> {
        let first = name.chars().next().ok_or_else(|| {
            KeyError::InvalidSymbol("empty key name".to_string())
        })?;
        let tonic = PitchClass::from_name(name)?;
        if first.is_uppercase() {
            Ok(Key::major(tonic))
        } else {
            Ok(Key::minor(tonic))
        }
    }

    /// Index of this key (0..24)
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// The key's tonic pitch class
    pub fn tonic(self) -> PitchClass {
        PitchClass::from_index_wrapped(self.0 as usize)
    }

    /// True for the 12 major keys
    pub fn is_major(self) -> bool {
        (self.0 as usize) < PITCH_CLASS_COUNT
    }

    /// True for the 12 minor keys
    pub fn is_minor(self) -> bool {
        !self.is_major()
    }

    /// Canonical spelling: capitalized tonic for major, lowercase for minor
    pub fn name(self) -> String {
        let tonic = self.tonic().name();
        if self.is_major() {
            let mut chars = tonic.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        } else {
            tonic.to_string()
        }
    }

    /// The relative key: major -> relative minor, minor -> relative major
    ///
    /// Euclidean modulo keeps the result non-negative for every input.
    pub fn relative(self) -> Key {
        if self.is_major() {
            Key((self.0 + 9) % 12 + 12)
        } else {
            Key((i16::from(self.0) - 9).rem_euclid(12) as u8)
        }
    }

    /// The parallel key: same tonic, opposite mode
    pub fn parallel(self) -> Key {
        if self.is_major() {
            Key(self.0 + 12)
        } else {
            Key(self.0 - 12)
        }
    }

    /// The key a perfect fifth above, in the same mode
    pub fn dominant(self) -> Key {
        let tonic = (self.tonic().index() + 7) % 12;
        Key((tonic + if self.is_minor() { 12 } else { 0 }) as u8)
    }

    /// The key a perfect fourth above, in the same mode
    pub fn subdominant(self) -> Key {
        let tonic = (self.tonic().index() + 5) % 12;
        Key((tonic + if self.is_minor() { 12 } else { 0 }) as u8)
    }

    /// All 24 keys, in index order (majors first)
    pub fn all() -> impl Iterator<Item = Key> {
        (0..KEY_COUNT as u8).map(Key)
    }
}

impl fmt::Display for Key {
    /// Reporting form: capitalized tonic plus mode, e.g. `"F# minor"`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tonic = self.tonic().name();
        let mut chars = tonic.chars();
        if let Some(first) = chars.next() {
            for upper in first.to_uppercase() {
                write!(f, "{}", upper)?;
            }
            f.write_str(chars.as_str())?;
        }
        write!(f, " {}", if self.is_major() { "major" } else { "minor" })
    }
}

impl FromStr for Key {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Key::from_name(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_layout() {
        let c_major = Key::from_name("C").unwrap();
        assert_eq!(c_major.index(), 0);
        assert!(c_major.is_major());

        let c_minor = Key::from_name("c").unwrap();
        assert_eq!(c_minor.index(), 12);
        assert!(c_minor.is_minor());

        let b_minor = Key::from_name("b").unwrap();
        assert_eq!(b_minor.index(), 23);
    }

    #[test]
    fn test_from_index_out_of_range() {
        assert!(Key::from_index(24).is_err());
    }

    #[test]
    fn test_name_roundtrip() {
        for key in Key::all() {
            let parsed = Key::from_name(&key.name()).unwrap();
            assert_eq!(parsed, key, "roundtrip failed for {}", key.name());
        }
    }

    #[test]
    fn test_enharmonic_parsing() {
        assert_eq!(Key::from_name("Db").unwrap(), Key::from_index(1).unwrap());
        assert_eq!(Key::from_name("g#").unwrap(), Key::from_index(20).unwrap());
    }

    #[test]
    fn test_relative() {
        // C major <-> a minor
        let c_major = Key::from_index(0).unwrap();
        let a_minor = Key::from_index(21).unwrap();
        assert_eq!(c_major.relative(), a_minor);
        assert_eq!(a_minor.relative(), c_major);

        // Eb major <-> c minor
        let eb_major = Key::from_index(3).unwrap();
        let c_minor = Key::from_index(12).unwrap();
        assert_eq!(eb_major.relative(), c_minor);
        assert_eq!(c_minor.relative(), eb_major);
    }

    #[test]
    fn test_relative_involution() {
        for key in Key::all() {
            assert_eq!(key.relative().relative(), key, "failed for {}", key);
        }
    }

    #[test]
    fn test_parallel_involution() {
        for key in Key::all() {
            assert_eq!(key.parallel().parallel(), key, "failed for {}", key);
            assert_eq!(key.parallel().tonic(), key.tonic());
            assert_ne!(key.parallel().is_major(), key.is_major());
        }
    }

    #[test]
    fn test_dominant_subdominant_inverse() {
        for key in Key::all() {
            assert_eq!(key.subdominant().dominant(), key, "failed for {}", key);
            assert_eq!(key.dominant().subdominant(), key, "failed for {}", key);
        }
    }

    #[test]
    fn test_dominant() {
        // C major -> G major, a minor -> e minor
        assert_eq!(
            Key::from_name("C").unwrap().dominant(),
            Key::from_name("G").unwrap()
        );
        assert_eq!(
            Key::from_name("a").unwrap().dominant(),
            Key::from_name("e").unwrap()
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Key::from_name("C").unwrap().to_string(), "C major");
        assert_eq!(Key::from_name("f#").unwrap().to_string(), "F# minor");
        assert_eq!(Key::from_name("eb").unwrap().to_string(), "Eb minor");
    }
}
