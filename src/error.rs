//! Error types for the key estimation engine

use std::fmt;

/// Errors that can occur during key estimation
#[derive(Debug, Clone)]
pub enum KeyError {
    /// Unrecognized pitch-class or key symbol
    InvalidSymbol(String),

    /// Unknown template name or malformed custom template
    InvalidTemplate(String),

    /// Invalid model input (empty sequence, mismatched table dimensions, etc.)
    InvalidModel(String),

    /// Every candidate state became unreachable during decoding
    NumericalDegeneracy(String),

    /// Error reading an observation sequence from a file
    IoError(String),
}

impl fmt::Display for KeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyError::InvalidSymbol(msg) => write!(f, "Invalid symbol: {}", msg),
            KeyError::InvalidTemplate(msg) => write!(f, "Invalid template: {}", msg),
            KeyError::InvalidModel(msg) => write!(f, "Invalid model: {}", msg),
            KeyError::NumericalDegeneracy(msg) => write!(f, "Numerical degeneracy: {}", msg),
            KeyError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for KeyError {}
