//! Estimation results and scoring
//!
//! Result types produced by the two-pass cascade, plus the standard
//! weighted evaluation score for comparing a prediction against an
//! annotated ground-truth key.

pub mod result;
pub mod scoring;

pub use result::KeyEstimate;
pub use scoring::score_key;
