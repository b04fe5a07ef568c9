//! Candidate acceptance checks shared by the tensor decoder.
//!
//! A decoded window survives only if its attribute says "face", its
//! confidence clears the configured threshold without exceeding 1.0, and
//! its rectangle has not collapsed to a point. The three checks are
//! order-independent.

use crate::shared::constants::{ATTRIBUTE_EPSILON, FACE_ATTRIBUTE};
use crate::shared::geometry::Rectangle;

/// Clamps a normalized coordinate into [0.0, 1.0].
pub fn clamp_ratio(ratio: f32) -> f32 {
    ratio.clamp(0.0, 1.0)
}

/// True iff `threshold < score <= 1.0`. A score exactly at the threshold
/// is rejected.
pub fn is_valid_confidence(score: f32, threshold: f32) -> bool {
    score > threshold && score <= 1.0
}

/// The model labels faces with attribute 1.0; anything outside the
/// tolerance is background and discarded.
pub fn is_background_attribute(attr: f32) -> bool {
    (attr - FACE_ATTRIBUTE).abs() > ATTRIBUTE_EPSILON
}

pub fn is_valid_candidate(attr: f32, score: f32, rectangle: &Rectangle, threshold: f32) -> bool {
    !is_background_attribute(attr)
        && is_valid_confidence(score, threshold)
        && !rectangle.is_degenerate()
}
