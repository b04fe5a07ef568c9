//! Decodes the detector's flat output tensor into validated detections.
//!
//! The model emits N fixed-size records of 7 floats:
//! `[unused, attribute, confidence, lt_x, lt_y, rb_x, rb_y]`, with box
//! corners as ratios of the input resolution. De-normalization uses the
//! *original* frame dimensions so detections land in source-image pixel
//! space, not resized-model space.

use thiserror::Error;

use crate::detection::domain::face_detection::FaceDetection;
use crate::detection::domain::validation::{clamp_ratio, is_valid_candidate};
use crate::shared::constants::DETECTION_STRIDE;
use crate::shared::geometry::{Point, Rectangle};

const ATTRIBUTE_INDEX: usize = 1;
const SCORE_INDEX: usize = 2;
const LT_X_INDEX: usize = 3;
const LT_Y_INDEX: usize = 4;
const RB_X_INDEX: usize = 5;
const RB_Y_INDEX: usize = 6;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DecodeError {
    #[error("inference output tensor is empty")]
    EmptyTensor,
}

/// Walks the tensor in non-overlapping 7-float windows and returns the
/// candidates that pass validation, in buffer order.
///
/// A partial trailing window is silently dropped. An empty result is
/// success (no faces in frame); only an empty tensor is an error.
pub fn decode(
    tensor: &[f32],
    frame_width: u32,
    frame_height: u32,
    confidence_threshold: f32,
) -> Result<Vec<FaceDetection>, DecodeError> {
    if tensor.is_empty() {
        return Err(DecodeError::EmptyTensor);
    }

    let width = frame_width as f32;
    let height = frame_height as f32;

    let mut detections = Vec::new();
    for window in tensor.chunks_exact(DETECTION_STRIDE) {
        let attr = window[ATTRIBUTE_INDEX];
        let score = window[SCORE_INDEX];

        let rectangle = Rectangle::new(
            Point::new(
                (clamp_ratio(window[LT_X_INDEX]) * width) as i32,
                (clamp_ratio(window[LT_Y_INDEX]) * height) as i32,
            ),
            Point::new(
                (clamp_ratio(window[RB_X_INDEX]) * width) as i32,
                (clamp_ratio(window[RB_Y_INDEX]) * height) as i32,
            ),
        );

        if !is_valid_candidate(attr, score, &rectangle, confidence_threshold) {
            continue;
        }

        log::debug!(
            "decoded face: score={score}, lt=({}, {}), rb=({}, {})",
            rectangle.lt.x,
            rectangle.lt.y,
            rectangle.rb.x,
            rectangle.rb.y
        );
        detections.push(FaceDetection::new(rectangle, score));
    }

    Ok(detections)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const THRESHOLD: f32 = 0.5;

    /// One raw record: face attribute, given score, box from (0.1, 0.2)
    /// to (0.5, 0.8) in ratio space.
    fn record(score: f32) -> [f32; 7] {
        [0.0, 1.0, score, 0.1, 0.2, 0.5, 0.8]
    }

    #[test]
    fn test_single_record_denormalized_to_frame_space() {
        let detections = decode(&record(0.9), 1000, 500, THRESHOLD).unwrap();
        assert_eq!(detections.len(), 1);
        let rect = detections[0].rectangle;
        assert_eq!(rect.lt, Point::new(100, 100));
        assert_eq!(rect.rb, Point::new(500, 400));
        assert_relative_eq!(detections[0].confidence, 0.9);
    }

    #[test]
    fn test_out_of_range_ratios_clamped() {
        let tensor = [0.0, 1.0, 0.9, -0.2, -0.1, 1.5, 2.0];
        let detections = decode(&tensor, 200, 100, THRESHOLD).unwrap();
        assert_eq!(detections.len(), 1);
        let rect = detections[0].rectangle;
        assert_eq!(rect.lt, Point::new(0, 0));
        assert_eq!(rect.rb, Point::new(200, 100));
    }

    #[test]
    fn test_partial_trailing_window_dropped() {
        // 10 floats: one full record plus 3 leftover floats.
        let mut tensor = record(0.9).to_vec();
        tensor.extend([0.0, 1.0, 0.95]);
        let detections = decode(&tensor, 100, 100, THRESHOLD).unwrap();
        assert_eq!(detections.len(), 1);
    }

    #[test]
    fn test_empty_tensor_is_error() {
        assert_eq!(
            decode(&[], 100, 100, THRESHOLD),
            Err(DecodeError::EmptyTensor)
        );
    }

    #[test]
    fn test_background_record_skipped() {
        let mut tensor = record(0.9);
        tensor[ATTRIBUTE_INDEX] = 0.0;
        let detections = decode(&tensor, 100, 100, THRESHOLD).unwrap();
        assert!(detections.is_empty());
    }

    #[test]
    fn test_low_confidence_skipped_is_success() {
        let detections = decode(&record(0.2), 100, 100, THRESHOLD).unwrap();
        assert!(detections.is_empty());
    }

    #[test]
    fn test_degenerate_box_skipped() {
        // All four ratios collapse to the same pixel.
        let tensor = [0.0, 1.0, 0.9, 0.5, 0.5, 0.5, 0.5];
        let detections = decode(&tensor, 100, 100, THRESHOLD).unwrap();
        assert!(detections.is_empty());
    }

    #[test]
    fn test_multiple_records_emitted_in_buffer_order() {
        let mut tensor = Vec::new();
        tensor.extend(record(0.7));
        tensor.extend([0.0, 0.0, 0.99, 0.1, 0.1, 0.9, 0.9]); // background
        tensor.extend(record(0.95));
        let detections = decode(&tensor, 100, 100, THRESHOLD).unwrap();
        assert_eq!(detections.len(), 2);
        assert_relative_eq!(detections[0].confidence, 0.7);
        assert_relative_eq!(detections[1].confidence, 0.95);
    }

    #[test]
    fn test_detections_carry_no_metadata_yet() {
        let detections = decode(&record(0.9), 100, 100, THRESHOLD).unwrap();
        assert!(detections[0].landmarks.is_none());
        assert!(detections[0].pose.is_none());
    }
}
