use serde::{Deserialize, Serialize};

use crate::detection::domain::face_detection::FaceDetection;
use crate::shared::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use crate::shared::frame::Frame;
use crate::shared::geometry::Point;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageFormat {
    Jpeg,
}

/// One detection box with its display label.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RectangleAttr {
    pub lt: Point,
    pub rb: Point,
    pub label: String,
}

/// Outbound message to the visualization service: the encoded frame,
/// one labeled rectangle per detection, and the landmark point list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PresentFrame {
    pub format: MessageFormat,
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub rectangles: Vec<RectangleAttr>,
    pub points: Vec<Point>,
}

impl PresentFrame {
    /// Packages an encoded frame and its detections.
    ///
    /// The resolution tags are fixed to the presenter's display size,
    /// independent of the actual frame dimensions. Labels come from the
    /// pose estimate when one is attached, otherwise from the detection
    /// confidence. Every landmark coordinate is clamped to >= 0 before
    /// transmission.
    pub fn build(frame: Frame, detections: &[FaceDetection]) -> Self {
        let mut rectangles = Vec::with_capacity(detections.len());
        let mut points = Vec::new();

        for detection in detections {
            let label = match detection.pose {
                Some(pose) => pose.label(),
                None => format!("Face:{}%", (detection.confidence * 100.0) as i32),
            };
            rectangles.push(RectangleAttr {
                lt: detection.rectangle.lt,
                rb: detection.rectangle.rb,
                label,
            });

            if let Some(ref landmarks) = detection.landmarks {
                points.extend(landmarks.clamped().points().iter().copied());
            }
        }

        Self {
            format: MessageFormat::Jpeg,
            width: DISPLAY_WIDTH,
            height: DISPLAY_HEIGHT,
            data: frame.into_data(),
            rectangles,
            points,
        }
    }
}
