use crate::shared::geometry::{LandmarkSet, PoseEstimate, Rectangle};

/// A validated face detection in source-image pixel space.
///
/// Landmarks and pose are attached by downstream estimators when
/// available; the detector itself only produces box and confidence.
#[derive(Clone, Debug, PartialEq)]
pub struct FaceDetection {
    pub rectangle: Rectangle,
    pub confidence: f32,
    pub landmarks: Option<LandmarkSet>,
    pub pose: Option<PoseEstimate>,
}

impl FaceDetection {
    pub fn new(rectangle: Rectangle, confidence: f32) -> Self {
        Self {
            rectangle,
            confidence,
            landmarks: None,
            pose: None,
        }
    }

    pub fn with_landmarks(mut self, landmarks: LandmarkSet) -> Self {
        self.landmarks = Some(landmarks);
        self
    }

    pub fn with_pose(mut self, pose: PoseEstimate) -> Self {
        self.pose = Some(pose);
        self
    }
}
