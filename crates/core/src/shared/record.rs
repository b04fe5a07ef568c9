use crate::detection::domain::face_detection::FaceDetection;
use crate::shared::frame::Frame;

/// Where a frame originated. Registration frames come from the enrollment
/// flow and must never be dropped under backpressure; interactive frames
/// are latency-sensitive and expendable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameSource {
    Interactive,
    Registration,
}

/// Category of a non-fatal per-record failure. Transport failures are
/// not listed: they happen at the record's terminal point and are
/// reported to the caller directly, never carried in a record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    UnsupportedFormat,
    Codec,
    Inference,
    Decode,
}

/// Error carried inside a record so downstream stages can observe and
/// react instead of the failure being dropped on the floor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErrorInfo {
    pub kind: ErrorKind,
    pub message: String,
}

/// The unit of work passed between pipeline stages: one frame, the
/// detections found in it, and an error slot.
///
/// Created once per input frame, mutated by stage A (detections appended
/// or error set), consumed by stage B, then discarded after dispatch.
#[derive(Clone, Debug)]
pub struct DetectionRecord {
    frame: Frame,
    source: FrameSource,
    detections: Vec<FaceDetection>,
    error: Option<ErrorInfo>,
}

impl DetectionRecord {
    pub fn new(frame: Frame, source: FrameSource) -> Self {
        Self {
            frame,
            source,
            detections: Vec::new(),
            error: None,
        }
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn source(&self) -> FrameSource {
        self.source
    }

    pub fn detections(&self) -> &[FaceDetection] {
        &self.detections
    }

    pub fn set_detections(&mut self, detections: Vec<FaceDetection>) {
        self.detections = detections;
    }

    pub fn error(&self) -> Option<&ErrorInfo> {
        self.error.as_ref()
    }

    pub fn set_error(&mut self, kind: ErrorKind, message: impl Into<String>) {
        self.error = Some(ErrorInfo {
            kind,
            message: message.into(),
        });
    }

    /// Splits the record into its frame and detections for packaging.
    pub fn into_parts(self) -> (Frame, Vec<FaceDetection>) {
        (self.frame, self.detections)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::frame::PixelFormat;
    use crate::shared::geometry::{Point, Rectangle};

    fn frame() -> Frame {
        Frame::new(vec![0u8; 6], 2, 2, PixelFormat::Yuv420sp)
    }

    fn detection() -> FaceDetection {
        FaceDetection::new(
            Rectangle::new(Point::new(0, 0), Point::new(10, 10)),
            0.9,
        )
    }

    #[test]
    fn test_new_record_is_clean() {
        let record = DetectionRecord::new(frame(), FrameSource::Interactive);
        assert!(record.detections().is_empty());
        assert!(record.error().is_none());
        assert_eq!(record.source(), FrameSource::Interactive);
    }

    #[test]
    fn test_set_error_fills_slot() {
        let mut record = DetectionRecord::new(frame(), FrameSource::Registration);
        record.set_error(ErrorKind::Inference, "model execution failed");
        let err = record.error().unwrap();
        assert_eq!(err.kind, ErrorKind::Inference);
        assert_eq!(err.message, "model execution failed");
    }

    #[test]
    fn test_set_detections_replaces() {
        let mut record = DetectionRecord::new(frame(), FrameSource::Interactive);
        record.set_detections(vec![detection(), detection()]);
        assert_eq!(record.detections().len(), 2);
    }

    #[test]
    fn test_into_parts() {
        let mut record = DetectionRecord::new(frame(), FrameSource::Interactive);
        record.set_detections(vec![detection()]);
        let (frame, detections) = record.into_parts();
        assert_eq!(frame.width(), 2);
        assert_eq!(detections.len(), 1);
    }
}
