//! Stage A: resize the frame to the model input resolution, run the
//! detector, decode its output against the original frame geometry, and
//! forward the record downstream.

use std::sync::atomic::AtomicBool;
use std::time::Duration;

use crate::codec::domain::image_codec::ImageCodec;
use crate::detection::domain::model_runner::ModelRunner;
use crate::detection::domain::tensor_decoder;
use crate::pipeline::record_sink::{forward_with_backpressure, ForwardOutcome, RecordSink};
use crate::shared::constants::{MODEL_INPUT_HEIGHT, MODEL_INPUT_WIDTH};
use crate::shared::frame::PixelFormat;
use crate::shared::record::{DetectionRecord, ErrorKind};

/// Runs detection on one record.
///
/// Failures are recorded on the record, not propagated: a record that
/// arrives errored or fails any step here still travels downstream so
/// the publish stage can surface the original frame.
pub fn process(
    codec: &dyn ImageCodec,
    runner: &mut dyn ModelRunner,
    confidence_threshold: f32,
    mut record: DetectionRecord,
) -> DetectionRecord {
    if let Some(error) = record.error() {
        log::warn!("record arrived errored, skipping detection: {}", error.message);
        return record;
    }
    if record.frame().size() == 0 {
        record.set_error(ErrorKind::Codec, "frame buffer is empty");
        return record;
    }
    let format = record.frame().format();
    if format != PixelFormat::Yuv420sp {
        record.set_error(
            ErrorKind::UnsupportedFormat,
            format!("cannot run detection on {format} frame"),
        );
        return record;
    }

    let resized = match codec.resize(record.frame(), MODEL_INPUT_WIDTH, MODEL_INPUT_HEIGHT) {
        Ok(frame) => frame,
        Err(e) => {
            log::error!("resize for inference failed: {e}");
            record.set_error(ErrorKind::Codec, e.to_string());
            return record;
        }
    };

    let tensor = match runner.infer(&resized) {
        Ok(tensor) => tensor,
        Err(e) => {
            log::error!("model execution failed: {e}");
            record.set_error(ErrorKind::Inference, e.to_string());
            return record;
        }
    };

    // Boxes are de-normalized against the original frame, not the
    // resized model input.
    match tensor_decoder::decode(
        &tensor,
        record.frame().width(),
        record.frame().height(),
        confidence_threshold,
    ) {
        Ok(detections) => {
            log::debug!("{} face(s) detected", detections.len());
            record.set_detections(detections);
        }
        Err(e) => {
            log::error!("output tensor decode failed: {e}");
            record.set_error(ErrorKind::Decode, e.to_string());
        }
    }
    record
}

/// Processes one record and forwards it with the backpressure policy.
/// Forwarding is unconditional: errored records travel downstream too.
pub fn run(
    codec: &dyn ImageCodec,
    runner: &mut dyn ModelRunner,
    confidence_threshold: f32,
    record: DetectionRecord,
    sink: &dyn RecordSink,
    retry_interval: Duration,
    cancelled: &AtomicBool,
) -> ForwardOutcome {
    let record = process(codec, runner, confidence_threshold, record);
    forward_with_backpressure(sink, record, retry_interval, cancelled)
}
