//! Stage B: encode the frame to JPEG, package it with the detection
//! overlays, and dispatch it to the visualization service.

use thiserror::Error;

use crate::codec::domain::image_codec::{CodecError, ImageCodec};
use crate::dispatch::domain::present_message::PresentFrame;
use crate::dispatch::domain::presenter_channel::{PresenterChannel, SendStatus, TransportError};
use crate::shared::frame::PixelFormat;
use crate::shared::record::DetectionRecord;

#[derive(Error, Debug)]
pub enum PublishError {
    #[error("cannot publish {0} frame")]
    UnsupportedFormat(PixelFormat),
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Publishes one record.
///
/// An upstream error does not stop publication: the frame still goes out,
/// just without overlays, so the operator sees the live feed even when
/// detection is failing. Only a frame that cannot be encoded at all is
/// rejected here.
pub fn process(
    codec: &dyn ImageCodec,
    channel: &mut dyn PresenterChannel,
    record: DetectionRecord,
) -> Result<SendStatus, PublishError> {
    if let Some(error) = record.error() {
        log::warn!(
            "upstream error on frame, publishing without overlays: {}",
            error.message
        );
    }
    let format = record.frame().format();
    if format != PixelFormat::Yuv420sp {
        return Err(PublishError::UnsupportedFormat(format));
    }

    let (frame, detections) = record.into_parts();
    let encoded = codec.encode(&frame)?;
    let message = PresentFrame::build(encoded, &detections);

    let status = channel.send(&message)?;
    if let SendStatus::Rejected { code } = status {
        log::warn!("visualization service rejected frame, status {code}");
    }
    Ok(status)
}
