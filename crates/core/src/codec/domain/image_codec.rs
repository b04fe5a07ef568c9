use thiserror::Error;

use crate::shared::frame::Frame;

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("resize failed: {0}")]
    Resize(String),
    #[error("encode failed: {0}")]
    Encode(String),
}

/// Port for the image codec service: resize a raw frame to the model
/// input resolution, or encode a raw frame to a displayable format.
///
/// Both operations return a fresh owned `Frame`; the input is never
/// mutated.
pub trait ImageCodec: Send {
    fn resize(&self, frame: &Frame, width: u32, height: u32) -> Result<Frame, CodecError>;

    /// Converts a raw frame to JPEG for the presenter.
    fn encode(&self, frame: &Frame) -> Result<Frame, CodecError>;
}
