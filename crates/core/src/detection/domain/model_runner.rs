use thiserror::Error;

use crate::shared::frame::Frame;

#[derive(Error, Debug)]
pub enum InferenceError {
    #[error("failed to load model: {0}")]
    ModelLoad(String),
    #[error("model execution failed: {0}")]
    Execution(String),
    #[error("model produced no output tensor")]
    MissingOutput,
}

/// Port for the neural-network execution engine.
///
/// Takes a frame already resized to the model input resolution and
/// returns the raw flat output tensor. Implementations may be stateful,
/// hence `&mut self`.
pub trait ModelRunner: Send {
    fn infer(&mut self, frame: &Frame) -> Result<Vec<f32>, InferenceError>;
}
