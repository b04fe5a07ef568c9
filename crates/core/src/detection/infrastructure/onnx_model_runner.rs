//! Face detector model execution via ONNX Runtime (`ort`).
//!
//! Consumes a frame already resized to the model input resolution and
//! returns output tensor 0 flattened to a `Vec<f32>` for the decoder.

use std::path::Path;

use crate::codec::infrastructure::yuv::nv12_to_rgb;
use crate::detection::domain::model_runner::{InferenceError, ModelRunner};
use crate::shared::frame::{Frame, PixelFormat};

pub struct OnnxModelRunner {
    session: ort::session::Session,
}

impl OnnxModelRunner {
    /// Load the detector model from the configured path.
    pub fn new(model_path: &Path) -> Result<Self, InferenceError> {
        let session = ort::session::Session::builder()
            .and_then(|mut b| b.commit_from_file(model_path))
            .map_err(|e| InferenceError::ModelLoad(e.to_string()))?;
        Ok(Self { session })
    }
}

impl ModelRunner for OnnxModelRunner {
    fn infer(&mut self, frame: &Frame) -> Result<Vec<f32>, InferenceError> {
        if frame.format() != PixelFormat::Yuv420sp {
            return Err(InferenceError::Execution(format!(
                "model input must be a raw frame, got {}",
                frame.format()
            )));
        }

        let input_tensor = preprocess(frame);
        let input_value = ort::value::Tensor::from_array(input_tensor)
            .map_err(|e| InferenceError::Execution(e.to_string()))?;
        let outputs = self
            .session
            .run(ort::inputs![input_value])
            .map_err(|e| InferenceError::Execution(e.to_string()))?;

        if outputs.len() == 0 {
            return Err(InferenceError::MissingOutput);
        }

        let tensor = outputs[0]
            .try_extract_array::<f32>()
            .map_err(|e| InferenceError::Execution(e.to_string()))?;
        Ok(tensor.iter().copied().collect())
    }
}

/// Converts an NV12 frame to a normalized NCHW float tensor.
fn preprocess(frame: &Frame) -> ndarray::Array4<f32> {
    let w = frame.width() as usize;
    let h = frame.height() as usize;
    let rgb = nv12_to_rgb(frame.data(), frame.width(), frame.height());

    let mut tensor = ndarray::Array4::<f32>::zeros((1, 3, h, w));
    for y in 0..h {
        for x in 0..w {
            let px = (y * w + x) * 3;
            for c in 0..3 {
                tensor[[0, c, y, x]] = rgb[px + c] as f32 / 255.0;
            }
        }
    }
    tensor
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid_frame(y: u8, w: u32, h: u32) -> Frame {
        let pixels = (w * h) as usize;
        let mut data = vec![y; pixels];
        data.extend(std::iter::repeat(128u8).take(pixels / 2));
        Frame::new(data, w, h, PixelFormat::Yuv420sp)
    }

    #[test]
    fn test_preprocess_shape() {
        let frame = solid_frame(128, 300, 300);
        let tensor = preprocess(&frame);
        assert_eq!(tensor.shape(), &[1, 3, 300, 300]);
    }

    #[test]
    fn test_preprocess_normalized_range() {
        let frame = solid_frame(255, 8, 8);
        let tensor = preprocess(&frame);
        // White frame: every channel close to 1.0 after conversion.
        assert!(tensor.iter().all(|&v| (0.0..=1.0).contains(&v)));
        assert!(tensor[[0, 0, 0, 0]] > 0.95);
    }

    #[test]
    fn test_model_load_failure_is_reported() {
        let result = OnnxModelRunner::new(Path::new("/nonexistent/model.om.onnx"));
        assert!(matches!(result, Err(InferenceError::ModelLoad(_))));
    }

    #[test]
    fn test_corrupt_model_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corrupt.onnx");
        std::fs::write(&path, b"not an onnx model").unwrap();

        let result = OnnxModelRunner::new(&path);
        assert!(matches!(result, Err(InferenceError::ModelLoad(_))));
    }
}
