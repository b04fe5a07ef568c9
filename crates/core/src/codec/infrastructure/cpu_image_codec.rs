use crate::codec::domain::image_codec::{CodecError, ImageCodec};
use crate::codec::infrastructure::yuv::nv12_to_rgb;
use crate::shared::constants::JPEG_QUALITY;
use crate::shared::frame::{nv12_size, Frame, PixelFormat};

/// Software image codec: nearest-neighbor NV12 resize and NV12 -> JPEG
/// encoding via the `image` crate.
///
/// Stands in for a hardware codec service; the pipeline only depends on
/// the `ImageCodec` port.
#[derive(Default)]
pub struct CpuImageCodec;

impl CpuImageCodec {
    pub fn new() -> Self {
        Self
    }
}

impl ImageCodec for CpuImageCodec {
    fn resize(&self, frame: &Frame, width: u32, height: u32) -> Result<Frame, CodecError> {
        if frame.format() != PixelFormat::Yuv420sp {
            return Err(CodecError::Resize(format!(
                "cannot resize {} frame",
                frame.format()
            )));
        }
        if frame.size() != nv12_size(frame.width(), frame.height()) {
            return Err(CodecError::Resize(format!(
                "buffer size {} does not match {}x{} NV12 layout",
                frame.size(),
                frame.width(),
                frame.height()
            )));
        }

        let data = resize_nv12(
            frame.data(),
            frame.width(),
            frame.height(),
            width,
            height,
        );
        Ok(Frame::new(data, width, height, PixelFormat::Yuv420sp))
    }

    fn encode(&self, frame: &Frame) -> Result<Frame, CodecError> {
        if frame.format() != PixelFormat::Yuv420sp {
            return Err(CodecError::Encode(format!(
                "cannot encode {} frame",
                frame.format()
            )));
        }
        if frame.size() != nv12_size(frame.width(), frame.height()) {
            return Err(CodecError::Encode(format!(
                "buffer size {} does not match {}x{} NV12 layout",
                frame.size(),
                frame.width(),
                frame.height()
            )));
        }

        let rgb = nv12_to_rgb(frame.data(), frame.width(), frame.height());
        let mut jpeg = Vec::new();
        let mut encoder =
            image::codecs::jpeg::JpegEncoder::new_with_quality(&mut jpeg, JPEG_QUALITY);
        encoder
            .encode(
                &rgb,
                frame.width(),
                frame.height(),
                image::ExtendedColorType::Rgb8,
            )
            .map_err(|e| CodecError::Encode(e.to_string()))?;

        Ok(Frame::new(jpeg, frame.width(), frame.height(), PixelFormat::Jpeg))
    }
}

/// Nearest-neighbor resize of both NV12 planes, sampling at pixel
/// centers.
fn resize_nv12(src: &[u8], src_w: u32, src_h: u32, dst_w: u32, dst_h: u32) -> Vec<u8> {
    let (sw, sh) = (src_w as usize, src_h as usize);
    let (dw, dh) = (dst_w as usize, dst_h as usize);

    let (src_y, src_uv) = src.split_at(sw * sh);
    let mut dst = vec![0u8; nv12_size(dst_w, dst_h)];
    let (dst_y, dst_uv) = dst.split_at_mut(dw * dh);

    for y in 0..dh {
        let sy = sample(y, dh, sh);
        for x in 0..dw {
            let sx = sample(x, dw, sw);
            dst_y[y * dw + x] = src_y[sy * sw + sx];
        }
    }

    let (scw, sch) = (sw / 2, sh / 2);
    let (dcw, dch) = (dw / 2, dh / 2);
    for cy in 0..dch {
        let scy = sample(cy, dch, sch);
        for cx in 0..dcw {
            let scx = sample(cx, dcw, scw);
            let s = scy * sw + scx * 2;
            let d = cy * dw + cx * 2;
            dst_uv[d] = src_uv[s];
            dst_uv[d + 1] = src_uv[s + 1];
        }
    }

    dst
}

fn sample(dst_index: usize, dst_len: usize, src_len: usize) -> usize {
    ((((dst_index as f64) + 0.5) * src_len as f64 / dst_len as f64) as usize).min(src_len - 1)
}
