//! NV12 <-> RGB conversion helpers (BT.601 full range).
//!
//! Both dimensions must be even; the capture side crops odd frames to
//! even dimensions before they enter the pipeline.

/// Converts an NV12 buffer to packed RGB24.
pub fn nv12_to_rgb(data: &[u8], width: u32, height: u32) -> Vec<u8> {
    let w = width as usize;
    let h = height as usize;
    debug_assert!(w % 2 == 0 && h % 2 == 0, "NV12 dimensions must be even");
    debug_assert_eq!(data.len(), w * h * 3 / 2);

    let (y_plane, uv_plane) = data.split_at(w * h);
    let mut rgb = vec![0u8; w * h * 3];

    for row in 0..h {
        for col in 0..w {
            let y = y_plane[row * w + col] as f32;
            let uv_index = (row / 2) * w + (col / 2) * 2;
            let u = uv_plane[uv_index] as f32 - 128.0;
            let v = uv_plane[uv_index + 1] as f32 - 128.0;

            let out = (row * w + col) * 3;
            rgb[out] = (y + 1.402 * v).clamp(0.0, 255.0) as u8;
            rgb[out + 1] = (y - 0.344_136 * u - 0.714_136 * v).clamp(0.0, 255.0) as u8;
            rgb[out + 2] = (y + 1.772 * u).clamp(0.0, 255.0) as u8;
        }
    }

    rgb
}

/// Converts packed RGB24 to NV12, averaging each 2x2 block for chroma.
pub fn rgb_to_nv12(rgb: &[u8], width: u32, height: u32) -> Vec<u8> {
    let w = width as usize;
    let h = height as usize;
    debug_assert!(w % 2 == 0 && h % 2 == 0, "NV12 dimensions must be even");
    debug_assert_eq!(rgb.len(), w * h * 3);

    let mut out = vec![0u8; w * h * 3 / 2];
    let (y_plane, uv_plane) = out.split_at_mut(w * h);

    for row in 0..h {
        for col in 0..w {
            let px = (row * w + col) * 3;
            let (r, g, b) = (rgb[px] as f32, rgb[px + 1] as f32, rgb[px + 2] as f32);
            y_plane[row * w + col] =
                (0.299 * r + 0.587 * g + 0.114 * b).clamp(0.0, 255.0) as u8;
        }
    }

    for crow in 0..h / 2 {
        for ccol in 0..w / 2 {
            let mut u_sum = 0.0;
            let mut v_sum = 0.0;
            for dy in 0..2 {
                for dx in 0..2 {
                    let px = ((crow * 2 + dy) * w + ccol * 2 + dx) * 3;
                    let (r, g, b) =
                        (rgb[px] as f32, rgb[px + 1] as f32, rgb[px + 2] as f32);
                    u_sum += -0.168_736 * r - 0.331_264 * g + 0.5 * b;
                    v_sum += 0.5 * r - 0.418_688 * g - 0.081_312 * b;
                }
            }
            let uv_index = crow * w + ccol * 2;
            uv_plane[uv_index] = (u_sum / 4.0 + 128.0).clamp(0.0, 255.0) as u8;
            uv_plane[uv_index + 1] = (v_sum / 4.0 + 128.0).clamp(0.0, 255.0) as u8;
        }
    }

    out
}
