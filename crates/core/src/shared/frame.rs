/// A single camera/video frame: an owned pixel buffer plus its dimensions
/// and format tag.
///
/// Transformations never mutate the buffer in place; codec collaborators
/// return a fresh owned `Frame`, so pre- and post-transform buffers cannot
/// alias.
#[derive(Clone, Debug)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    format: PixelFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelFormat {
    /// Semi-planar YUV 4:2:0 (NV12): full-resolution Y plane followed by
    /// an interleaved half-resolution UV plane.
    Yuv420sp,
    Jpeg,
}

impl std::fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PixelFormat::Yuv420sp => write!(f, "YUV420SP"),
            PixelFormat::Jpeg => write!(f, "JPEG"),
        }
    }
}

impl Frame {
    pub fn new(data: Vec<u8>, width: u32, height: u32, format: PixelFormat) -> Self {
        if format == PixelFormat::Yuv420sp {
            debug_assert_eq!(
                data.len(),
                nv12_size(width, height),
                "YUV420SP data length must equal width * height * 3 / 2"
            );
        }
        Self {
            data,
            width,
            height,
            format,
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }
}

/// Byte size of an NV12 buffer for the given resolution.
pub fn nv12_size(width: u32, height: u32) -> usize {
    (width as usize) * (height as usize) * 3 / 2
}
