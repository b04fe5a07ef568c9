use std::time::Duration;

/// Resolution the detector model expects its input resized to.
pub const MODEL_INPUT_WIDTH: u32 = 300;
pub const MODEL_INPUT_HEIGHT: u32 = 300;

/// Resolution tags stamped on every outbound presenter message.
pub const DISPLAY_WIDTH: u32 = 1280;
pub const DISPLAY_HEIGHT: u32 = 720;

/// Floats per record in the detector's flat output tensor:
/// `[unused, attribute, confidence, lt_x, lt_y, rb_x, rb_y]`.
pub const DETECTION_STRIDE: usize = 7;

/// Attribute value the model emits for a face; anything further than
/// `ATTRIBUTE_EPSILON` from it is background.
pub const FACE_ATTRIBUTE: f32 = 1.0;
pub const ATTRIBUTE_EPSILON: f32 = 1e-5;

/// Landmark points attached per detection by downstream estimators.
pub const LANDMARK_COUNT: usize = 68;

/// How long a registration-source forward sleeps before retrying a full queue.
pub const QUEUE_RETRY_INTERVAL: Duration = Duration::from_millis(200);

pub const JPEG_QUALITY: u8 = 100;
