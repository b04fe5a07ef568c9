pub mod cpu_image_codec;
pub mod yuv;
