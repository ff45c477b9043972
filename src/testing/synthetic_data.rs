//! Synthetic capture data for offline tests
//!
//! Generates opaque sample payloads whose content varies by index, plus a
//! real JPEG so photo-decode paths exercise the actual decoder.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, RgbImage};

/// Create an encoded-video-like payload that varies per sample index
pub fn synthetic_video_sample(index: u64, len: usize) -> Vec<u8> {
    let base = (index % 251) as u8;
    (0..len)
        .map(|i| base.wrapping_add((i % 256) as u8))
        .collect()
}

/// Create an encoded-audio-like payload that varies per sample index
pub fn synthetic_audio_sample(index: u64, len: usize) -> Vec<u8> {
    let base = (index.wrapping_mul(31) % 253) as u8;
    (0..len)
        .map(|i| base.wrapping_add((i.wrapping_mul(7) % 256) as u8))
        .collect()
}

/// Encode a gradient test image as real JPEG bytes
pub fn synthetic_jpeg(width: u32, height: u32) -> Vec<u8> {
    let mut img = RgbImage::new(width, height);
    for (x, y, pixel) in img.enumerate_pixels_mut() {
        pixel.0 = [(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8];
    }

    let mut bytes = Vec::new();
    DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Jpeg)
        .expect("jpeg encoding of synthetic image");
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthetic_samples_vary() {
        let a = synthetic_video_sample(0, 64);
        let b = synthetic_video_sample(1, 64);
        assert_ne!(a, b);
        assert_eq!(a.len(), 64);

        let a = synthetic_audio_sample(0, 32);
        let b = synthetic_audio_sample(1, 32);
        assert_ne!(a, b);
    }

    #[test]
    fn test_synthetic_jpeg_decodes() {
        let bytes = synthetic_jpeg(16, 12);
        let image = image::load_from_memory(&bytes).expect("decode synthetic jpeg");
        assert_eq!(image.width(), 16);
        assert_eq!(image.height(), 12);
    }
}
