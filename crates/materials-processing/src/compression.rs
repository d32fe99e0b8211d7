use bytes::Bytes;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, RgbaImage};

use crate::error::EditorError;

/// JPEG encoder for exported image surfaces
pub struct ImageCompressor;

impl ImageCompressor {
    /// Encode a pixel buffer as baseline JPEG. Alpha is dropped, since JPEG
    /// has no transparency.
    pub fn encode_jpeg(img: &RgbaImage, quality: u8) -> Result<Bytes, EditorError> {
        let quality = quality.clamp(1, 100);
        let rgb = DynamicImage::ImageRgba8(img.clone()).to_rgb8();
        let (width, height) = rgb.dimensions();

        let estimated_size = (width as usize * height as usize) / 4;
        let mut buffer = Vec::with_capacity(estimated_size);
        let encoder = JpegEncoder::new_with_quality(&mut buffer, quality);
        rgb.write_with_encoder(encoder)?;

        tracing::debug!(width, height, quality, size = buffer.len(), "Encoded JPEG");
        Ok(Bytes::from(buffer))
    }
}
