//! # Decode Module
//!
//! Turns encoded images into [`PixelBuffer`]s for the engine.
//!
//! Uses zune-jpeg for JPEG data (1.5-2x faster than image crate),
//! falls back to image crate for other formats. Base64 blobs, as handed
//! over by browser front ends, are decoded first.

use crate::core::pixels::{Channels, PixelBuffer};
use crate::error::DecodeError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use image::DynamicImage;
use std::fs;
use std::path::Path;
use zune_core::colorspace::ColorSpace;
use zune_core::options::DecoderOptions;
use zune_jpeg::JpegDecoder;

const JPEG_MAGIC: [u8; 3] = [0xFF, 0xD8, 0xFF];

/// Encoded formats the decoder distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Other,
}

impl ImageFormat {
    /// Detect format from file extension
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .as_deref()
        {
            Some("jpg" | "jpeg") => Self::Jpeg,
            _ => Self::Other,
        }
    }

    /// Detect format from leading bytes
    pub fn sniff(bytes: &[u8]) -> Self {
        if bytes.starts_with(&JPEG_MAGIC) {
            Self::Jpeg
        } else {
            Self::Other
        }
    }
}

/// Fast image decoder that uses optimized decoders per format
pub struct FastDecoder;

impl FastDecoder {
    /// Decode an image file using the fastest available decoder.
    pub fn decode_path(path: &Path) -> Result<PixelBuffer, DecodeError> {
        let bytes = fs::read(path).map_err(|e| DecodeError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let format = match ImageFormat::from_path(path) {
            ImageFormat::Jpeg => ImageFormat::Jpeg,
            ImageFormat::Other => ImageFormat::sniff(&bytes),
        };

        Self::decode_as(&bytes, format)
    }

    /// Decode an in-memory encoded image
    pub fn decode_bytes(bytes: &[u8]) -> Result<PixelBuffer, DecodeError> {
        Self::decode_as(bytes, ImageFormat::sniff(bytes))
    }

    /// Decode a base64 blob, optionally wrapped as a `data:` URL
    pub fn decode_base64(encoded: &str) -> Result<PixelBuffer, DecodeError> {
        let payload = strip_data_url(encoded.trim());
        let bytes = STANDARD.decode(payload)?;
        Self::decode_bytes(&bytes)
    }

    fn decode_as(bytes: &[u8], format: ImageFormat) -> Result<PixelBuffer, DecodeError> {
        match format {
            ImageFormat::Jpeg => Self::decode_jpeg(bytes).or_else(|e| {
                tracing::debug!(error = %e, "zune-jpeg failed, falling back to image crate");
                Self::decode_fallback(bytes)
            }),
            ImageFormat::Other => Self::decode_fallback(bytes),
        }
    }

    /// Fast JPEG decoding using zune-jpeg
    fn decode_jpeg(bytes: &[u8]) -> Result<PixelBuffer, DecodeError> {
        // Configure decoder to output RGB
        let options = DecoderOptions::new_fast().jpeg_set_out_colorspace(ColorSpace::RGB);
        let mut decoder = JpegDecoder::new_with_options(bytes, options);

        let pixels = decoder.decode().map_err(|e| DecodeError::Image {
            reason: format!("zune-jpeg decode failed: {:?}", e),
        })?;

        let info = decoder.info().ok_or_else(|| DecodeError::Image {
            reason: "Failed to get image info".to_string(),
        })?;

        // Get actual output colorspace after decoding
        let channels = match decoder.get_output_colorspace().unwrap_or(ColorSpace::RGB) {
            ColorSpace::RGB => Channels::Rgb,
            ColorSpace::RGBA => Channels::Rgba,
            ColorSpace::Luma => Channels::Gray,
            other => {
                return Err(DecodeError::Image {
                    reason: format!("unsupported JPEG output colorspace {:?}", other),
                })
            }
        };

        to_pixel_buffer(info.width as u32, info.height as u32, channels, pixels)
    }

    /// Fallback to image crate for non-JPEG formats
    fn decode_fallback(bytes: &[u8]) -> Result<PixelBuffer, DecodeError> {
        let image = image::load_from_memory(bytes).map_err(|e| DecodeError::Image {
            reason: e.to_string(),
        })?;
        pixels_from_image(&image)
    }
}

/// Convert an image crate image into a pixel buffer, keeping its channel layout
pub fn pixels_from_image(image: &DynamicImage) -> Result<PixelBuffer, DecodeError> {
    let (width, height) = (image.width(), image.height());

    match image {
        DynamicImage::ImageLuma8(buffer) => {
            to_pixel_buffer(width, height, Channels::Gray, buffer.as_raw().clone())
        }
        DynamicImage::ImageLumaA8(buffer) => {
            to_pixel_buffer(width, height, Channels::GrayAlpha, buffer.as_raw().clone())
        }
        DynamicImage::ImageRgb8(buffer) => {
            to_pixel_buffer(width, height, Channels::Rgb, buffer.as_raw().clone())
        }
        DynamicImage::ImageRgba8(buffer) => {
            to_pixel_buffer(width, height, Channels::Rgba, buffer.as_raw().clone())
        }
        other => to_pixel_buffer(width, height, Channels::Rgb, other.to_rgb8().into_raw()),
    }
}

fn to_pixel_buffer(
    width: u32,
    height: u32,
    channels: Channels,
    data: Vec<u8>,
) -> Result<PixelBuffer, DecodeError> {
    if width == 0 || height == 0 {
        return Err(DecodeError::Empty);
    }

    PixelBuffer::new(width, height, channels, data).map_err(|e| DecodeError::Image {
        reason: e.to_string(),
    })
}

fn strip_data_url(encoded: &str) -> &str {
    match encoded.strip_prefix("data:") {
        Some(rest) => rest
            .split_once(";base64,")
            .map(|(_, payload)| payload)
            .unwrap_or(encoded),
        None => encoded,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, ImageFormat as EncodedFormat, Luma, Rgb, Rgba};
    use std::io::Cursor;

    fn encode(image: &DynamicImage, format: EncodedFormat) -> Vec<u8> {
        let mut bytes = Vec::new();
        image.write_to(&mut Cursor::new(&mut bytes), format).unwrap();
        bytes
    }

    fn rgb_image() -> DynamicImage {
        DynamicImage::ImageRgb8(ImageBuffer::from_fn(20, 10, |x, y| {
            Rgb([(x * 12) as u8, (y * 25) as u8, 90])
        }))
    }

    #[test]
    fn format_detection_from_path() {
        assert_eq!(ImageFormat::from_path(Path::new("photo.JPEG")), ImageFormat::Jpeg);
        assert_eq!(ImageFormat::from_path(Path::new("photo.jpg")), ImageFormat::Jpeg);
        assert_eq!(ImageFormat::from_path(Path::new("photo.png")), ImageFormat::Other);
    }

    #[test]
    fn format_detection_from_magic() {
        assert_eq!(ImageFormat::sniff(&[0xFF, 0xD8, 0xFF, 0xE0]), ImageFormat::Jpeg);
        assert_eq!(ImageFormat::sniff(b"\x89PNG\r\n"), ImageFormat::Other);
        assert_eq!(ImageFormat::sniff(&[]), ImageFormat::Other);
    }

    #[test]
    fn png_keeps_exact_pixels() {
        let image = rgb_image();
        let pixels = FastDecoder::decode_bytes(&encode(&image, EncodedFormat::Png)).unwrap();

        assert_eq!(pixels.width(), 20);
        assert_eq!(pixels.height(), 10);
        assert_eq!(pixels.channels(), Channels::Rgb);
        assert_eq!(pixels.as_raw(), image.as_bytes());
    }

    #[test]
    fn jpeg_decodes_through_fast_path() {
        let bytes = encode(&rgb_image(), EncodedFormat::Jpeg);
        let pixels = FastDecoder::decode_bytes(&bytes).unwrap();

        assert_eq!((pixels.width(), pixels.height()), (20, 10));
        assert_eq!(pixels.as_raw().len(), 20 * 10 * pixels.channels().count() as usize);
    }

    #[test]
    fn channel_layouts_are_preserved() {
        let gray = DynamicImage::ImageLuma8(ImageBuffer::from_pixel(3, 3, Luma([9])));
        assert_eq!(pixels_from_image(&gray).unwrap().channels(), Channels::Gray);

        let rgba = DynamicImage::ImageRgba8(ImageBuffer::from_pixel(3, 3, Rgba([1, 2, 3, 4])));
        assert_eq!(pixels_from_image(&rgba).unwrap().channels(), Channels::Rgba);

        let wide = DynamicImage::ImageRgb16(ImageBuffer::from_pixel(3, 3, Rgb([65535u16, 0, 0])));
        let pixels = pixels_from_image(&wide).unwrap();
        assert_eq!(pixels.channels(), Channels::Rgb);
        assert_eq!(&pixels.as_raw()[..3], &[255, 0, 0]);
    }

    #[test]
    fn base64_round_trip() {
        let bytes = encode(&rgb_image(), EncodedFormat::Png);
        let encoded = STANDARD.encode(&bytes);

        let plain = FastDecoder::decode_base64(&encoded).unwrap();
        let wrapped =
            FastDecoder::decode_base64(&format!("data:image/png;base64,{}\n", encoded)).unwrap();

        assert_eq!(plain, wrapped);
    }

    #[test]
    fn invalid_base64_is_reported() {
        let result = FastDecoder::decode_base64("not base64 at all!");
        assert!(matches!(result, Err(DecodeError::Base64(_))));
    }

    #[test]
    fn garbage_bytes_are_reported() {
        let result = FastDecoder::decode_bytes(b"this is not a valid image file");
        assert!(matches!(result, Err(DecodeError::Image { .. })));
    }

    #[test]
    fn missing_file_is_reported() {
        let result = FastDecoder::decode_path(Path::new("/nonexistent/photo.jpg"));
        assert!(matches!(result, Err(DecodeError::Io { .. })));
    }
}
