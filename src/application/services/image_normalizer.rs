//! Size-bounded recompression of downloaded images.

use std::io::Cursor;

use bytes::Bytes;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ExtendedColorType};
use tracing::{debug, warn};

const BYTES_PER_MB: u64 = 1024 * 1024;

/// Recompression policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressionConfig {
    /// Whether oversized images are recompressed at all.
    pub enabled: bool,
    /// Inputs up to this size pass through untouched.
    pub threshold_bytes: u64,
    /// JPEG quality, clamped to 1..=100 when encoding.
    pub quality: u8,
}

impl CompressionConfig {
    /// Builds the policy from a threshold in megabytes.
    #[must_use]
    pub const fn from_megabytes(enabled: bool, threshold_mb: u64, quality: u8) -> Self {
        Self {
            enabled,
            threshold_bytes: threshold_mb.saturating_mul(BYTES_PER_MB),
            quality,
        }
    }
}

impl CompressionConfig {
    /// Returns true if an input of `len` bytes would be recompressed.
    #[must_use]
    pub const fn applies_to(&self, len: usize) -> bool {
        self.enabled && len as u64 > self.threshold_bytes
    }
}

impl Default for CompressionConfig {
    fn default() -> Self {
        Self::from_megabytes(true, 5, 85)
    }
}

/// Shrinks oversized images by re-encoding them as JPEG.
pub struct ImageNormalizer;

impl ImageNormalizer {
    /// Recompresses oversized images to RGB JPEG.
    ///
    /// Never fails: on any decode or encode error the input is returned as is.
    #[must_use]
    pub fn compress(bytes: Bytes, config: &CompressionConfig) -> Bytes {
        if !config.applies_to(bytes.len()) {
            return bytes;
        }

        match Self::reencode(&bytes, config.quality) {
            Ok(encoded) => {
                debug!(
                    before = bytes.len(),
                    after = encoded.len(),
                    "Recompressed oversized image"
                );
                Bytes::from(encoded)
            }
            Err(e) => {
                warn!(error = %e, size = bytes.len(), "Recompression failed, keeping original");
                bytes
            }
        }
    }

    fn reencode(bytes: &[u8], quality: u8) -> image::ImageResult<Vec<u8>> {
        let rgb = match image::load_from_memory(bytes)? {
            DynamicImage::ImageRgb8(rgb) => rgb,
            other => other.into_rgb8(),
        };

        let mut out = Cursor::new(Vec::new());
        JpegEncoder::new_with_quality(&mut out, quality.clamp(1, 100)).encode(
            &rgb,
            rgb.width(),
            rgb.height(),
            ExtendedColorType::Rgb8,
        )?;
        Ok(out.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat as CodecFormat, Rgba, RgbaImage};

    fn noisy_png(size: u32) -> Bytes {
        let mut state: u32 = 0x1234_5678;
        let img = RgbaImage::from_fn(size, size, |_, _| {
            state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            let [r, g, b, a] = state.to_le_bytes();
            Rgba([r, g, b, a | 0x80])
        });
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, CodecFormat::Png).unwrap();
        Bytes::from(out.into_inner())
    }

    #[test]
    fn test_threshold_conversion() {
        let config = CompressionConfig::from_megabytes(true, 5, 85);
        assert_eq!(config.threshold_bytes, 5 * 1_048_576);
    }

    #[test]
    fn test_small_input_is_identity() {
        let config = CompressionConfig {
            enabled: true,
            threshold_bytes: 16,
            quality: 85,
        };
        let input = Bytes::from_static(b"exactly sixteen!");
        assert_eq!(ImageNormalizer::compress(input.clone(), &config), input);
    }

    #[test]
    fn test_disabled_is_identity() {
        let config = CompressionConfig {
            enabled: false,
            threshold_bytes: 0,
            quality: 85,
        };
        let input = noisy_png(32);
        assert_eq!(ImageNormalizer::compress(input.clone(), &config), input);
    }

    #[test]
    fn test_undecodable_input_is_returned_unchanged() {
        let config = CompressionConfig {
            enabled: true,
            threshold_bytes: 4,
            quality: 85,
        };
        let input = Bytes::from_static(b"\x89PNG this is not really a png");
        assert_eq!(ImageNormalizer::compress(input.clone(), &config), input);
    }

    #[test]
    fn test_oversized_png_becomes_smaller_jpeg() {
        let config = CompressionConfig {
            enabled: true,
            threshold_bytes: 1024,
            quality: 60,
        };
        let input = noisy_png(256);
        let output = ImageNormalizer::compress(input.clone(), &config);

        assert!(output.starts_with(&[0xFF, 0xD8, 0xFF]));
        assert!(output.len() < input.len());
        let decoded = image::load_from_memory(&output).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (256, 256));
    }
}
