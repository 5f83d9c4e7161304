//! Adaptive face compression.
//!
//! A face crop is encoded at a starting quality and re-encoded at lower
//! qualities until the payload fits the byte ceiling or the quality floor is
//! reached. The loop is best-effort: when even the floor is too large, the
//! floor encoding is returned and a warning is logged.
//!
//! With the defaults the ladder is 0.7, 0.6, ... 0.1 against a 260 KiB
//! ceiling, so at most seven encodes happen per crop.
//!
//! # Example
//!
//! ```ignore
//! use bibphoto_core::compress::{compress_jpeg, CompressionSettings};
//!
//! let payload = compress_jpeg(&face, &CompressionSettings::default())?;
//! println!("{} bytes at quality {}", payload.byte_length(), payload.quality());
//! ```

mod payload;
mod settings;

pub use payload::EncodedPayload;
pub use settings::{
    CompressError, CompressionSettings, DEFAULT_MAX_BYTES, DEFAULT_MIN_QUALITY,
    DEFAULT_QUALITY_STEP, DEFAULT_START_QUALITY, MIN_QUALITY_STEP,
};

use tracing::{debug, warn};

use crate::crop::CroppedImage;
use crate::encode::{encode_jpeg, jpeg_quality, EncodeError};

/// Something that can encode a face at a quality level (0.0 to 1.0).
pub trait QualityEncoder {
    type Error;

    fn encode(&self, image: &CroppedImage, quality: f64) -> Result<Vec<u8>, Self::Error>;
}

/// The production encoder: baseline JPEG via the `image` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct JpegQualityEncoder;

impl QualityEncoder for JpegQualityEncoder {
    type Error = EncodeError;

    fn encode(&self, image: &CroppedImage, quality: f64) -> Result<Vec<u8>, EncodeError> {
        encode_jpeg(
            image.pixels(),
            image.width(),
            image.height(),
            jpeg_quality(quality),
        )
    }
}

/// Encode `image`, lowering quality until the result fits `settings.max_bytes()`.
///
/// Returns the first encoding, scanning down from the start quality, whose
/// length is `<=` the ceiling. If none fits, the encoding at the lowest
/// quality tried is returned. Only encoder failures are errors.
pub fn compress<E: QualityEncoder>(
    encoder: &E,
    image: &CroppedImage,
    settings: &CompressionSettings,
) -> Result<EncodedPayload, E::Error> {
    let max_bytes = settings.max_bytes();
    let mut attempt = 0;
    let mut quality = settings.quality_at(attempt);
    let mut bytes = encoder.encode(image, quality)?;
    debug!(quality, size = bytes.len(), max_bytes, "encoded face");

    while bytes.len() > max_bytes && settings.can_retry_below(quality) {
        attempt += 1;
        quality = settings.quality_at(attempt);
        bytes = encoder.encode(image, quality)?;
        debug!(quality, size = bytes.len(), max_bytes, "re-encoded face");
    }

    if bytes.len() > max_bytes {
        warn!(
            quality,
            size = bytes.len(),
            max_bytes,
            "face payload still over limit at minimum quality"
        );
    }

    Ok(EncodedPayload::new(bytes, quality, attempt + 1))
}

/// [`compress`] with the JPEG encoder.
pub fn compress_jpeg(
    image: &CroppedImage,
    settings: &CompressionSettings,
) -> Result<EncodedPayload, EncodeError> {
    compress(&JpegQualityEncoder, image, settings)
}
