//! The compressor's output.

use crate::encode::{to_data_url, JPEG_MEDIA_TYPE};

/// Encoded face bytes together with the quality level that produced them.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedPayload {
    bytes: Vec<u8>,
    quality: f64,
    attempts: u32,
}

impl EncodedPayload {
    pub(crate) fn new(bytes: Vec<u8>, quality: f64, attempts: u32) -> Self {
        Self {
            bytes,
            quality,
            attempts,
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn byte_length(&self) -> usize {
        self.bytes.len()
    }

    /// Quality level (0.0 to 1.0) of the returned encoding.
    pub fn quality(&self) -> f64 {
        self.quality
    }

    /// Number of encodes it took to produce this payload.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn media_type(&self) -> &'static str {
        JPEG_MEDIA_TYPE
    }

    /// Whether the payload fits in `max_bytes`.
    pub fn fits(&self, max_bytes: usize) -> bool {
        self.bytes.len() <= max_bytes
    }

    /// `data:image/jpeg;base64,...` form sent to the search endpoint.
    pub fn to_data_url(&self) -> String {
        to_data_url(self.media_type(), &self.bytes)
    }
}
