//! Image encoding for face payloads.
//!
//! This module provides functionality for:
//! - Encoding RGB pixels to JPEG with a configurable quality
//! - Converting canvas-style quality levels to the encoder's scale
//! - Rendering encoded bytes as `data:` URIs for the search request

mod data_url;
mod jpeg;

pub use data_url::to_data_url;
pub use jpeg::{encode_jpeg, jpeg_quality, EncodeError, JPEG_MEDIA_TYPE};
