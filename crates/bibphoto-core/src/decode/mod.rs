//! Decoding of uploaded face photos.
//!
//! This module provides functionality for:
//! - Decoding JPEG and PNG uploads with EXIF orientation correction
//! - Resizing to a working size and to the fixed face dimensions
//!
//! All operations are synchronous and single-threaded within WASM.

mod resize;
mod types;
mod upload;

pub use resize::{resize, resize_to_fit};
pub use types::{DecodeError, DecodedImage, FilterType, Orientation};
pub use upload::{decode_upload, get_orientation, MAX_UPLOAD_EDGE};
