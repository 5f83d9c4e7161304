//! Upload decoding WASM bindings.
//!
//! # Functions
//!
//! - [`decode_upload`] - Decode a JPEG or PNG upload, applying EXIF orientation
//! - [`get_orientation`] - Read the EXIF orientation tag of an upload
//! - [`resize_to_fit`] - Scale an image down so its longest edge fits
//!
//! # Example
//!
//! ```typescript
//! import { decode_upload, resize_to_fit } from '@bibphoto/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = decode_upload(bytes);
//! const preview = resize_to_fit(image, 1024, 1);
//! ```

use crate::types::{filter_from_u8, js_error, JsDecodedImage};
use bibphoto_core::decode;
use wasm_bindgen::prelude::*;

/// Decode an uploaded photo.
///
/// Only JPEG and PNG are accepted. The result is upright RGB.
#[wasm_bindgen]
pub fn decode_upload(bytes: &[u8]) -> Result<JsDecodedImage, JsValue> {
    decode::decode_upload(bytes)
        .map(JsDecodedImage::from_decoded)
        .map_err(js_error)
}

/// EXIF orientation (1-8) of an upload; 1 when the tag is missing.
#[wasm_bindgen]
pub fn get_orientation(bytes: &[u8]) -> u8 {
    decode::get_orientation(bytes) as u8
}

/// Resize so the longest edge is at most `max_edge`, preserving aspect ratio.
///
/// `filter`: 0 = Nearest, 1 = Bilinear, 2 = Lanczos3.
#[wasm_bindgen]
pub fn resize_to_fit(
    image: &JsDecodedImage,
    max_edge: u32,
    filter: u8,
) -> Result<JsDecodedImage, JsValue> {
    decode::resize_to_fit(&image.to_decoded(), max_edge, filter_from_u8(filter))
        .map(JsDecodedImage::from_decoded)
        .map_err(js_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation_of_plain_bytes() {
        assert_eq!(get_orientation(&[0xFF, 0xD8, 0xFF, 0xD9]), 1);
    }

    #[test]
    fn test_core_decode_rejects_garbage() {
        assert!(bibphoto_core::decode::decode_upload(b"not an image").is_err());
    }
}
