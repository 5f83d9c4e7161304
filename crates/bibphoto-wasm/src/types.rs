//! WASM-compatible wrapper types.
//!
//! JavaScript-friendly wrappers around the core image and payload types,
//! plus the small conversion helpers the bindings share.

use bibphoto_core::compress::EncodedPayload;
use bibphoto_core::decode::{DecodedImage, FilterType};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// A decoded RGB image.
///
/// The pixel data lives in WASM memory; `pixels()` copies it out as a
/// `Uint8Array`, e.g. for drawing the crop preview onto a canvas.
#[wasm_bindgen]
pub struct JsDecodedImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsDecodedImage {
    /// Create an image from RGB pixel data (3 bytes per pixel, row-major).
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsDecodedImage {
        JsDecodedImage {
            width,
            height,
            pixels,
        }
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of bytes in the pixel buffer (width * height * 3)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns RGB pixel data as Uint8Array (copied).
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    /// Returns RGBA pixel data with opaque alpha, ready for `ImageData`.
    pub fn rgba_pixels(&self) -> Vec<u8> {
        let mut rgba = Vec::with_capacity(self.pixels.len() / 3 * 4);
        for rgb in self.pixels.chunks_exact(3) {
            rgba.extend_from_slice(rgb);
            rgba.push(255);
        }
        rgba
    }
}

impl JsDecodedImage {
    pub(crate) fn from_decoded(img: DecodedImage) -> Self {
        Self {
            width: img.width,
            height: img.height,
            pixels: img.pixels,
        }
    }

    /// Clones the pixel data.
    pub(crate) fn to_decoded(&self) -> DecodedImage {
        DecodedImage {
            width: self.width,
            height: self.height,
            pixels: self.pixels.clone(),
        }
    }
}

/// A compressed face ready to be sent to the search endpoint.
#[wasm_bindgen]
pub struct JsEncodedPayload {
    inner: EncodedPayload,
}

#[wasm_bindgen]
impl JsEncodedPayload {
    /// Quality level (0.0 to 1.0) of the returned encoding
    #[wasm_bindgen(getter)]
    pub fn quality(&self) -> f64 {
        self.inner.quality()
    }

    /// Number of encodes it took to reach this payload
    #[wasm_bindgen(getter)]
    pub fn attempts(&self) -> u32 {
        self.inner.attempts()
    }

    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.byte_length()
    }

    #[wasm_bindgen(getter)]
    pub fn media_type(&self) -> String {
        self.inner.media_type().to_string()
    }

    /// Encoded bytes as Uint8Array (copied).
    pub fn bytes(&self) -> Vec<u8> {
        self.inner.bytes().to_vec()
    }

    /// `data:image/jpeg;base64,...` form used by the search request and
    /// for slot previews.
    pub fn data_url(&self) -> String {
        self.inner.to_data_url()
    }

    pub fn fits(&self, max_bytes: usize) -> bool {
        self.inner.fits(max_bytes)
    }
}

impl JsEncodedPayload {
    pub(crate) fn from_payload(inner: EncodedPayload) -> Self {
        Self { inner }
    }
}

/// Convert a u8 filter type value to the core FilterType enum.
///
/// 0 = Nearest, 1 = Bilinear, 2 = Lanczos3. Any other value is Bilinear.
pub(crate) fn filter_from_u8(value: u8) -> FilterType {
    match value {
        0 => FilterType::Nearest,
        2 => FilterType::Lanczos3,
        _ => FilterType::Bilinear,
    }
}

/// Serialize to a plain JS object (maps become objects, not `Map`s).
pub(crate) fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

pub(crate) fn js_error(e: impl ToString) -> JsValue {
    JsValue::from_str(&e.to_string())
}
