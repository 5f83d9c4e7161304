//! Face crop and compression WASM bindings.
//!
//! # Functions
//!
//! - [`crop_face`] - Crop a region and scale it to the face size (358x441)
//! - [`compress_face`] - Compress a face under a byte ceiling
//! - [`compress_face_rgba`] - Same, from canvas `ImageData` pixels
//!
//! # Example
//!
//! ```typescript
//! import { crop_face, compress_face } from '@bibphoto/wasm';
//!
//! const face = crop_face(image, { left: 0.1, top: 0.1, width: 0.5, height: 0.8 });
//! const payload = compress_face(face, 266240);
//! preview.src = payload.data_url();
//! ```

use crate::types::{js_error, JsDecodedImage, JsEncodedPayload};
use bibphoto_core::compress::{compress_jpeg, CompressionSettings, EncodedPayload};
use bibphoto_core::crop::{self, CropRegion, CroppedImage};
use wasm_bindgen::prelude::*;

/// Crop `region` (normalized `{left, top, width, height}`) out of `image`
/// and resize it to the fixed face dimensions.
#[wasm_bindgen]
pub fn crop_face(image: &JsDecodedImage, region: JsValue) -> Result<JsDecodedImage, JsValue> {
    let region: CropRegion = serde_wasm_bindgen::from_value(region).map_err(js_error)?;
    let face = crop::crop_face(&image.to_decoded(), &region).map_err(js_error)?;
    Ok(JsDecodedImage::new(
        face.width(),
        face.height(),
        face.pixels().to_vec(),
    ))
}

/// Compress an RGB face, lowering JPEG quality from 0.7 in steps of 0.1
/// until it fits `max_bytes` or quality 0.1 is reached.
#[wasm_bindgen]
pub fn compress_face(
    image: &JsDecodedImage,
    max_bytes: usize,
) -> Result<JsEncodedPayload, JsValue> {
    let face =
        CroppedImage::from_rgb(image.width(), image.height(), image.pixels()).map_err(js_error)?;
    compress(&face, max_bytes)
}

/// [`compress_face`] for RGBA pixels as read from a canvas. Alpha is dropped.
#[wasm_bindgen]
pub fn compress_face_rgba(
    rgba: &[u8],
    width: u32,
    height: u32,
    max_bytes: usize,
) -> Result<JsEncodedPayload, JsValue> {
    let face = CroppedImage::from_rgba(width, height, rgba).map_err(js_error)?;
    compress(&face, max_bytes)
}

fn compress(face: &CroppedImage, max_bytes: usize) -> Result<JsEncodedPayload, JsValue> {
    let payload = compress_jpeg(face, &CompressionSettings::with_max_bytes(max_bytes))
        .map_err(js_error)?;
    warn_if_oversized(&payload, max_bytes);
    Ok(JsEncodedPayload::from_payload(payload))
}

pub(crate) fn warn_if_oversized(payload: &EncodedPayload, max_bytes: usize) {
    if !payload.fits(max_bytes) {
        web_sys::console::warn_1(&JsValue::from_str(&oversized_message(payload, max_bytes)));
    }
}

fn oversized_message(payload: &EncodedPayload, max_bytes: usize) -> String {
    format!(
        "Face is {} bytes at minimum quality {}, over the {} byte limit",
        payload.byte_length(),
        payload.quality(),
        max_bytes
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use bibphoto_core::crop::{FACE_HEIGHT, FACE_WIDTH};

    #[test]
    fn test_oversized_message() {
        let face = CroppedImage::from_rgb(
            FACE_WIDTH,
            FACE_HEIGHT,
            vec![200u8; (FACE_WIDTH * FACE_HEIGHT * 3) as usize],
        )
        .unwrap();
        let payload = compress_jpeg(&face, &CompressionSettings::with_max_bytes(10)).unwrap();

        assert!(!payload.fits(10));
        assert!(oversized_message(&payload, 10).ends_with("over the 10 byte limit"));
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use bibphoto_core::crop::{FACE_HEIGHT, FACE_WIDTH};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_crop_face_dimensions() {
        let img = JsDecodedImage::new(200, 200, vec![100u8; 200 * 200 * 3]);
        let region = serde_wasm_bindgen::to_value(&CropRegion::new(0.1, 0.1, 0.5, 0.6)).unwrap();

        let face = crop_face(&img, region).unwrap();
        assert_eq!(face.width(), FACE_WIDTH);
        assert_eq!(face.height(), FACE_HEIGHT);
    }

    #[wasm_bindgen_test]
    fn test_crop_face_short_buffer() {
        let img = JsDecodedImage::new(100, 100, vec![7u8; 100 * 10 * 3]);
        let region = serde_wasm_bindgen::to_value(&CropRegion::full()).unwrap();
        assert!(crop_face(&img, region).is_err());
    }

    #[wasm_bindgen_test]
    fn test_crop_face_bad_region() {
        let img = JsDecodedImage::new(10, 10, vec![0u8; 300]);
        assert!(crop_face(&img, JsValue::from_str("nope")).is_err());
    }

    #[wasm_bindgen_test]
    fn test_compress_face() {
        let img = JsDecodedImage::new(FACE_WIDTH, FACE_HEIGHT, vec![128u8; 358 * 441 * 3]);
        let payload = compress_face(&img, 266240).unwrap();

        assert_eq!(payload.attempts(), 1);
        assert!((payload.quality() - 0.7).abs() < 1e-9);
        assert_eq!(payload.media_type(), "image/jpeg");
        assert!(payload.data_url().starts_with("data:image/jpeg;base64,"));
    }

    #[wasm_bindgen_test]
    fn test_compress_face_rgba_wrong_length() {
        assert!(compress_face_rgba(&[0u8; 10], 4, 4, 1000).is_err());
    }
}
