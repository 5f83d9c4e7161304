//! BibPhoto WASM - WebAssembly bindings for the BibPhoto page
//!
//! This crate exposes bibphoto-core to the browser page.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrappers for images and compressed faces
//! - `decode` - Upload decoding and resizing
//! - `encode` - Face cropping and adaptive compression
//! - `session` - Page state: bib lookup, face slots, search, selection, download
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsSession } from '@bibphoto/wasm';
//!
//! await init();
//!
//! const session = JsSession.for_origin(location.protocol, location.host);
//! const req = session.bib_request(code, captchaToken);
//! ```

use wasm_bindgen::prelude::*;

mod decode;
mod encode;
mod session;
mod types;

pub use decode::{decode_upload, get_orientation, resize_to_fit};
pub use encode::{compress_face, compress_face_rgba, crop_face};
pub use session::{archive_file_name, error_message, JsSession};
pub use types::{JsDecodedImage, JsEncodedPayload};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
