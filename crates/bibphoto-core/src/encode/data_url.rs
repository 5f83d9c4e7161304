//! Self-describing `data:` URIs for encoded payloads.
//!
//! The `/thumb` endpoint expects each face as `data:<mime>;base64,<payload>`
//! and splits on the first comma, so the header never contains one.

use base64::Engine;

/// Render bytes as a base64 `data:` URI with the given media type.
pub fn to_data_url(media_type: &str, bytes: &[u8]) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
    format!("data:{media_type};base64,{encoded}")
}
