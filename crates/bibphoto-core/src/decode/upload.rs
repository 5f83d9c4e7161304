//! Decoding of user-selected face photos.
//!
//! Uploads come straight from a file input, so they are usually phone JPEGs
//! carrying an EXIF orientation tag, occasionally PNG screenshots. Both are
//! normalized to upright RGB8 before the crop tool sees them.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageError, ImageFormat, ImageReader, Limits};

use super::{DecodeError, DecodedImage, Orientation};

/// Largest edge accepted from an upload.
pub const MAX_UPLOAD_EDGE: u32 = 16384;

/// Decode an uploaded JPEG or PNG, applying EXIF orientation correction.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the bytes are neither JPEG nor PNG,
/// `DecodeError::CorruptedFile` if decoding fails and
/// `DecodeError::TooLarge` if either edge exceeds [`MAX_UPLOAD_EDGE`].
pub fn decode_upload(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    decode_with_max_edge(bytes, MAX_UPLOAD_EDGE)
}

/// The edge limit is checked from the header, before any pixels are
/// allocated.
fn decode_with_max_edge(bytes: &[u8], max_edge: u32) -> Result<DecodedImage, DecodeError> {
    let orientation = extract_orientation(bytes);

    let mut reader = guess_reader(bytes)?;
    match reader.format() {
        Some(ImageFormat::Jpeg) | Some(ImageFormat::Png) => {}
        _ => return Err(DecodeError::InvalidFormat),
    }

    let mut limits = Limits::default();
    limits.max_image_width = Some(max_edge);
    limits.max_image_height = Some(max_edge);
    reader.limits(limits);

    let img = reader.decode().map_err(|e| match e {
        ImageError::Limits(_) => too_large(bytes, max_edge),
        e => DecodeError::CorruptedFile(e.to_string()),
    })?;

    let rgb_img = apply_orientation(img, orientation).into_rgb8();
    Ok(DecodedImage::from_rgb_image(rgb_img))
}

fn guess_reader(bytes: &[u8]) -> Result<ImageReader<Cursor<&[u8]>>, DecodeError> {
    ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))
}

/// Header-only dimension read for the error report.
fn too_large(bytes: &[u8], max_edge: u32) -> DecodeError {
    let (width, height) = guess_reader(bytes)
        .ok()
        .and_then(|reader| reader.into_dimensions().ok())
        .unwrap_or((0, 0));
    DecodeError::TooLarge {
        width,
        height,
        max: max_edge,
    }
}

/// Extract EXIF orientation from image bytes.
///
/// Returns `Orientation::Normal` if no EXIF data is found or orientation
/// cannot be determined.
pub fn get_orientation(bytes: &[u8]) -> Orientation {
    extract_orientation(bytes)
}

fn extract_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);
    match Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .map(Orientation::from)
            .unwrap_or_default(),
        Err(_) => Orientation::Normal,
    }
}

fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}
