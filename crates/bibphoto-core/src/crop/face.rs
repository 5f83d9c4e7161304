//! Face crops at the fixed reference size.
//!
//! The search backend compares every reference face at 358x441, so crops are
//! taken at that aspect ratio and scaled to exactly those dimensions before
//! compression.

use thiserror::Error;

use super::region::{apply_crop, CropRegion};
use crate::decode::{resize, DecodeError, DecodedImage, FilterType};

/// Width of a reference face in pixels.
pub const FACE_WIDTH: u32 = 358;

/// Height of a reference face in pixels.
pub const FACE_HEIGHT: u32 = 441;

/// Fixed face aspect ratio (width / height).
pub const FACE_ASPECT_RATIO: f64 = FACE_WIDTH as f64 / FACE_HEIGHT as f64;

/// Share of the image the initial crop region covers on each side.
pub const DEFAULT_CROP_AREA: f64 = 0.8;

/// Errors that can occur while producing a face crop.
#[derive(Debug, Error)]
pub enum CropError {
    /// The source image has no pixels.
    #[error("Cannot crop an empty image")]
    EmptyImage,

    /// The crop region contains NaN or infinite values.
    #[error("Crop region must contain finite values")]
    InvalidRegion,

    /// Supplied pixels are not at the face dimensions.
    #[error("Face crop must be {expected_width}x{expected_height}, got {width}x{height}")]
    WrongDimensions {
        width: u32,
        height: u32,
        expected_width: u32,
        expected_height: u32,
    },

    /// Supplied pixel buffer does not match its dimensions.
    #[error("Invalid pixel data: expected {expected} bytes, got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Scaling the crop to face size failed.
    #[error("Failed to scale crop: {0}")]
    Resize(#[from] DecodeError),
}

/// An RGB bitmap at exactly [`FACE_WIDTH`] x [`FACE_HEIGHT`].
///
/// Only constructible through [`crop_face`] or the validating constructors,
/// so holders can rely on the dimensions.
#[derive(Debug, Clone, PartialEq)]
pub struct CroppedImage {
    image: DecodedImage,
}

impl CroppedImage {
    /// Wrap RGB pixels that are already at face size.
    pub fn from_rgb(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, CropError> {
        check_face_dimensions(width, height)?;
        let expected = (width * height * 3) as usize;
        if pixels.len() != expected {
            return Err(CropError::InvalidPixelData {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            image: DecodedImage::new(width, height, pixels),
        })
    }

    /// Wrap RGBA pixels (as read back from a canvas), dropping alpha.
    pub fn from_rgba(width: u32, height: u32, rgba: &[u8]) -> Result<Self, CropError> {
        check_face_dimensions(width, height)?;
        let expected = (width * height * 4) as usize;
        if rgba.len() != expected {
            return Err(CropError::InvalidPixelData {
                expected,
                actual: rgba.len(),
            });
        }
        let pixels = rgba
            .chunks_exact(4)
            .flat_map(|px| [px[0], px[1], px[2]])
            .collect();
        Ok(Self {
            image: DecodedImage::new(width, height, pixels),
        })
    }

    pub fn width(&self) -> u32 {
        self.image.width
    }

    pub fn height(&self) -> u32 {
        self.image.height
    }

    /// RGB pixel data in row-major order.
    pub fn pixels(&self) -> &[u8] {
        &self.image.pixels
    }
}

fn check_face_dimensions(width: u32, height: u32) -> Result<(), CropError> {
    if width != FACE_WIDTH || height != FACE_HEIGHT {
        return Err(CropError::WrongDimensions {
            width,
            height,
            expected_width: FACE_WIDTH,
            expected_height: FACE_HEIGHT,
        });
    }
    Ok(())
}

/// Reject an image whose buffer does not match its dimensions.
pub(crate) fn check_pixels(image: &DecodedImage) -> Result<(), CropError> {
    let expected = image.expected_len();
    if image.pixels.len() != expected {
        return Err(CropError::InvalidPixelData {
            expected,
            actual: image.pixels.len(),
        });
    }
    Ok(())
}

/// Crop `region` from `image` and scale it to face size.
///
/// The region is not forced to the face aspect ratio; a region with a
/// different ratio is stretched, as a canvas draw would.
pub fn crop_face(image: &DecodedImage, region: &CropRegion) -> Result<CroppedImage, CropError> {
    if image.is_empty() {
        return Err(CropError::EmptyImage);
    }
    check_pixels(image)?;
    if !region.is_finite() {
        return Err(CropError::InvalidRegion);
    }

    let cropped = apply_crop(image, region);
    let scaled = resize(&cropped, FACE_WIDTH, FACE_HEIGHT, FilterType::Lanczos3)?;
    Ok(CroppedImage { image: scaled })
}
