//! Face cropping.
//!
//! A crop goes through two steps:
//! 1. Cut a normalized [`CropRegion`] out of the decoded upload
//! 2. Scale the result to the fixed 358x441 face size
//!
//! The initial region is the widget default: the largest centred
//! rectangle at the face aspect ratio, shrunk to 80% on each side.

mod face;
mod region;

pub use face::{
    crop_face, CropError, CroppedImage, DEFAULT_CROP_AREA, FACE_ASPECT_RATIO, FACE_HEIGHT,
    FACE_WIDTH,
};
pub use region::CropRegion;

pub(crate) use face::check_pixels;
