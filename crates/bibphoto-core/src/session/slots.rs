//! Face slots and the active crop.

use crate::compress::EncodedPayload;
use crate::crop::{CropRegion, DEFAULT_CROP_AREA, FACE_ASPECT_RATIO};
use crate::decode::DecodedImage;

/// Number of reference faces a search can carry.
pub const FACE_SLOT_COUNT: usize = 3;

/// One reference face and whether it is included in the next search.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FaceSlot {
    payload: Option<EncodedPayload>,
    used: bool,
}

impl FaceSlot {
    pub fn payload(&self) -> Option<&EncodedPayload> {
        self.payload.as_ref()
    }

    pub fn has_image(&self) -> bool {
        self.payload.is_some()
    }

    /// Only a slot holding an image can be used.
    pub fn is_used(&self) -> bool {
        self.used && self.payload.is_some()
    }

    /// Replace the slot's image and mark it used.
    pub(crate) fn fill(&mut self, payload: EncodedPayload) -> &EncodedPayload {
        self.used = true;
        self.payload.insert(payload)
    }

    /// Returns the effective state, which stays false for an empty slot.
    pub(crate) fn set_used(&mut self, used: bool) -> bool {
        self.used = used && self.payload.is_some();
        self.used
    }

    pub(crate) fn clear(&mut self) {
        self.payload = None;
        self.used = false;
    }
}

/// The image currently open in the crop tool.
///
/// Exists from image selection until the crop is pasted into a slot or a
/// new image replaces it.
#[derive(Debug, Clone, PartialEq)]
pub struct CropSession {
    image: DecodedImage,
    region: CropRegion,
}

impl CropSession {
    /// Open `image` with the default centred face region.
    pub fn open(image: DecodedImage) -> Self {
        let region = CropRegion::centered(
            image.width,
            image.height,
            FACE_ASPECT_RATIO,
            DEFAULT_CROP_AREA,
        );
        Self { image, region }
    }

    pub fn image(&self) -> &DecodedImage {
        &self.image
    }

    pub fn region(&self) -> &CropRegion {
        &self.region
    }

    pub(crate) fn set_region(&mut self, region: CropRegion) {
        self.region = region;
    }
}
