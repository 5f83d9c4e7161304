//! Crop regions in normalized coordinates.
//!
//! All region values are in the range 0.0 to 1.0 relative to the source
//! image, so a region chosen on a downscaled working copy applies unchanged
//! to any other resolution of the same photo.
//!
//! - (0.0, 0.0) = top-left corner
//! - (1.0, 1.0) = bottom-right corner

use serde::{Deserialize, Serialize};

use crate::decode::DecodedImage;

/// A rectangular crop region in normalized coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropRegion {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Default for CropRegion {
    fn default() -> Self {
        Self::full()
    }
}

impl CropRegion {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// The whole image.
    pub fn full() -> Self {
        Self::new(0.0, 0.0, 1.0, 1.0)
    }

    /// Build a region from pixel coordinates, as reported by a crop widget.
    ///
    /// Returns the full region for an empty image.
    pub fn from_pixels(x: f64, y: f64, width: f64, height: f64, image: &DecodedImage) -> Self {
        if image.is_empty() {
            return Self::full();
        }
        let (w, h) = (image.width as f64, image.height as f64);
        Self::new(x / w, y / h, width / w, height / h)
    }

    /// The largest centred region with the given pixel aspect ratio, with both
    /// sides scaled by `area` (clamped to 0.0..=1.0).
    ///
    /// This mirrors a crop widget opening with `aspectRatio` and
    /// `autoCropArea` set.
    pub fn centered(image_width: u32, image_height: u32, aspect_ratio: f64, area: f64) -> Self {
        if image_width == 0 || image_height == 0 || aspect_ratio.is_nan() || aspect_ratio <= 0.0 {
            return Self::full();
        }
        let area = if area.is_finite() {
            area.clamp(0.0, 1.0)
        } else {
            1.0
        };

        let (img_w, img_h) = (image_width as f64, image_height as f64);
        let (crop_w, crop_h) = if img_w / img_h > aspect_ratio {
            (img_h * aspect_ratio, img_h)
        } else {
            (img_w, img_w / aspect_ratio)
        };

        let width = crop_w * area / img_w;
        let height = crop_h * area / img_h;
        Self::new((1.0 - width) / 2.0, (1.0 - height) / 2.0, width, height)
    }

    /// True when every value is a finite number.
    pub fn is_finite(&self) -> bool {
        self.left.is_finite()
            && self.top.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
    }

    /// Whether this region covers the whole image.
    pub fn is_full(&self) -> bool {
        self.left <= 0.0 && self.top <= 0.0 && self.width >= 1.0 && self.height >= 1.0
    }
}

/// Cut `region` out of `image`.
///
/// Coordinates that extend beyond the image are clamped and the output is
/// never smaller than 1x1. A full region returns a copy of the source.
/// `image.pixels` must hold `width * height * 3` bytes.
pub(crate) fn apply_crop(image: &DecodedImage, region: &CropRegion) -> DecodedImage {
    if region.is_full() {
        return image.clone();
    }

    let src_w = image.width as f64;
    let src_h = image.height as f64;

    let px_left = (region.left.clamp(0.0, 1.0) * src_w).round() as u32;
    let px_top = (region.top.clamp(0.0, 1.0) * src_h).round() as u32;
    let px_width = (region.width.clamp(0.0, 1.0) * src_w).round() as u32;
    let px_height = (region.height.clamp(0.0, 1.0) * src_h).round() as u32;

    let px_left = px_left.min(image.width.saturating_sub(1));
    let px_top = px_top.min(image.height.saturating_sub(1));
    let px_right = (px_left + px_width).min(image.width);
    let px_bottom = (px_top + px_height).min(image.height);

    let out_width = px_right.saturating_sub(px_left).max(1);
    let out_height = px_bottom.saturating_sub(px_top).max(1);

    let row_len = (out_width * 3) as usize;
    let mut output = Vec::with_capacity(row_len * out_height as usize);

    for y in px_top..px_top + out_height {
        let start = ((y * image.width + px_left) * 3) as usize;
        output.extend_from_slice(&image.pixels[start..start + row_len]);
    }

    DecodedImage {
        width: out_width,
        height: out_height,
        pixels: output,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Each pixel value encodes its position.
    fn test_image(width: u32, height: u32) -> DecodedImage {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                let v = ((y * width + x) % 256) as u8;
                pixels.extend_from_slice(&[v, v, v]);
            }
        }
        DecodedImage::new(width, height, pixels)
    }

    #[test]
    fn test_full_crop_is_copy() {
        let img = test_image(50, 50);
        let result = apply_crop(&img, &CropRegion::full());
        assert_eq!(result, img);
    }

    #[test]
    fn test_center_crop_pixels() {
        let img = test_image(10, 10);
        let result = apply_crop(&img, &CropRegion::new(0.2, 0.2, 0.6, 0.6));

        assert_eq!(result.width, 6);
        assert_eq!(result.height, 6);
        // (2, 2) in the source
        assert_eq!(result.pixels[0], 22);
    }

    #[test]
    fn test_crop_clamps_to_bounds() {
        let img = test_image(10, 10);
        let result = apply_crop(&img, &CropRegion::new(0.8, 0.8, 0.5, 0.5));

        assert_eq!(result.width, 2);
        assert_eq!(result.height, 2);
    }

    #[test]
    fn test_crop_negative_coords() {
        let img = test_image(100, 100);
        let result = apply_crop(&img, &CropRegion::new(-0.1, -0.1, 0.5, 0.5));

        assert_eq!(result.width, 50);
        assert_eq!(result.height, 50);
        assert_eq!(result.pixels[0], 0);
    }

    #[test]
    fn test_crop_minimum_dimension() {
        let img = test_image(100, 100);
        let result = apply_crop(&img, &CropRegion::new(0.99, 0.99, 0.001, 0.001));

        assert_eq!(result.width, 1);
        assert_eq!(result.height, 1);
    }

    #[test]
    fn test_from_pixels() {
        let img = test_image(200, 100);
        let region = CropRegion::from_pixels(50.0, 25.0, 100.0, 50.0, &img);
        assert_eq!(region, CropRegion::new(0.25, 0.25, 0.5, 0.5));
    }

    #[test]
    fn test_centered_on_square_image() {
        let region = CropRegion::centered(1000, 1000, 358.0 / 441.0, 0.8);

        assert!((region.height - 0.8).abs() < 1e-9);
        assert!((region.width - 0.8 * 358.0 / 441.0).abs() < 1e-9);
        assert!((region.top - 0.1).abs() < 1e-9);
        assert!((region.left + region.width / 2.0 - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_centered_on_tall_image() {
        // Taller than the face ratio: width limits the region
        let region = CropRegion::centered(300, 900, 358.0 / 441.0, 1.0);

        assert!((region.width - 1.0).abs() < 1e-9);
        assert!(region.left.abs() < 1e-9);
        let px_h = region.height * 900.0;
        assert!((300.0 / px_h - 358.0 / 441.0).abs() < 1e-9);
    }

    #[test]
    fn test_centered_degenerate_inputs() {
        assert_eq!(CropRegion::centered(0, 10, 0.8, 0.8), CropRegion::full());
        assert_eq!(CropRegion::centered(10, 10, 0.0, 0.8), CropRegion::full());
        assert_eq!(CropRegion::centered(10, 10, f64::NAN, 0.8), CropRegion::full());
    }
}
