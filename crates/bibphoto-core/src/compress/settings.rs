//! Parameters of the adaptive compression loop.

use thiserror::Error;

/// Largest face payload the search endpoint accepts comfortably (260 KiB).
pub const DEFAULT_MAX_BYTES: usize = 260 * 1024;

/// Quality of the first encode.
pub const DEFAULT_START_QUALITY: f64 = 0.7;

/// Quality decrement between attempts.
pub const DEFAULT_QUALITY_STEP: f64 = 0.1;

/// Retries stop once the quality has reached this floor.
pub const DEFAULT_MIN_QUALITY: f64 = 0.1;

/// Smallest accepted step. The JPEG encoder works in whole percent, so
/// finer steps would only repeat levels.
pub const MIN_QUALITY_STEP: f64 = 0.01;

/// Tolerance for comparing quality levels built from repeated decimal steps.
pub(crate) const QUALITY_EPSILON: f64 = 1e-9;

/// Errors from building compression settings.
#[derive(Debug, Error, PartialEq)]
pub enum CompressError {
    #[error("Start quality must be in (0, 1], got {0}")]
    InvalidStartQuality(f64),

    #[error("Quality step must be a finite number of at least 0.01, got {0}")]
    InvalidStep(f64),

    #[error("Minimum quality must be above 0 and at most the start quality, got {0}")]
    InvalidMinQuality(f64),
}

/// Validated settings for [`compress`](super::compress).
///
/// Fields are private so a settings value always describes a terminating
/// loop: a step of at least [`MIN_QUALITY_STEP`] and a floor above zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompressionSettings {
    max_bytes: usize,
    start_quality: f64,
    step: f64,
    min_quality: f64,
}

impl Default for CompressionSettings {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_BYTES,
            start_quality: DEFAULT_START_QUALITY,
            step: DEFAULT_QUALITY_STEP,
            min_quality: DEFAULT_MIN_QUALITY,
        }
    }
}

impl CompressionSettings {
    pub fn new(
        max_bytes: usize,
        start_quality: f64,
        step: f64,
        min_quality: f64,
    ) -> Result<Self, CompressError> {
        if !(start_quality > 0.0 && start_quality <= 1.0) {
            return Err(CompressError::InvalidStartQuality(start_quality));
        }
        if !(step.is_finite() && step >= MIN_QUALITY_STEP - QUALITY_EPSILON) {
            return Err(CompressError::InvalidStep(step));
        }
        if !(min_quality > 0.0 && min_quality <= start_quality) {
            return Err(CompressError::InvalidMinQuality(min_quality));
        }
        Ok(Self {
            max_bytes,
            start_quality,
            step,
            min_quality,
        })
    }

    /// Default quality ladder with a different byte ceiling.
    pub fn with_max_bytes(max_bytes: usize) -> Self {
        Self {
            max_bytes,
            ..Self::default()
        }
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    pub fn start_quality(&self) -> f64 {
        self.start_quality
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn min_quality(&self) -> f64 {
        self.min_quality
    }

    /// Quality used by the zero-based `attempt`.
    ///
    /// Computed from the start rather than by repeated subtraction and
    /// snapped to six decimals, so the ladder reads 0.7, 0.6, 0.5 exactly.
    /// Never goes below the floor.
    pub fn quality_at(&self, attempt: u32) -> f64 {
        let raw = self.start_quality - f64::from(attempt) * self.step;
        if raw <= self.min_quality + QUALITY_EPSILON {
            return self.min_quality;
        }
        let snapped = (raw * 1e6).round() / 1e6;
        snapped.max(self.min_quality)
    }

    /// Whether another attempt is allowed after encoding at `quality`.
    pub fn can_retry_below(&self, quality: f64) -> bool {
        quality > self.min_quality + QUALITY_EPSILON
    }

    /// Upper bound on encode calls: `ceil((start - min) / step) + 1`.
    pub fn max_attempts(&self) -> u32 {
        if !self.can_retry_below(self.start_quality) {
            return 1;
        }
        let span = self.start_quality - self.min_quality;
        let retries = (span / self.step - QUALITY_EPSILON).ceil();
        retries as u32 + 1
    }
}
