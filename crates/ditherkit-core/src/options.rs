//! Per-call dithering options.
//!
//! [`DitherOptions`] is what callers hand to the engine together with an
//! [`ImageBuffer`](crate::ImageBuffer). It serializes in camelCase so it can
//! travel inside worker messages unchanged.

use serde::{Deserialize, Serialize};

use crate::dither::AlgorithmId;

/// Neutral value for contrast, midtones and highlights.
pub const NEUTRAL_ADJUSTMENT: u8 = 50;

/// Upper bound for contrast, midtones and highlights.
pub const MAX_ADJUSTMENT: u8 = 100;

/// Noise amplitude used by the random ditherer when `threshold` is unset.
pub const DEFAULT_RANDOM_THRESHOLD: u8 = 128;

/// Configuration for one dithering call.
///
/// # Defaults
///
/// - algorithm: Floyd-Steinberg
/// - palette: none (step/threshold quantization)
/// - scale: 1.0 (never applied by the engine; resizing is up to the caller)
/// - contrast, midtones, highlights: 50 (no change)
/// - blur: 0 (disabled)
/// - threshold: unset
///
/// # Example
///
/// ```
/// use ditherkit_core::{AlgorithmId, DitherOptions};
///
/// let options = DitherOptions::new()
///     .algorithm(AlgorithmId::Atkinson)
///     .palette("gameboy")
///     .contrast(70);
///
/// assert_eq!(options.algorithm, AlgorithmId::Atkinson);
/// assert_eq!(options.palette.as_deref(), Some("gameboy"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DitherOptions {
    /// Algorithm to run. Unknown ids deserialize to Floyd-Steinberg.
    pub algorithm: AlgorithmId,

    /// Palette id resolved through the palette registry.
    pub palette: Option<String>,

    /// Pre-resize factor. Part of the options contract only.
    pub scale: f32,

    /// Contrast, 0-100, 50 is neutral.
    pub contrast: u8,

    /// Midtone lift, 0-100, 50 is neutral.
    pub midtones: u8,

    /// Highlight lift, 0-100, 50 is neutral.
    pub highlights: u8,

    /// Box blur radius in pixels, 0 disables.
    pub blur: u32,

    /// Noise amplitude for the random ditherer.
    pub threshold: Option<u8>,
}

impl Default for DitherOptions {
    fn default() -> Self {
        Self {
            algorithm: AlgorithmId::default(),
            palette: None,
            scale: 1.0,
            contrast: NEUTRAL_ADJUSTMENT,
            midtones: NEUTRAL_ADJUSTMENT,
            highlights: NEUTRAL_ADJUSTMENT,
            blur: 0,
            threshold: None,
        }
    }
}

impl DitherOptions {
    /// Create options with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the algorithm.
    #[inline]
    pub fn algorithm(mut self, algorithm: AlgorithmId) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Set the palette id.
    #[inline]
    pub fn palette(mut self, id: impl Into<String>) -> Self {
        self.palette = Some(id.into());
        self
    }

    /// Set contrast (clamped to 0-100).
    #[inline]
    pub fn contrast(mut self, value: u8) -> Self {
        self.contrast = value.min(MAX_ADJUSTMENT);
        self
    }

    /// Set midtones (clamped to 0-100).
    #[inline]
    pub fn midtones(mut self, value: u8) -> Self {
        self.midtones = value.min(MAX_ADJUSTMENT);
        self
    }

    /// Set highlights (clamped to 0-100).
    #[inline]
    pub fn highlights(mut self, value: u8) -> Self {
        self.highlights = value.min(MAX_ADJUSTMENT);
        self
    }

    /// Set the blur radius.
    #[inline]
    pub fn blur(mut self, radius: u32) -> Self {
        self.blur = radius;
        self
    }

    /// Set the random noise amplitude.
    #[inline]
    pub fn threshold(mut self, value: u8) -> Self {
        self.threshold = Some(value);
        self
    }

    /// Noise amplitude for the random ditherer.
    #[inline]
    pub fn random_threshold(&self) -> u8 {
        self.threshold.unwrap_or(DEFAULT_RANDOM_THRESHOLD)
    }

    /// True when contrast, midtones, highlights and blur change nothing.
    pub fn is_neutral(&self) -> bool {
        self.contrast == NEUTRAL_ADJUSTMENT
            && self.midtones == NEUTRAL_ADJUSTMENT
            && self.highlights == NEUTRAL_ADJUSTMENT
            && self.blur == 0
    }
}
