//! Dithering algorithms.
//!
//! Thirteen algorithms in three families:
//!
//! - **Error diffusion** ([`ErrorDiffusion`]): Floyd-Steinberg, Atkinson,
//!   Jarvis-Judice-Ninke, Stucki, Burkes, Sierra, Sierra Lite
//! - **Ordered** ([`Ordered`]): Bayer 2×2, 4×4 and 8×8
//! - **Pattern**: [`RandomNoise`], [`Halftone`], [`Crosshatch`]
//!
//! # Architecture
//!
//! Every algorithm implements the [`Dither`] trait and has exactly one
//! static instance, reachable through [`AlgorithmId::ditherer()`]. The
//! kernel tables, Bayer matrices, halftone geometry and hatch predicate are
//! public so other backends can run the same math.
//!
//! # Example
//!
//! ```
//! use ditherkit_core::{AlgorithmId, DitherOptions, ImageBuffer};
//!
//! let mut image = ImageBuffer::filled(8, 8, [100, 100, 100, 255]);
//! let options = DitherOptions::new().algorithm(AlgorithmId::Ordered4x4);
//! AlgorithmId::Ordered4x4.ditherer().dither(&mut image, None, &options);
//!
//! assert!(image.pixels.chunks_exact(4).all(|px| px[0] % 85 == 0));
//! ```

mod crosshatch;
mod diffusion;
mod halftone;
mod kernel;
mod ordered;
mod random;

pub use crosshatch::{hatch_ink, Crosshatch, HATCH_BANDS, HATCH_SPACING};
pub use diffusion::{diffuse, diffuse_pixel, ErrorDiffusion, PixelStep};
pub use halftone::{block_luminance, dot_radius, in_dot, Halftone, HALFTONE_BLOCK};
pub use kernel::*;
pub use ordered::{BayerSize, Ordered, BAYER_2, BAYER_4, BAYER_8};
pub use random::RandomNoise;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::image::ImageBuffer;
use crate::options::DitherOptions;
use crate::palette::Palette;

/// A dithering algorithm.
///
/// Implementations work in place on an owned, already-adjusted buffer.
/// Only R/G/B are written; alpha is left as is.
pub trait Dither: Send + Sync {
    /// Dither `image` in place.
    ///
    /// # Arguments
    ///
    /// * `image` - Prepared RGBA buffer, overwritten with the result
    /// * `palette` - Target palette, or `None` for the built-in quantizers
    /// * `options` - Per-call options (only `threshold` is read here)
    fn dither(&self, image: &mut ImageBuffer, palette: Option<&Palette>, options: &DitherOptions);
}

/// Algorithm family, used for grouping in listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    ErrorDiffusion,
    Ordered,
    Pattern,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::ErrorDiffusion => "error-diffusion",
            Category::Ordered => "ordered",
            Category::Pattern => "pattern",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Closed set of algorithm identifiers.
///
/// Serialized as the kebab-case string id. Parsing is lenient: an unknown
/// id becomes [`AlgorithmId::FloydSteinberg`]. Use [`AlgorithmId::parse`]
/// for strict matching.
///
/// ```
/// use ditherkit_core::AlgorithmId;
///
/// assert_eq!(AlgorithmId::from("stucki"), AlgorithmId::Stucki);
/// assert_eq!(AlgorithmId::from("nope"), AlgorithmId::FloydSteinberg);
/// assert_eq!(AlgorithmId::parse("nope"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AlgorithmId {
    #[default]
    FloydSteinberg,
    Atkinson,
    JarvisJudiceNinke,
    Stucki,
    Burkes,
    Sierra,
    SierraLite,
    Ordered2x2,
    Ordered4x4,
    Ordered8x8,
    Random,
    Halftone,
    Crosshatch,
}

static FLOYD_STEINBERG_DITHER: ErrorDiffusion = ErrorDiffusion::new(&FLOYD_STEINBERG);
static ATKINSON_DITHER: ErrorDiffusion = ErrorDiffusion::new(&ATKINSON);
static JJN_DITHER: ErrorDiffusion = ErrorDiffusion::new(&JARVIS_JUDICE_NINKE);
static STUCKI_DITHER: ErrorDiffusion = ErrorDiffusion::new(&STUCKI);
static BURKES_DITHER: ErrorDiffusion = ErrorDiffusion::new(&BURKES);
static SIERRA_DITHER: ErrorDiffusion = ErrorDiffusion::new(&SIERRA);
static SIERRA_LITE_DITHER: ErrorDiffusion = ErrorDiffusion::new(&SIERRA_LITE);
static ORDERED_2_DITHER: Ordered = Ordered::new(BayerSize::Two);
static ORDERED_4_DITHER: Ordered = Ordered::new(BayerSize::Four);
static ORDERED_8_DITHER: Ordered = Ordered::new(BayerSize::Eight);

impl AlgorithmId {
    /// Every algorithm in listing order.
    pub const ALL: [AlgorithmId; 13] = [
        AlgorithmId::FloydSteinberg,
        AlgorithmId::Atkinson,
        AlgorithmId::JarvisJudiceNinke,
        AlgorithmId::Stucki,
        AlgorithmId::Burkes,
        AlgorithmId::Sierra,
        AlgorithmId::SierraLite,
        AlgorithmId::Ordered2x2,
        AlgorithmId::Ordered4x4,
        AlgorithmId::Ordered8x8,
        AlgorithmId::Random,
        AlgorithmId::Halftone,
        AlgorithmId::Crosshatch,
    ];

    /// Stable string id.
    pub fn as_str(self) -> &'static str {
        match self {
            AlgorithmId::FloydSteinberg => "floyd-steinberg",
            AlgorithmId::Atkinson => "atkinson",
            AlgorithmId::JarvisJudiceNinke => "jarvis-judice-ninke",
            AlgorithmId::Stucki => "stucki",
            AlgorithmId::Burkes => "burkes",
            AlgorithmId::Sierra => "sierra",
            AlgorithmId::SierraLite => "sierra-lite",
            AlgorithmId::Ordered2x2 => "ordered-2x2",
            AlgorithmId::Ordered4x4 => "ordered-4x4",
            AlgorithmId::Ordered8x8 => "ordered-8x8",
            AlgorithmId::Random => "random",
            AlgorithmId::Halftone => "pattern-halftone",
            AlgorithmId::Crosshatch => "pattern-crosshatch",
        }
    }

    /// Human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            AlgorithmId::FloydSteinberg => "Floyd-Steinberg",
            AlgorithmId::Atkinson => "Atkinson",
            AlgorithmId::JarvisJudiceNinke => "Jarvis-Judice-Ninke",
            AlgorithmId::Stucki => "Stucki",
            AlgorithmId::Burkes => "Burkes",
            AlgorithmId::Sierra => "Sierra",
            AlgorithmId::SierraLite => "Sierra Lite",
            AlgorithmId::Ordered2x2 => "Ordered 2×2",
            AlgorithmId::Ordered4x4 => "Ordered 4×4",
            AlgorithmId::Ordered8x8 => "Ordered 8×8",
            AlgorithmId::Random => "Random",
            AlgorithmId::Halftone => "Halftone",
            AlgorithmId::Crosshatch => "Crosshatch",
        }
    }

    pub fn category(self) -> Category {
        match self {
            AlgorithmId::FloydSteinberg
            | AlgorithmId::Atkinson
            | AlgorithmId::JarvisJudiceNinke
            | AlgorithmId::Stucki
            | AlgorithmId::Burkes
            | AlgorithmId::Sierra
            | AlgorithmId::SierraLite => Category::ErrorDiffusion,
            AlgorithmId::Ordered2x2 | AlgorithmId::Ordered4x4 | AlgorithmId::Ordered8x8 => {
                Category::Ordered
            }
            AlgorithmId::Random | AlgorithmId::Halftone | AlgorithmId::Crosshatch => {
                Category::Pattern
            }
        }
    }

    /// Strict parse of a string id.
    pub fn parse(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.as_str() == id)
    }

    /// Diffusion kernel, for error-diffusion algorithms.
    pub fn kernel(self) -> Option<&'static Kernel> {
        match self {
            AlgorithmId::FloydSteinberg => Some(&FLOYD_STEINBERG),
            AlgorithmId::Atkinson => Some(&ATKINSON),
            AlgorithmId::JarvisJudiceNinke => Some(&JARVIS_JUDICE_NINKE),
            AlgorithmId::Stucki => Some(&STUCKI),
            AlgorithmId::Burkes => Some(&BURKES),
            AlgorithmId::Sierra => Some(&SIERRA),
            AlgorithmId::SierraLite => Some(&SIERRA_LITE),
            _ => None,
        }
    }

    /// Bayer matrix size, for ordered algorithms.
    pub fn bayer_size(self) -> Option<BayerSize> {
        match self {
            AlgorithmId::Ordered2x2 => Some(BayerSize::Two),
            AlgorithmId::Ordered4x4 => Some(BayerSize::Four),
            AlgorithmId::Ordered8x8 => Some(BayerSize::Eight),
            _ => None,
        }
    }

    /// Whether the same input always yields the same output.
    pub fn is_deterministic(self) -> bool {
        self != AlgorithmId::Random
    }

    /// The shared ditherer for this algorithm.
    pub fn ditherer(self) -> &'static dyn Dither {
        match self {
            AlgorithmId::FloydSteinberg => &FLOYD_STEINBERG_DITHER,
            AlgorithmId::Atkinson => &ATKINSON_DITHER,
            AlgorithmId::JarvisJudiceNinke => &JJN_DITHER,
            AlgorithmId::Stucki => &STUCKI_DITHER,
            AlgorithmId::Burkes => &BURKES_DITHER,
            AlgorithmId::Sierra => &SIERRA_DITHER,
            AlgorithmId::SierraLite => &SIERRA_LITE_DITHER,
            AlgorithmId::Ordered2x2 => &ORDERED_2_DITHER,
            AlgorithmId::Ordered4x4 => &ORDERED_4_DITHER,
            AlgorithmId::Ordered8x8 => &ORDERED_8_DITHER,
            AlgorithmId::Random => &RandomNoise,
            AlgorithmId::Halftone => &Halftone,
            AlgorithmId::Crosshatch => &Crosshatch,
        }
    }

    pub fn info(self) -> AlgorithmInfo {
        AlgorithmInfo {
            id: self,
            name: self.name(),
            category: self.category(),
        }
    }
}

impl fmt::Display for AlgorithmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for AlgorithmId {
    fn from(id: &str) -> Self {
        Self::parse(id).unwrap_or_default()
    }
}

impl From<String> for AlgorithmId {
    fn from(id: String) -> Self {
        Self::from(id.as_str())
    }
}

impl From<AlgorithmId> for String {
    fn from(id: AlgorithmId) -> Self {
        id.as_str().to_owned()
    }
}

/// Listing entry for one algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AlgorithmInfo {
    pub id: AlgorithmId,
    pub name: &'static str,
    pub category: Category,
}

/// All algorithms in listing order.
pub fn list_algorithms() -> Vec<AlgorithmInfo> {
    AlgorithmId::ALL.into_iter().map(AlgorithmId::info).collect()
}
