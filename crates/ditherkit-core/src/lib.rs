#![allow(clippy::needless_range_loop, clippy::module_inception)]

//! ditherkit-core: palette quantization and classic dithering for RGBA8
//! buffers.
//!
//! # Quick Start
//!
//! ```
//! use ditherkit_core::{pipeline, AlgorithmId, DitherOptions, ImageBuffer, BUILTIN_PALETTES};
//!
//! let image = ImageBuffer::filled(16, 16, [140, 120, 90, 255]);
//! let gameboy = BUILTIN_PALETTES[1].palette();
//! let options = DitherOptions::new().algorithm(AlgorithmId::Ordered8x8);
//!
//! let out = pipeline::dither_cpu(&image, &options, Some(&gameboy)).unwrap();
//! assert_eq!((out.width, out.height), (16, 16));
//! ```
//!
//! # Pipeline
//!
//! ```text
//! ImageBuffer (RGBA8)
//!     |
//!     v
//! adjust::prepare     contrast -> midtones -> highlights, then box blur
//!     |
//!     v
//! Dither              error diffusion | ordered | pattern
//!     |
//!     v
//! ImageBuffer (RGBA8, same size, alpha untouched)
//! ```
//!
//! All arithmetic happens on the 0-255 scale in `f32`. Every write back
//! into the byte buffer rounds half to even and clamps to `[0, 255]`, so
//! intermediate error never leaves the byte range.
//!
//! # Quantization
//!
//! With a palette, every algorithm picks the nearest entry by unweighted
//! squared RGB distance. Without one, error diffusion thresholds luminance
//! at 128 (pure black/white) while ordered and random dithering snap each
//! channel to multiples of 85. Halftone and crosshatch always draw with two
//! colours. See [`quantize`].
//!
//! # Algorithms
//!
//! See [`dither`] and [`AlgorithmId`] for the full table.

pub mod adjust;
pub mod dither;
pub mod image;
pub mod options;
pub mod palette;
pub mod pipeline;
pub mod quantize;

#[cfg(test)]
mod domain_tests;

pub use dither::{list_algorithms, AlgorithmId, AlgorithmInfo, Category, Dither};
pub use image::{clamp_channel, BufferError, ImageBuffer, CHANNELS};
pub use options::DitherOptions;
pub use palette::{
    builtin_palettes, parse_hex, to_hex, BuiltinPalette, Palette, PaletteError, ParseColorError,
    Rgb, BUILTIN_PALETTES,
};
