//! Palette types and utilities
//!
//! This module provides the [`Palette`] type used for nearest-colour
//! matching, hex colour parsing, and the built-in retro palettes.

mod builtin;
mod error;
mod palette;

pub use builtin::{builtin_palettes, BuiltinPalette, BUILTIN_PALETTES};
pub use error::{PaletteError, ParseColorError};
pub use palette::{parse_hex, to_hex, Palette, Rgb};
