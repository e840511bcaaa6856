//! Error types for palette operations
//!
//! This module provides error types for colour parsing and palette validation.

use std::num::ParseIntError;
use thiserror::Error;

/// Error type for parsing hex colour strings.
///
/// Returned when parsing a hex colour string fails, either due to
/// invalid length or invalid hexadecimal characters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseColorError {
    /// Hex string has invalid length (must be 3 or 6 characters after stripping '#')
    #[error("invalid hex color length (expected 3 or 6 characters)")]
    InvalidLength,
    /// Invalid hexadecimal character encountered
    #[error("invalid hex character: {0}")]
    InvalidHex(#[from] ParseIntError),
}

/// Error type for palette validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PaletteError {
    /// No colours provided in palette
    #[error("palette cannot be empty")]
    EmptyPalette,
    /// Invalid hex colour string at the given position
    #[error("invalid color at index {index}: {source}")]
    ParseColor {
        index: usize,
        #[source]
        source: ParseColorError,
    },
}
