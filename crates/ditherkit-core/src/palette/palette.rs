//! Palette struct with nearest-colour matching.

use super::error::{PaletteError, ParseColorError};

/// An 8-bit RGB triple.
pub type Rgb = [u8; 3];

/// Parse a hex colour string.
///
/// Supports the following formats:
/// - `#RRGGBB` / `RRGGBB` - standard 6-digit hex
/// - `#RGB` / `RGB` - shorthand 3-digit hex (expands to RRGGBB)
///
/// Parsing is case-insensitive. Leading and trailing whitespace is trimmed.
///
/// ```
/// use ditherkit_core::palette::parse_hex;
///
/// assert_eq!(parse_hex("#9bbc0f").unwrap(), [0x9b, 0xbc, 0x0f]);
/// assert_eq!(parse_hex("F00").unwrap(), [255, 0, 0]);
/// ```
pub fn parse_hex(s: &str) -> Result<Rgb, ParseColorError> {
    let s = s.trim();
    let s = s.strip_prefix('#').unwrap_or(s);
    // Byte slicing below needs single-byte characters.
    if !s.is_ascii() {
        return Err(ParseColorError::InvalidLength);
    }

    match s.len() {
        3 => {
            // Shorthand: expand each digit by multiplying by 17 (0xF -> 0xFF)
            let r = u8::from_str_radix(&s[0..1], 16)? * 17;
            let g = u8::from_str_radix(&s[1..2], 16)? * 17;
            let b = u8::from_str_radix(&s[2..3], 16)? * 17;
            Ok([r, g, b])
        }
        6 => {
            let r = u8::from_str_radix(&s[0..2], 16)?;
            let g = u8::from_str_radix(&s[2..4], 16)?;
            let b = u8::from_str_radix(&s[4..6], 16)?;
            Ok([r, g, b])
        }
        _ => Err(ParseColorError::InvalidLength),
    }
}

/// Render an RGB triple as lowercase `#rrggbb`.
pub fn to_hex(rgb: Rgb) -> String {
    format!("#{:02x}{:02x}{:02x}", rgb[0], rgb[1], rgb[2])
}

/// An ordered, non-empty list of RGB colours.
///
/// Entry order only matters for tie-breaking: when two entries are equally
/// close to a pixel, the earlier one wins. Duplicate entries are allowed.
///
/// # Example
///
/// ```
/// use ditherkit_core::Palette;
///
/// let palette = Palette::from_hex(&["#000000", "#ffffff"]).unwrap();
/// assert_eq!(palette.nearest(100.0, 100.0, 100.0), [0, 0, 0]);
/// assert_eq!(palette.nearest(144.0, 144.0, 144.0), [255, 255, 255]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Rgb>,
}

impl Palette {
    /// Create a palette from RGB triples.
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::EmptyPalette`] if `colors` is empty.
    pub fn new(colors: Vec<Rgb>) -> Result<Self, PaletteError> {
        if colors.is_empty() {
            return Err(PaletteError::EmptyPalette);
        }
        Ok(Self { colors })
    }

    /// Wrap a list that is known to be non-empty (static tables).
    pub(crate) fn from_nonempty(colors: Vec<Rgb>) -> Self {
        debug_assert!(!colors.is_empty());
        Self { colors }
    }

    /// Create a palette from hex strings (see [`parse_hex`]).
    pub fn from_hex<S: AsRef<str>>(hex: &[S]) -> Result<Self, PaletteError> {
        let colors = hex
            .iter()
            .enumerate()
            .map(|(index, s)| {
                parse_hex(s.as_ref()).map_err(|source| PaletteError::ParseColor { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(colors)
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false; kept for API symmetry with `len`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Entries in insertion order.
    #[inline]
    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    /// Entries as lowercase `#rrggbb` strings.
    pub fn to_hex_strings(&self) -> Vec<String> {
        self.colors.iter().map(|&c| to_hex(c)).collect()
    }

    /// Whether `rgb` is exactly one of the entries.
    pub fn contains(&self, rgb: Rgb) -> bool {
        self.colors.contains(&rgb)
    }

    /// Index of the entry nearest to `(r, g, b)`.
    ///
    /// Unweighted squared Euclidean distance in RGB space. Strict `<`
    /// keeps the first of several equidistant entries.
    pub fn nearest_index(&self, r: f32, g: f32, b: f32) -> usize {
        let mut best = 0;
        let mut best_dist = f32::INFINITY;
        for (i, c) in self.colors.iter().enumerate() {
            let dr = r - c[0] as f32;
            let dg = g - c[1] as f32;
            let db = b - c[2] as f32;
            let dist = dr * dr + dg * dg + db * db;
            if dist < best_dist {
                best_dist = dist;
                best = i;
            }
        }
        best
    }

    /// Entry nearest to `(r, g, b)`.
    #[inline]
    pub fn nearest(&self, r: f32, g: f32, b: f32) -> Rgb {
        self.colors[self.nearest_index(r, g, b)]
    }
}
