//! Built-in retro palettes.

use super::palette::{Palette, Rgb};

/// A named palette shipped with the crate.
#[derive(Debug, Clone, Copy)]
pub struct BuiltinPalette {
    pub id: &'static str,
    pub name: &'static str,
    pub colors: &'static [Rgb],
}

impl BuiltinPalette {
    /// Build an owned [`Palette`] from the static table.
    pub fn palette(&self) -> Palette {
        Palette::from_nonempty(self.colors.to_vec())
    }
}

/// Built-in palettes in listing order.
pub const BUILTIN_PALETTES: &[BuiltinPalette] = &[
    BuiltinPalette {
        id: "monochrome",
        name: "Monochrome",
        colors: &[[0, 0, 0], [255, 255, 255]],
    },
    BuiltinPalette {
        id: "gameboy",
        name: "Game Boy",
        colors: &[[15, 56, 15], [48, 98, 48], [139, 172, 15], [155, 188, 15]],
    },
    BuiltinPalette {
        id: "cga",
        name: "CGA",
        colors: &[[0, 0, 0], [85, 255, 255], [255, 85, 255], [255, 255, 255]],
    },
    BuiltinPalette {
        id: "commodore64",
        name: "Commodore 64",
        colors: &[
            [0, 0, 0],
            [255, 255, 255],
            [136, 0, 0],
            [170, 255, 238],
            [204, 68, 204],
            [0, 204, 85],
            [0, 0, 170],
            [238, 238, 119],
            [221, 136, 85],
            [102, 68, 0],
            [255, 119, 119],
            [51, 51, 51],
            [119, 119, 119],
            [170, 255, 102],
            [0, 136, 255],
            [187, 187, 187],
        ],
    },
    BuiltinPalette {
        id: "apple2",
        name: "Apple II",
        colors: &[
            [0, 0, 0],
            [255, 255, 255],
            [32, 192, 0],
            [160, 0, 255],
            [240, 80, 0],
            [0, 128, 255],
        ],
    },
];

/// Iterate over the built-in palettes.
pub fn builtin_palettes() -> impl Iterator<Item = &'static BuiltinPalette> {
    BUILTIN_PALETTES.iter()
}
