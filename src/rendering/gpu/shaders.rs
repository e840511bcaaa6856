//! Fragment programs for the ordered and pattern ditherers.
//!
//! Programs run once per output pixel in normalized colour space
//! (`0.0..=1.0`), sample the bound texture and return RGBA. The dithering
//! math is the same as on the CPU: Bayer matrices, halftone geometry and
//! hatch predicate all come from `ditherkit_core::dither`.

use std::fmt;

use ditherkit_core::dither::{
    block_luminance, dot_radius, hatch_ink, in_dot, BayerSize, HALFTONE_BLOCK,
};
use ditherkit_core::quantize::luminance;
use ditherkit_core::{AlgorithmId, DitherOptions, Palette};

/// Per-pixel entry point of a program.
pub type FragmentFn = fn(&FragmentInput<'_>) -> [f32; 4];

/// A named fragment program.
#[derive(Clone, Copy)]
pub struct ShaderProgram {
    pub name: &'static str,
    pub fragment: FragmentFn,
}

impl fmt::Debug for ShaderProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShaderProgram")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Values shared by every fragment of one draw call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Uniforms {
    /// Bayer matrix side (2, 4 or 8).
    pub bayer_size: u32,
    /// Random noise amplitude, normalized.
    pub threshold: f32,
    pub seed: u32,
    /// Palette colours, normalized. Empty means "no palette".
    pub palette: Vec<[f32; 3]>,
}

impl Uniforms {
    pub fn for_call(options: &DitherOptions, palette: Option<&Palette>, seed: u32) -> Self {
        Self {
            bayer_size: options
                .algorithm
                .bayer_size()
                .map_or(0, |size| size.dim() as u32),
            threshold: options.random_threshold() as f32 / 255.0,
            seed,
            palette: palette
                .map(|p| {
                    p.colors()
                        .iter()
                        .map(|c| c.map(|v| v as f32 / 255.0))
                        .collect()
                })
                .unwrap_or_default(),
        }
    }
}

/// Read-only view of an RGBA float texture.
#[derive(Debug, Clone, Copy)]
pub struct TextureView<'a> {
    pub width: u32,
    pub height: u32,
    texels: &'a [f32],
}

impl<'a> TextureView<'a> {
    pub fn new(width: u32, height: u32, texels: &'a [f32]) -> Self {
        debug_assert_eq!(texels.len(), width as usize * height as usize * 4);
        Self {
            width,
            height,
            texels,
        }
    }

    /// Texel fetch with coordinates clamped to the edges.
    #[inline]
    pub fn fetch(&self, x: i64, y: i64) -> [f32; 4] {
        let x = x.clamp(0, self.width as i64 - 1) as usize;
        let y = y.clamp(0, self.height as i64 - 1) as usize;
        let i = (y * self.width as usize + x) * 4;
        [
            self.texels[i],
            self.texels[i + 1],
            self.texels[i + 2],
            self.texels[i + 3],
        ]
    }
}

/// Everything a fragment can see.
#[derive(Debug, Clone, Copy)]
pub struct FragmentInput<'a> {
    pub x: u32,
    pub y: u32,
    pub texture: TextureView<'a>,
    pub uniforms: &'a Uniforms,
}

impl FragmentInput<'_> {
    #[inline]
    fn texel(&self) -> [f32; 4] {
        self.texture.fetch(self.x as i64, self.y as i64)
    }
}

pub const ORDERED: ShaderProgram = ShaderProgram {
    name: "ordered",
    fragment: ordered_fragment,
};

pub const RANDOM: ShaderProgram = ShaderProgram {
    name: "random",
    fragment: random_fragment,
};

pub const HALFTONE: ShaderProgram = ShaderProgram {
    name: "halftone",
    fragment: halftone_fragment,
};

pub const CROSSHATCH: ShaderProgram = ShaderProgram {
    name: "crosshatch",
    fragment: crosshatch_fragment,
};

/// Program for an algorithm. Error diffusion has none.
pub fn program_for(algorithm: AlgorithmId) -> Option<&'static ShaderProgram> {
    match algorithm {
        AlgorithmId::Ordered2x2 | AlgorithmId::Ordered4x4 | AlgorithmId::Ordered8x8 => {
            Some(&ORDERED)
        }
        AlgorithmId::Random => Some(&RANDOM),
        AlgorithmId::Halftone => Some(&HALFTONE),
        AlgorithmId::Crosshatch => Some(&CROSSHATCH),
        _ => None,
    }
}

fn bayer_size(uniform: u32) -> BayerSize {
    match uniform {
        2 => BayerSize::Two,
        8 => BayerSize::Eight,
        _ => BayerSize::Four,
    }
}

/// Nearest palette colour, or the 4-level cube when the palette is empty.
fn quantize(c: [f32; 3], palette: &[[f32; 3]]) -> [f32; 3] {
    if palette.is_empty() {
        return c.map(|v| (v.clamp(0.0, 1.0) * 3.0).round() / 3.0);
    }
    let mut best = palette[0];
    let mut best_dist = f32::INFINITY;
    for p in palette {
        let dr = c[0] - p[0];
        let dg = c[1] - p[1];
        let db = c[2] - p[2];
        let dist = dr * dr + dg * dg + db * db;
        if dist < best_dist {
            best_dist = dist;
            best = *p;
        }
    }
    best
}

fn ink_and_paper(palette: &[[f32; 3]]) -> ([f32; 3], [f32; 3]) {
    if palette.is_empty() {
        return ([0.0; 3], [1.0; 3]);
    }
    (quantize([0.0; 3], palette), quantize([1.0; 3], palette))
}

/// Luminance on the 0-255 scale.
#[inline]
fn luma(c: [f32; 4]) -> f32 {
    luminance(c[0] * 255.0, c[1] * 255.0, c[2] * 255.0)
}

/// Integer hash mapped to `[0, 1)`.
#[inline]
fn hash_noise(x: u32, y: u32, seed: u32) -> f32 {
    let mut h = x
        .wrapping_mul(0x8da6_b343)
        ^ y.wrapping_mul(0xd816_3841)
        ^ seed.wrapping_mul(0xcb1a_b31f);
    h ^= h >> 16;
    h = h.wrapping_mul(0x7feb_352d);
    h ^= h >> 15;
    h = h.wrapping_mul(0x846c_a68b);
    h ^= h >> 16;
    (h >> 8) as f32 / (1u32 << 24) as f32
}

fn ordered_fragment(input: &FragmentInput<'_>) -> [f32; 4] {
    let c = input.texel();
    let size = bayer_size(input.uniforms.bayer_size);
    let t = size.normalized(input.x as usize, input.y as usize) - 0.5;
    let q = quantize([c[0] + t, c[1] + t, c[2] + t], &input.uniforms.palette);
    [q[0], q[1], q[2], c[3]]
}

fn random_fragment(input: &FragmentInput<'_>) -> [f32; 4] {
    let c = input.texel();
    let noise = (hash_noise(input.x, input.y, input.uniforms.seed) - 0.5) * input.uniforms.threshold;
    let q = quantize(
        [c[0] + noise, c[1] + noise, c[2] + noise],
        &input.uniforms.palette,
    );
    [q[0], q[1], q[2], c[3]]
}

fn halftone_fragment(input: &FragmentInput<'_>) -> [f32; 4] {
    let c = input.texel();
    let (x, y) = (input.x as usize, input.y as usize);
    let texture = input.texture;
    let mean = block_luminance(
        x - x % HALFTONE_BLOCK,
        y - y % HALFTONE_BLOCK,
        texture.width as usize,
        texture.height as usize,
        |sx, sy| {
            let s = texture.fetch(sx as i64, sy as i64);
            [s[0] * 255.0, s[1] * 255.0, s[2] * 255.0]
        },
    );
    let (ink, paper) = ink_and_paper(&input.uniforms.palette);
    let out = if in_dot(x, y, dot_radius(mean)) {
        ink
    } else {
        paper
    };
    [out[0], out[1], out[2], c[3]]
}

fn crosshatch_fragment(input: &FragmentInput<'_>) -> [f32; 4] {
    let c = input.texel();
    let (ink, paper) = ink_and_paper(&input.uniforms.palette);
    let out = if hatch_ink(luma(c), input.x as usize, input.y as usize) {
        ink
    } else {
        paper
    };
    [out[0], out[1], out[2], c[3]]
}
