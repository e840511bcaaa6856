//! Domain-critical regression tests for ditherkit-core.
//!
//! These tests are designed to catch specific classes of bugs, not just
//! confirm happy paths. Each test documents the regression it guards against.

#[cfg(test)]
mod domain_tests {
    use pretty_assertions::assert_eq;

    use crate::dither::{diffuse, BayerSize, Category};
    use crate::pipeline::dither_cpu;
    use crate::quantize::{quantize_channel, quantize_luminance};
    use crate::{AlgorithmId, DitherOptions, ImageBuffer, Palette, BUILTIN_PALETTES};

    /// Deterministic test card: colour ramps with a varying alpha channel.
    fn test_card(width: u32, height: u32) -> ImageBuffer {
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&[
                    ((x * 255) / width.max(1)) as u8,
                    ((y * 255) / height.max(1)) as u8,
                    ((x * 7 + y * 13) % 256) as u8,
                    ((x * 31 + y * 17) % 256) as u8,
                ]);
            }
        }
        ImageBuffer::new(width, height, pixels).unwrap()
    }

    fn builtin(id: &str) -> Palette {
        BUILTIN_PALETTES
            .iter()
            .find(|p| p.id == id)
            .unwrap()
            .palette()
    }

    const SIZES: [(u32, u32); 6] = [(1, 1), (1, 7), (7, 1), (5, 3), (13, 9), (16, 16)];

    // ========================================================================
    // GAP 1: Shape and alpha are preserved by every algorithm
    // ========================================================================

    /// If this breaks, it means: an algorithm writes outside its buffer,
    /// resizes it, or touches the alpha byte (e.g. a 4-channel loop where a
    /// 3-channel loop was intended).
    #[test]
    fn test_shape_and_alpha_preserved() {
        for algorithm in AlgorithmId::ALL {
            for (w, h) in SIZES {
                let image = test_card(w, h);
                let options = DitherOptions::new().algorithm(algorithm);
                let out = dither_cpu(&image, &options, None).unwrap();
                assert_eq!((out.width, out.height), (w, h), "{algorithm} {w}x{h}");
                assert_eq!(out.pixels.len(), image.pixels.len(), "{algorithm} {w}x{h}");
                for (i, (a, b)) in image
                    .pixels
                    .chunks_exact(4)
                    .zip(out.pixels.chunks_exact(4))
                    .enumerate()
                {
                    assert_eq!(a[3], b[3], "{algorithm} {w}x{h} alpha at pixel {i}");
                }
            }
        }
    }

    // ========================================================================
    // GAP 2: Determinism
    // ========================================================================

    /// If this breaks, it means: hidden state (a shared RNG, a static error
    /// buffer) leaks between calls of a deterministic algorithm.
    #[test]
    fn test_deterministic_algorithms_repeat() {
        let image = test_card(17, 11);
        let palette = builtin("cga");
        for algorithm in AlgorithmId::ALL.into_iter().filter(|a| a.is_deterministic()) {
            let options = DitherOptions::new().algorithm(algorithm).contrast(65);
            let a = dither_cpu(&image, &options, Some(&palette)).unwrap();
            let b = dither_cpu(&image, &options, Some(&palette)).unwrap();
            assert_eq!(a, b, "{algorithm}");
        }
    }

    // ========================================================================
    // GAP 3: Palette membership
    // ========================================================================

    /// If this breaks, it means: some path writes an unquantized value, for
    /// instance diffused error landing on an already-quantized pixel.
    #[test]
    fn test_every_output_pixel_is_a_palette_entry() {
        let image = test_card(23, 19);
        for builtin in BUILTIN_PALETTES {
            let palette = builtin.palette();
            for algorithm in AlgorithmId::ALL {
                let options = DitherOptions::new().algorithm(algorithm);
                let out = dither_cpu(&image, &options, Some(&palette)).unwrap();
                for px in out.pixels.chunks_exact(4) {
                    assert!(
                        palette.contains([px[0], px[1], px[2]]),
                        "{algorithm} with {} produced {:?}",
                        builtin.id,
                        &px[..3]
                    );
                }
            }
        }
    }

    /// If this breaks, it means: an image already made of palette colours
    /// picks up error it should not have (zero error must diffuse nothing).
    #[test]
    fn test_palette_image_is_a_fixed_point_of_error_diffusion() {
        let palette = builtin("commodore64");
        let colors = palette.colors();
        let mut pixels = Vec::new();
        for i in 0..64 {
            let c = colors[(i * 5) % colors.len()];
            pixels.extend_from_slice(&[c[0], c[1], c[2], 255]);
        }
        let image = ImageBuffer::new(8, 8, pixels).unwrap();
        for algorithm in AlgorithmId::ALL
            .into_iter()
            .filter(|a| a.category() == Category::ErrorDiffusion)
        {
            let options = DitherOptions::new().algorithm(algorithm);
            let out = dither_cpu(&image, &options, Some(&palette)).unwrap();
            assert_eq!(out, image, "{algorithm}");
        }
    }

    // ========================================================================
    // GAP 4: Boundaries
    // ========================================================================

    /// If this breaks, it means: a kernel entry that falls outside a 1x1
    /// image is written anyway (panic) or alters the single pixel.
    #[test]
    fn test_single_pixel_every_kernel() {
        for algorithm in AlgorithmId::ALL {
            let Some(kernel) = algorithm.kernel() else {
                continue;
            };
            for rgb in [[0u8, 0, 0], [127, 127, 127], [128, 128, 128], [250, 10, 90]] {
                let mut image = ImageBuffer::filled(1, 1, [rgb[0], rgb[1], rgb[2], 77]);
                diffuse(&mut image, kernel, None);
                let expected = quantize_luminance(rgb[0] as f32, rgb[1] as f32, rgb[2] as f32, None);
                assert_eq!(image.pixels, [expected[0], expected[1], expected[2], 77], "{algorithm}");
            }
        }
    }

    // ========================================================================
    // GAP 5: Worked examples
    // ========================================================================

    /// If this breaks, it means: the Floyd-Steinberg right-hand weight, the
    /// nearest-colour metric, or the error sign changed.
    #[test]
    fn test_floyd_steinberg_grey_pair_monochrome() {
        let image = ImageBuffer::filled(2, 1, [100, 100, 100, 255]);
        let options = DitherOptions::new()
            .algorithm(AlgorithmId::FloydSteinberg)
            .palette("monochrome");
        let out = dither_cpu(&image, &options, Some(&builtin("monochrome"))).unwrap();
        assert_eq!(out.pixels, vec![0, 0, 0, 255, 255, 255, 255, 255]);
    }

    /// If this breaks, it means: the Bayer offset is missing, constant, or
    /// larger than half the matrix range.
    ///
    /// The offset spans `[-127.5, 127.5)`, so each output channel must lie
    /// between the step levels of `v - 127.5` and `v + 127.5`, and a uniform
    /// input must not stay uniform.
    #[test]
    fn test_ordered_uniform_input_varies_within_offset_range() {
        for algorithm in [
            AlgorithmId::Ordered2x2,
            AlgorithmId::Ordered4x4,
            AlgorithmId::Ordered8x8,
        ] {
            for v in [40u8, 100, 128, 200] {
                let image = ImageBuffer::filled(16, 16, [v, v, v, 255]);
                let options = DitherOptions::new().algorithm(algorithm);
                let out = dither_cpu(&image, &options, None).unwrap();

                let lo = quantize_channel(v as f32 - 127.5);
                let hi = quantize_channel(v as f32 + 127.5);
                for px in out.pixels.chunks_exact(4) {
                    assert!(
                        (lo..=hi).contains(&px[0]),
                        "{algorithm} {v}: {} outside {lo}..={hi}",
                        px[0]
                    );
                }
                let first = out.pixels[0];
                assert!(
                    out.pixels.chunks_exact(4).any(|px| px[0] != first),
                    "{algorithm} {v}: output is uniform"
                );
            }
        }
    }

    /// If this breaks, it means: the ordered offsets are biased, so flat
    /// areas shift brightness. Over a full tile the mean output of a grey
    /// lands within half a step of the input.
    #[test]
    fn test_ordered_tile_mean_tracks_input() {
        for size in [BayerSize::Two, BayerSize::Four, BayerSize::Eight] {
            let algorithm = match size {
                BayerSize::Two => AlgorithmId::Ordered2x2,
                BayerSize::Four => AlgorithmId::Ordered4x4,
                BayerSize::Eight => AlgorithmId::Ordered8x8,
            };
            let n = size.dim() as u32;
            for v in [60u8, 128, 190] {
                let image = ImageBuffer::filled(n, n, [v, v, v, 255]);
                let options = DitherOptions::new().algorithm(algorithm);
                let out = dither_cpu(&image, &options, None).unwrap();
                let mean = out.pixels.chunks_exact(4).map(|px| px[0] as f32).sum::<f32>()
                    / (n * n) as f32;
                assert!(
                    (mean - v as f32).abs() <= 42.5,
                    "{algorithm} {v}: tile mean {mean}"
                );
            }
        }
    }

    // ========================================================================
    // GAP 6: Quantizer divergence without a palette
    // ========================================================================

    /// If this breaks, it means: the two no-palette quantizers were merged.
    /// Error diffusion must stay binary; ordered dithering keeps 4 levels.
    #[test]
    fn test_no_palette_output_levels_by_family() {
        let image = test_card(32, 32);
        for algorithm in AlgorithmId::ALL {
            let options = DitherOptions::new().algorithm(algorithm);
            let out = dither_cpu(&image, &options, None).unwrap();
            for px in out.pixels.chunks_exact(4) {
                let rgb = &px[..3];
                match algorithm.category() {
                    Category::ErrorDiffusion => {
                        assert!(rgb == [0, 0, 0] || rgb == [255, 255, 255], "{algorithm}")
                    }
                    Category::Ordered => {
                        assert!(rgb.iter().all(|c| c % 85 == 0), "{algorithm}")
                    }
                    Category::Pattern if algorithm == AlgorithmId::Random => {
                        assert!(rgb.iter().all(|c| c % 85 == 0), "{algorithm}")
                    }
                    Category::Pattern => {
                        assert!(rgb == [0, 0, 0] || rgb == [255, 255, 255], "{algorithm}")
                    }
                }
            }
        }
    }

    // ========================================================================
    // GAP 7: Adjustments reach the ditherer
    // ========================================================================

    /// If this breaks, it means: options are ignored between the adjust
    /// stage and the ditherer. Maximum contrast pushes a light grey to
    /// white, so Atkinson on monochrome must produce no black at all.
    #[test]
    fn test_contrast_feeds_dithering() {
        let image = ImageBuffer::filled(8, 8, [180, 180, 180, 255]);
        let plain = DitherOptions::new().algorithm(AlgorithmId::Atkinson);
        let punchy = plain.clone().contrast(100);

        let a = dither_cpu(&image, &plain, None).unwrap();
        let b = dither_cpu(&image, &punchy, None).unwrap();

        assert!(a.pixels.chunks_exact(4).any(|px| px[0] == 0));
        assert!(b.pixels.chunks_exact(4).all(|px| px[0] == 255));
    }
}
