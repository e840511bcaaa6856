use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ditherkit::models::EngineConfig;
use ditherkit::rendering::{decode_png, encode_png};
use ditherkit::{AlgorithmId, DitherEngine, DitherOptions};

#[derive(Parser)]
#[command(name = "ditherkit")]
#[command(about = "Dither PNG images to retro palettes")]
struct Cli {
    /// YAML config file (defaults to $DITHERKIT_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Dither a PNG file
    Dither {
        /// Input PNG file path
        #[arg(short, long)]
        input: PathBuf,

        /// Output PNG file path
        #[arg(short, long)]
        output: PathBuf,

        /// Algorithm id (see `ditherkit algorithms`)
        #[arg(short, long, default_value = "floyd-steinberg")]
        algorithm: String,

        /// Palette id (see `ditherkit palettes`)
        #[arg(short, long)]
        palette: Option<String>,

        /// Contrast, 0-100 (50 is neutral)
        #[arg(long, default_value_t = 50, value_parser = clap::value_parser!(u8).range(0..=100))]
        contrast: u8,

        /// Midtone lift, 0-100 (50 is neutral)
        #[arg(long, default_value_t = 50, value_parser = clap::value_parser!(u8).range(0..=100))]
        midtones: u8,

        /// Highlight lift, 0-100 (50 is neutral)
        #[arg(long, default_value_t = 50, value_parser = clap::value_parser!(u8).range(0..=100))]
        highlights: u8,

        /// Box blur radius in pixels
        #[arg(long, default_value_t = 0)]
        blur: u32,

        /// Noise amplitude for the random ditherer
        #[arg(long)]
        threshold: Option<u8>,

        /// Skip the shader backend
        #[arg(long)]
        no_gpu: bool,

        /// Run through the background worker
        #[arg(long = "async")]
        run_async: bool,
    },
    /// List available algorithms
    Algorithms {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// List registered palettes
    Palettes {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the colours of one palette
    Palette {
        /// Palette id
        id: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ditherkit=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let config = EngineConfig::load(cli.config.as_deref());

    match cli.command {
        Commands::Dither {
            input,
            output,
            algorithm,
            palette,
            contrast,
            midtones,
            highlights,
            blur,
            threshold,
            no_gpu,
            run_async,
        } => {
            let mut config = config;
            if no_gpu {
                config.gpu.enabled = false;
            }
            if !run_async {
                config.worker.enabled = false;
            }
            let engine = DitherEngine::from_config(&config);

            let algorithm_id = AlgorithmId::parse(&algorithm).unwrap_or_else(|| {
                tracing::warn!(%algorithm, "Unknown algorithm, using floyd-steinberg");
                AlgorithmId::default()
            });
            let mut options = DitherOptions::new()
                .algorithm(algorithm_id)
                .contrast(contrast)
                .midtones(midtones)
                .highlights(highlights)
                .blur(blur);
            if let Some(palette) = palette {
                options = options.palette(palette);
            }
            if let Some(threshold) = threshold {
                options = options.threshold(threshold);
            }

            run_dither_command(&engine, &input, &output, options, run_async).await
        }
        Commands::Algorithms { json } => {
            let engine = DitherEngine::new();
            let algorithms = engine.list_algorithms();
            if json {
                println!("{}", serde_json::to_string_pretty(&algorithms)?);
            } else {
                for info in algorithms {
                    println!("{:<22} {:<20} {}", info.id.as_str(), info.name, info.category);
                }
            }
            Ok(())
        }
        Commands::Palettes { json } => {
            let engine = engine_for_listing(&config);
            let palettes = engine.list_palettes();
            if json {
                println!("{}", serde_json::to_string_pretty(&palettes)?);
            } else {
                for info in palettes {
                    let colors = engine.palette_colors(&info.id).unwrap_or_default();
                    println!("{:<14} {:<16} {} colors", info.id, info.name, colors.len());
                }
            }
            Ok(())
        }
        Commands::Palette { id } => {
            let engine = engine_for_listing(&config);
            let colors = engine
                .palette_colors(&id)
                .with_context(|| format!("Unknown palette: {id}"))?;
            for color in colors {
                println!("{color}");
            }
            Ok(())
        }
    }
}

/// Dither one PNG file to another
async fn run_dither_command(
    engine: &DitherEngine,
    input: &Path,
    output: &Path,
    options: DitherOptions,
    run_async: bool,
) -> anyhow::Result<()> {
    let data = std::fs::read(input).with_context(|| format!("Failed to read {}", input.display()))?;
    let image = decode_png(&data).with_context(|| format!("Failed to decode {}", input.display()))?;
    tracing::info!(
        width = image.width,
        height = image.height,
        algorithm = %options.algorithm,
        palette = options.palette.as_deref().unwrap_or("none"),
        "Dithering image"
    );

    let dithered = if run_async {
        engine.apply_dithering_async(image, options).await?
    } else {
        engine.apply_dithering(&image, &options)?
    };

    let png_bytes = encode_png(&dithered)?;
    std::fs::write(output, &png_bytes)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    println!("Dithered {} ({} bytes)", output.display(), png_bytes.len());
    Ok(())
}

/// Engine with config palettes registered but no backends started.
fn engine_for_listing(config: &EngineConfig) -> DitherEngine {
    let mut config = config.clone();
    config.gpu.enabled = false;
    config.worker.enabled = false;
    DitherEngine::from_config(&config)
}
