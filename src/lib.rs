//! Ditherkit - palette-constrained image dithering
//!
//! Wraps the algorithms of `ditherkit-core` in an engine that owns the
//! palette registry, an optional shader backend and an optional background
//! worker. This library is also what the integration tests drive.

pub mod error;
pub mod models;
pub mod rendering;
pub mod services;

pub use ditherkit_core::{AlgorithmId, DitherOptions, ImageBuffer, Palette};
pub use error::{ConfigError, EngineError, GpuError, ImageIoError};
pub use models::EngineConfig;
pub use services::{DitherEngine, DitherWorker, PaletteRegistry};
