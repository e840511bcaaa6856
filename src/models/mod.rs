pub mod config;

pub use config::{EngineConfig, GpuConfig, PaletteConfig, WorkerConfig, CONFIG_ENV};
