pub mod engine;
pub mod palette_registry;
pub mod worker;
pub mod worker_protocol;

pub use engine::DitherEngine;
pub use palette_registry::{PaletteInfo, PaletteRegistry, PaletteSet};
pub use worker::DitherWorker;
pub use worker_protocol::{
    ErrorInfo, RequestId, RequestIdGenerator, WorkerOptions, WorkerRequest, WorkerResponse,
};
