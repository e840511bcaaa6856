pub mod gpu;
pub mod png_io;

pub use gpu::{GpuBackend, GpuContext, GpuLimits, SoftwareContext};
pub use png_io::{decode_png, encode_png};
