//! Messages exchanged with the background dithering worker.

use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};

use ditherkit_core::{pipeline, DitherOptions, ImageBuffer, Palette, Rgb};
use serde::{Deserialize, Serialize};

/// Correlates a response with its request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(pub u64);

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Monotonic id source, starting at 1.
#[derive(Debug, Default)]
pub struct RequestIdGenerator {
    last: AtomicU64,
}

impl RequestIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&self) -> RequestId {
        RequestId(self.last.fetch_add(1, Ordering::Relaxed) + 1)
    }
}

/// Options as sent to the worker: the dither options plus the resolved
/// palette, side by side in one object.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerOptions {
    #[serde(flatten)]
    pub dither: DitherOptions,
    /// `None` dithers without a palette.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub palette_colors: Option<Vec<Rgb>>,
}

/// `{ id, imageData, options }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerRequest {
    pub id: RequestId,
    pub image_data: ImageBuffer,
    pub options: WorkerOptions,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorInfo {
    pub message: String,
}

impl ErrorInfo {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// `{ id, imageData }` on success, `{ id, error }` on failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WorkerResponse {
    #[serde(rename_all = "camelCase")]
    Success { id: RequestId, image_data: ImageBuffer },
    Failure { id: RequestId, error: ErrorInfo },
}

impl WorkerResponse {
    pub fn new(id: RequestId, result: Result<ImageBuffer, ErrorInfo>) -> Self {
        match result {
            Ok(image_data) => Self::Success { id, image_data },
            Err(error) => Self::Failure { id, error },
        }
    }

    pub fn id(&self) -> RequestId {
        match self {
            Self::Success { id, .. } | Self::Failure { id, .. } => *id,
        }
    }

    pub fn into_result(self) -> Result<ImageBuffer, ErrorInfo> {
        match self {
            Self::Success { image_data, .. } => Ok(image_data),
            Self::Failure { error, .. } => Err(error),
        }
    }
}

/// Handle one request on the current thread.
///
/// Invalid input and panics inside the ditherer come back as an error
/// response carrying the request id.
pub fn process(request: WorkerRequest) -> WorkerResponse {
    let WorkerRequest {
        id,
        image_data,
        options,
    } = request;

    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        let palette = options
            .palette_colors
            .map(Palette::new)
            .transpose()
            .map_err(|e| ErrorInfo::new(e.to_string()))?;
        pipeline::dither_cpu(&image_data, &options.dither, palette.as_ref())
            .map_err(|e| ErrorInfo::new(e.to_string()))
    }))
    .unwrap_or_else(|payload| Err(ErrorInfo::new(panic_message(payload.as_ref()))));

    WorkerResponse::new(id, result)
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    let detail = payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string());
    format!("worker panicked: {detail}")
}
