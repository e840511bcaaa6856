use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use ditherkit_core::{DitherOptions, ImageBuffer, Rgb};
use tokio::sync::{mpsc, oneshot};

use super::worker_protocol::{process, RequestIdGenerator, WorkerOptions, WorkerRequest, WorkerResponse};
use crate::error::EngineError;

type Job = (WorkerRequest, oneshot::Sender<WorkerResponse>);

/// Dithers off the caller's thread.
///
/// Requests go to a dedicated OS thread that handles them one at a time and
/// answers each on the oneshot channel that travelled with it. Nothing runs
/// on the caller's runtime, so a worker outlives the runtime it was spawned
/// from and can be awaited from any executor.
pub struct DitherWorker {
    jobs: Mutex<Option<mpsc::UnboundedSender<Job>>>,
    in_flight: AtomicUsize,
    ids: RequestIdGenerator,
}

/// Counts a request as in flight until dropped.
struct InFlight<'a>(&'a AtomicUsize);

impl<'a> InFlight<'a> {
    fn enter(count: &'a AtomicUsize) -> Self {
        count.fetch_add(1, Ordering::SeqCst);
        Self(count)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl DitherWorker {
    /// Start the worker thread.
    pub fn spawn() -> Result<Self, EngineError> {
        let (job_tx, mut job_rx) = mpsc::unbounded_channel::<Job>();

        std::thread::Builder::new()
            .name("ditherkit-worker".to_string())
            .spawn(move || {
                while let Some((request, reply)) = job_rx.blocking_recv() {
                    let id = request.id;
                    tracing::debug!(%id, "Worker processing request");
                    if reply.send(process(request)).is_err() {
                        tracing::debug!(%id, "Caller stopped waiting for response");
                    }
                }
                tracing::debug!("Worker thread exiting");
            })
            .map_err(|e| {
                tracing::warn!(error = %e, "Could not start worker thread");
                EngineError::WorkerUnavailable
            })?;

        tracing::info!("Background worker started");
        Ok(Self {
            jobs: Mutex::new(Some(job_tx)),
            in_flight: AtomicUsize::new(0),
            ids: RequestIdGenerator::new(),
        })
    }

    /// Dither `image` on the worker and wait for the result.
    ///
    /// Fails with [`EngineError::WorkerUnavailable`] if the worker has shut
    /// down, and with [`EngineError::Worker`] if it reported an error.
    pub async fn dither(
        &self,
        image: ImageBuffer,
        options: DitherOptions,
        palette_colors: Option<Vec<Rgb>>,
    ) -> Result<ImageBuffer, EngineError> {
        let sender = self
            .jobs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(EngineError::WorkerUnavailable)?;

        let id = self.ids.next_id();
        let request = WorkerRequest {
            id,
            image_data: image,
            options: WorkerOptions {
                dither: options,
                palette_colors,
            },
        };
        let _in_flight = InFlight::enter(&self.in_flight);
        let (reply_tx, reply_rx) = oneshot::channel();
        sender
            .send((request, reply_tx))
            .map_err(|_| EngineError::WorkerUnavailable)?;

        // A dropped reply means the worker thread died.
        let response = reply_rx.await.map_err(|_| EngineError::WorkerUnavailable)?;
        if response.id() != id {
            return Err(EngineError::Worker(format!(
                "response {} does not answer request {id}",
                response.id()
            )));
        }
        response
            .into_result()
            .map_err(|info| EngineError::Worker(info.message))
    }

    pub fn is_running(&self) -> bool {
        self.jobs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|tx| !tx.is_closed())
    }

    /// Stop accepting requests. Requests already queued still complete.
    pub fn shutdown(&self) {
        if self
            .jobs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .is_some()
        {
            tracing::info!("Background worker shutting down");
        }
    }

    /// Number of requests waiting for a response.
    pub fn pending_requests(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }
}
