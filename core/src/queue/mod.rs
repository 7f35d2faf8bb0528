//! Single-worker render queue
//!
//! The raster/vector backends must never be driven from two threads at once,
//! so every job goes through one blocking consumer. Many producers may submit
//! concurrently; the worker renders jobs strictly one after another and is
//! the only place progress is counted.

mod batch;

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::export::OutputFormat;
use crate::matrix::MatrixSource;
use crate::pipeline::Renderer;
use crate::request::RenderRequest;
use crate::{Error, Result};

pub use batch::{BatchPolicy, BatchReport, JobOutcome};

/// Shared cancellation flag. Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// One request, its output format and where to write it
#[derive(Debug, Clone)]
pub struct RenderJob {
    pub id: Uuid,
    pub request: RenderRequest,
    pub format: OutputFormat,
    pub destination: PathBuf,
}

impl RenderJob {
    pub fn new(request: RenderRequest, format: OutputFormat, destination: PathBuf) -> Self {
        Self {
            id: Uuid::new_v4(),
            request,
            format,
            destination,
        }
    }
}

/// Events emitted by the render worker
#[derive(Debug, Clone, PartialEq)]
pub enum QueueEvent {
    Started { job_id: Uuid },
    Finished { job_id: Uuid, path: PathBuf },
    Failed { job_id: Uuid, error: String },
    /// Job was cancelled before rendering began
    Cancelled { job_id: Uuid },
    /// Emitted after every job, whatever its outcome
    Progress { completed: usize, submitted: usize },
}

struct Envelope {
    job: RenderJob,
    cancel: CancelToken,
    abort_on_error: bool,
    reply: oneshot::Sender<Result<PathBuf>>,
}

/// Pending result of a submitted job
pub struct JobHandle {
    pub id: Uuid,
    cancel: CancelToken,
    reply: oneshot::Receiver<Result<PathBuf>>,
}

impl JobHandle {
    /// Skip the job if it has not started yet. A job already rendering runs
    /// to completion.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub async fn wait(self) -> Result<PathBuf> {
        self.reply
            .await
            .map_err(|_| Error::Queue("render worker stopped before replying".to_string()))?
    }
}

/// Handle to the render worker
pub struct RenderQueue {
    tx: mpsc::Sender<Envelope>,
    submitted: Arc<AtomicUsize>,
    worker: JoinHandle<()>,
}

impl RenderQueue {
    /// Spawn the worker and return the queue with its event channel.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start<S>(renderer: Renderer<S>, capacity: usize) -> (Self, mpsc::UnboundedReceiver<QueueEvent>)
    where
        S: MatrixSource + Send + 'static,
    {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let submitted = Arc::new(AtomicUsize::new(0));

        let worker_submitted = submitted.clone();
        let worker = tokio::task::spawn_blocking(move || {
            run_worker(renderer, rx, events_tx, worker_submitted);
        });

        tracing::info!("render queue started");
        (Self { tx, submitted, worker }, events_rx)
    }

    /// Queue `job` with its own cancel token
    pub async fn submit(&self, job: RenderJob) -> Result<JobHandle> {
        self.submit_with(job, CancelToken::new(), false).await
    }

    /// Queue `job` under `cancel`. With `abort_on_error`, a failure of this
    /// job cancels `cancel`, and so every job sharing it that has not started.
    pub async fn submit_with(&self, job: RenderJob, cancel: CancelToken, abort_on_error: bool) -> Result<JobHandle> {
        let (reply_tx, reply_rx) = oneshot::channel();
        let id = job.id;

        self.submitted.fetch_add(1, Ordering::SeqCst);
        let envelope = Envelope {
            job,
            cancel: cancel.clone(),
            abort_on_error,
            reply: reply_tx,
        };
        if self.tx.send(envelope).await.is_err() {
            self.submitted.fetch_sub(1, Ordering::SeqCst);
            return Err(Error::Queue("render worker is not running".to_string()));
        }

        Ok(JobHandle {
            id,
            cancel,
            reply: reply_rx,
        })
    }

    /// Submit `jobs` in order and wait for all of them.
    ///
    /// Every job gets an outcome. Cancelling `cancel` skips the jobs that
    /// have not started yet.
    pub async fn run_batch(&self, jobs: Vec<RenderJob>, policy: BatchPolicy, cancel: CancelToken) -> Result<BatchReport> {
        let abort_on_error = policy == BatchPolicy::AbortOnFirstError;
        let mut pending = Vec::with_capacity(jobs.len());

        for job in jobs {
            let destination = job.destination.clone();
            let handle = self.submit_with(job, cancel.clone(), abort_on_error).await?;
            pending.push((handle, destination));
        }

        let mut outcomes = Vec::with_capacity(pending.len());
        for (handle, destination) in pending {
            let job_id = handle.id;
            outcomes.push(JobOutcome {
                job_id,
                destination,
                result: handle.wait().await,
            });
        }

        Ok(BatchReport::new(outcomes))
    }

    /// Stop accepting jobs and wait for the queued ones to finish
    pub async fn shutdown(self) -> Result<()> {
        drop(self.tx);
        self.worker
            .await
            .map_err(|e| Error::Queue(format!("render worker panicked: {}", e)))
    }
}

fn run_worker<S: MatrixSource>(
    renderer: Renderer<S>,
    mut rx: mpsc::Receiver<Envelope>,
    events: mpsc::UnboundedSender<QueueEvent>,
    submitted: Arc<AtomicUsize>,
) {
    let mut completed = 0usize;

    while let Some(Envelope { job, cancel, abort_on_error, reply }) = rx.blocking_recv() {
        let job_id = job.id;

        let result = if cancel.is_cancelled() {
            tracing::warn!("job {} cancelled before start", job_id);
            let _ = events.send(QueueEvent::Cancelled { job_id });
            Err(Error::Cancelled)
        } else {
            let _ = events.send(QueueEvent::Started { job_id });
            match renderer.render_to_file(&job.request, job.format, &job.destination) {
                Ok(()) => {
                    let _ = events.send(QueueEvent::Finished {
                        job_id,
                        path: job.destination.clone(),
                    });
                    Ok(job.destination)
                }
                Err(e) => {
                    tracing::warn!("job {} failed: {}", job_id, e);
                    let _ = events.send(QueueEvent::Failed {
                        job_id,
                        error: e.to_string(),
                    });
                    if abort_on_error {
                        cancel.cancel();
                    }
                    Err(e)
                }
            }
        };

        completed += 1;
        let _ = events.send(QueueEvent::Progress {
            completed,
            submitted: submitted.load(Ordering::SeqCst),
        });
        // Caller may have dropped its handle
        let _ = reply.send(result);
    }

    tracing::info!("render queue drained after {} jobs", completed);
}
