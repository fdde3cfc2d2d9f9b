//! Bounded callback queue drained by a fixed set of worker tasks.
//!
//! A `watch` channel carries the shutdown signal. Idle workers exit on it and
//! in-flight jobs are dropped at their next await point. Dropping the
//! dispatcher without calling [`CallbackDispatcher::shutdown`] only closes the
//! queue: workers finish every job already accepted, then exit.

use std::sync::{Arc, Mutex as StdMutex};

use futures::future::join_all;
use tokio::sync::{Mutex, mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::deliver::CallbackClient;
use super::handler::handle_job;
use super::summarize::AnalysisPipeline;
use crate::core::models::CallbackJob;
use crate::errors::BotError;

type SharedReceiver = Arc<Mutex<mpsc::Receiver<CallbackJob>>>;

pub struct CallbackDispatcher {
    tx: mpsc::Sender<CallbackJob>,
    shutdown: watch::Sender<bool>,
    rx: SharedReceiver,
    workers: StdMutex<Vec<JoinHandle<()>>>,
}

impl CallbackDispatcher {
    /// Spawn `workers` tasks sharing a queue of `capacity` pending jobs.
    ///
    /// Must be called inside a tokio runtime. `capacity` is clamped to 1. With
    /// zero workers jobs are accepted until the queue fills and never run.
    pub fn start(
        pipeline: Arc<AnalysisPipeline>,
        client: Arc<dyn CallbackClient>,
        capacity: usize,
        workers: usize,
    ) -> Self {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let (shutdown, shutdown_rx) = watch::channel(false);
        let rx: SharedReceiver = Arc::new(Mutex::new(rx));

        let handles = (0..workers)
            .map(|worker_id| {
                tokio::spawn(run_worker(
                    worker_id,
                    Arc::clone(&rx),
                    shutdown_rx.clone(),
                    Arc::clone(&pipeline),
                    Arc::clone(&client),
                ))
            })
            .collect();

        info!(capacity, workers, "Callback dispatcher started");
        Self {
            tx,
            shutdown,
            rx,
            workers: StdMutex::new(handles),
        }
    }

    /// Queue a job without waiting.
    ///
    /// # Errors
    ///
    /// Returns [`BotError::QueueFull`] when the queue is at capacity and
    /// [`BotError::QueueClosed`] after shutdown.
    pub fn submit(&self, job: CallbackJob) -> Result<(), BotError> {
        if *self.shutdown.borrow() {
            return Err(BotError::QueueClosed);
        }
        self.tx.try_send(job).map_err(|e| match e {
            mpsc::error::TrySendError::Full(job) => {
                warn!(correlation_id = %job.correlation_id, "Callback queue full");
                BotError::QueueFull
            }
            mpsc::error::TrySendError::Closed(_) => BotError::QueueClosed,
        })
    }

    /// Signal every worker to stop and wait for them to exit.
    ///
    /// Jobs still waiting in the queue are discarded and logged.
    pub async fn shutdown(&self) {
        let _ = self.shutdown.send(true);
        let handles = match self.workers.lock() {
            Ok(mut guard) => std::mem::take(&mut *guard),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        };
        let count = handles.len();
        join_all(handles).await;

        let mut rx = self.rx.lock().await;
        rx.close();
        let mut dropped = 0usize;
        while let Ok(job) = rx.try_recv() {
            dropped += 1;
            warn!(
                correlation_id = %job.correlation_id,
                callback_url = %job.callback.callback_url,
                "Queued callback job dropped at shutdown"
            );
        }
        info!(workers = count, dropped, "Callback dispatcher stopped");
    }
}

/// Resolves once shutdown was requested. A dropped sender is not a request.
async fn stop_requested(shutdown: &mut watch::Receiver<bool>) {
    let requested = shutdown.wait_for(|stop| *stop).await.is_ok();
    if !requested {
        std::future::pending::<()>().await;
    }
}

async fn run_worker(
    worker_id: usize,
    rx: SharedReceiver,
    mut shutdown: watch::Receiver<bool>,
    pipeline: Arc<AnalysisPipeline>,
    client: Arc<dyn CallbackClient>,
) {
    debug!(worker_id, "Callback worker started");
    loop {
        if *shutdown.borrow() {
            break;
        }

        let job = tokio::select! {
            () = stop_requested(&mut shutdown) => break,
            job = async { rx.lock().await.recv().await } => job,
        };
        let Some(job) = job else {
            break;
        };

        tokio::select! {
            () = stop_requested(&mut shutdown) => {
                warn!(
                    worker_id,
                    correlation_id = %job.correlation_id,
                    "Callback job cancelled by shutdown"
                );
                break;
            }
            () = handle_job(&pipeline, client.as_ref(), &job) => {}
        }
    }
    debug!(worker_id, "Callback worker stopped");
}
