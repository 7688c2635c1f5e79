//! Worker pool: runs one task per document with bounded concurrency.
//!
//! A feeder thread pushes documents into a bounded channel, `num_workers` threads pull from
//! it and push outcomes back. The calling thread drains outcomes in completion order and is
//! the only place results are observed, so sinks fed from `on_outcome` need no locking.

use crossbeam_channel::{Receiver, Sender};
use log::debug;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::thread;

use crate::error::{DwkitError, Result};
use crate::pipeline::context::{CancelToken, PipelineTuning, PoolChannels, create_pool_channels};
use crate::types::DocumentPath;

/// Result of one task. Every document handed to a worker yields exactly one outcome.
#[derive(Debug)]
pub enum TaskOutcome<T> {
    Completed { document: DocumentPath, output: T },
    Failed { document: DocumentPath, error: DwkitError },
}

/// Counts for one [`WorkerPool::run`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PoolReport {
    /// Documents a worker started. Less than the batch size only after cancellation.
    pub submitted: usize,
    pub completed: usize,
    pub failed: usize,
}

pub struct WorkerPool {
    tuning: PipelineTuning,
}

impl WorkerPool {
    pub fn new(tuning: PipelineTuning) -> Self {
        Self { tuning }
    }

    /// Pool with `n` workers; 0 means every available core.
    pub fn with_workers(n: usize) -> Self {
        Self::new(PipelineTuning::resolve(Some(n)))
    }

    pub fn num_workers(&self) -> usize {
        self.tuning.num_workers
    }

    /// Run `task` over `documents` and hand each outcome to `on_outcome` as it completes.
    ///
    /// A failing or panicking task only fails its own document. When `cancel` is set the
    /// feeder stops submitting and workers discard queued documents without running them;
    /// tasks already running still finish. Returns after every worker has exited.
    pub fn run<T, F, C>(
        &self,
        documents: &[DocumentPath],
        cancel: &CancelToken,
        task: F,
        mut on_outcome: C,
    ) -> PoolReport
    where
        T: Send,
        F: Fn(&DocumentPath) -> Result<T> + Sync,
        C: FnMut(TaskOutcome<T>),
    {
        let mut report = PoolReport::default();
        if documents.is_empty() {
            return report;
        }
        let PoolChannels {
            task_tx,
            task_rx,
            outcome_tx,
            outcome_rx,
        } = create_pool_channels::<&DocumentPath, TaskOutcome<T>>(&self.tuning);
        let workers = self.tuning.num_workers.clamp(1, documents.len());
        debug!("Pool: {} documents on {} worker(s)", documents.len(), workers);
        let task = &task;

        thread::scope(|s| {
            let feeder = s.spawn(move || feed(documents, task_tx, cancel));
            let handles: Vec<_> = (0..workers)
                .map(|_| {
                    let task_rx = task_rx.clone();
                    let outcome_tx = outcome_tx.clone();
                    s.spawn(move || worker_loop(task_rx, outcome_tx, task, cancel))
                })
                .collect();
            // Workers hold the only remaining ends; the drain below ends when they all exit.
            drop(task_rx);
            drop(outcome_tx);

            for outcome in outcome_rx.iter() {
                match outcome {
                    TaskOutcome::Completed { .. } => report.completed += 1,
                    TaskOutcome::Failed { .. } => report.failed += 1,
                }
                on_outcome(outcome);
            }
            let discarded: usize = handles.into_iter().filter_map(|h| h.join().ok()).sum();
            if discarded > 0 {
                debug!("Pool: cancelled, {} queued document(s) discarded", discarded);
            }
            report.submitted = feeder
                .join()
                .map(|sent| sent.saturating_sub(discarded))
                .unwrap_or(report.completed + report.failed);
        });
        report
    }
}

/// Push documents until done or cancelled. Returns how many were sent.
fn feed<'a>(documents: &'a [DocumentPath], task_tx: Sender<&'a DocumentPath>, cancel: &CancelToken) -> usize {
    let mut sent = 0_usize;
    for document in documents {
        if cancel.is_cancelled() {
            debug!(
                "Pool: cancelled, {} document(s) not submitted",
                documents.len() - sent
            );
            break;
        }
        if task_tx.send(document).is_err() {
            break;
        }
        sent += 1;
    }
    sent
}

/// Run tasks until the channel closes. Returns how many queued documents were discarded
/// because `cancel` was set before they started.
fn worker_loop<T, F>(
    task_rx: Receiver<&DocumentPath>,
    outcome_tx: Sender<TaskOutcome<T>>,
    task: &F,
    cancel: &CancelToken,
) -> usize
where
    F: Fn(&DocumentPath) -> Result<T>,
{
    let mut discarded = 0_usize;
    while let Ok(document) = task_rx.recv() {
        if cancel.is_cancelled() {
            discarded += 1;
            continue;
        }
        let outcome = match panic::catch_unwind(AssertUnwindSafe(|| task(document))) {
            Ok(Ok(output)) => TaskOutcome::Completed {
                document: document.clone(),
                output,
            },
            Ok(Err(error)) => TaskOutcome::Failed {
                document: document.clone(),
                error,
            },
            Err(payload) => TaskOutcome::Failed {
                document: document.clone(),
                error: DwkitError::TaskPanicked(panic_message(payload.as_ref())),
            },
        };
        if outcome_tx.send(outcome).is_err() {
            break;
        }
    }
    discarded
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
