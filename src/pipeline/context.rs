//! Pipeline context and tuning: cancellation, worker count and the channels between
//! the feeder, the workers and the coordinating thread.

use crossbeam_channel::{Receiver, Sender, bounded};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::engine::parallel::resolve_num_workers;
use crate::utils::config::DOCUMENTS_PER_WORKER_IN_FLIGHT;

/// Tuning derived once per run from the config and the host.
#[derive(Clone, Debug)]
pub struct PipelineTuning {
    pub num_workers: usize,
    /// Capacity of the document channel feeding workers.
    pub channel_cap: usize,
}

impl PipelineTuning {
    pub fn resolve(requested: Option<usize>) -> Self {
        let num_workers = resolve_num_workers(requested);
        Self {
            num_workers,
            channel_cap: num_workers * DOCUMENTS_PER_WORKER_IN_FLIGHT,
        }
    }
}

/// Cooperative cancellation shared between the caller, the orchestrator and the pool.
/// Once set it stays set. A child is cancelled with its parent, never the other way round.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
    parent: Option<Arc<AtomicBool>>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Token that also observes `self`; cancelling the child leaves `self` untouched.
    pub fn child(&self) -> Self {
        Self {
            flag: Arc::new(AtomicBool::new(false)),
            parent: Some(Arc::clone(&self.flag)),
        }
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
            || self
                .parent
                .as_ref()
                .is_some_and(|p| p.load(Ordering::Relaxed))
    }

    /// Hook Ctrl+C to this token. Call once per process.
    pub fn install_ctrlc_handler(&self) -> Result<(), ctrlc::Error> {
        let token = self.clone();
        ctrlc::set_handler(move || token.cancel())
    }
}

/// Channels for one pool run. Feeder gets `task_tx`; workers get `task_rx` and `outcome_tx`;
/// the coordinating thread keeps `outcome_rx`.
pub struct PoolChannels<T, O> {
    pub task_tx: Sender<T>,
    pub task_rx: Receiver<T>,
    pub outcome_tx: Sender<O>,
    pub outcome_rx: Receiver<O>,
}

pub fn create_pool_channels<T, O>(tuning: &PipelineTuning) -> PoolChannels<T, O> {
    let (task_tx, task_rx) = bounded::<T>(tuning.channel_cap.max(1));
    let (outcome_tx, outcome_rx) = bounded::<O>(tuning.channel_cap.max(1));
    PoolChannels {
        task_tx,
        task_rx,
        outcome_tx,
        outcome_rx,
    }
}
