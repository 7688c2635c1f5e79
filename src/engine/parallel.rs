//! Shared helpers for parallel processing.

use log::debug;

use crate::utils::config::WorkerThreadLimits;
use crate::utils::fd_limit::cap_workers_by_fd_limit;

/// Map the user-facing `num_proc` (`None` or ≤0 means "all cores") to an explicit count.
pub fn normalize_num_proc(num_proc: Option<i64>) -> Option<usize> {
    match num_proc {
        Some(n) if n > 0 => Some(n as usize),
        _ => None,
    }
}

/// Worker count for the pool: requested count or every available thread, then FD-capped.
pub fn resolve_num_workers(requested: Option<usize>) -> usize {
    let limits = WorkerThreadLimits::current();
    let wanted = match requested {
        Some(n) if n > 0 => n,
        _ => limits.all_threads,
    };
    let workers = cap_workers_by_fd_limit(wanted).max(limits.floor);
    debug!("Using {} worker(s)", workers);
    workers
}
