//! Worker ceiling derived from the process file descriptor limit (Unix).

use log::debug;

/// Descriptors one worker may hold at once: the document it reads plus headroom for the
/// walk and the output sink.
pub const FDS_PER_WORKER: usize = 4;

/// Share of the soft limit, in percent, the pool may claim.
const FD_LIMIT_PERCENT: u64 = 80;

/// Soft `RLIMIT_NOFILE`, or `None` when unlimited or unavailable.
#[cfg(unix)]
pub fn max_open_fds() -> Option<u64> {
    let mut rlim = libc::rlimit {
        rlim_cur: 0,
        rlim_max: 0,
    };
    // SAFETY: getrlimit only writes into the struct passed to it.
    let rc = unsafe { libc::getrlimit(libc::RLIMIT_NOFILE, &mut rlim) };
    if rc != 0 || rlim.rlim_cur == libc::RLIM_INFINITY {
        return None;
    }
    u64::try_from(rlim.rlim_cur)
        .ok()
        .filter(|&n| n <= i64::MAX as u64)
}

#[cfg(not(unix))]
pub fn max_open_fds() -> Option<u64> {
    None
}

/// Workers that fit in the usable share of the limit, never fewer than one.
/// `None` when the platform reports no limit.
pub fn max_workers_by_fd_limit() -> Option<usize> {
    let usable = max_open_fds()?.saturating_mul(FD_LIMIT_PERCENT) / 100;
    let workers = usize::try_from(usable).unwrap_or(usize::MAX) / FDS_PER_WORKER;
    Some(workers.max(1))
}

/// Clamp `requested` workers to the FD-derived ceiling.
pub fn cap_workers_by_fd_limit(requested: usize) -> usize {
    match max_workers_by_fd_limit() {
        Some(fd_cap) if fd_cap < requested => {
            debug!("Capping workers {} -> {} (FD limit)", requested, fd_cap);
            fd_cap
        }
        _ => requested,
    }
}
