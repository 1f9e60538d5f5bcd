//! Process resource probes: resident memory and CPU time.
//!
//! Memory comes from `/proc/self/status`; on systems without procfs the
//! probes report zero instead of failing.

use std::time::Duration;

use serde::{Deserialize, Serialize};

const STATUS_PATH: &str = "/proc/self/status";
const STATM_PATH: &str = "/proc/self/statm";

const KIB: u64 = 1024;
const MIB: u64 = 1024 * KIB;
const GIB: u64 = 1024 * MIB;

/// Resident memory of the current process, in bytes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemorySnapshot {
    /// Current resident set size (`VmRSS`).
    pub current_bytes: u64,
    /// Peak resident set size (`VmHWM`).
    pub peak_bytes: u64,
}

impl MemorySnapshot {
    /// Sample the current process.
    pub fn take() -> Self {
        match std::fs::read_to_string(STATUS_PATH) {
            Ok(status) => {
                let mut snapshot = Self::from_status(&status);
                if snapshot.current_bytes == 0 {
                    snapshot.current_bytes = statm_rss().unwrap_or(0);
                }
                snapshot
            }
            Err(_) => Self {
                current_bytes: statm_rss().unwrap_or(0),
                peak_bytes: 0,
            },
        }
    }

    /// Parse the `VmRSS` and `VmHWM` lines of a procfs status document.
    pub fn from_status(status: &str) -> Self {
        Self {
            current_bytes: status_field_kib(status, "VmRSS:").unwrap_or(0) * KIB,
            peak_bytes: status_field_kib(status, "VmHWM:").unwrap_or(0) * KIB,
        }
    }
}

fn status_field_kib(status: &str, key: &str) -> Option<u64> {
    status
        .lines()
        .find_map(|line| line.strip_prefix(key))
        .and_then(|rest| rest.split_whitespace().next())
        .and_then(|value| value.parse().ok())
}

#[cfg(unix)]
fn statm_rss() -> Option<u64> {
    let statm = std::fs::read_to_string(STATM_PATH).ok()?;
    let pages: u64 = statm.split_whitespace().nth(1)?.parse().ok()?;
    // SAFETY: sysconf has no preconditions.
    let page_size = unsafe { libc::sysconf(libc::_SC_PAGESIZE) };
    u64::try_from(page_size).ok().map(|size| pages * size)
}

#[cfg(not(unix))]
fn statm_rss() -> Option<u64> {
    None
}

/// User plus system CPU time consumed by the whole process so far.
#[cfg(unix)]
pub fn cpu_time() -> Duration {
    let mut usage = std::mem::MaybeUninit::<libc::rusage>::zeroed();
    // SAFETY: the pointer is valid for writes of one `rusage`.
    let rc = unsafe { libc::getrusage(libc::RUSAGE_SELF, usage.as_mut_ptr()) };
    if rc != 0 {
        return Duration::ZERO;
    }
    // SAFETY: zero-initialized and filled in by a successful getrusage.
    let usage = unsafe { usage.assume_init() };
    timeval(usage.ru_utime) + timeval(usage.ru_stime)
}

#[cfg(not(unix))]
pub fn cpu_time() -> Duration {
    Duration::ZERO
}

#[cfg(unix)]
fn timeval(tv: libc::timeval) -> Duration {
    let secs = u64::try_from(tv.tv_sec).unwrap_or(0);
    let micros = u64::try_from(tv.tv_usec).unwrap_or(0);
    Duration::from_secs(secs) + Duration::from_micros(micros)
}

/// Human-readable size with whole units (`512 B`, `3 KB`, `12 MB`, `1 GB`).
pub fn format_bytes(bytes: u64) -> String {
    if bytes < KIB {
        format!("{bytes} B")
    } else if bytes < MIB {
        format!("{} KB", bytes / KIB)
    } else if bytes < GIB {
        format!("{} MB", bytes / MIB)
    } else {
        format!("{} GB", bytes / GIB)
    }
}
