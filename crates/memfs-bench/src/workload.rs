use std::thread;
use std::time::{Duration, Instant};

use memfs_store::{FileStore, StoreResult};
use tracing::{info, warn};

use crate::config::BenchConfig;
use crate::probe::{cpu_time, MemorySnapshot};
use crate::report::{BenchReport, RunResult};

/// Aggregate counters of one workload run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WorkloadStats {
    /// Cycles that finished every step.
    pub completed: usize,
    /// Cycles that stopped at a failed step.
    pub failures: usize,
    /// Sum of per-cycle latencies, failed cycles included.
    pub total_latency: Duration,
}

impl WorkloadStats {
    fn merge(mut self, other: Self) -> Self {
        self.completed += other.completed;
        self.failures += other.failures;
        self.total_latency += other.total_latency;
        self
    }
}

/// Benchmark file names: `file1.txt` through `file{count}.txt`.
pub fn file_names(count: usize) -> Vec<String> {
    (1..=count).map(|i| format!("file{i}.txt")).collect()
}

/// Run one create → write → read → delete cycle per name.
///
/// Names are split into contiguous ranges, one per thread; the last thread
/// also takes the remainder. A failed step ends that name's cycle and is
/// counted, never propagated.
pub fn run_workload<S>(store: &S, threads: usize, names: &[String], content: &[u8]) -> WorkloadStats
where
    S: FileStore + ?Sized,
{
    let threads = threads.max(1);
    let per_thread = names.len() / threads;

    thread::scope(|scope| {
        let handles: Vec<_> = (0..threads)
            .map(|t| {
                let start = t * per_thread;
                let end = if t == threads - 1 {
                    names.len()
                } else {
                    start + per_thread
                };
                let slice = &names[start..end];
                (slice.len(), scope.spawn(move || drive(store, slice, content)))
            })
            .collect();

        handles
            .into_iter()
            .map(|(len, handle)| {
                handle.join().unwrap_or_else(|_| {
                    warn!(names = len, "benchmark worker panicked");
                    WorkloadStats {
                        failures: len,
                        ..WorkloadStats::default()
                    }
                })
            })
            .fold(WorkloadStats::default(), WorkloadStats::merge)
    })
}

fn drive<S>(store: &S, names: &[String], content: &[u8]) -> WorkloadStats
where
    S: FileStore + ?Sized,
{
    let mut stats = WorkloadStats::default();
    for name in names {
        let started = Instant::now();
        let result = cycle(store, name, content);
        stats.total_latency += started.elapsed();
        match result {
            Ok(()) => stats.completed += 1,
            Err(e) => {
                warn!(name = %name, error = %e, "benchmark cycle failed");
                stats.failures += 1;
            }
        }
    }
    stats
}

fn cycle<S>(store: &S, name: &str, content: &[u8]) -> StoreResult<()>
where
    S: FileStore + ?Sized,
{
    store.create_file(name)?;
    store.write_file(name, content)?;
    store.read_file(name)?;
    store.delete_file(name)?;
    Ok(())
}

/// Run the full matrix described by `config` against `store`.
///
/// Operation counts form the outer loop and thread counts the inner one,
/// so runs come back grouped by operation count.
pub fn run_benchmark<S>(store: &S, config: &BenchConfig) -> BenchReport
where
    S: FileStore + ?Sized,
{
    let content = vec![b'A'; config.content_size];
    let mut runs = Vec::with_capacity(config.run_count());

    for &operations in &config.operation_counts {
        let names = file_names(operations);
        for &threads in &config.thread_counts {
            let cpu_before = cpu_time();
            let started = Instant::now();

            let stats = run_workload(store, threads, &names, &content);

            let cpu_after = cpu_time();
            let memory = MemorySnapshot::take();
            let elapsed = started.elapsed();

            let run = RunResult {
                threads,
                operations,
                elapsed_ms: elapsed.as_secs_f64() * 1e3,
                cpu_time_s: cpu_after.saturating_sub(cpu_before).as_secs_f64(),
                peak_memory_bytes: memory.peak_bytes,
                avg_latency_us: stats.total_latency.as_secs_f64() * 1e6 / operations as f64,
                failures: stats.failures,
                residual_files: store.list_files(false).len(),
            };
            info!(
                threads,
                operations,
                elapsed_ms = run.elapsed_ms,
                avg_latency_us = run.avg_latency_us,
                failures = run.failures,
                "benchmark run complete"
            );
            runs.push(run);
        }
    }

    BenchReport { runs }
}
