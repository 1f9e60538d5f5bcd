//! Concurrent load driver for memfs.
//!
//! Runs the create → write → read → delete cycle over disjoint file names
//! from several threads against one shared store, for every combination of
//! configured thread and operation counts, and reports wall time, CPU time,
//! peak memory and average per-cycle latency.

pub mod config;
pub mod error;
pub mod probe;
pub mod report;
pub mod workload;

pub use config::BenchConfig;
pub use error::{BenchError, BenchResult};
pub use probe::{cpu_time, format_bytes, MemorySnapshot};
pub use report::{BenchReport, RunResult};
pub use workload::{file_names, run_benchmark, run_workload, WorkloadStats};
