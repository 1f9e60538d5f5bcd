use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::BenchResult;
use crate::probe::format_bytes;

/// Measurements for one (operations, threads) pair.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    pub threads: usize,
    pub operations: usize,
    pub elapsed_ms: f64,
    pub cpu_time_s: f64,
    pub peak_memory_bytes: u64,
    pub avg_latency_us: f64,
    pub failures: usize,
    /// Files left in the store after the run; zero when every cycle completed.
    pub residual_files: usize,
}

impl fmt::Display for RunResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Threads: {} | Operations: {} | Elapsed Time: {:.3} ms | CPU Time: {:.3} s \
             | Memory Used: {} | Average Latency: {:.3} \u{03BC}s",
            self.threads,
            self.operations,
            self.elapsed_ms,
            self.cpu_time_s,
            format_bytes(self.peak_memory_bytes),
            self.avg_latency_us,
        )?;
        if self.failures > 0 {
            write!(f, " | Failures: {}", self.failures)?;
        }
        Ok(())
    }
}

/// All runs of one benchmark invocation, in execution order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BenchReport {
    pub runs: Vec<RunResult>,
}

impl BenchReport {
    pub fn total_failures(&self) -> usize {
        self.runs.iter().map(|r| r.failures).sum()
    }

    pub fn to_json(&self) -> BenchResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Plain-text summary: one line per run, with a blank line after each
    /// group of runs sharing an operation count.
    pub fn to_text(&self) -> String {
        let mut out = String::from("Benchmark results:\n");
        let mut runs = self.runs.iter().peekable();
        while let Some(run) = runs.next() {
            out.push_str(&run.to_string());
            out.push('\n');
            let group_ends = runs
                .peek()
                .map_or(true, |next| next.operations != run.operations);
            if group_ends {
                out.push('\n');
            }
        }
        out
    }
}
