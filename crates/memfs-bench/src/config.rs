use std::path::Path;

use memfs_store::MAX_FILE_SIZE;
use serde::{Deserialize, Serialize};

use crate::error::{BenchError, BenchResult};

/// Benchmark matrix and payload settings.
///
/// Every operation count is run once per thread count. Missing TOML keys
/// fall back to the defaults.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchConfig {
    pub thread_counts: Vec<usize>,
    pub operation_counts: Vec<usize>,
    /// Bytes written to each file per cycle.
    pub content_size: usize,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            thread_counts: vec![1, 2, 4, 8, 16],
            operation_counts: vec![100, 1000, 10000],
            content_size: 2000,
        }
    }
}

impl BenchConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(raw: &str) -> BenchResult<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file.
    pub fn load(path: &Path) -> BenchResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| BenchError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn validate(&self) -> BenchResult<()> {
        if self.thread_counts.is_empty() {
            return Err(BenchError::InvalidConfig("thread_counts is empty".into()));
        }
        if self.operation_counts.is_empty() {
            return Err(BenchError::InvalidConfig("operation_counts is empty".into()));
        }
        if self.thread_counts.contains(&0) {
            return Err(BenchError::InvalidConfig("thread counts must be positive".into()));
        }
        if self.operation_counts.contains(&0) {
            return Err(BenchError::InvalidConfig(
                "operation counts must be positive".into(),
            ));
        }
        if self.content_size > MAX_FILE_SIZE {
            return Err(BenchError::InvalidConfig(format!(
                "content_size {} exceeds the {MAX_FILE_SIZE}-byte file limit",
                self.content_size
            )));
        }
        Ok(())
    }

    /// Total number of runs in the matrix.
    pub fn run_count(&self) -> usize {
        self.thread_counts.len() * self.operation_counts.len()
    }
}
