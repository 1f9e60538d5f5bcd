use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use memfs_types::{FileEntry, FileRecord, Timestamp, MAX_FILE_SIZE};
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::outcome::{BatchOutcome, ItemOutcome};
use crate::traits::FileStore;

/// In-memory, HashMap-based file store.
///
/// The whole map sits behind one `Mutex`: every operation, including the
/// read-only ones, holds it for its full duration, so no caller can ever
/// observe a write or a batch half-applied. Data is lost when the store is
/// dropped.
pub struct InMemoryFileStore {
    files: Mutex<HashMap<String, FileRecord>>,
}

impl InMemoryFileStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            files: Mutex::new(HashMap::new()),
        }
    }

    // Every critical section leaves the map consistent before it can
    // panic, so the data behind a poisoned lock is still valid.
    fn files(&self) -> MutexGuard<'_, HashMap<String, FileRecord>> {
        self.files.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of live files.
    pub fn len(&self) -> usize {
        self.files().len()
    }

    /// Returns `true` if the store holds no files.
    pub fn is_empty(&self) -> bool {
        self.files().is_empty()
    }

    /// Total content bytes across all live files.
    pub fn total_bytes(&self) -> u64 {
        self.files().values().map(|rec| rec.size() as u64).sum()
    }

    /// Remove every file.
    pub fn clear(&self) {
        let removed = {
            let mut files = self.files();
            let n = files.len();
            files.clear();
            n
        };
        debug!(removed, "store cleared");
    }

    /// Detailed listing entry for a single file.
    pub fn stat(&self, name: &str) -> StoreResult<FileEntry> {
        self.files()
            .get(name)
            .map(|rec| rec.to_entry(true))
            .ok_or_else(|| StoreError::NotFound {
                name: name.to_string(),
            })
    }
}

impl Default for InMemoryFileStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FileStore for InMemoryFileStore {
    fn create_files(&self, names: &[String]) -> BatchOutcome {
        let outcome: BatchOutcome = {
            let mut files = self.files();
            let now = Timestamp::now();
            names
                .iter()
                .map(|name| {
                    if files.contains_key(name) {
                        return ItemOutcome::err(
                            name.as_str(),
                            StoreError::AlreadyExists { name: name.clone() },
                        );
                    }
                    files.insert(name.clone(), FileRecord::new(name.as_str(), now));
                    ItemOutcome::ok(name.as_str())
                })
                .collect()
        };
        debug!(
            requested = names.len(),
            created = outcome.succeeded().len(),
            "create batch applied"
        );
        outcome
    }

    fn write_file(&self, name: &str, content: &[u8]) -> StoreResult<()> {
        {
            let mut files = self.files();
            let record = files.get_mut(name).ok_or_else(|| StoreError::NotFound {
                name: name.to_string(),
            })?;
            if content.len() > MAX_FILE_SIZE {
                return Err(StoreError::TooLarge {
                    name: name.to_string(),
                    size: content.len(),
                    max: MAX_FILE_SIZE,
                });
            }
            record.replace_content(content.to_vec(), Timestamp::now());
        }
        debug!(name, size = content.len(), "file written");
        Ok(())
    }

    fn delete_files(&self, names: &[String]) -> BatchOutcome {
        let outcome: BatchOutcome = {
            let mut files = self.files();
            names
                .iter()
                .map(|name| match files.remove(name) {
                    Some(_) => ItemOutcome::ok(name.as_str()),
                    None => ItemOutcome::err(
                        name.as_str(),
                        StoreError::NotFound { name: name.clone() },
                    ),
                })
                .collect()
        };
        debug!(
            requested = names.len(),
            deleted = outcome.succeeded().len(),
            "delete batch applied"
        );
        outcome
    }

    fn read_file(&self, name: &str) -> StoreResult<Vec<u8>> {
        let files = self.files();
        files
            .get(name)
            .map(|rec| rec.content().to_vec())
            .ok_or_else(|| StoreError::NotFound {
                name: name.to_string(),
            })
    }

    fn list_files(&self, detailed: bool) -> Vec<FileEntry> {
        let mut entries: Vec<FileEntry> = {
            let files = self.files();
            files.values().map(|rec| rec.to_entry(detailed)).collect()
        };
        // Sorted for stable output; not part of the contract.
        entries.sort_by(|a, b| a.name().cmp(b.name()));
        entries
    }
}

impl std::fmt::Debug for InMemoryFileStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.len();
        f.debug_struct("InMemoryFileStore")
            .field("file_count", &count)
            .finish()
    }
}
