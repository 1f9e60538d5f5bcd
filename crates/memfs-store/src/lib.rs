//! Thread-safe in-memory file store.
//!
//! The store is a mutable mapping from file name to [`FileRecord`], owned
//! exclusively by one [`FileStore`] instance and shared between threads by
//! reference (or `Arc`). Callers only ever receive copies: content comes back
//! as an owned `Vec<u8>`, listings as owned [`FileEntry`] values.
//!
//! # Operations
//!
//! - [`FileStore::create_files`] — batch create, per-name outcomes
//! - [`FileStore::write_file`] — replace the content of one file
//! - [`FileStore::delete_files`] — batch delete, per-name outcomes
//! - [`FileStore::read_file`] — copy out the content of one file
//! - [`FileStore::list_files`] — consistent snapshot of all live files
//!
//! # Design Rules
//!
//! 1. Names are unique: at most one live record per name.
//! 2. Every live record holds at most [`MAX_FILE_SIZE`] bytes.
//! 3. Each operation, batches included, is one critical section.
//! 4. Missing files, duplicate names and oversize content are reported
//!    outcomes ([`StoreError`]), never panics, and never partially applied.
//!
//! [`FileRecord`]: memfs_types::FileRecord
//! [`FileEntry`]: memfs_types::FileEntry
//! [`MAX_FILE_SIZE`]: memfs_types::MAX_FILE_SIZE

pub mod error;
pub mod memory;
pub mod outcome;
pub mod traits;

#[cfg(test)]
mod tests;

// Re-export primary types at crate root for ergonomic imports.
pub use error::{StoreError, StoreResult};
pub use memory::InMemoryFileStore;
pub use outcome::{BatchOutcome, ItemOutcome};
pub use traits::FileStore;

pub use memfs_types::{FileEntry, FileRecord, Timestamp, MAX_FILE_SIZE};
