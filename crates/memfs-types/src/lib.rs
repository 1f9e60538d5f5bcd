//! Foundation types for memfs.
//!
//! memfs is a process-local, name-indexed collection of small text blobs.
//! This crate holds the plain data types shared by the store, the
//! interactive shell and the benchmark harness.
//!
//! # Key Types
//!
//! - [`FileRecord`] — one named blob with content and two timestamps
//! - [`FileEntry`] — a copied-out listing entry (name only, or detailed)
//! - [`Timestamp`] — wall-clock instant rendered as a calendar date
//! - [`MAX_FILE_SIZE`] — upper bound on the content of any file

pub mod entry;
pub mod error;
pub mod record;
pub mod temporal;

pub use entry::FileEntry;
pub use error::TypeError;
pub use record::FileRecord;
pub use temporal::Timestamp;

/// Maximum content length of a single file, in bytes (2 KB).
pub const MAX_FILE_SIZE: usize = 2048;
