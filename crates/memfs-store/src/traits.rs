use memfs_types::FileEntry;

use crate::error::StoreResult;
use crate::outcome::BatchOutcome;

/// Name-indexed store of small blobs.
///
/// All implementations must satisfy these invariants:
/// - Names are unique among live files.
/// - No live file ever holds more than [`MAX_FILE_SIZE`] bytes.
/// - Every operation is linearizable, and a batch is applied as a whole
///   with respect to other operations.
/// - Returned data is copied out; later mutations never change it.
/// - Expected failures are reported, never raised as panics.
///
/// [`MAX_FILE_SIZE`]: memfs_types::MAX_FILE_SIZE
pub trait FileStore: Send + Sync {
    /// Create an empty file for each name.
    ///
    /// Each name is checked against the state left by the names before it,
    /// so a name repeated within the batch fails as `AlreadyExists` after
    /// its first occurrence. Failures do not stop the batch.
    fn create_files(&self, names: &[String]) -> BatchOutcome;

    /// Replace the whole content of an existing file.
    ///
    /// Fails with `NotFound` if the file is absent and with `TooLarge` if
    /// `content` exceeds the size limit; a rejected write changes nothing.
    fn write_file(&self, name: &str, content: &[u8]) -> StoreResult<()>;

    /// Delete each named file. Absent names are reported as `NotFound`
    /// and do not stop the batch.
    fn delete_files(&self, names: &[String]) -> BatchOutcome;

    /// Copy out the current content of a file.
    fn read_file(&self, name: &str) -> StoreResult<Vec<u8>>;

    /// One entry per live file, taken at a single instant.
    ///
    /// Order is implementation-defined; callers must not depend on it.
    fn list_files(&self, detailed: bool) -> Vec<FileEntry>;

    /// Create a single file.
    ///
    /// Default implementation runs a one-name batch through `create_files()`.
    fn create_file(&self, name: &str) -> StoreResult<()> {
        single(self.create_files(&[name.to_string()]))
    }

    /// Delete a single file.
    ///
    /// Default implementation runs a one-name batch through `delete_files()`.
    fn delete_file(&self, name: &str) -> StoreResult<()> {
        single(self.delete_files(&[name.to_string()]))
    }
}

fn single(outcome: BatchOutcome) -> StoreResult<()> {
    outcome
        .into_iter()
        .next()
        .map_or(Ok(()), |item| item.result)
}
