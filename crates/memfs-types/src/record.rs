use serde::{Deserialize, Serialize};

use crate::entry::FileEntry;
use crate::temporal::Timestamp;

/// One named blob held by a store.
///
/// Fields are private so `size` can only ever be derived from the current
/// content and `created_at` can never change after construction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    name: String,
    content: Vec<u8>,
    created_at: Timestamp,
    modified_at: Timestamp,
}

impl FileRecord {
    /// A new, empty record. Both timestamps are set to `now`.
    pub fn new(name: impl Into<String>, now: Timestamp) -> Self {
        Self {
            name: name.into(),
            content: Vec::new(),
            created_at: now,
            modified_at: now,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Content length in bytes.
    pub fn size(&self) -> usize {
        self.content.len()
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn modified_at(&self) -> Timestamp {
        self.modified_at
    }

    /// Replace the whole content and bump the modification time.
    ///
    /// `modified_at` never moves backwards, even if the wall clock does.
    /// Size limits are the caller's responsibility.
    pub fn replace_content(&mut self, content: Vec<u8>, now: Timestamp) {
        self.content = content;
        self.modified_at = self.modified_at.latest(now);
    }

    /// Copy this record out as a listing entry.
    pub fn to_entry(&self, detailed: bool) -> FileEntry {
        if detailed {
            FileEntry::Detailed {
                size: self.size(),
                created_at: self.created_at,
                modified_at: self.modified_at,
                name: self.name.clone(),
            }
        } else {
            FileEntry::Name {
                name: self.name.clone(),
            }
        }
    }
}
