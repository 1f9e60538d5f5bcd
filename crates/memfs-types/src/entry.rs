use serde::{Deserialize, Serialize};

use crate::temporal::Timestamp;

/// A copied-out listing entry for one live file.
///
/// Entries are values: later mutations of the store never show up in an
/// entry that has already been returned.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FileEntry {
    // Variant order matters for untagged deserialization: the detailed form
    // must be tried first or every entry would match `Name`.
    /// Detailed listing: size, both timestamps, and the name.
    Detailed {
        size: usize,
        created_at: Timestamp,
        modified_at: Timestamp,
        name: String,
    },
    /// Non-detailed listing: the name only.
    Name { name: String },
}

impl FileEntry {
    /// The file name, present in both forms.
    pub fn name(&self) -> &str {
        match self {
            Self::Name { name } | Self::Detailed { name, .. } => name,
        }
    }

    /// Content size, if this is a detailed entry.
    pub fn size(&self) -> Option<usize> {
        match self {
            Self::Name { .. } => None,
            Self::Detailed { size, .. } => Some(*size),
        }
    }

    pub fn is_detailed(&self) -> bool {
        matches!(self, Self::Detailed { .. })
    }
}
