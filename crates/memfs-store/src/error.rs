/// Expected, recoverable failures of store operations.
///
/// None of these is fatal: the store reports them to the caller and the
/// targeted record is left exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// Create targeted a name that is already present.
    #[error("file already exists: {name}")]
    AlreadyExists { name: String },

    /// Write, delete or read targeted an absent name.
    #[error("file not found: {name}")]
    NotFound { name: String },

    /// Write content exceeded the maximum file size.
    #[error("content too large for {name}: {size} bytes exceeds limit of {max}")]
    TooLarge {
        name: String,
        size: usize,
        max: usize,
    },
}

impl StoreError {
    /// The file name the failure refers to.
    pub fn name(&self) -> &str {
        match self {
            Self::AlreadyExists { name } | Self::NotFound { name } | Self::TooLarge { name, .. } => {
                name
            }
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
