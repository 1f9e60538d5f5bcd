use thiserror::Error;

/// Rejections from the command line parser.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("invalid command provided.")]
    UnknownCommand(String),

    #[error("filename cannot be empty.")]
    MissingFileName,

    #[error("invalid file count: {0:?}")]
    InvalidCount(String),

    #[error("mismatch in file count.")]
    CountMismatch { expected: usize, actual: usize },
}

/// Errors that end a shell session.
#[derive(Debug, Error)]
pub enum ShellError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ShellResult<T> = Result<T, ShellError>;
