//! Interactive shell for memfs.
//!
//! Reads one command per line, runs it against an injected
//! [`FileStore`](memfs_store::FileStore), and renders the per-call or
//! per-name outcomes to the caller's output streams. The shell keeps no
//! file state of its own.
//!
//! # Modules
//!
//! - [`command`] — command line tokenizer and [`ShellCommand`] parser
//! - [`render`] — message and table formatting
//! - [`shell`] — the read-eval-print loop
//! - [`error`] — parse and session errors

pub mod command;
pub mod error;
pub mod render;
pub mod shell;

pub use command::{parse_line, ShellCommand, WriteRequest};
pub use error::{ParseError, ShellError, ShellResult};
pub use render::Renderer;
pub use shell::{SessionStats, Shell, ShellConfig};
