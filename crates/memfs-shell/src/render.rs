//! Message and table formatting for shell output.

use colored::Colorize;
use memfs_store::{FileEntry, StoreError};

/// Column widths of the detailed listing: size, created, modified, name.
const COLUMNS: [usize; 4] = [10, 20, 20, 20];

/// Turns store outcomes into the lines the shell prints.
#[derive(Clone, Copy, Debug, Default)]
pub struct Renderer {
    color: bool,
}

impl Renderer {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    pub fn created(&self, name: &str) -> String {
        self.success(format!("file {name} created successfully."))
    }

    pub fn written(&self, name: &str) -> String {
        self.success(format!("successfully written to {name}."))
    }

    pub fn deleted(&self, name: &str) -> String {
        self.success(format!("file {name} deleted successfully."))
    }

    /// Store failures, worded per operation.
    pub fn create_failed(&self, error: &StoreError) -> String {
        match error {
            StoreError::AlreadyExists { name } => {
                self.error(&format!("another file with {name} exists."))
            }
            other => self.error(&other.to_string()),
        }
    }

    pub fn write_failed(&self, error: &StoreError) -> String {
        match error {
            StoreError::NotFound { name } => self.error(&format!("file {name} does not exist.")),
            StoreError::TooLarge { name, max, .. } => self.error(&format!(
                "Content exceeds the maximum allowed size of {}KB for file {name}.",
                max / 1024
            )),
            other => self.error(&other.to_string()),
        }
    }

    pub fn delete_failed(&self, error: &StoreError) -> String {
        match error {
            StoreError::NotFound { name } => self.error(&format!("file {name} doesn't exist.")),
            other => self.error(&other.to_string()),
        }
    }

    pub fn read_failed(&self, error: &StoreError) -> String {
        match error {
            StoreError::NotFound { name } => self.error(&format!("{name} does not exist.")),
            other => self.error(&other.to_string()),
        }
    }

    /// A generic `error: ...` line.
    pub fn error(&self, message: &str) -> String {
        if self.color {
            format!("{} {message}", "error:".red().bold())
        } else {
            format!("error: {message}")
        }
    }

    /// Header row of the detailed listing.
    pub fn list_header(&self) -> String {
        let header = row(["size", "created", "last modified", "filename"]);
        if self.color {
            header.bold().to_string()
        } else {
            header
        }
    }

    /// One listing line. Name-only entries print the bare name.
    pub fn list_entry(&self, entry: &FileEntry) -> String {
        match entry {
            FileEntry::Name { name } => name.clone(),
            FileEntry::Detailed {
                size,
                created_at,
                modified_at,
                name,
            } => row([
                size.to_string().as_str(),
                created_at.to_string().as_str(),
                modified_at.to_string().as_str(),
                name.as_str(),
            ]),
        }
    }

    fn success(&self, line: String) -> String {
        if self.color {
            line.green().to_string()
        } else {
            line
        }
    }
}

/// Left-aligned cells, each padded to its column width.
fn row(cells: [&str; 4]) -> String {
    cells
        .iter()
        .zip(COLUMNS)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect()
}
