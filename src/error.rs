use std::path::PathBuf;

use thiserror::Error;

/// Custom error type for InternSprint operations.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// Entity declares a category the store was not constructed with.
    #[error("Unknown {kind} category '{category}'. Expected one of: {}", .expected.join(", "))]
    UnknownCategory {
        kind: &'static str,
        category: String,
        expected: Vec<String>,
    },

    /// Position or global ordinal lies outside the stored entities.
    #[error("{}", out_of_range_message(.index, *.total))]
    IndexOutOfRange { index: String, total: usize },

    /// The index flag was absent or blank.
    #[error("Missing index. Please specify the index of the entry with the index flag.")]
    MissingIndex,

    /// The index token is not a positive integer.
    #[error("Invalid index '{0}'. The index must be a positive whole number.")]
    InvalidIndexFormat(String),

    /// The same flag was supplied more than once.
    #[error("Duplicate parameter '{0}'. Each flag may only be supplied once.")]
    DuplicateParameter(String),

    /// Parent directory of a data file could not be created.
    #[error("Unable to create directory at {}", .path.display())]
    DirectoryCreateFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Data file could not be created.
    #[error("Unable to create file at {}", .path.display())]
    FileCreateFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Data file could not be written.
    #[error("Unable to write to file at {}", .path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A single record could not be decoded into an entity.
    #[error("Malformed {kind} record: {message}")]
    Decode { kind: &'static str, message: String },

    /// Configuration file could not be parsed.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl TrackerError {
    /// True for the I/O failures raised while persisting a store.
    pub fn is_persistence_failure(&self) -> bool {
        matches!(
            self,
            TrackerError::DirectoryCreateFailed { .. }
                | TrackerError::FileCreateFailed { .. }
                | TrackerError::WriteFailed { .. }
        )
    }

    /// Path of the data file involved, if any.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            TrackerError::DirectoryCreateFailed { path, .. }
            | TrackerError::FileCreateFailed { path, .. }
            | TrackerError::WriteFailed { path, .. } => Some(path),
            _ => None,
        }
    }
}

fn out_of_range_message(index: &str, total: usize) -> String {
    if total == 0 {
        format!("Index {} is out of range. There are no entries yet.", index)
    } else {
        format!(
            "Index {} is out of range. There are {} entries (valid range: 1 to {}).",
            index, total, total
        )
    }
}

impl From<toml::de::Error> for TrackerError {
    fn from(err: toml::de::Error) -> Self {
        TrackerError::Config(err.to_string())
    }
}
