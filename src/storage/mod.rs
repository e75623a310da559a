//! Persistence of entity collections.
//!
//! Each entity kind is stored in its own file as one JSON array. Loading is
//! tolerant: a missing or empty file is a first run, and individual records
//! that fail to decode are skipped and reported instead of aborting the load.

pub mod json_file;

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::commands::CommandResult;
use crate::models::Entity;
use crate::repository::CategorizedCollection;
use crate::TrackerError;

pub use json_file::JsonFileStorage;

/// Destination for records decoded during a load pass.
pub trait RecordSink<E> {
    /// Accept one decoded entity. An error marks the record as faulty.
    fn accept(&mut self, entity: E) -> Result<(), TrackerError>;
}

/// Persistence adapter for one entity kind.
pub trait Storage<E: Entity> {
    /// Location of the backing file.
    fn path(&self) -> &Path;

    /// Create the parent directories and an empty file if absent. Idempotent.
    fn ensure_file(&self) -> Result<(), TrackerError>;

    /// Overwrite the backing file with every entity in `collection`.
    fn save(&self, collection: &CategorizedCollection<E>) -> Result<(), TrackerError>;

    /// Read the backing file and push every valid record into `sink`.
    fn load(&self, sink: &mut dyn RecordSink<E>) -> LoadReport;
}

/// A record skipped during load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FaultyEntry {
    /// 1-based position of the record in the stored array.
    pub position: usize,
    /// The record as it appears in the file, pretty printed.
    pub raw: String,
    pub reason: String,
}

/// Outcome of one load pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum LoadReport {
    /// File absent, empty, or an empty array.
    FirstRun { path: PathBuf },
    /// Every record loaded.
    Loaded { path: PathBuf, count: usize },
    /// Some records were skipped; the rest loaded.
    Partial {
        path: PathBuf,
        loaded: usize,
        faulty: Vec<FaultyEntry>,
    },
    /// The document could not be read as a JSON array; nothing loaded.
    Unreadable { path: PathBuf, reason: String },
}

impl LoadReport {
    pub fn is_success(&self) -> bool {
        matches!(self, LoadReport::FirstRun { .. } | LoadReport::Loaded { .. })
    }

    /// Number of entities added to the sink.
    pub fn loaded(&self) -> usize {
        match self {
            LoadReport::Loaded { count, .. } => *count,
            LoadReport::Partial { loaded, .. } => *loaded,
            LoadReport::FirstRun { .. } | LoadReport::Unreadable { .. } => 0,
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            LoadReport::FirstRun { path }
            | LoadReport::Loaded { path, .. }
            | LoadReport::Partial { path, .. }
            | LoadReport::Unreadable { path, .. } => path,
        }
    }

    /// Convert into user-facing feedback for entities of `kind`.
    pub fn into_result(self, kind: &str) -> CommandResult {
        match self {
            LoadReport::FirstRun { path } => CommandResult::success(vec![format!(
                "No saved {} data found at {}. Starting fresh.",
                kind,
                path.display()
            )]),
            LoadReport::Loaded { path, count } => CommandResult::success(vec![format!(
                "Loaded {} {} entries from {}.",
                count,
                kind,
                path.display()
            )]),
            LoadReport::Partial {
                path,
                loaded,
                faulty,
            } => {
                let mut feedback = vec![format!(
                    "The {} data file is partially corrupted: {} entries loaded, {} skipped.",
                    kind,
                    loaded,
                    faulty.len()
                )];
                for entry in faulty {
                    feedback.push(format!("Error at JSON entry index: {}", entry.position));
                    feedback.push(format!("Reason: {}", entry.reason));
                    feedback.push(format!("Faulty entry: {}", entry.raw));
                }
                feedback.push(format!(
                    "Please fix or delete the file at: {}",
                    path.display()
                ));
                CommandResult::failure(feedback)
            }
            LoadReport::Unreadable { path, reason } => CommandResult::failure(vec![format!(
                "Unable to read file at {}: {}",
                path.display(),
                reason
            )]),
        }
    }
}
