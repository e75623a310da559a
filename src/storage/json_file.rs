//! JSON array file backend.

use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, info, warn};

use super::{FaultyEntry, LoadReport, RecordSink, Storage};
use crate::models::Entity;
use crate::repository::CategorizedCollection;
use crate::TrackerError;

/// Stores one entity kind as a pretty-printed JSON array at a fixed path.
///
/// The adapter only holds the path; the file is opened for the duration of
/// a single save or load.
#[derive(Debug, Clone)]
pub struct JsonFileStorage<E> {
    path: PathBuf,
    _kind: PhantomData<fn() -> E>,
}

impl<E: Entity> JsonFileStorage<E> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _kind: PhantomData,
        }
    }

    /// Absolute form of the path for user-facing reports.
    fn display_path(&self) -> PathBuf {
        std::path::absolute(&self.path).unwrap_or_else(|_| self.path.clone())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }

    /// Write `content` beside the target and rename it into place.
    fn atomic_write(&self, content: &[u8]) -> Result<(), TrackerError> {
        let temp_path = self.temp_path();
        let write_failed = |source| TrackerError::WriteFailed {
            path: self.display_path(),
            source,
        };

        let written = File::create(&temp_path)
            .and_then(|mut file| {
                file.write_all(content)?;
                file.sync_all()
            })
            .and_then(|()| fs::rename(&temp_path, &self.path));

        if let Err(e) = written {
            let _ = fs::remove_file(&temp_path);
            return Err(write_failed(e));
        }
        Ok(())
    }
}

impl<E: Entity> Storage<E> for JsonFileStorage<E> {
    fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_file(&self) -> Result<(), TrackerError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if !parent.is_dir() {
                fs::create_dir_all(parent).map_err(|source| {
                    error!("Unable to create directory {}", parent.display());
                    TrackerError::DirectoryCreateFailed {
                        path: parent.to_path_buf(),
                        source,
                    }
                })?;
                debug!("Created data directory {}", parent.display());
            }
        }

        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
        {
            Ok(_) => {
                debug!("Created data file {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(()),
            Err(source) => {
                error!("Unable to create file {}", self.path.display());
                Err(TrackerError::FileCreateFailed {
                    path: self.display_path(),
                    source,
                })
            }
        }
    }

    fn save(&self, collection: &CategorizedCollection<E>) -> Result<(), TrackerError> {
        info!("Saving {} {} entries to {}", collection.len(), E::KIND, self.path.display());

        let records: Vec<&E> = collection.iter().collect();
        let content = to_pretty_json(&records).map_err(|e| TrackerError::WriteFailed {
            path: self.display_path(),
            source: e.into(),
        })?;

        self.ensure_file()?;
        self.atomic_write(&content)?;

        info!("Saved {} {} entries", records.len(), E::KIND);
        Ok(())
    }

    fn load(&self, sink: &mut dyn RecordSink<E>) -> LoadReport {
        info!("Loading {} entries from {}", E::KIND, self.path.display());

        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("No {} data file yet, starting fresh", E::KIND);
                return LoadReport::FirstRun {
                    path: self.display_path(),
                };
            }
            Err(e) => {
                error!("Error reading {}: {}", self.path.display(), e);
                return LoadReport::Unreadable {
                    path: self.display_path(),
                    reason: e.to_string(),
                };
            }
        };

        if content.trim().is_empty() {
            info!("{} data file is empty", E::KIND);
            return LoadReport::FirstRun {
                path: self.display_path(),
            };
        }

        let records: Vec<Value> = match serde_json::from_str(&content) {
            Ok(records) => records,
            Err(e) => {
                warn!("{} data file is not a JSON array: {}", E::KIND, e);
                return LoadReport::Unreadable {
                    path: self.display_path(),
                    reason: e.to_string(),
                };
            }
        };

        if records.is_empty() {
            return LoadReport::FirstRun {
                path: self.display_path(),
            };
        }

        let mut loaded = 0;
        let mut faulty = Vec::new();
        for (idx, record) in records.into_iter().enumerate() {
            let position = idx + 1;
            match E::decode(record.clone()).and_then(|entity| sink.accept(entity)) {
                Ok(()) => loaded += 1,
                Err(e) => {
                    warn!("Skipping corrupted {} entry {}: {}", E::KIND, position, e);
                    faulty.push(FaultyEntry {
                        position,
                        raw: to_pretty_json(&record)
                            .ok()
                            .and_then(|bytes| String::from_utf8(bytes).ok())
                            .unwrap_or_else(|| record.to_string()),
                        reason: e.to_string(),
                    });
                }
            }
        }

        if faulty.is_empty() {
            info!("Loaded {} {} entries", loaded, E::KIND);
            LoadReport::Loaded {
                path: self.display_path(),
                count: loaded,
            }
        } else {
            LoadReport::Partial {
                path: self.display_path(),
                loaded,
                faulty,
            }
        }
    }
}

/// Serialize with four-space indentation.
fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, serde_json::Error> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GeneralProject, Project, ProjectBase, SoftwareProject};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tempfile::TempDir;

    fn project(name: &str, software: bool) -> Project {
        let base = ProjectBase {
            project_name: name.to_string(),
            role: "Developer".into(),
            description: "Something useful".into(),
            objectives: "Ship it".into(),
            duration: "2 weeks".into(),
        };
        if software {
            Project::Software(SoftwareProject {
                base,
                programming_languages: Some("Rust".into()),
                framework: None,
            })
        } else {
            Project::General(GeneralProject {
                base,
                department: None,
            })
        }
    }

    fn storage(dir: &TempDir) -> JsonFileStorage<Project> {
        JsonFileStorage::new(dir.path().join("data").join("projects.json"))
    }

    #[test]
    fn test_load_missing_file_is_first_run() {
        let dir = TempDir::new().unwrap();
        let mut sink = CategorizedCollection::new();
        let report = storage(&dir).load(&mut sink);
        assert!(matches!(report, LoadReport::FirstRun { .. }));
        assert!(sink.is_empty());
    }

    #[test]
    fn test_load_zero_length_file_is_first_run() {
        let dir = TempDir::new().unwrap();
        let storage = storage(&dir);
        storage.ensure_file().unwrap();
        assert_eq!(fs::metadata(storage.path()).unwrap().len(), 0);

        let mut sink = CategorizedCollection::new();
        assert!(matches!(storage.load(&mut sink), LoadReport::FirstRun { .. }));
    }

    #[test]
    fn test_ensure_file_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let storage = storage(&dir);
        storage.ensure_file().unwrap();
        fs::write(storage.path(), "[]").unwrap();
        storage.ensure_file().unwrap();
        assert_eq!(fs::read_to_string(storage.path()).unwrap(), "[]");
    }

    #[test]
    fn test_ensure_file_reports_directory_failure() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("data");
        fs::write(&blocker, "not a directory").unwrap();

        let err = storage(&dir).ensure_file().unwrap_err();
        assert!(matches!(err, TrackerError::DirectoryCreateFailed { .. }));
        assert!(err.is_persistence_failure());
    }

    #[test]
    fn test_save_empty_then_load_is_first_run() {
        let dir = TempDir::new().unwrap();
        let storage = storage(&dir);
        storage.save(&CategorizedCollection::new()).unwrap();
        assert_eq!(fs::read_to_string(storage.path()).unwrap(), "[]");

        let mut sink = CategorizedCollection::new();
        let report = storage.load(&mut sink);
        assert!(report.is_success());
        assert!(matches!(report, LoadReport::FirstRun { .. }));
        assert_eq!(sink.len(), 0);
    }

    #[test]
    fn test_save_uses_four_space_indent_and_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let storage = storage(&dir);
        let mut collection = CategorizedCollection::new();
        collection.insert(project("Compiler", true)).unwrap();
        storage.save(&collection).unwrap();

        let content = fs::read_to_string(storage.path()).unwrap();
        assert!(content.starts_with("[\n    {\n        \""));
        assert!(!storage.temp_path().exists());
    }

    #[test]
    fn test_round_trip_preserves_category_order() {
        let dir = TempDir::new().unwrap();
        let storage = storage(&dir);
        let mut collection = CategorizedCollection::new();
        collection.insert(project("Notes", false)).unwrap();
        collection.insert(project("Compiler", true)).unwrap();
        collection.insert(project("Shell", true)).unwrap();
        storage.save(&collection).unwrap();

        let mut loaded = CategorizedCollection::new();
        let report = storage.load(&mut loaded);
        assert_eq!(
            report,
            LoadReport::Loaded {
                path: storage.display_path(),
                count: 3
            }
        );
        assert_eq!(loaded, collection);
    }

    #[test]
    fn test_malformed_record_is_skipped_and_reported() {
        let dir = TempDir::new().unwrap();
        let storage = storage(&dir);
        let good = serde_json::to_value(project("Compiler", true)).unwrap();
        let document = json!([good, { "type": "software", "projectName": 42 }, good]);
        fs::create_dir_all(storage.path().parent().unwrap()).unwrap();
        fs::write(storage.path(), document.to_string()).unwrap();

        let mut sink = CategorizedCollection::new();
        let report = storage.load(&mut sink);

        assert_eq!(sink.len(), 2);
        match &report {
            LoadReport::Partial { loaded, faulty, .. } => {
                assert_eq!(*loaded, 2);
                assert_eq!(faulty.len(), 1);
                assert_eq!(faulty[0].position, 2);
                assert!(faulty[0].raw.contains("\"projectName\": 42"));
            }
            other => panic!("expected partial load, got {:?}", other),
        }
        assert!(!report.is_success());
    }

    #[test]
    fn test_load_does_not_rewrite_corrupted_file() {
        let dir = TempDir::new().unwrap();
        let storage = storage(&dir);
        let document = json!([{ "type": "unknown" }]).to_string();
        fs::create_dir_all(storage.path().parent().unwrap()).unwrap();
        fs::write(storage.path(), &document).unwrap();

        let mut sink = CategorizedCollection::new();
        storage.load(&mut sink);
        assert_eq!(fs::read_to_string(storage.path()).unwrap(), document);
    }

    #[test]
    fn test_top_level_malformed_is_unreadable() {
        let dir = TempDir::new().unwrap();
        let storage = storage(&dir);
        fs::create_dir_all(storage.path().parent().unwrap()).unwrap();
        fs::write(storage.path(), "{ \"type\": \"software\" ").unwrap();

        let mut sink = CategorizedCollection::new();
        let report = storage.load(&mut sink);
        assert!(matches!(report, LoadReport::Unreadable { .. }));
        assert!(sink.is_empty());

        let result = report.into_result("project");
        assert_eq!(result.feedback().len(), 1);
        assert!(result.feedback()[0].starts_with("Unable to read file at"));
    }

    #[test]
    fn test_top_level_object_is_unreadable() {
        let dir = TempDir::new().unwrap();
        let storage = storage(&dir);
        fs::create_dir_all(storage.path().parent().unwrap()).unwrap();
        fs::write(storage.path(), "{}").unwrap();

        let mut sink = CategorizedCollection::new();
        assert!(matches!(
            storage.load(&mut sink),
            LoadReport::Unreadable { .. }
        ));
    }
}
