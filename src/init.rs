//! Application context: data directory, configuration and the loaded stores.

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::commands::CommandResult;
use crate::config::{load_config, TrackerConfig};
use crate::models::{Entity, Internship, Interview, Project};
use crate::repository::EntityStore;
use crate::storage::{JsonFileStorage, LoadReport};

/// Environment variable overriding the data directory.
pub const DATA_PATH_ENV: &str = "INTERNSPRINT_DATA_PATH";

/// Load outcome for one entity kind at startup.
#[derive(Debug, Clone)]
pub struct StartupLoad {
    pub kind: &'static str,
    pub report: LoadReport,
}

impl StartupLoad {
    pub fn to_result(&self) -> CommandResult {
        self.report.clone().into_result(self.kind)
    }
}

/// Everything a command can touch.
pub struct AppContext {
    pub data_path: PathBuf,
    pub config: TrackerConfig,
    pub internships: EntityStore<Internship>,
    pub interviews: EntityStore<Interview>,
    pub projects: EntityStore<Project>,
    pub startup: Vec<StartupLoad>,
}

impl AppContext {
    /// Initialize application context.
    ///
    /// Data path priority: explicit path > INTERNSPRINT_DATA_PATH env > ./data (if exists) > ~/.internsprint
    pub fn new(explicit_path: Option<PathBuf>) -> Result<Self> {
        let data_path = match explicit_path
            .or_else(|| std::env::var(DATA_PATH_ENV).ok().map(PathBuf::from))
        {
            Some(path) => path,
            None => {
                let local_path = std::env::current_dir()?.join("data");
                if local_path.is_dir() {
                    local_path
                } else {
                    dirs::home_dir()
                        .map(|h| h.join(".internsprint"))
                        .unwrap_or_else(|| PathBuf::from("data"))
                }
            }
        };

        tracing::info!("Using data path: {}", data_path.display());
        Ok(Self::open(data_path))
    }

    /// Build the stores under `data_path` and load every data file.
    pub fn open(data_path: impl Into<PathBuf>) -> Self {
        let data_path = data_path.into();
        let config = load_config(&data_path);

        let mut ctx = Self {
            internships: EntityStore::new(JsonFileStorage::new(
                data_path.join(&config.internships_file),
            )),
            interviews: EntityStore::new(JsonFileStorage::new(
                data_path.join(&config.interviews_file),
            )),
            projects: EntityStore::new(JsonFileStorage::new(
                data_path.join(&config.projects_file),
            )),
            data_path,
            config,
            startup: Vec::new(),
        };

        let internships = ctx.internships.load();
        let interviews = ctx.interviews.load();
        let projects = ctx.projects.load();
        ctx.startup = vec![
            StartupLoad {
                kind: Internship::KIND,
                report: internships,
            },
            StartupLoad {
                kind: Interview::KIND,
                report: interviews,
            },
            StartupLoad {
                kind: Project::KIND,
                report: projects,
            },
        ];

        for load in ctx.startup.iter().filter(|l| !l.report.is_success()) {
            tracing::warn!(
                "{} data at {} did not load cleanly",
                load.kind,
                load.report.path().display()
            );
        }
        ctx
    }

    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    /// Startup loads that need the user's attention.
    pub fn load_problems(&self) -> impl Iterator<Item = &StartupLoad> {
        self.startup.iter().filter(|l| !l.report.is_success())
    }
}
