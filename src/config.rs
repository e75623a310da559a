//! Optional `config.toml` in the data directory.

use std::path::{Component, Path};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::TrackerError;

/// File name looked up inside the data directory.
pub const CONFIG_FILE: &str = "config.toml";

/// File names of the per-kind data files, relative to the data directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    pub internships_file: String,
    pub interviews_file: String,
    pub projects_file: String,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            internships_file: "internships.json".to_string(),
            interviews_file: "interviews.json".to_string(),
            projects_file: "projects.json".to_string(),
        }
    }
}

impl TrackerConfig {
    pub fn from_toml(contents: &str) -> Result<Self, TrackerError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Every kind must have its own, non-blank data file name.
    pub fn validate(&self) -> Result<(), TrackerError> {
        let files = [
            ("internships_file", &self.internships_file),
            ("interviews_file", &self.interviews_file),
            ("projects_file", &self.projects_file),
        ];
        for (i, (key, name)) in files.iter().enumerate() {
            if name.trim().is_empty() {
                return Err(TrackerError::Config(format!("{} cannot be empty", key)));
            }
            if let Some((other, _)) = files[..i]
                .iter()
                .find(|(_, earlier)| same_file(earlier, name))
            {
                return Err(TrackerError::Config(format!(
                    "{} and {} both point to '{}'",
                    other, key, name
                )));
            }
        }
        Ok(())
    }
}

fn same_file(a: &str, b: &str) -> bool {
    let normal = |name: &str| -> Vec<String> {
        Path::new(name.trim())
            .components()
            .filter(|c| matches!(c, Component::Normal(_)))
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect()
    };
    normal(a) == normal(b)
}

/// Load config with priority:
/// 1. `{data_path}/config.toml` file
/// 2. Defaults
///
/// An unreadable or unparseable file is logged and ignored.
pub fn load_config(data_path: &Path) -> TrackerConfig {
    let config_path = data_path.join(CONFIG_FILE);
    if !config_path.exists() {
        return TrackerConfig::default();
    }

    match std::fs::read_to_string(&config_path) {
        Ok(contents) => match TrackerConfig::from_toml(&contents) {
            Ok(config) => {
                info!("Loaded config from {}", config_path.display());
                config
            }
            Err(e) => {
                warn!(
                    "Failed to parse {}: {}. Using default.",
                    config_path.display(),
                    e
                );
                TrackerConfig::default()
            }
        },
        Err(e) => {
            warn!(
                "Failed to read {}: {}. Using default.",
                config_path.display(),
                e
            );
            TrackerConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        assert_eq!(load_config(dir.path()), TrackerConfig::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            "projects_file = \"portfolio.json\"\n",
        )
        .unwrap();

        let config = load_config(dir.path());
        assert_eq!(config.projects_file, "portfolio.json");
        assert_eq!(config.internships_file, "internships.json");
    }

    #[test]
    fn test_invalid_file_falls_back() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "projects_file = [").unwrap();
        assert_eq!(load_config(dir.path()), TrackerConfig::default());
    }

    #[test]
    fn test_shared_data_file_is_rejected() {
        let err = TrackerConfig::from_toml(
            "internships_file = \"d.json\"\ninterviews_file = \"./d.json\"\n",
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Configuration error: internships_file and interviews_file both point to './d.json'"
        );
    }

    #[test]
    fn test_shared_data_file_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            "projects_file = \"internships.json\"\n",
        )
        .unwrap();
        assert_eq!(load_config(dir.path()), TrackerConfig::default());
    }

    #[test]
    fn test_blank_file_name_is_rejected() {
        assert!(TrackerConfig::from_toml("projects_file = \"  \"").is_err());
    }

    #[test]
    fn test_from_toml_error_is_config_error() {
        let err = TrackerConfig::from_toml("internships_file = 3").unwrap_err();
        assert!(matches!(err, TrackerError::Config(_)));
    }
}
