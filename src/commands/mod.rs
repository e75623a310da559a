//! Validated units of work over the entity stores.
//!
//! Each operation is its own type implementing [`Command`]. A command is
//! built fresh for every invocation from its [`Parameters`], validates them,
//! performs at most one store mutation and reports a [`CommandResult`].

pub mod internship;
pub mod interview;
pub mod project;
pub mod resolve;
pub mod result;

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use tracing::{debug, warn};

use crate::init::AppContext;
use crate::TrackerError;

pub use internship::{AddInternshipCommand, DeleteInternshipCommand, ListInternshipsCommand};
pub use interview::{AddInterviewCommand, DeleteInterviewCommand, ListInterviewsCommand};
pub use project::{AddProjectCommand, DeleteProjectCommand, ViewProjectsCommand};
pub use resolve::resolve_index;
pub use result::CommandResult;

/// Routing tag for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandType {
    Internship,
    Interview,
    User,
}

impl fmt::Display for CommandType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CommandType::Internship => "internship",
            CommandType::Interview => "interview",
            CommandType::User => "user",
        };
        f.write_str(name)
    }
}

/// Flag name to value mapping supplied with one invocation.
///
/// Keys are unique; a leading `/` or `-` on a flag name is ignored so
/// `/index`, `--index` and `index` address the same flag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parameters(BTreeMap<String, String>);

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from key/value pairs, rejecting repeated keys.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, TrackerError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut map = BTreeMap::new();
        for (key, value) in pairs {
            let key = normalize_flag(key.as_ref());
            if map.contains_key(&key) {
                return Err(TrackerError::DuplicateParameter(key));
            }
            map.insert(key, value.into());
        }
        Ok(Self(map))
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn normalize_flag(key: &str) -> String {
    key.trim().trim_start_matches(['/', '-']).to_string()
}

/// Flags a command requires and the extra flags it tolerates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParameterRules {
    pub required: &'static [&'static str],
    pub optional: &'static [&'static str],
}

impl ParameterRules {
    pub const NONE: ParameterRules = ParameterRules {
        required: &[],
        optional: &[],
    };

    /// Check that every required flag is present and no unknown flag is.
    pub fn check(&self, params: &Parameters) -> Result<(), String> {
        let missing: Vec<&str> = self
            .required
            .iter()
            .copied()
            .filter(|flag| !params.contains_key(flag))
            .collect();
        if !missing.is_empty() {
            return Err(format!("Missing required flag(s): {}", missing.join(", ")));
        }

        let unknown: Vec<&str> = params
            .keys()
            .filter(|key| {
                !self
                    .required
                    .iter()
                    .chain(self.optional.iter())
                    .any(|flag| flag == key)
            })
            .collect();
        if !unknown.is_empty() {
            return Err(format!("Unrecognised flag(s): {}", unknown.join(", ")));
        }
        Ok(())
    }
}

/// A named, parameter-validated operation.
pub trait Command {
    /// Command word as typed by the user, e.g. `"delete project"`.
    fn word(&self) -> &'static str;

    /// Usage text shown when parameters are invalid.
    fn usage(&self) -> &'static str;

    fn command_type(&self) -> CommandType;

    fn rules(&self) -> ParameterRules;

    fn parameters(&self) -> &Parameters;

    /// Perform the operation. Only called with valid parameters.
    fn run(&self, ctx: &mut AppContext) -> CommandResult;

    fn is_valid_parameters(&self) -> bool {
        self.rules().check(self.parameters()).is_ok()
    }

    /// Validate, then run.
    fn execute(&self, ctx: &mut AppContext) -> CommandResult {
        debug!("Executing '{}' with {:?}", self.word(), self.parameters());
        if let Err(problem) = self.rules().check(self.parameters()) {
            warn!("Rejected '{}': {}", self.word(), problem);
            return CommandResult::failure(vec![problem, self.usage().to_string()]);
        }
        let result = self.run(ctx);
        debug!(
            "Finished '{}' (successful: {})",
            self.word(),
            result.is_successful()
        );
        result
    }
}

/// Trimmed, non-empty value of a required flag.
///
/// Blank values count as missing.
pub(crate) fn required_value<'a>(params: &'a Parameters, flag: &str) -> Result<&'a str, String> {
    params
        .get(flag)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| format!("The {} flag cannot be empty.", flag))
}

/// Feedback for a successful mutation.
pub(crate) fn mutation_feedback(
    headline: &str,
    description: String,
    kind: &str,
    total: usize,
) -> CommandResult {
    CommandResult::success(vec![
        headline.to_string(),
        format!("  {}", description),
        format!("Now you have {} {} entries.", total, kind),
    ])
}
