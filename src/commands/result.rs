use serde::Serialize;

use crate::TrackerError;

/// Outcome of one command: ordered feedback lines and a success flag.
///
/// Failures are ordinary values; nothing a command does escapes as a panic
/// or error past this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandResult {
    feedback: Vec<String>,
    successful: bool,
}

impl CommandResult {
    pub fn success(feedback: Vec<String>) -> Self {
        Self {
            feedback,
            successful: true,
        }
    }

    pub fn failure(feedback: Vec<String>) -> Self {
        Self {
            feedback,
            successful: false,
        }
    }

    /// Failed result describing `err`.
    ///
    /// Persistence failures add a line explaining that the in-memory change
    /// was kept and where the data file lives.
    pub fn from_error(err: &TrackerError) -> Self {
        let mut feedback = vec![err.to_string()];
        if err.is_persistence_failure() {
            feedback.push(
                "The change was applied for this session but could not be saved to disk."
                    .to_string(),
            );
            if let Some(path) = err.path() {
                feedback.push(format!("Check that {} is writable.", path.display()));
            }
        }
        Self::failure(feedback)
    }

    pub fn push(&mut self, line: impl Into<String>) {
        self.feedback.push(line.into());
    }

    pub fn feedback(&self) -> &[String] {
        &self.feedback
    }

    pub fn is_successful(&self) -> bool {
        self.successful
    }

    pub fn into_feedback(self) -> Vec<String> {
        self.feedback
    }
}
