//! Portfolio project commands.

use tracing::warn;

use super::{
    mutation_feedback, required_value, resolve_index, Command, CommandResult, CommandType,
    ParameterRules, Parameters,
};
use crate::init::AppContext;
use crate::models::{
    non_blank, Entity, GeneralProject, HardwareProject, Project, ProjectBase, SoftwareProject,
};
use crate::TrackerError;

const REQUIRED: &[&str] = &["name", "role", "description", "objectives", "duration"];
const SOFTWARE_OPTIONAL: &[&str] = &["languages", "framework"];
const HARDWARE_OPTIONAL: &[&str] = &["components"];
const GENERAL_OPTIONAL: &[&str] = &["department"];

fn unknown_category(category: &str) -> TrackerError {
    TrackerError::UnknownCategory {
        kind: Project::KIND,
        category: category.to_string(),
        expected: Project::CATEGORIES.iter().map(|c| c.to_string()).collect(),
    }
}

/// Adds a project to one of the project categories.
#[derive(Debug, Clone)]
pub struct AddProjectCommand {
    category: String,
    params: Parameters,
}

impl AddProjectCommand {
    pub const USAGE: &'static str = "add project software|hardware|general: Adds a project.\n    \
        Parameters: --set name=NAME --set role=ROLE --set description=TEXT \
        --set objectives=TEXT --set duration=DURATION \
        [--set languages=LANGS --set framework=FRAMEWORK | components=PARTS | department=DEPARTMENT]\n    \
        Example: project add software --set name=Tracker --set role=Lead \
        --set description=\"Internship tracker\" --set objectives=\"Ship v1\" --set duration=\"3 months\"";

    pub fn new(category: &str, params: Parameters) -> Self {
        Self {
            category: category.trim().to_lowercase(),
            params,
        }
    }

    fn build(&self) -> Result<Project, String> {
        let base = ProjectBase {
            project_name: required_value(&self.params, "name")?.to_string(),
            role: required_value(&self.params, "role")?.to_string(),
            description: required_value(&self.params, "description")?.to_string(),
            objectives: required_value(&self.params, "objectives")?.to_string(),
            duration: required_value(&self.params, "duration")?.to_string(),
        };

        let project = match self.category.as_str() {
            "software" => Project::Software(SoftwareProject {
                base,
                programming_languages: non_blank(self.params.get("languages")),
                framework: non_blank(self.params.get("framework")),
            }),
            "hardware" => Project::Hardware(HardwareProject {
                base,
                hardware_components: non_blank(self.params.get("components")),
            }),
            "general" => Project::General(GeneralProject {
                base,
                department: non_blank(self.params.get("department")),
            }),
            other => return Err(unknown_category(other).to_string()),
        };
        Ok(project)
    }
}

impl Command for AddProjectCommand {
    fn word(&self) -> &'static str {
        "add project"
    }

    fn usage(&self) -> &'static str {
        Self::USAGE
    }

    fn command_type(&self) -> CommandType {
        CommandType::User
    }

    fn rules(&self) -> ParameterRules {
        let optional = match self.category.as_str() {
            "hardware" => HARDWARE_OPTIONAL,
            "general" => GENERAL_OPTIONAL,
            _ => SOFTWARE_OPTIONAL,
        };
        ParameterRules {
            required: REQUIRED,
            optional,
        }
    }

    fn parameters(&self) -> &Parameters {
        &self.params
    }

    fn run(&self, ctx: &mut AppContext) -> CommandResult {
        let project = match self.build() {
            Ok(project) => project,
            Err(problem) => {
                return CommandResult::failure(vec![problem, self.usage().to_string()]);
            }
        };

        let description = project.describe();
        match ctx.projects.add(project) {
            Ok(()) => mutation_feedback(
                "Got it. I've added this project:",
                description,
                Project::KIND,
                ctx.projects.len(),
            ),
            Err(e) => {
                warn!("Add project failed: {}", e);
                CommandResult::from_error(&e)
            }
        }
    }
}

/// Deletes a project addressed by its global index.
#[derive(Debug, Clone)]
pub struct DeleteProjectCommand {
    params: Parameters,
}

impl DeleteProjectCommand {
    pub const USAGE: &'static str = "delete project: Deletes a project based on its index.\n    \
        Parameters: --index INDEX\n    \
        Example: project delete --index 1";

    pub fn new(params: Parameters) -> Self {
        Self { params }
    }
}

impl Command for DeleteProjectCommand {
    fn word(&self) -> &'static str {
        "delete project"
    }

    fn usage(&self) -> &'static str {
        Self::USAGE
    }

    fn command_type(&self) -> CommandType {
        CommandType::User
    }

    fn rules(&self) -> ParameterRules {
        ParameterRules {
            required: &["index"],
            optional: &[],
        }
    }

    fn parameters(&self) -> &Parameters {
        &self.params
    }

    fn run(&self, ctx: &mut AppContext) -> CommandResult {
        let (category, position) =
            match resolve_index(self.params.get("index"), ctx.projects.items()) {
                Ok(resolved) => resolved,
                Err(e) => return CommandResult::from_error(&e),
            };
        let Some(target) = ctx.projects.get(&category, position).cloned() else {
            return CommandResult::from_error(&TrackerError::IndexOutOfRange {
                index: (position + 1).to_string(),
                total: ctx.projects.len(),
            });
        };

        match ctx.projects.delete(&category, position) {
            Ok(_) => mutation_feedback(
                "Noted. I've removed this project:",
                target.describe(),
                Project::KIND,
                ctx.projects.len(),
            ),
            Err(e) => {
                let mut result = CommandResult::from_error(&e);
                result.push(format!("Removed from this session: {}", target.describe()));
                result
            }
        }
    }
}

/// Shows the projects of one category.
#[derive(Debug, Clone)]
pub struct ViewProjectsCommand {
    category: String,
    params: Parameters,
}

impl ViewProjectsCommand {
    pub const USAGE: &'static str = "view projects software|hardware|general: Shows projects of one category.\n    \
        Parameters: None\n    \
        Example: project view hardware";

    pub fn new(category: &str, params: Parameters) -> Self {
        Self {
            category: category.trim().to_lowercase(),
            params,
        }
    }
}

impl Command for ViewProjectsCommand {
    fn word(&self) -> &'static str {
        "view projects"
    }

    fn usage(&self) -> &'static str {
        Self::USAGE
    }

    fn command_type(&self) -> CommandType {
        CommandType::User
    }

    fn rules(&self) -> ParameterRules {
        ParameterRules::NONE
    }

    fn parameters(&self) -> &Parameters {
        &self.params
    }

    fn run(&self, ctx: &mut AppContext) -> CommandResult {
        let Some(projects) = ctx.projects.items().category(&self.category) else {
            return CommandResult::failure(vec![
                unknown_category(&self.category).to_string(),
                self.usage().to_string(),
            ]);
        };
        if projects.is_empty() {
            return CommandResult::success(vec![format!(
                "No {} projects recorded yet.",
                self.category
            )]);
        }

        let mut feedback = vec![format!("Here are your {} projects:", self.category)];
        feedback.extend(
            projects
                .iter()
                .enumerate()
                .map(|(i, p)| format!("{}. {}", i + 1, p.describe())),
        );
        CommandResult::success(feedback)
    }
}
