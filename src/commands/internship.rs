//! Internship commands.

use tracing::{info, warn};

use super::{
    mutation_feedback, required_value, resolve_index, Command, CommandResult, CommandType,
    ParameterRules, Parameters,
};
use crate::init::AppContext;
use crate::models::{non_blank, Entity, Internship, InternshipDetails};
use crate::TrackerError;

const SOFTWARE_OPTIONAL: &[&str] = &["deadline", "pay", "description", "status", "tech"];
const HARDWARE_OPTIONAL: &[&str] = &["deadline", "pay", "description", "status", "embedded"];
const GENERAL_OPTIONAL: &[&str] = &["deadline", "pay", "description", "status", "department"];

/// Adds an internship to one of the internship categories.
#[derive(Debug, Clone)]
pub struct AddInternshipCommand {
    category: String,
    params: Parameters,
}

impl AddInternshipCommand {
    pub const USAGE: &'static str = "add software|hardware|general: Adds an internship.\n    \
        Parameters: --set company=COMPANY --set role=ROLE [--set deadline=DEADLINE] \
        [--set pay=PAY] [--set description=TEXT] [--set status=STATUS] \
        [--set tech=STACK | embedded=SYSTEMS | department=DEPARTMENT]\n    \
        Example: add software --set company=Google --set role=\"SWE Intern\" --set tech=Go";

    pub fn new(category: &str, params: Parameters) -> Self {
        Self {
            category: category.trim().to_lowercase(),
            params,
        }
    }

    fn build(&self) -> Result<Internship, String> {
        let company = required_value(&self.params, "company")?;
        let role = required_value(&self.params, "role")?;
        let details = match self.category.as_str() {
            "software" => InternshipDetails::Software {
                tech_stack: non_blank(self.params.get("tech")),
            },
            "hardware" => InternshipDetails::Hardware {
                embedded_systems: non_blank(self.params.get("embedded")),
            },
            "general" => InternshipDetails::General {
                department: non_blank(self.params.get("department")),
            },
            other => {
                return Err(TrackerError::UnknownCategory {
                    kind: Internship::KIND,
                    category: other.to_string(),
                    expected: Internship::CATEGORIES.iter().map(|c| c.to_string()).collect(),
                }
                .to_string())
            }
        };

        let mut internship = Internship::new(company, role, details);
        internship.deadline = non_blank(self.params.get("deadline"));
        internship.pay = non_blank(self.params.get("pay"));
        internship.description = non_blank(self.params.get("description"));
        if let Some(status) = non_blank(self.params.get("status")) {
            internship.status = status;
        }
        Ok(internship)
    }
}

impl Command for AddInternshipCommand {
    fn word(&self) -> &'static str {
        "add"
    }

    fn usage(&self) -> &'static str {
        Self::USAGE
    }

    fn command_type(&self) -> CommandType {
        CommandType::Internship
    }

    fn rules(&self) -> ParameterRules {
        let optional = match self.category.as_str() {
            "hardware" => HARDWARE_OPTIONAL,
            "general" => GENERAL_OPTIONAL,
            _ => SOFTWARE_OPTIONAL,
        };
        ParameterRules {
            required: &["company", "role"],
            optional,
        }
    }

    fn parameters(&self) -> &Parameters {
        &self.params
    }

    fn run(&self, ctx: &mut AppContext) -> CommandResult {
        let internship = match self.build() {
            Ok(internship) => internship,
            Err(problem) => {
                return CommandResult::failure(vec![problem, self.usage().to_string()]);
            }
        };

        let description = internship.describe();
        match ctx.internships.add(internship) {
            Ok(()) => {
                info!("Internship added");
                mutation_feedback(
                    "Got it. I've added this internship:",
                    description,
                    Internship::KIND,
                    ctx.internships.len(),
                )
            }
            Err(e) => {
                warn!("Add internship failed: {}", e);
                CommandResult::from_error(&e)
            }
        }
    }
}

/// Deletes an internship addressed by its global index.
#[derive(Debug, Clone)]
pub struct DeleteInternshipCommand {
    params: Parameters,
}

impl DeleteInternshipCommand {
    pub const USAGE: &'static str = "delete: Deletes an internship based on its index in the list.\n    \
        Parameters: --index INDEX\n    \
        Example: delete --index 2";

    pub fn new(params: Parameters) -> Self {
        Self { params }
    }
}

impl Command for DeleteInternshipCommand {
    fn word(&self) -> &'static str {
        "delete"
    }

    fn usage(&self) -> &'static str {
        Self::USAGE
    }

    fn command_type(&self) -> CommandType {
        CommandType::Internship
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
            match resolve_index(self.params.get("index"), ctx.internships.items()) {
                Ok(resolved) => resolved,
                Err(e) => {
                    warn!("Invalid internship index: {}", e);
                    return CommandResult::from_error(&e);
                }
            };

        let Some(target) = ctx.internships.get(&category, position).cloned() else {
            return CommandResult::from_error(&TrackerError::IndexOutOfRange {
                index: (position + 1).to_string(),
                total: ctx.internships.len(),
            });
        };

        match ctx.internships.delete(&category, position) {
            Ok(_) => mutation_feedback(
                "Noted. I've removed this internship:",
                target.describe(),
                Internship::KIND,
                ctx.internships.len(),
            ),
            Err(e) => {
                let mut result = CommandResult::from_error(&e);
                result.push(format!("Removed from this session: {}", target.describe()));
                result
            }
        }
    }
}

/// Lists every internship numbered by global index.
#[derive(Debug, Clone, Default)]
pub struct ListInternshipsCommand {
    params: Parameters,
}

impl ListInternshipsCommand {
    pub const USAGE: &'static str = "list: Lists all internships grouped by category.\n    \
        Parameters: None\n    \
        Example: list";

    pub fn new(params: Parameters) -> Self {
        Self { params }
    }
}

impl Command for ListInternshipsCommand {
    fn word(&self) -> &'static str {
        "list"
    }

    fn usage(&self) -> &'static str {
        Self::USAGE
    }

    fn command_type(&self) -> CommandType {
        CommandType::Internship
    }

    fn rules(&self) -> ParameterRules {
        ParameterRules::NONE
    }

    fn parameters(&self) -> &Parameters {
        &self.params
    }

    fn run(&self, ctx: &mut AppContext) -> CommandResult {
        let items = ctx.internships.items();
        if items.is_empty() {
            return CommandResult::success(vec!["You have no internships yet.".to_string()]);
        }

        let mut feedback = vec!["Here are your internships:".to_string()];
        let mut ordinal = 0;
        for (category, internships) in items.categories() {
            if internships.is_empty() {
                continue;
            }
            feedback.push(format!("{} internships:", capitalize(category)));
            for internship in internships {
                ordinal += 1;
                feedback.push(format!("{}. {}", ordinal, internship.describe()));
            }
        }
        CommandResult::success(feedback)
    }
}

pub(crate) fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
