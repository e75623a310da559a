//! Interview commands.

use chrono::{NaiveDate, NaiveTime};
use tracing::warn;

use super::internship::capitalize;
use super::{
    mutation_feedback, required_value, resolve_index, Command, CommandResult, CommandType,
    ParameterRules, Parameters,
};
use crate::init::AppContext;
use crate::models::interview::{DATE_FORMAT, TIME_FORMAT};
use crate::models::{non_blank, Entity, Interview};
use crate::TrackerError;

/// Schedules an interview for the internship at a global index.
#[derive(Debug, Clone)]
pub struct AddInterviewCommand {
    params: Parameters,
}

impl AddInterviewCommand {
    pub const USAGE: &'static str = "interview for: Adds an interview to an internship.\n    \
        Parameters: --index INTERNSHIP_INDEX --set date=YYYY-MM-DD --set start=HH:MM \
        --set end=HH:MM --set type=technical|behavioural|general \
        [--set email=EMAIL] [--set notes=NOTES]\n    \
        Example: interview --index 1 --set date=2025-04-01 --set start=10:00 \
        --set end=11:00 --set type=technical";

    pub fn new(params: Parameters) -> Self {
        Self { params }
    }

    fn schedule(&self) -> Result<(NaiveDate, NaiveTime, NaiveTime), String> {
        let date = required_value(&self.params, "date")?;
        let date = NaiveDate::parse_from_str(date, DATE_FORMAT)
            .map_err(|_| format!("Invalid date '{}'. Use the format YYYY-MM-DD.", date))?;

        let parse_time = |flag: &str| -> Result<NaiveTime, String> {
            let raw = required_value(&self.params, flag)?;
            NaiveTime::parse_from_str(raw, TIME_FORMAT)
                .map_err(|_| format!("Invalid {} time '{}'. Use the format HH:MM.", flag, raw))
        };
        let start = parse_time("start")?;
        let end = parse_time("end")?;
        if end <= start {
            return Err("The interview must end after it starts.".to_string());
        }
        Ok((date, start, end))
    }
}

impl Command for AddInterviewCommand {
    fn word(&self) -> &'static str {
        "interview for"
    }

    fn usage(&self) -> &'static str {
        Self::USAGE
    }

    fn command_type(&self) -> CommandType {
        CommandType::Interview
    }

    fn rules(&self) -> ParameterRules {
        ParameterRules {
            required: &["index", "date", "start", "end", "type"],
            optional: &["email", "notes"],
        }
    }

    fn parameters(&self) -> &Parameters {
        &self.params
    }

    fn run(&self, ctx: &mut AppContext) -> CommandResult {
        let (category, position) =
            match resolve_index(self.params.get("index"), ctx.internships.items()) {
                Ok(resolved) => resolved,
                Err(e) => return CommandResult::from_error(&e),
            };
        let (date, start_time, end_time) = match self.schedule() {
            Ok(schedule) => schedule,
            Err(problem) => {
                return CommandResult::failure(vec![problem, self.usage().to_string()]);
            }
        };
        let interview_type = match required_value(&self.params, "type") {
            Ok(t) => t.to_lowercase(),
            Err(problem) => return CommandResult::failure(vec![problem]),
        };

        let Some(internship) = ctx.internships.get(&category, position) else {
            return CommandResult::failure(vec!["The internship could not be found.".into()]);
        };
        let interview = Interview {
            category: interview_type,
            company_name: internship.company_name.clone(),
            role: internship.role.clone(),
            date,
            start_time,
            end_time,
            email: non_blank(self.params.get("email")),
            notes: non_blank(self.params.get("notes")),
        };

        let description = interview.describe();
        match ctx.interviews.add(interview) {
            Ok(()) => mutation_feedback(
                "Got it. I've scheduled this interview:",
                description,
                Interview::KIND,
                ctx.interviews.len(),
            ),
            Err(e) => {
                warn!("Add interview failed: {}", e);
                CommandResult::from_error(&e)
            }
        }
    }
}

/// Deletes an interview addressed by its global index.
#[derive(Debug, Clone)]
pub struct DeleteInterviewCommand {
    params: Parameters,
}

impl DeleteInterviewCommand {
    pub const USAGE: &'static str = "delete interview: Deletes an interview based on its index.\n    \
        Parameters: --index INDEX\n    \
        Example: delete-interview --index 1";

    pub fn new(params: Parameters) -> Self {
        Self { params }
    }
}

impl Command for DeleteInterviewCommand {
    fn word(&self) -> &'static str {
        "delete interview"
    }

    fn usage(&self) -> &'static str {
        Self::USAGE
    }

    fn command_type(&self) -> CommandType {
        CommandType::Interview
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
            match resolve_index(self.params.get("index"), ctx.interviews.items()) {
                Ok(resolved) => resolved,
                Err(e) => return CommandResult::from_error(&e),
            };
        let Some(target) = ctx.interviews.get(&category, position).cloned() else {
            return CommandResult::from_error(&TrackerError::IndexOutOfRange {
                index: (position + 1).to_string(),
                total: ctx.interviews.len(),
            });
        };

        match ctx.interviews.delete(&category, position) {
            Ok(_) => mutation_feedback(
                "Noted. I've removed this interview:",
                target.describe(),
                Interview::KIND,
                ctx.interviews.len(),
            ),
            Err(e) => {
                let mut result = CommandResult::from_error(&e);
                result.push(format!("Removed from this session: {}", target.describe()));
                result
            }
        }
    }
}

/// Lists every interview numbered by global index.
#[derive(Debug, Clone, Default)]
pub struct ListInterviewsCommand {
    params: Parameters,
}

impl ListInterviewsCommand {
    pub const USAGE: &'static str = "list interviews: Lists all interviews by type.\n    \
        Parameters: None\n    \
        Example: interviews";

    pub fn new(params: Parameters) -> Self {
        Self { params }
    }
}

impl Command for ListInterviewsCommand {
    fn word(&self) -> &'static str {
        "list interviews"
    }

    fn usage(&self) -> &'static str {
        Self::USAGE
    }

    fn command_type(&self) -> CommandType {
        CommandType::Interview
    }

    fn rules(&self) -> ParameterRules {
        ParameterRules::NONE
    }

    fn parameters(&self) -> &Parameters {
        &self.params
    }

    fn run(&self, ctx: &mut AppContext) -> CommandResult {
        let items = ctx.interviews.items();
        if items.is_empty() {
            return CommandResult::success(vec!["You have no interviews scheduled.".to_string()]);
        }

        let mut feedback = vec!["Here are your interviews:".to_string()];
        let mut ordinal = 0;
        for (category, interviews) in items.categories() {
            if interviews.is_empty() {
                continue;
            }
            feedback.push(format!("{} interviews:", capitalize(category)));
            for interview in interviews {
                ordinal += 1;
                feedback.push(format!("{}. {}", ordinal, interview.describe()));
            }
        }
        CommandResult::success(feedback)
    }
}
