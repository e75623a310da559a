//! CLI interface for InternSprint.

pub mod handlers;
pub mod output;

use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

use crate::commands::{
    AddInternshipCommand, AddInterviewCommand, AddProjectCommand, Command, CommandResult,
    DeleteInternshipCommand, DeleteInterviewCommand, DeleteProjectCommand, ListInternshipsCommand,
    ListInterviewsCommand, Parameters, ViewProjectsCommand,
};
use crate::init::AppContext;
use output::{print_outcome, OutputMode};

/// InternSprint - track internship applications, interviews and projects
#[derive(Parser)]
#[command(name = "internsprint", version, about, long_about = None)]
pub struct Cli {
    /// Override data directory (default: ./data if present, else ~/.internsprint)
    #[arg(long, env = "INTERNSPRINT_DATA_PATH", global = true)]
    pub data_path: Option<PathBuf>,

    /// Output as JSON instead of human-readable format
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add an internship (software, hardware or general)
    Add {
        /// Internship category
        category: String,
        /// Set a field (key=value, repeatable)
        #[arg(long, value_parser = parse_key_val, action = clap::ArgAction::Append)]
        set: Vec<(String, String)>,
    },

    /// Delete an internship by its number in `list`
    Delete {
        #[arg(long)]
        index: Option<String>,
    },

    /// List all internships grouped by category
    List,

    /// Schedule an interview for an internship
    Interview {
        /// Internship number in `list`
        #[arg(long)]
        index: Option<String>,
        /// Set a field (key=value, repeatable)
        #[arg(long, value_parser = parse_key_val, action = clap::ArgAction::Append)]
        set: Vec<(String, String)>,
    },

    /// Delete an interview by its number in `interviews`
    DeleteInterview {
        #[arg(long)]
        index: Option<String>,
    },

    /// List all interviews grouped by type
    Interviews,

    /// Portfolio projects
    #[command(subcommand)]
    Project(ProjectCommands),

    /// Show how each data file loaded
    Status,

    /// Generate shell completions
    Completions {
        /// Shell type (bash, zsh, fish, elvish, powershell)
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand)]
pub enum ProjectCommands {
    /// Add a project (software, hardware or general)
    Add {
        category: String,
        #[arg(long, value_parser = parse_key_val, action = clap::ArgAction::Append)]
        set: Vec<(String, String)>,
    },
    /// Delete a project by its global number
    Delete {
        #[arg(long)]
        index: Option<String>,
    },
    /// Show the projects of one category
    View { category: String },
}

/// Parse key=value pairs for --set flag
fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let pos = s
        .find('=')
        .ok_or_else(|| format!("invalid key=value: no '=' found in '{}'", s))?;
    Ok((s[..pos].to_string(), s[pos + 1..].to_string()))
}

fn with_index(
    index: &Option<String>,
    set: &[(String, String)],
) -> Result<Parameters, crate::TrackerError> {
    Parameters::from_pairs(
        index
            .iter()
            .map(|i| ("index".to_string(), i.clone()))
            .chain(set.iter().cloned()),
    )
}

/// Translate a parsed subcommand into a tracker command.
///
/// Returns `Ok(None)` for subcommands that are not tracker commands
/// (`status`, `completions`).
pub fn build_command(command: &Commands) -> Result<Option<Box<dyn Command>>, crate::TrackerError> {
    let built: Box<dyn Command> = match command {
        Commands::Add { category, set } => Box::new(AddInternshipCommand::new(
            category,
            Parameters::from_pairs(set.iter().cloned())?,
        )),
        Commands::Delete { index } => Box::new(DeleteInternshipCommand::new(with_index(index, &[])?)),
        Commands::List => Box::new(ListInternshipsCommand::default()),
        Commands::Interview { index, set } => {
            Box::new(AddInterviewCommand::new(with_index(index, set)?))
        }
        Commands::DeleteInterview { index } => {
            Box::new(DeleteInterviewCommand::new(with_index(index, &[])?))
        }
        Commands::Interviews => Box::new(ListInterviewsCommand::default()),
        Commands::Project(ProjectCommands::Add { category, set }) => Box::new(
            AddProjectCommand::new(category, Parameters::from_pairs(set.iter().cloned())?),
        ),
        Commands::Project(ProjectCommands::Delete { index }) => {
            Box::new(DeleteProjectCommand::new(with_index(index, &[])?))
        }
        Commands::Project(ProjectCommands::View { category }) => {
            Box::new(ViewProjectsCommand::new(category, Parameters::new()))
        }
        Commands::Status | Commands::Completions { .. } => return Ok(None),
    };
    Ok(Some(built))
}

/// Write shell completions to stdout. Needs no data directory.
pub fn print_completions(shell: clap_complete::Shell) {
    clap_complete::generate(shell, &mut Cli::command(), "internsprint", &mut std::io::stdout());
}

/// Execute a CLI command and print its outcome.
///
/// Returns whether the command succeeded.
pub fn execute(command: &Commands, ctx: &mut AppContext, mode: OutputMode) -> bool {
    match command {
        Commands::Status => handlers::status::handle_status(ctx, mode),
        Commands::Completions { shell } => {
            print_completions(*shell);
            true
        }
        cmd => {
            let load_problems: Vec<CommandResult> =
                ctx.load_problems().map(|p| p.to_result()).collect();
            let (result, command_type) = match build_command(cmd) {
                Ok(Some(built)) => (built.execute(ctx), Some(built.command_type())),
                Ok(None) => return true,
                Err(e) => (CommandResult::from_error(&e), None),
            };
            print_outcome(&result, command_type, &load_problems, mode);
            result.is_successful()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::CommandType;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_key_val_splits_on_first_equals() {
        assert_eq!(
            parse_key_val("notes=a=b").unwrap(),
            ("notes".to_string(), "a=b".to_string())
        );
        assert!(parse_key_val("company").is_err());
    }

    #[test]
    fn test_interview_builds_with_index_and_fields() {
        let cli = Cli::try_parse_from([
            "internsprint",
            "interview",
            "--index",
            "2",
            "--set",
            "date=2025-04-01",
        ])
        .unwrap();
        let built = build_command(&cli.command).unwrap().unwrap();
        assert_eq!(built.word(), "interview for");
        assert_eq!(built.command_type(), CommandType::Interview);
        assert_eq!(built.parameters().get("index"), Some("2"));
        assert_eq!(built.parameters().get("date"), Some("2025-04-01"));
    }

    #[test]
    fn test_index_in_set_collides_with_index_flag() {
        let cli = Cli::try_parse_from([
            "internsprint",
            "interview",
            "--index",
            "1",
            "--set",
            "index=2",
        ])
        .unwrap();
        assert!(matches!(
            build_command(&cli.command),
            Err(crate::TrackerError::DuplicateParameter(_))
        ));
    }

    #[test]
    fn test_project_view_builds_user_command() {
        let cli = Cli::try_parse_from(["internsprint", "project", "view", "hardware"]).unwrap();
        let built = build_command(&cli.command).unwrap().unwrap();
        assert_eq!(built.word(), "view projects");
        assert_eq!(built.command_type(), CommandType::User);
    }

    #[test]
    fn test_status_is_not_a_tracker_command() {
        let cli = Cli::try_parse_from(["internsprint", "status"]).unwrap();
        assert!(build_command(&cli.command).unwrap().is_none());
    }
}
