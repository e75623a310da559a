//! InternSprint - internship application tracker
//!
//! Usage:
//!   internsprint add software --set company=Google --set role="SWE Intern"
//!   internsprint list                      List internships by category
//!   internsprint interview --index 1 ...   Schedule an interview
//!   internsprint project view hardware     Show hardware projects
//!   internsprint status                    How each data file loaded
//!   internsprint --help                    Show all commands

use anyhow::Result;
use clap::Parser;

use internsprint::cli::output::OutputMode;
use internsprint::cli::{Cli, Commands};
use internsprint::init::AppContext;

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("internsprint=warn".parse()?),
        )
        .init();

    let mode = OutputMode::from_json_flag(cli.json);

    if let Commands::Completions { shell } = &cli.command {
        internsprint::cli::print_completions(*shell);
        return Ok(());
    }

    let mut ctx = AppContext::new(cli.data_path.clone())?;
    let succeeded = internsprint::cli::execute(&cli.command, &mut ctx, mode);

    if !succeeded {
        std::process::exit(1);
    }
    Ok(())
}
