//! Output formatting infrastructure for CLI commands.

use colored::Colorize;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Table};
use serde::Serialize;

use crate::commands::{CommandResult, CommandType};

/// Output mode for CLI commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

impl OutputMode {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            OutputMode::Json
        } else {
            OutputMode::Human
        }
    }
}

/// Print a single item as pretty-printed JSON.
pub fn output_json<T: Serialize>(item: &T) {
    match serde_json::to_string_pretty(item) {
        Ok(json) => println!("{}", json),
        Err(e) => print_error(&format!("Failed to serialize to JSON: {}", e)),
    }
}

/// Print a formatted table with headers and rows.
pub fn print_table(headers: &[&str], rows: Vec<Vec<String>>) {
    if rows.is_empty() {
        println!("{}", "No results found.".dimmed());
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(headers);

    for row in rows {
        table.add_row(row);
    }

    println!("{table}");
}

/// Print a success message.
pub fn print_success(msg: &str) {
    println!("{} {}", "OK".green().bold(), msg);
}

/// Print an error message to stderr.
pub fn print_error(msg: &str) {
    eprintln!("{} {}", "Error:".red().bold(), msg);
}

/// Print a dimmed hint/suggestion message.
pub fn print_hint(msg: &str) {
    println!("{}", msg.dimmed());
}

#[derive(Serialize)]
struct ResultView<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    command_type: Option<CommandType>,
    #[serde(flatten)]
    result: &'a CommandResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    load_problems: Option<&'a [CommandResult]>,
}

impl<'a> ResultView<'a> {
    fn new(
        result: &'a CommandResult,
        command_type: Option<CommandType>,
        load_problems: &'a [CommandResult],
    ) -> Self {
        Self {
            command_type,
            result,
            load_problems: (!load_problems.is_empty()).then_some(load_problems),
        }
    }
}

/// Print a command result, preceded by any startup load problems.
///
/// In JSON mode everything is a single document on stdout.
pub fn print_outcome(
    result: &CommandResult,
    command_type: Option<CommandType>,
    load_problems: &[CommandResult],
    mode: OutputMode,
) {
    if mode == OutputMode::Json {
        output_json(&ResultView::new(result, command_type, load_problems));
        return;
    }
    for problem in load_problems {
        print_result(problem);
    }
    print_result(result);
}

/// Print a command result in human form.
///
/// Failures go to stderr with the first line flagged as the error; the
/// remaining lines (usage, hints) follow dimmed.
pub fn print_result(result: &CommandResult) {
    let mut lines = result.feedback().iter();
    let Some(first) = lines.next() else {
        return;
    };
    if result.is_successful() {
        print_success(first);
        for line in lines {
            println!("{}", line);
        }
    } else {
        print_error(first);
        for line in lines {
            eprintln!("{}", line.dimmed());
        }
    }
}
