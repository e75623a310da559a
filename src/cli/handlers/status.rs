//! Status: how each data file loaded at startup.

use serde::Serialize;

use crate::cli::output::{output_json, print_hint, print_result, print_table, OutputMode};
use crate::init::AppContext;
use crate::storage::LoadReport;

#[derive(Serialize)]
struct FileStatus<'a> {
    kind: &'a str,
    entries: usize,
    #[serde(flatten)]
    report: &'a LoadReport,
}

fn outcome_label(report: &LoadReport) -> String {
    match report {
        LoadReport::FirstRun { .. } => "new".to_string(),
        LoadReport::Loaded { .. } => "ok".to_string(),
        LoadReport::Partial { faulty, .. } => format!("partial ({} skipped)", faulty.len()),
        LoadReport::Unreadable { .. } => "unreadable".to_string(),
    }
}

/// Print the startup load outcome for every kind.
///
/// Returns false when any file did not load cleanly.
pub fn handle_status(ctx: &AppContext, mode: OutputMode) -> bool {
    let entries = |kind: &str| match kind {
        "internship" => ctx.internships.len(),
        "interview" => ctx.interviews.len(),
        _ => ctx.projects.len(),
    };

    match mode {
        OutputMode::Json => {
            let statuses: Vec<FileStatus> = ctx
                .startup
                .iter()
                .map(|load| FileStatus {
                    kind: load.kind,
                    entries: entries(load.kind),
                    report: &load.report,
                })
                .collect();
            output_json(&statuses);
        }
        OutputMode::Human => {
            let rows = ctx
                .startup
                .iter()
                .map(|load| {
                    vec![
                        load.kind.to_string(),
                        entries(load.kind).to_string(),
                        outcome_label(&load.report),
                        load.report.path().display().to_string(),
                    ]
                })
                .collect();
            print_table(&["Kind", "Entries", "Outcome", "File"], rows);
            for problem in ctx.load_problems() {
                print_result(&problem.to_result());
            }
            print_hint(&format!("Data directory: {}", ctx.data_path().display()));
        }
    }

    ctx.load_problems().next().is_none()
}
