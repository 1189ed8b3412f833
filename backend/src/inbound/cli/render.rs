//! Presentation of command results and failures.

use std::fmt::Write as _;

use serde_json::json;

use super::args::OutputFormat;
use super::commands::CommandOutput;
use crate::domain::{DomainError, ErrorCode, Task};

/// Exit status for a `show` that found nothing; distinct from every failure.
pub const MISSING_EXIT_CODE: u8 = 6;

/// Process exit status for a failure code.
#[must_use]
pub const fn exit_code_for(code: ErrorCode) -> u8 {
    match code {
        ErrorCode::UnknownError => 1,
        ErrorCode::ValidationError => 2,
        ErrorCode::NotFound => 3,
        ErrorCode::Unauthorized => 4,
        ErrorCode::NetworkError => 5,
    }
}

/// Render a successful command result.
///
/// # Errors
///
/// Returns an error when JSON serialisation fails.
pub fn render_output(
    output: &CommandOutput,
    format: OutputFormat,
) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Json => render_json(output),
        OutputFormat::Table => Ok(render_table(output)),
    }
}

/// Render a failure as `CODE: message`, or as the error payload in JSON mode.
#[must_use]
pub fn render_error(error: &DomainError, format: OutputFormat) -> String {
    match format {
        OutputFormat::Table => format!("{}: {}", error.code(), error.message()),
        OutputFormat::Json => serde_json::to_string_pretty(&json!({ "error": error }))
            .unwrap_or_else(|_| format!("{}: {}", error.code(), error.message())),
    }
}

fn render_json(output: &CommandOutput) -> Result<String, serde_json::Error> {
    match output {
        CommandOutput::Tasks(tasks) => serde_json::to_string_pretty(tasks),
        CommandOutput::Task(task) => serde_json::to_string_pretty(task),
        CommandOutput::Deleted(task) => {
            serde_json::to_string_pretty(&json!({ "deleted": task }))
        }
        CommandOutput::Missing(id) => serde_json::to_string_pretty(&json!({
            "error": { "code": ErrorCode::NotFound, "message": "not found", "id": id },
        })),
    }
}

fn render_table(output: &CommandOutput) -> String {
    match output {
        CommandOutput::Tasks(tasks) if tasks.is_empty() => "no tasks".to_owned(),
        CommandOutput::Tasks(tasks) => {
            let mut rendered = String::new();
            for task in tasks {
                push_task_line(&mut rendered, task);
            }
            rendered.trim_end().to_owned()
        }
        CommandOutput::Task(task) => task_details(task),
        CommandOutput::Deleted(task) => format!("deleted {} ({})", task.id, task.title),
        CommandOutput::Missing(id) => format!("task {id} not found"),
    }
}

fn push_task_line(out: &mut String, task: &Task) {
    let mark = if task.completed { "x" } else { " " };
    let _ = writeln!(out, "[{mark}] {}  {}", task.id, task.title);
}

fn task_details(task: &Task) -> String {
    let mut out = String::new();
    push_task_line(&mut out, task);
    if let Some(description) = &task.description {
        let _ = writeln!(out, "    {description}");
    }
    let _ = write!(
        out,
        "    created {}  updated {}",
        task.created_at.to_rfc3339(),
        task.updated_at.to_rfc3339()
    );
    out
}

#[cfg(test)]
mod tests {
    //! Rendering checks for table and JSON output.

    use chrono::{TimeZone, Utc};
    use rstest::{fixture, rstest};
    use serde_json::Value;

    use super::*;
    use crate::domain::{TaskId, TaskTitle};

    #[fixture]
    fn task() -> Task {
        let at = Utc
            .with_ymd_and_hms(2026, 5, 4, 10, 30, 0)
            .single()
            .expect("valid fixture timestamp");
        Task {
            id: TaskId::new("t-1").expect("valid id"),
            title: TaskTitle::new("Renew passport").expect("valid title"),
            description: Some("Before the summer trip".to_owned()),
            completed: true,
            created_at: at,
            updated_at: at,
        }
    }

    #[rstest]
    fn table_lists_one_line_per_task(task: Task) {
        let rendered = render_output(&CommandOutput::Tasks(vec![task]), OutputFormat::Table)
            .expect("table renders");
        assert_eq!(rendered, "[x] t-1  Renew passport");
    }

    #[rstest]
    fn table_reports_empty_listing() {
        let rendered =
            render_output(&CommandOutput::Tasks(Vec::new()), OutputFormat::Table).expect("renders");
        assert_eq!(rendered, "no tasks");
    }

    #[rstest]
    fn details_include_description(task: Task) {
        let rendered =
            render_output(&CommandOutput::Task(task), OutputFormat::Table).expect("renders");
        assert!(rendered.contains("    Before the summer trip"));
        assert!(rendered.contains("created 2026-05-04T10:30:00+00:00"));
    }

    #[rstest]
    fn json_uses_wire_field_names(task: Task) {
        let rendered =
            render_output(&CommandOutput::Task(task), OutputFormat::Json).expect("renders");
        let value: Value = serde_json::from_str(&rendered).expect("valid JSON");
        assert_eq!(value["id"], "t-1");
        assert_eq!(value["completed"], true);
        assert!(value.get("createdAt").is_some());
    }

    #[rstest]
    fn errors_render_code_and_message() {
        let error = DomainError::not_found("Task", "9");
        assert_eq!(
            render_error(&error, OutputFormat::Table),
            "NOT_FOUND: Task with id \"9\" not found"
        );

        let value: Value = serde_json::from_str(&render_error(&error, OutputFormat::Json))
            .expect("valid JSON");
        assert_eq!(value["error"]["code"], "NOT_FOUND");
    }

    #[rstest]
    #[case(ErrorCode::UnknownError, 1)]
    #[case(ErrorCode::ValidationError, 2)]
    #[case(ErrorCode::NotFound, 3)]
    #[case(ErrorCode::Unauthorized, 4)]
    #[case(ErrorCode::NetworkError, 5)]
    fn exit_codes_are_distinct(#[case] code: ErrorCode, #[case] expected: u8) {
        assert_eq!(exit_code_for(code), expected);
        assert_ne!(exit_code_for(code), MISSING_EXIT_CODE);
    }
}
