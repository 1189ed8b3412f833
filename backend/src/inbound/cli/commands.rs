//! Execution of parsed commands against the use-case ports.
//!
//! Each subcommand calls exactly one use case. Raw arguments are validated
//! here, so malformed input fails as `VALIDATION_ERROR` before any port runs.

use std::io::{self, Write};

use tracing::info;

use super::args::{Command, OutputFormat};
use super::render::{MISSING_EXIT_CODE, exit_code_for, render_error, render_output};
use super::state::CliState;
use crate::domain::{DomainError, DomainResult, NewTask, Task, TaskFilter, TaskId, TaskPatch};

/// Result of a successful command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutput {
    /// A listing.
    Tasks(Vec<Task>),
    /// A single created, updated, toggled, or shown task.
    Task(Task),
    /// The last state of a deleted task.
    Deleted(Task),
    /// `show` found no task with this identifier.
    Missing(TaskId),
}

/// Run `command` through the matching use case.
///
/// # Errors
///
/// Returns the use case failure unchanged, or `VALIDATION_ERROR` when the
/// arguments do not form valid domain input.
pub async fn execute(command: Command, state: &CliState) -> DomainResult<CommandOutput> {
    match command {
        Command::List { completed, search } => {
            let filter = TaskFilter {
                completed,
                title_contains: search,
            };
            state
                .get_tasks
                .execute(&filter)
                .await
                .map(CommandOutput::Tasks)
        }
        Command::Show { id } => {
            let id = parse_id(id)?;
            let found = state.get_task.execute(&id).await?;
            Ok(found.map_or(CommandOutput::Missing(id), CommandOutput::Task))
        }
        Command::Create { title, description } => {
            let input = NewTask::new(title, description)?;
            state
                .create_task
                .execute(input)
                .await
                .map(CommandOutput::Task)
        }
        Command::Update {
            id,
            title,
            description,
            clear_description,
            completed,
        } => {
            let id = parse_id(id)?;
            let patch = build_patch(title, description, clear_description, completed)?;
            state
                .update_task
                .execute(&id, patch)
                .await
                .map(CommandOutput::Task)
        }
        Command::Toggle { id } => {
            let id = parse_id(id)?;
            state
                .toggle_task
                .execute(&id)
                .await
                .map(CommandOutput::Task)
        }
        Command::Delete { id } => {
            let id = parse_id(id)?;
            state
                .delete_task
                .execute(&id)
                .await
                .map(CommandOutput::Deleted)
        }
    }
}

/// Execute `command`, print the outcome, and return the process exit status.
///
/// Results go to `out`; failures and missing lookups go to `err`.
///
/// # Errors
///
/// Returns an I/O error when writing fails.
pub async fn run<O, E>(
    command: Command,
    format: OutputFormat,
    state: &CliState,
    out: &mut O,
    err: &mut E,
) -> io::Result<u8>
where
    O: Write,
    E: Write,
{
    let name = command.name();
    match execute(command, state).await {
        Ok(CommandOutput::Missing(id)) => {
            let rendered = render_output(&CommandOutput::Missing(id), format)?;
            writeln!(err, "{rendered}")?;
            Ok(MISSING_EXIT_CODE)
        }
        Ok(output) => {
            let rendered = render_output(&output, format)?;
            writeln!(out, "{rendered}")?;
            info!(command = name, "command completed");
            Ok(0)
        }
        Err(error) => {
            info!(command = name, code = %error.code(), "command failed");
            writeln!(err, "{}", render_error(&error, format))?;
            Ok(exit_code_for(error.code()))
        }
    }
}

fn parse_id(raw: String) -> DomainResult<TaskId> {
    TaskId::new(raw).map_err(DomainError::from)
}

fn build_patch(
    title: Option<String>,
    description: Option<String>,
    clear_description: bool,
    completed: Option<bool>,
) -> DomainResult<TaskPatch> {
    let mut patch = TaskPatch::default();
    if let Some(title) = title {
        patch = patch.with_title(title)?;
    }
    if clear_description {
        patch = patch.with_description(None);
    } else if let Some(description) = description {
        patch = patch.with_description(Some(description));
    }
    if let Some(completed) = completed {
        patch = patch.with_completed(completed);
    }
    Ok(patch)
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
