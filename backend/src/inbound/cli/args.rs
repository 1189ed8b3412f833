//! Command-line arguments for `taskctl`.

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::{BackendKind, SettingsOverrides};

/// Manage tasks from the command line.
#[derive(Debug, Parser)]
#[command(name = "taskctl", version, about)]
pub struct Cli {
    /// GraphQL endpoint; overrides `TASKS_GRAPHQL_ENDPOINT`.
    #[arg(long, global = true, value_name = "URL")]
    pub endpoint: Option<String>,
    /// Repository backend; overrides `TASKS_BACKEND`.
    #[arg(long, global = true, value_enum)]
    pub backend: Option<BackendKind>,
    /// Request timeout in seconds; overrides `TASKS_REQUEST_TIMEOUT_SECS`.
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,
    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,
    /// Emit logs as JSON.
    #[arg(long, global = true)]
    pub json_logs: bool,
    /// Operation to run.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Settings overrides taken from global flags.
    #[must_use]
    pub fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            graphql_endpoint: self.endpoint.clone(),
            request_timeout_secs: self.timeout,
            backend: self.backend,
        }
    }
}

/// One task operation.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// List tasks, newest first.
    List {
        /// Only tasks with this completion state.
        #[arg(long)]
        completed: Option<bool>,
        /// Only tasks whose title contains this text.
        #[arg(long)]
        search: Option<String>,
    },
    /// Show one task.
    Show {
        /// Task identifier.
        id: String,
    },
    /// Create a task.
    Create {
        /// Title of at least three characters.
        title: String,
        /// Optional description.
        #[arg(long)]
        description: Option<String>,
    },
    /// Change fields of a task.
    Update {
        /// Task identifier.
        id: String,
        /// Replacement title.
        #[arg(long)]
        title: Option<String>,
        /// Replacement description.
        #[arg(long, conflicts_with = "clear_description")]
        description: Option<String>,
        /// Remove the description.
        #[arg(long)]
        clear_description: bool,
        /// Replacement completion state.
        #[arg(long)]
        completed: Option<bool>,
    },
    /// Flip the completion state of a task.
    Toggle {
        /// Task identifier.
        id: String,
    },
    /// Delete a task.
    Delete {
        /// Task identifier.
        id: String,
    },
}

impl Command {
    /// Subcommand name used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::List { .. } => "list",
            Self::Show { .. } => "show",
            Self::Create { .. } => "create",
            Self::Update { .. } => "update",
            Self::Toggle { .. } => "toggle",
            Self::Delete { .. } => "delete",
        }
    }
}

/// How command results are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable lines.
    #[default]
    Table,
    /// Pretty-printed JSON.
    Json,
}

#[cfg(test)]
mod tests {
    //! Argument parsing checks.

    use clap::CommandFactory;
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[rstest]
    fn global_flags_become_overrides() {
        let cli = Cli::try_parse_from([
            "taskctl",
            "list",
            "--backend",
            "memory",
            "--endpoint",
            "http://localhost:9999/graphql",
            "--timeout",
            "3",
        ])
        .expect("arguments parse");

        assert_eq!(
            cli.overrides(),
            SettingsOverrides {
                graphql_endpoint: Some("http://localhost:9999/graphql".to_owned()),
                request_timeout_secs: Some(3),
                backend: Some(BackendKind::Memory),
            }
        );
        assert_eq!(cli.output, OutputFormat::Table);
    }

    #[rstest]
    fn list_filters_parse() {
        let cli = Cli::try_parse_from([
            "taskctl",
            "--output",
            "json",
            "list",
            "--completed",
            "true",
            "--search",
            "docs",
        ])
        .expect("arguments parse");

        assert_eq!(cli.output, OutputFormat::Json);
        assert_eq!(
            cli.command,
            Command::List {
                completed: Some(true),
                search: Some("docs".to_owned()),
            }
        );
    }

    #[rstest]
    fn description_and_clear_conflict() {
        let result = Cli::try_parse_from([
            "taskctl",
            "update",
            "1",
            "--description",
            "new",
            "--clear-description",
        ]);
        assert!(result.is_err());
    }
}
