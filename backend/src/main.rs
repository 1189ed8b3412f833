//! `taskctl` entry-point: loads configuration, wires a repository into the
//! task use cases, and runs one command.

use std::io;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{self, WrapErr};
use mockable::DefaultClock;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use tasks::application::TaskUseCases;
use tasks::config::{BackendKind, TasksSettings};
use tasks::inbound::cli::{Cli, CliState, run};
use tasks::outbound::graphql::{GraphQlTaskRepository, ReqwestGraphQlClient};
use tasks::outbound::memory::InMemoryTaskRepository;

/// Application bootstrap.
#[tokio::main]
async fn main() -> eyre::Result<ExitCode> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    let settings = TasksSettings::load_layered()?.with_overrides(cli.overrides());
    let state = build_state(&settings)?;

    let status = run(
        cli.command,
        cli.output,
        &state,
        &mut io::stdout().lock(),
        &mut io::stderr().lock(),
    )
    .await
    .wrap_err("failed to write command output")?;
    Ok(ExitCode::from(status))
}

fn init_tracing(json_logs: bool) {
    let builder = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr);
    let result = if json_logs {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if let Err(e) = result {
        warn!(error = %e, "tracing init failed");
    }
}

fn build_state(settings: &TasksSettings) -> eyre::Result<CliState> {
    match settings.backend()? {
        BackendKind::Memory => {
            let repository = InMemoryTaskRepository::seeded(Arc::new(DefaultClock));
            Ok(TaskUseCases::new(Arc::new(repository)).into())
        }
        BackendKind::Graphql => {
            let mut client =
                ReqwestGraphQlClient::new(settings.graphql_endpoint()?, settings.request_timeout()?)
                    .wrap_err("failed to build the GraphQL HTTP client")?;
            if let Some(token) = settings.auth_token() {
                client = client.with_auth_token(token);
            }
            let repository = GraphQlTaskRepository::new(client);
            Ok(TaskUseCases::new(Arc::new(repository)).into())
        }
    }
}
