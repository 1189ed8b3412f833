//! Behaviour tests for the layer boundary lint run against a tree on disk.

use std::sync::Mutex;

use architecture_lint::{ArchitectureLintError, LintSource, Violation};
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs::Dir;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tempfile::TempDir;

#[derive(Debug, Default)]
struct LintWorld {
    sources: Vec<LintSource>,
    result: Option<Result<(), ArchitectureLintError>>,
}

#[fixture]
fn world() -> Mutex<LintWorld> {
    Mutex::new(LintWorld::default())
}

fn add_source(world: &Mutex<LintWorld>, file: &str, contents: &str) {
    let mut world = world.lock().expect("world lock");
    world.sources.push(LintSource::new(file, contents));
}

#[given("domain, application, inbound, and outbound modules that respect the layering")]
fn layered_modules(world: &Mutex<LintWorld>) {
    add_source(
        world,
        "domain/task.rs",
        "pub struct TaskId(String); impl TaskId { pub fn new(v: &str) -> Self { Self(v.to_owned()) } }",
    );
    add_source(
        world,
        "application/use_cases.rs",
        "use crate::domain::task::TaskId; pub fn forward(id: TaskId) -> TaskId { id }",
    );
    add_source(
        world,
        "inbound/cli/commands.rs",
        "use clap::Parser; use crate::application::use_cases; use crate::config::BackendKind; fn run() {}",
    );
    add_source(
        world,
        "outbound/graphql/http_client.rs",
        "use reqwest::Client; use url::Url; use crate::domain::task::TaskId; fn call(_c: Client, _u: Url, _id: TaskId) {}",
    );
}

#[given("a CLI module that imports the GraphQL adapter")]
fn cli_imports_adapter(world: &Mutex<LintWorld>) {
    add_source(
        world,
        "inbound/cli/state.rs",
        "use tasks::outbound::graphql::GraphQlTaskRepository; fn wire() { let _ = GraphQlTaskRepository::new; }",
    );
}

#[given("a use case module that imports reqwest")]
fn use_case_imports_reqwest(world: &Mutex<LintWorld>) {
    add_source(
        world,
        "application/use_cases.rs",
        "use reqwest::Client; fn execute() { let _ = Client::new(); }",
    );
}

#[given("an outbound module that imports the CLI")]
fn outbound_imports_cli(world: &Mutex<LintWorld>) {
    add_source(
        world,
        "outbound/memory/repository.rs",
        "use crate::inbound::cli::CliState; fn thing(_state: CliState) {}",
    );
}

#[given("a domain module that parses URLs")]
fn domain_parses_urls(world: &Mutex<LintWorld>) {
    add_source(
        world,
        "domain/endpoint.rs",
        "pub fn parse(raw: &str) -> bool { url::Url::parse(raw).is_ok() }",
    );
}

fn write_tree(root: &Utf8Path, sources: &[LintSource]) {
    let base = Dir::open_ambient_dir(root, ambient_authority()).expect("open tempdir");
    for source in sources {
        let path = Utf8Path::new("backend/src").join(&source.file);
        if let Some(parent) = path.parent() {
            base.create_dir_all(parent).expect("create parent directories");
        }
        base.write(&path, &source.contents).expect("write source file");
    }
}

#[when("the architecture lint runs")]
fn run_architecture_lint(world: &Mutex<LintWorld>) {
    let sources = world.lock().expect("world lock").sources.clone();

    let temp_dir = TempDir::new().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(temp_dir.path().to_path_buf()).expect("utf-8 tempdir");
    write_tree(&root, &sources);

    let result = architecture_lint::lint_backend_sources(&root.join("backend"));
    world.lock().expect("world lock").result = Some(result);
}

#[then("the lint succeeds")]
fn lint_succeeds(world: &Mutex<LintWorld>) {
    let world = world.lock().expect("world lock");
    let outcome = world.result.as_ref().expect("lint must have run");
    assert!(outcome.is_ok(), "expected success, got: {outcome:?}");
}

#[then("the lint reports \"{needle}\" in \"{file}\"")]
fn lint_reports(world: &Mutex<LintWorld>, needle: String, file: String) {
    let violations = violations(world);
    assert!(
        violations
            .iter()
            .any(|violation| violation.file.as_str() == file && violation.message.contains(&needle)),
        "expected a violation in {file} mentioning {needle}, got: {violations:?}"
    );
}

fn violations(world: &Mutex<LintWorld>) -> Vec<Violation> {
    let world = world.lock().expect("world lock");
    match world.result.as_ref().expect("lint must have run") {
        Err(ArchitectureLintError::Violations(violations)) => violations.clone(),
        other => panic!("expected violations, got: {other:?}"),
    }
}

#[scenario(
    path = "tests/features/architecture_guardrails.feature",
    name = "A well-layered tree passes"
)]
fn a_well_layered_tree_passes(world: Mutex<LintWorld>) {
    let _ = world;
}

#[scenario(
    path = "tests/features/architecture_guardrails.feature",
    name = "The CLI must not construct adapters itself"
)]
fn the_cli_must_not_construct_adapters_itself(world: Mutex<LintWorld>) {
    let _ = world;
}

#[scenario(
    path = "tests/features/architecture_guardrails.feature",
    name = "Use cases stay free of the HTTP client"
)]
fn use_cases_stay_free_of_the_http_client(world: Mutex<LintWorld>) {
    let _ = world;
}

#[scenario(
    path = "tests/features/architecture_guardrails.feature",
    name = "Adapters must not reach back into the CLI"
)]
fn adapters_must_not_reach_back_into_the_cli(world: Mutex<LintWorld>) {
    let _ = world;
}

#[scenario(
    path = "tests/features/architecture_guardrails.feature",
    name = "Every violation is reported in one run"
)]
fn every_violation_is_reported_in_one_run(world: Mutex<LintWorld>) {
    let _ = world;
}
