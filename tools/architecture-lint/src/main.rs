//! CLI entry point for the layer boundary lint.

use std::fmt;
use std::io::{self, Write};
use std::process::ExitCode;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs::Dir;

fn main() -> ExitCode {
    let result = workspace_root().map_or_else(
        |err| Err(err.to_string()),
        |root| {
            architecture_lint::lint_backend_sources(&root.join("backend"))
                .map_err(|err| err.to_string())
        },
    );
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            let _ = writeln!(io::stderr().lock(), "{message}");
            ExitCode::FAILURE
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct WorkspaceRootNotFound;

impl fmt::Display for WorkspaceRootNotFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("no ancestor directory holds a Cargo.toml with a [workspace] table")
    }
}

impl std::error::Error for WorkspaceRootNotFound {}

/// Candidate start points, most explicit first.
fn start_points() -> Vec<Utf8PathBuf> {
    let from_env = std::env::var("CARGO_WORKSPACE_DIR").ok().map(Utf8PathBuf::from);
    let from_cwd = std::env::current_dir()
        .ok()
        .and_then(|dir| Utf8PathBuf::from_path_buf(dir).ok());
    let from_manifest = Some(Utf8PathBuf::from(env!("CARGO_MANIFEST_DIR")));
    [from_env, from_cwd, from_manifest].into_iter().flatten().collect()
}

fn workspace_root() -> Result<Utf8PathBuf, WorkspaceRootNotFound> {
    start_points()
        .iter()
        .find_map(|start| start.ancestors().find(|dir| declares_workspace(dir)))
        .map(Utf8Path::to_path_buf)
        .ok_or(WorkspaceRootNotFound)
}

fn declares_workspace(dir: &Utf8Path) -> bool {
    Dir::open_ambient_dir(dir, ambient_authority())
        .and_then(|dir| dir.read_to_string("Cargo.toml"))
        .is_ok_and(|manifest| manifest.contains("[workspace]"))
}
