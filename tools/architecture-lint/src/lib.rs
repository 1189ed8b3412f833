//! Repo-local architectural lint for the task crate's layering.
//!
//! The `tasks` crate is split into four layers under `backend/src`:
//!
//! - `domain`: entities, the error taxonomy, and the repository port
//! - `application`: use cases and the composition factory
//! - `inbound`: the command-line adapter
//! - `outbound`: the GraphQL and in-memory repository adapters
//!
//! Dependencies point inwards only. The lint parses every source file in a
//! layer and reports imports of a forbidden sibling layer or of a transport
//! crate that belongs to another layer. Files outside the four layer
//! directories (`lib.rs`, `main.rs`, `config.rs`) form the composition root
//! and are not checked.
//!
//! Run it with `cargo run -p architecture-lint`.

use std::collections::BTreeSet;
use std::fmt;
use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs::Dir;
use syn::visit::Visit;

/// Library name of the linted crate, as written in absolute paths.
const CRATE_ROOT: &str = "tasks";

/// A single boundary violation discovered by the linter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// File path relative to `backend/src`.
    pub file: Utf8PathBuf,
    /// Which rule was broken, e.g. `domain module must not depend on crate::outbound`.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.file, self.message)
    }
}

/// Failure modes returned by the architecture lint.
#[derive(Debug)]
pub enum ArchitectureLintError {
    /// Walking or reading the source tree failed.
    Io(io::Error),
    /// A file could not be parsed, or its path could not be classified.
    Parse { file: Utf8PathBuf, message: String },
    /// One or more boundary violations were found.
    Violations(Vec<Violation>),
}

impl fmt::Display for ArchitectureLintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "I/O error while linting layers: {err}"),
            Self::Parse { file, message } => {
                write!(f, "cannot lint {file}: {message}")
            }
            Self::Violations(violations) => {
                writeln!(f, "Layer boundary violations:")?;
                for violation in violations {
                    writeln!(f, "- {violation}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ArchitectureLintError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for ArchitectureLintError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

/// A Rust source file to be linted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintSource {
    /// Path relative to `backend/src`; its first component names the layer.
    pub file: Utf8PathBuf,
    pub contents: String,
}

impl LintSource {
    /// Build a source from a relative path and its text.
    pub fn new(file: impl Into<Utf8PathBuf>, contents: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            contents: contents.into(),
        }
    }
}

/// Lint the crate sources found under `backend_dir/src`.
///
/// # Errors
///
/// Returns [`ArchitectureLintError::Violations`] when any layer imports
/// something it must not, or an I/O or parse error when the tree cannot be
/// read.
pub fn lint_backend_sources(backend_dir: &Utf8Path) -> Result<(), ArchitectureLintError> {
    let src = Dir::open_ambient_dir(backend_dir.join("src"), ambient_authority())?;
    let mut sources = Vec::new();
    for layer in Layer::ALL {
        let root = Utf8PathBuf::from(layer.dir_name());
        match src.open_dir(layer.dir_name()) {
            Ok(dir) => collect_sources(&dir, &root, &mut sources)?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => return Err(err.into()),
        }
    }
    lint_sources(&sources)
}

/// Lint the provided sources without touching the filesystem.
///
/// # Errors
///
/// See [`lint_backend_sources`].
pub fn lint_sources(sources: &[LintSource]) -> Result<(), ArchitectureLintError> {
    let mut violations = Vec::new();
    for source in sources {
        let layer = Layer::for_file(&source.file).ok_or_else(|| ArchitectureLintError::Parse {
            file: source.file.clone(),
            message: "path is not inside a layer directory".to_owned(),
        })?;
        let parsed =
            syn::parse_file(&source.contents).map_err(|err| ArchitectureLintError::Parse {
                file: source.file.clone(),
                message: err.to_string(),
            })?;
        violations.extend(check_file(&source.file, layer, &parsed));
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ArchitectureLintError::Violations(violations))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layer {
    Domain,
    Application,
    Inbound,
    Outbound,
}

/// Crates that carry the GraphQL transport.
const TRANSPORT_CRATES: [&str; 2] = ["reqwest", "url"];

/// Crates that belong to the process edge: argument parsing, layered
/// configuration, and subscriber setup.
const EDGE_CRATES: [&str; 3] = ["clap", "ortho_config", "tracing_subscriber"];

impl Layer {
    const ALL: [Self; 4] = [Self::Domain, Self::Application, Self::Inbound, Self::Outbound];

    const fn dir_name(self) -> &'static str {
        match self {
            Self::Domain => "domain",
            Self::Application => "application",
            Self::Inbound => "inbound",
            Self::Outbound => "outbound",
        }
    }

    fn from_dir_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|layer| layer.dir_name() == name)
    }

    fn for_file(file: &Utf8Path) -> Option<Self> {
        file.components()
            .next()
            .and_then(|first| Self::from_dir_name(first.as_str()))
    }

    /// Internal modules this layer must not reach.
    fn forbidden_modules(self) -> BTreeSet<&'static str> {
        match self {
            Self::Domain => BTreeSet::from(["application", "config", "inbound", "outbound"]),
            Self::Application => BTreeSet::from(["config", "inbound", "outbound"]),
            Self::Inbound => BTreeSet::from(["outbound"]),
            Self::Outbound => BTreeSet::from(["application", "config", "inbound"]),
        }
    }

    /// External crates this layer must not import.
    fn forbidden_crates(self) -> BTreeSet<&'static str> {
        let mut crates = BTreeSet::from(EDGE_CRATES);
        match self {
            Self::Domain | Self::Application => crates.extend(TRANSPORT_CRATES),
            Self::Inbound => {
                crates.remove("clap");
                crates.extend(TRANSPORT_CRATES);
            }
            Self::Outbound => {}
        }
        crates
    }
}

fn check_file(file: &Utf8Path, layer: Layer, parsed: &syn::File) -> Vec<Violation> {
    let modules = layer.forbidden_modules();
    let crates = layer.forbidden_crates();
    let name = layer.dir_name();

    let mut collector = PathCollector::default();
    collector.visit_file(parsed);

    let mut messages = BTreeSet::new();
    for segments in &collector.paths {
        match classify(segments) {
            Some(Target::Module(root)) if modules.contains(root) => {
                messages.insert(format!("{name} module must not depend on crate::{root}"));
            }
            Some(Target::Crate(root)) if crates.contains(root) => {
                messages.insert(format!("{name} module must not depend on external crate `{root}`"));
            }
            _ => {}
        }
    }

    messages
        .into_iter()
        .map(|message| Violation {
            file: file.to_owned(),
            message,
        })
        .collect()
}

/// What the first meaningful segment of a path refers to.
enum Target<'a> {
    Module(&'a str),
    Crate(&'a str),
}

fn is_relative_segment(segment: &str) -> bool {
    matches!(segment, "crate" | "self" | "super")
}

fn is_top_level_module(segment: &str) -> bool {
    segment == "config" || Layer::from_dir_name(segment).is_some()
}

/// Bare single-segment paths are locals or prelude items, never imports.
fn classify(segments: &[String]) -> Option<Target<'_>> {
    let first = segments.first()?.as_str();
    if segments.len() < 2 {
        return None;
    }
    if is_top_level_module(first) {
        return Some(Target::Module(first));
    }
    if is_relative_segment(first) {
        let next = segments
            .iter()
            .map(String::as_str)
            .find(|segment| !is_relative_segment(segment))?;
        return Some(Target::Module(next));
    }
    if first == CRATE_ROOT {
        return segments.get(1).map(|segment| Target::Module(segment.as_str()));
    }
    Some(Target::Crate(first))
}

/// Gathers every path mentioned in a file, whether in `use` trees or inline.
#[derive(Default)]
struct PathCollector {
    paths: BTreeSet<Vec<String>>,
}

impl PathCollector {
    fn record_use_tree(&mut self, tree: &syn::UseTree, mut prefix: Vec<String>) {
        match tree {
            syn::UseTree::Path(path) => {
                prefix.push(path.ident.to_string());
                self.record_use_tree(&path.tree, prefix);
            }
            syn::UseTree::Name(name) => {
                prefix.push(name.ident.to_string());
                self.paths.insert(prefix);
            }
            syn::UseTree::Rename(rename) => {
                prefix.push(rename.ident.to_string());
                self.paths.insert(prefix);
            }
            syn::UseTree::Glob(_) => {
                prefix.push("*".to_owned());
                self.paths.insert(prefix);
            }
            syn::UseTree::Group(group) => {
                for item in &group.items {
                    self.record_use_tree(item, prefix.clone());
                }
            }
        }
    }
}

impl<'ast> Visit<'ast> for PathCollector {
    fn visit_path(&mut self, node: &'ast syn::Path) {
        let segments: Vec<String> = node
            .segments
            .iter()
            .map(|segment| segment.ident.to_string())
            .collect();
        if !segments.is_empty() {
            self.paths.insert(segments);
        }
        syn::visit::visit_path(self, node);
    }

    fn visit_item_use(&mut self, node: &'ast syn::ItemUse) {
        self.record_use_tree(&node.tree, Vec::new());
    }
}

fn collect_sources(
    dir: &Dir,
    relative: &Utf8Path,
    sources: &mut Vec<LintSource>,
) -> Result<(), ArchitectureLintError> {
    for entry in dir.entries()? {
        let entry = entry?;
        let name = entry
            .file_name()
            .into_string()
            .map_err(|raw| ArchitectureLintError::Parse {
                file: relative.to_owned(),
                message: format!("non UTF-8 file name {raw:?}"),
            })?;
        let path = relative.join(&name);
        if entry.file_type()?.is_dir() {
            collect_sources(&dir.open_dir(&name)?, &path, sources)?;
        } else if path.extension() == Some("rs") {
            let contents = dir.read_to_string(&name)?;
            sources.push(LintSource::new(path, contents));
        }
    }
    Ok(())
}
