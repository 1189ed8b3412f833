//! `taskctl` command-line adapter.
//!
//! Arguments are parsed into [`Command`] values, executed against the ports
//! bundled in [`CliState`], and rendered as a table or JSON. Execution only
//! sees use-case traits, so tests drive it with mocks.

mod args;
mod commands;
mod render;
mod state;

pub use args::{Cli, Command, OutputFormat};
pub use commands::{CommandOutput, execute, run};
pub use render::{MISSING_EXIT_CODE, exit_code_for, render_error, render_output};
pub use state::CliState;
