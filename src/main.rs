//! branch-sweep: delete merged and stale branches from GitHub repositories.
//!
//! This is the main entry point for the `branch-sweep` CLI. It installs the
//! logger, parses arguments, dispatches to the appropriate command handler,
//! and maps fatal errors to exit codes.

mod cli;
mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod exit_codes;
pub mod github;
pub mod logging;
pub mod protection;
pub mod report;
pub mod sweep;

#[cfg(test)]
mod test_support;

use cli::Cli;
use std::process::ExitCode;
use tracing::error;

fn main() -> ExitCode {
    logging::init();
    let cli = Cli::parse_args();

    match commands::dispatch(cli) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            // Rendered as an ::error:: annotation, which also marks the step failed.
            error!("Action failed: {}", err);

            ExitCode::from(err.exit_code() as u8)
        }
    }
}
