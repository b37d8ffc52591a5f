//! Command implementations for branch-sweep.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations, plus the input plumbing both commands share.

mod check;
mod run;

use crate::cli::{Cli, Command, InputArgs};
use crate::config::{DEFAULT_CONFIG_PATH, FileConfig, Inputs};
use crate::error::Result;
use std::path::Path;
use tracing::debug;

/// Dispatch a command to its implementation.
///
/// With no subcommand the sweep runs, which is how the action invokes it.
pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Command::Run(args)) => run::cmd_run(args),
        Some(Command::Check(args)) => check::cmd_check(args),
        None => run::cmd_run(cli.run),
    }
}

impl From<&InputArgs> for Inputs {
    fn from(args: &InputArgs) -> Self {
        Self {
            github_token: args.github_token.clone(),
            protected_branches: args.protected_branches.clone(),
            dry_run: args.dry_run.clone(),
            delete_on_merge: args.delete_on_merge.clone(),
            delete_stale: args.delete_stale.clone(),
            stale_days: args.stale_days.clone(),
        }
    }
}

/// Load repository defaults.
///
/// An explicit path must exist. Without one, the conventional location is
/// used when present and built-in defaults otherwise.
pub(crate) fn load_file_config(explicit: Option<&Path>) -> Result<FileConfig> {
    if let Some(path) = explicit {
        debug!(path = %path.display(), "loading config file");
        return FileConfig::load(path);
    }

    let default_path = Path::new(DEFAULT_CONFIG_PATH);
    if default_path.is_file() {
        debug!(path = DEFAULT_CONFIG_PATH, "loading config file");
        FileConfig::load(default_path)
    } else {
        Ok(FileConfig::default())
    }
}
