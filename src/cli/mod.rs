//! CLI argument parsing for branch-sweep.
//!
//! Uses clap derive macros for declarative argument definitions. Every
//! action input can also come from its `INPUT_*` environment variable and
//! every trigger value from its `GITHUB_*` variable, so the binary runs
//! unchanged as a GitHub Action step.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// branch-sweep: delete merged and stale branches from a GitHub repository.
///
/// On `pull_request` events the head branch of a merged pull request is
/// deleted. On `workflow_dispatch` and `schedule` events, branches whose last
/// commit is older than the stale threshold are deleted. Protected names and
/// `*` patterns are never touched.
#[derive(Parser, Debug)]
#[command(name = "branch-sweep")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Inputs for the default `run` command.
    #[command(flatten)]
    pub run: RunArgs,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Available commands for branch-sweep.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the sweep for the current trigger (the default).
    Run(RunArgs),

    /// Check whether branch names are protected by the configured patterns.
    ///
    /// Prints each name with the entry that protects it, or `deletable`.
    Check(CheckArgs),
}

/// Action inputs shared by `run` and `check`.
#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// Token used for all GitHub API calls.
    #[arg(long, env = "INPUT_GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// Comma-separated protected branch names and `*` patterns.
    #[arg(long, env = "INPUT_PROTECTED_BRANCHES")]
    pub protected_branches: Option<String>,

    /// "true" to report deletions without performing them.
    #[arg(long, env = "INPUT_DRY_RUN")]
    pub dry_run: Option<String>,

    /// "false" to keep head branches of merged pull requests.
    #[arg(long, env = "INPUT_DELETE_ON_MERGE")]
    pub delete_on_merge: Option<String>,

    /// "true" to delete stale branches on dispatch and schedule triggers.
    #[arg(long, env = "INPUT_DELETE_STALE")]
    pub delete_stale: Option<String>,

    /// Days without commits after which a branch is stale.
    #[arg(long, env = "INPUT_STALE_DAYS")]
    pub stale_days: Option<String>,

    /// YAML file with repository defaults (default: .github/branch-sweep.yml if present).
    #[arg(long, env = "INPUT_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Arguments for the `run` command.
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    #[command(flatten)]
    pub inputs: InputArgs,

    /// Triggering event name.
    #[arg(long = "event-name", env = "GITHUB_EVENT_NAME")]
    pub event_name: Option<String>,

    /// Repository in owner/repo form.
    #[arg(long, env = "GITHUB_REPOSITORY")]
    pub repository: Option<String>,

    /// Path to the event payload JSON.
    #[arg(long = "event-path", env = "GITHUB_EVENT_PATH")]
    pub event_path: Option<PathBuf>,

    /// GitHub REST API root.
    #[arg(long = "api-url", env = "GITHUB_API_URL")]
    pub api_url: Option<String>,

    /// Write a JSON report of the run to this path.
    #[arg(long, env = "INPUT_REPORT")]
    pub report: Option<PathBuf>,

    /// Markdown job summary file to append to.
    #[arg(long = "step-summary", env = "GITHUB_STEP_SUMMARY")]
    pub step_summary: Option<PathBuf>,
}

/// Arguments for the `check` command.
#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// Branch names to check.
    #[arg(required = true)]
    pub branches: Vec<String>,

    /// Comma-separated protected branch names and `*` patterns.
    #[arg(long, env = "INPUT_PROTECTED_BRANCHES")]
    pub protected_branches: Option<String>,

    /// YAML file with repository defaults.
    #[arg(long, env = "INPUT_CONFIG")]
    pub config: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_means_run() {
        let cli = Cli::try_parse_from([
            "branch-sweep",
            "--github-token",
            "t",
            "--event-name",
            "schedule",
            "--repository",
            "acme/widgets",
            "--delete-stale",
            "true",
        ])
        .unwrap();

        assert!(cli.command.is_none());
        assert_eq!(cli.run.event_name.as_deref(), Some("schedule"));
        assert_eq!(cli.run.inputs.delete_stale.as_deref(), Some("true"));
    }

    #[test]
    fn test_check_subcommand() {
        let cli = Cli::try_parse_from([
            "branch-sweep",
            "check",
            "--protected-branches",
            "main,release*",
            "release-1",
            "feature",
        ])
        .unwrap();

        match cli.command {
            Some(Command::Check(args)) => {
                assert_eq!(args.branches, vec!["release-1", "feature"]);
                assert_eq!(args.protected_branches.as_deref(), Some("main,release*"));
            }
            other => panic!("expected check command, got {:?}", other),
        }
    }
}
