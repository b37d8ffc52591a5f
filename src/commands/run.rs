//! Implementation of the `branch-sweep run` command.

use super::load_file_config;
use crate::cli::RunArgs;
use crate::config::{Config, Inputs};
use crate::context::RunContext;
use crate::error::{Result, SweepError};
use crate::github::GitHubClient;
use crate::report::{RunReport, append_step_summary, write_report};
use crate::sweep;
use chrono::Utc;
use tracing::{info, warn};

/// Execute the sweep for the trigger described by the environment.
///
/// # Behavior
///
/// - Resolves config (inputs, then config file, then defaults)
/// - Resolves the trigger context and builds the API client
/// - Runs the sweep and prints the summary
/// - Writes the JSON report and job summary when configured
pub fn cmd_run(args: RunArgs) -> Result<()> {
    let file = load_file_config(args.inputs.config.as_deref())?;
    let config = Config::resolve(&Inputs::from(&args.inputs), &file)?;

    let event_name = args
        .event_name
        .as_deref()
        .ok_or_else(|| SweepError::UserError("GITHUB_EVENT_NAME is not set".to_string()))?;
    let repository = args
        .repository
        .as_deref()
        .ok_or_else(|| SweepError::UserError("GITHUB_REPOSITORY is not set".to_string()))?;

    let ctx = RunContext::resolve(
        event_name,
        repository,
        args.event_path.as_deref(),
        args.api_url.as_deref(),
        config.delete_on_merge,
    )?;

    let client = GitHubClient::new(&ctx.api_url, config.token.expose(), &ctx.owner, &ctx.repo)?;

    let now = Utc::now();
    let summary = sweep::run(&ctx, &config, &client, now)?;

    for line in summary.to_string().lines() {
        info!("{}", line);
    }

    if let Some(path) = &args.report {
        write_report(path, &RunReport::new(&summary, now))?;
        info!("Report written to {}", path.display());
    }

    // Job summary failures are non-fatal.
    if let Some(path) = &args.step_summary
        && let Err(err) = append_step_summary(path, &summary)
    {
        warn!("Could not write job summary: {}", err);
    }

    info!("Branch sweep finished successfully");
    Ok(())
}
