//! Branch sweep orchestration.
//!
//! Two pipelines share one protection matcher:
//! - [`merge::handle_merge`] deletes the head branch of a merged pull request
//! - [`stale::handle_stale`] deletes branches whose head commit is too old
//!
//! [`run`] picks the pipeline from the trigger and config flags. Everything is
//! sequential: one API call at a time, no retries.
//!
//! # Errors
//!
//! Per-branch failures inside the stale scan are recorded and logged as
//! warnings. Any other API failure ends the run.

pub mod display;
pub mod merge;
pub mod stale;
pub mod types;


use crate::config::Config;
use crate::context::{RunContext, TriggerKind};
use crate::error::{Result, SweepError};
use crate::github::HostingApi;
use crate::protection::ProtectedPatterns;
use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

pub use merge::handle_merge;
pub use stale::handle_stale;
pub use types::{BranchOutcome, DeleteStatus, Outcome, StaleReport, Summary};

/// Branches requested from the listing endpoint. Only one page is read.
pub const BRANCH_PAGE_SIZE: u32 = 100;

/// Run the sweep for one trigger.
///
/// # Behavior
///
/// - `pull_request` with `delete_on_merge`: merge cleanup on the event's PR
/// - `workflow_dispatch`/`schedule` with `delete_stale`: stale cleanup over
///   the first page of branches
/// - anything else: nothing to do
pub fn run<A: HostingApi + ?Sized>(
    ctx: &RunContext,
    config: &Config,
    api: &A,
    now: DateTime<Utc>,
) -> Result<Summary> {
    info!("Branch sweep started");
    info!("Repository: {}", ctx.full_name());
    info!("Event: {}", ctx.trigger);

    let protected = ProtectedPatterns::new(&config.protected_branches);
    info!("Protected branches: {}", config.protected_branches.join(", "));
    debug!(entries = protected.len(), "compiled protected patterns");

    let mut summary = Summary {
        repository: ctx.full_name(),
        trigger: ctx.trigger.to_string(),
        dry_run: config.dry_run,
        merge: None,
        stale: None,
    };

    if ctx.trigger == TriggerKind::PullRequest && config.delete_on_merge {
        let event = ctx.merge_event.as_ref().ok_or_else(|| {
            SweepError::UserError("pull_request trigger without a pull request payload".to_string())
        })?;
        summary.merge = Some(handle_merge(event, config, &protected, api)?);
    }

    if ctx.trigger.is_periodic() && config.delete_stale {
        info!(
            "Scanning for stale branches (older than {} days)...",
            config.stale_days
        );

        let branches = api.list_branches(BRANCH_PAGE_SIZE)?;
        info!("Found {} branches", branches.len());
        if branches.len() >= BRANCH_PAGE_SIZE as usize {
            warn!(
                "Branch listing is limited to the first {} branches; later branches were not scanned",
                BRANCH_PAGE_SIZE
            );
        }

        let report = handle_stale(&branches, config, &protected, now, api);
        info!(
            "Stale branch cleanup complete. Deleted {} branches.",
            report.deleted_count
        );
        summary.stale = Some(report);
    }

    Ok(summary)
}

/// Issue one delete call and classify the result.
pub fn delete_branch<A: HostingApi + ?Sized>(api: &A, branch: &str) -> DeleteStatus {
    match api.delete_ref(branch) {
        Ok(()) => DeleteStatus::Deleted,
        Err(err) if err.is_unprocessable() => DeleteStatus::AlreadyDeleted,
        Err(err) => DeleteStatus::Failed(err),
    }
}
