//! Branch deletion after a pull request merges.

use super::delete_branch;
use super::types::{BranchOutcome, DeleteStatus, Outcome};
use crate::config::Config;
use crate::context::MergeEvent;
use crate::error::Result;
use crate::github::HostingApi;
use crate::protection::ProtectedPatterns;
use tracing::{info, warn};

/// Delete the head branch of a merged pull request.
///
/// Guards run in order and the first one that applies decides the outcome:
/// not merged, fork, protected name, protected pattern. Only then is the
/// branch deleted, or reported in dry-run mode.
///
/// # Returns
///
/// * `Ok(BranchOutcome)` - Any decided outcome, including `AlreadyDeleted`
/// * `Err(SweepError::Api)` - The delete call failed for any other reason
pub fn handle_merge<A: HostingApi + ?Sized>(
    event: &MergeEvent,
    config: &Config,
    protected: &ProtectedPatterns,
    api: &A,
) -> Result<BranchOutcome> {
    let branch = event.head_branch.as_str();

    if let Some(outcome) = skip_reason(event, protected) {
        log_skip(event, &outcome);
        return Ok(BranchOutcome::new(branch, outcome));
    }

    info!("PR #{} was merged", event.number);
    info!("Branch to delete: {}", branch);

    if config.dry_run {
        info!("DRY RUN: Would delete branch '{}'", branch);
        return Ok(BranchOutcome::new(branch, Outcome::WouldDelete));
    }

    let outcome = match delete_branch(api, branch) {
        DeleteStatus::Deleted => {
            info!("Successfully deleted branch '{}'", branch);
            Outcome::Deleted
        }
        DeleteStatus::AlreadyDeleted => {
            warn!("Branch '{}' was already deleted", branch);
            Outcome::AlreadyDeleted
        }
        DeleteStatus::Failed(err) => return Err(err.into()),
    };

    Ok(BranchOutcome::new(branch, outcome))
}

/// The first guard that prevents deletion, if any.
fn skip_reason(event: &MergeEvent, protected: &ProtectedPatterns) -> Option<Outcome> {
    if !event.merged {
        return Some(Outcome::NotMerged);
    }

    if event.is_fork() {
        return Some(Outcome::Fork {
            owner: event.head_repo_owner.clone(),
        });
    }

    protected.check(&event.head_branch).map(Outcome::from)
}

fn log_skip(event: &MergeEvent, outcome: &Outcome) {
    let branch = &event.head_branch;
    match outcome {
        Outcome::NotMerged => {
            info!(
                "PR #{} was closed but not merged - no action taken",
                event.number
            );
        }
        Outcome::Fork { owner } => {
            info!(
                "Skipping: Branch is from a fork ({})",
                owner.as_deref().unwrap_or("deleted repository")
            );
        }
        Outcome::Protected {
            wildcard: false, ..
        } => {
            info!("Skipping: Branch '{}' is protected", branch);
        }
        Outcome::Protected {
            pattern,
            wildcard: true,
        } => {
            info!(
                "Skipping: Branch '{}' matches a protected pattern ({})",
                branch, pattern
            );
        }
        _ => {}
    }
}
