//! Periodic deletion of branches with old head commits.

use super::delete_branch;
use super::types::{BranchOutcome, DeleteStatus, Outcome, StaleReport};
use crate::config::Config;
use crate::github::{BranchSnapshot, HostingApi};
use crate::protection::ProtectedPatterns;
use chrono::{DateTime, TimeDelta, Utc};
use tracing::{debug, info, warn};

/// Scan a branch listing and delete every unprotected stale branch.
///
/// Branches are handled one at a time in listing order. A failed commit
/// lookup or delete is recorded against that branch and the scan moves on.
pub fn handle_stale<A: HostingApi + ?Sized>(
    branches: &[BranchSnapshot],
    config: &Config,
    protected: &ProtectedPatterns,
    now: DateTime<Utc>,
    api: &A,
) -> StaleReport {
    let mut report = StaleReport::default();

    for branch in branches {
        let outcome = evaluate_branch(branch, config, protected, now, api);
        if outcome.outcome == Outcome::Deleted {
            report.deleted_count += 1;
        }
        report.outcomes.push(outcome);
    }

    report
}

fn evaluate_branch<A: HostingApi + ?Sized>(
    branch: &BranchSnapshot,
    config: &Config,
    protected: &ProtectedPatterns,
    now: DateTime<Utc>,
    api: &A,
) -> BranchOutcome {
    let name = branch.name.as_str();

    if let Some(protection) = protected.check(name) {
        debug!(branch = name, pattern = protection.pattern(), "skipping protected branch");
        return BranchOutcome::new(name, protection.into());
    }

    let commit = match api.get_commit(branch.sha()) {
        Ok(commit) => commit,
        Err(err) => {
            warn!("Failed to process branch '{}': {}", name, err);
            return BranchOutcome::new(
                name,
                Outcome::Failed {
                    reason: err.to_string(),
                },
            );
        }
    };

    let age = age_days(now, commit.committed_at);
    if !is_stale(now, commit.committed_at, config.stale_days) {
        debug!(branch = name, age_days = age, "branch is not stale");
        return BranchOutcome::new(name, Outcome::NotStale).with_age(age);
    }

    if config.dry_run {
        info!(
            "DRY RUN: Would delete stale branch '{}' (last commit: {} days ago)",
            name, age
        );
        return BranchOutcome::new(name, Outcome::WouldDelete).with_age(age);
    }

    let outcome = match delete_branch(api, name) {
        DeleteStatus::Deleted => {
            info!(
                "Deleted stale branch '{}' (last commit: {} days ago)",
                name, age
            );
            Outcome::Deleted
        }
        DeleteStatus::AlreadyDeleted => {
            warn!("Branch '{}' was already deleted", name);
            Outcome::AlreadyDeleted
        }
        DeleteStatus::Failed(err) => {
            warn!("Failed to process branch '{}': {}", name, err);
            Outcome::Failed {
                reason: err.to_string(),
            }
        }
    };

    BranchOutcome::new(name, outcome).with_age(age)
}

const SECONDS_PER_DAY: i64 = 86_400;

/// Whole days between the commit and `now`, rounded down. Commits dated in
/// the future get a negative age.
pub fn age_days(now: DateTime<Utc>, committed_at: DateTime<Utc>) -> i64 {
    (now - committed_at).num_seconds().div_euclid(SECONDS_PER_DAY)
}

/// A commit is stale when it is strictly older than `stale_days` days.
///
/// A threshold that reaches past the representable date range makes
/// nothing stale.
pub fn is_stale(now: DateTime<Utc>, committed_at: DateTime<Utc>, stale_days: u32) -> bool {
    TimeDelta::try_days(i64::from(stale_days))
        .and_then(|threshold| now.checked_sub_signed(threshold))
        .is_some_and(|cutoff| committed_at < cutoff)
}
