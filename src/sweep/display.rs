//! Human-readable rendering of a sweep summary.

use super::types::{BranchOutcome, Outcome, StaleReport, Summary};
use std::fmt;

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Sweep summary for {} ({}):", self.repository, self.trigger)?;
        if self.dry_run {
            writeln!(f, "  Mode: dry run (nothing deleted)")?;
        }

        if self.is_noop() {
            return writeln!(f, "  No cleanup configured for this event.");
        }

        if let Some(merge) = &self.merge {
            writeln!(f, "  Merged branch: {}", describe(merge))?;
        }

        if let Some(stale) = &self.stale {
            write_stale(f, stale)?;
        }

        Ok(())
    }
}

fn write_stale(f: &mut fmt::Formatter<'_>, stale: &StaleReport) -> fmt::Result {
    writeln!(f, "  Scanned: {} branch(es)", stale.outcomes.len())?;
    writeln!(f, "  Deleted: {} branch(es)", stale.deleted_count)?;

    let would_delete: Vec<&str> = stale
        .outcomes
        .iter()
        .filter(|o| o.outcome == Outcome::WouldDelete)
        .map(|o| o.branch.as_str())
        .collect();
    if !would_delete.is_empty() {
        writeln!(f, "  Would delete: {}", would_delete.join(", "))?;
    }

    let failed: Vec<&BranchOutcome> = stale.failed().collect();
    if !failed.is_empty() {
        writeln!(f, "  Failed: {} branch(es)", failed.len())?;
        for outcome in failed {
            writeln!(f, "    - {}", describe(outcome))?;
        }
    }

    Ok(())
}

/// One-line description of a branch outcome.
pub fn describe(outcome: &BranchOutcome) -> String {
    format!("{} {}", outcome.branch, result_text(&outcome.outcome))
}

/// Outcome label with its detail, without the branch name.
pub fn result_text(outcome: &Outcome) -> String {
    let detail = match outcome {
        Outcome::Protected { pattern, .. } => format!(" [{}]", pattern),
        Outcome::Fork { owner: Some(owner) } => format!(" [{}]", owner),
        Outcome::Failed { reason } => format!(": {}", reason),
        _ => String::new(),
    };
    format!("{}{}", outcome.label(), detail)
}
