//! Data types for the sweep pipelines.

use crate::github::ApiError;
use crate::protection::Protection;
use serde::Serialize;

/// What happened to one branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// The branch was deleted.
    Deleted,
    /// The pull request was closed without merging.
    NotMerged,
    /// The head branch lives in another repository.
    Fork {
        /// Head repository owner, if the fork still exists.
        owner: Option<String>,
    },
    /// The branch matched a protected entry.
    Protected {
        /// The configured entry that matched.
        pattern: String,
        /// True when the entry was a `*` pattern rather than a literal.
        wildcard: bool,
    },
    /// The last commit is within the threshold.
    NotStale,
    /// The delete call found no such ref.
    AlreadyDeleted,
    /// Dry run: the branch would have been deleted.
    WouldDelete,
    /// A per-branch API failure; the branch is reconsidered next run.
    Failed {
        reason: String,
    },
}

impl Outcome {
    /// Short label used in summaries.
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Deleted => "deleted",
            Outcome::NotMerged => "skipped (not merged)",
            Outcome::Fork { .. } => "skipped (fork)",
            Outcome::Protected { .. } => "skipped (protected)",
            Outcome::NotStale => "skipped (not stale)",
            Outcome::AlreadyDeleted => "already deleted",
            Outcome::WouldDelete => "would delete (dry run)",
            Outcome::Failed { .. } => "failed",
        }
    }
}

impl From<Protection<'_>> for Outcome {
    fn from(protection: Protection<'_>) -> Self {
        Outcome::Protected {
            pattern: protection.pattern().to_string(),
            wildcard: matches!(protection, Protection::Pattern(_)),
        }
    }
}

/// Outcome for a named branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BranchOutcome {
    /// Branch name.
    pub branch: String,
    /// Days since the last commit, when it was looked up.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_days: Option<i64>,
    #[serde(flatten)]
    pub outcome: Outcome,
}

impl BranchOutcome {
    pub fn new(branch: impl Into<String>, outcome: Outcome) -> Self {
        Self {
            branch: branch.into(),
            age_days: None,
            outcome,
        }
    }

    /// Attach the commit age.
    pub fn with_age(mut self, age_days: i64) -> Self {
        self.age_days = Some(age_days);
        self
    }
}

/// Result of a single delete call, with the benign "ref is gone" case split
/// out so callers have to handle it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteStatus {
    Deleted,
    AlreadyDeleted,
    Failed(ApiError),
}

/// Result of a stale scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StaleReport {
    /// One entry per listed branch, in listing order.
    pub outcomes: Vec<BranchOutcome>,
    /// Number of branches actually deleted.
    pub deleted_count: usize,
}

impl StaleReport {
    /// Branches whose processing failed this run.
    pub fn failed(&self) -> impl Iterator<Item = &BranchOutcome> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.outcome, Outcome::Failed { .. }))
    }
}

/// Everything a run did, for the final report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// `owner/repo`.
    pub repository: String,
    /// Trigger event name.
    pub trigger: String,
    pub dry_run: bool,
    /// Set when the merge cleanup ran.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merge: Option<BranchOutcome>,
    /// Set when the stale cleanup ran.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stale: Option<StaleReport>,
}

impl Summary {
    /// Total branches deleted by this run.
    pub fn deleted_count(&self) -> usize {
        let merged = self
            .merge
            .as_ref()
            .is_some_and(|m| m.outcome == Outcome::Deleted);
        usize::from(merged) + self.stale.as_ref().map_or(0, |s| s.deleted_count)
    }

    /// Returns true when neither pipeline ran.
    pub fn is_noop(&self) -> bool {
        self.merge.is_none() && self.stale.is_none()
    }
}
