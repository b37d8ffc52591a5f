//! Wire types for the subset of the GitHub REST API the sweep uses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One entry of `GET /repos/{owner}/{repo}/branches`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchSnapshot {
    /// Branch name without the `refs/heads/` prefix.
    pub name: String,
    /// Head commit of the branch.
    pub commit: BranchCommit,
}

impl BranchSnapshot {
    /// Build a snapshot from a name and head sha.
    #[cfg(test)]
    pub fn new(name: impl Into<String>, sha: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            commit: BranchCommit { sha: sha.into() },
        }
    }

    /// Head commit sha.
    pub fn sha(&self) -> &str {
        &self.commit.sha
    }
}

/// Commit reference inside a branch listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchCommit {
    pub sha: String,
}

/// Committer metadata for one commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitInfo {
    /// When the commit was committed (not authored).
    pub committed_at: DateTime<Utc>,
}

/// Body of `GET /repos/{owner}/{repo}/commits/{ref}`, reduced to what we read.
#[derive(Debug, Deserialize)]
pub(crate) struct CommitResponse {
    pub commit: CommitDetail,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommitDetail {
    pub committer: Signature,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Signature {
    pub date: DateTime<Utc>,
}

impl From<CommitResponse> for CommitInfo {
    fn from(response: CommitResponse) -> Self {
        Self {
            committed_at: response.commit.committer.date,
        }
    }
}

/// Error body GitHub returns on non-2xx responses.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub message: String,
}
