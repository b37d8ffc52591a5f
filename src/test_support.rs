use crate::config::{Config, Token};
use crate::github::{ApiError, BranchSnapshot, CommitInfo, HostingApi};
use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use std::cell::RefCell;
use std::collections::HashMap;

/// Fixed clock for sweep tests.
pub(crate) fn test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
}

pub(crate) fn days_ago(days: i64) -> DateTime<Utc> {
    test_now() - TimeDelta::days(days)
}

pub(crate) fn test_config(protected: &[&str]) -> Config {
    Config {
        token: Token::new("test-token"),
        protected_branches: protected.iter().map(|p| p.to_string()).collect(),
        dry_run: false,
        delete_on_merge: true,
        delete_stale: true,
        stale_days: 90,
    }
}

/// A call made against [`FakeApi`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    ListBranches(u32),
    GetCommit(String),
    DeleteRef(String),
}

/// In-memory stand-in for one GitHub repository.
///
/// Branches are listed in insertion order. Deleting a branch removes it
/// from later listings; deleting a missing branch answers 422 like GitHub.
#[derive(Debug, Default)]
pub(crate) struct FakeApi {
    branches: RefCell<Vec<BranchSnapshot>>,
    commits: HashMap<String, DateTime<Utc>>,
    commit_failures: HashMap<String, ApiError>,
    delete_failures: HashMap<String, ApiError>,
    list_failure: Option<ApiError>,
    calls: RefCell<Vec<Call>>,
}

impl FakeApi {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Add a branch whose head commit was made at `committed_at`.
    pub(crate) fn with_branch(mut self, name: &str, committed_at: DateTime<Utc>) -> Self {
        let sha = format!("sha-{}", name);
        self.commits.insert(sha.clone(), committed_at);
        self.branches.get_mut().push(BranchSnapshot::new(name, sha));
        self
    }

    /// Make the commit lookup for `branch` fail.
    pub(crate) fn failing_commit(mut self, branch: &str, err: ApiError) -> Self {
        self.commit_failures.insert(format!("sha-{}", branch), err);
        self
    }

    /// Make deleting `branch` fail.
    pub(crate) fn failing_delete(mut self, branch: &str, err: ApiError) -> Self {
        self.delete_failures.insert(branch.to_string(), err);
        self
    }

    pub(crate) fn failing_list(mut self, err: ApiError) -> Self {
        self.list_failure = Some(err);
        self
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    /// Branch names passed to `delete_ref`, in call order.
    pub(crate) fn delete_calls(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                Call::DeleteRef(name) => Some(name.clone()),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn commit_lookups(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| matches!(c, Call::GetCommit(_)))
            .count()
    }

    /// Current listing, without recording a call.
    pub(crate) fn listing(&self) -> Vec<BranchSnapshot> {
        self.branches.borrow().clone()
    }

    /// Names of branches that still exist.
    pub(crate) fn remaining(&self) -> Vec<String> {
        self.branches
            .borrow()
            .iter()
            .map(|b| b.name.clone())
            .collect()
    }
}

impl HostingApi for FakeApi {
    fn list_branches(&self, per_page: u32) -> Result<Vec<BranchSnapshot>, ApiError> {
        self.calls.borrow_mut().push(Call::ListBranches(per_page));
        if let Some(err) = &self.list_failure {
            return Err(err.clone());
        }
        Ok(self
            .branches
            .borrow()
            .iter()
            .take(per_page as usize)
            .cloned()
            .collect())
    }

    fn get_commit(&self, sha: &str) -> Result<CommitInfo, ApiError> {
        self.calls.borrow_mut().push(Call::GetCommit(sha.to_string()));
        if let Some(err) = self.commit_failures.get(sha) {
            return Err(err.clone());
        }
        self.commits
            .get(sha)
            .map(|&committed_at| CommitInfo { committed_at })
            .ok_or_else(|| ApiError::with_status(404, "No commit found for SHA"))
    }

    fn delete_ref(&self, branch: &str) -> Result<(), ApiError> {
        self.calls
            .borrow_mut()
            .push(Call::DeleteRef(branch.to_string()));
        if let Some(err) = self.delete_failures.get(branch) {
            return Err(err.clone());
        }

        let mut branches = self.branches.borrow_mut();
        match branches.iter().position(|b| b.name == branch) {
            Some(index) => {
                branches.remove(index);
                Ok(())
            }
            None => Err(ApiError::with_status(422, "Reference does not exist")),
        }
    }
}
