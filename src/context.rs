//! Trigger context resolution for branch-sweep.
//!
//! The runner describes the triggering event through `GITHUB_*` variables and
//! a JSON payload file. This module turns those into one immutable
//! [`RunContext`] at startup; nothing downstream reads the environment.

use crate::error::{Result, SweepError};
use crate::github::DEFAULT_API_URL;
use serde::Deserialize;
use std::fmt;
use std::path::Path;

/// What triggered the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerKind {
    /// A pull request event (opened, closed, synchronized, ...).
    PullRequest,
    /// A manual dispatch.
    WorkflowDispatch,
    /// A cron schedule.
    Schedule,
    /// Any other event; the sweep does nothing for these.
    Other(String),
}

impl TriggerKind {
    /// Parse a `GITHUB_EVENT_NAME` value.
    pub fn parse(name: &str) -> Self {
        match name {
            "pull_request" => Self::PullRequest,
            "workflow_dispatch" => Self::WorkflowDispatch,
            "schedule" => Self::Schedule,
            other => Self::Other(other.to_string()),
        }
    }

    /// Event name as the runner spells it.
    pub fn as_str(&self) -> &str {
        match self {
            Self::PullRequest => "pull_request",
            Self::WorkflowDispatch => "workflow_dispatch",
            Self::Schedule => "schedule",
            Self::Other(name) => name.as_str(),
        }
    }

    /// Triggers that run the stale scan.
    pub fn is_periodic(&self) -> bool {
        matches!(self, Self::WorkflowDispatch | Self::Schedule)
    }
}

impl fmt::Display for TriggerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The pull request closure that triggered a merge cleanup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeEvent {
    /// Pull request number.
    pub number: u64,
    /// True only when the pull request was merged, not merely closed.
    pub merged: bool,
    /// Head branch name (`head.ref`).
    pub head_branch: String,
    /// Owner of the head repository; `None` when the fork has been deleted.
    pub head_repo_owner: Option<String>,
    /// Owner of the repository the action runs in.
    pub base_repo_owner: String,
}

impl MergeEvent {
    /// Returns true when the head branch lives outside the base repository.
    pub fn is_fork(&self) -> bool {
        self.head_repo_owner.as_deref() != Some(self.base_repo_owner.as_str())
    }
}

/// Immutable description of the current run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunContext {
    pub trigger: TriggerKind,
    /// Repository owner login.
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// REST API root.
    pub api_url: String,
    /// Present for `pull_request` triggers only.
    pub merge_event: Option<MergeEvent>,
}

impl RunContext {
    /// Build the context from the runner's values.
    ///
    /// # Arguments
    ///
    /// * `event_name` - `GITHUB_EVENT_NAME`
    /// * `repository` - `GITHUB_REPOSITORY`, in `owner/repo` form
    /// * `event_path` - `GITHUB_EVENT_PATH`; read only for `pull_request`
    /// * `api_url` - `GITHUB_API_URL`, defaulting to the public API
    /// * `read_payload` - false when merge cleanup is disabled, so the
    ///   payload is never opened
    pub fn resolve(
        event_name: &str,
        repository: &str,
        event_path: Option<&Path>,
        api_url: Option<&str>,
        read_payload: bool,
    ) -> Result<Self> {
        let (owner, repo) = split_repository(repository)?;
        let trigger = TriggerKind::parse(event_name);

        let merge_event = if trigger == TriggerKind::PullRequest && read_payload {
            let path = event_path.ok_or_else(|| {
                SweepError::UserError(
                    "GITHUB_EVENT_PATH is required for pull_request events".to_string(),
                )
            })?;
            Some(load_merge_event(path, owner)?)
        } else {
            None
        };

        Ok(Self {
            trigger,
            owner: owner.to_string(),
            repo: repo.to_string(),
            api_url: api_url
                .filter(|url| !url.is_empty())
                .unwrap_or(DEFAULT_API_URL)
                .to_string(),
            merge_event,
        })
    }

    /// `owner/repo`, for log lines.
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

/// Split `owner/repo` into its parts.
fn split_repository(repository: &str) -> Result<(&str, &str)> {
    match repository.split_once('/') {
        Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') => {
            Ok((owner, repo))
        }
        _ => Err(SweepError::UserError(format!(
            "GITHUB_REPOSITORY must be in 'owner/repo' form (got '{}')",
            repository
        ))),
    }
}

#[derive(Debug, Deserialize)]
struct EventPayload {
    pull_request: Option<PullRequestPayload>,
}

#[derive(Debug, Deserialize)]
struct PullRequestPayload {
    number: u64,
    #[serde(default)]
    merged: Option<bool>,
    head: HeadPayload,
}

#[derive(Debug, Deserialize)]
struct HeadPayload {
    #[serde(rename = "ref")]
    branch: String,
    repo: Option<RepoPayload>,
}

#[derive(Debug, Deserialize)]
struct RepoPayload {
    owner: OwnerPayload,
}

#[derive(Debug, Deserialize)]
struct OwnerPayload {
    login: String,
}

/// Read the pull request from an event payload file.
fn load_merge_event(path: &Path, base_repo_owner: &str) -> Result<MergeEvent> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        SweepError::UserError(format!(
            "failed to read event payload '{}': {}",
            path.display(),
            e
        ))
    })?;
    parse_merge_event(&content, base_repo_owner)
}

/// Parse the pull request from an event payload.
pub fn parse_merge_event(payload: &str, base_repo_owner: &str) -> Result<MergeEvent> {
    let payload: EventPayload = serde_json::from_str(payload)
        .map_err(|e| SweepError::UserError(format!("failed to parse event payload: {}", e)))?;

    let pr = payload.pull_request.ok_or_else(|| {
        SweepError::UserError("event payload has no pull_request object".to_string())
    })?;

    Ok(MergeEvent {
        number: pr.number,
        merged: pr.merged == Some(true),
        head_branch: pr.head.branch,
        head_repo_owner: pr.head.repo.map(|r| r.owner.login),
        base_repo_owner: base_repo_owner.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const MERGED_PAYLOAD: &str = r#"{
        "action": "closed",
        "number": 42,
        "pull_request": {
            "number": 42,
            "merged": true,
            "head": {"ref": "feat-1", "repo": {"owner": {"login": "acme"}}},
            "base": {"ref": "main", "repo": {"owner": {"login": "acme"}}}
        }
    }"#;

    #[test]
    fn test_trigger_kind_round_trips_names() {
        for name in ["pull_request", "workflow_dispatch", "schedule", "push"] {
            assert_eq!(TriggerKind::parse(name).as_str(), name);
        }
        assert_eq!(
            TriggerKind::parse("push"),
            TriggerKind::Other("push".to_string())
        );
        assert!(TriggerKind::Schedule.is_periodic());
        assert!(TriggerKind::WorkflowDispatch.is_periodic());
        assert!(!TriggerKind::PullRequest.is_periodic());
    }

    #[test]
    fn test_split_repository() {
        assert_eq!(split_repository("acme/widgets").unwrap(), ("acme", "widgets"));
        assert!(split_repository("acme").is_err());
        assert!(split_repository("/widgets").is_err());
        assert!(split_repository("acme/").is_err());
        assert!(split_repository("a/b/c").is_err());
    }

    #[test]
    fn test_parse_merged_pull_request() {
        let event = parse_merge_event(MERGED_PAYLOAD, "acme").unwrap();
        assert_eq!(event.number, 42);
        assert!(event.merged);
        assert_eq!(event.head_branch, "feat-1");
        assert_eq!(event.head_repo_owner.as_deref(), Some("acme"));
        assert!(!event.is_fork());
    }

    #[test]
    fn test_null_merged_means_not_merged() {
        let payload = r#"{"pull_request": {"number": 7, "merged": null,
            "head": {"ref": "x", "repo": {"owner": {"login": "acme"}}}}}"#;
        assert!(!parse_merge_event(payload, "acme").unwrap().merged);

        let payload = r#"{"pull_request": {"number": 7,
            "head": {"ref": "x", "repo": {"owner": {"login": "acme"}}}}}"#;
        assert!(!parse_merge_event(payload, "acme").unwrap().merged);
    }

    #[test]
    fn test_deleted_head_repo_counts_as_fork() {
        let payload = r#"{"pull_request": {"number": 7, "merged": true,
            "head": {"ref": "patch-1", "repo": null}}}"#;
        let event = parse_merge_event(payload, "acme").unwrap();
        assert_eq!(event.head_repo_owner, None);
        assert!(event.is_fork());
    }

    #[test]
    fn test_fork_owner_differs() {
        let payload = r#"{"pull_request": {"number": 7, "merged": true,
            "head": {"ref": "patch-1", "repo": {"owner": {"login": "outsider"}}}}}"#;
        assert!(parse_merge_event(payload, "acme").unwrap().is_fork());
    }

    #[test]
    fn test_payload_without_pull_request_is_rejected() {
        let err = parse_merge_event(r#"{"schedule": "0 0 * * *"}"#, "acme").unwrap_err();
        assert!(err.to_string().contains("no pull_request"));
    }

    #[test]
    fn test_resolve_pull_request_reads_payload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("event.json");
        std::fs::write(&path, MERGED_PAYLOAD).unwrap();

        let ctx =
            RunContext::resolve("pull_request", "acme/widgets", Some(&path), None, true).unwrap();
        assert_eq!(ctx.trigger, TriggerKind::PullRequest);
        assert_eq!(ctx.full_name(), "acme/widgets");
        assert_eq!(ctx.api_url, DEFAULT_API_URL);
        assert_eq!(ctx.merge_event.unwrap().base_repo_owner, "acme");
    }

    #[test]
    fn test_resolve_pull_request_requires_payload() {
        let err =
            RunContext::resolve("pull_request", "acme/widgets", None, None, true).unwrap_err();
        assert!(err.to_string().contains("GITHUB_EVENT_PATH"));
    }

    #[test]
    fn test_resolve_pull_request_skips_payload_when_not_needed() {
        let ctx = RunContext::resolve(
            "pull_request",
            "acme/widgets",
            Some(Path::new("/nonexistent/event.json")),
            None,
            false,
        )
        .unwrap();
        assert_eq!(ctx.trigger, TriggerKind::PullRequest);
        assert!(ctx.merge_event.is_none());

        let ctx = RunContext::resolve("pull_request", "acme/widgets", None, None, false).unwrap();
        assert!(ctx.merge_event.is_none());
    }

    #[test]
    fn test_resolve_schedule_ignores_payload() {
        let ctx = RunContext::resolve(
            "schedule",
            "acme/widgets",
            Some(Path::new("/nonexistent/event.json")),
            Some("https://ghe.example.com/api/v3"),
            true,
        )
        .unwrap();
        assert_eq!(ctx.trigger, TriggerKind::Schedule);
        assert!(ctx.merge_event.is_none());
        assert_eq!(ctx.api_url, "https://ghe.example.com/api/v3");
    }
}
