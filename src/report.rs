//! Run reports for branch-sweep.
//!
//! Two optional sinks for the final [`Summary`]:
//! - a JSON file (`--report <path>`), one pretty-printed object per run
//! - the job summary (`GITHUB_STEP_SUMMARY`), appended as Markdown
//!
//! # Report Format
//!
//! ```json
//! {
//!   "generated_at": "2025-06-01T12:00:00Z",
//!   "version": "0.1.0",
//!   "repository": "acme/widgets",
//!   "trigger": "schedule",
//!   "dry_run": false,
//!   "stale": {
//!     "outcomes": [{"branch": "old", "age_days": 120, "status": "deleted"}],
//!     "deleted_count": 1
//!   }
//! }
//! ```

use crate::error::{Result, SweepError};
use crate::sweep::display::result_text;
use crate::sweep::{BranchOutcome, Summary};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

/// A summary stamped with when and by what it was produced.
#[derive(Debug, Serialize)]
pub struct RunReport<'a> {
    /// RFC3339 timestamp of the run.
    pub generated_at: DateTime<Utc>,
    /// branch-sweep version.
    pub version: &'static str,
    #[serde(flatten)]
    pub summary: &'a Summary,
}

impl<'a> RunReport<'a> {
    pub fn new(summary: &'a Summary, generated_at: DateTime<Utc>) -> Self {
        Self {
            generated_at,
            version: env!("CARGO_PKG_VERSION"),
            summary,
        }
    }

    /// Serialize the report as pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| SweepError::ReportError(format!("failed to serialize report: {}", e)))
    }
}

/// Write the JSON report to `path`, creating parent directories as needed.
pub fn write_report(path: &Path, report: &RunReport<'_>) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            SweepError::ReportError(format!("'{}': {}", parent.display(), e))
        })?;
    }

    let mut json = report.to_json()?;
    json.push('\n');
    fs::write(path, json)
        .map_err(|e| SweepError::ReportError(format!("'{}': {}", path.display(), e)))
}

/// Append the Markdown rendering of `summary` to the job summary file.
pub fn append_step_summary(path: &Path, summary: &Summary) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| SweepError::ReportError(format!("'{}': {}", path.display(), e)))?;

    file.write_all(render_markdown(summary).as_bytes())
        .map_err(|e| SweepError::ReportError(format!("'{}': {}", path.display(), e)))
}

/// Render a summary as a Markdown section.
pub fn render_markdown(summary: &Summary) -> String {
    let mut out = String::new();
    out.push_str(&format!("### Branch sweep: {}\n\n", summary.repository));
    out.push_str(&format!("- Trigger: `{}`\n", summary.trigger));
    if summary.dry_run {
        out.push_str("- Mode: dry run\n");
    }
    out.push_str(&format!("- Deleted: {}\n", summary.deleted_count()));

    let rows: Vec<&BranchOutcome> = summary
        .merge
        .iter()
        .chain(summary.stale.iter().flat_map(|s| s.outcomes.iter()))
        .collect();

    if rows.is_empty() {
        out.push_str("\nNo branches evaluated.\n");
        return out;
    }

    out.push_str("\n| Branch | Age (days) | Result |\n|---|---|---|\n");
    for row in rows {
        let age = row.age_days.map(|d| d.to_string()).unwrap_or_default();
        let result = result_text(&row.outcome).replace('|', "\\|");
        out.push_str(&format!(
            "| `{}` | {} | {} |\n",
            row.branch, age, result
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sweep::{Outcome, StaleReport};
    use crate::test_support::test_now;
    use tempfile::TempDir;

    fn stale_summary() -> Summary {
        Summary {
            repository: "acme/widgets".to_string(),
            trigger: "schedule".to_string(),
            dry_run: false,
            merge: None,
            stale: Some(StaleReport {
                outcomes: vec![
                    BranchOutcome::new(
                        "main",
                        Outcome::Protected {
                            pattern: "main".to_string(),
                            wildcard: false,
                        },
                    ),
                    BranchOutcome::new("old", Outcome::Deleted).with_age(120),
                ],
                deleted_count: 1,
            }),
        }
    }

    #[test]
    fn test_report_json_shape() {
        let summary = stale_summary();
        let json = RunReport::new(&summary, test_now()).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["generated_at"], "2025-06-01T12:00:00Z");
        assert_eq!(value["repository"], "acme/widgets");
        assert_eq!(value["trigger"], "schedule");
        assert_eq!(value["stale"]["deleted_count"], 1);
        assert_eq!(value["stale"]["outcomes"][0]["status"], "protected");
        assert_eq!(value["stale"]["outcomes"][0]["pattern"], "main");
        assert_eq!(value["stale"]["outcomes"][1]["status"], "deleted");
        assert_eq!(value["stale"]["outcomes"][1]["age_days"], 120);
        assert!(value.get("merge").is_none());
    }

    #[test]
    fn test_write_report_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out").join("sweep.json");
        let summary = stale_summary();

        write_report(&path, &RunReport::new(&summary, test_now())).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.ends_with('\n'));
        assert!(content.contains("\"repository\": \"acme/widgets\""));
    }

    #[test]
    fn test_markdown_lists_every_branch() {
        let markdown = render_markdown(&stale_summary());
        assert!(markdown.contains("### Branch sweep: acme/widgets"));
        assert!(markdown.contains("- Deleted: 1"));
        assert!(markdown.contains("| `main` |  | skipped (protected) [main] |"));
        assert!(markdown.contains("| `old` | 120 | deleted |"));
    }

    #[test]
    fn test_markdown_for_noop_run() {
        let summary = Summary {
            repository: "acme/widgets".to_string(),
            trigger: "push".to_string(),
            dry_run: true,
            merge: None,
            stale: None,
        };
        let markdown = render_markdown(&summary);
        assert!(markdown.contains("- Mode: dry run"));
        assert!(markdown.contains("No branches evaluated."));
    }

    #[test]
    fn test_step_summary_appends() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("summary.md");
        fs::write(&path, "# Existing\n").unwrap();

        append_step_summary(&path, &stale_summary()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("# Existing\n"));
        assert!(content.contains("### Branch sweep"));
    }
}
