//! Configuration file types and defaults for branch-sweep.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Config file looked up relative to the working directory when `--config`
/// is not given.
pub const DEFAULT_CONFIG_PATH: &str = ".github/branch-sweep.yml";

/// Branches protected when nothing else is configured.
pub const DEFAULT_PROTECTED_BRANCHES: &str = "main,master,develop,development,staging,production";

// Default value functions
pub(crate) fn default_protected_branches() -> Vec<String> {
    crate::protection::parse_protected_list(DEFAULT_PROTECTED_BRANCHES)
}
pub(crate) fn default_stale_days() -> u32 {
    90
}

/// Repository-level defaults read from YAML.
///
/// Every field is optional; anything unset falls through to the built-in
/// default. The token is deliberately not configurable here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Protected names and `*` patterns.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protected_branches: Option<Vec<String>>,

    /// Report deletions without performing them.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dry_run: Option<bool>,

    /// Delete the head branch when a pull request merges.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete_on_merge: Option<bool>,

    /// Delete branches whose last commit is older than `stale_days`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete_stale: Option<bool>,

    /// Staleness threshold in days.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stale_days: Option<u32>,

    /// Unknown fields preserved for forward compatibility.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}
