//! Implementation of the `branch-sweep check` command.

use super::load_file_config;
use crate::cli::CheckArgs;
use crate::config::types::default_protected_branches;
use crate::error::Result;
use crate::protection::{ProtectedPatterns, Protection, parse_protected_list};
use tracing::warn;

/// Print, for each branch name, whether the configured patterns protect it.
///
/// Uses the same pattern source precedence as `run`: the
/// `protected_branches` input, then the config file, then the defaults.
pub fn cmd_check(args: CheckArgs) -> Result<()> {
    let patterns = resolve_patterns(&args)?;
    let protected = ProtectedPatterns::new(&patterns);
    if protected.is_empty() {
        warn!("No protected branches configured; every branch is deletable");
    }

    for branch in &args.branches {
        println!("{}", check_line(&protected, branch));
    }
    println!("{}", tally_line(&protected, &args.branches));

    Ok(())
}

fn tally_line(protected: &ProtectedPatterns, branches: &[String]) -> String {
    let count = branches
        .iter()
        .filter(|branch| protected.is_protected(branch))
        .count();
    format!("{} of {} branches protected", count, branches.len())
}

fn resolve_patterns(args: &CheckArgs) -> Result<Vec<String>> {
    if let Some(raw) = args.protected_branches.as_deref().filter(|s| !s.is_empty()) {
        return Ok(parse_protected_list(raw));
    }

    let file = load_file_config(args.config.as_deref())?;
    Ok(file
        .protected_branches
        .unwrap_or_else(default_protected_branches))
}

fn check_line(protected: &ProtectedPatterns, branch: &str) -> String {
    match protected.check(branch) {
        Some(Protection::Exact(name)) => format!("{}: protected (name '{}')", branch, name),
        Some(Protection::Pattern(pattern)) => {
            format!("{}: protected (pattern '{}')", branch, pattern)
        }
        None => format!("{}: deletable", branch),
    }
}
