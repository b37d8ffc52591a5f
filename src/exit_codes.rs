//! Exit code constants for the branch-sweep CLI.
//!
//! - 0: Success (including runs that skipped or tolerated per-branch failures)
//! - 1: User error (missing token, bad inputs, unreadable trigger context)
//! - 2: GitHub API failure that aborted the run

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad inputs, invalid config, or missing workflow context.
pub const USER_ERROR: i32 = 1;

/// Fatal hosting API failure: branch listing or merge-branch deletion failed.
pub const API_FAILURE: i32 = 2;
