//! GitHub REST API access.
//!
//! The sweep pipelines only talk to GitHub through the [`HostingApi`] trait,
//! which keeps them testable against an in-memory fake. [`GitHubClient`] is
//! the real implementation over a blocking reqwest client.

mod client;
mod types;

pub use client::{DEFAULT_API_URL, GitHubClient};
pub use types::{BranchSnapshot, CommitInfo};

use std::fmt;
use thiserror::Error;

/// HTTP status GitHub returns when deleting a ref that no longer exists.
pub const UNPROCESSABLE: u16 = 422;

/// A failed GitHub API call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// HTTP status, if a response was received at all.
    pub status: Option<u16>,
    /// Message from the API body, or the transport error.
    pub message: String,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(code) => write!(f, "HTTP {}: {}", code, self.message),
            None => f.write_str(&self.message),
        }
    }
}

impl ApiError {
    /// Error for a response with the given status.
    pub fn with_status(status: u16, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            message: message.into(),
        }
    }

    /// Error raised before any response arrived (connection, TLS, decoding).
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
        }
    }

    /// Returns true for the "reference does not exist" condition on delete.
    pub fn is_unprocessable(&self) -> bool {
        self.status == Some(UNPROCESSABLE)
    }
}

/// Operations the sweep needs from the hosting service, scoped to one
/// repository.
pub trait HostingApi {
    /// List up to `per_page` branches. Only the first page is fetched.
    fn list_branches(&self, per_page: u32) -> Result<Vec<BranchSnapshot>, ApiError>;

    /// Resolve a commit sha to its committer metadata.
    fn get_commit(&self, sha: &str) -> Result<CommitInfo, ApiError>;

    /// Delete `refs/heads/<branch>`.
    fn delete_ref(&self, branch: &str) -> Result<(), ApiError>;
}
