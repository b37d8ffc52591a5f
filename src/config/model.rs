//! Config struct definition and raw input model.

use std::fmt;

/// Opaque API credential. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The raw secret, for building the Authorization header.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(***)")
    }
}

/// Raw string inputs, exactly as the runner or command line supplied them.
///
/// An empty string counts as "not supplied", which is how the Actions runner
/// presents inputs without a value.
#[derive(Debug, Clone, Default)]
pub struct Inputs {
    pub github_token: Option<String>,
    pub protected_branches: Option<String>,
    pub dry_run: Option<String>,
    pub delete_on_merge: Option<String>,
    pub delete_stale: Option<String>,
    pub stale_days: Option<String>,
}

/// Immutable configuration snapshot for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Credential for all hosting API calls.
    pub token: Token,

    /// Protected names and `*` patterns, in configured order.
    pub protected_branches: Vec<String>,

    /// Compute and report decisions without deleting anything.
    pub dry_run: bool,

    /// Run the merge cleanup on `pull_request` triggers.
    pub delete_on_merge: bool,

    /// Run the stale cleanup on `workflow_dispatch` and `schedule` triggers.
    pub delete_stale: bool,

    /// Age in days beyond which a branch is stale.
    pub stale_days: u32,
}
