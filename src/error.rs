//! Error types for the branch-sweep CLI.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.

use crate::exit_codes;
use crate::github::ApiError;
use thiserror::Error;

/// Main error type for branch-sweep operations.
///
/// Anything that reaches `main` as a `SweepError` is fatal for the run.
/// Per-branch failures during the stale scan never become a `SweepError`;
/// they are recorded as outcomes instead.
#[derive(Error, Debug)]
pub enum SweepError {
    /// Invalid inputs, config, or trigger context.
    #[error("{0}")]
    UserError(String),

    /// A GitHub API call failed in a way the run cannot tolerate.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Writing the run report failed.
    #[error("failed to write report: {0}")]
    ReportError(String),
}

impl SweepError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            SweepError::UserError(_) => exit_codes::USER_ERROR,
            SweepError::Api(_) => exit_codes::API_FAILURE,
            SweepError::ReportError(_) => exit_codes::USER_ERROR,
        }
    }
}

/// Result type alias for branch-sweep operations.
pub type Result<T> = std::result::Result<T, SweepError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_error_has_correct_exit_code() {
        let err = SweepError::UserError("missing github_token".to_string());
        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
    }

    #[test]
    fn api_error_has_correct_exit_code() {
        let err = SweepError::from(ApiError::with_status(500, "Server Error"));
        assert_eq!(err.exit_code(), exit_codes::API_FAILURE);
    }

    #[test]
    fn error_messages_are_descriptive() {
        let err = SweepError::UserError("stale_days must be greater than 0".to_string());
        assert_eq!(err.to_string(), "stale_days must be greater than 0");

        let err = SweepError::from(ApiError::with_status(403, "Resource not accessible"));
        assert_eq!(err.to_string(), "HTTP 403: Resource not accessible");

        let err = SweepError::ReportError("permission denied".to_string());
        assert_eq!(err.to_string(), "failed to write report: permission denied");
    }
}
