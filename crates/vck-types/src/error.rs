use thiserror::Error;

/// Errors produced while validating caller input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid commit hash {value:?}: {reason}")]
    InvalidCommitHash { value: String, reason: String },

    #[error("invalid pull request number {value:?}: {reason}")]
    InvalidPullRequest { value: String, reason: String },

    #[error("invalid {kind} name {name:?}: {reason}")]
    InvalidRefName {
        kind: &'static str,
        name: String,
        reason: String,
    },

    #[error("provide either a commit hash or a pull request number, not both")]
    ConflictingTarget,

    #[error("a commit hash or a pull request number is required")]
    MissingTarget,
}

/// Convenience type alias for validation results.
pub type Result<T> = std::result::Result<T, TypeError>;
