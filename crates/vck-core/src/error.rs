use thiserror::Error;
use vck_repo::RepoError;
use vck_types::{PullRequestNumber, TypeError};

/// Errors mapping a pull request number to its head commit.
#[derive(Debug, Error)]
pub enum ResolutionError {
    #[error("pull request #{0} was not found on the remote")]
    UnknownPullRequest(PullRequestNumber),

    #[error("could not fetch pull request #{pr}: {output}")]
    Fetch { pr: PullRequestNumber, output: String },

    #[error("pull request #{pr} resolved to an invalid commit: {source}")]
    InvalidCommit {
        pr: PullRequestNumber,
        #[source]
        source: TypeError,
    },

    #[error(transparent)]
    Repository(#[from] RepoError),
}

/// Errors that end a containment search.
///
/// Every variant is reported to the user as-is; nothing is retried.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Malformed or contradictory caller input.
    #[error("invalid input: {0}")]
    Input(#[from] TypeError),

    /// A pull request number could not be mapped to a commit.
    #[error("could not resolve pull request: {0}")]
    Resolution(#[from] ResolutionError),

    /// The repository could not be read.
    #[error("repository error: {0}")]
    Repository(#[from] RepoError),

    /// The configuration file is unreadable or invalid.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Convenience type alias for search operations.
pub type Result<T> = std::result::Result<T, SearchError>;
