//! Error types for repository access.

use thiserror::Error;
use vck_types::RefKind;

/// Errors that can occur while reading the repository.
#[derive(Debug, Error)]
pub enum RepoError {
    /// The named branch or tag does not exist.
    #[error("{kind} '{name}' does not exist")]
    RefNotFound { kind: RefKind, name: String },

    /// A git command ran but exited unsuccessfully.
    #[error("`{command}` failed ({status}): {output}")]
    Git {
        command: String,
        status: String,
        output: String,
    },

    /// The git executable could not be started.
    #[error("could not run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The repository configuration is unusable.
    #[error("invalid repository configuration: {0}")]
    InvalidConfig(String),

    /// The repository is unreadable for some other reason.
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Convenience type alias for repository operations.
pub type Result<T> = std::result::Result<T, RepoError>;
