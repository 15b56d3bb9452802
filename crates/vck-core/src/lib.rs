//! Commit containment search.
//!
//! Given a commit hash or a pull request number, [`ContainmentResolver`]
//! reports which branches and tags of a repository contain that commit,
//! optionally restricted to a caller-supplied subset of refs. It is the one
//! query version-check answers; everything else in the workspace feeds it
//! input or prints its output.
//!
//! The resolver owns two collaborators, both injected:
//!
//! - a [`RepositoryAccessor`](vck_repo::RepositoryAccessor) for ref
//!   enumeration, containment checks, and refreshing from the remote
//! - a [`PullRequestResolver`] that maps PR numbers to head commits
//!
//! # Example
//!
//! ```
//! use vck_core::{CommitSearch, ContainmentResolver, SearchRequest, StaticPullRequestResolver};
//! use vck_repo::InMemoryRepository;
//!
//! let repo = InMemoryRepository::new()
//!     .with_branch("2017.7", ["4a6d8b3c"])
//!     .with_branch("2016.11", ["1111111"])
//!     .with_tag("v2017.7.2", ["4a6d8b3c"]);
//! let resolver = ContainmentResolver::new(repo, StaticPullRequestResolver::new());
//!
//! let result = resolver.search(&SearchRequest::for_commit("4a6d8b3c")).unwrap();
//! assert_eq!(result.branches, ["2017.7"]);
//! assert_eq!(result.tags, ["v2017.7.2"]);
//! ```

pub mod config;
pub mod error;
pub mod pull_request;
pub mod search;

pub use config::CheckConfig;
pub use error::{ResolutionError, Result, SearchError};
pub use pull_request::{GitPullRequestResolver, PullRequestResolver, StaticPullRequestResolver};
pub use search::{CommitSearch, ContainmentResolver, FetchPolicy, SearchRequest};

pub use vck_types::{CommitHash, CommitRef, PullRequestNumber, QueryFilter, RefKind, SearchResult};
