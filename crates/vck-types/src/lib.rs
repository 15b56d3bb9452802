//! Foundation types for version-check.
//!
//! Every other crate in the workspace speaks in these types. They are plain
//! values, constructed per query and validated on construction, so anything
//! holding a [`CommitHash`] or a [`QueryFilter`] can pass it to `git`
//! without further checks.
//!
//! # Key Types
//!
//! - [`CommitHash`] — Validated, lowercase hex object name (abbreviated or full)
//! - [`PullRequestNumber`] — Positive PR number, accepts a leading `#`
//! - [`CommitRef`] — The query target: a hash or a PR number, never both
//! - [`RefKind`] — Branch or tag
//! - [`QueryFilter`] — Optional branch/tag subsets restricting the search
//! - [`SearchResult`] — Matching branches and tags in enumeration order

pub mod commit;
pub mod error;
pub mod filter;
pub mod names;
pub mod refs;
pub mod result;

pub use commit::{CommitHash, CommitRef, PullRequestNumber};
pub use error::{Result, TypeError};
pub use filter::QueryFilter;
pub use names::{validate_ref_name, validate_remote_name};
pub use refs::RefKind;
pub use result::SearchResult;
