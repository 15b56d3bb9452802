//! Repository access for version-check.
//!
//! The containment search never talks to git directly. It goes through a
//! [`RepositoryAccessor`], which can enumerate branches and tags, answer
//! "does this ref contain this commit", and refresh local refs from the
//! remote.
//!
//! # Modules
//!
//! - [`error`] — Error types for repository access
//! - [`traits`] — The [`RepositoryAccessor`] trait
//! - [`git`] — [`GitCommand`], a runner for `git` bound to one repository
//! - [`repository`] — [`GitRepository`], the accessor backed by a real clone
//! - [`memory`] — [`InMemoryRepository`] for tests

pub mod error;
pub mod git;
pub mod memory;
pub mod repository;
pub mod traits;

pub use error::{RepoError, Result};
pub use git::{GitCommand, GitOutput};
pub use memory::InMemoryRepository;
pub use repository::{BranchScope, GitRepository, GitRepositoryOptions};
pub use traits::RepositoryAccessor;
