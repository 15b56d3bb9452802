//! The [`RepositoryAccessor`] trait defining what the search needs from a
//! repository.

use std::sync::Arc;

use vck_types::{CommitHash, RefKind};

use crate::error::Result;

/// Read access to the branches and tags of one repository.
///
/// Enumeration order matters: callers report matches in exactly the order
/// `list_branches` and `list_tags` return them.
pub trait RepositoryAccessor: Send + Sync {
    /// Short names of all branches, in enumeration order.
    fn list_branches(&self) -> Result<Vec<String>>;

    /// Short names of all tags, in enumeration order.
    fn list_tags(&self) -> Result<Vec<String>>;

    /// Returns `true` if `commit` is an ancestor of (or equal to) the tip of
    /// the named ref.
    ///
    /// Fails with [`RefNotFound`](crate::RepoError::RefNotFound) if the ref
    /// does not exist.
    fn contains(&self, kind: RefKind, name: &str, commit: &CommitHash) -> Result<bool>;

    /// Update local refs from the remote. The default does nothing.
    fn refresh(&self) -> Result<()> {
        Ok(())
    }

    /// Short names of all refs of `kind`.
    fn list_refs(&self, kind: RefKind) -> Result<Vec<String>> {
        match kind {
            RefKind::Branch => self.list_branches(),
            RefKind::Tag => self.list_tags(),
        }
    }
}

impl<T: RepositoryAccessor + ?Sized> RepositoryAccessor for Box<T> {
    fn list_branches(&self) -> Result<Vec<String>> {
        (**self).list_branches()
    }

    fn list_tags(&self) -> Result<Vec<String>> {
        (**self).list_tags()
    }

    fn contains(&self, kind: RefKind, name: &str, commit: &CommitHash) -> Result<bool> {
        (**self).contains(kind, name, commit)
    }

    fn refresh(&self) -> Result<()> {
        (**self).refresh()
    }
}

impl<T: RepositoryAccessor + ?Sized> RepositoryAccessor for Arc<T> {
    fn list_branches(&self) -> Result<Vec<String>> {
        (**self).list_branches()
    }

    fn list_tags(&self) -> Result<Vec<String>> {
        (**self).list_tags()
    }

    fn contains(&self, kind: RefKind, name: &str, commit: &CommitHash) -> Result<bool> {
        (**self).contains(kind, name, commit)
    }

    fn refresh(&self) -> Result<()> {
        (**self).refresh()
    }
}
