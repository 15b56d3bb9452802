//! The outcome of a containment search.

use serde::{Deserialize, Serialize};

use crate::commit::CommitHash;
use crate::refs::RefKind;

/// Refs that contain the searched commit.
///
/// Both lists are in the order refs were enumerated (or the filter order,
/// when the caller restricted the search). Nothing re-sorts them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// The commit that was searched for, after any PR lookup.
    pub commit: CommitHash,
    /// Matching branch names.
    pub branches: Vec<String>,
    /// Matching tag names.
    pub tags: Vec<String>,
}

impl SearchResult {
    /// An empty result for `commit`.
    pub fn new(commit: CommitHash) -> Self {
        Self {
            commit,
            branches: Vec::new(),
            tags: Vec::new(),
        }
    }

    /// Matching names for the given kind.
    pub fn refs(&self, kind: RefKind) -> &[String] {
        match kind {
            RefKind::Branch => &self.branches,
            RefKind::Tag => &self.tags,
        }
    }

    /// Returns `true` if no branch or tag contains the commit.
    pub fn is_empty(&self) -> bool {
        self.branches.is_empty() && self.tags.is_empty()
    }
}
