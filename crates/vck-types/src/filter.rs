//! Restricting a search to a subset of refs.

use crate::error::Result;
use crate::names::validate_ref_name;
use crate::refs::RefKind;

/// Optional branch and tag subsets restricting which refs are checked.
///
/// An empty list for a kind means "check every ref of that kind". Names
/// keep the order the caller gave them, with duplicates dropped, and that
/// order is the order results come back in.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryFilter {
    branches: Vec<String>,
    tags: Vec<String>,
}

impl QueryFilter {
    /// A filter that checks every branch and every tag.
    pub fn all() -> Self {
        Self::default()
    }

    /// Build a filter from caller-supplied names, validating each one.
    pub fn new<B, T>(branches: B, tags: T) -> Result<Self>
    where
        B: IntoIterator,
        B::Item: Into<String>,
        T: IntoIterator,
        T::Item: Into<String>,
    {
        Ok(Self {
            branches: collect_names(RefKind::Branch, branches)?,
            tags: collect_names(RefKind::Tag, tags)?,
        })
    }

    /// Branch names to check; empty means all branches.
    pub fn branches(&self) -> &[String] {
        &self.branches
    }

    /// Tag names to check; empty means all tags.
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Names to check for the given kind.
    pub fn names(&self, kind: RefKind) -> &[String] {
        match kind {
            RefKind::Branch => &self.branches,
            RefKind::Tag => &self.tags,
        }
    }

    /// Returns `true` if neither kind is restricted.
    pub fn is_unrestricted(&self) -> bool {
        self.branches.is_empty() && self.tags.is_empty()
    }
}

fn collect_names<I>(kind: RefKind, names: I) -> Result<Vec<String>>
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    let mut out: Vec<String> = Vec::new();
    for name in names {
        let name = name.into();
        validate_ref_name(kind, &name)?;
        if !out.contains(&name) {
            out.push(name);
        }
    }
    Ok(out)
}
