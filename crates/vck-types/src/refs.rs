//! Ref kinds and their namespaces.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The two kinds of ref a containment query looks at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RefKind {
    /// A branch: a mutable pointer that advances as commits land.
    Branch,
    /// A tag: a fixed pointer, typically a release.
    Tag,
}

impl RefKind {
    /// Lowercase name used in messages ("branch" / "tag").
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Branch => "branch",
            Self::Tag => "tag",
        }
    }

    /// Heading used when printing results ("Branches" / "Tags").
    pub fn heading(&self) -> &'static str {
        match self {
            Self::Branch => "Branches",
            Self::Tag => "Tags",
        }
    }
}

impl fmt::Display for RefKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
