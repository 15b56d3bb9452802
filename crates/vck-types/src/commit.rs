use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TypeError};

/// Shortest abbreviation git accepts for an object name.
pub const MIN_HASH_LEN: usize = 4;

/// Length of a full SHA-256 object name.
pub const MAX_HASH_LEN: usize = 64;

/// A git object name, validated as hex and normalised to lowercase.
///
/// Both abbreviated (`abc1234`) and full SHA-1 or SHA-256 names are
/// accepted. Because only hex digits get through, a `CommitHash` is always
/// safe to hand to `git` as a positional argument.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CommitHash(String);

impl CommitHash {
    /// Parse and validate a hex object name.
    pub fn parse(value: &str) -> Result<Self> {
        let trimmed = value.trim();
        if trimmed.len() < MIN_HASH_LEN || trimmed.len() > MAX_HASH_LEN {
            return Err(TypeError::InvalidCommitHash {
                value: value.to_string(),
                reason: format!(
                    "expected {MIN_HASH_LEN} to {MAX_HASH_LEN} hex characters, got {}",
                    trimmed.len()
                ),
            });
        }
        if let Some(bad) = trimmed.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(TypeError::InvalidCommitHash {
                value: value.to_string(),
                reason: format!("non-hex character {bad:?}"),
            });
        }
        Ok(Self(trimmed.to_ascii_lowercase()))
    }

    /// The normalised hex string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short form (first 7 characters), as shown in chat replies.
    pub fn short(&self) -> &str {
        &self.0[..self.0.len().min(7)]
    }
}

impl fmt::Debug for CommitHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CommitHash({})", self.short())
    }
}

impl fmt::Display for CommitHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CommitHash {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for CommitHash {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<CommitHash> for String {
    fn from(hash: CommitHash) -> Self {
        hash.0
    }
}

/// A pull request number on the upstream hosting service.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PullRequestNumber(u64);

impl PullRequestNumber {
    /// Create from a raw number. Zero is not a valid PR number.
    pub fn new(number: u64) -> Result<Self> {
        if number == 0 {
            return Err(TypeError::InvalidPullRequest {
                value: number.to_string(),
                reason: "must be greater than zero".into(),
            });
        }
        Ok(Self(number))
    }

    /// Parse a PR number, accepting an optional leading `#` (e.g. `#43210`).
    pub fn parse(value: &str) -> Result<Self> {
        let digits = value.trim().trim_start_matches('#');
        let number = digits
            .parse::<u64>()
            .map_err(|e| TypeError::InvalidPullRequest {
                value: value.to_string(),
                reason: e.to_string(),
            })?;
        Self::new(number).map_err(|_| TypeError::InvalidPullRequest {
            value: value.to_string(),
            reason: "must be greater than zero".into(),
        })
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for PullRequestNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PullRequestNumber {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// The target of a containment query.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommitRef {
    /// A commit given directly by its object name.
    Hash(CommitHash),
    /// A pull request whose head commit must be looked up first.
    PullRequest(PullRequestNumber),
}

impl CommitRef {
    /// Build a target from the raw caller inputs.
    ///
    /// Exactly one of `hash` and `pull_request` must be present.
    pub fn from_parts(hash: Option<&str>, pull_request: Option<&str>) -> Result<Self> {
        match (hash, pull_request) {
            (Some(_), Some(_)) => Err(TypeError::ConflictingTarget),
            (None, None) => Err(TypeError::MissingTarget),
            (Some(hash), None) => Ok(Self::Hash(CommitHash::parse(hash)?)),
            (None, Some(pr)) => Ok(Self::PullRequest(PullRequestNumber::parse(pr)?)),
        }
    }

    /// Human label for the kind of target, used in "not found" messages.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Hash(_) => "commit",
            Self::PullRequest(_) => "pull request",
        }
    }
}

impl fmt::Display for CommitRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hash(hash) => write!(f, "{hash}"),
            Self::PullRequest(pr) => write!(f, "{pr}"),
        }
    }
}

impl From<CommitHash> for CommitRef {
    fn from(hash: CommitHash) -> Self {
        Self::Hash(hash)
    }
}

impl From<PullRequestNumber> for CommitRef {
    fn from(pr: PullRequestNumber) -> Self {
        Self::PullRequest(pr)
    }
}
