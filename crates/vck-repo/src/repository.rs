//! [`GitRepository`]: the accessor backed by an on-disk clone.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use vck_types::{validate_remote_name, CommitHash, RefKind};

use crate::error::{RepoError, Result};
use crate::git::GitCommand;
use crate::traits::RepositoryAccessor;

/// Where branches are enumerated from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BranchScope {
    /// Remote-tracking branches of the configured remote
    /// (`refs/remotes/<remote>/*`). A clone that is only ever fetched keeps
    /// its up-to-date branches here.
    #[default]
    Remote,
    /// Local branches (`refs/heads/*`).
    Local,
}

/// How a [`GitRepository`] maps branch and tag names onto refs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitRepositoryOptions {
    /// Remote fetched by `refresh` and used for [`BranchScope::Remote`].
    pub remote: String,
    /// Only tags starting with this prefix are enumerated. Empty keeps all.
    pub tag_prefix: String,
    pub branch_scope: BranchScope,
}

impl Default for GitRepositoryOptions {
    fn default() -> Self {
        Self {
            remote: "origin".into(),
            tag_prefix: "v".into(),
            branch_scope: BranchScope::Remote,
        }
    }
}

/// A [`RepositoryAccessor`] that shells out to `git`.
#[derive(Clone, Debug)]
pub struct GitRepository {
    git: GitCommand,
    options: GitRepositoryOptions,
}

impl GitRepository {
    /// Wrap a git runner, validating the remote name.
    pub fn new(git: GitCommand, options: GitRepositoryOptions) -> Result<Self> {
        validate_remote_name(&options.remote)
            .map_err(|e| RepoError::InvalidConfig(e.to_string()))?;
        Ok(Self { git, options })
    }

    /// Open the repository at `git_dir` with the system `git`.
    pub fn open(git_dir: impl Into<PathBuf>, options: GitRepositoryOptions) -> Result<Self> {
        Self::new(GitCommand::new(git_dir), options)
    }

    pub fn git(&self) -> &GitCommand {
        &self.git
    }

    pub fn options(&self) -> &GitRepositoryOptions {
        &self.options
    }

    fn namespace(&self, kind: RefKind) -> String {
        match (kind, self.options.branch_scope) {
            (RefKind::Branch, BranchScope::Remote) => {
                format!("refs/remotes/{}/", self.options.remote)
            }
            (RefKind::Branch, BranchScope::Local) => "refs/heads/".to_string(),
            (RefKind::Tag, _) => "refs/tags/".to_string(),
        }
    }

    fn full_name(&self, kind: RefKind, name: &str) -> String {
        format!("{}{name}", self.namespace(kind))
    }

    /// Short names under `namespace`, in git's refname order.
    fn refs_under(&self, namespace: &str) -> Result<Vec<String>> {
        let stdout = self
            .git
            .run_checked(&["for-each-ref", "--format=%(refname)", namespace])?;
        Ok(stdout
            .lines()
            .filter_map(|line| line.trim().strip_prefix(namespace))
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect())
    }

    fn ref_exists(&self, full_name: &str) -> Result<bool> {
        let spec = format!("{full_name}^{{commit}}");
        let args = ["rev-parse", "--verify", "--quiet", spec.as_str()];
        let output = self.git.run(&args)?;
        match output.code {
            Some(0) => Ok(true),
            Some(1) => Ok(false),
            _ => Err(self.git.failure(&args, &output)),
        }
    }
}

impl RepositoryAccessor for GitRepository {
    fn list_branches(&self) -> Result<Vec<String>> {
        let names = self.refs_under(&self.namespace(RefKind::Branch))?;
        Ok(match self.options.branch_scope {
            // Skip the remote's symbolic HEAD and anything nested deeper,
            // which belongs to another remote or a namespaced ref.
            BranchScope::Remote => names
                .into_iter()
                .filter(|name| name != "HEAD" && !name.contains('/'))
                .collect(),
            BranchScope::Local => names,
        })
    }

    fn list_tags(&self) -> Result<Vec<String>> {
        let prefix = self.options.tag_prefix.as_str();
        Ok(self
            .refs_under(&self.namespace(RefKind::Tag))?
            .into_iter()
            .filter(|name| name.starts_with(prefix))
            .collect())
    }

    fn contains(&self, kind: RefKind, name: &str, commit: &CommitHash) -> Result<bool> {
        let full_name = self.full_name(kind, name);
        if !self.ref_exists(&full_name)? {
            return Err(RepoError::RefNotFound {
                kind,
                name: name.to_string(),
            });
        }

        let target = format!("{full_name}^{{commit}}");
        let args = ["merge-base", "--is-ancestor", commit.as_str(), target.as_str()];
        let output = self.git.run(&args)?;
        let contained = match output.code {
            Some(0) => true,
            Some(1) => false,
            _ => return Err(self.git.failure(&args, &output)),
        };
        debug!(%kind, name, commit = %commit, contained, "containment checked");
        Ok(contained)
    }

    fn refresh(&self) -> Result<()> {
        info!(remote = %self.options.remote, "fetching from remote");
        self.git
            .run_checked(&["fetch", "--tags", "--quiet", self.options.remote.as_str()])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo(scope: BranchScope) -> GitRepository {
        GitRepository::open(
            "/srv/salt/.git",
            GitRepositoryOptions {
                branch_scope: scope,
                ..Default::default()
            },
        )
        .unwrap()
    }

    #[test]
    fn default_options() {
        let options = GitRepositoryOptions::default();
        assert_eq!(options.remote, "origin");
        assert_eq!(options.tag_prefix, "v");
        assert_eq!(options.branch_scope, BranchScope::Remote);
    }

    #[test]
    fn invalid_remote_rejected() {
        let err = GitRepository::open(
            "/srv/salt/.git",
            GitRepositoryOptions {
                remote: "--upload-pack=x".into(),
                ..Default::default()
            },
        )
        .unwrap_err();
        assert!(matches!(err, RepoError::InvalidConfig(_)));
    }

    #[test]
    fn namespaces_follow_scope() {
        let remote = repo(BranchScope::Remote);
        assert_eq!(remote.full_name(RefKind::Branch, "2017.7"), "refs/remotes/origin/2017.7");
        assert_eq!(remote.full_name(RefKind::Tag, "v2017.7.2"), "refs/tags/v2017.7.2");

        let local = repo(BranchScope::Local);
        assert_eq!(local.full_name(RefKind::Branch, "develop"), "refs/heads/develop");
    }
}
