use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use vck_repo::{BranchScope, GitRepository, GitRepositoryOptions};

use crate::error::{Result, SearchError};
use crate::pull_request::GitPullRequestResolver;
use crate::search::{ContainmentResolver, FetchPolicy};

/// Where and how to search.
///
/// Every field has a default, so a config file only needs the keys it
/// changes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckConfig {
    /// The clone's `.git` directory.
    pub git_dir: PathBuf,
    /// Remote that is fetched and whose branches are searched.
    pub remote: String,
    /// Only tags starting with this prefix count as releases.
    pub tag_prefix: String,
    pub branch_scope: BranchScope,
    pub fetch_policy: FetchPolicy,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            git_dir: PathBuf::from("/salt/.git"),
            remote: "origin".into(),
            tag_prefix: "v".into(),
            branch_scope: BranchScope::Remote,
            fetch_policy: FetchPolicy::Advisory,
        }
    }
}

impl CheckConfig {
    /// Parse from TOML text. Unknown tables (e.g. `[server]`) are ignored.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| SearchError::Config(e.to_string()))
    }

    /// Load from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| SearchError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    pub fn repository_options(&self) -> GitRepositoryOptions {
        GitRepositoryOptions {
            remote: self.remote.clone(),
            tag_prefix: self.tag_prefix.clone(),
            branch_scope: self.branch_scope,
        }
    }

    /// Open the configured clone.
    pub fn open_repository(&self) -> Result<GitRepository> {
        Ok(GitRepository::open(&self.git_dir, self.repository_options())?)
    }

    /// A resolver over the configured clone, resolving PRs through git.
    pub fn build_resolver(
        &self,
    ) -> Result<ContainmentResolver<GitRepository, GitPullRequestResolver>> {
        let repository = self.open_repository()?;
        let pull_requests = GitPullRequestResolver::for_repository(&repository);
        Ok(ContainmentResolver::new(repository, pull_requests).with_fetch_policy(self.fetch_policy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let c = CheckConfig::default();
        assert_eq!(c.git_dir, PathBuf::from("/salt/.git"));
        assert_eq!(c.remote, "origin");
        assert_eq!(c.tag_prefix, "v");
        assert_eq!(c.branch_scope, BranchScope::Remote);
        assert_eq!(c.fetch_policy, FetchPolicy::Advisory);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let c = CheckConfig::from_toml_str(
            r#"
            git_dir = "/srv/salt/.git"
            fetch_policy = "required"
            branch_scope = "local"

            [server]
            bind_addr = "0.0.0.0:8888"
            "#,
        )
        .unwrap();
        assert_eq!(c.git_dir, PathBuf::from("/srv/salt/.git"));
        assert_eq!(c.fetch_policy, FetchPolicy::Required);
        assert_eq!(c.branch_scope, BranchScope::Local);
        assert_eq!(c.remote, "origin");
    }

    #[test]
    fn bad_value_is_config_error() {
        let err = CheckConfig::from_toml_str("fetch_policy = \"sometimes\"").unwrap_err();
        assert!(matches!(err, SearchError::Config(_)));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("version-check.toml");
        std::fs::write(&path, "remote = \"upstream\"\ntag_prefix = \"\"\n").unwrap();

        let c = CheckConfig::load(&path).unwrap();
        assert_eq!(c.remote, "upstream");
        assert_eq!(c.tag_prefix, "");
    }

    #[test]
    fn missing_file_is_config_error() {
        let err = CheckConfig::load(Path::new("/nonexistent/version-check.toml")).unwrap_err();
        assert!(matches!(err, SearchError::Config(_)));
    }

    #[test]
    fn builds_resolver_with_policy() {
        let c = CheckConfig {
            fetch_policy: FetchPolicy::Required,
            remote: "upstream".into(),
            ..Default::default()
        };
        let resolver = c.build_resolver().unwrap();
        assert_eq!(resolver.fetch_policy(), FetchPolicy::Required);
        assert_eq!(resolver.pull_requests().remote(), "upstream");
    }

    #[test]
    fn invalid_remote_is_repository_error() {
        let c = CheckConfig {
            remote: "bad/remote".into(),
            ..Default::default()
        };
        assert!(matches!(c.build_resolver(), Err(SearchError::Repository(_))));
    }
}
