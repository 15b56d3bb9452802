//! Mapping pull request numbers to head commits.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use tracing::{debug, info};
use vck_repo::{GitCommand, GitRepository};
use vck_types::{CommitHash, PullRequestNumber};

use crate::error::ResolutionError;

/// Looks up the head commit of a pull request.
pub trait PullRequestResolver: Send + Sync {
    fn resolve(&self, pr: PullRequestNumber) -> Result<CommitHash, ResolutionError>;
}

impl<F> PullRequestResolver for F
where
    F: Fn(PullRequestNumber) -> Result<CommitHash, ResolutionError> + Send + Sync,
{
    fn resolve(&self, pr: PullRequestNumber) -> Result<CommitHash, ResolutionError> {
        self(pr)
    }
}

/// Resolves pull requests through the hosting service's `pull/<n>/head`
/// refs, which GitHub exposes on every clone's remote.
///
/// The PR head is fetched into `FETCH_HEAD` only. No local branch is
/// created, so nothing needs cleaning up afterwards.
#[derive(Clone, Debug)]
pub struct GitPullRequestResolver {
    git: GitCommand,
    remote: String,
}

impl GitPullRequestResolver {
    /// Resolve against `remote` of an already validated repository.
    pub fn for_repository(repository: &GitRepository) -> Self {
        Self {
            git: repository.git().clone(),
            remote: repository.options().remote.clone(),
        }
    }

    pub fn remote(&self) -> &str {
        &self.remote
    }
}

impl PullRequestResolver for GitPullRequestResolver {
    fn resolve(&self, pr: PullRequestNumber) -> Result<CommitHash, ResolutionError> {
        info!(%pr, remote = %self.remote, "resolving pull request head");

        let refspec = format!("pull/{pr}/head");
        let fetch = self
            .git
            .run(&["fetch", "--quiet", self.remote.as_str(), refspec.as_str()])?;
        if !fetch.success() {
            let output = fetch.combined();
            if output.contains("couldn't find remote ref") {
                return Err(ResolutionError::UnknownPullRequest(pr));
            }
            return Err(ResolutionError::Fetch { pr, output });
        }

        let stdout = self.git.run_checked(&["rev-parse", "FETCH_HEAD"])?;
        let hash = CommitHash::parse(stdout.trim())
            .map_err(|source| ResolutionError::InvalidCommit { pr, source })?;
        debug!(%pr, commit = %hash, "pull request resolved");
        Ok(hash)
    }
}

/// A fixed table of pull requests, for tests and offline use.
#[derive(Debug, Default)]
pub struct StaticPullRequestResolver {
    heads: HashMap<PullRequestNumber, CommitHash>,
    calls: AtomicUsize,
}

impl StaticPullRequestResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the head commit of `pr`.
    pub fn with(mut self, pr: PullRequestNumber, head: CommitHash) -> Self {
        self.heads.insert(pr, head);
        self
    }

    /// Number of `resolve` calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl PullRequestResolver for StaticPullRequestResolver {
    fn resolve(&self, pr: PullRequestNumber) -> Result<CommitHash, ResolutionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.heads
            .get(&pr)
            .cloned()
            .ok_or(ResolutionError::UnknownPullRequest(pr))
    }
}
