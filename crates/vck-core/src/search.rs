//! The containment search itself.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use vck_repo::RepositoryAccessor;
use vck_types::{CommitHash, CommitRef, QueryFilter, RefKind, SearchResult};

use crate::error::Result;
use crate::pull_request::PullRequestResolver;

/// What to do when refreshing from the remote fails.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchPolicy {
    /// Log the failure and search the (possibly stale) local refs.
    #[default]
    Advisory,
    /// Abort the search with a repository error.
    Required,
}

/// Raw caller input for one search, before validation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchRequest {
    pub commit: Option<String>,
    pub pull_request: Option<String>,
    pub branches: Vec<String>,
    pub tags: Vec<String>,
    pub skip_fetch: bool,
}

impl SearchRequest {
    pub fn for_commit(hash: impl Into<String>) -> Self {
        Self {
            commit: Some(hash.into()),
            ..Default::default()
        }
    }

    pub fn for_pull_request(pr: impl Into<String>) -> Self {
        Self {
            pull_request: Some(pr.into()),
            ..Default::default()
        }
    }

    pub fn with_branches<I, S>(mut self, branches: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.branches = branches.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn skip_fetch(mut self, skip: bool) -> Self {
        self.skip_fetch = skip;
        self
    }

    /// Validate into a query target and filter.
    pub fn validate(&self) -> Result<(CommitRef, QueryFilter)> {
        let commit = CommitRef::from_parts(self.commit.as_deref(), self.pull_request.as_deref())?;
        let filter = QueryFilter::new(self.branches.iter().cloned(), self.tags.iter().cloned())?;
        Ok((commit, filter))
    }
}

/// Anything that can answer a [`SearchRequest`].
pub trait CommitSearch: Send + Sync {
    fn search(&self, request: &SearchRequest) -> Result<SearchResult>;
}

/// Finds the branches and tags that contain a commit.
#[derive(Debug)]
pub struct ContainmentResolver<R, P> {
    repository: R,
    pull_requests: P,
    fetch_policy: FetchPolicy,
}

impl<R, P> ContainmentResolver<R, P>
where
    R: RepositoryAccessor,
    P: PullRequestResolver,
{
    pub fn new(repository: R, pull_requests: P) -> Self {
        Self {
            repository,
            pull_requests,
            fetch_policy: FetchPolicy::default(),
        }
    }

    pub fn with_fetch_policy(mut self, policy: FetchPolicy) -> Self {
        self.fetch_policy = policy;
        self
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn pull_requests(&self) -> &P {
        &self.pull_requests
    }

    pub fn fetch_policy(&self) -> FetchPolicy {
        self.fetch_policy
    }

    /// Search for `commit` in the refs selected by `filter`.
    ///
    /// Unless `skip_fetch` is set, local refs are refreshed first. A failing
    /// containment check on any ref aborts the whole search.
    pub fn resolve(
        &self,
        commit: &CommitRef,
        filter: &QueryFilter,
        skip_fetch: bool,
    ) -> Result<SearchResult> {
        if !skip_fetch {
            self.refresh()?;
        }

        let hash = self.commit_hash(commit)?;
        info!(target_ref = %commit, commit = %hash, "searching refs");

        let mut result = SearchResult::new(hash);
        result.branches = self.matching(RefKind::Branch, filter, &result.commit)?;
        result.tags = self.matching(RefKind::Tag, filter, &result.commit)?;

        info!(
            commit = %result.commit,
            branches = result.branches.len(),
            tags = result.tags.len(),
            "search complete"
        );
        Ok(result)
    }

    fn refresh(&self) -> Result<()> {
        match self.repository.refresh() {
            Ok(()) => Ok(()),
            Err(err) => match self.fetch_policy {
                FetchPolicy::Advisory => {
                    warn!(error = %err, "fetch failed, searching local refs");
                    Ok(())
                }
                FetchPolicy::Required => Err(err.into()),
            },
        }
    }

    fn commit_hash(&self, commit: &CommitRef) -> Result<CommitHash> {
        match commit {
            CommitRef::Hash(hash) => Ok(hash.clone()),
            CommitRef::PullRequest(pr) => Ok(self.pull_requests.resolve(*pr)?),
        }
    }

    fn matching(
        &self,
        kind: RefKind,
        filter: &QueryFilter,
        commit: &CommitHash,
    ) -> Result<Vec<String>> {
        let requested = filter.names(kind);
        let candidates = if requested.is_empty() {
            self.repository.list_refs(kind)?
        } else {
            requested.to_vec()
        };
        debug!(%kind, candidates = candidates.len(), "checking candidates");

        let mut matches = Vec::new();
        for name in candidates {
            if self.repository.contains(kind, &name, commit)? {
                matches.push(name);
            }
        }
        Ok(matches)
    }
}

impl<R, P> CommitSearch for ContainmentResolver<R, P>
where
    R: RepositoryAccessor,
    P: PullRequestResolver,
{
    fn search(&self, request: &SearchRequest) -> Result<SearchResult> {
        let (commit, filter) = request.validate()?;
        self.resolve(&commit, &filter, request.skip_fetch)
    }
}
