//! In-memory repository for testing.
//!
//! [`InMemoryRepository`] holds branches and tags in insertion order, each
//! with the set of commits it contains. It counts every call so tests can
//! assert which operations a search performed, and it can be told to fail
//! a refresh or a specific containment check.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use vck_types::{CommitHash, RefKind};

use crate::error::{RepoError, Result};
use crate::traits::RepositoryAccessor;

#[derive(Debug, Clone)]
struct MemoryRef {
    name: String,
    commits: Vec<String>,
}

impl MemoryRef {
    /// Abbreviated hashes match any full hash they prefix, as in git.
    fn contains(&self, commit: &CommitHash) -> bool {
        self.commits
            .iter()
            .any(|known| known.starts_with(commit.as_str()))
    }
}

#[derive(Debug, Default)]
struct Failures {
    refresh: Option<String>,
    containment: HashSet<(RefKind, String)>,
}

/// An in-memory implementation of [`RepositoryAccessor`].
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    branches: RwLock<Vec<MemoryRef>>,
    tags: RwLock<Vec<MemoryRef>>,
    failures: RwLock<Failures>,
    refresh_calls: AtomicUsize,
    list_calls: AtomicUsize,
    contains_calls: AtomicUsize,
}

// A panic while a test held a lock leaves the data intact; keep using it.
fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

impl InMemoryRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a branch containing `commits`. Enumeration follows insertion order.
    pub fn with_branch<I, S>(self, name: &str, commits: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.insert(RefKind::Branch, name, commits);
        self
    }

    /// Add a tag containing `commits`. Enumeration follows insertion order.
    pub fn with_tag<I, S>(self, name: &str, commits: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.insert(RefKind::Tag, name, commits);
        self
    }

    /// Make every `refresh` call fail with `message`.
    pub fn failing_refresh(self, message: &str) -> Self {
        write(&self.failures).refresh = Some(message.to_string());
        self
    }

    /// Make containment checks against one ref fail.
    pub fn failing_contains(self, kind: RefKind, name: &str) -> Self {
        write(&self.failures)
            .containment
            .insert((kind, name.to_string()));
        self
    }

    /// Add (or extend) a ref after construction.
    pub fn insert<I, S>(&self, kind: RefKind, name: &str, commits: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let commits = commits
            .into_iter()
            .map(|c| c.as_ref().to_ascii_lowercase());
        let lock = match kind {
            RefKind::Branch => &self.branches,
            RefKind::Tag => &self.tags,
        };
        let mut refs = write(lock);
        match refs.iter().position(|r| r.name == name) {
            Some(index) => refs[index].commits.extend(commits),
            None => refs.push(MemoryRef {
                name: name.to_string(),
                commits: commits.collect(),
            }),
        }
    }

    pub fn refresh_calls(&self) -> usize {
        self.refresh_calls.load(Ordering::SeqCst)
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn contains_calls(&self) -> usize {
        self.contains_calls.load(Ordering::SeqCst)
    }

    /// Total number of accessor calls of any kind.
    pub fn total_calls(&self) -> usize {
        self.refresh_calls() + self.list_calls() + self.contains_calls()
    }

    fn names(&self, kind: RefKind) -> Result<Vec<String>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        let lock = match kind {
            RefKind::Branch => &self.branches,
            RefKind::Tag => &self.tags,
        };
        let refs = read(lock);
        Ok(refs.iter().map(|r| r.name.clone()).collect())
    }
}

impl RepositoryAccessor for InMemoryRepository {
    fn list_branches(&self) -> Result<Vec<String>> {
        self.names(RefKind::Branch)
    }

    fn list_tags(&self) -> Result<Vec<String>> {
        self.names(RefKind::Tag)
    }

    fn contains(&self, kind: RefKind, name: &str, commit: &CommitHash) -> Result<bool> {
        self.contains_calls.fetch_add(1, Ordering::SeqCst);

        let failures = read(&self.failures);
        if failures.containment.contains(&(kind, name.to_string())) {
            return Err(RepoError::Unavailable(format!(
                "injected failure checking {kind} {name}"
            )));
        }

        let lock = match kind {
            RefKind::Branch => &self.branches,
            RefKind::Tag => &self.tags,
        };
        let refs = read(lock);
        refs.iter()
            .find(|r| r.name == name)
            .map(|r| r.contains(commit))
            .ok_or_else(|| RepoError::RefNotFound {
                kind,
                name: name.to_string(),
            })
    }

    fn refresh(&self) -> Result<()> {
        self.refresh_calls.fetch_add(1, Ordering::SeqCst);
        let failures = read(&self.failures);
        match &failures.refresh {
            Some(message) => Err(RepoError::Unavailable(message.clone())),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIX: &str = "4a6d8b3c2e1f00112233445566778899aabbccdd";

    fn hash(s: &str) -> CommitHash {
        CommitHash::parse(s).unwrap()
    }

    fn salt() -> InMemoryRepository {
        InMemoryRepository::new()
            .with_branch("2016.11", ["1111111"])
            .with_branch("2017.7", [FIX])
            .with_branch("develop", [FIX, "2222222"])
            .with_tag("v2016.11.8", ["1111111"])
            .with_tag("v2017.7.2", [FIX])
    }

    #[test]
    fn enumerates_in_insertion_order() {
        let repo = salt();
        assert_eq!(repo.list_branches().unwrap(), ["2016.11", "2017.7", "develop"]);
        assert_eq!(repo.list_tags().unwrap(), ["v2016.11.8", "v2017.7.2"]);
        assert_eq!(repo.list_calls(), 2);
    }

    #[test]
    fn containment_by_full_and_abbreviated_hash() {
        let repo = salt();
        assert!(repo.contains(RefKind::Branch, "2017.7", &hash(FIX)).unwrap());
        assert!(repo.contains(RefKind::Branch, "2017.7", &hash("4a6d8b3")).unwrap());
        assert!(!repo.contains(RefKind::Branch, "2016.11", &hash(FIX)).unwrap());
        assert_eq!(repo.contains_calls(), 3);
    }

    #[test]
    fn unknown_ref_is_not_found() {
        let repo = salt();
        let err = repo
            .contains(RefKind::Tag, "v3000.0", &hash(FIX))
            .unwrap_err();
        assert!(matches!(err, RepoError::RefNotFound { kind: RefKind::Tag, .. }));
        assert_eq!(err.to_string(), "tag 'v3000.0' does not exist");
    }

    #[test]
    fn insert_extends_existing_ref() {
        let repo = salt();
        repo.insert(RefKind::Branch, "2016.11", [FIX]);
        assert!(repo.contains(RefKind::Branch, "2016.11", &hash(FIX)).unwrap());
        assert_eq!(repo.list_branches().unwrap().len(), 3);
    }

    #[test]
    fn refresh_counts_and_fails_on_request() {
        let repo = salt();
        repo.refresh().unwrap();
        assert_eq!(repo.refresh_calls(), 1);

        let failing = salt().failing_refresh("network down");
        assert!(failing.refresh().is_err());
        assert_eq!(failing.refresh_calls(), 1);
    }

    #[test]
    fn injected_containment_failure() {
        let repo = salt().failing_contains(RefKind::Branch, "develop");
        assert!(repo.contains(RefKind::Branch, "develop", &hash(FIX)).is_err());
        assert!(repo.contains(RefKind::Branch, "2017.7", &hash(FIX)).is_ok());
    }

    #[test]
    fn poisoned_locks_keep_accepting_writes() {
        let repo = salt();
        std::thread::scope(|s| {
            let _ = s
                .spawn(|| {
                    let _branches = repo.branches.write().unwrap();
                    let _failures = repo.failures.write().unwrap();
                    panic!("poison");
                })
                .join();
        });
        assert!(repo.branches.is_poisoned());

        repo.insert(RefKind::Branch, "2018.3", [FIX]);
        let repo = repo.failing_contains(RefKind::Branch, "develop");

        assert!(repo.list_branches().unwrap().contains(&"2018.3".to_string()));
        assert!(repo.contains(RefKind::Branch, "2018.3", &hash(FIX)).unwrap());
        assert!(repo.contains(RefKind::Branch, "develop", &hash(FIX)).is_err());
    }

    #[test]
    fn new_repository_has_no_calls() {
        assert_eq!(InMemoryRepository::new().total_calls(), 0);
    }
}
