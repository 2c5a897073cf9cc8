use crate::context::RepoCoordinates;
use crate::error::{CleanupError, Result};
use crate::hosting::{BranchRecord, HostingClient, RefRecord};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

/// A failure the mock can be told to produce
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockFailure {
    /// Structured API error with the given message
    Api(String),
    /// Unstructured failure with the given raw payload
    Unknown(String),
}

impl MockFailure {
    fn to_error(&self) -> CleanupError {
        match self {
            MockFailure::Api(msg) => CleanupError::api(msg.clone()),
            MockFailure::Unknown(payload) => CleanupError::unknown(payload.clone()),
        }
    }
}

/// A recorded `delete_ref` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteCall {
    pub owner: String,
    pub repo: String,
    pub reference: String,
}

impl DeleteCall {
    pub fn new(owner: &str, repo: &str, reference: &str) -> Self {
        DeleteCall {
            owner: owner.to_string(),
            repo: repo.to_string(),
            reference: reference.to_string(),
        }
    }
}

/// Any recorded call, in the order it was made
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    ListBranches,
    ListMatchingRefs(String),
    DeleteRef(String),
}

/// Mock hosting client for testing without network access.
///
/// Serves a fixed branch and ref listing and records every call. Deletions
/// are recorded but do not change what later listings return.
pub struct MockHostingClient {
    branches: Vec<String>,
    refs: Vec<String>,
    branch_failure: Option<MockFailure>,
    ref_failure: Option<MockFailure>,
    delete_failures: HashMap<String, MockFailure>,
    calls: Mutex<Vec<MockCall>>,
    deletes: Mutex<Vec<DeleteCall>>,
}

impl MockHostingClient {
    /// Create a new empty mock
    pub fn new() -> Self {
        MockHostingClient {
            branches: Vec::new(),
            refs: Vec::new(),
            branch_failure: None,
            ref_failure: None,
            delete_failures: HashMap::new(),
            calls: Mutex::new(Vec::new()),
            deletes: Mutex::new(Vec::new()),
        }
    }

    /// Add a branch
    pub fn with_branch(mut self, name: impl Into<String>) -> Self {
        self.branches.push(name.into());
        self
    }

    /// Add several branches
    pub fn with_branches<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.branches.extend(names.into_iter().map(Into::into));
        self
    }

    /// Add a tag by name; it is served as `refs/tags/<name>`
    pub fn with_tag(mut self, name: &str) -> Self {
        self.refs.push(format!("refs/tags/{}", name));
        self
    }

    /// Add a raw ref exactly as given
    pub fn with_ref(mut self, reference: impl Into<String>) -> Self {
        self.refs.push(reference.into());
        self
    }

    /// Make `list_branches` fail
    pub fn failing_branches(mut self, failure: MockFailure) -> Self {
        self.branch_failure = Some(failure);
        self
    }

    /// Make `list_matching_refs` fail
    pub fn failing_refs(mut self, failure: MockFailure) -> Self {
        self.ref_failure = Some(failure);
        self
    }

    /// Make `delete_ref` fail for one ref (given without `refs/`)
    pub fn failing_delete(mut self, reference: impl Into<String>, failure: MockFailure) -> Self {
        self.delete_failures.insert(reference.into(), failure);
        self
    }

    /// Every `delete_ref` call made so far, including failed ones
    pub fn delete_calls(&self) -> Vec<DeleteCall> {
        lock(&self.deletes).clone()
    }

    /// Every call made so far, in order
    pub fn calls(&self) -> Vec<MockCall> {
        lock(&self.calls).clone()
    }

    fn record(&self, call: MockCall) {
        lock(&self.calls).push(call);
    }
}

impl Default for MockHostingClient {
    fn default() -> Self {
        Self::new()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl HostingClient for MockHostingClient {
    fn list_branches(&self, _repo: &RepoCoordinates) -> Result<Vec<BranchRecord>> {
        self.record(MockCall::ListBranches);
        if let Some(failure) = &self.branch_failure {
            return Err(failure.to_error());
        }

        Ok(self.branches.iter().map(BranchRecord::new).collect())
    }

    fn list_matching_refs(&self, _repo: &RepoCoordinates, prefix: &str) -> Result<Vec<RefRecord>> {
        self.record(MockCall::ListMatchingRefs(prefix.to_string()));
        if let Some(failure) = &self.ref_failure {
            return Err(failure.to_error());
        }

        let full_prefix = format!("refs/{}", prefix);
        Ok(self
            .refs
            .iter()
            .filter(|r| r.starts_with(&full_prefix))
            .map(RefRecord::new)
            .collect())
    }

    fn delete_ref(&self, repo: &RepoCoordinates, reference: &str) -> Result<()> {
        self.record(MockCall::DeleteRef(reference.to_string()));
        lock(&self.deletes).push(DeleteCall::new(&repo.owner, &repo.repo, reference));

        match self.delete_failures.get(reference) {
            Some(failure) => Err(failure.to_error()),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coords() -> RepoCoordinates {
        RepoCoordinates::new("mockOwner", "mockRepo").unwrap()
    }

    #[test]
    fn test_mock_lists_branches() {
        let client = MockHostingClient::new()
            .with_branch("main")
            .with_branches(["feature/a", "feature/b"]);

        let names: Vec<String> = client
            .list_branches(&coords())
            .unwrap()
            .into_iter()
            .map(|b| b.name)
            .collect();
        assert_eq!(names, vec!["main", "feature/a", "feature/b"]);
    }

    #[test]
    fn test_mock_filters_refs_by_prefix() {
        let client = MockHostingClient::new()
            .with_tag("v1.0.0")
            .with_tag("release-2")
            .with_ref("refs/heads/main");

        let refs = client.list_matching_refs(&coords(), "tags/v").unwrap();
        assert_eq!(refs, vec![RefRecord::new("refs/tags/v1.0.0")]);
    }

    #[test]
    fn test_mock_records_deletes() {
        let client = MockHostingClient::new();
        client.delete_ref(&coords(), "tags/v1.0.0-x.1").unwrap();

        assert_eq!(
            client.delete_calls(),
            vec![DeleteCall::new("mockOwner", "mockRepo", "tags/v1.0.0-x.1")]
        );
        assert_eq!(
            client.calls(),
            vec![MockCall::DeleteRef("tags/v1.0.0-x.1".to_string())]
        );
    }

    #[test]
    fn test_mock_injected_failures() {
        let client = MockHostingClient::new()
            .failing_branches(MockFailure::Api("boom".to_string()))
            .failing_delete("tags/v1-x.1", MockFailure::Unknown("raw".to_string()));

        let err = client.list_branches(&coords()).unwrap_err();
        assert_eq!(err.to_string(), "boom");

        let err = client.delete_ref(&coords(), "tags/v1-x.1").unwrap_err();
        assert!(!err.is_structured());
        assert_eq!(client.delete_calls().len(), 1);
    }

    #[test]
    fn test_mock_default_is_empty() {
        let client = MockHostingClient::default();
        assert!(client.list_branches(&coords()).unwrap().is_empty());
        assert!(client.list_matching_refs(&coords(), "tags/v").unwrap().is_empty());
    }
}
