//! Hosting API abstraction layer
//!
//! This module provides a trait-based abstraction over the source-control
//! hosting API the cleanup talks to, allowing the real GitHub client and an
//! in-memory mock to be swapped freely.
//!
//! # Overview
//!
//! The primary abstraction is the [HostingClient] trait, which defines the
//! three calls the cleanup needs. The concrete implementations include:
//!
//! - [github::GitHubClient]: A blocking client for the GitHub REST API
//! - [mock::MockHostingClient]: A recording mock for testing
//!
//! # Usage
//!
//! Cleanup code depends on the [HostingClient] trait and receives the client
//! as a parameter, never from global state.
//!
//! ```rust
//! # use orphan_tags::hosting::HostingClient;
//! # use orphan_tags::context::RepoCoordinates;
//! # fn example<C: HostingClient>(client: &C) -> Result<(), Box<dyn std::error::Error>> {
//! let repo = RepoCoordinates::new("octo", "widgets")?;
//! let branches = client.list_branches(&repo)?;
//! let tags = client.list_matching_refs(&repo, "tags/v")?;
//! # Ok(())
//! # }
//! ```

pub mod github;
pub mod mock;

pub use github::GitHubClient;
pub use mock::{DeleteCall, MockCall, MockFailure, MockHostingClient};

use crate::context::RepoCoordinates;
use crate::error::Result;
use serde::Deserialize;

/// A branch as listed by the hosting API
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BranchRecord {
    pub name: String,
}

/// A git ref as listed by the hosting API
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RefRecord {
    /// Fully-qualified ref, e.g. `refs/tags/v1.0.0`
    #[serde(rename = "ref")]
    pub reference: String,
}

impl BranchRecord {
    pub fn new(name: impl Into<String>) -> Self {
        BranchRecord { name: name.into() }
    }
}

impl RefRecord {
    pub fn new(reference: impl Into<String>) -> Self {
        RefRecord {
            reference: reference.into(),
        }
    }
}

/// Operations the cleanup drives on the hosting service
///
/// ## Thread Safety
///
/// All implementors must be `Send + Sync`.
///
/// ## Error Handling
///
/// All methods return [crate::error::Result<T>]. Implementations map
/// failures the service describes to [crate::error::CleanupError::Api],
/// network failures to [crate::error::CleanupError::Transport], and
/// anything without usable structure to [crate::error::CleanupError::Unknown].
/// Nothing is retried.
pub trait HostingClient: Send + Sync {
    /// List every branch of the repository.
    ///
    /// The result is assumed to be complete; implementations must follow
    /// pagination themselves.
    fn list_branches(&self, repo: &RepoCoordinates) -> Result<Vec<BranchRecord>>;

    /// List refs whose name starts with `refs/<prefix>`.
    ///
    /// # Arguments
    /// * `prefix` - Ref prefix without `refs/` (e.g. "tags/v")
    fn list_matching_refs(&self, repo: &RepoCoordinates, prefix: &str) -> Result<Vec<RefRecord>>;

    /// Delete a ref.
    ///
    /// # Arguments
    /// * `reference` - Ref without the `refs/` prefix (e.g. "tags/v1.0.0-x.1")
    fn delete_ref(&self, repo: &RepoCoordinates, reference: &str) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_deserialize_from_api_shape() {
        let branches: Vec<BranchRecord> =
            serde_json::from_str(r#"[{"name":"main","protected":true,"commit":{"sha":"abc"}}]"#)
                .unwrap();
        assert_eq!(branches, vec![BranchRecord::new("main")]);

        let refs: Vec<RefRecord> = serde_json::from_str(
            r#"[{"ref":"refs/tags/v1.0.0","node_id":"x","object":{"sha":"abc","type":"commit"}}]"#,
        )
        .unwrap();
        assert_eq!(refs, vec![RefRecord::new("refs/tags/v1.0.0")]);
    }
}
