//! Cleanup workflow orchestration
//!
//! This module holds the single linear pass over a repository's version
//! tags and the top-level guard around it. It is independent of argument
//! parsing, so the workflow can be driven programmatically with any
//! [HostingClient].

use crate::boundary::BoundaryWarning;
use crate::context::RepoCoordinates;
use crate::domain::{classify, resolve, tag_name_from_ref, BranchInventory, Decision};
use crate::error::{CleanupError, Result, UNKNOWN_ERROR_MESSAGE};
use crate::hosting::HostingClient;

/// Ref prefix handed to the hosting API to pre-filter version tags
pub const VERSION_TAG_PREFIX: &str = "tags/v";

/// Options for a cleanup run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanupOptions {
    /// Decide and report, but issue no deletions
    pub dry_run: bool,
}

/// Outcome of a successful cleanup run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CleanupSummary {
    /// Number of version refs examined
    pub evaluated: usize,

    /// Tags deleted (or that would have been, in a dry run)
    pub deleted: Vec<String>,

    /// Feature tags whose branch still exists
    pub kept: Vec<String>,

    /// Tags outside the feature pre-release convention
    pub unrecognized: Vec<String>,

    pub dry_run: bool,

    pub warnings: Vec<BoundaryWarning>,
}

/// How a failure should be reported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The error carried a message of its own
    Structured,
    /// The error had no usable structure; the generic message is used
    Unknown,
}

/// A failed run, ready to be reported once
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub kind: FailureKind,
    pub message: String,
}

impl From<CleanupError> for Failure {
    fn from(err: CleanupError) -> Self {
        if err.is_structured() {
            Failure {
                kind: FailureKind::Structured,
                message: err.to_string(),
            }
        } else {
            Failure {
                kind: FailureKind::Unknown,
                message: UNKNOWN_ERROR_MESSAGE.to_string(),
            }
        }
    }
}

/// Read the branch inventory once.
pub fn load_branch_inventory<C: HostingClient + ?Sized>(
    client: &C,
    repo: &RepoCoordinates,
) -> Result<BranchInventory> {
    let branches = client.list_branches(repo)?;
    Ok(BranchInventory::new(branches.into_iter().map(|b| b.name)))
}

/// Delete every feature tag whose branch no longer exists.
///
/// Runs strictly in sequence: the branch inventory is read once, then each
/// version tag is classified, resolved against that snapshot and, if
/// orphaned, deleted before the next tag is looked at. The first failing
/// call aborts the run.
pub fn cleanup_orphaned_tags<C: HostingClient + ?Sized>(
    client: &C,
    repo: &RepoCoordinates,
    options: &CleanupOptions,
) -> Result<CleanupSummary> {
    let mut summary = CleanupSummary {
        dry_run: options.dry_run,
        ..CleanupSummary::default()
    };

    let inventory = load_branch_inventory(client, repo)?;
    log::info!(
        "Existing branches: {}",
        inventory.sorted_names().join(", ")
    );
    if inventory.is_empty() {
        summary.warnings.push(BoundaryWarning::EmptyBranchInventory {
            repository: repo.to_string(),
        });
    }

    let refs = client.list_matching_refs(repo, VERSION_TAG_PREFIX)?;
    if refs.is_empty() {
        summary.warnings.push(BoundaryWarning::NoVersionTags {
            prefix: format!("refs/{}", VERSION_TAG_PREFIX),
        });
    }

    for record in refs {
        summary.evaluated += 1;
        let tag_name = tag_name_from_ref(&record.reference);
        log::debug!("Tag: {}", tag_name);

        let Some(tag) = classify(&record.reference) else {
            summary.unrecognized.push(tag_name.to_string());
            continue;
        };
        log::debug!("Feature branch name: {}", tag.feature_id);

        match resolve(&tag, &inventory) {
            Decision::Keep => summary.kept.push(tag.name),
            Decision::Delete => {
                if options.dry_run {
                    log::info!(
                        "Branch {} does not exist, would delete tag {} (dry run)",
                        tag.feature_id,
                        tag.name
                    );
                } else {
                    log::info!(
                        "Branch {} does not exist, so deleting tag {}",
                        tag.feature_id,
                        tag.name
                    );
                    client.delete_ref(repo, &tag.delete_ref())?;
                }
                summary.deleted.push(tag.name);
            }
        }
    }

    Ok(summary)
}

/// Run the cleanup behind the top-level guard.
///
/// Never panics on collaborator failures and never re-raises: any error
/// ends the run and comes back as a [Failure] for the caller to report.
pub fn run_cleanup_workflow<C: HostingClient + ?Sized>(
    client: &C,
    repo: &RepoCoordinates,
    options: &CleanupOptions,
) -> std::result::Result<CleanupSummary, Failure> {
    log::info!("Starting orphaned tag cleanup for {}", repo);

    cleanup_orphaned_tags(client, repo, options).map_err(|err| {
        if let CleanupError::Unknown(payload) = &err {
            log::debug!("Unstructured failure: {}", payload);
        }
        Failure::from(err)
    })
}
