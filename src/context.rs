//! Execution context: which repository to clean and with what credential.
//!
//! Values come from explicit arguments first, then the environment a
//! GitHub Actions runner provides, then (for the repository only) the URL of
//! a remote in the local git checkout.

use crate::error::{CleanupError, Result};
use git2::Repository as Git2Repo;
use regex::Regex;
use std::env;
use std::fmt;
use std::path::Path;
use std::sync::OnceLock;

/// Environment variable holding `owner/repo` on Actions runners
pub const REPOSITORY_ENV: &str = "GITHUB_REPOSITORY";
/// Environment variable an Actions `with: token:` input is exposed as
pub const TOKEN_INPUT_ENV: &str = "INPUT_TOKEN";
/// Fallback token variable
pub const TOKEN_ENV: &str = "GITHUB_TOKEN";
/// API base URL on Actions runners (differs on GitHub Enterprise)
pub const API_URL_ENV: &str = "GITHUB_API_URL";

fn remote_url_regex() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"[:/]([^/:]+)/([^/]+?)(?:\.git)?/?$").expect("remote URL pattern compiles")
    })
}

/// Owner and name of a hosted repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoCoordinates {
    pub owner: String,
    pub repo: String,
}

impl RepoCoordinates {
    /// Create coordinates; both parts must be non-empty
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Result<Self> {
        let owner = owner.into();
        let repo = repo.into();

        if owner.trim().is_empty() || repo.trim().is_empty() {
            return Err(CleanupError::context(format!(
                "Repository owner and name must be non-empty (got '{}/{}')",
                owner, repo
            )));
        }

        Ok(RepoCoordinates { owner, repo })
    }

    /// Parse an `owner/repo` slug
    pub fn parse(slug: &str) -> Result<Self> {
        match slug.trim().split_once('/') {
            Some((owner, repo)) if !repo.contains('/') => RepoCoordinates::new(owner, repo),
            _ => Err(CleanupError::context(format!(
                "Expected repository as 'owner/repo', got '{}'",
                slug
            ))),
        }
    }

    /// Extract coordinates from a remote URL.
    ///
    /// Handles `https://host/owner/repo(.git)`, `ssh://git@host/owner/repo.git`
    /// and scp-like `git@host:owner/repo.git`.
    pub fn from_remote_url(url: &str) -> Option<Self> {
        let captures = remote_url_regex().captures(url.trim())?;
        let owner = captures.get(1)?.as_str();
        let repo = captures.get(2)?.as_str();

        RepoCoordinates::new(owner, repo).ok()
    }

    /// Read coordinates from a named remote of the git repository at or
    /// above `path`.
    pub fn from_local_remote<P: AsRef<Path>>(path: P, remote: &str) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;
        let remote_handle = repo.find_remote(remote).map_err(|e| {
            CleanupError::context(format!("Cannot find remote '{}': {}", remote, e))
        })?;
        let url = remote_handle.url().ok_or_else(|| {
            CleanupError::context(format!("Remote '{}' has no valid URL", remote))
        })?;

        RepoCoordinates::from_remote_url(url).ok_or_else(|| {
            CleanupError::context(format!(
                "Cannot derive owner/repo from remote '{}' URL '{}'",
                remote, url
            ))
        })
    }
}

impl fmt::Display for RepoCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// Everything the run reads from its surroundings, read once at startup
#[derive(Clone, PartialEq, Eq)]
pub struct ExecutionContext {
    pub repo: RepoCoordinates,
    /// Optional; absence just means unauthenticated API calls
    pub token: Option<String>,
}

// Keep the token out of debug output.
impl fmt::Debug for ExecutionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecutionContext")
            .field("repo", &self.repo)
            .field("token", &self.token.as_ref().map(|_| "***"))
            .finish()
    }
}

impl ExecutionContext {
    /// Resolve the context from explicit values, the environment, and
    /// finally the local git remote named `remote`.
    pub fn resolve(repository: Option<&str>, token: Option<&str>, remote: &str) -> Result<Self> {
        let slug = non_empty(repository.map(str::to_string)).or_else(|| env_value(REPOSITORY_ENV));
        let repo = match slug {
            Some(slug) => RepoCoordinates::parse(&slug)?,
            None => {
                log::debug!(
                    "{} not set, reading repository from git remote '{}'",
                    REPOSITORY_ENV,
                    remote
                );
                RepoCoordinates::from_local_remote(".", remote)?
            }
        };

        Ok(ExecutionContext {
            repo,
            token: resolve_token(token),
        })
    }
}

/// Pick the first non-empty token among the explicit value and the
/// environment.
pub fn resolve_token(explicit: Option<&str>) -> Option<String> {
    non_empty(explicit.map(str::to_string))
        .or_else(|| env_value(TOKEN_INPUT_ENV))
        .or_else(|| env_value(TOKEN_ENV))
}

/// Pick the API base URL from the explicit value or the environment
pub fn resolve_api_url(explicit: Option<&str>) -> Option<String> {
    non_empty(explicit.map(str::to_string)).or_else(|| env_value(API_URL_ENV))
}

fn env_value(key: &str) -> Option<String> {
    non_empty(env::var(key).ok())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
