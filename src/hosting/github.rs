use crate::context::RepoCoordinates;
use crate::error::{CleanupError, Result};
use crate::hosting::{BranchRecord, HostingClient, RefRecord};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{ACCEPT, LINK};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Public GitHub API endpoint
pub const DEFAULT_API_URL: &str = "https://api.github.com";
/// Largest page size the REST API accepts
pub const MAX_PER_PAGE: u32 = 100;

const API_VERSION_HEADER: &str = "X-GitHub-Api-Version";
const API_VERSION: &str = "2022-11-28";
const MEDIA_TYPE: &str = "application/vnd.github+json";

/// Blocking client for the GitHub REST API
pub struct GitHubClient {
    http: Client,
    api_url: String,
    token: Option<String>,
    per_page: u32,
}

impl GitHubClient {
    /// Build a client for `api_url`, authenticating with `token` when given.
    ///
    /// An absent token is allowed; requests are then sent anonymously and
    /// will likely be refused for private repositories or deletions.
    pub fn new(api_url: impl Into<String>, token: Option<String>) -> Result<Self> {
        let http = Client::builder()
            .user_agent(format!("orphan-tags/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(GitHubClient {
            http,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.is_empty()),
            per_page: MAX_PER_PAGE,
        })
    }

    /// Set the page size used for listings (clamped to 1..=100)
    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page.clamp(1, MAX_PER_PAGE);
        self
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    fn repo_url(&self, repo: &RepoCoordinates, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/{}",
            self.api_url,
            urlencoding::encode(&repo.owner),
            urlencoding::encode(&repo.repo),
            path
        )
    }

    /// Whether `url` points below the configured API base
    fn is_api_url(&self, url: &str) -> bool {
        url.strip_prefix(self.api_url.as_str())
            .is_some_and(|rest| rest.starts_with('/') || rest.starts_with('?'))
    }

    fn first_page_url(&self, url: &str) -> String {
        format!("{}?per_page={}&page=1", url, self.per_page)
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let builder = self
            .http
            .request(method, url)
            .header(ACCEPT, MEDIA_TYPE)
            .header(API_VERSION_HEADER, API_VERSION);

        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// GET every page of a listing, following `Link: rel="next"`
    fn get_all<T: DeserializeOwned>(&self, first_url: String) -> Result<Vec<T>> {
        let mut items = Vec::new();
        let mut next = Some(first_url);

        while let Some(url) = next {
            log::debug!("GET {}", url);
            let response = check_status(self.request(Method::GET, &url).send()?)?;

            next = response
                .headers()
                .get(LINK)
                .and_then(|value| value.to_str().ok())
                .and_then(next_page_url);

            if let Some(next_url) = &next {
                if !self.is_api_url(next_url) {
                    return Err(CleanupError::api(format!(
                        "Refusing to follow pagination link outside {}: {}",
                        self.api_url, next_url
                    )));
                }
            }

            let body = response.text()?;
            let page: Vec<T> = serde_json::from_str(&body)?;
            items.extend(page);
        }

        Ok(items)
    }
}

impl HostingClient for GitHubClient {
    fn list_branches(&self, repo: &RepoCoordinates) -> Result<Vec<BranchRecord>> {
        let url = self.repo_url(repo, "branches");
        self.get_all(self.first_page_url(&url))
    }

    fn list_matching_refs(&self, repo: &RepoCoordinates, prefix: &str) -> Result<Vec<RefRecord>> {
        let url = self.repo_url(repo, &format!("git/matching-refs/{}", encode_ref_path(prefix)));
        self.get_all(self.first_page_url(&url))
    }

    fn delete_ref(&self, repo: &RepoCoordinates, reference: &str) -> Result<()> {
        let url = self.repo_url(repo, &format!("git/refs/{}", encode_ref_path(reference)));
        log::debug!("DELETE {}", url);

        check_status(self.request(Method::DELETE, &url).send()?)?;
        Ok(())
    }
}

/// Percent-encode each segment of a ref path, keeping the slashes
fn encode_ref_path(reference: &str) -> String {
    reference
        .split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().unwrap_or_default();
    Err(error_from_body(status.as_u16(), &body))
}

#[derive(Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
}

/// Map an error response to a [CleanupError].
///
/// GitHub describes its errors as `{"message": ...}`; those become
/// structured API errors. Bodies without a message are unstructured.
pub fn error_from_body(status: u16, body: &str) -> CleanupError {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(ApiErrorBody {
            message: Some(message),
        }) if !message.trim().is_empty() => CleanupError::api_status(status, message),
        _ => CleanupError::unknown(format!("HTTP {}: {}", status, body)),
    }
}

/// Extract the `rel="next"` target from a `Link` header value
pub fn next_page_url(link: &str) -> Option<String> {
    link.split(',').find_map(|part| {
        let mut segments = part.split(';');
        let target = segments.next()?.trim();
        if segments.any(|param| param.trim() == r#"rel="next""#) {
            target
                .strip_prefix('<')
                .and_then(|t| t.strip_suffix('>'))
                .map(str::to_string)
        } else {
            None
        }
    })
}
