//! Blocking HTTP client for the GitHub REST API.
//!
//! One client is scoped to one repository. Every call is a single blocking
//! request; there is no retry and no pagination.

use super::types::{CommitResponse, ErrorBody};
use super::{ApiError, BranchSnapshot, CommitInfo, HostingApi};
use reqwest::Url;
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use std::time::Duration;
use tracing::debug;

/// Default REST endpoint when `GITHUB_API_URL` is not set.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

const HTTP_CONNECT_TIMEOUT_SECS: u64 = 10;
const HTTP_REQUEST_TIMEOUT_SECS: u64 = 30;
const API_VERSION: &str = "2022-11-28";

/// GitHub API client bound to `owner/repo`.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: Client,
    base: Url,
    owner: String,
    repo: String,
}

impl GitHubClient {
    /// Create a client authenticated with `token`.
    pub fn new(api_url: &str, token: &str, owner: &str, repo: &str) -> Result<Self, ApiError> {
        let base = Url::parse(api_url)
            .map_err(|e| ApiError::transport(format!("invalid API URL '{}': {}", api_url, e)))?;

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| ApiError::transport("github_token contains invalid characters"))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "x-github-api-version",
            HeaderValue::from_static(API_VERSION),
        );

        let http = Client::builder()
            .connect_timeout(Duration::from_secs(HTTP_CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(HTTP_REQUEST_TIMEOUT_SECS))
            .user_agent(concat!("branch-sweep/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()
            .map_err(|e| ApiError::transport(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base,
            owner: owner.to_string(),
            repo: repo.to_string(),
        })
    }

    /// Build `{base}/repos/{owner}/{repo}/{tail...}` with each segment
    /// percent-encoded.
    fn repo_url<'a>(&self, tail: impl IntoIterator<Item = &'a str>) -> Result<Url, ApiError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::transport(format!("API URL '{}' cannot be a base", self.base)))?
            .pop_if_empty()
            .extend(["repos", self.owner.as_str(), self.repo.as_str()])
            .extend(tail);
        Ok(url)
    }

    fn send(&self, request: RequestBuilder, context: &str) -> Result<Response, ApiError> {
        let response = request
            .send()
            .map_err(|e| ApiError::transport(format!("{}: {}", context, e)))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .json::<ErrorBody>()
            .map(|body| body.message)
            .unwrap_or_else(|_| status.canonical_reason().unwrap_or("Unknown error").to_string());

        Err(ApiError::with_status(
            status.as_u16(),
            format!("{}: {}", context, message),
        ))
    }
}

impl HostingApi for GitHubClient {
    fn list_branches(&self, per_page: u32) -> Result<Vec<BranchSnapshot>, ApiError> {
        let mut url = self.repo_url(["branches"])?;
        url.query_pairs_mut()
            .append_pair("per_page", &per_page.to_string());
        debug!(%url, "listing branches");

        self.send(self.http.get(url), "list branches")?
            .json()
            .map_err(|e| ApiError::transport(format!("failed to decode branch listing: {}", e)))
    }

    fn get_commit(&self, sha: &str) -> Result<CommitInfo, ApiError> {
        let url = self.repo_url(["commits", sha])?;
        debug!(%url, "fetching commit");

        let context = format!("get commit {}", sha);
        self.send(self.http.get(url), &context)?
            .json::<CommitResponse>()
            .map(CommitInfo::from)
            .map_err(|e| ApiError::transport(format!("failed to decode commit {}: {}", sha, e)))
    }

    fn delete_ref(&self, branch: &str) -> Result<(), ApiError> {
        let url = self.repo_url(["git", "refs", "heads"].into_iter().chain(branch.split('/')))?;
        debug!(%url, "deleting ref");

        let context = format!("delete ref heads/{}", branch);
        self.send(self.http.delete(url), &context)?;
        Ok(())
    }
}
