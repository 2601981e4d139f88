//! GitHub REST infrastructure adapter.
//!
//! Implements the GitHub-facing traits defined in the [`policy`] crate
//! ([`CodeRepository`] and [`IssueTracker`]) over the GitHub REST API using
//! `reqwest`.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** This crate must not contain policy rules.
//! All GitHub API details (headers, status mapping, response shapes) are
//! handled here; the [`policy`] crate never sees them.
//!
//! ## Authentication
//!
//! Requests carry a single bearer token supplied at construction time (an
//! installation token or a fine-grained personal access token). Obtaining and
//! refreshing that token is the host's concern.

use std::time::Duration;

use async_trait::async_trait;
use policy::{
    CodeRepository, FileContent, GitHubError, IssueNumber, IssueTracker, NewIssue,
    RepositoryRef, RepositoryUpdate,
};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Public GitHub API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

const API_VERSION: &str = "2022-11-28";
const USER_AGENT: &str = concat!("prevent-public-repos/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors raised while constructing a [`GithubClient`].
#[derive(Debug, Error)]
pub enum ClientBuildError {
    /// The token is empty.
    #[error("GitHub token must not be empty")]
    MissingToken,

    /// The underlying HTTP client could not be built (e.g. TLS backend failure).
    #[error("Failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}

/// GitHub REST API client implementing the policy ports.
#[derive(Debug, Clone)]
pub struct GithubClient {
    api_url: String,
    token: String,
    http: reqwest::Client,
}

impl GithubClient {
    /// Creates a client for `api_url` (e.g. [`DEFAULT_API_URL`] or a GitHub
    /// Enterprise `https://host/api/v3`) authenticating with `token`.
    pub fn new(api_url: &str, token: impl Into<String>) -> Result<Self, ClientBuildError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(ClientBuildError::MissingToken);
        }

        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            token,
            http,
        })
    }

    /// The API base URL requests are sent to.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn repo_endpoint(&self, repo: &RepositoryRef, suffix: &str) -> String {
        format!(
            "{}/repos/{}/{}{}",
            self.api_url, repo.owner, repo.name, suffix
        )
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.http
            .request(method, url)
            .bearer_auth(&self.token)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION)
    }

    async fn send(&self, builder: RequestBuilder, resource: &str) -> Result<Response, GitHubError> {
        let response = builder
            .send()
            .await
            .map_err(|e| GitHubError::Transport(e.to_string()))?;

        let status = response.status();
        debug!(resource, status = status.as_u16(), "GitHub API response");
        if status.is_success() {
            return Ok(response);
        }
        if status == StatusCode::NOT_FOUND {
            return Err(GitHubError::NotFound {
                resource: resource.to_string(),
            });
        }

        let message = match response.json::<ApiErrorBody>().await {
            Ok(body) => body.message,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string(),
        };
        Err(GitHubError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

// ---------------------------------------------------------------------------
// Response bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

#[derive(Debug, Deserialize)]
struct ContentResponse {
    #[serde(rename = "type")]
    kind: String,
    path: String,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    encoding: Option<String>,
}

#[derive(Debug, Deserialize)]
struct IssueResponse {
    number: u64,
}

// ---------------------------------------------------------------------------
// Port implementations
// ---------------------------------------------------------------------------

#[async_trait]
impl CodeRepository for GithubClient {
    async fn get_file_content(
        &self,
        repo: &RepositoryRef,
        path: &str,
    ) -> Result<FileContent, GitHubError> {
        let url = self.repo_endpoint(repo, &format!("/contents/{}", path.trim_start_matches('/')));
        let resource = format!("{repo}/{path}");
        let response = self
            .send(self.request(Method::GET, &url), &resource)
            .await?;

        // A directory listing is a JSON array and fails to deserialize here.
        let body: ContentResponse = response
            .json()
            .await
            .map_err(|e| GitHubError::InvalidResponse(format!("{resource}: {e}")))?;

        if body.kind != "file" {
            return Err(GitHubError::InvalidResponse(format!(
                "{resource} is a {}, not a file",
                body.kind
            )));
        }
        match (body.content, body.encoding.as_deref()) {
            (Some(content), Some("base64")) => Ok(FileContent {
                path: body.path,
                encoded: content,
            }),
            (_, encoding) => Err(GitHubError::InvalidResponse(format!(
                "{resource} has unsupported encoding {}",
                encoding.unwrap_or("none")
            ))),
        }
    }

    async fn update_repository(
        &self,
        repo: &RepositoryRef,
        update: &RepositoryUpdate,
    ) -> Result<(), GitHubError> {
        let url = self.repo_endpoint(repo, "");
        self.send(
            self.request(Method::PATCH, &url).json(update),
            &repo.to_string(),
        )
        .await?;
        Ok(())
    }
}

#[async_trait]
impl IssueTracker for GithubClient {
    async fn create_issue(
        &self,
        repo: &RepositoryRef,
        issue: &NewIssue,
    ) -> Result<IssueNumber, GitHubError> {
        let url = self.repo_endpoint(repo, "/issues");
        let response = self
            .send(
                self.request(Method::POST, &url).json(issue),
                &format!("{repo} issues"),
            )
            .await?;

        let body: IssueResponse = response
            .json()
            .await
            .map_err(|e| GitHubError::InvalidResponse(e.to_string()))?;
        Ok(IssueNumber::new(body.number))
    }
}
