use crate::errors::GhClipError;
use crate::github::types::{ContentsResponse, Repository, RepositoryNode};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Url};
use tracing::{debug, trace, warn};

pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Substituted for a file's content when its download fails.
pub const CONTENT_PLACEHOLDER: &str = "⚠️ failed to fetch content";

const USER_AGENT: &str = concat!("ghclip/", env!("CARGO_PKG_VERSION"));

#[async_trait]
pub trait RemoteSource: Send + Sync {
    async fn list_repos(&self, user: &str) -> Result<Vec<Repository>, GhClipError>;

    /// Immediate children of `path` (empty for the repository root).
    async fn list_directory(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
    ) -> Result<Vec<RepositoryNode>, GhClipError>;

    /// Never fails: a download error yields `CONTENT_PLACEHOLDER`.
    async fn fetch_content(&self, download_ref: &str) -> String;
}

pub struct GitHubClient {
    client: Client,
    api_base: Url,
    token: Option<String>,
}

impl GitHubClient {
    pub fn new(api_base: &str, token: Option<String>) -> Result<Self, GhClipError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| GhClipError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;
        let api_base = Url::parse(api_base)
            .map_err(|e| GhClipError::ConfigError(format!("Invalid API base '{}': {}", api_base, e)))?;
        if api_base.cannot_be_a_base() {
            return Err(GhClipError::ConfigError(format!(
                "API base '{}' cannot take a path",
                api_base
            )));
        }
        let token = token.filter(|t| !t.trim().is_empty());
        if token.is_none() {
            debug!("No GitHub token configured, requests are unauthenticated");
        }
        Ok(GitHubClient {
            client,
            api_base,
            token,
        })
    }

    fn get(&self, url: Url) -> RequestBuilder {
        trace!("GET {}", url);
        let request = self.client.get(url);
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    fn api_get(&self, url: Url) -> RequestBuilder {
        self.get(url).header("Accept", "application/vnd.github+json")
    }

    /// Appends `segments` to the API base, percent-encoding each one.
    fn endpoint<'s, I>(&self, segments: I) -> Url
    where
        I: IntoIterator<Item = &'s str>,
    {
        let mut url = self.api_base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    pub fn repos_url(&self, user: &str) -> Url {
        self.endpoint(["users", user, "repos"])
    }

    pub fn contents_url(&self, owner: &str, repo: &str, path: &str) -> Url {
        let components = path.split('/').filter(|c| !c.is_empty());
        self.endpoint(["repos", owner, repo, "contents"].into_iter().chain(components))
    }

    async fn try_fetch_content(&self, download_ref: &str) -> Result<String, GhClipError> {
        let url = Url::parse(download_ref)
            .map_err(|e| GhClipError::ContentFetchError(format!("invalid URL: {}", e)))?;
        let response = self
            .get(url)
            .send()
            .await
            .map_err(|e| GhClipError::ContentFetchError(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(GhClipError::ContentFetchError(format!("HTTP {}", status.as_u16())));
        }
        response
            .text()
            .await
            .map_err(|e| GhClipError::ContentFetchError(e.to_string()))
    }
}

#[async_trait]
impl RemoteSource for GitHubClient {
    async fn list_repos(&self, user: &str) -> Result<Vec<Repository>, GhClipError> {
        if user.is_empty() {
            return Err(GhClipError::ConfigError("GitHub user must not be empty".to_owned()));
        }
        let response = self.api_get(self.repos_url(user)).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(GhClipError::FetchError {
                status: status.as_u16(),
            });
        }
        let repos: Vec<Repository> = response.json().await?;
        debug!("Fetched {} repositories for {}", repos.len(), user);
        Ok(repos)
    }

    async fn list_directory(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
    ) -> Result<Vec<RepositoryNode>, GhClipError> {
        if owner.is_empty() || repo.is_empty() {
            return Err(GhClipError::ConfigError(
                "owner and repository must not be empty".to_owned(),
            ));
        }
        let response = self
            .api_get(self.contents_url(owner, repo, path))
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(GhClipError::FetchError {
                status: status.as_u16(),
            });
        }
        let contents: ContentsResponse = response.json().await?;
        let nodes = contents.into_nodes();
        debug!("Listed {} entries under {}/{}:/{}", nodes.len(), owner, repo, path);
        Ok(nodes)
    }

    async fn fetch_content(&self, download_ref: &str) -> String {
        match self.try_fetch_content(download_ref).await {
            Ok(content) => content,
            Err(e) => {
                warn!("Failed to fetch {}: {}", download_ref, e);
                CONTENT_PLACEHOLDER.to_owned()
            }
        }
    }
}
