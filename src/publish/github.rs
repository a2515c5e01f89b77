use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{StatusCode, Url};
use serde::{Deserialize, Serialize};

use super::{RemoteFile, RemoteStore};
use crate::config::RunSettings;
use crate::config::defaults::DEFAULT_TIMEOUT;
use crate::error::{Result, ResultSyncError};

const GITHUB_ACCEPT: &str = "application/vnd.github+json";
const GITHUB_API_VERSION: &str = "2022-11-28";

/// Repository contents API backed store
pub struct GitHubStore {
    client: reqwest::Client,
    api_base: String,
    repository: String,
    branch: Option<String>,
    token: String,
}

#[derive(Debug, Deserialize)]
struct ContentsResponse {
    sha: String,
    #[serde(default)]
    content: String,
}

#[derive(Debug, Serialize)]
struct PutContents<'a> {
    message: &'a str,
    content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    sha: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    branch: Option<&'a str>,
}

impl GitHubStore {
    pub fn new(
        api_base: impl Into<String>,
        repository: impl Into<String>,
        token: impl Into<String>,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .timeout(DEFAULT_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            api_base: api_base.into(),
            repository: repository.into(),
            branch: None,
            token: token.into(),
        })
    }

    /// Builds the store from run settings; fails when no token is configured
    pub fn from_settings(settings: &RunSettings) -> Result<Self> {
        let token = settings.token.clone().ok_or_else(|| {
            ResultSyncError::CredentialMissing(
                "no GitHub token configured, publishing disabled".to_string(),
            )
        })?;

        let store = Self::new(&settings.api_base, &settings.repository, token)?
            .with_branch(settings.branch.clone());
        Ok(store)
    }

    pub fn with_branch(mut self, branch: Option<String>) -> Self {
        self.branch = branch;
        self
    }

    fn contents_url(&self, path: &str) -> Result<Url> {
        let mut url = Url::parse(&self.api_base).map_err(|e| {
            ResultSyncError::Config(format!("Invalid API base '{}': {}", self.api_base, e))
        })?;

        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                ResultSyncError::Config(format!("API base '{}' cannot be a base", self.api_base))
            })?;
            segments.pop_if_empty().push("repos");
            segments.extend(self.repository.split('/'));
            segments.push("contents");
            segments.extend(path.split('/').filter(|s| !s.is_empty()));
        }

        Ok(url)
    }

    fn request(&self, method: reqwest::Method, url: Url) -> reqwest::RequestBuilder {
        self.client
            .request(method, url)
            .header(AUTHORIZATION, format!("Bearer {}", self.token))
            .header(ACCEPT, GITHUB_ACCEPT)
            .header("X-GitHub-Api-Version", GITHUB_API_VERSION)
    }

    async fn put(&self, path: &str, content: &str, sha: Option<&str>, message: &str) -> Result<()> {
        let url = self.contents_url(path)?;
        let body = PutContents {
            message,
            content: STANDARD.encode(content),
            sha,
            branch: self.branch.as_deref(),
        };

        let response = self
            .request(reqwest::Method::PUT, url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ResultSyncError::publish(format!("PUT '{}' failed: {}", path, e)))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(ResultSyncError::publish(format!(
                "PUT '{}' rejected with status {}: {}",
                path,
                status,
                detail.trim()
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl RemoteStore for GitHubStore {
    async fn read(&self, path: &str) -> Result<Option<RemoteFile>> {
        let mut request = self.request(reqwest::Method::GET, self.contents_url(path)?);
        if let Some(branch) = &self.branch {
            request = request.query(&[("ref", branch)]);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ResultSyncError::publish(format!("GET '{}' failed: {}", path, e)))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(ResultSyncError::publish(format!(
                "GET '{}' returned status {}",
                path, status
            )));
        }

        let contents: ContentsResponse = response.json().await.map_err(|e| {
            ResultSyncError::publish(format!("GET '{}' returned unexpected body: {}", path, e))
        })?;

        Ok(Some(RemoteFile {
            path: path.to_string(),
            sha: contents.sha,
            content: decode_content(&contents.content),
        }))
    }

    async fn create(&self, path: &str, content: &str, message: &str) -> Result<()> {
        self.put(path, content, None, message).await
    }

    async fn update(&self, path: &str, content: &str, sha: &str, message: &str) -> Result<()> {
        self.put(path, content, Some(sha), message).await
    }
}

/// The API wraps base64 at 60 columns; undecodable content compares as empty
fn decode_content(encoded: &str) -> String {
    let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
    STANDARD
        .decode(compact)
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
        .unwrap_or_default()
}
