use anyhow::Result;
use async_trait::async_trait;
use log::debug;

use crate::http::HttpClient;

use super::repo::GitHubRepo;
use super::types::Release;

/// Default GitHub REST API base URL.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Media type pinning the v3 REST API.
pub const GITHUB_V3_ACCEPT: &str = "application/vnd.github.v3+json";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GetReleases: Send + Sync {
    /// First page of releases, newest first.
    async fn get_releases(&self, repo: &GitHubRepo) -> Result<Vec<Release>>;
}

pub struct GitHub {
    pub http: HttpClient,
    pub api_url: String,
}

impl GitHub {
    #[tracing::instrument(level = "debug", skip(http, api_url))]
    pub fn new(http: HttpClient, api_url: Option<String>) -> Self {
        let api_url = api_url
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        Self { http, api_url }
    }

    pub fn releases_url(&self, repo: &GitHubRepo) -> String {
        format!("{}/repos/{}/{}/releases", self.api_url, repo.owner, repo.repo)
    }
}

#[async_trait]
impl GetReleases for GitHub {
    #[tracing::instrument(level = "debug", skip(self))]
    async fn get_releases(&self, repo: &GitHubRepo) -> Result<Vec<Release>> {
        let url = self.releases_url(repo);
        debug!("Fetching releases from {}...", url);
        self.http.get_json(&url, GITHUB_V3_ACCEPT).await
    }
}
