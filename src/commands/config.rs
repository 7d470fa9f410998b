use anyhow::Result;
use reqwest::Client;

use std::path::PathBuf;

use crate::{
    github::{GetReleases, GitHub, GitHubRepo},
    http::HttpClient,
    marker::Marker,
    runtime::Runtime,
};

use super::paths::resolve_paths;

/// GitHub rejects API requests without a user agent.
const USER_AGENT: &str = "fenix-fetch";

/// Command-line level settings, before any defaults are resolved.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub repo: GitHubRepo,
    pub api_url: Option<String>,
    pub download_dir: Option<PathBuf>,
    pub marker: Option<PathBuf>,
}

/// Everything one fetch run needs.
pub struct Config<R: Runtime, G: GetReleases> {
    pub runtime: R,
    pub github: G,
    pub http: HttpClient,
    pub repo: GitHubRepo,
    pub download_dir: PathBuf,
    pub marker: Marker,
}

impl<R: Runtime> Config<R, GitHub> {
    pub fn new(runtime: R, settings: Settings) -> Result<Self> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        let http = HttpClient::new(client);
        let github = GitHub::new(http.clone(), settings.api_url);

        let (download_dir, marker) =
            resolve_paths(&runtime, settings.download_dir, settings.marker)?;

        Ok(Self {
            runtime,
            github,
            http,
            repo: settings.repo,
            download_dir,
            marker: Marker::new(marker),
        })
    }
}
