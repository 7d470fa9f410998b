use anyhow::Result;
use log::{debug, info};

use super::client::GetReleases;
use super::repo::GitHubRepo;
use super::types::{Release, ReleaseAsset};

/// The first asset of the most recent release.
#[derive(Debug, Clone, PartialEq)]
pub struct LatestAsset {
    /// Tag or name of the release the asset belongs to
    pub release: String,
    pub asset: ReleaseAsset,
}

#[derive(Debug, PartialEq)]
pub enum ReleaseError {
    /// The releases listing was empty
    NoReleases { repo: String },
    /// The latest release has no assets attached
    NoAssets { repo: String, release: String },
}

impl std::fmt::Display for ReleaseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReleaseError::NoReleases { repo } => write!(f, "No releases found for {}", repo),
            ReleaseError::NoAssets { repo, release } => {
                write!(f, "Latest release {} of {} has no assets", release, repo)
            }
        }
    }
}

impl std::error::Error for ReleaseError {}

/// Picks element 0 of the release list, then element 0 of its assets.
///
/// The API lists releases newest first, so no sorting happens here.
pub fn select_latest_asset(
    repo: &GitHubRepo,
    releases: Vec<Release>,
) -> Result<LatestAsset, ReleaseError> {
    let release = releases
        .into_iter()
        .next()
        .ok_or_else(|| ReleaseError::NoReleases {
            repo: repo.to_string(),
        })?;

    let label = release.label().to_string();
    let asset = release
        .assets
        .into_iter()
        .next()
        .ok_or_else(|| ReleaseError::NoAssets {
            repo: repo.to_string(),
            release: label.clone(),
        })?;

    Ok(LatestAsset {
        release: label,
        asset,
    })
}

/// Queries the releases endpoint and returns the latest release's first asset.
#[tracing::instrument(level = "debug", skip(github))]
pub async fn fetch_latest_asset<G: GetReleases + ?Sized>(
    github: &G,
    repo: &GitHubRepo,
) -> Result<LatestAsset> {
    info!("Getting latest release asset");

    let releases = github.get_releases(repo).await?;
    if let Some(release) = releases.first() {
        info!(
            "Latest release {}{}, published {}",
            release.label(),
            if release.prerelease { " (pre-release)" } else { "" },
            release.published_at.as_deref().unwrap_or("(unknown)")
        );
    }
    let latest = select_latest_asset(repo, releases)?;

    info!(
        "Found release asset, id={}, name={}",
        latest.asset.id, latest.asset.name
    );
    if let Some(size) = latest.asset.size {
        debug!("Release {}: asset size {} bytes", latest.release, size);
    }

    Ok(latest)
}
