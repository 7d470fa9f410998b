//! GitHub releases API: types, client, and latest-asset selection.

mod client;
mod latest;
mod repo;
mod types;

#[cfg(test)]
pub use client::MockGetReleases;
pub use client::{DEFAULT_API_URL, GITHUB_V3_ACCEPT, GetReleases, GitHub};
pub use latest::{LatestAsset, ReleaseError, fetch_latest_asset, select_latest_asset};
pub use repo::{DEFAULT_REPO, GitHubRepo};
pub use types::{AssetId, Release, ReleaseAsset};
