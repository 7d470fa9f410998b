use anyhow::Result;
use log::info;
use std::path::PathBuf;

use crate::{
    download::{FileNaming, destination_path, download_asset, persist_asset},
    github::{AssetId, GetReleases, fetch_latest_asset},
    runtime::Runtime,
    share::share_file,
};

pub mod config;
mod paths;

pub use config::{Config, Settings};

/// How a single fetch run behaves.
#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    /// Consult and update the last-download marker
    pub dedup: bool,
    /// Download even if the marker matches (the marker is still updated)
    pub force: bool,
    /// Open the share sheet for the downloaded file
    pub share: bool,
    pub naming: FileNaming,
}

/// Result of a run that did not fail.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Downloaded {
        asset: AssetId,
        path: PathBuf,
        shared: bool,
    },
    /// The latest asset matches the marker; nothing was downloaded
    AlreadyDownloaded { asset: AssetId },
}

/// Download the latest asset unless the marker says it was already fetched.
#[tracing::instrument(level = "debug", skip(runtime, settings))]
pub async fn download<R: Runtime>(
    runtime: R,
    settings: Settings,
    force: bool,
    share: bool,
    naming: FileNaming,
) -> Result<Outcome> {
    let config = Config::new(runtime, settings)?;
    let options = FetchOptions {
        dedup: true,
        force,
        share,
        naming,
    };
    run(&config, &options).await
}

/// Download the latest asset unconditionally and hand it to the share sheet.
#[tracing::instrument(level = "debug", skip(runtime, settings))]
pub async fn install<R: Runtime>(
    runtime: R,
    settings: Settings,
    share: bool,
    naming: FileNaming,
) -> Result<Outcome> {
    let config = Config::new(runtime, settings)?;
    let options = FetchOptions {
        dedup: false,
        force: false,
        share,
        naming,
    };
    run(&config, &options).await
}

/// fetch -> (skip check) -> download -> persist -> (marker) -> (share)
#[tracing::instrument(level = "debug", skip(config))]
pub async fn run<R: Runtime, G: GetReleases>(
    config: &Config<R, G>,
    options: &FetchOptions,
) -> Result<Outcome> {
    let latest = fetch_latest_asset(&config.github, &config.repo).await?;
    let asset = latest.asset;

    if options.dedup && !options.force && config.marker.should_skip(&config.runtime, &asset.id) {
        info!("Asset ID matches last downloaded asset, stopping");
        return Ok(Outcome::AlreadyDownloaded { asset: asset.id });
    }

    let download = download_asset(&config.http, &asset.browser_download_url).await?;

    let destination = destination_path(&config.download_dir, &options.naming, &download, &asset.name);
    persist_asset(&config.runtime, &download.content, &destination)?;

    if options.dedup {
        config.marker.record(&config.runtime, &asset.id)?;
    }

    let shared = options.share && share_file(&config.runtime, &destination);

    Ok(Outcome::Downloaded {
        asset: asset.id,
        path: destination,
        shared,
    })
}
