//! Fetching an asset's bytes and writing them to their destination.

mod filename;

use anyhow::{Context, Result};
use log::{debug, info};
use std::path::{Path, PathBuf};

use crate::http::{Download, HttpClient};
use crate::runtime::Runtime;

pub use filename::{filename_from_content_disposition, sanitize_file_name};

/// File name used when the destination is not derived from the response.
pub const DEFAULT_FILE_NAME: &str = "beta.apk";

/// How the downloaded file is named inside the download directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileNaming {
    /// Always this name
    Fixed(String),
    /// The `filename=` value of the response's `content-disposition`,
    /// falling back to the asset name, then to [`DEFAULT_FILE_NAME`]
    ServerProvided,
}

impl Default for FileNaming {
    fn default() -> Self {
        FileNaming::Fixed(DEFAULT_FILE_NAME.to_string())
    }
}

/// Downloads the asset at `url`.
#[tracing::instrument(level = "debug", skip(http_client))]
pub async fn download_asset(http_client: &HttpClient, url: &str) -> Result<Download> {
    info!("Downloading {}...", url);
    let download = http_client.download(url).await?;
    info!("Download complete ({} bytes).", download.content.len());
    Ok(download)
}

/// Computes where a download lands.
pub fn destination_path(
    download_dir: &Path,
    naming: &FileNaming,
    download: &Download,
    asset_name: &str,
) -> PathBuf {
    let file_name = match naming {
        FileNaming::Fixed(name) => name.clone(),
        FileNaming::ServerProvided => download
            .content_disposition
            .as_deref()
            .and_then(filename_from_content_disposition)
            .unwrap_or_else(|| {
                debug!(
                    "No usable content-disposition file name, using asset name {}",
                    asset_name
                );
                sanitize_file_name(asset_name).unwrap_or_else(|| DEFAULT_FILE_NAME.to_string())
            }),
    };
    download_dir.join(file_name)
}

/// Writes `content` to `destination`, creating the parent directory chain first.
#[tracing::instrument(level = "debug", skip(runtime, content))]
pub fn persist_asset<R: Runtime>(runtime: &R, content: &[u8], destination: &Path) -> Result<()> {
    if let Some(parent) = destination.parent() {
        if !parent.as_os_str().is_empty() && !runtime.is_dir(parent) {
            debug!("Creating directory {}", parent.display());
            runtime
                .create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
    }

    runtime
        .write(destination, content)
        .with_context(|| format!("Failed to write {}", destination.display()))?;

    info!("Saved {}", destination.display());
    Ok(())
}
