use anyhow::{Context, Result};
use log::debug;
use std::path::PathBuf;

use crate::marker::MARKER_FILE_NAME;
use crate::runtime::Runtime;

/// Termux's shared-storage downloads folder, relative to the home directory.
const DOWNLOADS_SUBDIR: &str = "storage/downloads/fenix";

/// Resolve the home directory: `$HOME` first, then the platform lookup.
#[tracing::instrument(level = "debug", skip(runtime))]
pub fn home_dir<R: Runtime>(runtime: &R) -> Result<PathBuf> {
    match runtime.env_var("HOME") {
        Ok(home) if !home.is_empty() => Ok(PathBuf::from(home)),
        _ => runtime.home_dir().context("Could not find home directory"),
    }
}

/// `~/storage/downloads/fenix`
#[tracing::instrument(level = "debug", skip(runtime))]
pub fn default_download_dir<R: Runtime>(runtime: &R) -> Result<PathBuf> {
    Ok(home_dir(runtime)?.join(DOWNLOADS_SUBDIR))
}

/// `~/.last_fenix_download_id`
#[tracing::instrument(level = "debug", skip(runtime))]
pub fn default_marker_path<R: Runtime>(runtime: &R) -> Result<PathBuf> {
    Ok(home_dir(runtime)?.join(MARKER_FILE_NAME))
}

/// Explicit paths win; the home directory is only consulted for missing ones.
#[tracing::instrument(level = "debug", skip(runtime))]
pub fn resolve_paths<R: Runtime>(
    runtime: &R,
    download_dir: Option<PathBuf>,
    marker: Option<PathBuf>,
) -> Result<(PathBuf, PathBuf)> {
    let download_dir = match download_dir {
        Some(dir) => dir,
        None => default_download_dir(runtime)?,
    };
    let marker = match marker {
        Some(path) => path,
        None => default_marker_path(runtime)?,
    };

    debug!(
        "Download directory: {}, marker: {}",
        download_dir.display(),
        marker.display()
    );
    Ok((download_dir, marker))
}
