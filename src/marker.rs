//! Last-downloaded marker: the id of the last asset actually written to disk.

use anyhow::{Context, Result};
use log::debug;
use std::path::{Path, PathBuf};

use crate::github::AssetId;
use crate::runtime::Runtime;

/// Marker file name, relative to the home directory.
pub const MARKER_FILE_NAME: &str = ".last_fenix_download_id";

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    path: PathBuf,
}

impl Marker {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the stored id. Any failure, including a missing file, is "no marker".
    #[tracing::instrument(level = "debug", skip(self, runtime))]
    pub fn read<R: Runtime>(&self, runtime: &R) -> Option<String> {
        match runtime.read_to_string(&self.path) {
            Ok(id) => Some(id),
            Err(e) => {
                debug!("No usable marker at {}: {:#}", self.path.display(), e);
                None
            }
        }
    }

    /// True iff the marker exists and holds exactly `current`.
    #[tracing::instrument(level = "debug", skip(self, runtime))]
    pub fn should_skip<R: Runtime>(&self, runtime: &R, current: &AssetId) -> bool {
        self.read(runtime).as_deref() == Some(current.as_str())
    }

    /// Stores `id`. Only call after the asset itself has been written.
    #[tracing::instrument(level = "debug", skip(self, runtime))]
    pub fn record<R: Runtime>(&self, runtime: &R, id: &AssetId) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !runtime.is_dir(parent) {
                runtime
                    .create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory {}", parent.display()))?;
            }
        }

        runtime
            .write(&self.path, id.as_str().as_bytes())
            .with_context(|| format!("Failed to update marker {}", self.path.display()))?;

        debug!("Recorded asset {} in {}", id, self.path.display());
        Ok(())
    }
}
