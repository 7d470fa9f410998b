//! Handing a downloaded file to the Android share sheet.

use log::{info, warn};
use std::path::Path;

use crate::runtime::Runtime;

/// Termux:API command that opens the share sheet for a file.
pub const SHARE_COMMAND: &str = "termux-share";

/// Opens the share sheet for `path`.
///
/// The file is already on disk by the time this runs, so failures are logged and
/// reported through the return value instead of failing the run.
#[tracing::instrument(level = "debug", skip(runtime))]
pub fn share_file<R: Runtime>(runtime: &R, path: &Path) -> bool {
    info!("Sharing {}", path.display());

    let args = vec![path.to_string_lossy().into_owned()];
    match runtime.run_command(SHARE_COMMAND, &args) {
        Ok(Some(0)) => true,
        Ok(Some(code)) => {
            warn!("{} exited with status {}", SHARE_COMMAND, code);
            false
        }
        Ok(None) => {
            warn!("{} was terminated by a signal", SHARE_COMMAND);
            false
        }
        Err(e) => {
            warn!(
                "Could not run {} ({:#}). Is the Termux:API package installed?",
                SHARE_COMMAND, e
            );
            false
        }
    }
}
