//! External command execution.

use anyhow::{Context, Result};
use std::process::Command;

use super::RealRuntime;

impl RealRuntime {
    #[tracing::instrument(level = "debug", skip(self))]
    pub(crate) fn run_command_impl(&self, program: &str, args: &[String]) -> Result<Option<i32>> {
        let status = Command::new(program)
            .args(args)
            .status()
            .with_context(|| format!("Failed to run {}", program))?;
        Ok(status.code())
    }
}
