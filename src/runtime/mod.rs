//! Runtime abstraction for system operations.
//!
//! Everything the fetcher does to the machine goes through [`Runtime`], so the
//! workflow can be driven against a mock in unit tests.
//!
//! # Structure
//!
//! - `env` - Environment variables and the home directory
//! - `fs` - File system operations (read, write, directory)
//! - `process` - Running external commands

mod env;
mod fs;
mod process;

use anyhow::Result;
use std::env as std_env;
use std::path::{Path, PathBuf};

#[cfg_attr(test, mockall::automock)]
pub trait Runtime: Send + Sync {
    // Environment
    fn env_var(&self, key: &str) -> Result<String, std_env::VarError>;

    // File System
    fn write(&self, path: &Path, contents: &[u8]) -> Result<()>;
    fn read_to_string(&self, path: &Path) -> Result<String>;
    fn create_dir_all(&self, path: &Path) -> Result<()>;
    fn is_dir(&self, path: &Path) -> bool;

    // Directories
    fn home_dir(&self) -> Option<PathBuf>;

    // Processes
    /// Run `program` with `args`, inheriting stdio, and wait for it.
    /// Returns the exit code, or `None` if the process was killed by a signal.
    fn run_command(&self, program: &str, args: &[String]) -> Result<Option<i32>>;
}

pub struct RealRuntime;

impl Runtime for RealRuntime {
    fn env_var(&self, key: &str) -> Result<String, std_env::VarError> {
        self.env_var_impl(key)
    }

    fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        self.write_impl(path, contents)
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        self.read_to_string_impl(path)
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        self.create_dir_all_impl(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.is_dir_impl(path)
    }

    fn home_dir(&self) -> Option<PathBuf> {
        self.home_dir_impl()
    }

    fn run_command(&self, program: &str, args: &[String]) -> Result<Option<i32>> {
        self.run_command_impl(program, args)
    }
}
