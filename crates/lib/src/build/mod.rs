//! Building the custom binary.
//!
//! The orchestrator only sees the [`Builder`] trait: given a prepared
//! workspace, produce the artifact at the configured destination. Failures
//! are opaque to the caller and reported through [`BuildError`].
//!
//! # Submodules
//!
//! - [`cmd`] - cancellable child-process execution
//! - [`golangci`] - builder that compiles golangci-lint with plugins
//! - [`plugins`] - rendering of the generated plugin import file

pub mod cmd;
pub mod golangci;
pub mod plugins;

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

pub use golangci::GolangciBuilder;

/// Errors that can occur while building.
#[derive(Debug, Error)]
pub enum BuildError {
  #[error("failed to start {program}")]
  Spawn { program: String, source: std::io::Error },

  #[error("failed to wait for {program}")]
  Wait { program: String, source: std::io::Error },

  #[error("command failed with exit code {code:?}: {command}: {stderr}")]
  CommandFailed {
    command: String,
    code: Option<i32>,
    stderr: String,
  },

  #[error("build cancelled")]
  Cancelled,

  #[error("failed to write {}", path.display())]
  WriteFile { path: PathBuf, source: std::io::Error },

  #[error("failed to create directory {}", path.display())]
  CreateDir { path: PathBuf, source: std::io::Error },

  #[error("failed to copy {} to {}", from.display(), to.display())]
  Copy {
    from: PathBuf,
    to: PathBuf,
    source: std::io::Error,
  },
}

/// Performs the actual build inside a prepared workspace.
///
/// Implementations receive their configuration at construction time and
/// must honour `cancel` by aborting as soon as practical.
#[async_trait]
pub trait Builder: Send + Sync {
  async fn build(&self, cancel: &CancellationToken, workspace: &Path) -> Result<(), BuildError>;
}
