//! Per-run temporary workspace.
//!
//! Each run gets a uniquely named directory under the system temp root. The
//! [`Workspace`] guard decides exactly once, at teardown or on drop, whether
//! the directory is removed or preserved for post-mortem debugging
//! (see [`ENV_KEEP_TEMP_FILES`]).

use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tracing::{debug, warn};

use crate::consts::ENV_KEEP_TEMP_FILES;

/// Exclusively owned temporary directory for a single build run.
#[derive(Debug)]
pub struct Workspace {
  dir: Option<TempDir>,
  path: PathBuf,
}

impl Workspace {
  /// Create a workspace under the system temp root.
  pub fn create(prefix: &str) -> io::Result<Self> {
    Self::create_in(std::env::temp_dir(), prefix)
  }

  /// Create a workspace under `root`, named `prefix` plus a random suffix.
  pub fn create_in(root: impl AsRef<Path>, prefix: &str) -> io::Result<Self> {
    let dir = tempfile::Builder::new().prefix(prefix).tempdir_in(root)?;
    let path = dir.path().to_path_buf();
    debug!(path = %path.display(), "created workspace");
    Ok(Self { dir: Some(dir), path })
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  /// Remove the workspace, or keep it if the preservation toggle is set.
  pub fn teardown(mut self) {
    self.release();
  }

  fn release(&mut self) {
    let Some(dir) = self.dir.take() else {
      return;
    };

    if keep_temp_files() {
      let path = dir.keep();
      warn!(
        "the env var {} has been detected: the temporary directory is preserved: {}",
        ENV_KEEP_TEMP_FILES,
        path.display()
      );
      return;
    }

    if let Err(e) = dir.close() {
      debug!(path = %self.path.display(), error = %e, "failed to remove workspace");
    }
  }
}

impl Drop for Workspace {
  fn drop(&mut self) {
    self.release();
  }
}

/// Whether [`ENV_KEEP_TEMP_FILES`] is set to a non-empty value.
pub fn keep_temp_files() -> bool {
  std::env::var_os(ENV_KEEP_TEMP_FILES).is_some_and(|v| !v.is_empty())
}
