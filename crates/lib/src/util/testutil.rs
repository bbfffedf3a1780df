//! Test doubles for the orchestrator's collaborators.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::build::{BuildError, Builder};
use crate::config::{ConfigSource, Configuration, LoadError};

/// Config source that returns a fixed result.
pub enum StaticSource {
  Ok(Configuration),
  NotFound,
}

impl StaticSource {
  pub fn ok(cfg: Configuration) -> Self {
    StaticSource::Ok(cfg)
  }

  pub fn not_found() -> Self {
    StaticSource::NotFound
  }
}

impl ConfigSource for StaticSource {
  fn load(&self) -> Result<Configuration, LoadError> {
    match self {
      StaticSource::Ok(cfg) => Ok(cfg.clone()),
      StaticSource::NotFound => Err(LoadError::NotFound {
        dir: PathBuf::from("/nowhere"),
      }),
    }
  }
}

/// Succeeds after writing a marker file into the workspace.
#[derive(Default)]
pub struct RecordingBuilder {
  pub calls: Arc<Mutex<Vec<PathBuf>>>,
  pub saw_cancelled: Arc<AtomicBool>,
}

impl RecordingBuilder {
  pub const MARKER: &'static str = "built";
}

#[async_trait]
impl Builder for RecordingBuilder {
  async fn build(&self, cancel: &CancellationToken, workspace: &Path) -> Result<(), BuildError> {
    assert!(workspace.is_dir(), "workspace must exist during the build");
    std::fs::write(workspace.join(Self::MARKER), "ok").unwrap();
    self.saw_cancelled.store(cancel.is_cancelled(), Ordering::SeqCst);
    self.calls.lock().unwrap().push(workspace.to_path_buf());
    Ok(())
  }
}

/// Fails like a broken toolchain would.
#[derive(Default)]
pub struct FailingBuilder {
  pub workspace: Arc<Mutex<Option<PathBuf>>>,
}

#[async_trait]
impl Builder for FailingBuilder {
  async fn build(&self, _cancel: &CancellationToken, workspace: &Path) -> Result<(), BuildError> {
    *self.workspace.lock().unwrap() = Some(workspace.to_path_buf());
    Err(BuildError::CommandFailed {
      command: "go build".to_string(),
      code: Some(1),
      stderr: "compile error".to_string(),
    })
  }
}

/// Panics mid-build.
#[derive(Default)]
pub struct PanickingBuilder {
  pub workspace: Arc<Mutex<Option<PathBuf>>>,
}

#[async_trait]
impl Builder for PanickingBuilder {
  async fn build(&self, _cancel: &CancellationToken, workspace: &Path) -> Result<(), BuildError> {
    {
      *self.workspace.lock().unwrap() = Some(workspace.to_path_buf());
    }
    panic!("builder exploded");
  }
}
