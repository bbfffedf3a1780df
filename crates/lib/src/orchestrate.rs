//! Sequencing of a custom build run.
//!
//! A run happens in two phases. [`Orchestrator::prepare_run`] loads the
//! configuration, applies the output override and validates the result.
//! [`Orchestrator::execute`] then creates the workspace, hands it to a
//! [`Builder`] and tears the workspace down on every exit path.

use std::path::PathBuf;

use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::build::{BuildError, Builder};
use crate::config::{ConfigSource, Configuration, LoadError, ValidationError, split_output};
use crate::consts::WORKSPACE_PREFIX;
use crate::workspace::Workspace;

/// Failure of a run, tagged with the stage that failed.
#[derive(Debug, Error)]
pub enum CustomError {
  #[error("failed to load configuration")]
  ConfigLoad(#[source] LoadError),

  #[error("invalid configuration")]
  ConfigValidation(#[source] ValidationError),

  #[error("failed to create temporary directory in {}", root.display())]
  WorkspaceCreate { root: PathBuf, source: std::io::Error },

  #[error("build process failed")]
  BuildExecution(#[source] BuildError),
}

/// Drives one build run.
#[derive(Debug, Clone, Default)]
pub struct Orchestrator {
  /// Parent of the workspace; `None` means the system temp root.
  temp_root: Option<PathBuf>,
}

impl Orchestrator {
  /// Orchestrator that places workspaces under the system temp root.
  pub fn new() -> Self {
    Self { temp_root: None }
  }

  pub fn with_temp_root(temp_root: impl Into<PathBuf>) -> Self {
    Self {
      temp_root: Some(temp_root.into()),
    }
  }

  fn create_workspace(&self) -> Result<Workspace, CustomError> {
    let created = match &self.temp_root {
      Some(root) => Workspace::create_in(root, WORKSPACE_PREFIX),
      None => Workspace::create(WORKSPACE_PREFIX),
    };

    created.map_err(|e| CustomError::WorkspaceCreate {
      root: self.temp_root.clone().unwrap_or_else(std::env::temp_dir),
      source: e,
    })
  }

  /// Load and validate the configuration.
  ///
  /// A non-empty `output` replaces the configured destination and name,
  /// split after its last `/`.
  pub fn prepare_run(&self, source: &impl ConfigSource, output: &str) -> Result<Configuration, CustomError> {
    let mut cfg = source.load().map_err(CustomError::ConfigLoad)?;

    if !output.is_empty() {
      let (dir, name) = split_output(output);
      debug!(destination = %dir, name = %name, "applying output override");
      cfg.set_output(dir, name);
    }

    cfg.validate().map_err(CustomError::ConfigValidation)?;

    Ok(cfg)
  }

  /// Build `cfg` inside a fresh workspace.
  ///
  /// `new_builder` is only called once the workspace exists. The workspace
  /// is torn down before this returns, whatever the build outcome.
  pub async fn execute<B, F>(
    &self,
    cancel: &CancellationToken,
    cfg: &Configuration,
    new_builder: F,
  ) -> Result<(), CustomError>
  where
    B: Builder,
    F: FnOnce(&Configuration) -> B,
  {
    let workspace = self.create_workspace()?;

    info!(name = %cfg.name, destination = %cfg.destination, "building custom binary");

    let result = new_builder(cfg).build(cancel, workspace.path()).await;
    workspace.teardown();

    result.map_err(CustomError::BuildExecution)
  }
}
