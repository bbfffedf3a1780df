//! Builder that compiles golangci-lint with a set of plugins.
//!
//! Steps, all inside the workspace:
//! 1. shallow-clone golangci-lint at the configured version
//! 2. add each plugin to `go.mod` (`go get`, plus `replace` for local paths)
//! 3. write the blank-import file that registers the plugins
//! 4. `go mod tidy`
//! 5. `go build` the binary into the workspace
//! 6. copy the binary to its destination

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::build::cmd::run_command;
use crate::build::plugins::{PLUGINS_FILE, render_plugins_file};
use crate::build::{BuildError, Builder};
use crate::config::{Configuration, Plugin};
use crate::consts::GOLANGCI_REPOSITORY;

const CHECKOUT_DIR: &str = "golangci-lint";

/// Builds a golangci-lint binary for a validated [`Configuration`].
#[derive(Debug, Clone)]
pub struct GolangciBuilder {
  cfg: Configuration,
  repository: String,
}

impl GolangciBuilder {
  pub fn new(cfg: &Configuration) -> Self {
    Self {
      cfg: cfg.clone(),
      repository: GOLANGCI_REPOSITORY.to_string(),
    }
  }

  /// Clone from `repository` instead of the upstream GitHub repository.
  pub fn with_repository(mut self, repository: impl Into<String>) -> Self {
    self.repository = repository.into();
    self
  }

  async fn clone_repository(&self, cancel: &CancellationToken, workspace: &Path) -> Result<PathBuf, BuildError> {
    info!(version = %self.cfg.version, "cloning golangci-lint repository");

    let checkout = workspace.join(CHECKOUT_DIR);
    run_command("git", &clone_args(&self.cfg.version, &self.repository, &checkout), workspace, cancel).await?;
    Ok(checkout)
  }

  async fn add_plugins(&self, cancel: &CancellationToken, checkout: &Path) -> Result<(), BuildError> {
    for plugin in &self.cfg.plugins {
      info!(module = %plugin.module, "adding plugin");
      for args in plugin_commands(plugin) {
        run_command("go", &args, checkout, cancel).await?;
      }
    }
    Ok(())
  }

  async fn write_plugins_file(&self, checkout: &Path) -> Result<(), BuildError> {
    info!("adding plugin imports");

    let path = checkout.join(PLUGINS_FILE);
    fs::write(&path, render_plugins_file(&self.cfg.plugins))
      .await
      .map_err(|e| BuildError::WriteFile { path, source: e })
  }

  async fn tidy(&self, cancel: &CancellationToken, checkout: &Path) -> Result<(), BuildError> {
    info!("running go mod tidy");
    run_command("go", &args(["mod", "tidy"]), checkout, cancel).await?;
    Ok(())
  }

  async fn compile(
    &self,
    cancel: &CancellationToken,
    checkout: &Path,
    workspace: &Path,
  ) -> Result<PathBuf, BuildError> {
    info!("building golangci-lint binary");

    let binary = workspace.join(self.cfg.binary_name());
    run_command("go", &build_args(&self.cfg.version, &binary), checkout, cancel).await?;
    Ok(binary)
  }

  async fn install(&self, binary: &Path) -> Result<PathBuf, BuildError> {
    let destination = PathBuf::from(&self.cfg.destination);
    fs::create_dir_all(&destination).await.map_err(|e| BuildError::CreateDir {
      path: destination.clone(),
      source: e,
    })?;

    let target = self.cfg.output_path();
    info!(path = %target.display(), "moving golangci-lint binary");

    fs::copy(binary, &target).await.map_err(|e| BuildError::Copy {
      from: binary.to_path_buf(),
      to: target.clone(),
      source: e,
    })?;

    #[cfg(unix)]
    {
      use std::os::unix::fs::PermissionsExt;
      fs::set_permissions(&target, std::fs::Permissions::from_mode(0o755))
        .await
        .map_err(|e| BuildError::WriteFile {
          path: target.clone(),
          source: e,
        })?;
    }

    Ok(target)
  }
}

#[async_trait]
impl Builder for GolangciBuilder {
  async fn build(&self, cancel: &CancellationToken, workspace: &Path) -> Result<(), BuildError> {
    debug!(workspace = %workspace.display(), "starting build");

    let checkout = self.clone_repository(cancel, workspace).await?;
    self.add_plugins(cancel, &checkout).await?;
    self.write_plugins_file(&checkout).await?;
    self.tidy(cancel, &checkout).await?;
    let binary = self.compile(cancel, &checkout, workspace).await?;
    self.install(&binary).await?;

    Ok(())
  }
}

fn args<const N: usize>(parts: [&str; N]) -> Vec<String> {
  parts.iter().map(|s| s.to_string()).collect()
}

fn clone_args(version: &str, repository: &str, checkout: &Path) -> Vec<String> {
  let mut out = args([
    "clone",
    "--branch",
    version,
    "--single-branch",
    "--depth",
    "1",
    "-c",
    "advice.detachedHead=false",
    "-q",
    repository,
  ]);
  out.push(checkout.to_string_lossy().into_owned());
  out
}

/// `go` invocations that make `plugin` resolvable from the checkout.
fn plugin_commands(plugin: &Plugin) -> Vec<Vec<String>> {
  if plugin.path.is_empty() {
    return vec![args(["get", &format!("{}@{}", plugin.module, plugin.version)])];
  }

  vec![
    args(["mod", "edit", "-replace", &format!("{}={}", plugin.module, plugin.path)]),
    args(["get", &plugin.module]),
  ]
}

fn build_args(version: &str, binary: &Path) -> Vec<String> {
  let mut out = args([
    "build",
    "-trimpath",
    "-ldflags",
    &format!("-s -w -X main.version={version}-custom-gcl"),
    "-o",
  ]);
  out.push(binary.to_string_lossy().into_owned());
  out.push("./cmd/golangci-lint".to_string());
  out
}
