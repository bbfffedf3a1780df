//! Configuration file discovery and decoding.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::config::Configuration;
use crate::consts::{CONFIG_BASENAME, CONFIG_EXTENSIONS};

/// Errors that can occur while loading the configuration.
#[derive(Debug, Error)]
pub enum LoadError {
  #[error("no .custom-gcl.{{yml,yaml,json}} file found in {}", dir.display())]
  NotFound { dir: PathBuf },

  #[error("failed to read {}", path.display())]
  Read { path: PathBuf, source: std::io::Error },

  #[error("failed to parse {}", path.display())]
  Parse { path: PathBuf, source: serde_yaml::Error },
}

/// Something that can produce a [`Configuration`].
pub trait ConfigSource {
  fn load(&self) -> Result<Configuration, LoadError>;
}

/// Configuration read from a `.custom-gcl` file on disk.
#[derive(Debug, Clone)]
pub enum ConfigFile {
  /// Probe a directory for `.custom-gcl.{yml,yaml,json}`.
  Discover(PathBuf),
  /// Read exactly this file.
  At(PathBuf),
}

impl ConfigFile {
  pub fn discover(dir: impl Into<PathBuf>) -> Self {
    ConfigFile::Discover(dir.into())
  }

  pub fn at(path: impl Into<PathBuf>) -> Self {
    ConfigFile::At(path.into())
  }

  /// Resolve the file that would be read.
  pub fn resolve(&self) -> Result<PathBuf, LoadError> {
    match self {
      ConfigFile::At(path) => Ok(path.clone()),
      ConfigFile::Discover(dir) => find_config_file(dir),
    }
  }
}

impl ConfigSource for ConfigFile {
  fn load(&self) -> Result<Configuration, LoadError> {
    let path = self.resolve()?;
    debug!(path = %path.display(), "loading configuration");
    read_config(&path)
  }
}

fn find_config_file(dir: &Path) -> Result<PathBuf, LoadError> {
  CONFIG_EXTENSIONS
    .iter()
    .map(|ext| dir.join(format!("{CONFIG_BASENAME}.{ext}")))
    .find(|candidate| candidate.is_file())
    .ok_or_else(|| LoadError::NotFound { dir: dir.to_path_buf() })
}

fn read_config(path: &Path) -> Result<Configuration, LoadError> {
  let content = fs::read_to_string(path).map_err(|e| LoadError::Read {
    path: path.to_path_buf(),
    source: e,
  })?;

  serde_yaml::from_str(&content).map_err(|e| LoadError::Parse {
    path: path.to_path_buf(),
    source: e,
  })
}
