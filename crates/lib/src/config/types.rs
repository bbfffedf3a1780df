use std::io;
use std::path::{self, Path};

use serde::Deserialize;
use thiserror::Error;

use crate::consts::{DEFAULT_BINARY_NAME, DEFAULT_DESTINATION};

/// Errors reported by [`Configuration::validate`].
#[derive(Debug, Error)]
pub enum ValidationError {
  #[error("root field 'version' is required")]
  MissingVersion,

  #[error("root field 'name' is required")]
  MissingName,

  #[error("root field 'name' must be a file name, got {name:?}")]
  InvalidName { name: String },

  #[error("no plugins defined")]
  NoPlugins,

  #[error("plugin #{index}: field 'module' is required")]
  MissingModule { index: usize },

  #[error("plugin {module}: 'version' or 'path' should be provided")]
  MissingSource { module: String },

  #[error("plugin {module}: 'version' and 'path' should not be provided at the same time")]
  ConflictingSource { module: String },

  #[error("plugin {module}: failed to resolve path")]
  PluginPath { module: String, source: io::Error },
}

/// A plugin (Go module) compiled into the custom binary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Plugin {
  /// Go module path.
  pub module: String,
  /// Package imported by the generated plugins file. Defaults to `module`.
  pub import: String,
  /// Module version fetched with `go get`.
  pub version: String,
  /// Local checkout wired in with a `replace` directive.
  pub path: String,
}

/// What to build and where to put it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Configuration {
  /// golangci-lint git ref the binary is built from.
  pub version: String,
  /// File name of the produced binary.
  pub name: String,
  /// Directory the binary is written to.
  pub destination: String,
  pub plugins: Vec<Plugin>,
}

impl Default for Configuration {
  fn default() -> Self {
    Self {
      version: String::new(),
      name: DEFAULT_BINARY_NAME.to_string(),
      destination: DEFAULT_DESTINATION.to_string(),
      plugins: Vec::new(),
    }
  }
}

impl Configuration {
  /// Replace the output location with `dir`/`name`.
  pub fn set_output(&mut self, dir: &str, name: &str) {
    self.destination = dir.to_string();
    self.name = name.to_string();
  }

  /// Check the configuration and normalise it in place.
  ///
  /// Besides rejecting incomplete configurations, this fills in each
  /// plugin's default import path, makes local plugin paths absolute, and
  /// maps an empty destination to the current directory.
  pub fn validate(&mut self) -> Result<(), ValidationError> {
    if is_blank(&self.version) {
      return Err(ValidationError::MissingVersion);
    }

    if is_blank(&self.name) {
      return Err(ValidationError::MissingName);
    }
    if !is_file_name(&self.name) {
      return Err(ValidationError::InvalidName { name: self.name.clone() });
    }

    if is_blank(&self.destination) {
      self.destination = DEFAULT_DESTINATION.to_string();
    }

    if self.plugins.is_empty() {
      return Err(ValidationError::NoPlugins);
    }

    for (index, plugin) in self.plugins.iter_mut().enumerate() {
      if is_blank(&plugin.module) {
        return Err(ValidationError::MissingModule { index });
      }

      if is_blank(&plugin.import) {
        plugin.import = plugin.module.clone();
      }

      match (is_blank(&plugin.version), is_blank(&plugin.path)) {
        (true, true) => {
          return Err(ValidationError::MissingSource {
            module: plugin.module.clone(),
          });
        }
        (false, false) => {
          return Err(ValidationError::ConflictingSource {
            module: plugin.module.clone(),
          });
        }
        (false, true) => continue,
        (true, false) => {}
      }

      let abs = path::absolute(Path::new(plugin.path.trim())).map_err(|e| ValidationError::PluginPath {
        module: plugin.module.clone(),
        source: e,
      })?;
      plugin.path = abs.to_string_lossy().into_owned();
    }

    Ok(())
  }

  /// File name of the binary on the current platform.
  pub fn binary_name(&self) -> String {
    if cfg!(windows) {
      format!("{}.exe", self.name)
    } else {
      self.name.clone()
    }
  }

  /// Final location of the binary.
  pub fn output_path(&self) -> std::path::PathBuf {
    Path::new(&self.destination).join(self.binary_name())
  }
}

/// Split an output path into its directory and file name.
///
/// The split happens right after the last `/`; the directory keeps the
/// trailing slash and is empty when the path has none.
pub fn split_output(raw: &str) -> (&str, &str) {
  match raw.rfind('/') {
    Some(idx) => raw.split_at(idx + 1),
    None => ("", raw),
  }
}

fn is_blank(s: &str) -> bool {
  s.trim().is_empty()
}

fn is_file_name(name: &str) -> bool {
  name != "." && name != ".." && !name.contains(['/', '\\'])
}
