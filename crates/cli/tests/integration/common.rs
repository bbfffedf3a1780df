//! Shared test helpers for CLI integration tests.

use std::path::PathBuf;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

/// A configuration that passes validation.
pub const VALID_CONFIG: &str = r#"
version: v1.57.0
name: custom-gcl
destination: ./bin
plugins:
  - module: github.com/example/linter
    version: v1.0.0
"#;

/// Isolated test environment.
///
/// Each test gets its own working directory, temp root, and a `PATH` with
/// no tools on it, so a build fails as soon as it tries to run `git`.
pub struct TestEnv {
  pub temp: TempDir,
}

impl TestEnv {
  /// Create an environment with `.custom-gcl.yml` set to `content`.
  pub fn with_config(content: &str) -> Self {
    let env = Self::empty();
    env.write_file(".custom-gcl.yml", content);
    env
  }

  /// Create an environment without a configuration file.
  pub fn empty() -> Self {
    let temp = TempDir::new().unwrap();
    Self { temp }
  }

  /// Write a file relative to the working directory.
  pub fn write_file(&self, relative_path: &str, content: &str) {
    let path = self.work_path().join(relative_path);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
  }

  /// Working directory the command runs in.
  pub fn work_path(&self) -> PathBuf {
    let p = self.temp.path().join("work");
    std::fs::create_dir_all(&p).unwrap();
    p
  }

  /// Temp root used for workspaces.
  pub fn tmp_path(&self) -> PathBuf {
    let p = self.temp.path().join("tmp");
    std::fs::create_dir_all(&p).unwrap();
    p
  }

  /// Empty directory used as `PATH`.
  pub fn bin_path(&self) -> PathBuf {
    let p = self.temp.path().join("empty-bin");
    std::fs::create_dir_all(&p).unwrap();
    p
  }

  /// Names of the entries left in the temp root.
  pub fn tmp_entries(&self) -> Vec<String> {
    std::fs::read_dir(self.tmp_path())
      .unwrap()
      .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
      .collect()
  }

  /// Get a pre-configured Command for the gcl binary.
  ///
  /// Sets environment variables for isolated testing:
  /// - `TMPDIR`: Isolated temp root
  /// - `PATH`: Empty directory, so no build tool can be found
  /// - `CUSTOM_GCL_KEEP_TEMP_FILES`: Removed
  pub fn gcl_cmd(&self) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("gcl");
    cmd.current_dir(self.work_path());
    cmd.env("TMPDIR", self.tmp_path());
    cmd.env("PATH", self.bin_path());
    cmd.env_remove("CUSTOM_GCL_KEEP_TEMP_FILES");
    cmd.env_remove("RUST_LOG");
    cmd
  }
}
