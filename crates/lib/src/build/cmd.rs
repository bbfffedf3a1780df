//! Cancellable child-process execution.

use std::path::Path;
use std::process::Stdio;

use tokio::process::Command;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::build::BuildError;

/// Run `program` with `args` in `cwd` and return its trimmed stdout.
///
/// The child inherits the parent environment. If `cancel` fires before the
/// child exits, the child is killed and [`BuildError::Cancelled`] is returned.
pub async fn run_command(
  program: &str,
  args: &[String],
  cwd: &Path,
  cancel: &CancellationToken,
) -> Result<String, BuildError> {
  if cancel.is_cancelled() {
    return Err(BuildError::Cancelled);
  }

  let rendered = render_command(program, args);
  debug!(cmd = %rendered, cwd = %cwd.display(), "spawning process");

  let child = Command::new(program)
    .args(args)
    .current_dir(cwd)
    .stdin(Stdio::null())
    .stdout(Stdio::piped())
    .stderr(Stdio::piped())
    .kill_on_drop(true)
    .spawn()
    .map_err(|e| BuildError::Spawn {
      program: program.to_string(),
      source: e,
    })?;

  // Dropping the wait future drops the child, which kills it.
  let output = tokio::select! {
    output = child.wait_with_output() => output.map_err(|e| BuildError::Wait {
      program: program.to_string(),
      source: e,
    })?,
    _ = cancel.cancelled() => {
      debug!(cmd = %rendered, "cancelled, killing process");
      return Err(BuildError::Cancelled);
    }
  };

  let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
  if !stderr.is_empty() {
    debug!(stderr = %stderr, "command stderr");
  }

  if !output.status.success() {
    return Err(BuildError::CommandFailed {
      command: rendered,
      code: output.status.code(),
      stderr,
    });
  }

  Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

fn render_command(program: &str, args: &[String]) -> String {
  std::iter::once(program)
    .chain(args.iter().map(String::as_str))
    .collect::<Vec<_>>()
    .join(" ")
}
