//! Implementation of the `gcl custom` command.
//!
//! Loads `.custom-gcl.yml` from the working directory, applies the `--output`
//! override, and builds the custom golangci-lint binary in a temporary
//! workspace.

use std::time::Instant;

use anyhow::{Context, Result};
use clap::Args;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use customgcl_lib::build::GolangciBuilder;
use customgcl_lib::config::ConfigFile;
use customgcl_lib::orchestrate::Orchestrator;

use crate::output::print_success;

#[derive(Debug, Clone, Default, Args)]
pub struct CustomArgs {
  /// Path to output file
  #[arg(short, long, default_value = "")]
  pub output: String,
}

/// Execute the custom command.
///
/// Configuration problems are reported before any workspace is created.
/// Ctrl-C cancels the build; the workspace is still torn down.
pub fn cmd_custom(args: &CustomArgs) -> Result<()> {
  let start = Instant::now();

  let cwd = std::env::current_dir().context("Failed to read working directory")?;
  let orchestrator = Orchestrator::new();
  let cfg = orchestrator.prepare_run(&ConfigFile::discover(&cwd), &args.output)?;

  let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
  rt.block_on(async {
    let cancel = CancellationToken::new();

    let on_signal = cancel.clone();
    tokio::spawn(async move {
      if tokio::signal::ctrl_c().await.is_ok() {
        warn!("interrupted, cancelling build");
        on_signal.cancel();
      }
    });

    orchestrator.execute(&cancel, &cfg, GolangciBuilder::new).await
  })?;

  let output = cfg.output_path();
  let output = dunce::canonicalize(&output).unwrap_or(output);
  print_success(&format!(
    "Built {} in {}",
    output.display(),
    humantime::format_duration(std::time::Duration::from_secs(start.elapsed().as_secs()))
  ));

  Ok(())
}
