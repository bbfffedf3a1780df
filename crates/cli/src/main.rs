mod cmd;
mod output;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::cmd::{CustomArgs, cmd_custom};
use crate::output::print_error;

/// gcl - build golangci-lint with custom linters
#[derive(Parser)]
#[command(name = "gcl")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Build a version of golangci-lint with custom linters
  Custom(CustomArgs),
}

fn main() -> ExitCode {
  let cli = Cli::parse();

  init_logging(cli.verbose);

  let result = match cli.command {
    Commands::Custom(args) => cmd_custom(&args),
  };

  match result {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      print_error(&format!("{err:#}"));
      ExitCode::FAILURE
    }
  }
}

fn init_logging(verbose: bool) {
  let default_level = if verbose { "debug" } else { "info" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_target(false)
    .without_time()
    .init();
}
