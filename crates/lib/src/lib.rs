//! customgcl-lib: build a golangci-lint binary with custom linters.
//!
//! The crate is split along the stages of a run:
//! - `config`: loading and validating `.custom-gcl.yml`
//! - `workspace`: the per-run temporary directory and its teardown
//! - `build`: the `Builder` seam and the golangci-lint builder
//! - `orchestrate`: sequencing of load, override, workspace and build

pub mod build;
pub mod config;
pub mod consts;
pub mod orchestrate;
pub mod util;
pub mod workspace;
