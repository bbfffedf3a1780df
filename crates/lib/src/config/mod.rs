//! Build configuration.
//!
//! A run is described by a `.custom-gcl.yml` file (`.yaml` and `.json` are
//! also accepted) in the working directory:
//!
//! ```yaml
//! version: v1.57.0
//! name: custom-gcl
//! destination: ./bin
//! plugins:
//!   - module: github.com/example/linter
//!     version: v1.0.0
//!   - module: github.com/example/local
//!     import: github.com/example/local/analyzer
//!     path: ./local
//! ```
//!
//! # Submodules
//!
//! - [`load`] - discovery and decoding of the configuration file
//! - `types` - the configuration model and its validation

pub mod load;
mod types;

pub use load::{ConfigFile, ConfigSource, LoadError};
pub use types::*;
