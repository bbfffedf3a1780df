/// Base name of the configuration file, without extension.
pub const CONFIG_BASENAME: &str = ".custom-gcl";

/// Extensions probed, in order, when discovering the configuration file.
pub const CONFIG_EXTENSIONS: &[&str] = &["yml", "yaml", "json"];

/// Binary name used when the configuration does not set one.
pub const DEFAULT_BINARY_NAME: &str = "custom-gcl";

/// Destination used when the configuration does not set one.
pub const DEFAULT_DESTINATION: &str = ".";

/// Prefix of the per-run temporary directory.
pub const WORKSPACE_PREFIX: &str = "custom-gcl";

/// Any non-empty value preserves the workspace after a run.
pub const ENV_KEEP_TEMP_FILES: &str = "CUSTOM_GCL_KEEP_TEMP_FILES";

/// Upstream repository the custom binary is built from.
pub const GOLANGCI_REPOSITORY: &str = "https://github.com/golangci/golangci-lint.git";
