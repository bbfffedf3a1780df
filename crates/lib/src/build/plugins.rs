//! Generated Go file that links plugins into golangci-lint.

use std::collections::BTreeSet;

use crate::config::Plugin;

/// Location of the generated file inside the golangci-lint checkout.
pub const PLUGINS_FILE: &str = "cmd/golangci-lint/plugins.go";

/// Render `plugins.go`: one blank import per plugin, sorted and deduplicated.
pub fn render_plugins_file(plugins: &[Plugin]) -> String {
  let imports: BTreeSet<&str> = plugins.iter().map(|p| p.import.as_str()).collect();

  let mut out = String::from("package main\n\nimport (\n");
  for import in imports {
    out.push_str(&format!("\t_ \"{import}\"\n"));
  }
  out.push_str(")\n");
  out
}
