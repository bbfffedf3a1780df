use predicates::prelude::*;

use super::common::{TestEnv, VALID_CONFIG};

#[test]
fn missing_config_fails_without_usage() {
  let env = TestEnv::empty();

  env
    .gcl_cmd()
    .arg("custom")
    .assert()
    .failure()
    .stderr(predicate::str::contains("failed to load configuration"))
    .stderr(predicate::str::contains("Usage").not());

  assert!(env.tmp_entries().is_empty());
}

#[test]
fn malformed_config_fails() {
  let env = TestEnv::with_config("plugins: [unterminated\n");

  env
    .gcl_cmd()
    .arg("custom")
    .assert()
    .failure()
    .stderr(predicate::str::contains("failed to parse"));
}

#[test]
fn config_without_plugins_fails_validation() {
  let env = TestEnv::with_config("version: v1.57.0\n");

  env
    .gcl_cmd()
    .arg("custom")
    .assert()
    .failure()
    .stderr(predicate::str::contains("invalid configuration: no plugins defined"));

  assert!(env.tmp_entries().is_empty());
}

#[test]
fn output_without_file_name_fails_validation() {
  let env = TestEnv::with_config(VALID_CONFIG);

  env
    .gcl_cmd()
    .args(["custom", "-o", "out/"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("root field 'name' is required"));
}

#[test]
fn json_config_is_discovered() {
  let env = TestEnv::empty();
  env.write_file(".custom-gcl.json", r#"{"version": "v1.57.0"}"#);

  env
    .gcl_cmd()
    .arg("custom")
    .assert()
    .failure()
    .stderr(predicate::str::contains("no plugins defined"));
}

#[cfg(unix)]
#[test]
fn build_failure_removes_workspace() {
  let env = TestEnv::with_config(VALID_CONFIG);

  env
    .gcl_cmd()
    .args(["custom", "--output", "out/mylinter"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("build process failed: failed to start git: "));

  assert!(env.tmp_entries().is_empty(), "leftover: {:?}", env.tmp_entries());
  assert!(!env.work_path().join("out").exists());
}

#[cfg(unix)]
#[test]
fn keep_toggle_preserves_workspace() {
  let env = TestEnv::with_config(VALID_CONFIG);

  env
    .gcl_cmd()
    .arg("custom")
    .env("CUSTOM_GCL_KEEP_TEMP_FILES", "1")
    .assert()
    .failure()
    .stderr(predicate::str::contains("CUSTOM_GCL_KEEP_TEMP_FILES"))
    .stderr(predicate::str::contains("preserved"));

  let entries = env.tmp_entries();
  assert_eq!(entries.len(), 1, "entries: {entries:?}");
  assert!(entries[0].starts_with("custom-gcl"));
}
