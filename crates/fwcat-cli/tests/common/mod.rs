#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use serde_json::{Value, json};
use std::path::Path;
use std::time::Duration;

#[allow(dead_code)]
pub const CMD_TIMEOUT: Duration = Duration::from_secs(15);

/// Create a configured `fwcat` command suitable for integration tests.
#[allow(dead_code)]
pub fn fwcat_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("fwcat"));
    cmd.timeout(CMD_TIMEOUT);
    cmd.env_remove("FWCAT_CONFIG");
    cmd.env_remove("FWCAT_FETCH_TIMEOUT_SECS");
    cmd.env_remove("FWCAT_INDEX_DESCRIPTION");
    cmd.env("NO_COLOR", "1");
    cmd
}

/// Write a minimal firmware artifact for `target` into `dir`.
#[allow(dead_code)]
pub fn write_artifact(dir: &Path, target: &str, board_id: u64) {
    let artifact = json!({
        "magic": "PX4FWv1",
        "board_id": board_id,
        "board_revision": 0,
        "version": "v1.15.0",
        "git_identity": "v1.15.0",
        "git_hash": "0123456789abcdef",
        "build_time": 1_720_000_000,
        "image_size": 1_843_200,
        "sha256sum": "deadbeef",
        "image": "eJzLSM3JyVcozy/KSQEAGgQEXQ==",
        "manifest": {"target": target, "name": target},
    });
    std::fs::write(
        dir.join(format!("{target}_default.px4")),
        serde_json::to_vec_pretty(&artifact).expect("serialize artifact"),
    )
    .expect("write artifact");
}

/// Read a JSON document written by the CLI.
#[allow(dead_code)]
pub fn read_doc(path: &Path) -> Value {
    fwcat_core::read_json(path).expect("output is a JSON document")
}

/// Arguments for `fwcat index` publishing `version`.
#[allow(dead_code)]
pub fn index_args(version: &str, out: &Path) -> Vec<String> {
    vec![
        "index".to_string(),
        "--version".to_string(),
        version.to_string(),
        "--git-tag".to_string(),
        version.to_string(),
        "--build-count".to_string(),
        "150".to_string(),
        "--manifest-url".to_string(),
        format!("https://example.com/{version}/release_manifest.json"),
        "--out".to_string(),
        out.display().to_string(),
    ]
}
