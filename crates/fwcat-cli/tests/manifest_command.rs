#![allow(missing_docs, clippy::expect_used, clippy::unwrap_used)]

mod common;

use common::{fwcat_cmd, read_doc, write_artifact};
use predicates::prelude::*;
use serde_json::Value;
use tempfile::tempdir;

#[test]
fn missing_directory_fails_without_output() -> anyhow::Result<()> {
    let tmp = tempdir()?;
    let out = tmp.path().join("manifest.json");

    fwcat_cmd()
        .args(["manifest", "--dir"])
        .arg(tmp.path().join("nope"))
        .arg("--out")
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("is not a directory"));

    assert!(!out.exists());
    Ok(())
}

#[test]
fn empty_directory_yields_zero_builds() -> anyhow::Result<()> {
    let tmp = tempdir()?;

    let output = fwcat_cmd()
        .args(["manifest", "--dir"])
        .arg(tmp.path())
        .args(["--version", "v1.15.0"])
        .output()?;
    assert!(output.status.success());

    let doc: Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(doc["build_count"], 0);
    assert_eq!(doc["builds"], serde_json::json!([]));
    assert_eq!(doc["version"], "v1.15.0");
    Ok(())
}

#[test]
fn writes_sorted_manifest_to_file() -> anyhow::Result<()> {
    let tmp = tempdir()?;
    let artifacts = tmp.path().join("artifacts");
    std::fs::create_dir(&artifacts)?;
    write_artifact(&artifacts, "px4_fmu-v6x", 53);
    write_artifact(&artifacts, "ark_fmu-v6x", 57);
    std::fs::write(artifacts.join("broken.px4"), "not json")?;
    std::fs::write(artifacts.join("notes.txt"), "ignored")?;
    let out = tmp.path().join("release").join("release_manifest.json");

    fwcat_cmd()
        .args(["manifest", "--dir"])
        .arg(&artifacts)
        .args(["--version", "v1.15.0", "--git-tag", "v1.15.0"])
        .args(["--base-url", "https://dl.example.com/v1.15.0/"])
        .arg("--out")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Generated release manifest"))
        .stderr(predicate::str::contains("(2 builds)"));

    let doc = read_doc(&out);
    assert_eq!(doc["format_version"], 1);
    assert_eq!(doc["build_count"], 2);
    let builds = doc["builds"].as_array().unwrap();
    assert_eq!(builds[0]["filename"], "ark_fmu-v6x_default.px4");
    assert_eq!(
        builds[0]["url"],
        "https://dl.example.com/v1.15.0/ark_fmu-v6x_default.px4"
    );
    assert_eq!(builds[1]["board_id"], 53);
    assert!(builds[1].get("image").is_none());
    Ok(())
}

#[test]
fn output_ends_with_newline() -> anyhow::Result<()> {
    let tmp = tempdir()?;
    let out = tmp.path().join("m.json");

    fwcat_cmd()
        .args(["manifest", "--dir"])
        .arg(tmp.path())
        .arg("--out")
        .arg(&out)
        .assert()
        .success();

    assert!(std::fs::read_to_string(&out)?.ends_with("}\n"));
    Ok(())
}

#[test]
fn quiet_suppresses_summary() -> anyhow::Result<()> {
    let tmp = tempdir()?;
    let out = tmp.path().join("m.json");

    fwcat_cmd()
        .args(["-q", "manifest", "--dir"])
        .arg(tmp.path())
        .arg("--out")
        .arg(&out)
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
    Ok(())
}

#[test]
fn config_file_changes_artifact_extension() -> anyhow::Result<()> {
    let tmp = tempdir()?;
    let artifacts = tmp.path().join("artifacts");
    std::fs::create_dir(&artifacts)?;
    write_artifact(&artifacts, "px4_fmu-v5", 50);
    std::fs::rename(
        artifacts.join("px4_fmu-v5_default.px4"),
        artifacts.join("px4_fmu-v5_default.apj"),
    )?;
    let config = tmp.path().join("fwcat.toml");
    std::fs::write(&config, "artifact_extension = \"apj\"\n")?;

    let output = fwcat_cmd()
        .arg("--config")
        .arg(&config)
        .args(["manifest", "--dir"])
        .arg(&artifacts)
        .output()?;
    assert!(output.status.success());

    let doc: Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(doc["build_count"], 1);
    Ok(())
}

#[test]
fn invalid_config_is_fatal() -> anyhow::Result<()> {
    let tmp = tempdir()?;
    let config = tmp.path().join("fwcat.toml");
    std::fs::write(&config, "fetch_timeout_secs = \"soon\"\n")?;

    fwcat_cmd()
        .env("FWCAT_CONFIG", &config)
        .args(["manifest", "--dir"])
        .arg(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("configuration"));
    Ok(())
}
