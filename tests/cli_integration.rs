//! Integration tests for the modcompat binary.
//!
//! Every command runs in a fresh temporary directory with config lookup
//! isolated from the developer's machine.

mod common;

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use common::{jar_bytes, write_jar};

const MOD_JSON: &[u8] = br#"{
    "schemaVersion": 1,
    "entrypoints": {
        "main": ["com.example.ExampleMod"],
        "client": [{"adapter": "kotlin", "value": "com.example.client.ExampleClient"}]
    },
    "accessWidener": "example.accesswidener",
    "jars": [{"file": "META-INF/jars/bundled.jar"}]
}"#;

/// Get a command for running modcompat inside `dir`.
fn modcompat(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("modcompat").unwrap();
    cmd.current_dir(dir)
        .env_remove("MODCOMPAT_CONFIG")
        .env_remove("MODCOMPAT_LOG")
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join(".config"));
    cmd
}

fn example_mod(dir: &Path) -> std::path::PathBuf {
    let bundled = jar_bytes(&[("com/bundled/Helper.class", b"")]);
    write_jar(
        dir,
        "example.jar",
        &[
            ("fabric.mod.json", MOD_JSON),
            ("com/example/ExampleMod.class", b""),
            ("META-INF/jars/bundled.jar", &bundled),
        ],
    )
}

// =============================================================================
// General
// =============================================================================

#[test]
fn version_flag_works() {
    let temp = TempDir::new().unwrap();
    modcompat(temp.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("modcompat"));
}

#[test]
fn completion_generates_script() {
    let temp = TempDir::new().unwrap();
    modcompat(temp.path())
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("modcompat"));
}

// =============================================================================
// inspect
// =============================================================================

#[test]
fn inspect_prints_metadata() {
    let temp = TempDir::new().unwrap();
    let jar = example_mod(temp.path());

    modcompat(temp.path())
        .arg("inspect")
        .arg(&jar)
        .assert()
        .success()
        .stdout(predicate::str::contains("main:\n    - com.example.ExampleMod"))
        .stdout(predicate::str::contains("access widener: example.accesswidener"))
        .stdout(predicate::str::contains("  - META-INF/jars/bundled.jar"));
}

#[test]
fn inspect_json_is_machine_readable() {
    let temp = TempDir::new().unwrap();
    let jar = example_mod(temp.path());

    let output = modcompat(temp.path())
        .args(["inspect", "--json"])
        .arg(&jar)
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["entrypoints"]["main"][0], "com.example.ExampleMod");
    assert_eq!(
        value["entrypoints"]["client"][0],
        "com.example.client.ExampleClient"
    );
    assert_eq!(value["accessWidener"], "example.accesswidener");
    assert_eq!(value["nestedArchives"][0], "META-INF/jars/bundled.jar");
}

#[test]
fn inspect_without_metadata_succeeds() {
    let temp = TempDir::new().unwrap();
    let jar = write_jar(temp.path(), "plain.jar", &[("a/B.class", b"")]);

    modcompat(temp.path())
        .arg("inspect")
        .arg(&jar)
        .assert()
        .success()
        .stdout(predicate::str::contains("not a Fabric mod"));
}

#[test]
fn inspect_reports_field_path() {
    let temp = TempDir::new().unwrap();
    let jar = write_jar(
        temp.path(),
        "bad.jar",
        &[(
            "fabric.mod.json",
            br#"{"schemaVersion":1,"entrypoints":{"main":["a.A","b.B",7]}}"#,
        )],
    );

    modcompat(temp.path())
        .arg("inspect")
        .arg(&jar)
        .assert()
        .failure()
        .stderr(predicate::str::contains("entrypoints.main[2]"));
}

#[test]
fn inspect_rejects_wrong_schema_version() {
    let temp = TempDir::new().unwrap();
    let jar = write_jar(
        temp.path(),
        "v2.jar",
        &[("fabric.mod.json", br#"{"schemaVersion":2}"#)],
    );

    modcompat(temp.path())
        .arg("inspect")
        .arg(&jar)
        .assert()
        .failure()
        .stderr(predicate::str::contains("schema version"));
}

// =============================================================================
// scan
// =============================================================================

#[test]
fn scan_answers_checks() {
    let temp = TempDir::new().unwrap();
    let jar = example_mod(temp.path());

    modcompat(temp.path())
        .args(["scan", "--mod"])
        .arg(&jar)
        .args([
            "--check",
            "com.example.ExampleMod",
            "--check",
            "com/example/client/ExampleClient",
            "--check",
            "com.bundled.Helper",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("com/example/ExampleMod: confirmed"))
        .stdout(predicate::str::contains(
            "com/example/client/ExampleClient: confirmed",
        ))
        .stdout(predicate::str::contains("com/bundled/Helper: unknown"))
        .stdout(predicate::str::contains("nested jars indexed: 1"));
}

#[test]
fn scan_library_does_not_register_entrypoints() {
    let temp = TempDir::new().unwrap();
    let jar = example_mod(temp.path());

    modcompat(temp.path())
        .args(["scan", "--library"])
        .arg(&jar)
        .args(["--check", "com.example.ExampleMod"])
        .assert()
        .success()
        .stdout(predicate::str::contains("com/example/ExampleMod: unknown"));
}

#[test]
fn scan_quiet_prints_only_answers() {
    let temp = TempDir::new().unwrap();
    let jar = example_mod(temp.path());

    modcompat(temp.path())
        .args(["-q", "scan", "--mod"])
        .arg(&jar)
        .args(["--check", "com.example.ExampleMod"])
        .assert()
        .success()
        .stdout("com/example/ExampleMod: confirmed\n");
}

#[test]
fn scan_requires_an_archive() {
    let temp = TempDir::new().unwrap();
    modcompat(temp.path())
        .arg("scan")
        .assert()
        .failure()
        .stderr(predicate::str::contains("nothing to scan"));
}

#[test]
fn scan_keeps_going_by_default() {
    let temp = TempDir::new().unwrap();
    let good = example_mod(temp.path());
    let bad = write_jar(temp.path(), "bad.jar", &[("fabric.mod.json", b"{")]);

    modcompat(temp.path())
        .args(["scan", "--mod"])
        .arg(&bad)
        .arg("--mod")
        .arg(&good)
        .args(["--check", "com.example.ExampleMod"])
        .assert()
        .success()
        .stderr(predicate::str::contains("skipped"))
        .stdout(predicate::str::contains("com/example/ExampleMod: confirmed"));
}

#[test]
fn scan_stops_when_configured() {
    let temp = TempDir::new().unwrap();
    let bad = write_jar(temp.path(), "bad.jar", &[("fabric.mod.json", b"{")]);
    std::fs::write(
        temp.path().join("modcompat.toml"),
        "[scan]\nkeep_going = false\n",
    )
    .unwrap();

    modcompat(temp.path())
        .args(["scan", "--mod"])
        .arg(&bad)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to scan"));
}

#[test]
fn scan_warns_about_unknown_sections() {
    let temp = TempDir::new().unwrap();
    let jar = example_mod(temp.path());
    let config = temp.path().join("custom.toml");
    std::fs::write(&config, "[fabric]\ncopy_buffer_size = 4096\n\n[quilt]\nfoo = 1\n").unwrap();

    modcompat(temp.path())
        .arg("--config")
        .arg(&config)
        .args(["scan", "--mod"])
        .arg(&jar)
        .assert()
        .success()
        .stderr(predicate::str::contains("[quilt]"))
        .stderr(predicate::str::contains("[fabric]").not());
}

#[test]
fn scan_rejects_invalid_fabric_section() {
    let temp = TempDir::new().unwrap();
    let jar = example_mod(temp.path());
    std::fs::write(
        temp.path().join("modcompat.toml"),
        "[fabric]\ncopy_buffer_size = 0\n",
    )
    .unwrap();

    modcompat(temp.path())
        .args(["scan", "--mod"])
        .arg(&jar)
        .assert()
        .failure()
        .stderr(predicate::str::contains("copy_buffer_size"));
}

#[test]
fn scan_reports_each_skipped_archive_once() {
    let temp = TempDir::new().unwrap();
    let bad = write_jar(
        temp.path(),
        "v2.jar",
        &[
            ("fabric.mod.json", br#"{"schemaVersion":2}"#),
            ("v2/Thing.class", b""),
        ],
    );

    let output = modcompat(temp.path())
        .args(["scan", "--mod"])
        .arg(&bad)
        .output()
        .unwrap();
    assert!(output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.matches("skipped '").count(), 1, "stderr: {stderr}");
    assert_eq!(stderr.matches("schema version").count(), 1, "stderr: {stderr}");
    // The archive is still indexed as a plain jar.
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("archives indexed: 1 (1 classes)"), "stdout: {stdout}");
}
